use crate::filter::{Filterable, TabPredicate};
use crate::models::enums::AuditTab;

/// An audit trail entry. Supplied locally by the host application; there is
/// no list endpoint for these yet.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEntry {
    /// Event code: view, modify, fail, consent, user, export, deny, success.
    pub kind: String,
    pub title: String,
    pub role: Option<String>,
    pub description: String,
    pub user: String,
    pub time: String,
    pub ip: Option<String>,
    /// info, warning, or error.
    pub level: String,
}

impl Filterable for AuditEntry {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title, &self.user, &self.description]
    }

    fn status(&self) -> Option<&str> {
        Some(&self.level)
    }

    fn date_value(&self) -> Option<&str> {
        Some(&self.time)
    }

    fn category(&self) -> Option<&str> {
        Some(&self.kind)
    }
}

impl TabPredicate<AuditEntry> for AuditTab {
    fn is_all(&self) -> bool {
        matches!(self, AuditTab::All)
    }

    fn admits(&self, entry: &AuditEntry) -> bool {
        let kinds: &[&str] = match self {
            AuditTab::All => return true,
            AuditTab::Access => &["success", "fail"],
            AuditTab::DataChanges => &["modify", "consent", "user"],
            AuditTab::Security => &["fail", "export", "deny"],
        };
        kinds.contains(&entry.kind.as_str())
    }
}

#[cfg(test)]
pub(crate) fn test_entry(kind: &str, title: &str, level: &str) -> AuditEntry {
    AuditEntry {
        kind: kind.to_string(),
        title: title.to_string(),
        role: Some("Physician".to_string()),
        description: "Patient: Amara Okonkwo".to_string(),
        user: "Dr. Sarah Johnson".to_string(),
        time: "2024-01-15 10:21:15".to_string(),
        ip: Some("192.168.1.45".to_string()),
        level: level.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_tab_admits_logins_only() {
        assert!(AuditTab::Access.admits(&test_entry("success", "Login Success", "info")));
        assert!(AuditTab::Access.admits(&test_entry("fail", "Failed Login", "warning")));
        assert!(!AuditTab::Access.admits(&test_entry("modify", "Record Modified", "info")));
    }

    #[test]
    fn security_tab_overlaps_access_on_failures() {
        let failed = test_entry("fail", "Failed Login", "warning");
        assert!(AuditTab::Access.admits(&failed));
        assert!(AuditTab::Security.admits(&failed));
        assert!(!AuditTab::Security.admits(&test_entry("view", "Record Viewed", "info")));
    }
}
