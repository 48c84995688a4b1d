use crate::filter::Filterable;

/// One change in a consent's history, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsentChange {
    pub changed_at: String,
    pub previous_value: bool,
    pub new_value: bool,
    pub changed_by: String,
}

/// A patient's consent for one sharing category ("Emergency room access",
/// "Disease outbreak tracking", ...).
#[derive(Debug, Clone, PartialEq)]
pub struct Consent {
    pub id: String,
    pub patient_id: String,
    pub category: String,
    pub granted: bool,
    pub expires_at: Option<String>,
    pub updated_at: Option<String>,
    pub history: Vec<ConsentChange>,
}

impl Filterable for Consent {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.category]
    }

    fn status(&self) -> Option<&str> {
        Some(if self.granted { "granted" } else { "denied" })
    }

    fn date_value(&self) -> Option<&str> {
        self.updated_at.as_deref()
    }

    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }
}

#[cfg(test)]
pub(crate) fn test_consent(id: &str, patient_id: &str, category: &str, granted: bool) -> Consent {
    Consent {
        id: id.to_string(),
        patient_id: patient_id.to_string(),
        category: category.to_string(),
        granted,
        expires_at: None,
        updated_at: Some("2024-01-10".to_string()),
        history: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_reflects_granted_flag() {
        assert_eq!(test_consent("1", "p1", "Emergency room access", true).status(), Some("granted"));
        assert_eq!(test_consent("2", "p1", "Academic studies", false).status(), Some("denied"));
    }
}
