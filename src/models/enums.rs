use crate::error::ApiError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ApiError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ApiError::validation(format!(
                        "invalid {}: {s}",
                        stringify!($name)
                    ))),
                }
            }
        }
    };
}

str_enum!(RecordTab {
    All => "all",
    Consultations => "consultations",
    LabResults => "lab-results",
    Prescriptions => "prescriptions",
    Imaging => "imaging",
    PendingSync => "pending-sync",
});

str_enum!(PatientTab {
    All => "all",
    Active => "active",
    Pending => "pending",
    Critical => "critical",
});

str_enum!(AuditTab {
    All => "all",
    Access => "access",
    DataChanges => "data-changes",
    Security => "security",
});

str_enum!(ReportStatus {
    Draft => "Draft",
    Completed => "Completed",
    Submitted => "Submitted",
});

impl Default for RecordTab {
    fn default() -> Self {
        RecordTab::All
    }
}

impl Default for PatientTab {
    fn default() -> Self {
        PatientTab::All
    }
}

impl Default for AuditTab {
    fn default() -> Self {
        AuditTab::All
    }
}

impl Default for ReportStatus {
    fn default() -> Self {
        ReportStatus::Draft
    }
}

impl RecordTab {
    /// Backend category codes this tab filters on. UI tab labels and
    /// category codes differ ("lab-results" tab vs "lab_result" code), so
    /// the mapping is explicit rather than string equality.
    ///
    /// `All` and `PendingSync` return None: the wildcard admits everything
    /// and pending-sync keys on secondary status instead of category.
    pub fn categories(&self) -> Option<&'static [&'static str]> {
        match self {
            RecordTab::All | RecordTab::PendingSync => None,
            RecordTab::Consultations => Some(&["consultation"]),
            RecordTab::LabResults => Some(&["lab_result"]),
            RecordTab::Prescriptions => Some(&["prescription"]),
            RecordTab::Imaging => Some(&["imaging"]),
        }
    }
}

/// Display label for a backend record type code.
pub fn record_type_label(raw: &str) -> String {
    match raw {
        "consultation" => "Consultation".to_string(),
        "lab_result" => "Lab Result".to_string(),
        "prescription" => "Prescription".to_string(),
        "imaging" => "Imaging".to_string(),
        "diagnosis" => "Diagnosis".to_string(),
        "follow_up" => "Follow-up".to_string(),
        "treatment_plan" => "Treatment Plan".to_string(),
        _ => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn record_tab_round_trip() {
        for (variant, s) in [
            (RecordTab::All, "all"),
            (RecordTab::Consultations, "consultations"),
            (RecordTab::LabResults, "lab-results"),
            (RecordTab::Prescriptions, "prescriptions"),
            (RecordTab::Imaging, "imaging"),
            (RecordTab::PendingSync, "pending-sync"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(RecordTab::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn patient_tab_round_trip() {
        for (variant, s) in [
            (PatientTab::All, "all"),
            (PatientTab::Active, "active"),
            (PatientTab::Pending, "pending"),
            (PatientTab::Critical, "critical"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(PatientTab::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn invalid_enum_returns_error() {
        assert!(RecordTab::from_str("invalid").is_err());
        assert!(AuditTab::from_str("").is_err());
        assert!(ReportStatus::from_str("draft").is_err());
    }

    #[test]
    fn lab_results_tab_maps_to_lab_result_code() {
        assert_eq!(RecordTab::LabResults.categories(), Some(&["lab_result"][..]));
    }

    #[test]
    fn wildcard_and_pending_sync_have_no_category_mapping() {
        assert_eq!(RecordTab::All.categories(), None);
        assert_eq!(RecordTab::PendingSync.categories(), None);
    }

    #[test]
    fn unknown_type_code_is_passed_through() {
        assert_eq!(record_type_label("lab_result"), "Lab Result");
        assert_eq!(record_type_label("vaccination"), "vaccination");
    }
}
