use crate::error::ApiError;
use crate::filter::{Filterable, TabPredicate};
use crate::models::enums::{record_type_label, RecordTab};
use crate::models::patient::Patient;

/// A medical record as returned by the API, translated out of the wire
/// shape. `record_type` is the backend category code ("lab_result"), not
/// the display label. The date stays a string; it is parsed only at the
/// filter boundary so a malformed value degrades instead of failing a load.
#[derive(Debug, Clone, PartialEq)]
pub struct MedicalRecord {
    pub id: String,
    pub patient_id: String,
    pub record_type: String,
    pub record_category: Option<String>,
    pub title: String,
    pub provider: String,
    pub date: String,
    pub status: String,
    pub description: Option<String>,
    pub secondary_status: Option<String>,
    pub reviewed_by: Option<String>,
    pub attachments: Vec<String>,
    pub is_exported: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Filterable for MedicalRecord {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title, &self.provider, &self.record_type]
    }

    fn status(&self) -> Option<&str> {
        Some(&self.status)
    }

    fn date_value(&self) -> Option<&str> {
        Some(&self.date)
    }

    fn category(&self) -> Option<&str> {
        Some(&self.record_type)
    }
}

/// Display row for the medical-records list: a record joined with its
/// patient and the human-readable type badge. Built once per load from the
/// bundle's two collections.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordRow {
    pub record_id: String,
    pub patient_id: String,
    pub title: String,
    /// Backend category code, kept for the tab mapping.
    pub category: String,
    /// Display label, e.g. "Lab Result".
    pub type_badge: String,
    pub description: Option<String>,
    pub patient_name: String,
    pub patient_initials: String,
    pub provider: String,
    pub date: String,
    pub status: String,
    pub secondary_status: Option<String>,
}

impl RecordRow {
    pub fn build(record: &MedicalRecord, patients: &[Patient]) -> RecordRow {
        let patient = patients.iter().find(|p| p.id == record.patient_id);
        let (patient_name, patient_initials) = match patient {
            Some(p) => (p.full_name(), p.initials()),
            None => ("Unknown Patient".to_string(), "?".to_string()),
        };
        RecordRow {
            record_id: record.id.clone(),
            patient_id: record.patient_id.clone(),
            title: record.title.clone(),
            category: record.record_type.clone(),
            type_badge: record_type_label(&record.record_type),
            description: record.description.clone(),
            patient_name,
            patient_initials,
            provider: record.provider.clone(),
            date: record.date.clone(),
            status: record.status.clone(),
            secondary_status: record.secondary_status.clone(),
        }
    }

    pub fn build_all(records: &[MedicalRecord], patients: &[Patient]) -> Vec<RecordRow> {
        records.iter().map(|r| RecordRow::build(r, patients)).collect()
    }
}

impl Filterable for RecordRow {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.patient_name, &self.provider, &self.type_badge, &self.title]
    }

    fn status(&self) -> Option<&str> {
        Some(&self.status)
    }

    fn date_value(&self) -> Option<&str> {
        Some(&self.date)
    }

    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }
}

impl TabPredicate<RecordRow> for RecordTab {
    fn is_all(&self) -> bool {
        matches!(self, RecordTab::All)
    }

    fn admits(&self, row: &RecordRow) -> bool {
        match self {
            RecordTab::All => true,
            RecordTab::PendingSync => row
                .secondary_status
                .as_deref()
                .is_some_and(|s| s.eq_ignore_ascii_case("pending sync")),
            tab => tab
                .categories()
                .is_some_and(|codes| codes.contains(&row.category.as_str())),
        }
    }
}

/// Fields for creating or updating a record. Validated locally; the wire
/// payload builder normalizes codes and dates on top of this.
#[derive(Debug, Clone, Default)]
pub struct RecordDraft {
    pub patient_id: String,
    /// May arrive as a display label ("Lab Result"); normalized to the
    /// backend code at the boundary.
    pub record_type: String,
    pub record_category: Option<String>,
    pub title: String,
    pub provider: String,
    /// `YYYY-MM-DD` or legacy `DD-MM-YYYY`; empty means today.
    pub date: Option<String>,
    pub status: String,
    pub description: Option<String>,
    pub secondary_status: Option<String>,
    pub reviewed_by: Option<String>,
    pub attachments: Vec<String>,
    pub is_exported: bool,
}

impl RecordDraft {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut missing = Vec::new();
        if self.patient_id.trim().is_empty() {
            missing.push("patient_id");
        }
        if self.record_type.trim().is_empty() {
            missing.push("record_type");
        }
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.provider.trim().is_empty() {
            missing.push("provider");
        }
        if self.status.trim().is_empty() {
            missing.push("status");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )))
        }
    }
}

#[cfg(test)]
pub(crate) fn test_record(id: &str, patient_id: &str, record_type: &str, status: &str) -> MedicalRecord {
    MedicalRecord {
        id: id.to_string(),
        patient_id: patient_id.to_string(),
        record_type: record_type.to_string(),
        record_category: None,
        title: "Follow-up Consultation".to_string(),
        provider: "Dr. Sarah Johnson".to_string(),
        date: "2024-01-15".to_string(),
        status: status.to_string(),
        description: Some("Blood sugar levels improving.".to_string()),
        secondary_status: None,
        reviewed_by: None,
        attachments: Vec::new(),
        is_exported: false,
        created_at: None,
        updated_at: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::patient::test_patient;

    #[test]
    fn row_joins_patient_name_and_initials() {
        let record = test_record("r1", "p1", "consultation", "completed");
        let patients = vec![test_patient("p1", "Amara", "Okonkwo")];
        let row = RecordRow::build(&record, &patients);
        assert_eq!(row.patient_name, "Amara Okonkwo");
        assert_eq!(row.patient_initials, "AO");
        assert_eq!(row.type_badge, "Consultation");
    }

    #[test]
    fn row_for_unknown_patient_still_renders() {
        let record = test_record("r1", "missing", "lab_result", "pending review");
        let row = RecordRow::build(&record, &[]);
        assert_eq!(row.patient_name, "Unknown Patient");
        assert_eq!(row.type_badge, "Lab Result");
    }

    #[test]
    fn lab_results_tab_admits_lab_result_code() {
        let record = test_record("r1", "p1", "lab_result", "pending review");
        let row = RecordRow::build(&record, &[]);
        assert!(RecordTab::LabResults.admits(&row));
        assert!(!RecordTab::Consultations.admits(&row));
    }

    #[test]
    fn pending_sync_tab_keys_on_secondary_status() {
        let mut record = test_record("r1", "p1", "lab_result", "pending review");
        record.secondary_status = Some("Pending sync".to_string());
        let row = RecordRow::build(&record, &[]);
        assert!(RecordTab::PendingSync.admits(&row));

        record.secondary_status = None;
        let row = RecordRow::build(&record, &[]);
        assert!(!RecordTab::PendingSync.admits(&row));
    }

    #[test]
    fn draft_requires_core_fields() {
        let err = RecordDraft::default().validate().unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert!(err.to_string().contains("patient_id"));
        assert!(err.to_string().contains("title"));
    }
}
