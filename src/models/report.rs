use uuid::Uuid;

use crate::error::ApiError;
use crate::filter::Filterable;
use crate::models::enums::{record_type_label, ReportStatus};
use crate::models::patient::Patient;
use crate::models::record::MedicalRecord;

/// A report entry on the reports screen. Entries are seeded from the
/// fetched records and then edited locally; they have no endpoint of
/// their own yet.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportEntry {
    pub id: String,
    pub patient_name: String,
    pub report_type: String,
    pub date: String,
    pub status: ReportStatus,
    pub doctor: String,
    pub description: Option<String>,
}

impl ReportEntry {
    /// Derive an entry from a medical record, resolving the patient name
    /// from the bundle's patient collection.
    pub fn from_record(record: &MedicalRecord, patients: &[Patient]) -> ReportEntry {
        let patient_name = patients
            .iter()
            .find(|p| p.id == record.patient_id)
            .map(Patient::full_name)
            .unwrap_or_else(|| "Unknown Patient".to_string());
        ReportEntry {
            id: record.id.clone(),
            patient_name,
            report_type: record_type_label(&record.record_type),
            date: record.date.clone(),
            status: report_status_for(&record.status),
            doctor: record.provider.clone(),
            description: record.description.clone(),
        }
    }
}

/// Record statuses collapse onto the three report states; anything not
/// finished or submitted counts as a draft.
fn report_status_for(record_status: &str) -> ReportStatus {
    match record_status.to_lowercase().as_str() {
        "completed" | "active" => ReportStatus::Completed,
        "submitted" => ReportStatus::Submitted,
        _ => ReportStatus::Draft,
    }
}

impl Filterable for ReportEntry {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.patient_name, &self.doctor, &self.report_type]
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn date_value(&self) -> Option<&str> {
        Some(&self.date)
    }

    fn category(&self) -> Option<&str> {
        Some(&self.report_type)
    }
}

/// Editable fields of a report entry. `id` of None means create.
#[derive(Debug, Clone, Default)]
pub struct ReportDraft {
    pub id: Option<String>,
    pub patient_name: String,
    pub report_type: String,
    pub doctor: String,
    pub description: Option<String>,
    pub status: ReportStatus,
}

impl ReportDraft {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.patient_name.trim().is_empty() || self.doctor.trim().is_empty() {
            return Err(ApiError::validation(
                "patient name and doctor are required",
            ));
        }
        Ok(())
    }

    /// Materialize as a new entry dated `today`.
    pub fn into_new_entry(self, today: &str) -> ReportEntry {
        ReportEntry {
            id: Uuid::new_v4().to_string(),
            patient_name: self.patient_name,
            report_type: if self.report_type.trim().is_empty() {
                "General".to_string()
            } else {
                self.report_type
            },
            date: today.to_string(),
            status: self.status,
            doctor: self.doctor,
            description: self.description,
        }
    }
}
