use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::filter::{Filterable, TabPredicate};
use crate::models::enums::PatientTab;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub name: String,
    pub phone: String,
    pub relationship: String,
}

/// A registered patient as the views see it: ids are opaque strings,
/// optional collections are always materialized, flags are plain bools.
/// The wire shape lives in `client::wire` and is translated at the boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Patient {
    pub id: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub date_of_birth: String,
    pub gender: String,
    pub blood_type: Option<String>,
    pub phone_number: String,
    pub email: Option<String>,
    pub address: Option<Address>,
    pub village: Option<String>,
    pub emergency_contact: Option<EmergencyContact>,
    pub active_conditions: Vec<String>,
    pub known_allergies: Vec<String>,
    pub additional_notes: Option<String>,
    pub status: String,
    pub sync_status: Option<String>,
    pub critical_flag: bool,
    pub profile_picture_url: Option<String>,
    pub next_visit: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Two-letter initials for the avatar badge, e.g. "AO".
    pub fn initials(&self) -> String {
        let first = self.first_name.chars().next();
        let last = self.last_name.chars().next();
        first
            .into_iter()
            .chain(last)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

impl Filterable for Patient {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.first_name.as_str(), self.last_name.as_str()];
        if let Some(village) = &self.village {
            fields.push(village);
        }
        fields.extend(self.active_conditions.iter().map(String::as_str));
        fields
    }

    fn status(&self) -> Option<&str> {
        Some(&self.status)
    }

    fn category(&self) -> Option<&str> {
        self.village.as_deref()
    }
}

impl TabPredicate<Patient> for PatientTab {
    fn is_all(&self) -> bool {
        matches!(self, PatientTab::All)
    }

    fn admits(&self, patient: &Patient) -> bool {
        match self {
            PatientTab::All => true,
            PatientTab::Active => patient.status.eq_ignore_ascii_case("active"),
            PatientTab::Pending => patient
                .sync_status
                .as_deref()
                .is_some_and(|s| s.eq_ignore_ascii_case("pending")),
            PatientTab::Critical => patient.critical_flag,
        }
    }
}

/// Fields for creating or updating a patient. Validated locally before any
/// request is constructed.
#[derive(Debug, Clone, Default)]
pub struct PatientDraft {
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub date_of_birth: String,
    pub gender: String,
    pub blood_type: Option<String>,
    pub phone_number: String,
    pub email: Option<String>,
    pub address: Option<Address>,
    pub village: Option<String>,
    pub emergency_contact: Option<EmergencyContact>,
    pub active_conditions: Vec<String>,
    pub known_allergies: Vec<String>,
    pub additional_notes: Option<String>,
    pub status: String,
}

impl PatientDraft {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut missing = Vec::new();
        if self.first_name.trim().is_empty() {
            missing.push("first_name");
        }
        if self.last_name.trim().is_empty() {
            missing.push("last_name");
        }
        if self.date_of_birth.trim().is_empty() {
            missing.push("date_of_birth");
        }
        if self.gender.trim().is_empty() {
            missing.push("gender");
        }
        if self.phone_number.trim().is_empty() {
            missing.push("phone_number");
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
pub(crate) fn test_patient(id: &str, first: &str, last: &str) -> Patient {
    Patient {
        id: id.to_string(),
        first_name: first.to_string(),
        middle_name: None,
        last_name: last.to_string(),
        date_of_birth: "1990-04-12".to_string(),
        gender: "female".to_string(),
        blood_type: None,
        phone_number: "+234-800-000-0000".to_string(),
        email: None,
        address: None,
        village: Some("Umuahia North".to_string()),
        emergency_contact: None,
        active_conditions: vec!["Hypertension".to_string()],
        known_allergies: Vec::new(),
        additional_notes: None,
        status: "active".to_string(),
        sync_status: None,
        critical_flag: false,
        profile_picture_url: None,
        next_visit: None,
        created_at: None,
        updated_at: None,
    }
}
