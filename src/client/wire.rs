//! Wire shapes and boundary translation.
//!
//! The API speaks snake_case JSON with numeric ids and nullable fields;
//! view logic wants opaque string ids, materialized collections, and no
//! secrets. Everything crossing the boundary passes through here, in both
//! directions: responses are parsed into validated domain models, and
//! drafts are normalized (trimming, code and date normalization) into
//! request payloads.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::auth::{LoginMetadata, Session, StaffCredentials};
use crate::error::ApiError;
use crate::models::consent::{Consent, ConsentChange};
use crate::models::patient::{Address, EmergencyContact, Patient, PatientDraft};
use crate::models::record::{MedicalRecord, RecordDraft};
use crate::models::user::{AdminStats, AdministrationData, Role, User};

/// The backend uses i32 ids today; older endpoints already return strings.
/// Accept both and carry strings in memory.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Num(i64),
    Str(String),
}

impl WireId {
    fn into_string(self) -> String {
        match self {
            WireId::Num(n) => n.to_string(),
            WireId::Str(s) => s,
        }
    }
}

/// Outgoing ids: numeric when the value is numeric, string otherwise.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum WireIdOut {
    Num(i64),
    Str(String),
}

impl From<&str> for WireIdOut {
    fn from(raw: &str) -> Self {
        match raw.trim().parse::<i64>() {
            Ok(n) => WireIdOut::Num(n),
            Err(_) => WireIdOut::Str(raw.trim().to_string()),
        }
    }
}

fn none_if_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Patients
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct PatientDto {
    pub id: WireId,
    pub first_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    pub last_name: String,
    pub date_of_birth: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub blood_type: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub village: Option<String>,
    #[serde(default)]
    pub emergency_contact: Option<EmergencyContact>,
    #[serde(default)]
    pub active_conditions: Option<Vec<String>>,
    #[serde(default)]
    pub known_allergies: Option<Vec<String>>,
    #[serde(default)]
    pub additional_notes: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub sync_status: Option<String>,
    #[serde(default)]
    pub critical_flag: Option<bool>,
    #[serde(default)]
    pub profile_picture_url: Option<String>,
    #[serde(default)]
    pub next_visit: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl TryFrom<PatientDto> for Patient {
    type Error = ApiError;

    fn try_from(dto: PatientDto) -> Result<Patient, ApiError> {
        if dto.first_name.trim().is_empty() || dto.last_name.trim().is_empty() {
            return Err(ApiError::validation("patient response is missing a name"));
        }
        Ok(Patient {
            id: dto.id.into_string(),
            first_name: dto.first_name,
            middle_name: none_if_empty(dto.middle_name),
            last_name: dto.last_name,
            date_of_birth: dto.date_of_birth,
            gender: dto.gender.unwrap_or_else(|| "unknown".to_string()),
            blood_type: none_if_empty(dto.blood_type),
            phone_number: dto.phone_number.unwrap_or_default(),
            email: none_if_empty(dto.email),
            address: dto.address,
            village: none_if_empty(dto.village),
            emergency_contact: dto.emergency_contact,
            active_conditions: dto.active_conditions.unwrap_or_default(),
            known_allergies: dto.known_allergies.unwrap_or_default(),
            additional_notes: none_if_empty(dto.additional_notes),
            status: dto.status.unwrap_or_else(|| "unknown".to_string()),
            sync_status: none_if_empty(dto.sync_status),
            critical_flag: dto.critical_flag.unwrap_or(false),
            profile_picture_url: none_if_empty(dto.profile_picture_url),
            next_visit: none_if_empty(dto.next_visit),
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct PatientPayload {
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    pub last_name: String,
    pub date_of_birth: String,
    pub gender: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_type: Option<String>,
    pub phone_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub village: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<EmergencyContact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_conditions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub known_allergies: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
    pub status: String,
}

impl From<&PatientDraft> for PatientPayload {
    fn from(draft: &PatientDraft) -> PatientPayload {
        PatientPayload {
            first_name: draft.first_name.trim().to_string(),
            middle_name: none_if_empty(draft.middle_name.clone()),
            last_name: draft.last_name.trim().to_string(),
            date_of_birth: draft.date_of_birth.trim().to_string(),
            gender: draft.gender.trim().to_lowercase(),
            blood_type: none_if_empty(draft.blood_type.clone()),
            phone_number: draft.phone_number.trim().to_string(),
            email: none_if_empty(draft.email.clone()),
            address: draft.address.clone(),
            village: none_if_empty(draft.village.clone()),
            emergency_contact: draft.emergency_contact.clone(),
            active_conditions: (!draft.active_conditions.is_empty())
                .then(|| draft.active_conditions.clone()),
            known_allergies: (!draft.known_allergies.is_empty())
                .then(|| draft.known_allergies.clone()),
            additional_notes: none_if_empty(draft.additional_notes.clone()),
            status: draft.status.trim().to_lowercase(),
        }
    }
}

// ---------------------------------------------------------------------------
// Medical records
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct RecordDto {
    pub id: WireId,
    pub patient_id: WireId,
    pub record_type: String,
    #[serde(default)]
    pub record_category: Option<String>,
    pub title: String,
    pub provider: String,
    pub date: String,
    pub status: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub secondary_status: Option<String>,
    #[serde(default)]
    pub reviewed_by: Option<String>,
    #[serde(default)]
    pub attachments: Option<Vec<String>>,
    #[serde(default)]
    pub is_exported: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl TryFrom<RecordDto> for MedicalRecord {
    type Error = ApiError;

    fn try_from(dto: RecordDto) -> Result<MedicalRecord, ApiError> {
        if dto.title.trim().is_empty() {
            return Err(ApiError::validation("record response is missing a title"));
        }
        Ok(MedicalRecord {
            id: dto.id.into_string(),
            patient_id: dto.patient_id.into_string(),
            record_type: dto.record_type,
            record_category: none_if_empty(dto.record_category),
            title: dto.title,
            provider: dto.provider,
            date: dto.date,
            status: dto.status,
            description: none_if_empty(dto.description),
            secondary_status: none_if_empty(dto.secondary_status),
            reviewed_by: none_if_empty(dto.reviewed_by),
            attachments: dto.attachments.unwrap_or_default(),
            is_exported: dto.is_exported.unwrap_or(false),
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct RecordPayload {
    pub patient_id: WireIdOut,
    pub record_type: String,
    pub title: String,
    pub provider: String,
    pub date: String,
    pub status: String,
    pub record_category: Option<String>,
    pub description: Option<String>,
    pub secondary_status: Option<String>,
    pub reviewed_by: Option<String>,
    pub attachments: Option<Vec<String>>,
    pub is_exported: bool,
}

impl RecordPayload {
    pub fn build(draft: &RecordDraft, today: NaiveDate) -> RecordPayload {
        RecordPayload {
            patient_id: WireIdOut::from(draft.patient_id.as_str()),
            record_type: normalize_record_type(&draft.record_type),
            title: draft.title.trim().to_string(),
            provider: draft.provider.trim().to_string(),
            date: to_iso_date(draft.date.as_deref(), today),
            status: draft.status.trim().to_lowercase(),
            record_category: none_if_empty(draft.record_category.clone()),
            description: none_if_empty(draft.description.clone()),
            secondary_status: none_if_empty(draft.secondary_status.clone()),
            reviewed_by: none_if_empty(draft.reviewed_by.clone()),
            attachments: (!draft.attachments.is_empty()).then(|| draft.attachments.clone()),
            is_exported: draft.is_exported,
        }
    }
}

/// Display labels become backend codes: "Lab Result" -> "lab_result".
pub fn normalize_record_type(raw: &str) -> String {
    raw.trim().to_lowercase().replace(' ', "_").replace('-', "_")
}

/// Accepts `YYYY-MM-DD` as-is and converts the legacy `DD-MM-YYYY` form;
/// empty input means today. Anything else is passed through for the server
/// to reject.
pub fn to_iso_date(raw: Option<&str>, today: NaiveDate) -> String {
    let raw = raw.map(str::trim).unwrap_or("");
    if raw.is_empty() {
        return today.format("%Y-%m-%d").to_string();
    }
    if NaiveDate::parse_from_str(raw, "%Y-%m-%d").is_ok() {
        return raw.to_string();
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(raw, "%d-%m-%Y") {
        return parsed.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

// ---------------------------------------------------------------------------
// Consents
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ConsentChangeDto {
    pub changed_at: String,
    pub previous_value: bool,
    pub new_value: bool,
    pub changed_by: String,
}

#[derive(Debug, Deserialize)]
pub struct ConsentDto {
    pub id: WireId,
    pub patient_id: WireId,
    /// Older clients called this `consent_type`.
    #[serde(alias = "consent_type")]
    pub category: String,
    pub granted: bool,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub history: Option<Vec<ConsentChangeDto>>,
}

impl From<ConsentDto> for Consent {
    fn from(dto: ConsentDto) -> Consent {
        Consent {
            id: dto.id.into_string(),
            patient_id: dto.patient_id.into_string(),
            category: dto.category,
            granted: dto.granted,
            expires_at: none_if_empty(dto.expires_at),
            updated_at: none_if_empty(dto.updated_at),
            history: dto
                .history
                .unwrap_or_default()
                .into_iter()
                .map(|c| ConsentChange {
                    changed_at: c.changed_at,
                    previous_value: c.previous_value,
                    new_value: c.new_value,
                    changed_by: c.changed_by,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ConsentUpdatePayload {
    pub granted: bool,
}

// ---------------------------------------------------------------------------
// Administration
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct UserDto {
    pub id: WireId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    pub username: String,
    /// Present on the wire today; dropped at this boundary and never
    /// carried into view state.
    #[serde(default)]
    #[allow(dead_code)]
    pub password: Option<String>,
    pub role: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(default)]
    pub license_number: Option<String>,
    pub status: String,
    #[serde(default)]
    pub last_login: Option<String>,
    #[serde(default)]
    pub last_activity: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub profile_picture_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl From<UserDto> for User {
    fn from(dto: UserDto) -> User {
        User {
            id: dto.id.into_string(),
            first_name: dto.first_name,
            last_name: dto.last_name,
            email: dto.email,
            phone_number: none_if_empty(dto.phone_number),
            username: dto.username,
            role: dto.role,
            department: none_if_empty(dto.department),
            specialization: none_if_empty(dto.specialization),
            license_number: none_if_empty(dto.license_number),
            status: dto.status,
            last_login: none_if_empty(dto.last_login),
            last_activity: none_if_empty(dto.last_activity),
            is_active: dto.is_active.unwrap_or(false),
            profile_picture_url: none_if_empty(dto.profile_picture_url),
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AdministrationDto {
    pub stats: AdminStats,
    pub users: Vec<UserDto>,
    pub roles: Vec<Role>,
}

impl From<AdministrationDto> for AdministrationData {
    fn from(dto: AdministrationDto) -> AdministrationData {
        AdministrationData {
            stats: dto.stats,
            users: dto.users.into_iter().map(User::from).collect(),
            roles: dto.roles,
        }
    }
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct AuthPayload {
    pub identity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staff_id: Option<String>,
    pub password: String,
    pub channel: &'static str,
    pub device: String,
    pub version: String,
}

/// Split the single identity field into email vs staff id and attach the
/// client metadata. Assumes `validate_credentials` already passed.
pub fn auth_payload(credentials: &StaffCredentials, metadata: &LoginMetadata) -> AuthPayload {
    let identity = credentials.staff_id_or_email.trim().to_string();
    let is_email = identity.contains('@');
    AuthPayload {
        email: is_email.then(|| identity.clone()),
        staff_id: (!is_email).then(|| identity.clone()),
        identity,
        password: credentials.password.clone(),
        channel: metadata.channel.as_str(),
        device: metadata.device.clone(),
        version: metadata.version.clone(),
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginResponseDto {
    pub token: String,
    #[serde(default)]
    pub issued_at: Option<String>,
}

impl From<LoginResponseDto> for Session {
    fn from(dto: LoginResponseDto) -> Session {
        Session {
            token: dto.token,
            issued_at: dto
                .issued_at
                .unwrap_or_else(|| chrono::Utc::now().to_rfc3339()),
        }
    }
}
