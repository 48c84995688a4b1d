//! Backend access.
//!
//! `DataAccess` is the seam between the views and the network: views hold
//! any implementation, production code uses the reqwest-backed `ApiClient`,
//! and tests substitute in-memory fakes.

pub mod http;
pub mod wire;

pub use http::ApiClient;

use crate::auth::{LoginMetadata, Session, StaffCredentials};
use crate::error::ApiError;
use crate::models::analytics::AnalyticsData;
use crate::models::consent::Consent;
use crate::models::patient::{Patient, PatientDraft};
use crate::models::record::{MedicalRecord, RecordDraft};
use crate::models::user::AdministrationData;

/// Everything the views need from the backend. Futures from these methods
/// are only awaited on the caller's task, so no `Send` bound is required.
#[allow(async_fn_in_trait)]
pub trait DataAccess {
    async fn list_patients(&self) -> Result<Vec<Patient>, ApiError>;
    async fn get_patient(&self, id: &str) -> Result<Patient, ApiError>;
    async fn create_patient(&self, draft: &PatientDraft) -> Result<Patient, ApiError>;
    async fn update_patient(&self, id: &str, draft: &PatientDraft) -> Result<Patient, ApiError>;
    async fn delete_patient(&self, id: &str) -> Result<(), ApiError>;

    async fn list_records(&self) -> Result<Vec<MedicalRecord>, ApiError>;
    async fn get_record(&self, id: &str) -> Result<MedicalRecord, ApiError>;
    async fn create_record(&self, draft: &RecordDraft) -> Result<MedicalRecord, ApiError>;
    async fn update_record(&self, id: &str, draft: &RecordDraft)
        -> Result<MedicalRecord, ApiError>;
    async fn delete_record(&self, id: &str) -> Result<(), ApiError>;

    async fn list_consents(&self) -> Result<Vec<Consent>, ApiError>;
    async fn update_consent(&self, id: &str, granted: bool) -> Result<Consent, ApiError>;

    async fn get_administration(&self) -> Result<AdministrationData, ApiError>;
    async fn get_analytics(&self) -> Result<AnalyticsData, ApiError>;

    async fn login(
        &self,
        credentials: &StaffCredentials,
        metadata: &LoginMetadata,
    ) -> Result<Session, ApiError>;
}
