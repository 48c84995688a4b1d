//! Reqwest-backed implementation of [`DataAccess`].

use chrono::Utc;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::auth::{LoginMetadata, Session, StaffCredentials};
use crate::client::wire::{
    AdministrationDto, ConsentDto, ConsentUpdatePayload, LoginResponseDto, PatientDto,
    PatientPayload, RecordDto, RecordPayload, auth_payload,
};
use crate::client::DataAccess;
use crate::config;
use crate::error::ApiError;
use crate::models::analytics::AnalyticsData;
use crate::models::consent::Consent;
use crate::models::patient::{Patient, PatientDraft};
use crate::models::record::{MedicalRecord, RecordDraft};
use crate::models::user::AdministrationData;

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Client against the configured backend (`ATLASCARE_API_URL` or the
    /// default local address).
    pub fn new() -> Self {
        Self::with_base_url(&config::api_base_url())
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends the request and decodes the body. `lookup` names the entity a
    /// 404 refers to; without it a 404 is reported like any other failure.
    async fn dispatch<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        endpoint: &str,
        lookup: Option<(&'static str, &str)>,
    ) -> Result<T, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::network(endpoint, e.to_string()))?;

        let status = response.status();
        debug!(endpoint, status = status.as_u16(), "api response");

        if status == reqwest::StatusCode::NOT_FOUND {
            if let Some((entity, id)) = lookup {
                return Err(ApiError::not_found(entity, id));
            }
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::network(
                endpoint,
                format!("server returned {status}: {body}"),
            ));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::network(endpoint, format!("invalid response body: {e}")))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.dispatch(self.http.get(self.url(path)), path, None)
            .await
    }

    /// Like `dispatch` but for endpoints whose success body is empty
    /// (deletes return 204).
    async fn dispatch_empty(
        &self,
        request: reqwest::RequestBuilder,
        endpoint: &str,
        lookup: (&'static str, &str),
    ) -> Result<(), ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::network(endpoint, e.to_string()))?;

        let status = response.status();
        debug!(endpoint, status = status.as_u16(), "api response");

        if status == reqwest::StatusCode::NOT_FOUND {
            let (entity, id) = lookup;
            return Err(ApiError::not_found(entity, id));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::network(
                endpoint,
                format!("server returned {status}: {body}"),
            ));
        }
        Ok(())
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl DataAccess for ApiClient {
    async fn list_patients(&self) -> Result<Vec<Patient>, ApiError> {
        let dtos: Vec<PatientDto> = self.get_json("/api/patients").await?;
        dtos.into_iter().map(Patient::try_from).collect()
    }

    async fn get_patient(&self, id: &str) -> Result<Patient, ApiError> {
        let path = format!("/api/patients/{id}");
        let dto: PatientDto = self
            .dispatch(self.http.get(self.url(&path)), &path, Some(("patient", id)))
            .await?;
        Patient::try_from(dto)
    }

    async fn create_patient(&self, draft: &PatientDraft) -> Result<Patient, ApiError> {
        draft.validate()?;
        let path = "/api/patients";
        let payload = PatientPayload::from(draft);
        let dto: PatientDto = self
            .dispatch(self.http.post(self.url(path)).json(&payload), path, None)
            .await?;
        Patient::try_from(dto)
    }

    async fn update_patient(&self, id: &str, draft: &PatientDraft) -> Result<Patient, ApiError> {
        draft.validate()?;
        let path = format!("/api/patients/{id}");
        let payload = PatientPayload::from(draft);
        let dto: PatientDto = self
            .dispatch(
                self.http.put(self.url(&path)).json(&payload),
                &path,
                Some(("patient", id)),
            )
            .await?;
        Patient::try_from(dto)
    }

    async fn delete_patient(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("/api/patients/{id}");
        self.dispatch_empty(self.http.delete(self.url(&path)), &path, ("patient", id))
            .await
    }

    async fn list_records(&self) -> Result<Vec<MedicalRecord>, ApiError> {
        let dtos: Vec<RecordDto> = self.get_json("/api/medical-records").await?;
        dtos.into_iter().map(MedicalRecord::try_from).collect()
    }

    async fn get_record(&self, id: &str) -> Result<MedicalRecord, ApiError> {
        let path = format!("/api/medical-records/{id}");
        let dto: RecordDto = self
            .dispatch(
                self.http.get(self.url(&path)),
                &path,
                Some(("medical record", id)),
            )
            .await?;
        MedicalRecord::try_from(dto)
    }

    async fn create_record(&self, draft: &RecordDraft) -> Result<MedicalRecord, ApiError> {
        draft.validate()?;
        let path = "/api/medical-records";
        let payload = RecordPayload::build(draft, Utc::now().date_naive());
        let dto: RecordDto = self
            .dispatch(self.http.post(self.url(path)).json(&payload), path, None)
            .await?;
        MedicalRecord::try_from(dto)
    }

    async fn update_record(
        &self,
        id: &str,
        draft: &RecordDraft,
    ) -> Result<MedicalRecord, ApiError> {
        draft.validate()?;
        let path = format!("/api/medical-records/{id}");
        let payload = RecordPayload::build(draft, Utc::now().date_naive());
        let dto: RecordDto = self
            .dispatch(
                self.http.put(self.url(&path)).json(&payload),
                &path,
                Some(("medical record", id)),
            )
            .await?;
        MedicalRecord::try_from(dto)
    }

    async fn delete_record(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("/api/medical-records/{id}");
        self.dispatch_empty(
            self.http.delete(self.url(&path)),
            &path,
            ("medical record", id),
        )
        .await
    }

    async fn list_consents(&self) -> Result<Vec<Consent>, ApiError> {
        let dtos: Vec<ConsentDto> = self.get_json("/api/consents").await?;
        Ok(dtos.into_iter().map(Consent::from).collect())
    }

    async fn update_consent(&self, id: &str, granted: bool) -> Result<Consent, ApiError> {
        let path = format!("/api/consents/{id}");
        let payload = ConsentUpdatePayload { granted };
        let dto: ConsentDto = self
            .dispatch(
                self.http.put(self.url(&path)).json(&payload),
                &path,
                Some(("consent", id)),
            )
            .await?;
        Ok(Consent::from(dto))
    }

    async fn get_administration(&self) -> Result<AdministrationData, ApiError> {
        let dto: AdministrationDto = self.get_json("/api/administration").await?;
        Ok(AdministrationData::from(dto))
    }

    async fn get_analytics(&self) -> Result<AnalyticsData, ApiError> {
        self.get_json("/api/analytics").await
    }

    async fn login(
        &self,
        credentials: &StaffCredentials,
        metadata: &LoginMetadata,
    ) -> Result<Session, ApiError> {
        crate::auth::validate_credentials(credentials)?;
        let path = "/api/auth/login";
        let payload = auth_payload(credentials, metadata);
        let dto: LoginResponseDto = self
            .dispatch(self.http.post(self.url(path)).json(&payload), path, None)
            .await?;
        Ok(Session::from(dto))
    }
}
