//! Route data preloading.
//!
//! Each route that needs more than one collection fetches them in parallel
//! and resolves to a single bundle. The whole bundle fails as soon as any
//! fetch fails; the error names the fetch that broke so the view can report
//! which data is missing instead of a blank "loading failed".

use tracing::warn;

use crate::client::DataAccess;
use crate::error::{ApiError, PreloadError};
use crate::models::analytics::AnalyticsData;
use crate::models::patient::Patient;
use crate::models::record::MedicalRecord;
use crate::models::user::AdministrationData;

/// Everything the records route renders: the records plus the patients
/// needed to resolve names on each row.
#[derive(Debug)]
pub struct RecordsBundle {
    pub records: Vec<MedicalRecord>,
    pub patients: Vec<Patient>,
}

/// The reports route joins analytics with the record list it reports over.
#[derive(Debug)]
pub struct ReportsBundle {
    pub analytics: AnalyticsData,
    pub records: Vec<MedicalRecord>,
    pub patients: Vec<Patient>,
}

#[derive(Debug)]
pub struct DashboardBundle {
    pub patients: Vec<Patient>,
    pub records: Vec<MedicalRecord>,
}

/// Tags a fetch with its name so a failure can say which one broke.
async fn named<T>(
    name: &'static str,
    fut: impl std::future::Future<Output = Result<T, ApiError>>,
) -> Result<T, PreloadError> {
    fut.await.map_err(|source| {
        warn!(fetch = name, error = %source, "preload fetch failed");
        PreloadError { name, source }
    })
}

pub async fn load_records(api: &impl DataAccess) -> Result<RecordsBundle, PreloadError> {
    let (records, patients) = tokio::try_join!(
        named("medical records", api.list_records()),
        named("patients", api.list_patients()),
    )?;
    Ok(RecordsBundle { records, patients })
}

pub async fn load_reports(api: &impl DataAccess) -> Result<ReportsBundle, PreloadError> {
    let (analytics, records, patients) = tokio::try_join!(
        named("analytics", api.get_analytics()),
        named("medical records", api.list_records()),
        named("patients", api.list_patients()),
    )?;
    Ok(ReportsBundle {
        analytics,
        records,
        patients,
    })
}

pub async fn load_dashboard(api: &impl DataAccess) -> Result<DashboardBundle, PreloadError> {
    let (patients, records) = tokio::try_join!(
        named("patients", api.list_patients()),
        named("medical records", api.list_records()),
    )?;
    Ok(DashboardBundle { patients, records })
}

pub async fn load_administration(
    api: &impl DataAccess,
) -> Result<AdministrationData, PreloadError> {
    named("administration", api.get_administration()).await
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::FakeApi;
    use crate::models::patient::test_patient;
    use crate::models::record::test_record;

    #[tokio::test]
    async fn records_bundle_resolves_both_collections() {
        let api = FakeApi::with_data(
            vec![test_patient("1", "Amara", "Okonkwo")],
            vec![test_record("r1", "1", "consultation", "completed")],
        );
        let bundle = load_records(&api).await.unwrap();
        assert_eq!(bundle.records.len(), 1);
        assert_eq!(bundle.patients.len(), 1);
    }

    #[tokio::test]
    async fn one_failed_fetch_fails_the_whole_bundle() {
        let api = FakeApi {
            fail_patients: true,
            ..FakeApi::with_data(
                Vec::new(),
                vec![test_record("r1", "1", "consultation", "completed")],
            )
        };
        let err = load_records(&api).await.unwrap_err();
        assert_eq!(err.name, "patients");
        assert!(matches!(err.source, ApiError::Network { .. }));
    }

    #[tokio::test]
    async fn reports_bundle_names_the_failing_fetch() {
        let api = FakeApi {
            fail_analytics: true,
            ..FakeApi::default()
        };
        let err = load_reports(&api).await.unwrap_err();
        assert_eq!(err.name, "analytics");
    }

    #[tokio::test]
    async fn dashboard_bundle_resolves_with_empty_data() {
        let api = FakeApi::default();
        let bundle = load_dashboard(&api).await.unwrap();
        assert!(bundle.patients.is_empty());
        assert!(bundle.records.is_empty());
    }

    #[tokio::test]
    async fn administration_preload_names_its_fetch_on_failure() {
        let api = FakeApi {
            fail_administration: true,
            ..FakeApi::default()
        };
        let err = load_administration(&api).await.unwrap_err();
        assert_eq!(err.name, "administration");
    }
}
