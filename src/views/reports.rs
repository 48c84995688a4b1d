//! Reports screen: analytics snapshot plus a locally editable report list
//! seeded from the fetched records.

use chrono::NaiveDate;

use crate::client::DataAccess;
use crate::error::{ApiError, PreloadError};
use crate::export::{self, Cell, Column};
use crate::filter;
use crate::models::analytics::AnalyticsData;
use crate::models::report::{ReportDraft, ReportEntry};
use crate::preload::{self, ReportsBundle};
use crate::views::{LoadGate, LoadTicket, ViewPhase};

const EXPORT_PREFIX: &str = "reports";

pub struct ReportsView {
    pub phase: ViewPhase,
    pub error: Option<String>,
    pub query: String,
    gate: LoadGate,
    analytics: AnalyticsData,
    reports: Vec<ReportEntry>,
}

impl ReportsView {
    pub fn new() -> Self {
        ReportsView {
            phase: ViewPhase::Idle,
            error: None,
            query: String::new(),
            gate: LoadGate::default(),
            analytics: AnalyticsData::default(),
            reports: Vec::new(),
        }
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.phase = ViewPhase::Loading;
        self.gate.begin()
    }

    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<ReportsBundle, PreloadError>) {
        if !self.gate.admits(ticket) {
            return;
        }
        match result {
            Ok(bundle) => {
                self.reports = bundle
                    .records
                    .iter()
                    .map(|r| ReportEntry::from_record(r, &bundle.patients))
                    .collect();
                self.analytics = bundle.analytics;
                self.error = None;
                self.phase = ViewPhase::Ready;
            }
            Err(err) => {
                self.reports.clear();
                self.analytics = AnalyticsData::default();
                self.error = Some(err.to_string());
                self.phase = ViewPhase::Failed;
            }
        }
    }

    pub async fn load(&mut self, api: &impl DataAccess) {
        let ticket = self.begin_load();
        let result = preload::load_reports(api).await;
        self.finish_load(ticket, result);
    }

    pub fn analytics(&self) -> &AnalyticsData {
        &self.analytics
    }

    pub fn reports(&self) -> &[ReportEntry] {
        &self.reports
    }

    /// Free-text search over patient, doctor and type; no tabs or date
    /// range on this screen.
    pub fn visible(&self) -> Vec<ReportEntry> {
        let query = self.query.trim().to_lowercase();
        if query.is_empty() {
            return self.reports.clone();
        }
        self.reports
            .iter()
            .filter(|r| filter::matches_query(*r, &query))
            .cloned()
            .collect()
    }

    /// Scale ceiling for the trend chart.
    pub fn max_trend_value(&self) -> u32 {
        self.analytics.max_trend_value()
    }

    /// Create or edit, keyed on the draft's id. Entries live only in view
    /// state; there is no report endpoint yet.
    pub fn save_report(&mut self, draft: ReportDraft, today: &str) -> Result<(), ApiError> {
        draft.validate()?;
        match &draft.id {
            Some(id) => {
                let slot = self
                    .reports
                    .iter_mut()
                    .find(|r| &r.id == id)
                    .ok_or_else(|| ApiError::validation(format!("unknown report id {id}")))?;
                slot.patient_name = draft.patient_name;
                slot.doctor = draft.doctor;
                slot.status = draft.status;
                slot.description = draft.description;
                if !draft.report_type.trim().is_empty() {
                    slot.report_type = draft.report_type;
                }
                Ok(())
            }
            None => {
                self.reports.push(draft.into_new_entry(today));
                Ok(())
            }
        }
    }

    pub fn delete_report(&mut self, id: &str) {
        self.reports.retain(|r| r.id != id);
    }

    pub fn export_csv(&self, today: NaiveDate) -> (String, String) {
        let columns: Vec<Column<ReportEntry>> = vec![
            Column { label: "Patient", cell: |r| Cell::text(&r.patient_name) },
            Column { label: "Type", cell: |r| Cell::text(&r.report_type) },
            Column { label: "Date", cell: |r| Cell::text(&r.date) },
            Column { label: "Status", cell: |r| Cell::text(r.status.as_str()) },
            Column { label: "Doctor", cell: |r| Cell::text(&r.doctor) },
            Column { label: "Description", cell: |r| Cell::opt(r.description.as_deref()) },
        ];
        (
            export::export_filename(EXPORT_PREFIX, today),
            export::to_csv(&self.visible(), &columns),
        )
    }
}

impl Default for ReportsView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::FakeApi;
    use crate::models::analytics::TrendPoint;
    use crate::models::enums::ReportStatus;
    use crate::models::patient::test_patient;
    use crate::models::record::test_record;

    fn seeded_api() -> FakeApi {
        let mut api = FakeApi::with_data(
            vec![test_patient("1", "Amara", "Okonkwo")],
            vec![
                test_record("r1", "1", "consultation", "completed"),
                test_record("r2", "1", "lab_result", "pending review"),
            ],
        );
        api.analytics.disease_trend = vec![
            TrendPoint { month: "Jan".to_string(), value: 12 },
            TrendPoint { month: "Feb".to_string(), value: 30 },
        ];
        api
    }

    #[tokio::test]
    async fn load_seeds_reports_from_records() {
        let api = seeded_api();
        let mut view = ReportsView::new();
        view.load(&api).await;

        assert_eq!(view.phase, ViewPhase::Ready);
        assert_eq!(view.reports().len(), 2);
        assert_eq!(view.reports()[0].status, ReportStatus::Completed);
        assert_eq!(view.reports()[1].status, ReportStatus::Draft);
        assert_eq!(view.max_trend_value(), 30);
    }

    #[tokio::test]
    async fn analytics_failure_fails_the_route() {
        let api = FakeApi {
            fail_analytics: true,
            ..seeded_api()
        };
        let mut view = ReportsView::new();
        view.load(&api).await;

        assert_eq!(view.phase, ViewPhase::Failed);
        assert!(view.reports().is_empty());
        assert!(view.error.as_deref().unwrap().contains("analytics"));
    }

    #[tokio::test]
    async fn save_without_id_creates_a_new_entry() {
        let api = seeded_api();
        let mut view = ReportsView::new();
        view.load(&api).await;

        let draft = ReportDraft {
            patient_name: "Amara Okonkwo".to_string(),
            doctor: "Dr. Sarah Johnson".to_string(),
            ..ReportDraft::default()
        };
        view.save_report(draft, "2024-02-01").unwrap();
        assert_eq!(view.reports().len(), 3);
        let last = view.reports().last().unwrap();
        assert_eq!(last.report_type, "General");
        assert_eq!(last.date, "2024-02-01");
    }

    #[tokio::test]
    async fn save_with_id_edits_in_place() {
        let api = seeded_api();
        let mut view = ReportsView::new();
        view.load(&api).await;

        let draft = ReportDraft {
            id: Some("r2".to_string()),
            patient_name: "Amara Okonkwo".to_string(),
            doctor: "Dr. New Doctor".to_string(),
            status: ReportStatus::Submitted,
            ..ReportDraft::default()
        };
        view.save_report(draft, "2024-02-01").unwrap();
        assert_eq!(view.reports().len(), 2);
        let edited = &view.reports()[1];
        assert_eq!(edited.doctor, "Dr. New Doctor");
        assert_eq!(edited.status, ReportStatus::Submitted);
        // Blank type in the draft keeps the existing one.
        assert_eq!(edited.report_type, "Lab Result");
    }

    #[tokio::test]
    async fn delete_is_local_only() {
        let api = seeded_api();
        let mut view = ReportsView::new();
        view.load(&api).await;

        view.delete_report("r1");
        assert_eq!(view.reports().len(), 1);
        // The underlying record is untouched.
        assert_eq!(api.records.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn query_narrows_by_doctor_and_type() {
        let api = seeded_api();
        let mut view = ReportsView::new();
        view.load(&api).await;

        view.query = "lab".to_string();
        assert_eq!(view.visible().len(), 1);
        assert_eq!(view.visible()[0].id, "r2");

        view.query = "sarah".to_string();
        assert_eq!(view.visible().len(), 2);
    }

    #[tokio::test]
    async fn export_uses_reports_prefix() {
        let api = seeded_api();
        let mut view = ReportsView::new();
        view.load(&api).await;

        let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let (filename, csv) = view.export_csv(today);
        assert_eq!(filename, "reports-2024-03-05.csv");
        assert_eq!(csv.lines().count(), 3);
    }
}
