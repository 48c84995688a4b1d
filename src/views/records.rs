//! Medical-records screen.

use chrono::NaiveDate;

use crate::client::DataAccess;
use crate::error::{ApiError, PreloadError};
use crate::export::{self, Cell, Column};
use crate::filter;
use crate::models::enums::RecordTab;
use crate::models::filters::FilterState;
use crate::models::patient::Patient;
use crate::models::record::{MedicalRecord, RecordDraft, RecordRow};
use crate::preload::{self, RecordsBundle};
use crate::stats::{self, StatsSummary};
use crate::views::{LoadGate, LoadTicket, ViewPhase};

/// Status checkboxes offered by the filter panel, all checked on entry.
const STATUS_KEYS: &[&str] = &["completed", "pending review", "active", "pending"];

const EXPORT_PREFIX: &str = "medical-records";

pub struct RecordsView {
    pub phase: ViewPhase,
    pub error: Option<String>,
    pub filters: FilterState<RecordTab>,
    pub filter_panel_open: bool,
    gate: LoadGate,
    records: Vec<MedicalRecord>,
    patients: Vec<Patient>,
    rows: Vec<RecordRow>,
}

impl RecordsView {
    pub fn new() -> Self {
        RecordsView {
            phase: ViewPhase::Idle,
            error: None,
            filters: FilterState::with_status_keys(STATUS_KEYS),
            filter_panel_open: false,
            gate: LoadGate::default(),
            records: Vec::new(),
            patients: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Starts a load attempt. The returned ticket must be handed back to
    /// `finish_load`; any earlier ticket becomes stale immediately.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.phase = ViewPhase::Loading;
        self.gate.begin()
    }

    /// Applies a load outcome. Outcomes from superseded attempts are
    /// dropped on the floor.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<RecordsBundle, PreloadError>) {
        if !self.gate.admits(ticket) {
            return;
        }
        match result {
            Ok(bundle) => {
                self.records = bundle.records;
                self.patients = bundle.patients;
                self.rebuild_rows();
                self.error = None;
                self.phase = ViewPhase::Ready;
            }
            Err(err) => {
                self.records.clear();
                self.patients.clear();
                self.rows.clear();
                self.error = Some(err.to_string());
                self.phase = ViewPhase::Failed;
            }
        }
    }

    pub async fn load(&mut self, api: &impl DataAccess) {
        let ticket = self.begin_load();
        let result = preload::load_records(api).await;
        self.finish_load(ticket, result);
    }

    fn rebuild_rows(&mut self) {
        self.rows = RecordRow::build_all(&self.records, &self.patients);
    }

    pub fn rows(&self) -> &[RecordRow] {
        &self.rows
    }

    /// The rows matching the current filter state, in load order.
    pub fn visible(&self) -> Vec<RecordRow> {
        filter::apply(&self.rows, &self.filters)
    }

    /// Header counters are computed over the full collection, not the
    /// filtered subset.
    pub fn stats(&self) -> StatsSummary {
        stats::aggregate(&self.rows)
    }

    pub fn switch_tab(&mut self, tab: RecordTab) {
        self.filters.switch_tab(tab);
        self.filter_panel_open = false;
    }

    pub fn toggle_filter_panel(&mut self) {
        self.filter_panel_open = !self.filter_panel_open;
    }

    /// CSV of the currently visible rows. Returns `(filename, contents)`.
    pub fn export_csv(&self, today: NaiveDate) -> (String, String) {
        let columns: Vec<Column<RecordRow>> = vec![
            Column { label: "Title", cell: |r| Cell::text(&r.title) },
            Column { label: "Type", cell: |r| Cell::text(&r.type_badge) },
            Column { label: "Patient", cell: |r| Cell::text(&r.patient_name) },
            Column { label: "Provider", cell: |r| Cell::text(&r.provider) },
            Column { label: "Date", cell: |r| Cell::text(&r.date) },
            Column {
                label: "Status",
                cell: |r| {
                    let mut values = vec![r.status.clone()];
                    if let Some(secondary) = &r.secondary_status {
                        values.push(secondary.clone());
                    }
                    Cell::Multi(values)
                },
            },
            Column { label: "Description", cell: |r| Cell::opt(r.description.as_deref()) },
        ];
        (
            export::export_filename(EXPORT_PREFIX, today),
            export::to_csv(&self.visible(), &columns),
        )
    }

    /// Creates on the server first; local state only changes on success.
    pub async fn create_record(
        &mut self,
        api: &impl DataAccess,
        draft: &RecordDraft,
    ) -> Result<(), ApiError> {
        let created = api.create_record(draft).await?;
        self.records.push(created);
        self.rebuild_rows();
        Ok(())
    }

    pub async fn update_record(
        &mut self,
        api: &impl DataAccess,
        id: &str,
        draft: &RecordDraft,
    ) -> Result<(), ApiError> {
        let updated = api.update_record(id, draft).await?;
        if let Some(slot) = self.records.iter_mut().find(|r| r.id == id) {
            *slot = updated;
        }
        self.rebuild_rows();
        Ok(())
    }

    pub async fn delete_record(
        &mut self,
        api: &impl DataAccess,
        id: &str,
    ) -> Result<(), ApiError> {
        api.delete_record(id).await?;
        self.records.retain(|r| r.id != id);
        self.rebuild_rows();
        Ok(())
    }
}

impl Default for RecordsView {
    fn default() -> Self {
        Self::new()
    }
}
