//! Dashboard landing screen: headline counts derived from the preloaded
//! collections plus the most recent records.

use crate::client::DataAccess;
use crate::error::PreloadError;
use crate::models::patient::Patient;
use crate::models::record::{MedicalRecord, RecordRow};
use crate::preload::{self, DashboardBundle};
use crate::views::{LoadGate, LoadTicket, ViewPhase};

pub struct DashboardView {
    pub phase: ViewPhase,
    pub error: Option<String>,
    gate: LoadGate,
    patients: Vec<Patient>,
    records: Vec<MedicalRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total_patients: usize,
    pub total_records: usize,
    pub critical_patients: usize,
    pub pending_records: usize,
}

impl DashboardView {
    pub fn new() -> Self {
        DashboardView {
            phase: ViewPhase::Idle,
            error: None,
            gate: LoadGate::default(),
            patients: Vec::new(),
            records: Vec::new(),
        }
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.phase = ViewPhase::Loading;
        self.gate.begin()
    }

    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<DashboardBundle, PreloadError>,
    ) {
        if !self.gate.admits(ticket) {
            return;
        }
        match result {
            Ok(bundle) => {
                self.patients = bundle.patients;
                self.records = bundle.records;
                self.error = None;
                self.phase = ViewPhase::Ready;
            }
            Err(err) => {
                self.patients.clear();
                self.records.clear();
                self.error = Some(err.to_string());
                self.phase = ViewPhase::Failed;
            }
        }
    }

    pub async fn load(&mut self, api: &impl DataAccess) {
        let ticket = self.begin_load();
        let result = preload::load_dashboard(api).await;
        self.finish_load(ticket, result);
    }

    pub fn summary(&self) -> DashboardSummary {
        DashboardSummary {
            total_patients: self.patients.len(),
            total_records: self.records.len(),
            critical_patients: self.patients.iter().filter(|p| p.critical_flag).count(),
            pending_records: self
                .records
                .iter()
                .filter(|r| r.status.eq_ignore_ascii_case("pending review"))
                .count(),
        }
    }

    /// The latest `limit` records as display rows, newest first by response
    /// order (the server already returns them sorted).
    pub fn recent_records(&self, limit: usize) -> Vec<RecordRow> {
        self.records
            .iter()
            .take(limit)
            .map(|r| RecordRow::build(r, &self.patients))
            .collect()
    }
}

impl Default for DashboardView {
    fn default() -> Self {
        Self::new()
    }
}
