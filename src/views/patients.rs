//! Patients screen.

use chrono::NaiveDate;

use crate::client::DataAccess;
use crate::error::ApiError;
use crate::export::{self, Cell, Column};
use crate::filter;
use crate::models::enums::PatientTab;
use crate::models::filters::FilterState;
use crate::models::patient::{Patient, PatientDraft};
use crate::stats::{self, StatsSummary};
use crate::views::{LoadGate, LoadTicket, ViewPhase};

const EXPORT_PREFIX: &str = "patients";

pub struct PatientsView {
    pub phase: ViewPhase,
    pub error: Option<String>,
    pub filters: FilterState<PatientTab>,
    gate: LoadGate,
    patients: Vec<Patient>,
}

impl PatientsView {
    pub fn new() -> Self {
        PatientsView {
            phase: ViewPhase::Idle,
            error: None,
            // No status checkboxes on this screen; tabs carry the narrowing.
            filters: FilterState::default(),
            gate: LoadGate::default(),
            patients: Vec::new(),
        }
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.phase = ViewPhase::Loading;
        self.gate.begin()
    }

    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Vec<Patient>, ApiError>) {
        if !self.gate.admits(ticket) {
            return;
        }
        match result {
            Ok(patients) => {
                self.patients = patients;
                self.error = None;
                self.phase = ViewPhase::Ready;
            }
            Err(err) => {
                self.patients.clear();
                self.error = Some(err.to_string());
                self.phase = ViewPhase::Failed;
            }
        }
    }

    pub async fn load(&mut self, api: &impl DataAccess) {
        let ticket = self.begin_load();
        let result = api.list_patients().await;
        self.finish_load(ticket, result);
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn visible(&self) -> Vec<Patient> {
        filter::apply(&self.patients, &self.filters)
    }

    pub fn stats(&self) -> StatsSummary {
        stats::aggregate(&self.patients)
    }

    pub fn switch_tab(&mut self, tab: PatientTab) {
        self.filters.switch_tab(tab);
    }

    pub fn export_csv(&self, today: NaiveDate) -> (String, String) {
        let columns: Vec<Column<Patient>> = vec![
            Column { label: "First Name", cell: |p| Cell::text(&p.first_name) },
            Column { label: "Last Name", cell: |p| Cell::text(&p.last_name) },
            Column { label: "Date of Birth", cell: |p| Cell::text(&p.date_of_birth) },
            Column { label: "Gender", cell: |p| Cell::text(&p.gender) },
            Column { label: "Phone", cell: |p| Cell::text(&p.phone_number) },
            Column { label: "Village", cell: |p| Cell::opt(p.village.as_deref()) },
            Column {
                label: "Conditions",
                cell: |p| Cell::Multi(p.active_conditions.clone()),
            },
            Column { label: "Status", cell: |p| Cell::text(&p.status) },
        ];
        (
            export::export_filename(EXPORT_PREFIX, today),
            export::to_csv(&self.visible(), &columns),
        )
    }

    pub async fn add_patient(
        &mut self,
        api: &impl DataAccess,
        draft: &PatientDraft,
    ) -> Result<(), ApiError> {
        let created = api.create_patient(draft).await?;
        self.patients.push(created);
        Ok(())
    }

    pub async fn update_patient(
        &mut self,
        api: &impl DataAccess,
        id: &str,
        draft: &PatientDraft,
    ) -> Result<(), ApiError> {
        let updated = api.update_patient(id, draft).await?;
        if let Some(slot) = self.patients.iter_mut().find(|p| p.id == id) {
            *slot = updated;
        }
        Ok(())
    }

    pub async fn delete_patient(
        &mut self,
        api: &impl DataAccess,
        id: &str,
    ) -> Result<(), ApiError> {
        api.delete_patient(id).await?;
        self.patients.retain(|p| p.id != id);
        Ok(())
    }
}

impl Default for PatientsView {
    fn default() -> Self {
        Self::new()
    }
}
