//! Consent management screen.

use crate::client::DataAccess;
use crate::error::ApiError;
use crate::models::consent::Consent;
use crate::stats::{self, StatsSummary};
use crate::views::{LoadGate, LoadTicket, ViewPhase};

pub struct ConsentsView {
    pub phase: ViewPhase,
    pub error: Option<String>,
    gate: LoadGate,
    consents: Vec<Consent>,
}

impl ConsentsView {
    pub fn new() -> Self {
        ConsentsView {
            phase: ViewPhase::Idle,
            error: None,
            gate: LoadGate::default(),
            consents: Vec::new(),
        }
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.phase = ViewPhase::Loading;
        self.gate.begin()
    }

    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Vec<Consent>, ApiError>) {
        if !self.gate.admits(ticket) {
            return;
        }
        match result {
            Ok(consents) => {
                self.consents = consents;
                self.error = None;
                self.phase = ViewPhase::Ready;
            }
            Err(err) => {
                self.consents.clear();
                self.error = Some(err.to_string());
                self.phase = ViewPhase::Failed;
            }
        }
    }

    pub async fn load(&mut self, api: &impl DataAccess) {
        let ticket = self.begin_load();
        let result = api.list_consents().await;
        self.finish_load(ticket, result);
    }

    pub fn consents(&self) -> &[Consent] {
        &self.consents
    }

    /// Consents grouped by category in first-seen order, preserving the
    /// per-category order of the response.
    pub fn grouped(&self) -> Vec<(String, Vec<&Consent>)> {
        let mut groups: Vec<(String, Vec<&Consent>)> = Vec::new();
        for consent in &self.consents {
            match groups.iter_mut().find(|(cat, _)| *cat == consent.category) {
                Some((_, members)) => members.push(consent),
                None => groups.push((consent.category.clone(), vec![consent])),
            }
        }
        groups
    }

    /// Granted/denied counters for the header.
    pub fn stats(&self) -> StatsSummary {
        stats::aggregate(&self.consents)
    }

    /// Flip one consent. The toggle is applied locally only after the
    /// server confirms; a failed call leaves the switch where it was.
    pub async fn set_granted(
        &mut self,
        api: &impl DataAccess,
        id: &str,
        granted: bool,
    ) -> Result<(), ApiError> {
        let updated = api.update_consent(id, granted).await?;
        if let Some(slot) = self.consents.iter_mut().find(|c| c.id == id) {
            *slot = updated;
        }
        Ok(())
    }
}

impl Default for ConsentsView {
    fn default() -> Self {
        Self::new()
    }
}
