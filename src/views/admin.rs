//! Administration screen: user directory, role matrix, and the
//! server-computed counters.

use crate::client::DataAccess;
use crate::error::{ApiError, PreloadError};
use crate::filter;
use crate::models::user::{AdminStats, AdministrationData, Role, User};
use crate::preload;
use crate::views::{LoadGate, LoadTicket, ViewPhase};

pub struct AdminView {
    pub phase: ViewPhase,
    pub error: Option<String>,
    pub query: String,
    gate: LoadGate,
    data: AdministrationData,
}

impl AdminView {
    pub fn new() -> Self {
        AdminView {
            phase: ViewPhase::Idle,
            error: None,
            query: String::new(),
            gate: LoadGate::default(),
            data: AdministrationData::default(),
        }
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.phase = ViewPhase::Loading;
        self.gate.begin()
    }

    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<AdministrationData, PreloadError>,
    ) {
        if !self.gate.admits(ticket) {
            return;
        }
        match result {
            Ok(data) => {
                self.data = data;
                self.error = None;
                self.phase = ViewPhase::Ready;
            }
            Err(err) => {
                self.data = AdministrationData::default();
                self.error = Some(err.to_string());
                self.phase = ViewPhase::Failed;
            }
        }
    }

    pub async fn load(&mut self, api: &impl DataAccess) {
        let ticket = self.begin_load();
        let result = preload::load_administration(api).await;
        self.finish_load(ticket, result);
    }

    pub fn stats(&self) -> &AdminStats {
        &self.data.stats
    }

    pub fn roles(&self) -> &[Role] {
        &self.data.roles
    }

    pub fn users(&self) -> &[User] {
        &self.data.users
    }

    /// Users matching the search box, over name, email, username and role.
    pub fn visible_users(&self) -> Vec<&User> {
        let query = self.query.trim().to_lowercase();
        if query.is_empty() {
            return self.data.users.iter().collect();
        }
        self.data
            .users
            .iter()
            .filter(|u| filter::matches_query(*u, &query))
            .collect()
    }

    /// Active/inactive split derived from the user list itself, as a check
    /// against the server counters.
    pub fn derived_active_count(&self) -> usize {
        self.data.users.iter().filter(|u| u.is_active).count()
    }

    pub fn user_by_id(&self, id: &str) -> Result<&User, ApiError> {
        self.data
            .users
            .iter()
            .find(|u| u.id == id)
            .ok_or_else(|| ApiError::not_found("user", id))
    }
}

impl Default for AdminView {
    fn default() -> Self {
        Self::new()
    }
}
