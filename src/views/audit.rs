//! Audit-trail screen. Entries are pushed in by the host application;
//! there is no list endpoint for them yet, so this view has no load
//! lifecycle, only filter and export state.

use chrono::NaiveDate;

use crate::export::{self, Cell, Column};
use crate::filter;
use crate::models::audit::AuditEntry;
use crate::models::enums::AuditTab;
use crate::models::filters::FilterState;
use crate::stats::{self, StatsSummary};

const EXPORT_PREFIX: &str = "audit-logs";

/// Severity checkboxes offered by the filter panel.
const LEVEL_KEYS: &[&str] = &["info", "warning", "error"];

pub struct AuditView {
    pub filters: FilterState<AuditTab>,
    entries: Vec<AuditEntry>,
}

impl AuditView {
    pub fn new() -> Self {
        AuditView {
            filters: FilterState::with_status_keys(LEVEL_KEYS),
            entries: Vec::new(),
        }
    }

    pub fn set_entries(&mut self, entries: Vec<AuditEntry>) {
        self.entries = entries;
    }

    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    pub fn visible(&self) -> Vec<AuditEntry> {
        filter::apply(&self.entries, &self.filters)
    }

    pub fn switch_tab(&mut self, tab: AuditTab) {
        self.filters.switch_tab(tab);
    }

    /// Severity counts over the full trail.
    pub fn stats(&self) -> StatsSummary {
        stats::aggregate(&self.entries)
    }

    pub fn export_csv(&self, today: NaiveDate) -> (String, String) {
        let columns: Vec<Column<AuditEntry>> = vec![
            Column { label: "Time", cell: |e| Cell::text(&e.time) },
            Column { label: "Event", cell: |e| Cell::text(&e.title) },
            Column { label: "User", cell: |e| Cell::text(&e.user) },
            Column { label: "Role", cell: |e| Cell::opt(e.role.as_deref()) },
            Column { label: "Description", cell: |e| Cell::text(&e.description) },
            Column { label: "IP", cell: |e| Cell::opt(e.ip.as_deref()) },
            Column { label: "Level", cell: |e| Cell::text(&e.level) },
        ];
        (
            export::export_filename(EXPORT_PREFIX, today),
            export::to_csv(&self.visible(), &columns),
        )
    }
}

impl Default for AuditView {
    fn default() -> Self {
        Self::new()
    }
}
