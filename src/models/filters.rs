use std::collections::BTreeMap;

/// Combined predicate state for a list view: free-text query, active tab,
/// status-inclusion set, and an optional inclusive date range.
///
/// Views create this with all-inclusive defaults on entry and mutate it from
/// user interaction; the filter engine only ever reads it.
#[derive(Debug, Clone, Default)]
pub struct FilterState<Tab> {
    pub query: String,
    pub tab: Tab,
    /// Status key (lowercase) -> included. An empty map, or one with every
    /// entry checked, means the status dimension is not filtering at all --
    /// a user who has not touched the checkboxes must never see an empty list.
    pub statuses: BTreeMap<String, bool>,
    /// Inclusive range bounds as `YYYY-MM-DD` strings.
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

impl<Tab> FilterState<Tab> {
    /// All-inclusive state with the given status checkboxes, all checked.
    pub fn with_status_keys(keys: &[&str]) -> Self
    where
        Tab: Default,
    {
        let mut state = FilterState::default();
        state.statuses = keys
            .iter()
            .map(|k| (k.to_lowercase(), true))
            .collect();
        state
    }

    /// True when the status set actually narrows the result.
    pub fn status_filter_active(&self) -> bool {
        !self.statuses.is_empty() && self.statuses.values().any(|included| !included)
    }

    /// Flip one status checkbox. Unknown keys are ignored, matching the
    /// original UI which only toggles pre-declared checkboxes.
    pub fn toggle_status(&mut self, status: &str) {
        if let Some(included) = self.statuses.get_mut(&status.to_lowercase()) {
            *included = !*included;
        }
    }

    /// Reset query, date range, and every status checkbox back to checked.
    /// The active tab is left alone.
    pub fn clear(&mut self) {
        self.query.clear();
        self.date_from = None;
        self.date_to = None;
        for included in self.statuses.values_mut() {
            *included = true;
        }
    }

    /// Switch tabs, dropping query and date range like the original view.
    pub fn switch_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.query.clear();
        self.date_from = None;
        self.date_to = None;
    }
}
