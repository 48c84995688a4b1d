//! Record filter engine shared by the list views.
//!
//! Composes the free-text, tab, status-set, and date-range predicates with
//! AND over an immutable snapshot. Filtering never mutates the source
//! collection and preserves its order; predicates are pure, so evaluation
//! order does not change the result.

use chrono::{NaiveDate, NaiveDateTime};

use crate::models::filters::FilterState;

/// Implemented by every record kind the filter engine operates on.
///
/// `search_fields` returns the configured searchable fields for the kind
/// (they differ per view: records search patient + provider + badge + title,
/// patients search name + village + conditions).
pub trait Filterable {
    fn search_fields(&self) -> Vec<&str>;

    /// Status value, if the record carries one. Compared case-normalized.
    fn status(&self) -> Option<&str> {
        None
    }

    /// Raw date string for the date-range predicate.
    fn date_value(&self) -> Option<&str> {
        None
    }

    /// Category/type code, used by the stats aggregator.
    fn category(&self) -> Option<&str> {
        None
    }
}

/// Maps a view tab onto the records it admits. The "all" wildcard is
/// handled by the engine via `is_all`, so `admits` only sees concrete tabs.
pub trait TabPredicate<T> {
    fn is_all(&self) -> bool;
    fn admits(&self, item: &T) -> bool;
}

/// Applies `state` to `items`, returning the matching subset in the
/// original order.
pub fn apply<T, Tab>(items: &[T], state: &FilterState<Tab>) -> Vec<T>
where
    T: Filterable + Clone,
    Tab: TabPredicate<T>,
{
    let query = state.query.trim().to_lowercase();
    let status_active = state.status_filter_active();
    let from = state
        .date_from
        .as_deref()
        .and_then(|raw| parse_day(raw).map(day_start));
    let to = state
        .date_to
        .as_deref()
        .and_then(|raw| parse_day(raw).map(day_end));

    items
        .iter()
        .filter(|item| {
            if !query.is_empty() && !matches_query(*item, &query) {
                return false;
            }
            if !state.tab.is_all() && !state.tab.admits(item) {
                return false;
            }
            if status_active {
                let included = item
                    .status()
                    .map(|s| state.statuses.get(&s.to_lowercase()).copied().unwrap_or(false))
                    .unwrap_or(false);
                if !included {
                    return false;
                }
            }
            if from.is_some() || to.is_some() {
                // Unparseable record dates fail closed: excluded whenever
                // a bounded range is active.
                let Some(date) = item.date_value().and_then(parse_record_date) else {
                    return false;
                };
                if let Some(from) = from {
                    if date < from {
                        return false;
                    }
                }
                if let Some(to) = to {
                    if date > to {
                        return false;
                    }
                }
            }
            true
        })
        .cloned()
        .collect()
}

/// Case-insensitive substring match over the item's searchable fields.
/// `query` must already be lowercased.
pub fn matches_query<T: Filterable + ?Sized>(item: &T, query: &str) -> bool {
    item.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(query))
}

/// Parses a record's date field. Record dates arrive as strings from the
/// API and the legacy UI ("2024-01-15 at 10:30 AM"); anything unparseable
/// yields None.
pub fn parse_record_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d at %I:%M %p",
    ] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed);
        }
    }
    parse_day(raw).and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn parse_day(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Range start is inclusive from the start of the day.
fn day_start(day: NaiveDate) -> NaiveDateTime {
    day.and_hms_opt(0, 0, 0).unwrap_or_default()
}

/// Range end is inclusive through 23:59:59.999.
fn day_end(day: NaiveDate) -> NaiveDateTime {
    day.and_hms_milli_opt(23, 59, 59, 999).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        name: String,
        provider: String,
        kind: &'static str,
        status: Option<&'static str>,
        date: Option<String>,
    }

    impl Item {
        fn new(name: &str, status: Option<&'static str>, date: Option<&str>) -> Self {
            Item {
                name: name.to_string(),
                provider: "Dr. Sarah Johnson".to_string(),
                kind: "consultation",
                status,
                date: date.map(str::to_string),
            }
        }
    }

    impl Filterable for Item {
        fn search_fields(&self) -> Vec<&str> {
            vec![&self.name, &self.provider]
        }

        fn status(&self) -> Option<&str> {
            self.status
        }

        fn date_value(&self) -> Option<&str> {
            self.date.as_deref()
        }

        fn category(&self) -> Option<&str> {
            Some(self.kind)
        }
    }

    #[derive(Debug, Clone, Copy, Default)]
    enum Tab {
        #[default]
        All,
        Consultations,
    }

    impl TabPredicate<Item> for Tab {
        fn is_all(&self) -> bool {
            matches!(self, Tab::All)
        }

        fn admits(&self, item: &Item) -> bool {
            matches!(self, Tab::Consultations) && item.kind == "consultation"
        }
    }

    fn sample() -> Vec<Item> {
        vec![
            Item::new("Amara Okonkwo", Some("completed"), Some("2024-01-15")),
            Item::new("Kwame Mensah", Some("pending"), Some("2024-01-14")),
            Item::new("Fatima Hassan", Some("completed"), Some("2024-01-13")),
        ]
    }

    #[test]
    fn default_state_returns_collection_unchanged() {
        let items = sample();
        let out = apply(&items, &FilterState::<Tab>::default());
        assert_eq!(out, items);
    }

    #[test]
    fn filter_is_order_preserving_subset() {
        let items = sample();
        let mut state = FilterState::<Tab>::default();
        state.query = "a".into();
        let out = apply(&items, &state);
        assert!(out.len() <= items.len());
        let positions: Vec<usize> = out
            .iter()
            .map(|o| items.iter().position(|i| i == o).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn filter_is_idempotent() {
        let items = sample();
        let mut state = FilterState::<Tab>::default();
        state.query = "amara".into();
        state.date_from = Some("2024-01-01".into());
        let once = apply(&items, &state);
        let twice = apply(&once, &state);
        assert_eq!(once, twice);
    }

    #[test]
    fn search_matches_any_configured_field() {
        let items = sample();
        let mut state = FilterState::<Tab>::default();
        state.query = "amara".into();
        let out = apply(&items, &state);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Amara Okonkwo");

        // Provider matches every item.
        state.query = "JOHNSON".into();
        assert_eq!(apply(&items, &state).len(), 3);
    }

    #[test]
    fn whitespace_only_query_matches_everything() {
        let items = sample();
        let mut state = FilterState::<Tab>::default();
        state.query = "   ".into();
        assert_eq!(apply(&items, &state).len(), 3);
    }

    #[test]
    fn status_filter_excludes_unchecked_statuses() {
        let items = sample();
        let mut state = FilterState::<Tab>::default();
        state.statuses = BTreeMap::from([
            ("completed".to_string(), true),
            ("pending".to_string(), false),
        ]);
        let out = apply(&items, &state);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|i| i.status == Some("completed")));
    }

    #[test]
    fn all_checked_statuses_behave_like_empty_set() {
        let items = sample();
        let mut all_checked = FilterState::<Tab>::default();
        all_checked.statuses = BTreeMap::from([
            ("completed".to_string(), true),
            ("pending".to_string(), true),
        ]);
        let empty = FilterState::<Tab>::default();
        assert_eq!(apply(&items, &all_checked), apply(&items, &empty));
    }

    #[test]
    fn status_not_in_set_is_excluded_when_filtering() {
        let mut items = sample();
        items.push(Item::new("New Status", Some("archived"), None));
        let mut state = FilterState::<Tab>::default();
        state.statuses = BTreeMap::from([
            ("completed".to_string(), true),
            ("pending".to_string(), false),
        ]);
        let out = apply(&items, &state);
        assert!(out.iter().all(|i| i.status == Some("completed")));
    }

    #[test]
    fn missing_status_is_excluded_while_status_filter_active() {
        let items = vec![Item::new("No Status", None, None)];
        let mut state = FilterState::<Tab>::default();
        state.statuses = BTreeMap::from([
            ("completed".to_string(), true),
            ("pending".to_string(), false),
        ]);
        assert!(apply(&items, &state).is_empty());
    }

    #[test]
    fn date_range_is_inclusive_on_both_ends() {
        let items = sample();
        let mut state = FilterState::<Tab>::default();
        state.date_from = Some("2024-01-13".into());
        state.date_to = Some("2024-01-15".into());
        assert_eq!(apply(&items, &state).len(), 3);

        state.date_from = Some("2024-01-14".into());
        state.date_to = Some("2024-01-14".into());
        let out = apply(&items, &state);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Kwame Mensah");
    }

    #[test]
    fn time_of_day_stays_within_end_bound() {
        let items = vec![Item::new("Late Entry", None, Some("2024-01-14 23:59:59"))];
        let mut state = FilterState::<Tab>::default();
        state.date_to = Some("2024-01-14".into());
        assert_eq!(apply(&items, &state).len(), 1);
    }

    #[test]
    fn unparseable_record_date_fails_closed_under_active_range() {
        for bad in ["", "not-a-date", "15/01/2024", "January 15"] {
            let items = vec![Item::new("Bad Date", None, Some(bad))];
            let mut state = FilterState::<Tab>::default();
            state.date_from = Some("2024-01-01".into());
            assert!(
                apply(&items, &state).is_empty(),
                "date {bad:?} should be excluded"
            );
        }
    }

    #[test]
    fn missing_record_date_fails_closed_under_active_range() {
        let items = vec![Item::new("No Date", None, None)];
        let mut state = FilterState::<Tab>::default();
        state.date_to = Some("2024-12-31".into());
        assert!(apply(&items, &state).is_empty());
    }

    #[test]
    fn unparseable_range_bound_is_ignored() {
        let items = sample();
        let mut state = FilterState::<Tab>::default();
        state.date_from = Some("not-a-date".into());
        assert_eq!(apply(&items, &state).len(), 3);
    }

    #[test]
    fn tab_predicate_applies_only_when_not_all() {
        let mut items = sample();
        items.push(Item {
            name: "Chest X-Ray".to_string(),
            provider: "Dr. Sarah Johnson".to_string(),
            kind: "imaging",
            status: Some("completed"),
            date: None,
        });
        let mut state = FilterState::<Tab>::default();
        state.tab = Tab::Consultations;
        let out = apply(&items, &state);
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|i| i.kind == "consultation"));
    }

    #[test]
    fn legacy_ui_date_format_parses() {
        let parsed = parse_record_date("2024-01-15 at 10:30 AM").unwrap();
        assert_eq!(parsed.format("%Y-%m-%d %H:%M").to_string(), "2024-01-15 10:30");
    }
}
