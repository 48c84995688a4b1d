//! UI preference state with an explicit load/save interface.
//!
//! The legacy app kept the sidebar collapse flag in module-global state and
//! the session token in localStorage; both move behind `PrefStore` so a
//! host can inject memory-backed storage in tests and file-backed storage
//! in the app.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Injected key/value preference storage.
pub trait PrefStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryPrefStore {
    values: BTreeMap<String, String>,
}

impl PrefStore for MemoryPrefStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

/// JSON-file-backed store, persisted on every write. A missing or corrupt
/// file starts empty; persistence failures are logged, never fatal --
/// losing a sidebar flag must not take the app down.
#[derive(Debug)]
pub struct FilePrefStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FilePrefStore {
    pub fn open(path: impl Into<PathBuf>) -> FilePrefStore {
        let path = path.into();
        let values = Self::read_values(&path);
        FilePrefStore { path, values }
    }

    fn read_values(path: &Path) -> BTreeMap<String, String> {
        match std::fs::read_to_string(path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "ignoring corrupt prefs file");
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        }
    }

    fn persist(&self) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!(error = %e, "could not create prefs directory");
                return;
            }
        }
        match serde_json::to_string_pretty(&self.values) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&self.path, json) {
                    tracing::warn!(path = %self.path.display(), error = %e, "could not persist prefs");
                }
            }
            Err(e) => tracing::warn!(error = %e, "could not serialize prefs"),
        }
    }
}

impl PrefStore for FilePrefStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        self.persist();
    }

    fn remove(&mut self, key: &str) {
        if self.values.remove(key).is_some() {
            self.persist();
        }
    }
}

const SIDEBAR_COLLAPSED_KEY: &str = "sidebar_collapsed";

/// Typed view over the stored UI preferences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiPrefs {
    pub sidebar_collapsed: bool,
}

impl UiPrefs {
    pub fn load(store: &impl PrefStore) -> UiPrefs {
        UiPrefs {
            sidebar_collapsed: store
                .get(SIDEBAR_COLLAPSED_KEY)
                .is_some_and(|v| v == "true"),
        }
    }

    pub fn save(&self, store: &mut impl PrefStore) {
        store.set(
            SIDEBAR_COLLAPSED_KEY,
            if self.sidebar_collapsed { "true" } else { "false" },
        );
    }

    pub fn toggle_sidebar(&mut self, store: &mut impl PrefStore) {
        self.sidebar_collapsed = !self.sidebar_collapsed;
        self.save(store);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips() {
        let mut store = MemoryPrefStore::default();
        assert_eq!(store.get("token"), None);
        store.set("token", "abc");
        assert_eq!(store.get("token"), Some("abc".to_string()));
        store.remove("token");
        assert_eq!(store.get("token"), None);
    }

    #[test]
    fn ui_prefs_default_to_expanded_sidebar() {
        let store = MemoryPrefStore::default();
        assert!(!UiPrefs::load(&store).sidebar_collapsed);
    }

    #[test]
    fn toggle_persists_through_store() {
        let mut store = MemoryPrefStore::default();
        let mut prefs = UiPrefs::load(&store);
        prefs.toggle_sidebar(&mut store);
        assert!(UiPrefs::load(&store).sidebar_collapsed);
        prefs.toggle_sidebar(&mut store);
        assert!(!UiPrefs::load(&store).sidebar_collapsed);
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ui_prefs.json");
        {
            let mut store = FilePrefStore::open(&path);
            store.set("sidebar_collapsed", "true");
        }
        let store = FilePrefStore::open(&path);
        assert!(UiPrefs::load(&store).sidebar_collapsed);
    }

    #[test]
    fn file_store_tolerates_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ui_prefs.json");
        std::fs::write(&path, "not json {").unwrap();
        let store = FilePrefStore::open(&path);
        assert_eq!(store.get("sidebar_collapsed"), None);
    }

    #[test]
    fn file_store_starts_empty_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePrefStore::open(dir.path().join("missing.json"));
        assert_eq!(store.get("anything"), None);
    }
}
