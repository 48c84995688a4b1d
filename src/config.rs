use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "AtlasCare";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default base URL of the AtlasCare API.
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8080";

/// Environment variable that overrides the API base URL.
pub const API_BASE_ENV: &str = "ATLASCARE_API_URL";

/// Resolve the API base URL, preferring the environment override.
/// A trailing slash is stripped so endpoint paths can always be joined
/// with a single `/`.
pub fn api_base_url() -> String {
    let base = std::env::var(API_BASE_ENV).unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
    base.trim_end_matches('/').to_string()
}

/// Get the application data directory
/// ~/AtlasCare/ on all platforms (user-visible, kept out of dot-directories)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("AtlasCare")
}

/// Path of the JSON file backing the UI preference store.
pub fn prefs_path() -> PathBuf {
    app_data_dir().join("ui_prefs.json")
}

/// Default tracing filter when RUST_LOG is not set.
pub fn default_log_filter() -> String {
    format!("{}=info", env!("CARGO_PKG_NAME"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("AtlasCare"));
    }

    #[test]
    fn prefs_path_under_app_data() {
        let prefs = prefs_path();
        assert!(prefs.starts_with(app_data_dir()));
        assert!(prefs.ends_with("ui_prefs.json"));
    }

    #[test]
    fn default_api_base_has_no_trailing_slash() {
        assert!(!DEFAULT_API_BASE.ends_with('/'));
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, env!("CARGO_PKG_VERSION"));
    }
}
