pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod models;
pub mod prefs;
pub mod preload;
pub mod stats;
pub mod views;

use tracing_subscriber::EnvFilter;

/// Initialize tracing. `RUST_LOG` wins; otherwise the crate logs at info.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
}
