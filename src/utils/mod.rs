pub mod build_info;

use std::env;
use std::path::PathBuf;
use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("bakery_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
    });
}

/// Application data directory. `BAKERY_CORE_HOME` overrides the default
/// `~/.bakery_core` location, which keeps tests and scripts hermetic.
pub fn app_data_dir() -> PathBuf {
    if let Some(home) = env::var_os("BAKERY_CORE_HOME") {
        return PathBuf::from(home);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".bakery_core")
}

/// Canonical path of the settings file.
pub fn settings_file() -> PathBuf {
    app_data_dir().join("settings.json")
}
