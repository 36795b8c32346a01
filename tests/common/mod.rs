use std::path::PathBuf;
use std::sync::Mutex;

use once_cell::sync::Lazy;
use tempfile::TempDir;

// Dropping a TempDir removes it, so guards are parked here until the test
// process ends.
static LIVE_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Path for a settings file inside a fresh temporary directory.
pub fn settings_path() -> PathBuf {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("settings.json");
    LIVE_DIRS.lock().expect("lock temp dir guards").push(dir);
    path
}
