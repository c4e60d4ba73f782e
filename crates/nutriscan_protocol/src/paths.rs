use std::path::PathBuf;
use std::sync::Once;

static CREATE_DIR_WARNED: Once = Once::new();

/// Resolve the NutriScan home directory.
///
/// Priority:
/// 1) NUTRISCAN_HOME
/// 2) HOME/USERPROFILE
/// 3) ./.nutriscan
pub fn nutriscan_home() -> PathBuf {
    if let Ok(override_path) = std::env::var("NUTRISCAN_HOME") {
        return PathBuf::from(override_path);
    }
    if let Ok(home) = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE")) {
        return PathBuf::from(home).join(".nutriscan");
    }
    PathBuf::from(".").join(".nutriscan")
}

fn ensure_home_dir(home: &PathBuf) {
    if let Err(err) = std::fs::create_dir_all(home) {
        CREATE_DIR_WARNED.call_once(|| {
            eprintln!(
                "Warning: failed to create NutriScan home directory {}: {}. Set NUTRISCAN_HOME to a writable path.",
                home.display(),
                err
            );
        });
    }
}

/// Default guest scan store path: ~/.nutriscan/guest_scans.json
pub fn default_guest_scans_path() -> PathBuf {
    let home = nutriscan_home();
    ensure_home_dir(&home);
    home.join("guest_scans.json")
}

/// Default session file path: ~/.nutriscan/session.json
pub fn default_session_path() -> PathBuf {
    let home = nutriscan_home();
    ensure_home_dir(&home);
    home.join("session.json")
}

/// Default logs directory: ~/.nutriscan/logs
pub fn default_logs_dir() -> PathBuf {
    let home = nutriscan_home();
    ensure_home_dir(&home);
    home.join("logs")
}
