use chrono::Local;
use std::path::PathBuf;
use std::sync::OnceLock;

static EXE_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Returns the directory containing the executable.
pub fn get_exe_dir() -> &'static PathBuf {
    EXE_DIR.get_or_init(|| {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
    })
}

/// Returns the logs directory: `<exe_dir>/logs/`
pub fn get_logs_dir() -> PathBuf {
    get_exe_dir().join("logs")
}

/// Returns the config file path: `<exe_dir>/config.json`
pub fn get_config_path() -> PathBuf {
    get_exe_dir().join("config.json")
}

/// Returns the default directory for saved captures.
///
/// The user's Pictures folder when it exists, `<exe_dir>/captures/` otherwise.
pub fn get_captures_dir() -> PathBuf {
    dirs::picture_dir()
        .filter(|p| p.is_dir())
        .unwrap_or_else(|| get_exe_dir().join("captures"))
}

/// Suggests a timestamped JPEG path for a new capture.
pub fn default_capture_path() -> PathBuf {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    get_captures_dir().join(format!("tmap_{}.jpg", timestamp))
}

/// Ensures all output directories exist. Call at startup.
pub fn ensure_directories() -> std::io::Result<()> {
    std::fs::create_dir_all(get_logs_dir())?;
    std::fs::create_dir_all(get_captures_dir())?;
    Ok(())
}
