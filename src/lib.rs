//! TankMatch tools
//!
//! Two small Windows utilities for TankMatch players:
//! - `tm-result-reader` fetches a game's result feed, ranks the players and
//!   reads the summary aloud through a local text-to-speech listener.
//! - `tm-map-capture` grabs a dragged screen region, trims its black border
//!   and saves it as a JPEG.

pub mod capture;
pub mod config;
pub mod gui;
pub mod paths;
pub mod reader;
pub mod result;
pub mod speech;

#[cfg(test)]
mod test_support;

use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::OnceLock;

static LOG_FILE_NAME: OnceLock<String> = OnceLock::new();

/// Sets the log file name for this process. Only the first call has effect.
pub fn init_log(app_name: &str) {
    let _ = LOG_FILE_NAME.set(format!("{}.log", app_name));
}

/// Logs a message to both console and log file with timestamp.
pub fn log(msg: &str) {
    let timestamp = Local::now().format("%H:%M:%S%.3f");
    let line = format!("[{}] {}\n", timestamp, msg);
    print!("{}", line);
    let file_name = LOG_FILE_NAME
        .get()
        .map(String::as_str)
        .unwrap_or("tankmatch_tools.log");
    let log_path = paths::get_logs_dir().join(file_name);
    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        let _ = file.write_all(line.as_bytes());
    }
}

/// Installs a panic hook that writes the panic message to the log.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|panic_info| {
        let msg = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        let location = if let Some(loc) = panic_info.location() {
            format!(" at {}:{}:{}", loc.file(), loc.line(), loc.column())
        } else {
            String::new()
        };
        eprintln!("[PANIC]{} {}", location, msg);
        log(&format!("[PANIC]{} {}", location, msg));
    }));
}
