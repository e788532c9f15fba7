//! TankMatch map capture
//!
//! Drag-select a screen region, trim the black border around the map and
//! save it as a JPEG.

// Hide console window on Windows
#![windows_subsystem = "windows"]

use anyhow::{anyhow, Result};

use tankmatch_tools::{capture, config, gui, install_panic_hook, log, paths};

fn main() -> Result<()> {
    tankmatch_tools::init_log("tm_map_capture");
    install_panic_hook();

    // GDI coordinates must match physical pixels
    capture::enable_dpi_awareness();

    paths::ensure_directories()?;
    config::init_config();

    log("Starting map capture...");
    match gui::run_capture_gui() {
        Ok(()) => {
            log("Map capture exited normally");
            Ok(())
        }
        Err(e) => {
            log(&format!("GUI error: {}", e));
            Err(anyhow!("GUI error: {}", e))
        }
    }
}
