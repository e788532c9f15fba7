//! TankMatch result reader
//!
//! Reads the latest (or a chosen) game's result and speaks the top players
//! through BouyomiChan.

// Hide console window on Windows
#![windows_subsystem = "windows"]

use anyhow::{anyhow, Result};

use tankmatch_tools::{config, gui, install_panic_hook, log, paths};

fn main() -> Result<()> {
    tankmatch_tools::init_log("tm_result_reader");
    install_panic_hook();

    paths::ensure_directories()?;
    config::init_config();

    log("Starting result reader...");
    match gui::run_reader_gui() {
        Ok(()) => {
            log("Result reader exited normally");
            Ok(())
        }
        Err(e) => {
            log(&format!("GUI error: {}", e));
            Err(anyhow!("GUI error: {}", e))
        }
    }
}
