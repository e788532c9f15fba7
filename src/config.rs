//! Application configuration.
//!
//! Loads settings from config.json at startup. Provides the result feed host,
//! text-to-speech listener settings and capture parameters.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use crate::capture::{jpeg, trim};

/// Global configuration instance, initialized once at startup.
static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Settings for the text-to-speech listener (BouyomiChan protocol).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpeechConfig {
    /// TCP port of the listener on localhost
    pub port: u16,
    /// Skip a message identical to the previously spoken one
    pub same_message_read_once: bool,
    /// Reading speed (-1 = listener's own setting)
    pub speed: i16,
    /// Pitch (-1 = listener's own setting)
    pub tone: i16,
    /// Volume (-1 = listener's own setting)
    pub volume: i16,
    /// Voice ID (0 = listener's own setting, 1 = female 1, ...)
    pub voice: i16,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            port: 50001,
            same_message_read_once: false,
            speed: -1,
            tone: -1,
            volume: -1,
            voice: 1,
        }
    }
}

/// Settings for the map capture tool.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CaptureConfig {
    /// Per-channel difference below which a pixel counts as border black
    pub trim_threshold: u8,
    /// JPEG quality (1-100)
    pub jpeg_quality: u8,
    /// Selections narrower or shorter than this (pixels) are ignored
    pub min_selection_size: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            trim_threshold: trim::DEFAULT_THRESHOLD,
            jpeg_quality: jpeg::DEFAULT_QUALITY,
            min_selection_size: 10,
        }
    }
}

/// Complete application configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Host serving `/result/...` feeds
    pub result_host: String,
    pub speech: SpeechConfig,
    pub capture: CaptureConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            result_host: "tankmatch.net".to_string(),
            speech: SpeechConfig::default(),
            capture: CaptureConfig::default(),
        }
    }
}

/// Loads configuration from the given file or returns defaults.
pub fn load_config_from(config_path: &Path) -> AppConfig {
    crate::log(&format!("Looking for config at: {}", config_path.display()));

    if config_path.exists() {
        match fs::read_to_string(config_path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    crate::log("Config loaded from config.json");
                    return config;
                }
                Err(e) => {
                    crate::log(&format!(
                        "Failed to parse config.json: {}. Using defaults.",
                        e
                    ));
                }
            },
            Err(e) => {
                crate::log(&format!(
                    "Failed to read config.json: {}. Using defaults.",
                    e
                ));
            }
        }
    } else {
        crate::log("config.json not found. Using default config.");
    }

    AppConfig::default()
}

/// Initializes the global configuration. Call once at startup.
pub fn init_config() {
    let _ = CONFIG.set(load_config_from(&crate::paths::get_config_path()));
}

/// Returns a reference to the global configuration.
/// Falls back to defaults if called before init_config().
pub fn get_config() -> &'static AppConfig {
    CONFIG.get_or_init(AppConfig::default)
}
