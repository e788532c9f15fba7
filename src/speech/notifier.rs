//! Sends messages to the speech listener, one TCP connection per message.

use anyhow::{Context, Result};
use std::io::Write;
use std::net::TcpStream;

use super::frame::SpeechFrame;
use crate::config::SpeechConfig;
use crate::log;

/// Result of a `speak` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpeakOutcome {
    /// Frame written to the listener
    Sent,
    /// Same as the previous message with duplicate suppression on
    Skipped,
    /// Listener unreachable or the write failed
    Failed,
}

/// Remembers the last message so repeats can be suppressed.
#[derive(Debug)]
pub struct SpeechNotifier {
    host: String,
    port: u16,
    frame: SpeechFrame,
    same_message_read_once: bool,
    previous_message: Option<String>,
}

impl SpeechNotifier {
    /// Notifier for `localhost:<port>` with default voice parameters.
    pub fn new(port: u16) -> Self {
        Self {
            host: "localhost".to_string(),
            port,
            frame: SpeechFrame::default(),
            same_message_read_once: false,
            previous_message: None,
        }
    }

    pub fn from_config(config: &SpeechConfig) -> Self {
        Self {
            frame: SpeechFrame::from_config(config),
            same_message_read_once: config.same_message_read_once,
            ..Self::new(config.port)
        }
    }

    /// Overrides the listener host (defaults to `localhost`).
    pub fn with_host(mut self, host: &str) -> Self {
        self.host = host.to_string();
        self
    }

    pub fn set_same_message_read_once(&mut self, enabled: bool) {
        self.same_message_read_once = enabled;
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Sends `message` to the listener.
    ///
    /// The message is remembered before sending, so a failed send still
    /// suppresses an identical follow-up when suppression is on.
    pub fn speak(&mut self, message: &str) -> SpeakOutcome {
        if self.same_message_read_once && self.previous_message.as_deref() == Some(message) {
            log("Speech skipped: same message as last time");
            return SpeakOutcome::Skipped;
        }
        self.previous_message = Some(message.to_string());

        match self.send(message) {
            Ok(()) => {
                log(&format!(
                    "Speech sent to {}:{} ({} bytes)",
                    self.host,
                    self.port,
                    message.len()
                ));
                SpeakOutcome::Sent
            }
            Err(e) => {
                log(&format!("Speech failed: {:#}", e));
                SpeakOutcome::Failed
            }
        }
    }

    fn send(&self, message: &str) -> Result<()> {
        let bytes = self.frame.encode(message)?;
        let mut stream = TcpStream::connect((self.host.as_str(), self.port))
            .with_context(|| format!("Failed to connect to {}:{}", self.host, self.port))?;
        stream
            .write_all(&bytes)
            .context("Failed to write speech frame")?;
        stream.flush()?;
        Ok(())
    }
}

impl Default for SpeechNotifier {
    fn default() -> Self {
        Self::from_config(&SpeechConfig::default())
    }
}
