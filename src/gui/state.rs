//! GUI application state management.
//!
//! Tracks user input values and the last reported status for display.

use std::path::PathBuf;

use crate::capture::{DragSelection, ProcessedCapture};
use crate::reader::{validate_game_id, ReadTarget, ReaderEvent};

/// Result reader window state.
#[derive(Debug, Default)]
pub struct ReaderState {
    /// Game ID text box contents
    pub game_id_text: String,
    /// Summary of the last game read
    pub result_text: String,
    /// Status bar text
    pub status: String,
}

impl ReaderState {
    /// Validates the typed game ID and turns it into a read request.
    ///
    /// On invalid input the status is updated and `None` is returned.
    pub fn request_game_read(&mut self) -> Option<ReadTarget> {
        self.game_id_text = self.game_id_text.trim().to_string();
        match validate_game_id(&self.game_id_text) {
            Ok(id) => Some(ReadTarget::Game(id)),
            Err(msg) => {
                self.status = msg.to_string();
                None
            }
        }
    }

    /// Applies one progress event from the read thread.
    pub fn apply(&mut self, event: ReaderEvent) {
        match event {
            ReaderEvent::GameId(id) => self.game_id_text = id.to_string(),
            ReaderEvent::Status(msg) => self.status = msg,
            ReaderEvent::Summary(text) => self.result_text = text,
        }
    }
}

/// What the capture window is showing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CaptureMode {
    /// Full-screen frozen desktop, waiting for a drag
    #[default]
    Selecting,
    /// Showing the last capture with its trim rectangle
    Preview,
}

/// Map capture window state.
#[derive(Default)]
pub struct CaptureState {
    pub mode: CaptureMode,
    pub drag: DragSelection,
    /// Last accepted capture
    pub capture: Option<ProcessedCapture>,
    /// Where "Save" writes the JPEG
    pub save_path: String,
    /// Status text
    pub status: String,
}

impl CaptureState {
    pub fn with_save_path(path: PathBuf) -> Self {
        Self {
            save_path: path.display().to_string(),
            ..Default::default()
        }
    }

    pub fn can_save(&self) -> bool {
        self.capture.is_some() && !self.save_path.trim().is_empty()
    }
}
