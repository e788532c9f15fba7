//! Text-to-speech forwarding to a local BouyomiChan listener.
//!
//! This module provides:
//! - The binary command frame (`SpeechFrame`)
//! - A notifier that sends one frame per message (`SpeechNotifier`)

pub mod frame;
pub mod notifier;

pub use frame::{SpeechFrame, COMMAND_SPEAK, ENCODING_UTF8};
pub use notifier::{SpeakOutcome, SpeechNotifier};
