//! Binary "speak" command understood by the listener.
//!
//! Layout, integers in native byte order:
//!
//! | field    | type | notes                               |
//! |----------|------|-------------------------------------|
//! | command  | i16  | 1 = speak                           |
//! | speed    | i16  | -1 = listener setting               |
//! | tone     | i16  | -1 = listener setting               |
//! | volume   | i16  | -1 = listener setting               |
//! | voice    | i16  | 0 = listener setting, 1 = female 1  |
//! | encoding | u8   | 0 = UTF-8                           |
//! | length   | i32  | byte length of the message          |
//! | message  | [u8] |                                     |

use anyhow::{anyhow, bail, Context, Result};

use crate::config::SpeechConfig;

pub const COMMAND_SPEAK: i16 = 0x0001;
pub const ENCODING_UTF8: u8 = 0;

/// Size of the fixed part preceding the message bytes.
pub const HEADER_LEN: usize = 2 * 5 + 1 + 4;

/// Command fields sent ahead of every message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpeechFrame {
    pub command: i16,
    pub speed: i16,
    pub tone: i16,
    pub volume: i16,
    pub voice: i16,
    pub encoding: u8,
}

impl Default for SpeechFrame {
    fn default() -> Self {
        Self {
            command: COMMAND_SPEAK,
            speed: -1,
            tone: -1,
            volume: -1,
            voice: 1,
            encoding: ENCODING_UTF8,
        }
    }
}

impl SpeechFrame {
    /// Speak command using the configured voice parameters.
    pub fn from_config(config: &SpeechConfig) -> Self {
        Self {
            speed: config.speed,
            tone: config.tone,
            volume: config.volume,
            voice: config.voice,
            ..Self::default()
        }
    }

    /// Serializes the command followed by `message` as UTF-8.
    pub fn encode(&self, message: &str) -> Result<Vec<u8>> {
        let text = message.as_bytes();
        let length = i32::try_from(text.len()).context("message too long for frame")?;

        let mut bytes = Vec::with_capacity(HEADER_LEN + text.len());
        bytes.extend_from_slice(&self.command.to_ne_bytes());
        bytes.extend_from_slice(&self.speed.to_ne_bytes());
        bytes.extend_from_slice(&self.tone.to_ne_bytes());
        bytes.extend_from_slice(&self.volume.to_ne_bytes());
        bytes.extend_from_slice(&self.voice.to_ne_bytes());
        bytes.push(self.encoding);
        bytes.extend_from_slice(&length.to_ne_bytes());
        bytes.extend_from_slice(text);
        Ok(bytes)
    }

    /// Parses a frame back into its command fields and message text.
    ///
    /// # Errors
    /// Returns an error if the frame is truncated, the length field does not
    /// match the payload, or the payload is not valid UTF-8.
    pub fn decode(bytes: &[u8]) -> Result<(SpeechFrame, String)> {
        if bytes.len() < HEADER_LEN {
            bail!("frame too short: {} bytes", bytes.len());
        }

        let i16_at = |offset: usize| i16::from_ne_bytes([bytes[offset], bytes[offset + 1]]);
        let frame = SpeechFrame {
            command: i16_at(0),
            speed: i16_at(2),
            tone: i16_at(4),
            volume: i16_at(6),
            voice: i16_at(8),
            encoding: bytes[10],
        };

        let length = i32::from_ne_bytes([bytes[11], bytes[12], bytes[13], bytes[14]]);
        let length = usize::try_from(length).map_err(|_| anyhow!("negative length {}", length))?;
        let payload = &bytes[HEADER_LEN..];
        if payload.len() != length {
            bail!(
                "length field says {} bytes but {} follow",
                length,
                payload.len()
            );
        }

        let message = String::from_utf8(payload.to_vec()).context("message is not UTF-8")?;
        Ok((frame, message))
    }
}
