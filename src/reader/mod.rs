//! Read flow of the result reader: fetch, parse, summarize, speak.
//!
//! Runs as a plain sequential call behind a single busy flag. A read
//! requested while another one is in progress is dropped, not queued.

use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::config::AppConfig;
use crate::log;
use crate::result::{build_summary, parse_result_feed, ResultClient};
use crate::speech::{SpeakOutcome, SpeechNotifier};

pub const MSG_GAME_ID_EMPTY: &str = "ゲームIDが入力されていません";
pub const MSG_GAME_ID_INVALID: &str = "入力されたゲームIDは不正です";
pub const MSG_LATEST_FAILED: &str = "ゲームIDの自動取得に失敗しました";

/// Which game to read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadTarget {
    /// The most recent game on the server
    Latest,
    Game(u32),
}

/// Progress reported while a read runs.
#[derive(Clone, Debug, PartialEq)]
pub enum ReaderEvent {
    /// The game ID being read (also resolves `ReadTarget::Latest`)
    GameId(u32),
    Status(String),
    /// The summary text, before it is spoken
    Summary(String),
}

/// Final result of a read.
#[derive(Clone, Debug, PartialEq)]
pub enum ReadOutcome {
    /// Another read was in progress; nothing was done
    Busy,
    LatestUnavailable,
    LoadFailed { game_id: u32 },
    Completed {
        game_id: u32,
        summary: String,
        speech: SpeakOutcome,
    },
}

impl ReadOutcome {
    /// Status bar text for this outcome. `None` for a dropped request.
    pub fn status_message(&self) -> Option<String> {
        match self {
            Self::Busy => None,
            Self::LatestUnavailable => Some(MSG_LATEST_FAILED.to_string()),
            Self::LoadFailed { game_id } => Some(format!(
                "リザルトの読み込みに失敗しました。(ID:{})",
                game_id
            )),
            Self::Completed {
                game_id,
                speech: SpeakOutcome::Failed,
                ..
            } => Some(format!("棒読みちゃんに接続できません。(ID:{})", game_id)),
            // A suppressed repeat was spoken by an earlier read
            Self::Completed { game_id, .. } => Some(format!(
                "リザルトの読み込みが完了しました。(ID:{})",
                game_id
            )),
        }
    }
}

/// Validates game ID text typed by the user.
///
/// IDs are non-negative and fit in an `i32`. Returns the ID, or the status
/// message to show instead.
pub fn validate_game_id(text: &str) -> std::result::Result<u32, &'static str> {
    let text = text.trim();
    if text.is_empty() {
        return Err(MSG_GAME_ID_EMPTY);
    }
    text.parse::<i32>()
        .ok()
        .and_then(|id| u32::try_from(id).ok())
        .ok_or(MSG_GAME_ID_INVALID)
}

/// Clears the busy flag when dropped.
pub struct ReadingGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for ReadingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// Owns the feed client, the speech notifier and the busy flag.
pub struct ResultReader {
    client: ResultClient,
    notifier: Mutex<SpeechNotifier>,
    reading: AtomicBool,
}

impl ResultReader {
    pub fn new(client: ResultClient, notifier: SpeechNotifier) -> Self {
        Self {
            client,
            notifier: Mutex::new(notifier),
            reading: AtomicBool::new(false),
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(Self::new(
            ResultClient::new(&config.result_host)?,
            SpeechNotifier::from_config(&config.speech),
        ))
    }

    /// Checks if a read is currently running.
    pub fn is_reading(&self) -> bool {
        self.reading.load(Ordering::SeqCst)
    }

    /// Marks a read as started. `None` if one is already running.
    pub fn try_begin(&self) -> Option<ReadingGuard<'_>> {
        if self.reading.swap(true, Ordering::SeqCst) {
            return None;
        }
        Some(ReadingGuard {
            flag: &self.reading,
        })
    }

    /// Runs one read to completion, reporting progress through `on_event`.
    pub fn read(&self, target: ReadTarget, on_event: &mut dyn FnMut(ReaderEvent)) -> ReadOutcome {
        let Some(_guard) = self.try_begin() else {
            log("Read requested while another read is running; ignored");
            return ReadOutcome::Busy;
        };

        let game_id = match target {
            ReadTarget::Game(id) => id,
            ReadTarget::Latest => match self.client.latest_game_ids() {
                Some(ids) if !ids.is_empty() => ids[0],
                _ => return ReadOutcome::LatestUnavailable,
            },
        };

        on_event(ReaderEvent::GameId(game_id));
        on_event(ReaderEvent::Status(format!(
            "リザルトを読み込み中です。(ID:{})",
            game_id
        )));
        log(&format!("Reading result of game {}", game_id));

        let Some(text) = self.client.fetch_result_text(game_id) else {
            return ReadOutcome::LoadFailed { game_id };
        };
        let players = match parse_result_feed(&text) {
            Ok(players) => players,
            Err(e) => {
                log(&format!("Failed to parse result of game {}: {:#}", game_id, e));
                return ReadOutcome::LoadFailed { game_id };
            }
        };
        log(&format!("Game {}: {} players", game_id, players.len()));

        let summary = build_summary(&players);
        on_event(ReaderEvent::Summary(summary.clone()));

        let speech = match self.notifier.lock() {
            Ok(mut notifier) => notifier.speak(&summary),
            Err(_) => SpeakOutcome::Failed,
        };

        ReadOutcome::Completed {
            game_id,
            summary,
            speech,
        }
    }
}
