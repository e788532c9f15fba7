//! HTTP access to the TankMatch result server.
//!
//! Both lookups report failure as `None`; the reason is only logged.

use anyhow::{anyhow, Result};
use std::time::Duration;

use crate::log;

/// Blocking client for `http://<host>/result/...`.
#[derive(Clone, Debug)]
pub struct ResultClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl ResultClient {
    /// Creates a client for the given host (optionally with `:port`).
    pub fn new(host: &str) -> Result<Self> {
        Self::with_builder(host, reqwest::blocking::Client::builder())
    }

    /// Client that ignores system proxy settings.
    #[cfg(test)]
    pub(crate) fn direct(host: &str) -> Result<Self> {
        Self::with_builder(host, reqwest::blocking::Client::builder().no_proxy())
    }

    fn with_builder(host: &str, builder: reqwest::blocking::ClientBuilder) -> Result<Self> {
        let client = builder
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("tankmatch-tools/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: format!("http://{}/result", host.trim_end_matches('/')),
        })
    }

    /// URL of the ten most recent game IDs.
    pub fn latest_url(&self) -> String {
        format!("{}/last_10.txt", self.base_url)
    }

    /// URL of one game's result feed. Feeds are bucketed by `game_id / 1000`.
    pub fn result_url(&self, game_id: u32) -> String {
        format!("{}/{}/{}.txt", self.base_url, game_id / 1000, game_id)
    }

    /// Fetches the most recent game IDs, newest first.
    pub fn latest_game_ids(&self) -> Option<Vec<u32>> {
        let body = self.get_text(&self.latest_url())?;
        Some(parse_game_id_list(&body))
    }

    /// Fetches the raw result feed of one game.
    pub fn fetch_result_text(&self, game_id: u32) -> Option<String> {
        self.get_text(&self.result_url(game_id))
    }

    fn get_text(&self, url: &str) -> Option<String> {
        match self.try_get_text(url) {
            Ok(body) => {
                log(&format!("GET {} ({} bytes)", url, body.len()));
                Some(body)
            }
            Err(e) => {
                log(&format!("GET {} failed: {}", url, e));
                None
            }
        }
    }

    fn try_get_text(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send()?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP {}", response.status()));
        }

        Ok(response.text()?)
    }
}

/// Parses a newline-separated list of game IDs. Unparseable lines are skipped.
pub fn parse_game_id_list(text: &str) -> Vec<u32> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| line.parse().ok())
        .collect()
}
