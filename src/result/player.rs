//! Per-player result record and its derived statistics.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Matches a name carrying a two-letter team suffix, e.g. `"tank (RD)"`.
static RAW_NAME_REGEX: OnceLock<Regex> = OnceLock::new();

fn raw_name_regex() -> &'static Regex {
    RAW_NAME_REGEX.get_or_init(|| Regex::new(r"^(.+) \([A-Z]{2}\)$").expect("valid regex"))
}

/// Team a player belonged to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Team {
    #[default]
    None,
    Red,
    Blue,
}

impl Team {
    /// Parses a team value leniently.
    ///
    /// Accepts the numeric value (`"1"`) or the name in any case (`"red"`).
    /// Anything else yields `Team::None`.
    pub fn parse_lenient(value: &str) -> Team {
        let value = value.trim();
        match value.parse::<i64>() {
            Ok(1) => Team::Red,
            Ok(2) => Team::Blue,
            Ok(_) => Team::None,
            Err(_) => match value.to_ascii_lowercase().as_str() {
                "red" => Team::Red,
                "blue" => Team::Blue,
                _ => Team::None,
            },
        }
    }
}

/// One player's result in a single game.
///
/// Each `*_times` sequence holds the game-time stamps of that event, in feed
/// order. Counts are the sequence lengths.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlayerResult {
    pub id: i32,
    pub name: Option<String>,
    pub team: Team,
    /// Player left before the game ended
    pub left_early: bool,
    pub join_time: i32,
    pub leave_time: i32,
    pub shot_times: Vec<i32>,
    pub hit_times: Vec<i32>,
    pub kill_times: Vec<i32>,
    pub death_times: Vec<i32>,
    pub suicide_times: Vec<i32>,
    pub save_times: Vec<i32>,
    pub try_times: Vec<i32>,
    pub home_times: Vec<i32>,
}

impl PlayerResult {
    /// Creates an empty record with the given ID.
    pub fn new(id: i32) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    /// Name without its trailing ` (XX)` team suffix. Empty if no name was seen.
    pub fn raw_name(&self) -> &str {
        let Some(name) = self.name.as_deref() else {
            return "";
        };
        match raw_name_regex().captures(name).and_then(|c| c.get(1)) {
            Some(m) => m.as_str(),
            None => name,
        }
    }

    pub fn shot_count(&self) -> usize {
        self.shot_times.len()
    }

    pub fn hit_count(&self) -> usize {
        self.hit_times.len()
    }

    pub fn kill_count(&self) -> usize {
        self.kill_times.len()
    }

    pub fn death_count(&self) -> usize {
        self.death_times.len()
    }

    pub fn suicide_count(&self) -> usize {
        self.suicide_times.len()
    }

    pub fn save_count(&self) -> usize {
        self.save_times.len()
    }

    pub fn try_count(&self) -> usize {
        self.try_times.len()
    }

    pub fn home_count(&self) -> usize {
        self.home_times.len()
    }

    /// Hits per shot as a percentage, rounded to one decimal (ties to even).
    ///
    /// Returns 0.0 when the player never fired.
    pub fn hit_rate(&self) -> f64 {
        if self.shot_times.is_empty() {
            return 0.0;
        }
        let rate = self.hit_count() as f64 / self.shot_count() as f64 * 100.0;
        (rate * 10.0).round_ties_even() / 10.0
    }

    /// Kills minus deaths.
    pub fn dora(&self) -> i64 {
        self.kill_count() as i64 - self.death_count() as i64
    }
}

impl fmt::Display for PlayerResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name.as_deref().unwrap_or("(NO_NAME)"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_name_strips_team_suffix() {
        let mut player = PlayerResult::new(1);
        player.name = Some("tanker (RD)".to_string());
        assert_eq!(player.raw_name(), "tanker");
    }

    #[test]
    fn test_raw_name_keeps_other_names() {
        let mut player = PlayerResult::new(1);
        player.name = Some("tanker (red)".to_string());
        assert_eq!(player.raw_name(), "tanker (red)");

        player.name = Some("(RD)".to_string());
        assert_eq!(player.raw_name(), "(RD)");
    }

    #[test]
    fn test_raw_name_without_name() {
        let player = PlayerResult::new(1);
        assert_eq!(player.raw_name(), "");
        assert_eq!(player.to_string(), "(NO_NAME)");
    }

    #[test]
    fn test_hit_rate_zero_shots() {
        let mut player = PlayerResult::new(1);
        player.hit_times = vec![10, 20];
        assert_eq!(player.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_rounds_to_one_decimal() {
        let mut player = PlayerResult::new(1);
        player.shot_times = vec![1, 2, 3];
        player.hit_times = vec![1];
        assert_eq!(player.hit_rate(), 33.3);
    }

    #[test]
    fn test_hit_rate_ties_to_even() {
        // 1/16 = 6.25% -> 6.2
        let mut player = PlayerResult::new(1);
        player.shot_times = vec![0; 16];
        player.hit_times = vec![0];
        assert_eq!(player.hit_rate(), 6.2);
    }

    #[test]
    fn test_dora_can_be_negative() {
        let mut player = PlayerResult::new(1);
        player.kill_times = vec![5];
        player.death_times = vec![3, 8, 12];
        assert_eq!(player.dora(), -2);
    }

    #[test]
    fn test_team_parse_lenient() {
        assert_eq!(Team::parse_lenient("1"), Team::Red);
        assert_eq!(Team::parse_lenient("2"), Team::Blue);
        assert_eq!(Team::parse_lenient("Blue"), Team::Blue);
        assert_eq!(Team::parse_lenient("0"), Team::None);
        assert_eq!(Team::parse_lenient("7"), Team::None);
        assert_eq!(Team::parse_lenient("green"), Team::None);
        assert_eq!(Team::parse_lenient(""), Team::None);
    }
}
