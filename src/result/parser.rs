//! Line-oriented parser for the result feed.
//!
//! Each line starts with a two-letter record tag followed by comma-separated
//! fields. A player block opens with `UN,<id>` and closes with `EF`:
//!
//! ```text
//! UN,12
//! NA,tanker (RD)
//! UT,1
//! SH,105,230,410,
//! HI,230
//! EF
//! ```
//!
//! The parser holds at most one pending player. It is emitted when the next
//! `UN` or an `EF` arrives, or when `finish()` is called at end of input.

use anyhow::{bail, Result};

use super::player::{PlayerResult, Team};

/// Feed parser with a single pending-player slot.
#[derive(Debug, Default)]
pub struct ResultParser {
    pending: Option<PlayerResult>,
    line_number: usize,
}

impl ResultParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes one line. Returns a player when this line completes one.
    ///
    /// # Errors
    /// Returns an error if a data tag appears while no player is open.
    pub fn feed_line(&mut self, line: &str) -> Result<Option<PlayerResult>> {
        self.line_number += 1;
        let line = line.strip_suffix('\r').unwrap_or(line);
        let mut columns = line.split(',');
        let tag = columns.next().unwrap_or("");
        let value = columns.clone().next().unwrap_or("");

        match tag {
            "UN" => {
                let completed = self.pending.take();
                self.pending = Some(PlayerResult::new(parse_int(value)));
                return Ok(completed);
            }
            "EF" => return Ok(self.pending.take()),
            "NA" | "UT" | "LI" | "JT" | "LT" | "SH" | "HI" | "KI" | "DI" | "SU" | "SA"
            | "TR" | "HO" => {}
            _ => return Ok(None),
        }

        let Some(player) = self.pending.as_mut() else {
            bail!(
                "line {}: record tag {} outside of a player block",
                self.line_number,
                tag
            );
        };

        match tag {
            "NA" => player.name = Some(value.to_string()),
            "UT" => player.team = Team::parse_lenient(value),
            "LI" => player.left_early = value == "2",
            "JT" => player.join_time = parse_int(value),
            "LT" => player.leave_time = parse_int(value),
            "SH" => player.shot_times = parse_int_columns(columns),
            "HI" => player.hit_times = parse_int_columns(columns),
            "KI" => player.kill_times = parse_int_columns(columns),
            "DI" => player.death_times = parse_int_columns(columns),
            "SU" => player.suicide_times = parse_int_columns(columns),
            "SA" => player.save_times = parse_int_columns(columns),
            "TR" => player.try_times = parse_int_columns(columns),
            "HO" => player.home_times = parse_int_columns(columns),
            _ => unreachable!("tag filtered above"),
        }

        Ok(None)
    }

    /// Flushes the pending player at end of input.
    pub fn finish(&mut self) -> Option<PlayerResult> {
        self.pending.take()
    }
}

/// Parses a whole feed into players, in feed order.
///
/// A trailing player without `EF` is kept.
pub fn parse_result_feed(text: &str) -> Result<Vec<PlayerResult>> {
    let mut parser = ResultParser::new();
    let mut players = Vec::new();

    for line in text.split('\n') {
        if let Some(player) = parser.feed_line(line)? {
            players.push(player);
        }
    }
    players.extend(parser.finish());

    Ok(players)
}

/// Non-numeric text parses as 0.
fn parse_int(value: &str) -> i32 {
    value.trim().parse().unwrap_or(0)
}

fn parse_int_columns<'a>(columns: impl Iterator<Item = &'a str>) -> Vec<i32> {
    columns
        .filter(|c| !c.is_empty())
        .map(parse_int)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_FEED: &str = "\
GI,12345
UN,7
NA,tanker (RD)
UT,1
LI,2
JT,15
LT,610
SH,100,200,300,400,
HI,200,400
KI,400
DI,
SU,
SA,350
TR,120,500
HO,590
EF
UN,9
NA,gunner (BL)
UT,2
LI,1
SH,50
HI,50
KI,60,70
DI,80
EF
";

    #[test]
    fn test_parse_sample_feed() {
        let players = parse_result_feed(SAMPLE_FEED).unwrap();
        assert_eq!(players.len(), 2);

        let first = &players[0];
        assert_eq!(first.id, 7);
        assert_eq!(first.name.as_deref(), Some("tanker (RD)"));
        assert_eq!(first.team, Team::Red);
        assert!(first.left_early);
        assert_eq!(first.join_time, 15);
        assert_eq!(first.leave_time, 610);
        assert_eq!(first.shot_times, vec![100, 200, 300, 400]);
        assert_eq!(first.hit_times, vec![200, 400]);
        assert_eq!(first.kill_count(), 1);
        assert_eq!(first.death_count(), 0);
        assert_eq!(first.save_times, vec![350]);
        assert_eq!(first.try_times, vec![120, 500]);
        assert_eq!(first.home_times, vec![590]);

        let second = &players[1];
        assert_eq!(second.id, 9);
        assert_eq!(second.team, Team::Blue);
        assert!(!second.left_early);
        assert_eq!(second.dora(), 1);
    }

    #[test]
    fn test_block_uses_last_value_of_each_tag() {
        let players = parse_result_feed("UN,1\nNA,first\nNA,second\nSH,1,2\nSH,3\nEF\n").unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].name.as_deref(), Some("second"));
        assert_eq!(players[0].shot_times, vec![3]);
    }

    #[test]
    fn test_start_tag_emits_previous_player() {
        let mut parser = ResultParser::new();
        assert!(parser.feed_line("UN,1").unwrap().is_none());
        assert!(parser.feed_line("NA,alpha").unwrap().is_none());

        let emitted = parser.feed_line("UN,2").unwrap().expect("first player emitted");
        assert_eq!(emitted.id, 1);
        assert_eq!(emitted.name.as_deref(), Some("alpha"));

        let last = parser.feed_line("EF").unwrap().expect("second player emitted");
        assert_eq!(last.id, 2);
        assert!(parser.finish().is_none());
    }

    #[test]
    fn test_finish_flushes_trailing_player() {
        let mut parser = ResultParser::new();
        parser.feed_line("UN,3").unwrap();
        parser.feed_line("KI,10").unwrap();
        let player = parser.finish().expect("pending player");
        assert_eq!(player.id, 3);
        assert_eq!(player.kill_times, vec![10]);

        let players = parse_result_feed("UN,1\nEF\nUN,2\nNA,late").unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(players[1].name.as_deref(), Some("late"));
    }

    #[test]
    fn test_data_tag_without_player_is_error() {
        let err = parse_result_feed("SH,1,2,3\n").unwrap_err();
        assert!(err.to_string().contains("SH"));

        let err = parse_result_feed("UN,1\nEF\nNA,orphan\n").unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_unknown_tags_and_blank_lines_ignored() {
        let players = parse_result_feed("\nXX,1\nUN,4\n\nZZ,foo\nEF\n\n").unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].id, 4);
    }

    #[test]
    fn test_malformed_numbers_parse_as_zero() {
        let players = parse_result_feed("UN,abc\nJT,\nLT,x\nHI,5,oops,7\nEF").unwrap();
        let player = &players[0];
        assert_eq!(player.id, 0);
        assert_eq!(player.join_time, 0);
        assert_eq!(player.leave_time, 0);
        assert_eq!(player.hit_times, vec![5, 0, 7]);
    }

    #[test]
    fn test_missing_id_field_parses_as_zero() {
        let players = parse_result_feed("UN\nEF").unwrap();
        assert_eq!(players[0].id, 0);
    }

    #[test]
    fn test_left_early_only_for_literal_two() {
        for (value, expected) in [("2", true), ("1", false), ("02", false), ("", false)] {
            let feed = format!("UN,1\nLI,{}\nEF", value);
            let players = parse_result_feed(&feed).unwrap();
            assert_eq!(players[0].left_early, expected, "LI,{}", value);
        }
    }

    #[test]
    fn test_crlf_lines() {
        let players = parse_result_feed("UN,5\r\nNA,crlf\r\nEF\r\n").unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].name.as_deref(), Some("crlf"));
    }

    #[test]
    fn test_empty_feed() {
        assert!(parse_result_feed("").unwrap().is_empty());
    }
}
