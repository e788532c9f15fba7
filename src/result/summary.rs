//! Tie-aware rankings and the spoken result summary.

use std::cmp::Ordering;
use std::fmt::Display;

use super::player::PlayerResult;

/// Returns every item whose key equals the maximum key.
///
/// Single left-to-right pass. The first item's key seeds the maximum, equal
/// keys are kept, a strictly larger key discards everything selected so far.
/// Empty input gives an empty result.
pub fn max_elements<I, K, F>(items: I, mut key: F) -> Vec<I::Item>
where
    I: IntoIterator,
    K: PartialOrd,
    F: FnMut(&I::Item) -> K,
{
    let mut iter = items.into_iter();
    let Some(first) = iter.next() else {
        return Vec::new();
    };

    let mut max = key(&first);
    let mut selected = vec![first];

    for item in iter {
        let value = key(&item);
        match value.partial_cmp(&max) {
            Some(Ordering::Greater) => {
                max = value;
                selected.clear();
                selected.push(item);
            }
            Some(Ordering::Equal) => selected.push(item),
            _ => {}
        }
    }

    selected
}

/// Builds the text read aloud after a game.
///
/// One line per metric: the top value followed by every tied player's name.
pub fn build_summary(players: &[PlayerResult]) -> String {
    let mut text = String::new();
    push_ranking(&mut text, "ヒット数", "ヒット", players, PlayerResult::hit_count);
    push_ranking(&mut text, "ショット数", "ショット", players, PlayerResult::shot_count);
    push_ranking(&mut text, "ヒット率", "パーセント", players, PlayerResult::hit_rate);
    push_ranking(&mut text, "キル数", "キル", players, PlayerResult::kill_count);
    push_ranking(&mut text, "ダイ数", "ダイ", players, PlayerResult::death_count);
    push_ranking(&mut text, "フラッグ数", "フラッグ", players, PlayerResult::home_count);
    push_ranking(&mut text, "トライ数", "トライ", players, PlayerResult::try_count);
    push_ranking(&mut text, "セーブ数", "セーブ", players, PlayerResult::save_count);
    push_ranking(&mut text, "ドラ", "ドラ", players, PlayerResult::dora);
    text
}

fn push_ranking<K>(
    text: &mut String,
    title: &str,
    unit: &str,
    players: &[PlayerResult],
    metric: fn(&PlayerResult) -> K,
) where
    K: PartialOrd + Display,
{
    let top = max_elements(players, |p| metric(p));
    let Some(first) = top.first() else {
        return;
    };

    text.push_str(&format!("{} 第1位 {}{} ", title, metric(first), unit));
    for player in &top {
        text.push_str(player.raw_name());
        text.push(' ');
    }
    text.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: i32, name: &str, hits: usize) -> PlayerResult {
        let mut p = PlayerResult::new(id);
        p.name = Some(name.to_string());
        p.hit_times = vec![0; hits];
        p
    }

    #[test]
    fn test_max_elements_keeps_ties() {
        let players = vec![player(1, "a", 5), player(2, "b", 5), player(3, "c", 3)];
        let top = max_elements(&players, |p| p.hit_count());
        let ids: Vec<i32> = top.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_max_elements_larger_value_resets() {
        let top = max_elements(vec![3, 5, 5, 9, 2, 9], |v| *v);
        assert_eq!(top, vec![9, 9]);
    }

    #[test]
    fn test_max_elements_empty() {
        let players: Vec<PlayerResult> = Vec::new();
        assert!(max_elements(&players, |p| p.hit_count()).is_empty());
    }

    #[test]
    fn test_max_elements_all_negative() {
        // First element seeds the maximum, not a zero default
        let top = max_elements(vec![-4, -2, -7, -2], |v| *v);
        assert_eq!(top, vec![-2, -2]);
    }

    #[test]
    fn test_max_elements_float_keys() {
        let top = max_elements(vec![33.3, 50.0, 12.5, 50.0], |v| *v);
        assert_eq!(top, vec![50.0, 50.0]);
    }

    #[test]
    fn test_summary_lines() {
        let mut a = player(1, "alpha (RD)", 2);
        a.shot_times = vec![0; 4];
        a.kill_times = vec![1, 2];
        let mut b = player(2, "bravo (BL)", 2);
        b.shot_times = vec![0; 3];
        b.death_times = vec![5];

        let summary = build_summary(&[a, b]);
        let lines: Vec<&str> = summary.lines().collect();

        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "ヒット数 第1位 2ヒット alpha bravo ");
        assert_eq!(lines[1], "ショット数 第1位 4ショット alpha ");
        assert_eq!(lines[2], "ヒット率 第1位 66.7パーセント bravo ");
        assert_eq!(lines[3], "キル数 第1位 2キル alpha ");
        assert_eq!(lines[4], "ダイ数 第1位 1ダイ bravo ");
        assert_eq!(lines[5], "フラッグ数 第1位 0フラッグ alpha bravo ");
        assert_eq!(lines[8], "ドラ 第1位 2ドラ alpha ");
    }

    #[test]
    fn test_summary_whole_percent_has_no_decimal() {
        let mut a = player(1, "alpha", 1);
        a.shot_times = vec![0; 2];
        let summary = build_summary(&[a]);
        assert!(summary.contains("ヒット率 第1位 50パーセント alpha "));
    }

    #[test]
    fn test_summary_empty_players() {
        assert_eq!(build_summary(&[]), "");
    }
}
