//! Score text and overlay visibility.
//!
//! The play loop produces the values a HUD shows; drawing them is up to the host.

use bevy_ecs::{
    resource::Resource,
    system::{Res, ResMut},
};
use bitflags::bitflags;
use tracing::debug;

use crate::config::RunnerConfig;
use crate::systems::RunState;

bitflags! {
    /// Which overlay elements are currently visible.
    #[derive(Resource, Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct HudVisibility: u8 {
        const CLOUDS = 1 << 0;
        const SCORE = 1 << 1;
        const HIGH_SCORE = 1 << 2;
        const GAME_OVER = 1 << 3;
    }
}

/// The score as currently displayed.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct ScoreDisplay(pub String);

/// Renders a score as a zero-padded decimal of at least `digits` characters.
///
/// Scores wider than `digits` are shown in full rather than truncated.
pub fn format_score(score: u32, digits: usize) -> String {
    format!("{score:0digits$}")
}

/// Parses the numeric part of a score or high score text.
///
/// Any non-digit prefix (such as `"HI "`) is skipped; text without digits reads
/// as zero and values too large for `u32` saturate.
pub fn parse_score_text(text: &str) -> u32 {
    let rest = text.trim_start_matches(|c: char| !c.is_ascii_digit());
    let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    let digits = &rest[..end];

    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u32::MAX)
}

/// The best score seen so far in this process. Never decreases.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct HighScore {
    pub value: u32,
    pub text: String,
}

impl HighScore {
    pub fn new(digits: usize) -> Self {
        Self {
            value: 0,
            text: format_score(0, digits),
        }
    }

    /// Compares the displayed score against the stored high score and keeps the larger.
    ///
    /// `score_text` is the unprefixed score display. Returns `true` when the
    /// high score was raised.
    pub fn commit(&mut self, score_text: &str, prefix: &str, digits: usize) -> bool {
        let previous = self.value;
        let current = parse_score_text(score_text);
        let best = previous.max(current);

        self.value = best;
        self.text = format!("{prefix}{}", format_score(best, digits));

        best > previous
    }
}

/// Refreshes the score text from the run state.
pub fn score_display_system(config: Res<RunnerConfig>, state: Res<RunState>, mut display: ResMut<ScoreDisplay>) {
    let text = format_score(state.score, config.score_digits);
    if display.0 != text {
        if text.len() > config.score_digits && display.0.len() == config.score_digits {
            debug!(score = state.score, "Score exceeded display width, expanding");
        }
        display.0 = text;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_score_pads() {
        assert_eq!(format_score(0, 5), "00000");
        assert_eq!(format_score(42, 5), "00042");
        assert_eq!(format_score(99999, 5), "99999");
    }

    #[test]
    fn test_format_score_expands_past_width() {
        assert_eq!(format_score(100000, 5), "100000");
        assert_eq!(format_score(1234567, 5), "1234567");
    }

    #[test]
    fn test_parse_score_text() {
        assert_eq!(parse_score_text("00042"), 42);
        assert_eq!(parse_score_text("HI 00123"), 123);
        assert_eq!(parse_score_text("HI 100000"), 100000);
        assert_eq!(parse_score_text(""), 0);
        assert_eq!(parse_score_text("HI "), 0);
    }

    #[test]
    fn test_commit_keeps_larger() {
        let mut high = HighScore::new(5);
        assert!(high.commit("00120", "HI ", 5));
        assert_eq!(high.value, 120);
        assert_eq!(high.text, "HI 00120");

        assert!(!high.commit("00045", "HI ", 5));
        assert_eq!(high.value, 120);
        assert_eq!(high.text, "HI 00120");

        assert!(high.commit("00300", "HI ", 5));
        assert_eq!(high.text, "HI 00300");
    }

    #[test]
    fn test_commit_equal_score_is_not_raise() {
        let mut high = HighScore::new(5);
        high.commit("00050", "HI ", 5);
        assert!(!high.commit("00050", "HI ", 5));
        assert_eq!(high.value, 50);
    }

    #[test]
    fn test_commit_ignores_digits_in_prefix() {
        let mut high = HighScore::new(5);
        assert!(!high.commit("00000", "P1 ", 5));
        assert_eq!(high.text, "P1 00000");

        assert!(!high.commit("00000", "P1 ", 5));
        assert_eq!(high.value, 0);

        assert!(high.commit("00007", "P1 ", 5));
        assert_eq!(high.text, "P1 00007");
    }

    #[test]
    fn test_visibility_flags() {
        let mut hud = HudVisibility::empty();
        hud.insert(HudVisibility::CLOUDS | HudVisibility::SCORE);
        assert!(hud.contains(HudVisibility::SCORE));
        assert!(!hud.contains(HudVisibility::GAME_OVER));
        hud.remove(HudVisibility::CLOUDS);
        assert_eq!(hud, HudVisibility::SCORE);
    }
}
