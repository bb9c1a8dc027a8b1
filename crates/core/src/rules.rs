//! Rules module - difficulty ramp, gravity and line-clear scoring
//!
//! Difficulty is a step function of elapsed game ticks. Each tier picks a
//! gravity interval and a per-row score. The tables are plain data so a host
//! can ship a different ramp without touching the state machine.

use crate::types::{
    CLEAR_ANIMATION_STEPS, CLEAR_ANIMATION_STEP_TICKS, DIFFICULTY_TIERS, FALLING_SPEEDS, FRAMERATE,
    SCORE_PER_LINE, TIER_START_SECONDS,
};

/// Tunable game constants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rules {
    /// Logical ticks per second.
    pub framerate: u32,
    /// Game time in seconds at which each tier begins; ascending, first entry 0.
    pub tier_start_seconds: [u32; DIFFICULTY_TIERS],
    /// Ticks between gravity steps, per tier.
    pub falling_speeds: [u32; DIFFICULTY_TIERS],
    /// Points per cleared row, per tier.
    pub score_per_line: [u64; DIFFICULTY_TIERS],
    /// Blink steps shown before completed rows are removed.
    pub clear_animation_steps: u32,
    /// Ticks per blink step.
    pub clear_animation_step_ticks: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            framerate: FRAMERATE,
            tier_start_seconds: TIER_START_SECONDS,
            falling_speeds: FALLING_SPEEDS,
            score_per_line: SCORE_PER_LINE,
            clear_animation_steps: CLEAR_ANIMATION_STEPS,
            clear_animation_step_ticks: CLEAR_ANIMATION_STEP_TICKS,
        }
    }
}

impl Rules {
    /// Difficulty tier (0..7) after `tick` ticks of play.
    pub fn tier_for(&self, tick: u64) -> usize {
        let seconds = tick / u64::from(self.framerate.max(1));
        self.tier_start_seconds
            .iter()
            .rposition(|&start| seconds >= u64::from(start))
            .unwrap_or(0)
    }

    /// Gravity interval in ticks for a tier; tiers past the table use the last entry.
    pub fn falling_speed(&self, tier: usize) -> u32 {
        self.falling_speeds[tier.min(DIFFICULTY_TIERS - 1)]
    }

    /// Points per cleared row for a tier.
    pub fn score_per_line(&self, tier: usize) -> u64 {
        self.score_per_line[tier.min(DIFFICULTY_TIERS - 1)]
    }

    /// Points for clearing `rows` rows at `tier`.
    pub fn line_clear_score(&self, rows: usize, tier: usize) -> u64 {
        (rows as u64).saturating_mul(self.score_per_line(tier))
    }

    /// Ticks the clear animation runs before rows are deleted.
    pub fn clear_animation_ticks(&self) -> u32 {
        self.clear_animation_steps * self.clear_animation_step_ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        let rules = Rules::default();
        let fr = FRAMERATE as u64;
        assert_eq!(rules.tier_for(0), 0);
        assert_eq!(rules.tier_for(fr * 60 - 1), 0);
        assert_eq!(rules.tier_for(fr * 60), 1);
        assert_eq!(rules.tier_for(fr * 180 - 1), 1);
        assert_eq!(rules.tier_for(fr * 180), 2);
        assert_eq!(rules.tier_for(fr * 300), 3);
        assert_eq!(rules.tier_for(fr * 600), 4);
        assert_eq!(rules.tier_for(fr * 1200), 5);
        assert_eq!(rules.tier_for(fr * 2700 - 1), 5);
        assert_eq!(rules.tier_for(fr * 2700), 6);
        assert_eq!(rules.tier_for(u64::MAX), 6);
    }

    #[test]
    fn test_falling_speed_is_non_increasing() {
        let rules = Rules::default();
        let speeds: [u32; DIFFICULTY_TIERS] = core::array::from_fn(|t| rules.falling_speed(t));
        assert_eq!(speeds, [50, 40, 30, 20, 10, 5, 4]);
        assert!(speeds.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(rules.falling_speed(99), 4);
    }

    #[test]
    fn test_score_per_line_is_ascending() {
        let rules = Rules::default();
        let scores: [u64; DIFFICULTY_TIERS] = core::array::from_fn(|t| rules.score_per_line(t));
        assert_eq!(scores, [100, 250, 500, 1000, 2500, 5000, 10000]);
        assert!(scores.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_line_clear_score() {
        let rules = Rules::default();
        for tier in 0..DIFFICULTY_TIERS {
            for rows in 0..=4 {
                assert_eq!(
                    rules.line_clear_score(rows, tier),
                    rows as u64 * rules.score_per_line(tier)
                );
            }
        }
    }

    #[test]
    fn test_clear_animation_ticks() {
        assert_eq!(Rules::default().clear_animation_ticks(), 120);
    }

    #[test]
    fn test_custom_ramp() {
        let rules = Rules {
            framerate: 10,
            tier_start_seconds: [0, 1, 2, 3, 4, 5, 6],
            ..Rules::default()
        };
        assert_eq!(rules.tier_for(9), 0);
        assert_eq!(rules.tier_for(10), 1);
        assert_eq!(rules.tier_for(65), 6);
    }
}
