//! Difficulty escalation
//!
//! Difficulty grows linearly with run time, independent of distance or score.

use crate::tuning::DifficultyTuning;

/// Difficulty after `dt` more milliseconds of running
#[inline]
pub fn escalate(difficulty: f64, dt: f64, tuning: &DifficultyTuning) -> f64 {
    difficulty + dt * tuning.rate_per_ms
}

/// Displayed run level, capped at `max_level`
pub fn level_for(difficulty: f64, tuning: &DifficultyTuning) -> u32 {
    let earned = (difficulty / tuning.points_per_level).floor().max(0.0) as u32;
    (1 + earned).min(tuning.max_level)
}
