//! Data-driven game balance
//!
//! Every balance constant the simulation uses lives here. Defaults are the
//! shipped values; a JSON document can override any subset of them.

use serde::{Deserialize, Serialize};

/// Errors loading a tuning document
#[derive(thiserror::Error, Debug)]
pub enum TuningError {
    #[error("Malformed tuning document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid tuning value: {0}")]
    Invalid(String),
}

/// Spawn cadence: `interval = max(base - per_difficulty * difficulty, floor)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    pub obstacle_base_ms: f64,
    pub obstacle_per_difficulty: f64,
    pub obstacle_floor_ms: f64,

    pub shard_base_ms: f64,
    pub shard_per_difficulty: f64,
    pub shard_floor_ms: f64,

    /// Drones: `base - min(per_difficulty * difficulty, max_reduction)`
    pub drone_base_ms: f64,
    pub drone_per_difficulty: f64,
    pub drone_max_reduction_ms: f64,

    /// Obstacle size = min + U * spread + per_difficulty * difficulty
    pub obstacle_size_min: f64,
    pub obstacle_size_spread: f64,
    pub obstacle_size_per_difficulty: f64,

    /// Shard vertical jitter around the middle of the screen
    pub shard_offset_spread: f64,
    pub shard_spawn_margin: f64,

    pub drone_spawn_margin: f64,
    pub drone_frequency_min: f64,
    pub drone_frequency_spread: f64,
    pub drone_amplitude_min: f64,
    pub drone_amplitude_spread: f64,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            obstacle_base_ms: 450.0,
            obstacle_per_difficulty: 12.0,
            obstacle_floor_ms: 180.0,

            shard_base_ms: 600.0,
            shard_per_difficulty: 10.0,
            shard_floor_ms: 200.0,

            drone_base_ms: 4000.0,
            drone_per_difficulty: 40.0,
            drone_max_reduction_ms: 2500.0,

            obstacle_size_min: 32.0,
            obstacle_size_spread: 32.0,
            obstacle_size_per_difficulty: 2.0,

            shard_offset_spread: 20.0,
            shard_spawn_margin: 10.0,

            drone_spawn_margin: 80.0,
            drone_frequency_min: 0.0015,
            drone_frequency_spread: 0.001,
            drone_amplitude_min: 45.0,
            drone_amplitude_spread: 55.0,
        }
    }
}

/// Speeds and motion modifiers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionTuning {
    /// Base scroll speed (pixels per second)
    pub base_speed: f64,
    /// Travel speed gain per point of difficulty
    pub travel_per_difficulty: f64,
    /// Travel speed gain per thrust rank
    pub travel_per_thrust: f64,
    /// Travel speed multiplier while in burst mode
    pub burst_multiplier: f64,

    /// Obstacle speed at spawn: gains per difficulty / thrust rank
    pub obstacle_speed_per_difficulty: f64,
    pub obstacle_speed_per_thrust: f64,
    /// Extra obstacle speed applied each frame per point of difficulty
    pub obstacle_drift_per_difficulty: f64,
    pub obstacle_wobble_rate: f64,

    /// Shards travel at this fraction of travel speed
    pub shard_speed_factor: f64,
    pub shard_drift_rate: f64,
    pub shard_bob_amplitude: f64,

    /// Drones travel at this fraction of travel speed
    pub drone_speed_factor: f64,
}

impl Default for MotionTuning {
    fn default() -> Self {
        Self {
            base_speed: 260.0,
            travel_per_difficulty: 6.0,
            travel_per_thrust: 18.0,
            burst_multiplier: 1.25,

            obstacle_speed_per_difficulty: 15.0,
            obstacle_speed_per_thrust: 12.0,
            obstacle_drift_per_difficulty: 3.0,
            obstacle_wobble_rate: 0.003,

            shard_speed_factor: 0.8,
            shard_drift_rate: 0.004,
            shard_bob_amplitude: 14.0,

            drone_speed_factor: 0.7,
        }
    }
}

/// Energy, combo and reward economy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyTuning {
    /// Energy lost per millisecond
    pub energy_drain_per_ms: f64,
    /// Energy regained per millisecond per combo point
    pub energy_regen_per_combo_ms: f64,
    pub burst_enter_energy: f64,
    pub burst_exit_energy: f64,
    pub critical_energy: f64,

    pub obstacle_neutralize_energy: f64,
    pub obstacle_neutralize_combo: f64,
    pub drone_neutralize_energy: f64,
    pub drone_hit_damage: f64,

    pub shard_energy: f64,
    /// Pickup healing may overshoot the energy cap by this much until the clamp
    pub shard_energy_ceiling: f64,
    pub shard_combo: f64,
    pub shard_reward_base: f64,
    pub shard_reward_per_combo: f64,

    pub magnet_base_radius: f64,
    pub magnet_per_rank: f64,

    pub combo_decay_delay_ms: f64,
    pub combo_decay_delay_per_focus_ms: f64,
    /// Combo lost per millisecond once decay starts
    pub combo_decay_per_ms: f64,

    pub dash_cooldown_ms: f64,
    pub dash_cooldown_per_flux_ms: f64,
    pub dash_energy_cost: f64,
    pub dash_combo: f64,

    /// Seconds of immunity granted per shield rank at run start
    pub shield_ms_per_rank: f64,

    /// Score = round(distance + run_shards * score_per_shard * combo)
    pub score_per_shard: f64,
    /// Payout = round(run_shards * (1 + combo * payout_per_combo))
    pub payout_per_combo: f64,
}

impl Default for EconomyTuning {
    fn default() -> Self {
        Self {
            energy_drain_per_ms: 0.01,
            energy_regen_per_combo_ms: 0.003,
            burst_enter_energy: 90.0,
            burst_exit_energy: 30.0,
            critical_energy: 10.0,

            obstacle_neutralize_energy: 12.0,
            obstacle_neutralize_combo: 0.5,
            drone_neutralize_energy: 8.0,
            drone_hit_damage: 25.0,

            shard_energy: 4.0,
            shard_energy_ceiling: 110.0,
            shard_combo: 0.15,
            shard_reward_base: 1.0,
            shard_reward_per_combo: 0.2,

            magnet_base_radius: 40.0,
            magnet_per_rank: 8.0,

            combo_decay_delay_ms: 2200.0,
            combo_decay_delay_per_focus_ms: 420.0,
            combo_decay_per_ms: 0.01 / 16.0,

            dash_cooldown_ms: 1200.0,
            dash_cooldown_per_flux_ms: 120.0,
            dash_energy_cost: 6.0,
            dash_combo: 0.2,

            shield_ms_per_rank: 1000.0,

            score_per_shard: 25.0,
            payout_per_combo: 0.1,
        }
    }
}

/// Difficulty escalation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyTuning {
    /// Difficulty gained per millisecond of run time
    pub rate_per_ms: f64,
    /// Difficulty points per displayed level
    pub points_per_level: f64,
    pub max_level: u32,
}

impl Default for DifficultyTuning {
    fn default() -> Self {
        Self {
            rate_per_ms: 0.0045,
            points_per_level: 4.0,
            max_level: 10,
        }
    }
}

/// Complete balance table
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub spawn: SpawnTuning,
    pub motion: MotionTuning,
    pub economy: EconomyTuning,
    pub difficulty: DifficultyTuning,
}

impl Tuning {
    /// Parse a (possibly partial) tuning document over the defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would break the simulation's invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.economy.burst_exit_energy >= self.economy.burst_enter_energy {
            return Err(TuningError::Invalid(format!(
                "burst_exit_energy ({}) must be below burst_enter_energy ({})",
                self.economy.burst_exit_energy, self.economy.burst_enter_energy
            )));
        }
        if self.difficulty.rate_per_ms < 0.0 {
            return Err(TuningError::Invalid(
                "difficulty rate_per_ms must not be negative".to_string(),
            ));
        }
        if self.difficulty.points_per_level <= 0.0 {
            return Err(TuningError::Invalid(
                "difficulty points_per_level must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_document_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "motion": { "base_speed": 300.0 } }"#).unwrap();
        assert_eq!(tuning.motion.base_speed, 300.0);
        assert_eq!(tuning.motion.burst_multiplier, 1.25);
        assert_eq!(tuning.spawn, SpawnTuning::default());
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(Tuning::from_json("{}").unwrap(), Tuning::default());
    }

    #[test]
    fn test_malformed_document() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_inverted_hysteresis_rejected() {
        let json = r#"{ "economy": { "burst_enter_energy": 20.0 } }"#;
        assert!(matches!(
            Tuning::from_json(json),
            Err(TuningError::Invalid(_))
        ));
    }
}
