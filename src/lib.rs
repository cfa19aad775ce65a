//! Neon Rift - A lane-based endless runner
//!
//! Core modules:
//! - `sim`: Per-frame simulation (spawning, motion, collisions, economy)
//! - `game`: Run lifecycle and the command surface used by input/render layers
//! - `profile`: Persistent currency, best score, upgrades and achievements
//! - `persistence`: Profile storage backends
//! - `upgrades`: Static upgrade catalog
//! - `tuning`: Data-driven game balance

pub mod game;
pub mod persistence;
pub mod profile;
pub mod sim;
pub mod tuning;
pub mod upgrades;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use game::{Game, GameEvent, HudSnapshot};
pub use profile::Profile;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Number of discrete lanes
    pub const LANES: u8 = 3;

    /// Default viewport (overridden by `Game::resize`)
    pub const DEFAULT_WIDTH: f64 = 1280.0;
    pub const DEFAULT_HEIGHT: f64 = 720.0;

    /// Player sits at this fraction of the viewport height
    pub const PLAYER_ROW: f64 = 0.75;
    pub const PLAYER_RADIUS: f64 = 22.0;
    /// Fraction of the remaining gap closed per frame when changing lanes
    pub const LANE_EASE: f64 = 0.12;
    /// Lane the player starts each run in
    pub const START_LANE: u8 = 1;

    /// Euclidean distance at which a drone touches the player
    pub const DRONE_HIT_RADIUS: f64 = 40.0;

    /// Where neutralized entities are parked until cleanup drops them
    pub const OFF_SCENE_X: f64 = -999.0;

    /// Energy bounds
    pub const ENERGY_MAX: f64 = 100.0;
    /// Combo multiplier bounds
    pub const COMBO_MIN: f64 = 1.0;
    pub const COMBO_MAX: f64 = 9.0;

    /// Durable key the profile record is stored under
    pub const PROFILE_KEY: &str = "neon-rift-profile-v1";
}

/// Canonical x coordinate of a lane's centerline for a viewport width
#[inline]
pub fn lane_x(lane: u8, width: f64) -> f64 {
    let spacing = width / (consts::LANES as f64 + 1.0);
    spacing * (lane as f64 + 1.0)
}

/// Clamp a lane index (as a signed value) into the valid range
#[inline]
pub fn clamp_lane(lane: i32) -> u8 {
    lane.clamp(0, consts::LANES as i32 - 1) as u8
}

/// Add to the combo multiplier, keeping it within its bounds
#[inline]
pub fn bump_combo(combo: f64, amount: f64) -> f64 {
    (combo + amount).clamp(consts::COMBO_MIN, consts::COMBO_MAX)
}
