//! Run state and entity types
//!
//! Everything here is transient: a run owns it and `RunState::new` rebuilds it
//! from scratch at every start.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::lane_x;
use crate::profile::Profile;
use crate::tuning::Tuning;
use crate::upgrades::UpgradeKind;

/// Screen dimensions the simulation lays lanes out against
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    #[inline]
    pub fn lane_x(&self, lane: u8) -> f64 {
        lane_x(lane, self.width)
    }

    /// Row the player travels along
    #[inline]
    pub fn player_y(&self) -> f64 {
        self.height * PLAYER_ROW
    }
}

/// Upgrade ranks as seen by the simulation for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loadout {
    pub thrust: u32,
    pub focus: u32,
    pub magnet: u32,
    pub shield: u32,
    pub flux: u32,
}

impl Loadout {
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            thrust: profile.rank(UpgradeKind::Thrust),
            focus: profile.rank(UpgradeKind::Focus),
            magnet: profile.rank(UpgradeKind::Magnet),
            shield: profile.rank(UpgradeKind::Shield),
            flux: profile.rank(UpgradeKind::Flux),
        }
    }
}

/// The player's runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Lane the player currently occupies (used for every hit test)
    pub lane: u8,
    /// Lane the player is moving toward
    pub target_lane: u8,
    /// Eased position; x approaches the target lane but never lands on it exactly
    pub pos: DVec2,
    pub radius: f64,
    /// Dash time remaining (ms). Doubles as the dash cooldown; active while > 0.
    pub dash: f64,
    /// Shield time remaining (ms); immune while > 0
    pub shield: f64,
}

impl Player {
    pub fn new(viewport: &Viewport) -> Self {
        Self {
            lane: START_LANE,
            target_lane: START_LANE,
            pos: DVec2::new(viewport.lane_x(START_LANE), viewport.player_y()),
            radius: PLAYER_RADIUS,
            dash: 0.0,
            shield: 0.0,
        }
    }

    #[inline]
    pub fn dash_active(&self) -> bool {
        self.dash > 0.0
    }

    #[inline]
    pub fn shield_active(&self) -> bool {
        self.shield > 0.0
    }

    /// Dash or shield makes the player immune and turns hits into neutralizations
    #[inline]
    pub fn is_immune(&self) -> bool {
        self.dash_active() || self.shield_active()
    }

    /// Point hit tests are measured from: the lane centerline, not the eased x
    #[inline]
    pub fn anchor(&self, viewport: &Viewport) -> DVec2 {
        DVec2::new(viewport.lane_x(self.lane), self.pos.y)
    }
}

/// A lane-bound barrier scrolling toward the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub lane: u8,
    pub x: f64,
    pub size: f64,
    /// Scroll speed fixed at spawn (pixels per second)
    pub speed: f64,
    /// Cosmetic wobble phase
    pub wobble: f64,
}

/// A collectible shard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shard {
    pub lane: u8,
    pub pos: DVec2,
    /// Vertical offset around the screen middle, fixed at spawn
    pub y_offset: f64,
    /// Bobbing phase
    pub drift: f64,
    pub collected: bool,
}

/// A roaming hazard drone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Drone {
    pub pos: DVec2,
    /// Lifetime clock (ms) driving the vertical oscillation
    pub timer: f64,
    pub frequency: f64,
    pub amplitude: f64,
}

/// Frame-time accumulators for the three spawners
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimers {
    pub obstacle: f64,
    pub shard: f64,
    pub drone: f64,
}

/// Complete state of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    pub running: bool,
    pub viewport: Viewport,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub shards: Vec<Shard>,
    pub drones: Vec<Drone>,
    pub timers: SpawnTimers,

    /// Derived each frame from distance, shards and combo
    pub score: u64,
    /// 0..=100 after every frame
    pub energy: f64,
    /// 1..=9
    pub combo: f64,
    /// Time since the last pickup (ms)
    pub combo_decay: f64,
    pub distance: f64,
    /// Fractional shard reward gathered this run
    pub run_shards: f64,
    /// Raw difficulty scalar, grows with run time
    pub difficulty: f64,
    /// Presentation level derived from difficulty
    pub level: u32,
    pub burst: bool,
    /// Set once the low-energy warning fired; re-armed above the threshold
    pub critical_warned: bool,
    /// Travel speed used by the last frame (pixels per second)
    pub travel_speed: f64,
}

impl RunState {
    /// Fresh run state. The run is not started until `running` is set.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            running: false,
            viewport,
            player: Player::new(&viewport),
            obstacles: Vec::new(),
            shards: Vec::new(),
            drones: Vec::new(),
            timers: SpawnTimers::default(),
            score: 0,
            energy: ENERGY_MAX,
            combo: COMBO_MIN,
            combo_decay: 0.0,
            distance: 0.0,
            run_shards: 0.0,
            difficulty: 0.0,
            level: 1,
            burst: false,
            critical_warned: false,
            travel_speed: 0.0,
        }
    }

    /// Reset everything for a new run and mark it running
    pub fn start(&mut self, loadout: &Loadout, tuning: &Tuning) {
        *self = Self::new(self.viewport);
        self.player.shield = loadout.shield as f64 * tuning.economy.shield_ms_per_rank;
        self.running = true;
    }

    /// Shift the target lane by one step, clamped to the lane range
    pub fn shift_target_lane(&mut self, direction: i32) {
        let step = direction.signum();
        self.player.target_lane = crate::clamp_lane(self.player.target_lane as i32 + step);
    }

    /// Shard payout for ending the run now
    pub fn payout(&self, tuning: &Tuning) -> u64 {
        let multiplier = 1.0 + self.combo * tuning.economy.payout_per_combo;
        (self.run_shards * multiplier).round().max(0.0) as u64
    }
}
