//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame time is the only clock
//! - Seeded RNG only
//! - Stable iteration order (collection order)
//! - No rendering, input or storage dependencies

pub mod achievements;
pub mod collision;
pub mod difficulty;
pub mod economy;
pub mod kinematics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use achievements::{ACHIEVEMENTS, Achievement};
pub use collision::Contact;
pub use economy::EnergyTransitions;
pub use spawn::SpawnReport;
pub use state::{Drone, Loadout, Obstacle, Player, RunState, Shard, SpawnTimers, Viewport};
pub use tick::{FrameReport, tick};
