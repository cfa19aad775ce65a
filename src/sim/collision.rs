//! Collision detection and response
//!
//! Obstacles and drones resolve at most one contact per frame: the first
//! qualifying entity in collection order wins and the rest of the checks are
//! skipped. Simultaneous overlaps therefore play out over successive frames.
//! Shards have no such limit; every shard in magnet range is collected.

use glam::DVec2;

use super::state::{Drone, Loadout, Obstacle, Player, RunState, Shard};
use crate::bump_combo;
use crate::consts::{DRONE_HIT_RADIUS, ENERGY_MAX, OFF_SCENE_X};
use crate::tuning::EconomyTuning;

/// Outcome of the per-frame hazard check
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    /// Nothing touched the player
    Clear,
    /// An immune player smashed an obstacle
    ObstacleNeutralized { index: usize },
    /// Unprotected obstacle hit; the run is over
    ObstacleImpact { index: usize },
    /// An immune player smashed a drone
    DroneNeutralized { index: usize },
    /// Unprotected drone hit; costs energy and may end the run
    DroneImpact { index: usize, lethal: bool },
}

impl Contact {
    /// Whether this contact ends the run
    pub fn is_lethal(&self) -> bool {
        matches!(
            self,
            Contact::ObstacleImpact { .. } | Contact::DroneImpact { lethal: true, .. }
        )
    }
}

/// Same-lane horizontal overlap between an obstacle and the player
#[inline]
pub fn obstacle_overlaps(obstacle: &Obstacle, player: &Player, anchor: DVec2) -> bool {
    obstacle.lane == player.lane
        && (obstacle.x - anchor.x).abs() < obstacle.size * 0.5 + player.radius
}

#[inline]
pub fn drone_overlaps(drone: &Drone, anchor: DVec2) -> bool {
    drone.pos.distance(anchor) < DRONE_HIT_RADIUS
}

/// Pickup radius around the player's lane anchor
#[inline]
pub fn magnet_radius(loadout: &Loadout, economy: &EconomyTuning) -> f64 {
    economy.magnet_base_radius + loadout.magnet as f64 * economy.magnet_per_rank
}

#[inline]
pub fn shard_in_reach(shard: &Shard, anchor: DVec2, reach: f64) -> bool {
    !shard.collected && shard.pos.distance(anchor) < reach
}

/// Apply a collected shard's effects. Energy may overshoot the cap here; the
/// end-of-frame clamp brings it back.
pub fn collect_shard(run: &mut RunState, index: usize, economy: &EconomyTuning) {
    let shard = &mut run.shards[index];
    shard.collected = true;
    let reward = economy.shard_reward_base + run.combo * economy.shard_reward_per_combo;
    run.run_shards += reward;
    run.combo = bump_combo(run.combo, economy.shard_combo);
    run.energy = (run.energy + economy.shard_energy).min(economy.shard_energy_ceiling);
    run.combo_decay = 0.0;
}

/// Collect every uncollected shard within reach. Returns how many were taken.
pub fn collect_shards(run: &mut RunState, loadout: &Loadout, economy: &EconomyTuning) -> usize {
    let anchor = run.player.anchor(&run.viewport);
    let reach = run.player.radius + magnet_radius(loadout, economy);
    let mut collected = 0;
    for index in 0..run.shards.len() {
        if shard_in_reach(&run.shards[index], anchor, reach) {
            collect_shard(run, index, economy);
            collected += 1;
        }
    }
    collected
}

/// Find and resolve the first obstacle contact, or failing that the first
/// drone contact.
pub fn resolve_hazards(run: &mut RunState, economy: &EconomyTuning) -> Contact {
    let anchor = run.player.anchor(&run.viewport);
    let immune = run.player.is_immune();

    let hit = run
        .obstacles
        .iter()
        .position(|ob| obstacle_overlaps(ob, &run.player, anchor));
    if let Some(index) = hit {
        if immune {
            run.energy = (run.energy + economy.obstacle_neutralize_energy).min(ENERGY_MAX);
            run.combo = bump_combo(run.combo, economy.obstacle_neutralize_combo);
            run.obstacles[index].x = OFF_SCENE_X;
            return Contact::ObstacleNeutralized { index };
        }
        return Contact::ObstacleImpact { index };
    }

    let hit = run.drones.iter().position(|dr| drone_overlaps(dr, anchor));
    if let Some(index) = hit {
        if immune {
            run.energy = (run.energy + economy.drone_neutralize_energy).min(ENERGY_MAX);
            run.drones[index].pos.x = OFF_SCENE_X;
            return Contact::DroneNeutralized { index };
        }
        run.energy -= economy.drone_hit_damage;
        return Contact::DroneImpact {
            index,
            lethal: run.energy <= 0.0,
        };
    }

    Contact::Clear
}

/// Drop entities that scrolled past the player, were collected, or were neutralized
pub fn cleanup(run: &mut RunState) {
    run.obstacles.retain(|ob| ob.x > -ob.size * 2.0);
    run.shards.retain(|sh| !sh.collected && sh.pos.x > -20.0);
    run.drones.retain(|dr| dr.pos.x > -120.0);
}
