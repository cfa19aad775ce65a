//! Entity spawning
//!
//! Three independent frame-time accumulators. When one passes its
//! difficulty-scaled interval a single entity is appended and the
//! accumulator resets to zero; leftover time is dropped, so a long stall
//! produces one late spawn instead of a burst of catch-up spawns.

use std::f64::consts::TAU;

use glam::DVec2;
use rand::Rng;

use super::state::{Drone, Loadout, Obstacle, RunState, Shard};
use crate::consts::LANES;
use crate::tuning::{MotionTuning, SpawnTuning, Tuning};

/// Milliseconds between obstacle spawns
pub fn obstacle_interval(difficulty: f64, spawn: &SpawnTuning) -> f64 {
    (spawn.obstacle_base_ms - spawn.obstacle_per_difficulty * difficulty)
        .max(spawn.obstacle_floor_ms)
}

/// Milliseconds between shard spawns
pub fn shard_interval(difficulty: f64, spawn: &SpawnTuning) -> f64 {
    (spawn.shard_base_ms - spawn.shard_per_difficulty * difficulty).max(spawn.shard_floor_ms)
}

/// Milliseconds between drone spawns
pub fn drone_interval(difficulty: f64, spawn: &SpawnTuning) -> f64 {
    spawn.drone_base_ms - (spawn.drone_per_difficulty * difficulty).min(spawn.drone_max_reduction_ms)
}

/// Which kinds spawned this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnReport {
    pub obstacle: bool,
    pub shard: bool,
    pub drone: bool,
}

/// Advance the accumulators and spawn whatever is due
pub fn advance_spawners<R: Rng>(
    run: &mut RunState,
    loadout: &Loadout,
    tuning: &Tuning,
    rng: &mut R,
    dt: f64,
) -> SpawnReport {
    let mut report = SpawnReport::default();
    run.timers.obstacle += dt;
    run.timers.shard += dt;
    run.timers.drone += dt;

    let difficulty = run.difficulty;
    if run.timers.obstacle > obstacle_interval(difficulty, &tuning.spawn) {
        let obstacle = spawn_obstacle(run, loadout, &tuning.spawn, &tuning.motion, rng);
        run.obstacles.push(obstacle);
        run.timers.obstacle = 0.0;
        report.obstacle = true;
    }
    if run.timers.shard > shard_interval(difficulty, &tuning.spawn) {
        let shard = spawn_shard(run, &tuning.spawn, rng);
        run.shards.push(shard);
        run.timers.shard = 0.0;
        report.shard = true;
    }
    if run.timers.drone > drone_interval(difficulty, &tuning.spawn) {
        let drone = spawn_drone(run, &tuning.spawn, rng);
        log::debug!("Drone spawned at y={:.0}", drone.pos.y);
        run.drones.push(drone);
        run.timers.drone = 0.0;
        report.drone = true;
    }
    report
}

fn random_lane<R: Rng>(rng: &mut R) -> u8 {
    rng.random_range(0..LANES)
}

pub fn spawn_obstacle<R: Rng>(
    run: &RunState,
    loadout: &Loadout,
    spawn: &SpawnTuning,
    motion: &MotionTuning,
    rng: &mut R,
) -> Obstacle {
    let lane = random_lane(rng);
    let size = spawn.obstacle_size_min
        + rng.random::<f64>() * spawn.obstacle_size_spread
        + run.difficulty * spawn.obstacle_size_per_difficulty;
    Obstacle {
        lane,
        x: run.viewport.width + size,
        size,
        speed: motion.base_speed
            + run.difficulty * motion.obstacle_speed_per_difficulty
            + loadout.thrust as f64 * motion.obstacle_speed_per_thrust,
        wobble: rng.random::<f64>() * TAU,
    }
}

pub fn spawn_shard<R: Rng>(run: &RunState, spawn: &SpawnTuning, rng: &mut R) -> Shard {
    let lane = random_lane(rng);
    let y_offset = (rng.random::<f64>() - 0.5) * spawn.shard_offset_spread;
    let drift = rng.random::<f64>() * TAU;
    Shard {
        lane,
        pos: DVec2::new(
            run.viewport.width + spawn.shard_spawn_margin,
            run.viewport.height * 0.5 + y_offset,
        ),
        y_offset,
        drift,
        collected: false,
    }
}

pub fn spawn_drone<R: Rng>(run: &RunState, spawn: &SpawnTuning, rng: &mut R) -> Drone {
    let height = run.viewport.height;
    let y = rng.random::<f64>() * height * 0.4 + height * 0.3;
    Drone {
        pos: DVec2::new(run.viewport.width + spawn.drone_spawn_margin, y),
        timer: 0.0,
        frequency: spawn.drone_frequency_min + rng.random::<f64>() * spawn.drone_frequency_spread,
        amplitude: spawn.drone_amplitude_min + rng.random::<f64>() * spawn.drone_amplitude_spread,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Viewport;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn running_state() -> RunState {
        let mut run = RunState::new(Viewport::default());
        run.running = true;
        run
    }

    #[test]
    fn test_intervals_at_zero_difficulty() {
        let spawn = SpawnTuning::default();
        assert_eq!(obstacle_interval(0.0, &spawn), 450.0);
        assert_eq!(shard_interval(0.0, &spawn), 600.0);
        assert_eq!(drone_interval(0.0, &spawn), 4000.0);
    }

    #[test]
    fn test_intervals_are_floored() {
        let spawn = SpawnTuning::default();
        assert_eq!(obstacle_interval(1000.0, &spawn), 180.0);
        assert_eq!(shard_interval(1000.0, &spawn), 200.0);
        assert_eq!(drone_interval(1000.0, &spawn), 1500.0);
    }

    #[test]
    fn test_nothing_spawns_before_interval() {
        let mut run = running_state();
        let mut rng = Pcg32::seed_from_u64(1);
        let report = advance_spawners(&mut run, &Loadout::default(), &Tuning::default(), &mut rng, 450.0);
        assert_eq!(report, SpawnReport::default());
        assert!(run.obstacles.is_empty());
        assert_eq!(run.timers.obstacle, 450.0);
    }

    #[test]
    fn test_spawn_resets_accumulator() {
        let mut run = running_state();
        let mut rng = Pcg32::seed_from_u64(2);
        let tuning = Tuning::default();
        advance_spawners(&mut run, &Loadout::default(), &tuning, &mut rng, 451.0);
        assert_eq!(run.obstacles.len(), 1);
        assert_eq!(run.timers.obstacle, 0.0);
        assert_eq!(run.timers.shard, 451.0);
    }

    #[test]
    fn test_long_stall_spawns_once() {
        let mut run = running_state();
        let mut rng = Pcg32::seed_from_u64(3);
        let report = advance_spawners(
            &mut run,
            &Loadout::default(),
            &Tuning::default(),
            &mut rng,
            60_000.0,
        );
        assert!(report.obstacle && report.shard && report.drone);
        assert_eq!(run.obstacles.len(), 1);
        assert_eq!(run.shards.len(), 1);
        assert_eq!(run.drones.len(), 1);
    }

    #[test]
    fn test_spawned_entities_start_off_screen() {
        let run = running_state();
        let tuning = Tuning::default();
        let loadout = Loadout {
            thrust: 2,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(4);
        for _ in 0..50 {
            let ob = spawn_obstacle(&run, &loadout, &tuning.spawn, &tuning.motion, &mut rng);
            assert!(ob.lane < LANES);
            assert!((32.0..64.0).contains(&ob.size));
            assert_eq!(ob.x, run.viewport.width + ob.size);
            assert_eq!(ob.speed, 260.0 + 24.0);

            let shard = spawn_shard(&run, &tuning.spawn, &mut rng);
            assert!(shard.y_offset.abs() <= 10.0);
            assert!(!shard.collected);

            let drone = spawn_drone(&run, &tuning.spawn, &mut rng);
            assert!(drone.pos.y >= run.viewport.height * 0.3);
            assert!(drone.pos.y <= run.viewport.height * 0.7);
            assert!((0.0015..0.0025).contains(&drone.frequency));
            assert!((45.0..100.0).contains(&drone.amplitude));
        }
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let tuning = Tuning::default();
        let mut a = running_state();
        let mut b = running_state();
        let mut rng_a = Pcg32::seed_from_u64(9);
        let mut rng_b = Pcg32::seed_from_u64(9);
        for _ in 0..20 {
            advance_spawners(&mut a, &Loadout::default(), &tuning, &mut rng_a, 500.0);
            advance_spawners(&mut b, &Loadout::default(), &tuning, &mut rng_b, 500.0);
        }
        let lanes_a: Vec<u8> = a.obstacles.iter().map(|o| o.lane).collect();
        let lanes_b: Vec<u8> = b.obstacles.iter().map(|o| o.lane).collect();
        assert_eq!(lanes_a, lanes_b);
        assert_eq!(a.obstacles.len(), 20);
    }
}
