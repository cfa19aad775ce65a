//! Motion integration
//!
//! Advances the player toward its target lane, runs the dash/shield clocks
//! down, moves every entity by the elapsed time and recomputes the derived
//! distance and score.

use super::state::{Loadout, Player, RunState, Viewport};
use crate::consts::{LANE_EASE, LANES};
use crate::tuning::{EconomyTuning, MotionTuning, Tuning};

/// Global scroll speed in pixels per second
pub fn travel_speed(difficulty: f64, loadout: &Loadout, burst: bool, motion: &MotionTuning) -> f64 {
    let speed = motion.base_speed
        + difficulty * motion.travel_per_difficulty
        + loadout.thrust as f64 * motion.travel_per_thrust;
    if burst {
        speed * motion.burst_multiplier
    } else {
        speed
    }
}

/// Score is derived from scratch every frame rather than accumulated
pub fn derived_score(distance: f64, run_shards: f64, combo: f64, economy: &EconomyTuning) -> u64 {
    (distance + run_shards * economy.score_per_shard * combo)
        .round()
        .max(0.0) as u64
}

/// Lane whose centerline is closest to `x`
pub fn nearest_lane(x: f64, viewport: &Viewport) -> u8 {
    let spacing = viewport.width / (LANES as f64 + 1.0);
    crate::clamp_lane((x / spacing - 1.0).round() as i32)
}

/// Exponential approach toward the target lane. Closes a fixed fraction of the
/// gap each frame, so the lane index (not x) is what hit tests compare.
pub fn ease_player(player: &mut Player, viewport: &Viewport) {
    let target_x = viewport.lane_x(player.target_lane);
    player.pos.x += (target_x - player.pos.x) * LANE_EASE;
    player.pos.y = viewport.player_y();
    player.lane = nearest_lane(player.pos.x, viewport);
}

/// Count the dash and shield clocks down. No floor: anything <= 0 is inactive.
pub fn tick_player_timers(player: &mut Player, dt: f64) {
    if player.dash > 0.0 {
        player.dash -= dt;
    }
    if player.shield > 0.0 {
        player.shield -= dt;
    }
}

/// Run one integration step
pub fn integrate(run: &mut RunState, loadout: &Loadout, tuning: &Tuning, dt: f64) {
    let viewport = run.viewport;
    let secs = dt / 1000.0;

    ease_player(&mut run.player, &viewport);
    tick_player_timers(&mut run.player, dt);

    let travel = travel_speed(run.difficulty, loadout, run.burst, &tuning.motion);
    run.travel_speed = travel;
    run.distance += travel * secs;
    run.score = derived_score(run.distance, run.run_shards, run.combo, &tuning.economy);

    let motion = &tuning.motion;
    let obstacle_drift = run.difficulty * motion.obstacle_drift_per_difficulty;
    for obstacle in &mut run.obstacles {
        obstacle.x -= (obstacle.speed + obstacle_drift) * secs;
        obstacle.wobble += dt * motion.obstacle_wobble_rate;
    }

    let shard_row = viewport.height * 0.5;
    for shard in &mut run.shards {
        shard.drift += dt * motion.shard_drift_rate;
        shard.pos.y = shard_row + shard.y_offset + shard.drift.sin() * motion.shard_bob_amplitude;
        shard.pos.x -= travel * motion.shard_speed_factor * secs;
    }

    for drone in &mut run.drones {
        drone.pos.x -= travel * motion.drone_speed_factor * secs;
        drone.timer += dt;
        drone.pos.y += (drone.timer * drone.frequency).sin() * (drone.amplitude * secs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Drone, Obstacle, Shard};
    use glam::DVec2;

    fn running_state() -> RunState {
        let mut run = RunState::new(Viewport::default());
        run.running = true;
        run
    }

    #[test]
    fn test_travel_speed_base_case() {
        let motion = MotionTuning::default();
        assert_eq!(travel_speed(0.0, &Loadout::default(), false, &motion), 260.0);
    }

    #[test]
    fn test_travel_speed_scaling() {
        let motion = MotionTuning::default();
        let loadout = Loadout {
            thrust: 2,
            ..Default::default()
        };
        // 260 + 10 * 6 + 2 * 18
        assert_eq!(travel_speed(10.0, &loadout, false, &motion), 356.0);
        assert_eq!(travel_speed(10.0, &loadout, true, &motion), 445.0);
    }

    #[test]
    fn test_player_eases_without_snapping() {
        let viewport = Viewport::default();
        let mut player = Player::new(&viewport);
        player.target_lane = 2;
        let start = player.pos.x;
        let target = viewport.lane_x(2);

        ease_player(&mut player, &viewport);
        let first_step = player.pos.x - start;
        assert!((first_step - (target - start) * 0.12).abs() < 1e-9);

        for _ in 0..200 {
            ease_player(&mut player, &viewport);
        }
        assert!(player.pos.x < target);
        assert!(target - player.pos.x < 1e-6);
        assert_eq!(player.lane, 2);
    }

    #[test]
    fn test_lane_commits_past_midpoint() {
        let viewport = Viewport::default();
        let mut player = Player::new(&viewport);
        player.target_lane = 0;
        ease_player(&mut player, &viewport);
        assert_eq!(player.lane, 1);
        for _ in 0..10 {
            ease_player(&mut player, &viewport);
        }
        assert_eq!(player.lane, 0);
    }

    #[test]
    fn test_timers_may_go_negative() {
        let viewport = Viewport::default();
        let mut player = Player::new(&viewport);
        player.dash = 10.0;
        player.shield = 5.0;
        tick_player_timers(&mut player, 16.0);
        assert_eq!(player.dash, -6.0);
        assert_eq!(player.shield, -11.0);
        assert!(!player.is_immune());
        tick_player_timers(&mut player, 16.0);
        assert_eq!(player.dash, -6.0);
    }

    #[test]
    fn test_one_second_of_distance() {
        let mut run = running_state();
        let tuning = Tuning::default();
        integrate(&mut run, &Loadout::default(), &tuning, 1000.0);
        assert!((run.distance - 260.0).abs() < 1e-9);
        assert_eq!(run.score, 260);
    }

    #[test]
    fn test_score_is_derived() {
        let mut run = running_state();
        run.run_shards = 2.0;
        run.combo = 2.0;
        integrate(&mut run, &Loadout::default(), &Tuning::default(), 0.0);
        assert_eq!(run.score, 100);
    }

    #[test]
    fn test_entities_move_left() {
        let mut run = running_state();
        run.obstacles.push(Obstacle {
            lane: 0,
            x: 1000.0,
            size: 40.0,
            speed: 300.0,
            wobble: 0.0,
        });
        run.shards.push(Shard {
            lane: 0,
            pos: DVec2::new(1000.0, 360.0),
            y_offset: 0.0,
            drift: 0.0,
            collected: false,
        });
        run.drones.push(Drone {
            pos: DVec2::new(1000.0, 360.0),
            timer: 0.0,
            frequency: 0.002,
            amplitude: 50.0,
        });
        integrate(&mut run, &Loadout::default(), &Tuning::default(), 500.0);

        assert!((run.obstacles[0].x - 850.0).abs() < 1e-9);
        assert!((run.obstacles[0].wobble - 1.5).abs() < 1e-9);
        // 0.8 * 260 * 0.5
        assert!((run.shards[0].pos.x - 896.0).abs() < 1e-9);
        let expected_y = 360.0 + (2.0f64).sin() * 14.0;
        assert!((run.shards[0].pos.y - expected_y).abs() < 1e-9);
        // 0.7 * 260 * 0.5
        assert!((run.drones[0].pos.x - 909.0).abs() < 1e-9);
        let expected_drone_y = 360.0 + (1.0f64).sin() * 25.0;
        assert!((run.drones[0].pos.y - expected_drone_y).abs() < 1e-9);
    }
}
