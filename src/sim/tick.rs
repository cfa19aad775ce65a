//! Variable timestep simulation tick
//!
//! One strictly ordered pass per display frame:
//! spawn -> integrate -> quiet timer -> pickups -> hazards -> upkeep -> cleanup
//! -> difficulty.

use rand::Rng;

use super::collision::{self, Contact};
use super::difficulty;
use super::economy::{self, EnergyTransitions};
use super::kinematics;
use super::spawn::{self, SpawnReport};
use super::state::{Loadout, RunState};
use crate::tuning::Tuning;

/// What happened during one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub spawned: SpawnReport,
    pub shards_collected: usize,
    pub contact: Contact,
    pub energy: EnergyTransitions,
    /// The frame ended the run through a lethal impact
    pub ended: bool,
}

impl Default for FrameReport {
    fn default() -> Self {
        Self {
            spawned: SpawnReport::default(),
            shards_collected: 0,
            contact: Contact::Clear,
            energy: EnergyTransitions::default(),
            ended: false,
        }
    }
}

/// Frame times that are negative or not finite count as zero
#[inline]
pub fn sanitize_dt(elapsed_ms: f64) -> f64 {
    if elapsed_ms.is_finite() && elapsed_ms > 0.0 {
        elapsed_ms
    } else {
        0.0
    }
}

/// Advance a running run by `elapsed_ms`. Does nothing if the run is not running.
///
/// The run is left marked as running even when `ended` is reported; closing it
/// out (payout, best score, persistence) belongs to the caller.
pub fn tick<R: Rng>(
    run: &mut RunState,
    loadout: &Loadout,
    tuning: &Tuning,
    rng: &mut R,
    elapsed_ms: f64,
) -> FrameReport {
    if !run.running {
        return FrameReport::default();
    }
    let dt = sanitize_dt(elapsed_ms);

    let spawned = spawn::advance_spawners(run, loadout, tuning, rng, dt);
    kinematics::integrate(run, loadout, tuning, dt);
    economy::advance_quiet_timer(run, dt);

    let shards_collected = collision::collect_shards(run, loadout, &tuning.economy);
    let contact = collision::resolve_hazards(run, &tuning.economy);

    let energy = economy::upkeep(run, loadout, &tuning.economy, dt);
    collision::cleanup(run);

    run.difficulty = difficulty::escalate(run.difficulty, dt, &tuning.difficulty);
    run.level = difficulty::level_for(run.difficulty, &tuning.difficulty);

    FrameReport {
        spawned,
        shards_collected,
        contact,
        energy,
        ended: contact.is_lethal(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Obstacle, Shard, Viewport};
    use glam::DVec2;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn running_state() -> RunState {
        let mut run = RunState::new(Viewport::default());
        run.start(&Loadout::default(), &Tuning::default());
        run
    }

    #[test]
    fn test_idle_run_does_not_tick() {
        let mut run = RunState::new(Viewport::default());
        let mut rng = Pcg32::seed_from_u64(1);
        let report = tick(&mut run, &Loadout::default(), &Tuning::default(), &mut rng, 16.0);
        assert_eq!(report, FrameReport::default());
        assert_eq!(run.distance, 0.0);
        assert_eq!(run.difficulty, 0.0);
    }

    #[test]
    fn test_one_second_base_case() {
        let mut run = running_state();
        let mut rng = Pcg32::seed_from_u64(7);
        let report = tick(&mut run, &Loadout::default(), &Tuning::default(), &mut rng, 1000.0);
        assert!(!report.ended);
        assert!((run.distance - 260.0).abs() < 1e-9);
        assert_eq!(run.score, run.distance.round() as u64);
        assert!((run.difficulty - 4.5).abs() < 1e-12);
        assert_eq!(run.level, 2);
    }

    #[test]
    fn test_bad_frame_times_are_ignored() {
        let mut run = running_state();
        let mut rng = Pcg32::seed_from_u64(1);
        for dt in [f64::NAN, f64::INFINITY, -50.0] {
            tick(&mut run, &Loadout::default(), &Tuning::default(), &mut rng, dt);
        }
        assert_eq!(run.distance, 0.0);
        assert_eq!(run.energy, 100.0);
    }

    #[test]
    fn test_obstacle_impact_ends_run() {
        let mut run = running_state();
        let x = run.player.anchor(&run.viewport).x;
        run.obstacles.push(Obstacle {
            lane: run.player.lane,
            x,
            size: 40.0,
            speed: 0.0,
            wobble: 0.0,
        });
        let mut rng = Pcg32::seed_from_u64(1);
        let report = tick(&mut run, &Loadout::default(), &Tuning::default(), &mut rng, 16.0);
        assert!(report.ended);
        assert_eq!(report.contact, Contact::ObstacleImpact { index: 0 });
    }

    #[test]
    fn test_neutralized_obstacle_is_cleaned_up_same_frame() {
        let mut run = running_state();
        run.player.dash = 500.0;
        let x = run.player.anchor(&run.viewport).x;
        run.obstacles.push(Obstacle {
            lane: run.player.lane,
            x,
            size: 40.0,
            speed: 0.0,
            wobble: 0.0,
        });
        let mut rng = Pcg32::seed_from_u64(1);
        let report = tick(&mut run, &Loadout::default(), &Tuning::default(), &mut rng, 16.0);
        assert!(!report.ended);
        assert_eq!(report.contact, Contact::ObstacleNeutralized { index: 0 });
        assert!(run.obstacles.is_empty());
    }

    #[test]
    fn test_pickup_leaves_quiet_timer_at_zero() {
        let mut run = running_state();
        run.combo = 2.0;
        run.combo_decay = 1500.0;
        let anchor = run.player.anchor(&run.viewport);
        let y_offset = anchor.y - run.viewport.height * 0.5;
        run.shards.push(Shard {
            lane: run.player.lane,
            pos: DVec2::new(anchor.x, anchor.y),
            y_offset,
            drift: 0.0,
            collected: false,
        });
        let mut rng = Pcg32::seed_from_u64(1);
        let report = tick(&mut run, &Loadout::default(), &Tuning::default(), &mut rng, 16.0);

        assert_eq!(report.shards_collected, 1);
        assert_eq!(run.combo_decay, 0.0);
        assert!((run.run_shards - 1.4).abs() < 1e-12);
        assert!(run.shards.is_empty());

        tick(&mut run, &Loadout::default(), &Tuning::default(), &mut rng, 16.0);
        assert_eq!(run.combo_decay, 16.0);
    }

    #[test]
    fn test_drained_energy_does_not_end_run() {
        let mut run = running_state();
        run.energy = 0.5;
        let mut rng = Pcg32::seed_from_u64(3);
        let report = tick(&mut run, &Loadout::default(), &Tuning::default(), &mut rng, 1000.0);
        assert!(!report.ended);
        assert!(run.running);
        assert_eq!(run.energy, 0.0);
    }

    #[test]
    fn test_determinism() {
        // Two runs with the same seed and frame times stay identical
        let tuning = Tuning::default();
        let mut run1 = running_state();
        let mut run2 = running_state();
        let mut rng1 = Pcg32::seed_from_u64(99999);
        let mut rng2 = Pcg32::seed_from_u64(99999);

        for i in 0..600 {
            let dt = 12.0 + (i % 7) as f64;
            tick(&mut run1, &Loadout::default(), &tuning, &mut rng1, dt);
            tick(&mut run2, &Loadout::default(), &tuning, &mut rng2, dt);
        }

        assert_eq!(run1.running, run2.running);
        assert_eq!(run1.score, run2.score);
        assert_eq!(run1.obstacles.len(), run2.obstacles.len());
        assert_eq!(run1.energy.to_bits(), run2.energy.to_bits());
        assert_eq!(run1.distance.to_bits(), run2.distance.to_bits());
    }

    proptest! {
        // Short viewport and a full magnet put the shard row within reach, and a
        // standing shield keeps the run alive so pickups keep happening.
        #[test]
        fn prop_frame_invariants(
            seed in any::<u64>(),
            frames in prop::collection::vec(10.0f64..40.0, 300..500),
            dash_every in 5usize..60,
        ) {
            let tuning = Tuning::default();
            let loadout = Loadout {
                magnet: 6,
                ..Default::default()
            };
            let mut run = RunState::new(Viewport::new(800.0, 320.0));
            run.start(&loadout, &tuning);
            run.player.shield = f64::MAX;
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut last_difficulty = run.difficulty;
            let mut collected = 0;

            for (i, dt) in frames.into_iter().enumerate() {
                if i % dash_every == 0 && run.player.dash <= 0.0 {
                    run.player.dash = 1200.0;
                    run.combo = crate::bump_combo(run.combo, 0.2);
                }
                let report = tick(&mut run, &loadout, &tuning, &mut rng, dt);
                collected += report.shards_collected;

                prop_assert!(!report.ended);
                prop_assert!((0.0..=100.0).contains(&run.energy));
                prop_assert!((1.0..=9.0).contains(&run.combo));
                prop_assert!(run.difficulty >= last_difficulty);
                prop_assert_eq!(
                    run.level,
                    (1.0 + (run.difficulty / 4.0).floor()).min(10.0) as u32
                );
                if report.shards_collected > 0 {
                    prop_assert_eq!(run.combo_decay, 0.0);
                }
                last_difficulty = run.difficulty;
            }

            prop_assert!(collected > 0);
        }
    }
}
