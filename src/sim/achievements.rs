//! Achievements
//!
//! A fixed, ordered list of feats judged against the live run every frame.
//! Predicates only look at run state, never at the profile, so each run earns
//! them on its own merits. Once unlocked a feat is never checked again.

use super::state::RunState;
use crate::consts::ENERGY_MAX;
use crate::profile::Profile;

/// One catalog entry
#[derive(Clone, Copy)]
pub struct Achievement {
    /// Profile key
    pub key: &'static str,
    pub label: &'static str,
    pub condition: fn(&RunState) -> bool,
}

pub static ACHIEVEMENTS: [Achievement; 6] = [
    Achievement {
        key: "firstRun",
        label: "Boot Sequence",
        condition: |run| run.distance > 200.0,
    },
    Achievement {
        key: "shard10",
        label: "Pocket Miner",
        condition: |run| run.run_shards >= 10.0,
    },
    Achievement {
        key: "combo4",
        label: "Combo Reactor",
        condition: |run| run.combo >= 4.0,
    },
    Achievement {
        key: "droneDodger",
        label: "Drone Whisperer",
        condition: |run| run.score >= 2400,
    },
    Achievement {
        key: "burst",
        label: "Overclocked",
        condition: |run| run.burst,
    },
    Achievement {
        key: "perfect",
        label: "Untouchable",
        condition: |run| run.score >= 5000 && run.energy >= ENERGY_MAX,
    },
];

/// Unlock every feat the run currently satisfies. Returns the newly unlocked
/// entries in catalog order.
pub fn evaluate(run: &RunState, profile: &mut Profile) -> Vec<&'static Achievement> {
    let mut unlocked = Vec::new();
    for achievement in &ACHIEVEMENTS {
        if profile.is_unlocked(achievement.key) {
            continue;
        }
        if (achievement.condition)(run) && profile.unlock(achievement.key) {
            log::info!("Feat unlocked: {}", achievement.label);
            unlocked.push(achievement);
        }
    }
    unlocked
}

/// Label and unlocked flag for each feat, for the achievements panel
pub fn board(profile: &Profile) -> Vec<(&'static str, bool)> {
    ACHIEVEMENTS
        .iter()
        .map(|a| (a.label, profile.is_unlocked(a.key)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Viewport;

    fn running_state() -> RunState {
        let mut run = RunState::new(Viewport::default());
        run.running = true;
        run
    }

    #[test]
    fn test_fresh_run_unlocks_nothing() {
        let mut run = running_state();
        run.energy = 50.0;
        let mut profile = Profile::default();
        assert!(evaluate(&run, &mut profile).is_empty());
        assert!(profile.achievements.is_empty());
    }

    #[test]
    fn test_unlocks_once() {
        let mut run = running_state();
        run.distance = 250.0;
        let mut profile = Profile::default();

        let first = evaluate(&run, &mut profile);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].key, "firstRun");
        assert!(profile.is_unlocked("firstRun"));

        assert!(evaluate(&run, &mut profile).is_empty());
    }

    #[test]
    fn test_multiple_in_catalog_order() {
        let mut run = running_state();
        run.combo = 4.5;
        run.burst = true;
        run.run_shards = 12.0;
        let mut profile = Profile::default();
        let keys: Vec<&str> = evaluate(&run, &mut profile).iter().map(|a| a.key).collect();
        assert_eq!(keys, vec!["shard10", "combo4", "burst"]);
    }

    #[test]
    fn test_perfect_requires_full_energy() {
        let mut run = running_state();
        run.score = 5200;
        run.energy = 99.0;
        let mut profile = Profile::default();
        let keys: Vec<&str> = evaluate(&run, &mut profile).iter().map(|a| a.key).collect();
        assert_eq!(keys, vec!["droneDodger"]);

        run.energy = 100.0;
        let keys: Vec<&str> = evaluate(&run, &mut profile).iter().map(|a| a.key).collect();
        assert_eq!(keys, vec!["perfect"]);
    }

    #[test]
    fn test_board_reflects_profile() {
        let mut profile = Profile::default();
        profile.unlock("burst");
        let board = board(&profile);
        assert_eq!(board.len(), 6);
        assert_eq!(board[0], ("Boot Sequence", false));
        assert_eq!(board[4], ("Overclocked", true));
        assert_eq!(board[2], ("Combo Reactor", false));
    }
}
