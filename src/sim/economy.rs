//! Energy and combo upkeep
//!
//! The quiet timer advances before pickups so a collected shard leaves it at
//! zero. The rest runs after collisions: the combo decays after a quiet period,
//! energy drifts (drain offset by combo regeneration) and is clamped, then the
//! burst hysteresis and low-energy warning are updated.

use super::state::{Loadout, RunState};
use crate::consts::{COMBO_MIN, ENERGY_MAX};
use crate::tuning::EconomyTuning;

/// Edge-triggered changes produced by one upkeep pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnergyTransitions {
    pub burst_entered: bool,
    pub burst_exited: bool,
    pub critical: bool,
}

/// Quiet time after a pickup before the combo starts to fall (ms)
pub fn combo_decay_delay(loadout: &Loadout, economy: &EconomyTuning) -> f64 {
    economy.combo_decay_delay_ms + loadout.focus as f64 * economy.combo_decay_delay_per_focus_ms
}

/// Advance the time since the last pickup
#[inline]
pub fn advance_quiet_timer(run: &mut RunState, dt: f64) {
    run.combo_decay += dt;
}

/// Bleed combo once the quiet timer runs past the delay
pub fn decay_combo(run: &mut RunState, loadout: &Loadout, economy: &EconomyTuning, dt: f64) {
    if run.combo_decay > combo_decay_delay(loadout, economy) && run.combo > COMBO_MIN {
        run.combo = (run.combo - economy.combo_decay_per_ms * dt).max(COMBO_MIN);
    }
}

/// Drain/regenerate energy and clamp it to 0..=100
pub fn drift_energy(run: &mut RunState, economy: &EconomyTuning, dt: f64) {
    let drained = run.energy - economy.energy_drain_per_ms * dt
        + run.combo * economy.energy_regen_per_combo_ms * dt;
    run.energy = drained.clamp(0.0, ENERGY_MAX);
}

/// Two-state burst hysteresis plus the one-shot low-energy warning
pub fn update_burst(run: &mut RunState, economy: &EconomyTuning) -> EnergyTransitions {
    let mut transitions = EnergyTransitions::default();

    if run.energy <= economy.critical_energy && !run.burst {
        if !run.critical_warned {
            run.critical_warned = true;
            transitions.critical = true;
        }
    } else if run.energy > economy.critical_energy {
        run.critical_warned = false;
    }

    if run.energy >= economy.burst_enter_energy && !run.burst {
        run.burst = true;
        transitions.burst_entered = true;
    }
    if run.energy < economy.burst_exit_energy && run.burst {
        run.burst = false;
        transitions.burst_exited = true;
    }
    transitions
}

/// Full upkeep pass for one frame
pub fn upkeep(
    run: &mut RunState,
    loadout: &Loadout,
    economy: &EconomyTuning,
    dt: f64,
) -> EnergyTransitions {
    decay_combo(run, loadout, economy, dt);
    drift_energy(run, economy, dt);
    update_burst(run, economy)
}
