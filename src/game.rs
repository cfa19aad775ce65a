//! Run lifecycle and command surface
//!
//! `Game` is the single context object the outside world talks to. A frame
//! driver calls `on_frame` with the elapsed time; input handlers call
//! `request_lane_change` / `request_dash`; renderers and UI panels read the
//! snapshot accessors and drain `take_events`. The profile is saved through
//! the injected store immediately after every mutation.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::bump_combo;
use crate::persistence::ProfileStore;
use crate::profile::{Profile, PurchaseError, UpgradeOffer};
use crate::sim::achievements;
use crate::sim::{
    Contact, Drone, FrameReport, Loadout, Obstacle, Player, RunState, Shard, Viewport, tick,
};
use crate::tuning::Tuning;
use crate::upgrades::UpgradeKind;

/// One-shot notifications for status lines, sounds and panels
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    RunStarted,
    RunEnded {
        score: u64,
        payout: u64,
        new_best: bool,
    },
    DashEngaged,
    ObstacleNeutralized,
    DroneNeutralized,
    DroneHit {
        energy: f64,
    },
    BurstEntered,
    BurstExited,
    EnergyCritical,
    AchievementUnlocked {
        key: &'static str,
        label: &'static str,
    },
    UpgradePurchased {
        kind: UpgradeKind,
        rank: u32,
    },
}

/// Values the HUD displays
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HudSnapshot {
    pub running: bool,
    pub score: u64,
    pub energy: f64,
    pub combo: f64,
    pub level: u32,
    pub burst: bool,
    pub dash_ready: bool,
    pub currency: u64,
    pub best_score: u64,
}

/// Simulation context: run state, profile, balance table and RNG
pub struct Game<S: ProfileStore> {
    run: RunState,
    profile: Profile,
    store: S,
    tuning: Tuning,
    rng: Pcg32,
    events: Vec<GameEvent>,
}

impl<S: ProfileStore> Game<S> {
    /// Create a game with the default balance table, loading the profile from `store`
    pub fn new(seed: u64, store: S) -> Self {
        Self::with_tuning(seed, store, Tuning::default())
    }

    pub fn with_tuning(seed: u64, store: S, tuning: Tuning) -> Self {
        let profile = store.load_profile();
        log::info!(
            "Game initialized with seed {} ({} shards, best {})",
            seed,
            profile.currency,
            profile.best_score
        );
        Self {
            run: RunState::new(Viewport::default()),
            profile,
            store,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    // === Commands ===

    /// Drive one full update pass
    pub fn on_frame(&mut self, elapsed_ms: f64) -> FrameReport {
        if !self.run.running {
            return FrameReport::default();
        }
        let loadout = Loadout::from_profile(&self.profile);
        let report = tick(&mut self.run, &loadout, &self.tuning, &mut self.rng, elapsed_ms);
        self.record_frame(&report);

        let unlocked = achievements::evaluate(&self.run, &mut self.profile);
        if !unlocked.is_empty() {
            self.persist();
            self.events
                .extend(unlocked.into_iter().map(|a| GameEvent::AchievementUnlocked {
                    key: a.key,
                    label: a.label,
                }));
        }

        if report.ended {
            self.end_run();
        }
        report
    }

    /// Shift the target lane by one step (`-1` left, `+1` right). Starts a run
    /// first if none is active. Other values are clamped to a single step.
    pub fn request_lane_change(&mut self, direction: i32) {
        if !self.run.running {
            self.start_run();
        }
        self.run.shift_target_lane(direction);
    }

    /// Start a run if none is active, otherwise dash when the cooldown allows
    pub fn request_dash(&mut self) {
        if !self.run.running {
            self.start_run();
            return;
        }
        if self.run.player.dash_active() {
            return;
        }
        let economy = &self.tuning.economy;
        let flux = self.profile.rank(UpgradeKind::Flux) as f64;
        let cooldown = (economy.dash_cooldown_ms - flux * economy.dash_cooldown_per_flux_ms).max(0.0);
        self.run.player.dash = cooldown;
        self.run.combo = bump_combo(self.run.combo, economy.dash_combo);
        self.run.energy = (self.run.energy - economy.dash_energy_cost).max(0.0);
        self.events.push(GameEvent::DashEngaged);
    }

    /// Buy the next rank of an upgrade. Rejections leave everything untouched.
    pub fn purchase_upgrade(&mut self, kind: UpgradeKind) -> Result<u32, PurchaseError> {
        let rank = self.profile.purchase(kind)?;
        self.persist();
        log::info!("{} upgraded to Lv {}", kind.spec().title, rank);
        self.events.push(GameEvent::UpgradePurchased { kind, rank });
        Ok(rank)
    }

    /// Update lane geometry for a new viewport size
    ///
    /// A running player keeps its place between lanes: x is rescaled with the
    /// width so the committed lane does not change.
    pub fn resize(&mut self, width: f64, height: f64) {
        let previous = self.run.viewport;
        let viewport = Viewport::new(width, height);
        self.run.viewport = viewport;
        let player = &mut self.run.player;
        if self.run.running {
            player.pos.x *= viewport.width / previous.width;
        } else {
            player.pos.x = viewport.lane_x(player.lane);
        }
        player.pos.y = viewport.player_y();
    }

    // === Lifecycle ===

    fn start_run(&mut self) {
        let loadout = Loadout::from_profile(&self.profile);
        self.run.start(&loadout, &self.tuning);
        log::info!("Run started (shield {:.0}ms)", self.run.player.shield);
        self.events.push(GameEvent::RunStarted);
    }

    fn end_run(&mut self) {
        self.run.running = false;
        let score = self.run.score;
        let payout = self.run.payout(&self.tuning);
        let new_best = self.profile.record_run(score, payout);
        self.persist();
        log::info!(
            "Run ended: score {}, payout {} shards{}",
            score,
            payout,
            if new_best { " (new record)" } else { "" }
        );
        self.events.push(GameEvent::RunEnded {
            score,
            payout,
            new_best,
        });
    }

    fn record_frame(&mut self, report: &FrameReport) {
        match report.contact {
            Contact::ObstacleNeutralized { .. } => self.events.push(GameEvent::ObstacleNeutralized),
            Contact::DroneNeutralized { .. } => self.events.push(GameEvent::DroneNeutralized),
            Contact::DroneImpact { .. } => self.events.push(GameEvent::DroneHit {
                energy: self.run.energy,
            }),
            Contact::Clear | Contact::ObstacleImpact { .. } => {}
        }
        if report.energy.critical {
            self.events.push(GameEvent::EnergyCritical);
        }
        if report.energy.burst_entered {
            log::debug!("Burst mode engaged");
            self.events.push(GameEvent::BurstEntered);
        }
        if report.energy.burst_exited {
            log::debug!("Burst mode ended");
            self.events.push(GameEvent::BurstExited);
        }
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save_profile(&self.profile) {
            log::warn!("Profile save failed: {}", e);
        }
    }

    // === Snapshots ===

    pub fn is_running(&self) -> bool {
        self.run.running
    }

    pub fn is_burst(&self) -> bool {
        self.run.burst
    }

    pub fn run(&self) -> &RunState {
        &self.run
    }

    pub fn player(&self) -> &Player {
        &self.run.player
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.run.obstacles
    }

    pub fn shards(&self) -> &[Shard] {
        &self.run.shards
    }

    pub fn drones(&self) -> &[Drone] {
        &self.run.drones
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            running: self.run.running,
            score: self.run.score,
            energy: self.run.energy,
            combo: self.run.combo,
            level: self.run.level,
            burst: self.run.burst,
            dash_ready: !self.run.player.dash_active(),
            currency: self.profile.currency,
            best_score: self.profile.best_score,
        }
    }

    pub fn upgrade_offers(&self) -> Vec<UpgradeOffer> {
        self.profile.offers()
    }

    pub fn achievement_board(&self) -> Vec<(&'static str, bool)> {
        achievements::board(&self.profile)
    }

    /// Drain queued notifications
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
