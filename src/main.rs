//! Neon Rift entry point
//!
//! Native builds run a headless demo: an autopilot plays runs against the real
//! simulation at a jittery ~60 Hz and the profile is saved to disk. The web
//! build is driven from JavaScript through `neon_rift::wasm`.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::env;

    use neon_rift::consts::LANES;
    use neon_rift::persistence::{FileStore, ProfileStore};
    use neon_rift::{Game, GameEvent, Tuning};

    /// Simulated time per demo session (ms)
    const SESSION_MS: f64 = 120_000.0;
    /// How far ahead the autopilot looks for obstacles (pixels)
    const LOOKAHEAD: f64 = 220.0;

    fn load_tuning() -> Tuning {
        let Ok(path) = env::var("NEON_RIFT_TUNING") else {
            return Tuning::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => match Tuning::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path);
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring tuning file {}: {}", path, e);
                    Tuning::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read tuning file {}: {}", path, e);
                Tuning::default()
            }
        }
    }

    /// Lane with no obstacle inside the lookahead window, preferring the current one
    fn pick_lane<S: ProfileStore>(game: &Game<S>) -> Option<u8> {
        let anchor = game.player().anchor(&game.run().viewport);
        let threatened = |lane: u8| {
            game.obstacles()
                .iter()
                .any(|ob| ob.lane == lane && ob.x > anchor.x - 40.0 && ob.x - anchor.x < LOOKAHEAD)
        };
        let current = game.player().lane;
        if !threatened(current) {
            return Some(current);
        }
        (0..LANES)
            .filter(|&lane| !threatened(lane))
            .min_by_key(|&lane| (lane as i32 - current as i32).abs())
    }

    fn autopilot<S: ProfileStore>(game: &mut Game<S>) {
        match pick_lane(game) {
            Some(lane) if lane != game.player().target_lane => {
                let direction = (lane as i32 - game.player().target_lane as i32).signum();
                game.request_lane_change(direction);
            }
            Some(_) => {}
            None => {
                if game.hud().dash_ready {
                    game.request_dash();
                }
            }
        }
    }

    pub fn run() {
        env_logger::init();
        log::info!("Neon Rift (headless) starting...");

        let profile_path =
            env::var("NEON_RIFT_PROFILE").unwrap_or_else(|_| "neon-rift-profile.json".to_string());
        let seed = env::var("NEON_RIFT_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0x5eed_u64);

        let mut game = Game::with_tuning(seed, FileStore::new(&profile_path), load_tuning());
        let mut elapsed = 0.0;
        let mut frame = 0u64;
        let mut runs = 0u32;

        game.request_dash();
        while elapsed < SESSION_MS {
            // Alternate frame lengths to exercise the variable timestep
            let dt = if frame % 5 == 0 { 20.0 } else { 16.0 };
            frame += 1;
            elapsed += dt;

            if !game.is_running() {
                game.request_dash();
            }
            autopilot(&mut game);
            game.on_frame(dt);

            for event in game.take_events() {
                match event {
                    GameEvent::RunEnded {
                        score,
                        payout,
                        new_best,
                    } => {
                        runs += 1;
                        println!(
                            "run {:>3}: score {:>6}  +{} shards{}",
                            runs,
                            score,
                            payout,
                            if new_best { "  NEW RECORD" } else { "" }
                        );
                    }
                    GameEvent::AchievementUnlocked { label, .. } => {
                        println!("feat unlocked: {}", label);
                    }
                    other => log::debug!("{:?}", other),
                }
            }

            // Spend shards on the cheapest affordable upgrade between runs
            if !game.is_running() {
                let cheapest = game
                    .upgrade_offers()
                    .into_iter()
                    .filter(|offer| offer.affordable)
                    .min_by_key(|offer| offer.cost);
                if let Some(offer) = cheapest {
                    let _ = game.purchase_upgrade(offer.kind);
                }
            }
        }

        let hud = game.hud();
        println!(
            "\n{} runs, best score {}, {} shards banked",
            runs, hud.best_score, hud.currency
        );
        for (label, unlocked) in game.achievement_board() {
            println!("  [{}] {}", if unlocked { "x" } else { " " }, label);
        }
        log::info!("Profile saved to {}", profile_path);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point lives in neon_rift::wasm, this is just to satisfy the compiler
}
