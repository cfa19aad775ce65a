//! WASM-specific bindings.
//!
//! The browser page owns the animation loop, rendering and input dispatch;
//! it calls into `WebGame` once per `requestAnimationFrame` and for each
//! lane/dash command, then reads JSON snapshots back for drawing.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::game::Game;
use crate::persistence::LocalStorageStore;
use crate::sim::{Drone, Obstacle, Player, Shard};
use crate::upgrades::UpgradeKind;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Neon Rift starting...");
}

/// Everything the renderer draws for one frame
#[derive(Serialize)]
struct Scene<'a> {
    player: &'a Player,
    obstacles: &'a [Obstacle],
    shards: &'a [Shard],
    drones: &'a [Drone],
    burst: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OfferView {
    key: &'static str,
    title: &'static str,
    rank: u32,
    description: String,
    cost: Option<u64>,
    affordable: bool,
}

#[wasm_bindgen]
pub struct WebGame {
    game: Game<LocalStorageStore>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> WebGame {
        let seed = js_sys::Date::now() as u64;
        let mut game = Game::new(seed, LocalStorageStore);
        game.resize(width, height);
        WebGame { game }
    }

    /// Drive one update pass with the milliseconds since the previous frame
    pub fn on_frame(&mut self, elapsed_ms: f64) {
        self.game.on_frame(elapsed_ms);
    }

    pub fn request_lane_change(&mut self, direction: i32) {
        self.game.request_lane_change(direction);
    }

    pub fn request_dash(&mut self) {
        self.game.request_dash();
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.game.resize(width, height);
    }

    /// Returns false if the purchase was rejected or the key is unknown
    pub fn purchase_upgrade(&mut self, key: &str) -> bool {
        match UpgradeKind::from_key(key) {
            Some(kind) => self.game.purchase_upgrade(kind).is_ok(),
            None => false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.game.is_running()
    }

    pub fn scene_json(&self) -> String {
        let scene = Scene {
            player: self.game.player(),
            obstacles: self.game.obstacles(),
            shards: self.game.shards(),
            drones: self.game.drones(),
            burst: self.game.is_burst(),
        };
        serde_json::to_string(&scene).unwrap_or_default()
    }

    pub fn hud_json(&self) -> String {
        serde_json::to_string(&self.game.hud()).unwrap_or_default()
    }

    /// Drained one-shot events (status line, sounds)
    pub fn events_json(&mut self) -> String {
        serde_json::to_string(&self.game.take_events()).unwrap_or_default()
    }

    pub fn upgrades_json(&self) -> String {
        let offers: Vec<OfferView> = self
            .game
            .upgrade_offers()
            .into_iter()
            .map(|offer| OfferView {
                key: offer.kind.key(),
                title: offer.title,
                rank: offer.rank,
                description: offer.description,
                cost: offer.cost,
                affordable: offer.affordable,
            })
            .collect();
        serde_json::to_string(&offers).unwrap_or_default()
    }

    pub fn achievements_json(&self) -> String {
        serde_json::to_string(&self.game.achievement_board()).unwrap_or_default()
    }
}
