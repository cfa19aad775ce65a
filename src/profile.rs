//! Persistent player profile
//!
//! Currency, best score, upgrade ranks and unlocked achievements. This is the
//! only state that outlives a run. Stored records are merged field-by-field
//! over the defaults, so older or partial records still load.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::upgrades::{UpgradeKind, UpgradeSpec};

/// Why a purchase was turned down (no state changes in either case)
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseError {
    #[error("{0:?} is already at its maximum rank")]
    Maxed(UpgradeKind),

    #[error("Upgrade costs {cost} shards but only {balance} are available")]
    InsufficientFunds { cost: u64, balance: u64 },
}

/// Rank per upgrade
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeRanks {
    pub thrust: u32,
    pub focus: u32,
    pub magnet: u32,
    pub shield: u32,
    pub flux: u32,
}

impl UpgradeRanks {
    pub fn get(&self, kind: UpgradeKind) -> u32 {
        match kind {
            UpgradeKind::Thrust => self.thrust,
            UpgradeKind::Focus => self.focus,
            UpgradeKind::Magnet => self.magnet,
            UpgradeKind::Shield => self.shield,
            UpgradeKind::Flux => self.flux,
        }
    }

    fn get_mut(&mut self, kind: UpgradeKind) -> &mut u32 {
        match kind {
            UpgradeKind::Thrust => &mut self.thrust,
            UpgradeKind::Focus => &mut self.focus,
            UpgradeKind::Magnet => &mut self.magnet,
            UpgradeKind::Shield => &mut self.shield,
            UpgradeKind::Flux => &mut self.flux,
        }
    }

    /// Pull every rank back under its catalog maximum
    pub fn clamp_to_catalog(&mut self) {
        for kind in UpgradeKind::ALL {
            let max = kind.spec().max_rank;
            let rank = self.get_mut(kind);
            if *rank > max {
                log::warn!("{} rank {} exceeds max {}, clamping", kind.key(), rank, max);
                *rank = max;
            }
        }
    }
}

/// Durable profile record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
    /// Spendable currency (stored under the record's `shards` field)
    #[serde(rename = "shards")]
    pub currency: u64,
    pub best_score: u64,
    pub upgrades: UpgradeRanks,
    /// Achievement key -> unlocked. Unknown keys are carried through untouched.
    pub achievements: BTreeMap<String, bool>,
}

/// What the upgrade panel shows for one catalog entry
#[derive(Debug, Clone, PartialEq)]
pub struct UpgradeOffer {
    pub kind: UpgradeKind,
    pub title: &'static str,
    pub rank: u32,
    pub description: String,
    /// Price of the next rank, `None` once maxed
    pub cost: Option<u64>,
    /// Whether the purchase button should be enabled
    pub affordable: bool,
}

impl Profile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a stored record, falling back to defaults when it is corrupt
    pub fn from_json_or_default(json: &str) -> Self {
        match serde_json::from_str::<Profile>(json) {
            Ok(mut profile) => {
                profile.upgrades.clamp_to_catalog();
                profile
            }
            Err(e) => {
                log::warn!("Profile record is corrupt ({}), using defaults", e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn rank(&self, kind: UpgradeKind) -> u32 {
        self.upgrades.get(kind)
    }

    pub fn is_unlocked(&self, key: &str) -> bool {
        self.achievements.get(key).copied().unwrap_or(false)
    }

    /// Flip an achievement to unlocked. Returns false if it already was.
    pub fn unlock(&mut self, key: &str) -> bool {
        if self.is_unlocked(key) {
            return false;
        }
        self.achievements.insert(key.to_string(), true);
        true
    }

    /// Credit a run's payout and record the score if it is a new best.
    /// Returns whether the best score changed.
    pub fn record_run(&mut self, score: u64, payout: u64) -> bool {
        self.currency = self.currency.saturating_add(payout);
        if score > self.best_score {
            self.best_score = score;
            true
        } else {
            false
        }
    }

    /// Check whether the next rank of `kind` can be bought
    pub fn check_purchase(&self, kind: UpgradeKind) -> Result<u64, PurchaseError> {
        let spec: &UpgradeSpec = kind.spec();
        let rank = self.rank(kind);
        if spec.is_maxed(rank) {
            return Err(PurchaseError::Maxed(kind));
        }
        let cost = spec.cost_at(rank);
        if self.currency < cost {
            return Err(PurchaseError::InsufficientFunds {
                cost,
                balance: self.currency,
            });
        }
        Ok(cost)
    }

    /// Buy the next rank of `kind`. Returns the new rank.
    pub fn purchase(&mut self, kind: UpgradeKind) -> Result<u32, PurchaseError> {
        let cost = self.check_purchase(kind)?;
        self.currency -= cost;
        let rank = self.upgrades.get_mut(kind);
        *rank += 1;
        log::debug!("Purchased {} rank {} for {} shards", kind.key(), rank, cost);
        Ok(*rank)
    }

    /// Upgrade cards in catalog order
    pub fn offers(&self) -> Vec<UpgradeOffer> {
        UpgradeKind::ALL
            .into_iter()
            .map(|kind| {
                let spec = kind.spec();
                let rank = self.rank(kind);
                let cost = (!spec.is_maxed(rank)).then(|| spec.cost_at(rank));
                UpgradeOffer {
                    kind,
                    title: spec.title,
                    rank,
                    description: spec.description(rank),
                    cost,
                    affordable: self.check_purchase(kind).is_ok(),
                }
            })
            .collect()
    }
}
