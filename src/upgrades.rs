//! Upgrade catalog
//!
//! Five permanent upgrades bought with shards between (or during) runs.
//! Cost at rank `L` is `round(base_cost * scale^L)`.

use serde::{Deserialize, Serialize};

/// Upgrade identifiers (serialized with their profile keys)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpgradeKind {
    Thrust,
    Focus,
    Magnet,
    Shield,
    Flux,
}

impl UpgradeKind {
    /// Catalog order
    pub const ALL: [UpgradeKind; 5] = [
        UpgradeKind::Thrust,
        UpgradeKind::Focus,
        UpgradeKind::Magnet,
        UpgradeKind::Shield,
        UpgradeKind::Flux,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            UpgradeKind::Thrust => "thrust",
            UpgradeKind::Focus => "focus",
            UpgradeKind::Magnet => "magnet",
            UpgradeKind::Shield => "shield",
            UpgradeKind::Flux => "flux",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }

    /// Static catalog entry for this upgrade
    pub fn spec(&self) -> &'static UpgradeSpec {
        match self {
            UpgradeKind::Thrust => &CATALOG[0],
            UpgradeKind::Focus => &CATALOG[1],
            UpgradeKind::Magnet => &CATALOG[2],
            UpgradeKind::Shield => &CATALOG[3],
            UpgradeKind::Flux => &CATALOG[4],
        }
    }
}

/// A catalog entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpgradeSpec {
    pub kind: UpgradeKind,
    pub title: &'static str,
    pub base_cost: f64,
    /// Geometric cost growth per rank
    pub scale: f64,
    pub max_rank: u32,
}

pub static CATALOG: [UpgradeSpec; 5] = [
    UpgradeSpec {
        kind: UpgradeKind::Thrust,
        title: "Ion Thrust",
        base_cost: 50.0,
        scale: 1.7,
        max_rank: 7,
    },
    UpgradeSpec {
        kind: UpgradeKind::Focus,
        title: "Focus Lattice",
        base_cost: 80.0,
        scale: 1.8,
        max_rank: 5,
    },
    UpgradeSpec {
        kind: UpgradeKind::Magnet,
        title: "Shard Magnetics",
        base_cost: 65.0,
        scale: 1.65,
        max_rank: 6,
    },
    UpgradeSpec {
        kind: UpgradeKind::Shield,
        title: "Phase Shield",
        base_cost: 120.0,
        scale: 2.05,
        max_rank: 4,
    },
    UpgradeSpec {
        kind: UpgradeKind::Flux,
        title: "Flux Engine",
        base_cost: 90.0,
        scale: 1.75,
        max_rank: 6,
    },
];

impl UpgradeSpec {
    /// Price of buying the next rank when currently at `rank`
    pub fn cost_at(&self, rank: u32) -> u64 {
        (self.base_cost * self.scale.powi(rank as i32)).round() as u64
    }

    pub fn is_maxed(&self, rank: u32) -> bool {
        rank >= self.max_rank
    }

    /// Effect text shown for an upgrade card at `rank`
    pub fn description(&self, rank: u32) -> String {
        let next = rank + 1;
        match self.kind {
            UpgradeKind::Thrust => format!("Boost top speed by {}% per rank.", next * 6),
            UpgradeKind::Focus => format!("Combo decay slows {}% each rank.", next * 12),
            UpgradeKind::Magnet => format!("Shard pickup radius +{}px per rank.", next * 4),
            UpgradeKind::Shield => format!("Begin runs with {}s immunity.", next),
            UpgradeKind::Flux => format!("Dash cooldown reduced {}% each rank.", next * 10),
        }
    }
}
