//! Route network tables
//!
//! Demand weights, hub tiers and the registered route sets. Pair-keyed sets
//! use the sorted pair key so membership is direction-independent: A-B and
//! B-A always share one entry.

use serde::{Deserialize, Serialize};

/// Demand weight assumed for metros without an entry in the weight table.
pub const DEFAULT_DEMAND_WEIGHT: u32 = 58;

/// Bonus applied when both endpoints carry any hub tier.
pub const HUB_TO_HUB_BONUS: i32 = 3;

/// Hub tier in the AERA network. Weights feed the demand score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HubTier {
    Primary,
    Major,
    Secondary,
}

impl HubTier {
    pub fn weight(&self) -> i32 {
        match self {
            HubTier::Primary => 9,
            HubTier::Major => 7,
            HubTier::Secondary => 4,
        }
    }
}

/// Order-independent key for a metro pair: codes sorted, joined with '-'.
pub fn normalize_pair(from_code: &str, to_code: &str) -> String {
    if from_code <= to_code {
        format!("{}-{}", from_code, to_code)
    } else {
        format!("{}-{}", to_code, from_code)
    }
}

const DEMAND_WEIGHTS: &[(&str, u32)] = &[
    ("MVD", 41), ("BUE", 78), ("SAO", 85), ("RIO", 69), ("SCL", 62),
    ("LIM", 66), ("BOG", 71), ("PTY", 74), ("MIA", 83), ("NYC", 98),
    ("LAX", 86), ("SFO", 84), ("ORD", 83), ("ATL", 82), ("DFW", 81),
    ("YYZ", 79), ("MEX", 75), ("LON", 97), ("PAR", 91), ("MAD", 82),
    ("ROM", 76), ("AMS", 80), ("FRA", 88), ("MUC", 80), ("BER", 74),
    ("BCN", 83), ("LIS", 73), ("ATH", 70), ("DXB", 95), ("DOH", 87),
    ("IST", 79), ("JED", 65), ("RUH", 71), ("CAI", 78), ("SIN", 94),
    ("HKG", 88), ("TYO", 96), ("SYD", 81), ("BKK", 74), ("SEL", 91),
    ("SHA", 94), ("BJS", 95), ("DEL", 89), ("BOM", 84), ("BLR", 80),
    ("KUL", 76), ("CGK", 82), ("MNL", 77), ("MEL", 78), ("AKL", 70),
];

const HUB_TIERS: &[(&str, HubTier)] = &[
    ("BUE", HubTier::Primary),
    ("NYC", HubTier::Major),
    ("LON", HubTier::Major),
    ("PAR", HubTier::Secondary),
    ("DXB", HubTier::Major),
    ("SIN", HubTier::Major),
    ("TYO", HubTier::Secondary),
    ("SAO", HubTier::Major),
    ("MIA", HubTier::Major),
    ("BOG", HubTier::Secondary),
    ("PTY", HubTier::Secondary),
    ("YYZ", HubTier::Secondary),
    ("ORD", HubTier::Secondary),
    ("ATL", HubTier::Secondary),
    ("SFO", HubTier::Secondary),
    ("MAD", HubTier::Secondary),
    ("DOH", HubTier::Secondary),
    ("LAX", HubTier::Major),
    ("FRA", HubTier::Major),
    ("BCN", HubTier::Secondary),
    ("DEL", HubTier::Major),
    ("BJS", HubTier::Major),
    ("SHA", HubTier::Major),
    ("SEL", HubTier::Major),
    ("SYD", HubTier::Secondary),
    ("MEL", HubTier::Secondary),
    ("KUL", HubTier::Secondary),
    ("CGK", HubTier::Secondary),
    ("IST", HubTier::Secondary),
];

/// Registered high-volume pairs receiving a flat demand bonus.
const TRUNK_ROUTE_PAIRS: &[&str] = &[
    "BUE-MAD", "BUE-PAR", "BUE-NYC", "DXB-LON", "DXB-SIN", "LON-NYC",
    "LON-SIN", "MIA-SAO", "NYC-PAR", "PAR-SIN", "SIN-TYO", "LON-TYO",
    "DEL-LON", "DEL-DXB", "BJS-SIN", "SHA-SIN", "NYC-SAO", "LAX-NYC",
    "LON-PAR", "FRA-LON", "DXB-PAR",
];

/// Corridors with sustained premium-cabin demand.
const PREMIUM_CORRIDORS: &[&str] = &[
    "DXB-SIN", "LON-NYC", "LON-SIN", "NYC-PAR", "PAR-SIN", "SIN-TYO",
    "DEL-LON", "DXB-PAR", "NYC-SAO",
];

/// Pairs flown as fixed four-a-day shuttles regardless of modeled demand.
const SHUTTLE_PAIRS: &[&str] = &["BUE-MVD", "MIA-NYC", "LON-PAR", "DXB-DOH"];

pub fn demand_weight(code: &str) -> Option<u32> {
    DEMAND_WEIGHTS.iter().find(|(c, _)| *c == code).map(|(_, w)| *w)
}

pub fn hub_tier(code: &str) -> Option<HubTier> {
    HUB_TIERS.iter().find(|(c, _)| *c == code).map(|(_, t)| *t)
}

pub fn is_trunk_route(pair_key: &str) -> bool {
    TRUNK_ROUTE_PAIRS.contains(&pair_key)
}

pub fn is_premium_corridor(pair_key: &str) -> bool {
    PREMIUM_CORRIDORS.contains(&pair_key)
}

pub fn is_shuttle_pair(from_code: &str, to_code: &str) -> bool {
    SHUTTLE_PAIRS.contains(&normalize_pair(from_code, to_code).as_str())
}
