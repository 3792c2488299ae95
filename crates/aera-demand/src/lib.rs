//! Route Demand Estimator
//!
//! Scores a metro pair for modeled travel demand and recommends equipment.
//!
//! # Scoring model
//!
//! ```text
//! score = clamp(base + hub + distance_band + trunk + premium + intercontinental + long_thin, 24, 99)
//! ```
//!
//! | Factor | Value |
//! |--------|-------|
//! | base | mean of the two metro demand weights (58 default) |
//! | hub | tier weight per side (9/7/4) + 3 when both sides are hubs |
//! | distance band | >=10000 km: +8, >=5500: +6, >=2500: +2, <=900: +4 |
//! | trunk route | +17 |
//! | premium corridor | +7 |
//! | intercontinental | +5 |
//! | long-thin penalty | -9 when not hub-to-hub and distance > 6000 km |
//!
//! Unknown metro codes yield a neutral medium profile instead of an error;
//! search text may not resolve to a valid code yet and the engine must keep
//! producing output.

use aera_reference::network::{
    self, DEFAULT_DEMAND_WEIGHT, HUB_TO_HUB_BONUS,
};
use aera_reference::{normalize_pair, MetroRegistry};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub mod equipment;

pub use equipment::{recommend_aircraft_for_route, EquipmentQuery};

/// Score floor and ceiling.
pub const MIN_SCORE: i32 = 24;
pub const MAX_SCORE: i32 = 99;

/// Score of the neutral profile returned for unknown codes.
pub const NEUTRAL_SCORE: u32 = 55;

const TRUNK_BONUS: i32 = 17;
const PREMIUM_BONUS: i32 = 7;
const INTERCONTINENTAL_BONUS: i32 = 5;
const LONG_THIN_PENALTY: i32 = -9;
const LONG_THIN_DISTANCE_KM: f64 = 6000.0;

/// Coarse demand bucket for a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DemandTier {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl DemandTier {
    /// Exact threshold mapping: 86+ very-high, 72+ high, 58+ medium.
    pub fn from_score(score: u32) -> Self {
        if score >= 86 {
            DemandTier::VeryHigh
        } else if score >= 72 {
            DemandTier::High
        } else if score >= 58 {
            DemandTier::Medium
        } else {
            DemandTier::Low
        }
    }

    /// Fare multiplier applied to the base economy price.
    pub fn price_multiplier(&self) -> f64 {
        match self {
            DemandTier::Low => 0.94,
            DemandTier::Medium => 1.0,
            DemandTier::High => 1.12,
            DemandTier::VeryHigh => 1.22,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DemandTier::Low => "low",
            DemandTier::Medium => "medium",
            DemandTier::High => "high",
            DemandTier::VeryHigh => "very-high",
        }
    }
}

/// Derived demand profile for one metro pair. Pure function of its inputs;
/// recomputed per query, never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandProfile {
    pub score: u32,
    pub tier: DemandTier,
    pub is_hub_to_hub: bool,
    pub is_trunk_route: bool,
    pub is_intercontinental: bool,
    pub is_premium_corridor: bool,
    /// Sorted pair key; identical for A->B and B->A.
    pub pair_key: String,
}

impl DemandProfile {
    /// Neutral profile for pairs the reference data cannot resolve.
    fn neutral(from_code: &str, to_code: &str) -> Self {
        Self {
            score: NEUTRAL_SCORE,
            tier: DemandTier::Medium,
            is_hub_to_hub: false,
            is_trunk_route: false,
            is_intercontinental: false,
            is_premium_corridor: false,
            pair_key: normalize_pair(from_code, to_code),
        }
    }
}

fn distance_band_bonus(distance_km: f64) -> i32 {
    if distance_km >= 10000.0 {
        8
    } else if distance_km >= 5500.0 {
        6
    } else if distance_km >= 2500.0 {
        2
    } else if distance_km <= 900.0 {
        4
    } else {
        0
    }
}

/// Estimate demand for a metro pair at a given flown distance.
pub fn estimate_route_demand(
    metros: &MetroRegistry,
    from_code: &str,
    to_code: &str,
    distance_km: f64,
) -> DemandProfile {
    let (from_metro, to_metro) = match (metros.find(from_code), metros.find(to_code)) {
        (Some(f), Some(t)) => (f, t),
        _ => return DemandProfile::neutral(from_code, to_code),
    };

    let pair_key = normalize_pair(from_code, to_code);
    let from_demand = network::demand_weight(from_code).unwrap_or(DEFAULT_DEMAND_WEIGHT);
    let to_demand = network::demand_weight(to_code).unwrap_or(DEFAULT_DEMAND_WEIGHT);

    let from_hub = network::hub_tier(from_code);
    let to_hub = network::hub_tier(to_code);
    let is_hub_to_hub = from_hub.is_some() && to_hub.is_some();
    let is_intercontinental = from_metro.region != to_metro.region;
    let is_trunk_route = network::is_trunk_route(&pair_key);
    let is_premium_corridor = network::is_premium_corridor(&pair_key);

    let base_score = (from_demand + to_demand) as f64 / 2.0;
    let hub_bonus = from_hub.map(|t| t.weight()).unwrap_or(0)
        + to_hub.map(|t| t.weight()).unwrap_or(0)
        + if is_hub_to_hub { HUB_TO_HUB_BONUS } else { 0 };

    let trunk_bonus = if is_trunk_route { TRUNK_BONUS } else { 0 };
    let premium_bonus = if is_premium_corridor { PREMIUM_BONUS } else { 0 };
    let intercontinental_bonus = if is_intercontinental {
        INTERCONTINENTAL_BONUS
    } else {
        0
    };
    let long_thin_penalty = if !is_hub_to_hub && distance_km > LONG_THIN_DISTANCE_KM {
        LONG_THIN_PENALTY
    } else {
        0
    };

    let raw = base_score
        + (hub_bonus
            + distance_band_bonus(distance_km)
            + trunk_bonus
            + premium_bonus
            + intercontinental_bonus
            + long_thin_penalty) as f64;

    let score = (raw.round() as i32).clamp(MIN_SCORE, MAX_SCORE) as u32;
    let tier = DemandTier::from_score(score);

    debug!(
        "Demand {}: {} ({}) hub_to_hub={} trunk={} premium={} intercontinental={}",
        pair_key,
        score,
        tier.label(),
        is_hub_to_hub,
        is_trunk_route,
        is_premium_corridor,
        is_intercontinental
    );

    DemandProfile {
        score,
        tier,
        is_hub_to_hub,
        is_trunk_route,
        is_intercontinental,
        is_premium_corridor,
        pair_key,
    }
}
