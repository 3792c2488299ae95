//! Aircraft recommendation
//!
//! Picks equipment for one segment from a short ordered candidate list
//! keyed by distance band, then refined by demand tier and hub/trunk
//! status. Successive daily departures rotate the candidate list so a
//! route's schedule shows fleet variety rather than one type all day.
//!
//! The caller's preferred type is honored only for the first option of a
//! schedule, and only when it is allowed and range-capable. The terminal
//! fallback returns the first allowed slug even when range-incapable;
//! callers treat that as a soft constraint violation, not an error.

use aera_reference::FleetRegistry;
use tracing::debug;

use crate::{DemandProfile, DemandTier};

/// One equipment request for a segment.
#[derive(Debug, Clone)]
pub struct EquipmentQuery<'a> {
    pub distance_km: f64,
    pub demand: &'a DemandProfile,
    /// Position of this departure within the day's schedule.
    pub option_index: usize,
    pub preferred_aircraft: Option<&'a str>,
    /// Restricts the pick to these slugs when non-empty.
    pub allowed_aircraft_slugs: Option<&'a [&'a str]>,
}

fn band_candidates(query: &EquipmentQuery<'_>) -> Vec<&'static str> {
    let distance_km = query.distance_km;
    let tier = query.demand.tier;
    let is_hub_to_hub = query.demand.is_hub_to_hub;
    let is_trunk = query.demand.is_trunk_route;

    if distance_km > 14500.0 {
        vec!["b777x", "a350xwb", "b787"]
    } else if distance_km >= 11500.0 {
        if tier == DemandTier::VeryHigh {
            vec!["b777x", "a350xwb", "b787"]
        } else {
            vec!["a350xwb", "b787", "b777x"]
        }
    } else if distance_km >= 8500.0 {
        if tier == DemandTier::VeryHigh || is_trunk || is_hub_to_hub {
            vec!["a350xwb", "b787", "b777x"]
        } else {
            vec!["b787", "a350xwb", "a321xlr"]
        }
    } else if distance_km >= 5500.0 {
        if is_hub_to_hub || tier == DemandTier::VeryHigh || tier == DemandTier::High {
            vec!["b787", "a350xwb", "a321xlr"]
        } else if tier == DemandTier::Medium {
            vec!["b787", "a321xlr", "a350xwb"]
        } else {
            vec!["a321xlr", "b787", "a350xwb"]
        }
    } else if distance_km >= 3500.0 {
        if tier == DemandTier::High || (is_hub_to_hub && tier == DemandTier::VeryHigh) {
            vec!["b787", "a321xlr", "a350xwb"]
        } else {
            vec!["a321xlr", "b787", "a320neo"]
        }
    } else if distance_km >= 2500.0 {
        if tier == DemandTier::VeryHigh {
            vec!["b787", "a321xlr", "a320neo"]
        } else {
            vec!["a321xlr", "a320neo", "b787"]
        }
    } else if distance_km >= 1400.0 {
        if tier == DemandTier::VeryHigh {
            vec!["a321xlr", "a320neo", "b787"]
        } else {
            vec!["a320neo", "a321xlr"]
        }
    } else {
        vec!["a320neo", "a321xlr"]
    }
}

fn choose_from_candidates(
    fleet: &FleetRegistry,
    candidates: &[&str],
    distance_km: f64,
    allowed: &[String],
) -> Option<String> {
    let mut seen: Vec<&str> = Vec::with_capacity(candidates.len());
    for &slug in candidates {
        if seen.contains(&slug) {
            continue;
        }
        seen.push(slug);
        if allowed.iter().any(|a| a == slug) && fleet.can_fly_distance(slug, distance_km) {
            return Some(slug.to_string());
        }
    }
    None
}

/// Recommend an aircraft slug for a segment.
pub fn recommend_aircraft_for_route(fleet: &FleetRegistry, query: &EquipmentQuery<'_>) -> String {
    // Constrain to the caller's allowed set, dropping slugs the fleet does
    // not know; an empty restriction falls back to the whole fleet.
    let allowed: Vec<String> = match query.allowed_aircraft_slugs {
        Some(slugs) => {
            let filtered: Vec<String> = slugs
                .iter()
                .filter(|s| fleet.find(s).is_some())
                .map(|s| s.to_string())
                .collect();
            if filtered.is_empty() {
                fleet.range_ordered_slugs().iter().map(|s| s.to_string()).collect()
            } else {
                filtered
            }
        }
        None => fleet.range_ordered_slugs().iter().map(|s| s.to_string()).collect(),
    };

    // Preference biases only the first/featured departure of the day.
    if let Some(preferred) = query.preferred_aircraft {
        if !preferred.is_empty()
            && query.option_index == 0
            && allowed.iter().any(|a| a == preferred)
            && fleet.can_fly_distance(preferred, query.distance_km)
        {
            return preferred.to_string();
        }
    }

    let candidates = band_candidates(query);
    let rotated: Vec<&str> = if query.option_index > 0 {
        let mut r: Vec<&str> = candidates[1..].to_vec();
        r.push(candidates[0]);
        r
    } else {
        candidates
    };

    if let Some(selected) = choose_from_candidates(fleet, &rotated, query.distance_km, &allowed) {
        return selected;
    }

    // Range fallback: first capable type in fleet range order.
    for slug in fleet.range_ordered_slugs() {
        if allowed.iter().any(|a| a == slug) && fleet.can_fly_distance(slug, query.distance_km) {
            return slug.to_string();
        }
    }

    // Soft constraint violation: nothing in the allowed set can fly this
    // distance, so surface the first allowed slug verbatim.
    debug!(
        "No range-capable type for {:.0} km within allowed set; returning first allowed",
        query.distance_km
    );
    allowed
        .first()
        .cloned()
        .unwrap_or_else(|| "a320neo".to_string())
}
