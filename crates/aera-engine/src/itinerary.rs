//! Itinerary building
//!
//! Decides direct versus feeder-routed paths. Small long-haul origins flow
//! through their configured hub before crossing oceans: a metro needs
//! feeder routing when it has a feeder hub and either the destination sits
//! in another region or the direct sector exceeds the feeder threshold.

use aera_reference::{Metro, MetroRegistry};

/// Direct distance beyond which a feeder-equipped metro routes via its hub.
pub const FEEDER_DISTANCE_KM: f64 = 4500.0;

fn needs_feeder(metro: &Metro, other: &Metro, direct_distance_km: f64) -> bool {
    if metro.feeder_hub.is_none() {
        return false;
    }
    if metro.region != other.region {
        return true;
    }
    direct_distance_km > FEEDER_DISTANCE_KM
}

/// Ordered metro codes from origin to destination, 1-3 legs.
///
/// Unknown or equal codes yield the degenerate `[from, to]` pair; for valid
/// distinct pairs the result starts at `from_code`, ends at `to_code`, and
/// never repeats a code in consecutive positions.
pub fn build_itinerary(metros: &MetroRegistry, from_code: &str, to_code: &str) -> Vec<String> {
    let (from_metro, to_metro) = match (metros.find(from_code), metros.find(to_code)) {
        (Some(f), Some(t)) if from_code != to_code => (f, t),
        _ => return vec![from_code.to_string(), to_code.to_string()],
    };

    let direct_distance = from_metro.distance_to_km(to_metro);
    let from_needs_feeder = needs_feeder(from_metro, to_metro, direct_distance);
    let to_needs_feeder = needs_feeder(to_metro, from_metro, direct_distance);

    let mut itinerary = vec![from_code.to_string()];

    if from_needs_feeder {
        if let Some(hub) = &from_metro.feeder_hub {
            if hub != to_code {
                itinerary.push(hub.clone());
            }
        }
    }

    let destination_core = match (&to_metro.feeder_hub, to_needs_feeder) {
        (Some(hub), true) => hub.as_str(),
        _ => to_code,
    };

    if destination_core != itinerary[itinerary.len() - 1] {
        itinerary.push(destination_core.to_string());
    }

    if to_needs_feeder && destination_core != to_code {
        itinerary.push(to_code.to_string());
    }

    itinerary
}

/// Total flown distance over consecutive itinerary pairs, in km.
/// Codes missing from the registry contribute nothing.
pub fn itinerary_distance_km(metros: &MetroRegistry, itinerary_codes: &[String]) -> f64 {
    itinerary_codes
        .windows(2)
        .filter_map(|pair| {
            let from = metros.find(&pair[0])?;
            let to = metros.find(&pair[1])?;
            Some(from.distance_to_km(to))
        })
        .sum()
}

/// Display line for an itinerary: "City (AIR) → City (AIR)".
pub fn itinerary_line(metros: &MetroRegistry, itinerary_codes: &[String]) -> String {
    itinerary_codes
        .iter()
        .map(|code| match metros.find(code) {
            Some(metro) => format!("{} ({})", metro.city, metro.airport),
            None => code.clone(),
        })
        .collect::<Vec<_>>()
        .join(" → ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> MetroRegistry {
        MetroRegistry::with_network_metros()
    }

    #[test]
    fn test_direct_for_hub_pair() {
        let metros = registry();
        assert_eq!(build_itinerary(&metros, "BUE", "MAD"), vec!["BUE", "MAD"]);
    }

    #[test]
    fn test_feeder_origin_routes_via_hub() {
        let metros = registry();
        // MVD feeds through BUE for cross-region departures.
        assert_eq!(
            build_itinerary(&metros, "MVD", "LON"),
            vec!["MVD", "BUE", "LON"]
        );
    }

    #[test]
    fn test_feeder_destination_appends_final_hop() {
        let metros = registry();
        assert_eq!(
            build_itinerary(&metros, "LON", "MVD"),
            vec!["LON", "BUE", "MVD"]
        );
    }

    #[test]
    fn test_feeder_both_sides() {
        let metros = registry();
        // MVD -> BUE -> SIN -> MNL
        assert_eq!(
            build_itinerary(&metros, "MVD", "MNL"),
            vec!["MVD", "BUE", "SIN", "MNL"]
        );
    }

    #[test]
    fn test_feeder_hub_as_destination_is_not_duplicated() {
        let metros = registry();
        // MVD's feeder is BUE itself; same region, short sector: direct.
        assert_eq!(build_itinerary(&metros, "MVD", "BUE"), vec!["MVD", "BUE"]);
        // Cross-region into the feeder hub: the hub is the destination.
        assert_eq!(
            build_itinerary(&metros, "LON", "BUE"),
            vec!["LON", "BUE"]
        );
    }

    #[test]
    fn test_unknown_or_equal_yields_degenerate_pair() {
        let metros = registry();
        assert_eq!(build_itinerary(&metros, "ZZZ", "NYC"), vec!["ZZZ", "NYC"]);
        assert_eq!(build_itinerary(&metros, "NYC", "NYC"), vec!["NYC", "NYC"]);
    }

    #[test]
    fn test_invariants_for_all_valid_pairs() {
        let metros = registry();
        for from in metros.iter() {
            for to in metros.iter() {
                if from.code == to.code {
                    continue;
                }
                let itinerary = build_itinerary(&metros, &from.code, &to.code);
                assert!(itinerary.len() >= 2 && itinerary.len() <= 4);
                assert_eq!(itinerary[0], from.code);
                assert_eq!(itinerary[itinerary.len() - 1], to.code);
                for window in itinerary.windows(2) {
                    assert_ne!(window[0], window[1], "{:?}", itinerary);
                }
            }
        }
    }

    #[test]
    fn test_itinerary_line_format() {
        let metros = registry();
        let codes = vec!["BUE".to_string(), "MAD".to_string()];
        assert_eq!(
            itinerary_line(&metros, &codes),
            "Buenos Aires (EZE) → Madrid (MAD)"
        );
    }
}
