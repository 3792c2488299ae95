//! Passenger manifest rules.
//!
//! Count adjustment limits, the manifest summary line, and the traveler
//! slots the passenger-details form is built from.

use aera_engine::types::{PassengerCategory, PassengerCounts};
use serde::{Deserialize, Serialize};

/// Hard cap on travelers per booking.
pub const MAX_TRAVELERS: u32 = 9;

/// Direction of a count adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    Increment,
    Decrement,
}

fn count_mut(counts: &mut PassengerCounts, category: PassengerCategory) -> &mut u32 {
    match category {
        PassengerCategory::Adults => &mut counts.adults,
        PassengerCategory::Teens => &mut counts.teens,
        PassengerCategory::Children => &mut counts.children,
        PassengerCategory::Infants => &mut counts.infants,
    }
}

/// Apply one increment or decrement, enforcing manifest rules:
/// at most `MAX_TRAVELERS` total, at least one adult, and never more
/// lap infants than adults. Out-of-bounds adjustments are ignored.
pub fn adjust_passenger_count(
    counts: &mut PassengerCounts,
    category: PassengerCategory,
    adjustment: Adjustment,
) {
    match adjustment {
        Adjustment::Increment => {
            if counts.total() >= MAX_TRAVELERS {
                return;
            }
            if category == PassengerCategory::Infants && counts.infants >= counts.adults {
                return;
            }
            *count_mut(counts, category) += 1;
        }
        Adjustment::Decrement => {
            let floor = if category == PassengerCategory::Adults { 1 } else { 0 };
            let slot = count_mut(counts, category);
            if *slot <= floor {
                return;
            }
            *slot -= 1;
            // Each lap infant needs an adult.
            if counts.infants > counts.adults {
                counts.infants = counts.adults;
            }
        }
    }
}

/// "2 Adults, 1 Infant" style summary of the manifest.
pub fn passenger_summary(counts: &PassengerCounts) -> String {
    let parts: Vec<String> = PassengerCategory::ALL
        .iter()
        .filter_map(|&category| {
            let count = counts.count(category);
            match count {
                0 => None,
                1 => Some(format!("1 {}", category.singular())),
                n => Some(format!("{} {}", n, category.label())),
            }
        })
        .collect();
    if parts.is_empty() {
        "1 Adult".to_string()
    } else {
        parts.join(", ")
    }
}

/// One traveler slot on the passenger-details form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelerSlot {
    pub id: String,
    pub label: String,
    pub category: PassengerCategory,
}

/// Expand the manifest counts into per-traveler slots, numbered within
/// each category in the fixed manifest order.
pub fn traveler_slots(counts: &PassengerCounts) -> Vec<TravelerSlot> {
    let mut slots = Vec::with_capacity(counts.total() as usize);
    for &category in PassengerCategory::ALL.iter() {
        for n in 1..=counts.count(category) {
            slots.push(TravelerSlot {
                id: format!("{}-{}", category.key(), n),
                label: format!("{} {}", category.singular(), n),
                category,
            });
        }
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_caps_at_max_travelers() {
        let mut counts = PassengerCounts {
            adults: 5,
            teens: 2,
            children: 2,
            infants: 0,
        };
        adjust_passenger_count(&mut counts, PassengerCategory::Teens, Adjustment::Increment);
        assert_eq!(counts.total(), 9);
        assert_eq!(counts.teens, 2);
    }

    #[test]
    fn test_infants_cannot_exceed_adults() {
        let mut counts = PassengerCounts {
            adults: 1,
            teens: 0,
            children: 0,
            infants: 1,
        };
        adjust_passenger_count(&mut counts, PassengerCategory::Infants, Adjustment::Increment);
        assert_eq!(counts.infants, 1);

        adjust_passenger_count(&mut counts, PassengerCategory::Adults, Adjustment::Increment);
        adjust_passenger_count(&mut counts, PassengerCategory::Infants, Adjustment::Increment);
        assert_eq!(counts.infants, 2);
    }

    #[test]
    fn test_adult_decrement_clamps_infants() {
        let mut counts = PassengerCounts {
            adults: 2,
            teens: 0,
            children: 0,
            infants: 2,
        };
        adjust_passenger_count(&mut counts, PassengerCategory::Adults, Adjustment::Decrement);
        assert_eq!(counts.adults, 1);
        assert_eq!(counts.infants, 1);

        // Last adult never drops below one.
        adjust_passenger_count(&mut counts, PassengerCategory::Adults, Adjustment::Decrement);
        assert_eq!(counts.adults, 1);
    }

    #[test]
    fn test_decrement_floors_at_zero() {
        let mut counts = PassengerCounts::default();
        adjust_passenger_count(&mut counts, PassengerCategory::Children, Adjustment::Decrement);
        assert_eq!(counts.children, 0);
    }

    #[test]
    fn test_passenger_summary() {
        assert_eq!(passenger_summary(&PassengerCounts::default()), "1 Adult");
        let counts = PassengerCounts {
            adults: 2,
            teens: 0,
            children: 0,
            infants: 1,
        };
        assert_eq!(passenger_summary(&counts), "2 Adults, 1 Infant");
        let family = PassengerCounts {
            adults: 2,
            teens: 1,
            children: 2,
            infants: 0,
        };
        assert_eq!(passenger_summary(&family), "2 Adults, 1 Teen, 2 Children");
    }

    #[test]
    fn test_traveler_slots_order_and_ids() {
        let counts = PassengerCounts {
            adults: 2,
            teens: 0,
            children: 1,
            infants: 1,
        };
        let slots = traveler_slots(&counts);
        let ids: Vec<&str> = slots.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["adults-1", "adults-2", "children-1", "infants-1"]);
        assert_eq!(slots[0].label, "Adult 1");
        assert_eq!(slots[3].label, "Infant 1");
    }
}
