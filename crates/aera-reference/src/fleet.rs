//! Fleet table
//!
//! The five aircraft types AERA operates, keyed by slug. The estimator
//! depends on `range_ordered_slugs` being strictly shortest-to-longest
//! range; the distance-capability check carries a 500 km diversion buffer.

use serde::{Deserialize, Serialize};

use crate::{ReferenceError, Result};

/// Extra range margin required beyond the direct distance, in km.
pub const RANGE_BUFFER_KM: f64 = 500.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AircraftSpecs {
    pub cruise_speed_kmh: u32,
    pub wingspan_m: f64,
    pub engines: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aircraft {
    pub slug: String,
    pub name: String,
    pub range_km: f64,
    pub seats: u32,
    pub role: String,
    pub specs: AircraftSpecs,
}

pub struct FleetRegistry {
    aircraft: Vec<Aircraft>,
}

impl FleetRegistry {
    pub fn new() -> Self {
        Self {
            aircraft: Vec::with_capacity(5),
        }
    }

    /// The current AERA fleet, in range order.
    pub fn with_current_fleet() -> Self {
        let mut registry = Self::new();
        registry.load_fleet();
        registry
    }

    fn load_fleet(&mut self) {
        // (slug, name, range km, seats, role, cruise km/h, wingspan m, engines)
        let rows: &[(&str, &str, f64, u32, &str, u32, f64, u8)] = &[
            ("a320neo", "Airbus A320neo", 6300.0, 180, "Short and medium-haul workhorse", 829, 35.8, 2),
            ("a321xlr", "Airbus A321XLR", 8700.0, 206, "Long-thin narrowbody missions", 829, 35.8, 2),
            ("b787", "Boeing 787-9 Dreamliner", 14140.0, 296, "Long-haul twin with flexible capacity", 903, 60.1, 2),
            ("a350xwb", "Airbus A350-900", 15000.0, 325, "High-capacity long-haul flagship", 903, 64.8, 2),
            ("b777x", "Boeing 777-8", 16170.0, 384, "Ultra-long-range trunk routes", 896, 71.8, 2),
        ];

        for &(slug, name, range_km, seats, role, cruise, wingspan, engines) in rows {
            self.aircraft.push(Aircraft {
                slug: slug.to_string(),
                name: name.to_string(),
                range_km,
                seats,
                role: role.to_string(),
                specs: AircraftSpecs {
                    cruise_speed_kmh: cruise,
                    wingspan_m: wingspan,
                    engines,
                },
            });
        }
    }

    pub fn len(&self) -> usize {
        self.aircraft.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aircraft.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Aircraft> {
        self.aircraft.iter()
    }

    pub fn find(&self, slug: &str) -> Option<&Aircraft> {
        self.aircraft.iter().find(|a| a.slug == slug)
    }

    pub fn get(&self, slug: &str) -> Result<&Aircraft> {
        self.find(slug)
            .ok_or_else(|| ReferenceError::AircraftNotFound(slug.to_string()))
    }

    /// Slugs ordered shortest to longest range.
    pub fn range_ordered_slugs(&self) -> Vec<&str> {
        self.aircraft.iter().map(|a| a.slug.as_str()).collect()
    }

    /// Whether a type can fly the distance, including the diversion buffer.
    /// Unknown slugs cannot fly anything.
    pub fn can_fly_distance(&self, slug: &str, distance_km: f64) -> bool {
        self.find(slug)
            .map(|a| a.range_km + RANGE_BUFFER_KM >= distance_km)
            .unwrap_or(false)
    }
}

impl Default for FleetRegistry {
    fn default() -> Self {
        Self::new()
    }
}
