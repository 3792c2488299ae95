//! Metro table
//!
//! A metro is a city-level travel market keyed by a 3-letter code and mapped
//! to its primary airport. Feeder hubs are weak references by code: they are
//! routing hints only, never ownership.

use serde::{Deserialize, Serialize};

use crate::{ReferenceError, Result};

/// Network region. Intercontinental demand bonuses key off region changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    Americas,
    Europe,
    MiddleEast,
    AsiaPacific,
}

impl Region {
    pub fn label(&self) -> &'static str {
        match self {
            Region::Americas => "Americas",
            Region::Europe => "Europe",
            Region::MiddleEast => "Middle East",
            Region::AsiaPacific => "Asia-Pacific",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metro {
    pub code: String,
    pub city: String,
    pub airport: String,
    pub lat: f64,
    pub lon: f64,
    pub region: Region,
    /// Standard-time offset from UTC, in hours. May be fractional (DEL is +5.5).
    pub utc_offset_hours: f64,
    /// Mandatory intermediate hub for long-haul / cross-region departures.
    pub feeder_hub: Option<String>,
}

impl Metro {
    pub fn distance_to_km(&self, other: &Metro) -> f64 {
        crate::haversine_km(self.lat, self.lon, other.lat, other.lon)
    }

    /// Label shown in search fields and used for free-text resolution.
    pub fn search_label(&self) -> String {
        format!("{} ({})", self.city, self.code)
    }
}

/// Offset label for schedule display, e.g. "UTC-3" or "UTC+5:30".
pub fn format_utc_offset_label(offset_hours: f64) -> String {
    let sign = if offset_hours < 0.0 { '-' } else { '+' };
    let abs = offset_hours.abs();
    let whole = abs.trunc() as i64;
    let minutes = ((abs - abs.trunc()) * 60.0).round() as i64;
    if minutes == 0 {
        format!("UTC{}{}", sign, whole)
    } else {
        format!("UTC{}{}:{:02}", sign, whole, minutes)
    }
}

pub struct MetroRegistry {
    metros: Vec<Metro>,
}

impl MetroRegistry {
    pub fn new() -> Self {
        Self {
            metros: Vec::with_capacity(50),
        }
    }

    /// The published AERA network: 50 metros across four regions.
    pub fn with_network_metros() -> Self {
        let mut registry = Self::new();
        registry.load_network();
        registry
    }

    fn load_network(&mut self) {
        // (code, city, airport, lat, lon, region, utc offset, feeder hub)
        let rows: &[(&str, &str, &str, f64, f64, Region, f64, Option<&str>)] = &[
            // Americas
            ("MVD", "Montevideo", "MVD", -34.9011, -56.1645, Region::Americas, -3.0, Some("BUE")),
            ("BUE", "Buenos Aires", "EZE", -34.6037, -58.3816, Region::Americas, -3.0, None),
            ("SAO", "Sao Paulo", "GRU", -23.5505, -46.6333, Region::Americas, -3.0, None),
            ("RIO", "Rio de Janeiro", "GIG", -22.9068, -43.1729, Region::Americas, -3.0, Some("SAO")),
            ("SCL", "Santiago", "SCL", -33.4489, -70.6693, Region::Americas, -4.0, Some("BUE")),
            ("LIM", "Lima", "LIM", -12.0464, -77.0428, Region::Americas, -5.0, Some("BOG")),
            ("BOG", "Bogota", "BOG", 4.7110, -74.0721, Region::Americas, -5.0, None),
            ("PTY", "Panama City", "PTY", 8.9824, -79.5199, Region::Americas, -5.0, None),
            ("MIA", "Miami", "MIA", 25.7617, -80.1918, Region::Americas, -5.0, None),
            ("NYC", "New York", "JFK", 40.7128, -74.0060, Region::Americas, -5.0, None),
            ("LAX", "Los Angeles", "LAX", 34.0522, -118.2437, Region::Americas, -8.0, None),
            ("SFO", "San Francisco", "SFO", 37.7749, -122.4194, Region::Americas, -8.0, None),
            ("ORD", "Chicago", "ORD", 41.8781, -87.6298, Region::Americas, -6.0, None),
            ("ATL", "Atlanta", "ATL", 33.7490, -84.3880, Region::Americas, -5.0, None),
            ("DFW", "Dallas", "DFW", 32.7767, -96.7970, Region::Americas, -6.0, None),
            ("YYZ", "Toronto", "YYZ", 43.6532, -79.3832, Region::Americas, -5.0, None),
            ("MEX", "Mexico City", "MEX", 19.4326, -99.1332, Region::Americas, -6.0, None),
            // Europe
            ("LON", "London", "LHR", 51.5074, -0.1278, Region::Europe, 0.0, None),
            ("PAR", "Paris", "CDG", 48.8566, 2.3522, Region::Europe, 1.0, None),
            ("MAD", "Madrid", "MAD", 40.4168, -3.7038, Region::Europe, 1.0, None),
            ("ROM", "Rome", "FCO", 41.9028, 12.4964, Region::Europe, 1.0, Some("PAR")),
            ("AMS", "Amsterdam", "AMS", 52.3676, 4.9041, Region::Europe, 1.0, None),
            ("FRA", "Frankfurt", "FRA", 50.1109, 8.6821, Region::Europe, 1.0, None),
            ("MUC", "Munich", "MUC", 48.1351, 11.5820, Region::Europe, 1.0, Some("FRA")),
            ("BER", "Berlin", "BER", 52.5200, 13.4050, Region::Europe, 1.0, Some("FRA")),
            ("BCN", "Barcelona", "BCN", 41.3851, 2.1734, Region::Europe, 1.0, None),
            ("LIS", "Lisbon", "LIS", 38.7223, -9.1393, Region::Europe, 0.0, Some("MAD")),
            ("ATH", "Athens", "ATH", 37.9838, 23.7275, Region::Europe, 2.0, Some("IST")),
            // Middle East
            ("DXB", "Dubai", "DXB", 25.2048, 55.2708, Region::MiddleEast, 4.0, None),
            ("DOH", "Doha", "DOH", 25.2854, 51.5310, Region::MiddleEast, 3.0, None),
            ("IST", "Istanbul", "IST", 41.0082, 28.9784, Region::MiddleEast, 3.0, None),
            ("JED", "Jeddah", "JED", 21.4858, 39.1925, Region::MiddleEast, 3.0, Some("DXB")),
            ("RUH", "Riyadh", "RUH", 24.7136, 46.6753, Region::MiddleEast, 3.0, Some("DXB")),
            ("CAI", "Cairo", "CAI", 30.0444, 31.2357, Region::MiddleEast, 2.0, Some("DXB")),
            // Asia-Pacific
            ("SIN", "Singapore", "SIN", 1.3521, 103.8198, Region::AsiaPacific, 8.0, None),
            ("HKG", "Hong Kong", "HKG", 22.3193, 114.1694, Region::AsiaPacific, 8.0, None),
            ("TYO", "Tokyo", "HND", 35.6762, 139.6503, Region::AsiaPacific, 9.0, None),
            ("SYD", "Sydney", "SYD", -33.8688, 151.2093, Region::AsiaPacific, 10.0, None),
            ("BKK", "Bangkok", "BKK", 13.7563, 100.5018, Region::AsiaPacific, 7.0, Some("SIN")),
            ("SEL", "Seoul", "ICN", 37.5665, 126.9780, Region::AsiaPacific, 9.0, None),
            ("SHA", "Shanghai", "PVG", 31.2304, 121.4737, Region::AsiaPacific, 8.0, None),
            ("BJS", "Beijing", "PEK", 39.9042, 116.4074, Region::AsiaPacific, 8.0, None),
            ("DEL", "Delhi", "DEL", 28.6139, 77.2090, Region::AsiaPacific, 5.5, None),
            ("BOM", "Mumbai", "BOM", 19.0760, 72.8777, Region::AsiaPacific, 5.5, None),
            ("BLR", "Bengaluru", "BLR", 12.9716, 77.5946, Region::AsiaPacific, 5.5, Some("DEL")),
            ("KUL", "Kuala Lumpur", "KUL", 3.1390, 101.6869, Region::AsiaPacific, 8.0, None),
            ("CGK", "Jakarta", "CGK", -6.2088, 106.8456, Region::AsiaPacific, 7.0, None),
            ("MNL", "Manila", "MNL", 14.5995, 120.9842, Region::AsiaPacific, 8.0, Some("SIN")),
            ("MEL", "Melbourne", "MEL", -37.8136, 144.9631, Region::AsiaPacific, 10.0, None),
            ("AKL", "Auckland", "AKL", -36.8485, 174.7633, Region::AsiaPacific, 12.0, Some("SYD")),
        ];

        for &(code, city, airport, lat, lon, region, offset, feeder) in rows {
            self.metros.push(Metro {
                code: code.to_string(),
                city: city.to_string(),
                airport: airport.to_string(),
                lat,
                lon,
                region,
                utc_offset_hours: offset,
                feeder_hub: feeder.map(str::to_string),
            });
        }
    }

    pub fn len(&self) -> usize {
        self.metros.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metros.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Metro> {
        self.metros.iter()
    }

    /// Graceful lookup; unknown codes are a data-gap condition for callers.
    pub fn find(&self, code: &str) -> Option<&Metro> {
        self.metros.iter().find(|m| m.code == code)
    }

    pub fn get(&self, code: &str) -> Result<&Metro> {
        self.find(code)
            .ok_or_else(|| ReferenceError::MetroNotFound(code.to_string()))
    }

    /// UTC offset for a metro, 0 for unknown codes.
    pub fn utc_offset_hours(&self, code: &str) -> f64 {
        self.find(code).map(|m| m.utc_offset_hours).unwrap_or(0.0)
    }

    /// Metros ordered by city name, for form option lists.
    pub fn sorted_by_city(&self) -> Vec<&Metro> {
        let mut sorted: Vec<&Metro> = self.metros.iter().collect();
        sorted.sort_by(|a, b| a.city.cmp(&b.city));
        sorted
    }

    /// Resolve free search text to a metro code. Matches either the bare
    /// code or the "City (CODE)" label, case-insensitively. Empty or
    /// unrecognized text resolves to None.
    pub fn resolve(&self, text: &str) -> Option<&Metro> {
        let lowered = text.trim().to_lowercase();
        if lowered.is_empty() {
            return None;
        }
        self.metros.iter().find(|m| {
            m.code.to_lowercase() == lowered || m.search_label().to_lowercase() == lowered
        })
    }
}

impl Default for MetroRegistry {
    fn default() -> Self {
        Self::new()
    }
}
