//! AERA Network Reference Data
//!
//! Immutable lookup tables consumed by the demand estimator and the flight
//! engine: the metro table (50 city-level travel markets), the five-type
//! fleet, per-metro demand weights, hub tiers, and the registered
//! trunk/premium/shuttle route sets.
//!
//! All data is loaded once at session start and read-only thereafter.
//! Lookups for unknown codes are recoverable conditions, never panics:
//! use the `find`/`lookup` accessors when a miss should degrade gracefully.

use std::f64::consts::PI;

use thiserror::Error;

pub mod fleet;
pub mod metros;
pub mod network;

pub use fleet::{Aircraft, AircraftSpecs, FleetRegistry};
pub use metros::{Metro, MetroRegistry, Region};
pub use network::{normalize_pair, HubTier};

#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("Metro not found: {0}")]
    MetroNotFound(String),
    #[error("Aircraft not found: {0}")]
    AircraftNotFound(String),
}

pub type Result<T> = std::result::Result<T, ReferenceError>;

/// Mean Earth radius used for great-circle distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// The complete reference feed: metros plus fleet. Built once per session.
pub struct ReferenceData {
    pub metros: MetroRegistry,
    pub fleet: FleetRegistry,
}

impl ReferenceData {
    /// The standard AERA network as published.
    pub fn standard() -> Self {
        Self {
            metros: MetroRegistry::with_network_metros(),
            fleet: FleetRegistry::with_current_fleet(),
        }
    }
}

/// Haversine distance between two points in km.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1 * PI / 180.0;
    let lat2_rad = lat2 * PI / 180.0;
    let dlat = (lat2 - lat1) * PI / 180.0;
    let dlon = (lon2 - lon1) * PI / 180.0;

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}
