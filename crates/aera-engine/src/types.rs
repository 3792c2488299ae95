//! Search request and flight option types
//!
//! Plain data exchanged with the presentation layer. Options are created
//! fresh per search submission and never mutated afterwards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TripType {
    OneWay,
    RoundTrip,
}

impl TripType {
    pub fn label(&self) -> &'static str {
        match self {
            TripType::OneWay => "One-way",
            TripType::RoundTrip => "Round-trip",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cabin {
    Economy,
    PremiumEconomy,
    Business,
    First,
}

impl Cabin {
    pub fn label(&self) -> &'static str {
        match self {
            Cabin::Economy => "Economy",
            Cabin::PremiumEconomy => "Premium Economy",
            Cabin::Business => "Business",
            Cabin::First => "First",
        }
    }

    pub fn price_multiplier(&self) -> f64 {
        match self {
            Cabin::Economy => 1.0,
            Cabin::PremiumEconomy => 1.65,
            Cabin::Business => 2.45,
            Cabin::First => 3.55,
        }
    }
}

/// One direction of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Leg {
    Outbound,
    Return,
}

impl Leg {
    pub fn label(&self) -> &'static str {
        match self {
            Leg::Outbound => "outbound",
            Leg::Return => "return",
        }
    }
}

/// Traveler category, in the fixed manifest order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PassengerCategory {
    Adults,
    Teens,
    Children,
    Infants,
}

impl PassengerCategory {
    pub const ALL: [PassengerCategory; 4] = [
        PassengerCategory::Adults,
        PassengerCategory::Teens,
        PassengerCategory::Children,
        PassengerCategory::Infants,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PassengerCategory::Adults => "Adults",
            PassengerCategory::Teens => "Teens",
            PassengerCategory::Children => "Children",
            PassengerCategory::Infants => "Infants",
        }
    }

    /// Singular label for manifest slots and summaries.
    pub fn singular(&self) -> &'static str {
        match self {
            PassengerCategory::Adults => "Adult",
            PassengerCategory::Teens => "Teen",
            PassengerCategory::Children => "Child",
            PassengerCategory::Infants => "Infant",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            PassengerCategory::Adults => "adults",
            PassengerCategory::Teens => "teens",
            PassengerCategory::Children => "children",
            PassengerCategory::Infants => "infants",
        }
    }

    /// Fare fraction of the adult price.
    pub fn price_multiplier(&self) -> f64 {
        match self {
            PassengerCategory::Adults => 1.0,
            PassengerCategory::Teens => 0.9,
            PassengerCategory::Children => 0.72,
            PassengerCategory::Infants => 0.15,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerCounts {
    pub adults: u32,
    pub teens: u32,
    pub children: u32,
    pub infants: u32,
}

impl PassengerCounts {
    pub fn count(&self, category: PassengerCategory) -> u32 {
        match category {
            PassengerCategory::Adults => self.adults,
            PassengerCategory::Teens => self.teens,
            PassengerCategory::Children => self.children,
            PassengerCategory::Infants => self.infants,
        }
    }

    pub fn total(&self) -> u32 {
        self.adults + self.teens + self.children + self.infants
    }
}

impl Default for PassengerCounts {
    fn default() -> Self {
        Self {
            adults: 1,
            teens: 0,
            children: 0,
            infants: 0,
        }
    }
}

/// User-owned search parameters. Mutable while the form is edited, treated
/// as immutable input the instant a search executes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub from_code: String,
    pub to_code: String,
    pub departure_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub trip_type: TripType,
    pub cabin: Cabin,
    pub passengers: PassengerCounts,
    pub preferred_aircraft: Option<String>,
}

/// One flown hop within a (possibly multi-hop) itinerary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub segment_index: usize,
    pub from_code: String,
    pub to_code: String,
    pub from_airport: String,
    pub to_airport: String,
    pub distance_km: u32,
    pub aircraft_slug: String,
    pub aircraft_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceItem {
    pub category: PassengerCategory,
    pub label: String,
    pub count: u32,
    pub each: u32,
    pub total: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub items: Vec<PriceItem>,
    pub subtotal: u32,
}

/// A single bookable schedule instance for one direction of a search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightOption {
    pub id: String,
    pub leg: Leg,
    pub flight_number: String,
    pub aircraft_slug: String,
    pub aircraft_name: String,
    pub segment_aircraft_names: Vec<String>,
    pub itinerary_codes: Vec<String>,
    pub itinerary_line: String,
    pub segments: Vec<Segment>,
    pub distance_km: u32,
    /// Local clock at the origin, "HH:MM".
    pub departure_time: String,
    /// Local clock at the destination, "HH:MM".
    pub arrival_time: String,
    pub departure_time_zone: String,
    pub arrival_time_zone: String,
    /// "+1d" style label; empty when arrival lands the same local day.
    pub day_shift: String,
    /// "Xh Ym".
    pub duration: String,
    pub departure_date: NaiveDate,
    pub cabin: Cabin,
    pub pricing: PriceBreakdown,
}

impl FlightOption {
    pub fn subtotal(&self) -> u32 {
        self.pricing.subtotal
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    pub outbound_options: Vec<FlightOption>,
    pub return_options: Vec<FlightOption>,
}
