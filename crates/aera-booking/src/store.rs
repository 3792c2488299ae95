//! Last-search persistence.
//!
//! Remembers the most recent search so the form can be prefilled on the
//! next visit. Storage failures are non-fatal: a missing or unreadable
//! slot just means no prefill.

use aera_engine::types::{Cabin, PassengerCounts, SearchRequest, TripType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSearch {
    pub from_code: String,
    pub to_code: String,
    pub departure_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub trip_type: TripType,
    pub cabin: Cabin,
    pub passengers: PassengerCounts,
}

impl From<&SearchRequest> for SavedSearch {
    fn from(request: &SearchRequest) -> Self {
        Self {
            from_code: request.from_code.clone(),
            to_code: request.to_code.clone(),
            departure_date: request.departure_date,
            return_date: request.return_date,
            trip_type: request.trip_type,
            cabin: request.cabin,
            passengers: request.passengers,
        }
    }
}

impl SavedSearch {
    pub fn to_request(&self) -> SearchRequest {
        SearchRequest {
            from_code: self.from_code.clone(),
            to_code: self.to_code.clone(),
            departure_date: self.departure_date,
            return_date: self.return_date,
            trip_type: self.trip_type,
            cabin: self.cabin,
            passengers: self.passengers,
            preferred_aircraft: None,
        }
    }
}

/// One-slot JSON store for the last search.
pub struct LastSearchStore {
    path: PathBuf,
}

impl LastSearchStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the saved search. Missing or corrupt data yields `None`.
    pub fn load(&self) -> Option<SavedSearch> {
        let raw = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(saved) => Some(saved),
            Err(error) => {
                warn!("Discarding corrupt saved search: {}", error);
                None
            }
        }
    }

    /// Persist the search. Failures are logged and swallowed.
    pub fn save(&self, search: &SavedSearch) {
        let serialized = match serde_json::to_string_pretty(search) {
            Ok(serialized) => serialized,
            Err(error) => {
                warn!("Could not serialize saved search: {}", error);
                return;
            }
        };
        if let Err(error) = fs::write(&self.path, serialized) {
            warn!("Could not persist saved search to {:?}: {}", self.path, error);
        }
    }
}
