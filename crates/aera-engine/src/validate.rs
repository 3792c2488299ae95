//! Search input validation.

use aera_reference::MetroRegistry;
use chrono::{Local, NaiveDate};
use thiserror::Error;

use crate::types::{SearchRequest, TripType};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("Select both origin and destination metros.")]
    UnknownMetro,
    #[error("Origin and destination must be different.")]
    SameMetro,
    #[error("Departure date cannot be in the past.")]
    DepartureInPast,
    #[error("Choose a return date for round-trip search.")]
    MissingReturnDate,
    #[error("Return date cannot be before departure date.")]
    ReturnBeforeDeparture,
}

/// Validate a search request against a fixed reference date. The date is a
/// parameter so callers and tests control what "today" means.
pub fn validate_search_input_on(
    metros: &MetroRegistry,
    request: &SearchRequest,
    today: NaiveDate,
) -> Result<(), SearchError> {
    let from = metros.find(&request.from_code);
    let to = metros.find(&request.to_code);
    if from.is_none() || to.is_none() {
        return Err(SearchError::UnknownMetro);
    }
    if request.from_code == request.to_code {
        return Err(SearchError::SameMetro);
    }
    if request.departure_date < today {
        return Err(SearchError::DepartureInPast);
    }
    if request.trip_type == TripType::RoundTrip {
        match request.return_date {
            None => return Err(SearchError::MissingReturnDate),
            Some(return_date) if return_date < request.departure_date => {
                return Err(SearchError::ReturnBeforeDeparture)
            }
            Some(_) => {}
        }
    }
    Ok(())
}

/// Validate against the local calendar date.
pub fn validate_search_input(
    metros: &MetroRegistry,
    request: &SearchRequest,
) -> Result<(), SearchError> {
    validate_search_input_on(metros, request, Local::now().date_naive())
}
