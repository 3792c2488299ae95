//! Flight search engine for the AERA network.
//!
//! Takes a validated search request and produces a simulated day of
//! schedules: routings through feeder hubs, per-segment equipment,
//! timezone-aware clocks, and per-category pricing. Reference data and
//! demand scoring come from the `aera-reference` and `aera-demand` crates.

pub mod flights;
pub mod itinerary;
pub mod types;
pub mod validate;

pub use flights::generate_search_results;
pub use itinerary::build_itinerary;
pub use types::{
    Cabin, FlightOption, Leg, PassengerCounts, SearchRequest, SearchResults, TripType,
};
pub use validate::{validate_search_input, validate_search_input_on, SearchError};

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::flights::generate_flight_number;
    use aera_reference::ReferenceData;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn metro_code() -> impl Strategy<Value = String> {
        prop::sample::select(vec![
            "BUE", "MVD", "SAO", "SCL", "NYC", "MIA", "LON", "PAR", "MAD", "FRA", "IST", "DXB",
            "SIN", "SYD", "DEL", "BKK", "AKL", "MNL", "BLR", "JED",
        ])
        .prop_map(str::to_string)
    }

    proptest! {
        #[test]
        fn prop_flight_numbers_stay_in_range(
            route in "[A-Z]{3}(-[A-Z]{3}){1,3}",
            index in 0usize..4,
        ) {
            let date = NaiveDate::from_ymd_opt(2026, 9, 11).unwrap();
            let number = generate_flight_number(
                &route, date, Cabin::Economy, TripType::OneWay, Leg::Outbound, index,
            );
            prop_assert!(number.starts_with("NA"));
            let digits: u32 = number[2..].parse().unwrap();
            prop_assert!((1000..10000).contains(&digits));
        }

        #[test]
        fn prop_search_results_are_well_formed(
            from in metro_code(),
            to in metro_code(),
        ) {
            prop_assume!(from != to);
            let reference = ReferenceData::standard();
            let request = SearchRequest {
                from_code: from.clone(),
                to_code: to.clone(),
                departure_date: NaiveDate::from_ymd_opt(2026, 9, 11).unwrap(),
                return_date: None,
                trip_type: TripType::OneWay,
                cabin: Cabin::Business,
                passengers: PassengerCounts::default(),
                preferred_aircraft: None,
            };
            let results = generate_search_results(&reference, &request);
            prop_assert!(!results.outbound_options.is_empty());
            prop_assert!(results.outbound_options.len() <= 4);
            for option in &results.outbound_options {
                prop_assert_eq!(option.itinerary_codes.first().unwrap(), &from);
                prop_assert_eq!(option.itinerary_codes.last().unwrap(), &to);
                prop_assert_eq!(option.segments.len(), option.itinerary_codes.len() - 1);
                prop_assert!(option.subtotal() > 0);
                prop_assert!(!option.duration.is_empty());
            }
        }
    }
}
