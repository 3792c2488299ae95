//! Booking flow state machine.
//!
//! Drives a booking from search through seat selection, traveler details,
//! payment, and the confirmation summary. Transitions are guarded: calls
//! that are invalid for the current step record an error banner (or are
//! ignored) instead of moving the flow.

use aera_engine::types::{FlightOption, SearchRequest, SearchResults, TripType};
use aera_engine::validate::validate_search_input_on;
use aera_reference::ReferenceData;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::forms::{
    confirmation_message, generate_booking_reference, reconcile_travelers,
    validate_passenger_form_on, validate_payment_form_on, PassengerForm, PaymentForm,
};
use crate::manifest::{traveler_slots, TravelerSlot};
use crate::store::{LastSearchStore, SavedSearch};

/// Steps of the booking flow, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStep {
    /// Editing the search form
    SearchForm,

    /// Choosing an outbound flight
    SelectOutbound,

    /// Choosing a return flight (round trips only)
    SelectReturn,

    /// Entering contact and traveler details
    PassengerInfo,

    /// Entering payment details
    Payment,

    /// Booking confirmed
    Summary,
}

/// Everything accumulated across the flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingContext {
    pub step: BookingStep,
    pub request: Option<SearchRequest>,
    pub results: Option<SearchResults>,
    pub selected_outbound: Option<FlightOption>,
    pub selected_return: Option<FlightOption>,
    pub passenger_form: PassengerForm,
    pub payment_form: PaymentForm,
    pub booking_reference: Option<String>,
    /// Error banner for the current step
    pub error: Option<String>,
    /// Status banner, set on confirmation
    pub message: Option<String>,
}

impl Default for BookingContext {
    fn default() -> Self {
        Self {
            step: BookingStep::SearchForm,
            request: None,
            results: None,
            selected_outbound: None,
            selected_return: None,
            passenger_form: PassengerForm::default(),
            payment_form: PaymentForm::default(),
            booking_reference: None,
            error: None,
            message: None,
        }
    }
}

/// Booking flow controller.
pub struct BookingFlow {
    context: BookingContext,
    store: Option<LastSearchStore>,
}

impl BookingFlow {
    pub fn new() -> Self {
        Self {
            context: BookingContext::default(),
            store: None,
        }
    }

    /// A flow that records each successful search in `store`.
    pub fn with_store(store: LastSearchStore) -> Self {
        Self {
            context: BookingContext::default(),
            store: Some(store),
        }
    }

    pub fn context(&self) -> &BookingContext {
        &self.context
    }

    pub fn step(&self) -> BookingStep {
        self.context.step
    }

    pub fn error(&self) -> Option<&str> {
        self.context.error.as_deref()
    }

    /// Traveler slots for the current request's manifest.
    pub fn traveler_slots(&self) -> Vec<TravelerSlot> {
        self.context
            .request
            .as_ref()
            .map(|request| traveler_slots(&request.passengers))
            .unwrap_or_default()
    }

    fn is_round_trip(&self) -> bool {
        matches!(
            self.context.request.as_ref().map(|r| r.trip_type),
            Some(TripType::RoundTrip)
        )
    }

    /// Validate and run a search, then move to outbound selection.
    /// Validation failures keep the flow on the search form.
    pub fn submit_search_on(
        &mut self,
        reference: &ReferenceData,
        request: SearchRequest,
        today: NaiveDate,
    ) {
        if self.context.step != BookingStep::SearchForm {
            return;
        }
        if let Err(error) = validate_search_input_on(&reference.metros, &request, today) {
            self.context.error = Some(error.to_string());
            return;
        }
        let results = aera_engine::generate_search_results(reference, &request);
        debug!(
            "Search {} -> {}: {} outbound, {} return options",
            request.from_code,
            request.to_code,
            results.outbound_options.len(),
            results.return_options.len()
        );
        if let Some(store) = &self.store {
            store.save(&SavedSearch::from(&request));
        }
        reconcile_travelers(
            &mut self.context.passenger_form,
            &traveler_slots(&request.passengers),
        );
        self.context.request = Some(request);
        self.context.results = Some(results);
        self.context.selected_outbound = None;
        self.context.selected_return = None;
        self.context.error = None;
        self.context.step = BookingStep::SelectOutbound;
    }

    pub fn submit_search(&mut self, reference: &ReferenceData, request: SearchRequest) {
        self.submit_search_on(reference, request, Local::now().date_naive());
    }

    /// Pick an outbound option by id. Unknown ids record an error.
    pub fn select_outbound(&mut self, option_id: &str) {
        if self.context.step != BookingStep::SelectOutbound {
            return;
        }
        let option = self
            .context
            .results
            .as_ref()
            .and_then(|r| r.outbound_options.iter().find(|o| o.id == option_id))
            .cloned();
        match option {
            Some(option) => {
                self.context.selected_outbound = Some(option);
                self.context.error = None;
                self.context.step = if self.is_round_trip() {
                    BookingStep::SelectReturn
                } else {
                    BookingStep::PassengerInfo
                };
            }
            None => {
                self.context.error = Some("Select an outbound flight to continue.".to_string());
            }
        }
    }

    /// Pick a return option by id. Round trips only.
    pub fn select_return(&mut self, option_id: &str) {
        if self.context.step != BookingStep::SelectReturn {
            return;
        }
        let option = self
            .context
            .results
            .as_ref()
            .and_then(|r| r.return_options.iter().find(|o| o.id == option_id))
            .cloned();
        match option {
            Some(option) => {
                self.context.selected_return = Some(option);
                self.context.error = None;
                self.context.step = BookingStep::PassengerInfo;
            }
            None => {
                self.context.error = Some("Select a return flight to continue.".to_string());
            }
        }
    }

    /// Submit traveler details and move to payment.
    pub fn submit_passenger_form_on(&mut self, form: PassengerForm, today: NaiveDate) {
        if self.context.step != BookingStep::PassengerInfo {
            return;
        }
        let slots = self.traveler_slots();
        if let Err(error) = validate_passenger_form_on(&form, &slots, today) {
            self.context.error = Some(error.to_string());
            return;
        }
        self.context.passenger_form = form;
        self.context.error = None;
        self.context.step = BookingStep::Payment;
    }

    pub fn submit_passenger_form(&mut self, form: PassengerForm) {
        self.submit_passenger_form_on(form, Local::now().date_naive());
    }

    /// Authorize the simulated payment and confirm the booking.
    pub fn confirm_booking_on(&mut self, form: PaymentForm, today: NaiveDate) {
        if self.context.step != BookingStep::Payment {
            return;
        }
        if let Err(error) = validate_payment_form_on(&form, today) {
            self.context.error = Some(error.to_string());
            return;
        }
        // Re-confirming after a Back from the summary keeps the same reference.
        let reference = self
            .context
            .booking_reference
            .take()
            .unwrap_or_else(generate_booking_reference);
        self.context.message = Some(confirmation_message(&form.card_number, &reference));
        self.context.booking_reference = Some(reference);
        self.context.payment_form = form;
        self.context.error = None;
        self.context.step = BookingStep::Summary;
    }

    pub fn confirm_booking(&mut self, form: PaymentForm) {
        self.confirm_booking_on(form, Local::now().date_naive());
    }

    /// Step back one screen, clearing banners. Stepping back from the
    /// summary keeps the issued booking reference.
    pub fn back(&mut self) {
        self.context.error = None;
        self.context.message = None;
        self.context.step = match self.context.step {
            BookingStep::SearchForm => return,
            BookingStep::SelectOutbound => BookingStep::SearchForm,
            BookingStep::SelectReturn => BookingStep::SelectOutbound,
            BookingStep::PassengerInfo => {
                if self.is_round_trip() {
                    BookingStep::SelectReturn
                } else {
                    BookingStep::SelectOutbound
                }
            }
            BookingStep::Payment => BookingStep::PassengerInfo,
            BookingStep::Summary => BookingStep::Payment,
        };
    }

    /// Combined subtotal of the selected legs.
    pub fn total_due(&self) -> u32 {
        self.context
            .selected_outbound
            .iter()
            .chain(self.context.selected_return.iter())
            .map(|option| option.pricing.subtotal)
            .sum()
    }
}

impl Default for BookingFlow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::TravelerDetails;
    use aera_engine::types::{Cabin, PassengerCounts};
    use std::collections::BTreeMap;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()
    }

    fn request(trip_type: TripType) -> SearchRequest {
        SearchRequest {
            from_code: "BUE".to_string(),
            to_code: "MAD".to_string(),
            departure_date: NaiveDate::from_ymd_opt(2026, 9, 11).unwrap(),
            return_date: match trip_type {
                TripType::RoundTrip => NaiveDate::from_ymd_opt(2026, 9, 18),
                TripType::OneWay => None,
            },
            trip_type,
            cabin: Cabin::Economy,
            passengers: PassengerCounts::default(),
            preferred_aircraft: None,
        }
    }

    fn passenger_form() -> PassengerForm {
        PassengerForm {
            contact_first_name: "Ana".to_string(),
            contact_last_name: "Pereyra".to_string(),
            contact_email: "ana@example.com".to_string(),
            contact_phone: "+54 11 5555 0101".to_string(),
            travelers: BTreeMap::from([(
                "adults-1".to_string(),
                TravelerDetails {
                    first_name: "Ana".to_string(),
                    last_name: "Pereyra".to_string(),
                    date_of_birth: "1988-03-14".to_string(),
                    passport: "AAC032994".to_string(),
                },
            )]),
        }
    }

    fn payment_form() -> PaymentForm {
        PaymentForm {
            card_number: "4111 1111 1111 1111".to_string(),
            cardholder_name: "ANA PEREYRA".to_string(),
            expiry_month: "9".to_string(),
            expiry_year: "28".to_string(),
            cvv: "123".to_string(),
            billing_zip: "C1043".to_string(),
        }
    }

    #[test]
    fn test_one_way_flow_to_summary() {
        let reference = ReferenceData::standard();
        let mut flow = BookingFlow::new();

        flow.submit_search_on(&reference, request(TripType::OneWay), today());
        assert_eq!(flow.step(), BookingStep::SelectOutbound);
        assert!(flow.error().is_none());

        let outbound_id = flow.context().results.as_ref().unwrap().outbound_options[0]
            .id
            .clone();
        flow.select_outbound(&outbound_id);
        assert_eq!(flow.step(), BookingStep::PassengerInfo);

        flow.submit_passenger_form_on(passenger_form(), today());
        assert_eq!(flow.step(), BookingStep::Payment);

        flow.confirm_booking_on(payment_form(), today());
        assert_eq!(flow.step(), BookingStep::Summary);
        let context = flow.context();
        assert_eq!(context.booking_reference.as_ref().unwrap().len(), 6);
        assert!(context.message.as_ref().unwrap().contains("**** **** **** 1111"));
        assert!(flow.total_due() > 0);
    }

    #[test]
    fn test_round_trip_requires_return_selection() {
        let reference = ReferenceData::standard();
        let mut flow = BookingFlow::new();
        flow.submit_search_on(&reference, request(TripType::RoundTrip), today());

        let outbound_id = flow.context().results.as_ref().unwrap().outbound_options[0]
            .id
            .clone();
        flow.select_outbound(&outbound_id);
        assert_eq!(flow.step(), BookingStep::SelectReturn);

        let return_id = flow.context().results.as_ref().unwrap().return_options[0]
            .id
            .clone();
        flow.select_return(&return_id);
        assert_eq!(flow.step(), BookingStep::PassengerInfo);

        let one_leg = flow.context().selected_outbound.as_ref().unwrap().pricing.subtotal;
        assert!(flow.total_due() > one_leg);
    }

    #[test]
    fn test_invalid_search_stays_on_form() {
        let reference = ReferenceData::standard();
        let mut flow = BookingFlow::new();
        let mut req = request(TripType::OneWay);
        req.to_code = "BUE".to_string();
        flow.submit_search_on(&reference, req, today());
        assert_eq!(flow.step(), BookingStep::SearchForm);
        assert_eq!(
            flow.error(),
            Some("Origin and destination must be different.")
        );
    }

    #[test]
    fn test_unknown_selection_records_error() {
        let reference = ReferenceData::standard();
        let mut flow = BookingFlow::new();
        flow.submit_search_on(&reference, request(TripType::OneWay), today());
        flow.select_outbound("outbound-NA0000-9");
        assert_eq!(flow.step(), BookingStep::SelectOutbound);
        assert!(flow.error().is_some());
    }

    #[test]
    fn test_form_error_blocks_advance() {
        let reference = ReferenceData::standard();
        let mut flow = BookingFlow::new();
        flow.submit_search_on(&reference, request(TripType::OneWay), today());
        let outbound_id = flow.context().results.as_ref().unwrap().outbound_options[0]
            .id
            .clone();
        flow.select_outbound(&outbound_id);

        let mut form = passenger_form();
        form.contact_email = "not-an-email".to_string();
        flow.submit_passenger_form_on(form, today());
        assert_eq!(flow.step(), BookingStep::PassengerInfo);
        assert_eq!(flow.error(), Some("Enter a valid contact email."));
    }

    #[test]
    fn test_back_clears_banners() {
        let reference = ReferenceData::standard();
        let mut flow = BookingFlow::new();
        flow.submit_search_on(&reference, request(TripType::OneWay), today());
        flow.select_outbound("bogus");
        assert!(flow.error().is_some());

        flow.back();
        assert_eq!(flow.step(), BookingStep::SearchForm);
        assert!(flow.error().is_none());

        // Already on the first step; back is a no-op.
        flow.back();
        assert_eq!(flow.step(), BookingStep::SearchForm);
    }

    #[test]
    fn test_new_search_reconciles_traveler_entries() {
        let reference = ReferenceData::standard();
        let mut flow = BookingFlow::new();

        let mut req = request(TripType::OneWay);
        req.passengers.adults = 2;
        flow.submit_search_on(&reference, req, today());

        let mut form = passenger_form();
        form.travelers.insert(
            "adults-2".to_string(),
            TravelerDetails {
                first_name: "Luis".to_string(),
                last_name: "Pereyra".to_string(),
                date_of_birth: "1990-07-02".to_string(),
                passport: "AAC551200".to_string(),
            },
        );
        flow.context.passenger_form = form;

        flow.back();
        assert_eq!(flow.step(), BookingStep::SearchForm);

        let mut req = request(TripType::OneWay);
        req.passengers.children = 1;
        flow.submit_search_on(&reference, req, today());

        let ids: Vec<&str> = flow
            .context()
            .passenger_form
            .travelers
            .keys()
            .map(|id| id.as_str())
            .collect();
        assert_eq!(ids, vec!["adults-1", "children-1"]);
        assert_eq!(
            flow.context().passenger_form.travelers["adults-1"].first_name,
            "Ana"
        );
        assert_eq!(
            flow.context().passenger_form.travelers["children-1"],
            TravelerDetails::default()
        );
    }

    #[test]
    fn test_successful_search_is_saved_to_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("last-search.json");
        let reference = ReferenceData::standard();

        let mut flow = BookingFlow::with_store(LastSearchStore::new(path.clone()));
        flow.submit_search_on(&reference, request(TripType::OneWay), today());
        assert_eq!(flow.step(), BookingStep::SelectOutbound);

        let saved = LastSearchStore::new(path).load().unwrap();
        assert_eq!(saved.from_code, "BUE");
        assert_eq!(saved.to_code, "MAD");
        assert_eq!(saved.to_request().departure_date, request(TripType::OneWay).departure_date);
    }

    #[test]
    fn test_rejected_search_is_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("last-search.json");
        let reference = ReferenceData::standard();

        let mut flow = BookingFlow::with_store(LastSearchStore::new(path.clone()));
        let mut req = request(TripType::OneWay);
        req.to_code = "BUE".to_string();
        flow.submit_search_on(&reference, req, today());

        assert!(LastSearchStore::new(path).load().is_none());
    }

    #[test]
    fn test_back_from_summary_keeps_reference_on_reconfirm() {
        let reference = ReferenceData::standard();
        let mut flow = BookingFlow::new();
        flow.submit_search_on(&reference, request(TripType::OneWay), today());
        let outbound_id = flow.context().results.as_ref().unwrap().outbound_options[0]
            .id
            .clone();
        flow.select_outbound(&outbound_id);
        flow.submit_passenger_form_on(passenger_form(), today());
        flow.confirm_booking_on(payment_form(), today());
        assert_eq!(flow.step(), BookingStep::Summary);
        let first_reference = flow.context().booking_reference.clone().unwrap();

        flow.back();
        assert_eq!(flow.step(), BookingStep::Payment);
        assert!(flow.context().message.is_none());
        assert_eq!(
            flow.context().booking_reference.as_deref(),
            Some(first_reference.as_str())
        );

        flow.confirm_booking_on(payment_form(), today());
        assert_eq!(flow.step(), BookingStep::Summary);
        assert_eq!(
            flow.context().booking_reference.as_deref(),
            Some(first_reference.as_str())
        );
    }

    #[test]
    fn test_guards_ignore_out_of_step_calls() {
        let mut flow = BookingFlow::new();
        flow.select_outbound("anything");
        flow.confirm_booking_on(payment_form(), today());
        assert_eq!(flow.step(), BookingStep::SearchForm);
    }
}
