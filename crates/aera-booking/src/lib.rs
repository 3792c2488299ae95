//! Booking flow for the AERA network.
//!
//! A step machine from search to confirmation, with passenger manifest
//! rules, traveler and payment form validation, simulated payment
//! authorization, and last-search persistence.

pub mod flow;
pub mod forms;
pub mod manifest;
pub mod store;

pub use flow::{BookingContext, BookingFlow, BookingStep};
pub use forms::{reconcile_travelers, FormError, PassengerForm, PaymentForm, TravelerDetails};
pub use manifest::{
    adjust_passenger_count, passenger_summary, traveler_slots, Adjustment, TravelerSlot,
    MAX_TRAVELERS,
};
pub use store::{LastSearchStore, SavedSearch};
