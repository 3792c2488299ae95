//! Traveler and payment form validation.
//!
//! Field rules mirror what the booking UI enforces; errors carry the
//! exact message shown to the traveler. Validation reports the first
//! failing field, matching how the form surfaces a single error banner.

use chrono::{Datelike, Local, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::manifest::TravelerSlot;

/// Characters used for booking references. Skips I/O/0/1 lookalikes.
const REFERENCE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const REFERENCE_LEN: usize = 6;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Enter contact first and last name.")]
    ContactName,
    #[error("Enter a valid contact email.")]
    ContactEmail,
    #[error("Enter a contact phone number.")]
    ContactPhone,
    #[error("Complete details for {0}.")]
    TravelerDetailsIncomplete(String),
    #[error("Enter a valid date of birth for {0}.")]
    TravelerDateOfBirth(String),
    #[error("Enter a valid card number.")]
    CardNumber,
    #[error("Enter the cardholder name.")]
    CardholderName,
    #[error("Enter a valid expiry month.")]
    ExpiryMonth,
    #[error("Enter a valid expiry year.")]
    ExpiryYear,
    #[error("Card expiry date is in the past.")]
    CardExpired,
    #[error("Enter a valid security code.")]
    SecurityCode,
    #[error("Enter a billing ZIP/postal code.")]
    BillingZip,
}

/// Per-traveler details keyed to a manifest slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelerDetails {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub passport: String,
}

/// Contact block plus one details entry per traveler slot, keyed by the
/// slot id so entries survive manifest changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerForm {
    pub contact_first_name: String,
    pub contact_last_name: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub travelers: BTreeMap<String, TravelerDetails>,
}

/// Re-key the traveler entries against a changed manifest: entries for
/// slots that still exist are kept, removed slots are dropped, and new
/// slots start blank.
pub fn reconcile_travelers(form: &mut PassengerForm, slots: &[TravelerSlot]) {
    let mut next = BTreeMap::new();
    for slot in slots {
        let details = form.travelers.remove(&slot.id).unwrap_or_default();
        next.insert(slot.id.clone(), details);
    }
    form.travelers = next;
}

/// local-part@domain.tld shape, no whitespace.
fn is_valid_email(value: &str) -> bool {
    let mut parts = value.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return false,
    };
    if local.is_empty() || local.contains(char::is_whitespace) {
        return false;
    }
    let mut domain_parts = domain.rsplitn(2, '.');
    let (tld, host) = match (domain_parts.next(), domain_parts.next()) {
        (Some(tld), Some(host)) => (tld, host),
        _ => return false,
    };
    !tld.is_empty()
        && !host.is_empty()
        && !domain.contains(char::is_whitespace)
}

/// Validate the passenger form against the manifest slots, checking dates
/// of birth against a fixed reference date.
pub fn validate_passenger_form_on(
    form: &PassengerForm,
    slots: &[TravelerSlot],
    today: NaiveDate,
) -> Result<(), FormError> {
    if form.contact_first_name.trim().is_empty() || form.contact_last_name.trim().is_empty() {
        return Err(FormError::ContactName);
    }
    if !is_valid_email(form.contact_email.trim()) {
        return Err(FormError::ContactEmail);
    }
    if form.contact_phone.trim().is_empty() {
        return Err(FormError::ContactPhone);
    }
    let blank = TravelerDetails::default();
    for slot in slots {
        let details = form.travelers.get(&slot.id).unwrap_or(&blank);
        if details.first_name.trim().is_empty()
            || details.last_name.trim().is_empty()
            || details.date_of_birth.trim().is_empty()
            || details.passport.trim().is_empty()
        {
            return Err(FormError::TravelerDetailsIncomplete(slot.label.clone()));
        }
        let born = NaiveDate::parse_from_str(details.date_of_birth.trim(), "%Y-%m-%d");
        match born {
            Ok(date) if date < today => {}
            _ => return Err(FormError::TravelerDateOfBirth(slot.label.clone())),
        }
    }
    Ok(())
}

pub fn validate_passenger_form(
    form: &PassengerForm,
    slots: &[TravelerSlot],
) -> Result<(), FormError> {
    validate_passenger_form_on(form, slots, Local::now().date_naive())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentForm {
    pub card_number: String,
    pub cardholder_name: String,
    pub expiry_month: String,
    pub expiry_year: String,
    pub cvv: String,
    pub billing_zip: String,
}

fn digits_of(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Validate the payment form, checking expiry against a fixed reference
/// date. Two-digit years are taken as 20xx.
pub fn validate_payment_form_on(form: &PaymentForm, today: NaiveDate) -> Result<(), FormError> {
    let card_digits = digits_of(&form.card_number);
    if card_digits.len() < 13 || card_digits.len() > 19 {
        return Err(FormError::CardNumber);
    }
    if form.cardholder_name.trim().is_empty() {
        return Err(FormError::CardholderName);
    }
    let month: u32 = form
        .expiry_month
        .trim()
        .parse()
        .map_err(|_| FormError::ExpiryMonth)?;
    if !(1..=12).contains(&month) {
        return Err(FormError::ExpiryMonth);
    }
    let raw_year = form.expiry_year.trim();
    let mut year: i32 = raw_year.parse().map_err(|_| FormError::ExpiryYear)?;
    // Two-digit years are taken as 20xx; anything else is literal.
    if raw_year.len() == 2 {
        year += 2000;
    }
    if year < today.year() || (year == today.year() && month < today.month()) {
        return Err(FormError::CardExpired);
    }
    let cvv = digits_of(&form.cvv);
    if cvv.len() < 3 || cvv.len() > 4 {
        return Err(FormError::SecurityCode);
    }
    if form.billing_zip.trim().is_empty() {
        return Err(FormError::BillingZip);
    }
    Ok(())
}

pub fn validate_payment_form(form: &PaymentForm) -> Result<(), FormError> {
    validate_payment_form_on(form, Local::now().date_naive())
}

/// Random six-character booking reference.
pub fn generate_booking_reference() -> String {
    let mut rng = rand::thread_rng();
    (0..REFERENCE_LEN)
        .map(|_| REFERENCE_ALPHABET[rng.gen_range(0..REFERENCE_ALPHABET.len())] as char)
        .collect()
}

/// "**** **** **** 1234" style display form of a card number.
pub fn mask_card_number(card_number: &str) -> String {
    let digits = digits_of(card_number);
    let tail_start = digits.len().saturating_sub(4);
    let mut tail: String = digits[tail_start..].to_string();
    while tail.len() < 4 {
        tail.insert(0, '*');
    }
    format!("**** **** **** {}", tail)
}

/// Confirmation banner shown after a simulated payment.
pub fn confirmation_message(card_number: &str, booking_reference: &str) -> String {
    format!(
        "Payment authorized on {}. Booking {} confirmed. Receipt generated (demo).",
        mask_card_number(card_number),
        booking_reference
    )
}
