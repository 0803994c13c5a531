//! Message catalog
//!
//! Handlers and services hold message *keys*; the catalog resolves them to
//! user-facing text. A locale table can replace this lookup without touching
//! call sites.

/// Short date/time display format for reservation pages.
pub const DATE_TIME_FORMAT_SHORT: &str = "%d %b %Y %H:%M";

/// Resolve a message key to its localized text.
///
/// Unknown keys resolve to the key itself so a missing entry is visible
/// instead of silently blank.
pub fn lang(key: &'static str) -> &'static str {
    match key {
        "reservations.cancel_failed" => "Sorry, this reservation can no longer be canceled",
        "reservations.cancel_success" => "Your reservation has been canceled",
        "datetime.format_short" => DATE_TIME_FORMAT_SHORT,
        "auth.invalid_credentials" => "Invalid email or password",
        "auth.account_disabled" => "This account has been disabled",
        "auth.email_taken" => "An account with this email already exists",
        "booking.location_not_found" => "The selected location could not be found",
        "booking.past_datetime" => "Reservation time must be in the future",
        _ => key,
    }
}
