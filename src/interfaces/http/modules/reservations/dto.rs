//! Reservation DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::flash::FlashMessage;
use crate::domain::reservation::{Reservation, ReservationWithRelations};
use crate::interfaces::http::common::PaginatedResponse;
use crate::shared::DATE_TIME_FORMAT_SHORT;

/// Booking request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct MakeReservationRequest {
    pub location_id: i32,

    pub table_id: Option<i32>,

    #[validate(range(min = 1, max = 50, message = "must be 1-50"))]
    pub guest_num: i32,

    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub last_name: String,

    #[validate(email(message = "must be a valid email address"))]
    pub email: String,

    #[validate(length(min = 1, max = 30, message = "must be 1-30 characters"))]
    pub telephone: String,

    /// Requested time, RFC 3339
    pub reserve_at: DateTime<Utc>,
}

/// Cancel request. The id arrives as the raw form value; anything that is
/// not a known numeric id, the empty string included, is acknowledged
/// without effect. No field rules here so malformed ids reach the
/// component's silent no-op path instead of a validation error.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CancelReservationRequest {
    pub reservation_id: String,
}

/// One reservation as shown on the account page
#[derive(Debug, Serialize, ToSchema)]
pub struct ReservationDto {
    pub id: i32,
    /// Opaque lookup hash for customer-facing URLs
    pub hash: String,
    pub location_name: Option<String>,
    pub table_name: Option<String>,
    pub guest_num: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub telephone: String,
    /// Reservation time, RFC 3339
    pub reserve_at: DateTime<Utc>,
    /// Reservation time in the page display format
    pub reserve_at_formatted: String,
    pub status: String,
    /// Whether the cancel button is shown for this reservation
    pub can_cancel: bool,
}

impl ReservationDto {
    pub fn from_related(related: &ReservationWithRelations, can_cancel: bool) -> Self {
        let mut dto = Self::from_reservation(&related.reservation, can_cancel);
        dto.location_name = related.location.as_ref().map(|l| l.name.clone());
        dto.table_name = related.table.as_ref().map(|t| t.name.clone());
        dto
    }

    pub fn from_reservation(reservation: &Reservation, can_cancel: bool) -> Self {
        Self {
            id: reservation.id,
            hash: reservation.hash.clone(),
            location_name: None,
            table_name: None,
            guest_num: reservation.guest_num,
            first_name: reservation.first_name.clone(),
            last_name: reservation.last_name.clone(),
            email: reservation.email.clone(),
            telephone: reservation.telephone.clone(),
            reserve_at: reservation.reserve_at,
            reserve_at_formatted: reservation
                .reserve_at
                .format(DATE_TIME_FORMAT_SHORT)
                .to_string(),
            status: reservation.status.to_string(),
            can_cancel,
        }
    }
}

/// Everything the account reservations page renders from
#[derive(Debug, Serialize, ToSchema)]
pub struct ReservationsPageDto {
    /// Configured page identifier of this page
    pub reservations_page: String,
    /// Display format for reservation times
    pub date_time_format: String,
    /// The customer's reservations; empty when anonymous
    pub reservations: PaginatedResponse<ReservationDto>,
    /// Reservation resolved from the hash parameter, if any
    pub selected: Option<ReservationDto>,
    /// Flash messages queued since the last render
    pub flash: Vec<FlashMessage>,
}
