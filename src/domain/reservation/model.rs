//! Reservation domain entity

use chrono::{DateTime, Duration, Utc};

use crate::domain::location::{DiningTable, Location};

/// Reservation status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationStatus {
    /// Received, awaiting confirmation
    Pending,
    /// Confirmed by the restaurant
    Confirmed,
    /// Party has been seated
    Seated,
    /// Visit completed
    Completed,
    /// Canceled by the customer or the restaurant. Terminal.
    Canceled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Seated => "Seated",
            Self::Completed => "Completed",
            Self::Canceled => "Canceled",
        }
    }

    /// Unknown strings map to the terminal status so a corrupt row can
    /// never become cancelable again.
    pub fn from_str(s: &str) -> Self {
        match s {
            "Pending" => Self::Pending,
            "Confirmed" => Self::Confirmed,
            "Seated" => Self::Seated,
            "Completed" => Self::Completed,
            "Canceled" => Self::Canceled,
            _ => Self::Canceled,
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Table reservation
#[derive(Debug, Clone)]
pub struct Reservation {
    /// Unique reservation ID
    pub id: i32,
    /// Opaque lookup hash used in customer-facing URLs instead of the id
    pub hash: String,
    /// Owning customer, if the booking was made while signed in
    pub customer_id: Option<i32>,
    /// Location the table belongs to
    pub location_id: i32,
    /// Assigned dining table, if any
    pub table_id: Option<i32>,
    /// Party size
    pub guest_num: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub telephone: String,
    /// When the party is expected
    pub reserve_at: DateTime<Utc>,
    /// Current status
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    /// Whether this reservation has been canceled
    pub fn is_canceled(&self) -> bool {
        self.status == ReservationStatus::Canceled
    }

    /// Whether this reservation may still be canceled at `now`.
    ///
    /// `cancellation_timeout_mins` is the owning location's window: with a
    /// window of 60, cancellation closes one hour before the reservation.
    /// A window of 0 keeps the reservation cancelable until its start.
    /// Seated, completed and canceled reservations are never cancelable.
    pub fn is_cancelable(&self, now: DateTime<Utc>, cancellation_timeout_mins: i64) -> bool {
        match self.status {
            ReservationStatus::Pending | ReservationStatus::Confirmed => {}
            _ => return false,
        }

        if now >= self.reserve_at {
            return false;
        }

        if cancellation_timeout_mins > 0
            && now > self.reserve_at - Duration::minutes(cancellation_timeout_mins)
        {
            return false;
        }

        true
    }

    /// Transition to the terminal canceled state
    pub fn cancel(&mut self) {
        self.status = ReservationStatus::Canceled;
        self.updated_at = Utc::now();
    }
}

/// Reservation with its eagerly loaded relations, as returned by listings
/// and hash lookups.
#[derive(Debug, Clone)]
pub struct ReservationWithRelations {
    pub reservation: Reservation,
    pub location: Option<Location>,
    pub table: Option<DiningTable>,
}

impl ReservationWithRelations {
    /// The owning location's cancellation window; missing location means
    /// no window (cancelable until start).
    pub fn cancellation_timeout_mins(&self) -> i64 {
        self.location
            .as_ref()
            .map(|l| l.cancellation_timeout_mins)
            .unwrap_or(0)
    }
}

/// Data required to make a booking
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub customer_id: Option<i32>,
    pub location_id: i32,
    pub table_id: Option<i32>,
    pub guest_num: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub telephone: String,
    pub reserve_at: DateTime<Utc>,
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_reservation(reserve_at: DateTime<Utc>) -> Reservation {
        Reservation {
            id: 1,
            hash: "a".repeat(32),
            customer_id: Some(1),
            location_id: 1,
            table_id: None,
            guest_num: 2,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            telephone: "+100000000".to_string(),
            reserve_at,
            status: ReservationStatus::Pending,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn pending_future_reservation_is_cancelable() {
        let r = sample_reservation(Utc::now() + Duration::hours(3));
        assert!(!r.is_canceled());
        assert!(r.is_cancelable(Utc::now(), 0));
        assert!(r.is_cancelable(Utc::now(), 60));
    }

    #[test]
    fn not_cancelable_inside_the_window() {
        let now = Utc::now();
        let r = sample_reservation(now + Duration::minutes(30));
        // 60 minute window, reservation in 30 minutes
        assert!(!r.is_cancelable(now, 60));
        // no window keeps it cancelable
        assert!(r.is_cancelable(now, 0));
    }

    #[test]
    fn not_cancelable_once_started() {
        let now = Utc::now();
        let r = sample_reservation(now - Duration::minutes(1));
        assert!(!r.is_cancelable(now, 0));
    }

    #[test]
    fn canceled_is_terminal() {
        let mut r = sample_reservation(Utc::now() + Duration::hours(3));
        r.cancel();
        assert!(r.is_canceled());
        assert!(!r.is_cancelable(Utc::now(), 0));
    }

    #[test]
    fn seated_and_completed_are_not_cancelable() {
        let mut r = sample_reservation(Utc::now() + Duration::hours(3));
        r.status = ReservationStatus::Seated;
        assert!(!r.is_cancelable(Utc::now(), 0));
        r.status = ReservationStatus::Completed;
        assert!(!r.is_cancelable(Utc::now(), 0));
    }

    #[test]
    fn status_string_roundtrip() {
        for status in &[
            ReservationStatus::Pending,
            ReservationStatus::Confirmed,
            ReservationStatus::Seated,
            ReservationStatus::Completed,
            ReservationStatus::Canceled,
        ] {
            assert_eq!(&ReservationStatus::from_str(status.as_str()), status);
        }
    }

    #[test]
    fn unknown_status_defaults_to_canceled() {
        assert_eq!(
            ReservationStatus::from_str("Unknown"),
            ReservationStatus::Canceled
        );
    }

    #[test]
    fn missing_location_means_no_window() {
        let with_relations = ReservationWithRelations {
            reservation: sample_reservation(Utc::now() + Duration::hours(1)),
            location: None,
            table: None,
        };
        assert_eq!(with_relations.cancellation_timeout_mins(), 0);
    }
}
