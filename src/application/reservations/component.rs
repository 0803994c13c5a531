//! Reservations page component
//!
//! Read/cancel workflow behind the account reservations page: paginated
//! listing scoped to the signed-in customer, hash-based single lookup, and
//! the cancel transition. Customer identity is always passed in explicitly;
//! `None` means anonymous and yields empty/none results, never an error.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::application::booking::BookingLookup;
use crate::config::ReservationsConfig;
use crate::domain::customer::CustomerIdentity;
use crate::domain::reservation::{Reservation, ReservationWithRelations, SortOrder};
use crate::domain::{DomainResult, RepositoryProvider};
use crate::shared::{lang, validate_page, PaginatedResult};

/// Page request context: pagination cursor plus raw string parameters
/// (the reservation hash arrives under a configurable parameter name).
#[derive(Debug, Default)]
pub struct PageRequest {
    pub page: Option<u32>,
    pub params: HashMap<String, String>,
}

/// Outcome of a cancel attempt.
///
/// Malformed or unknown ids are deliberately silent (`Ignored`): they cause
/// no mutation and surface no error. `Rejected` covers both an ineligible
/// reservation and a lost update race; callers present a single localized
/// "cancel failed" message for either.
#[derive(Debug)]
pub enum CancelOutcome {
    Canceled(Reservation),
    Rejected,
    Ignored,
}

/// Values the reservations page is rendered from
#[derive(Debug)]
pub struct RenderContext {
    /// Configured page identifier of the account reservations page
    pub reservations_page: String,
    /// The customer's reservations; empty when anonymous
    pub customer_reservations: PaginatedResult<ReservationWithRelations>,
    /// Localized date/time display format
    pub date_time_format: String,
    /// Reservation matching the hash parameter, if present and resolvable
    pub customer_reservation: Option<ReservationWithRelations>,
}

pub struct Reservations {
    repos: Arc<dyn RepositoryProvider>,
    booking: Arc<dyn BookingLookup>,
    config: ReservationsConfig,
}

impl Reservations {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        booking: Arc<dyn BookingLookup>,
        config: ReservationsConfig,
    ) -> Self {
        Self {
            repos,
            booking,
            config,
        }
    }

    pub fn reservations_page(&self) -> &str {
        &self.config.reservations_page
    }

    /// Build the render context for the reservations page. Pure read path.
    pub async fn render_context(
        &self,
        request: &PageRequest,
        customer: Option<&CustomerIdentity>,
    ) -> DomainResult<RenderContext> {
        let customer_reservations = self.load_reservations(request.page, customer).await?;
        let customer_reservation = self.resolve_by_hash(request, customer).await?;

        Ok(RenderContext {
            reservations_page: self.config.reservations_page.clone(),
            customer_reservations,
            date_time_format: lang("datetime.format_short").to_string(),
            customer_reservation,
        })
    }

    /// One page of the customer's reservations, relations eagerly loaded.
    /// Anonymous requests get an empty page.
    pub async fn load_reservations(
        &self,
        page: Option<u32>,
        customer: Option<&CustomerIdentity>,
    ) -> DomainResult<PaginatedResult<ReservationWithRelations>> {
        let page = validate_page(page);

        let Some(customer) = customer else {
            return Ok(PaginatedResult::empty(page, self.config.items_per_page));
        };

        let sort = SortOrder::parse(&self.config.sort_order).unwrap_or(SortOrder::CreatedAtDesc);
        self.repos
            .reservations()
            .list_for_customer(customer.id, page, self.config.items_per_page, sort)
            .await
    }

    /// Resolve the reservation named by the configured hash parameter.
    ///
    /// An absent parameter is the normal case for the plain listing page
    /// and short-circuits without touching the booking manager.
    pub async fn resolve_by_hash(
        &self,
        request: &PageRequest,
        customer: Option<&CustomerIdentity>,
    ) -> DomainResult<Option<ReservationWithRelations>> {
        let Some(hash) = request.params.get(&self.config.hash_param_name) else {
            return Ok(None);
        };
        if hash.is_empty() {
            return Ok(None);
        }

        self.booking.find_by_hash(hash, customer).await
    }

    /// Cancel-button visibility: false once canceled, otherwise the owning
    /// location's cancellation window decides.
    pub fn show_cancel_button(&self, reservation: &ReservationWithRelations) -> bool {
        if reservation.reservation.is_canceled() {
            return false;
        }
        reservation
            .reservation
            .is_cancelable(Utc::now(), reservation.cancellation_timeout_mins())
    }

    /// Attempt to cancel the reservation named by a raw (form) id.
    pub async fn cancel(&self, raw_id: &str) -> DomainResult<CancelOutcome> {
        let Ok(id) = raw_id.trim().parse::<i32>() else {
            return Ok(CancelOutcome::Ignored);
        };

        let Some(reservation) = self.repos.reservations().find_by_id(id).await? else {
            return Ok(CancelOutcome::Ignored);
        };

        let location = self
            .repos
            .locations()
            .find_by_id(reservation.location_id)
            .await?;
        let timeout = location.map(|l| l.cancellation_timeout_mins).unwrap_or(0);

        if reservation.is_canceled() || !reservation.is_cancelable(Utc::now(), timeout) {
            warn!(reservation_id = id, "Cancel refused: not eligible");
            return Ok(CancelOutcome::Rejected);
        }

        // Guarded update; a concurrent cancel makes this report false.
        if !self.repos.reservations().mark_as_canceled(id).await? {
            warn!(reservation_id = id, "Cancel refused: state changed");
            return Ok(CancelOutcome::Rejected);
        }

        info!(reservation_id = id, "Reservation canceled");
        let mut canceled = reservation;
        canceled.cancel();
        Ok(CancelOutcome::Canceled(canceled))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::Duration;

    use crate::application::booking::BookingManager;
    use crate::domain::reservation::{NewReservation, ReservationStatus};
    use crate::domain::DomainError;
    use crate::infrastructure::memory::InMemoryRepositoryProvider;

    fn identity(id: i32) -> CustomerIdentity {
        CustomerIdentity {
            id,
            email: format!("customer{id}@example.com"),
            name: format!("Customer {id}"),
        }
    }

    fn request_with_hash(param: &str, hash: &str) -> PageRequest {
        let mut params = HashMap::new();
        params.insert(param.to_string(), hash.to_string());
        PageRequest {
            page: None,
            params,
        }
    }

    struct Fixture {
        repos: Arc<InMemoryRepositoryProvider>,
        booking: Arc<BookingManager>,
        component: Reservations,
        location_id: i32,
    }

    /// Component wired to in-memory repositories with one location
    /// (cancellation window in minutes as given).
    fn fixture(cancellation_timeout_mins: i64) -> Fixture {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let location = repos.seed_location("Main Hall", cancellation_timeout_mins);
        let booking = Arc::new(BookingManager::new(repos.clone()));
        let component = Reservations::new(
            repos.clone(),
            booking.clone(),
            ReservationsConfig::default(),
        );
        Fixture {
            repos,
            booking,
            component,
            location_id: location.id,
        }
    }

    async fn book(
        fixture: &Fixture,
        customer_id: Option<i32>,
        hours_ahead: i64,
    ) -> crate::domain::reservation::Reservation {
        fixture
            .booking
            .make_reservation(NewReservation {
                customer_id,
                location_id: fixture.location_id,
                table_id: None,
                guest_num: 2,
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                telephone: "+100000000".to_string(),
                reserve_at: Utc::now() + Duration::hours(hours_ahead),
            })
            .await
            .unwrap()
    }

    // Listing is always scoped to the authenticated customer;
    // unauthenticated access yields an empty list.
    #[tokio::test]
    async fn anonymous_listing_is_empty() {
        let fixture = fixture(0);
        book(&fixture, Some(1), 4).await;

        let page = fixture.component.load_reservations(None, None).await.unwrap();
        assert!(page.is_empty());
        assert_eq!(page.limit, 20);
    }

    #[tokio::test]
    async fn listing_excludes_other_customers() {
        let fixture = fixture(0);
        book(&fixture, Some(1), 4).await;
        book(&fixture, Some(2), 4).await;
        book(&fixture, Some(1), 6).await;

        let page = fixture
            .component
            .load_reservations(None, Some(&identity(1)))
            .await
            .unwrap();
        assert_eq!(page.total, 2);
        assert!(page
            .items
            .iter()
            .all(|r| r.reservation.customer_id == Some(1)));
        // default sort: newest created first
        assert!(page.items[0].reservation.id > page.items[1].reservation.id);
        // relations came along
        assert!(page.items[0].location.is_some());
    }

    #[tokio::test]
    async fn render_context_carries_configured_values() {
        let fixture = fixture(0);
        let reservation = book(&fixture, Some(1), 4).await;

        let request = request_with_hash("hash", &reservation.hash);
        let context = fixture
            .component
            .render_context(&request, Some(&identity(1)))
            .await
            .unwrap();

        assert_eq!(context.reservations_page, "account/reservations");
        assert_eq!(context.date_time_format, "%d %b %Y %H:%M");
        assert_eq!(context.customer_reservations.total, 1);
        assert_eq!(
            context
                .customer_reservation
                .map(|r| r.reservation.id),
            Some(reservation.id)
        );
    }

    #[tokio::test]
    async fn hash_of_another_customer_resolves_to_none() {
        let fixture = fixture(0);
        let reservation = book(&fixture, Some(1), 4).await;

        let request = request_with_hash("hash", &reservation.hash);
        let resolved = fixture
            .component
            .resolve_by_hash(&request, Some(&identity(2)))
            .await
            .unwrap();
        assert!(resolved.is_none());
    }

    // The booking manager must not be consulted when the parameter is
    // absent from the request.
    #[tokio::test]
    async fn absent_hash_param_skips_booking_lookup() {
        struct CountingLookup {
            calls: AtomicUsize,
        }

        #[async_trait]
        impl BookingLookup for CountingLookup {
            async fn find_by_hash(
                &self,
                _hash: &str,
                _customer: Option<&CustomerIdentity>,
            ) -> DomainResult<Option<ReservationWithRelations>> {
                self.calls.fetch_add(1, Ordering::SeqCst);
                Ok(None)
            }
        }

        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let lookup = Arc::new(CountingLookup {
            calls: AtomicUsize::new(0),
        });
        let component = Reservations::new(
            repos,
            lookup.clone(),
            ReservationsConfig::default(),
        );

        let resolved = component
            .resolve_by_hash(&PageRequest::default(), None)
            .await
            .unwrap();
        assert!(resolved.is_none());
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);

        // present parameter does reach the lookup
        let request = request_with_hash("hash", "deadbeef");
        component.resolve_by_hash(&request, None).await.unwrap();
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn respects_configured_hash_param_name() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let location = repos.seed_location("Main Hall", 0);
        let booking = Arc::new(BookingManager::new(repos.clone()));
        let component = Reservations::new(
            repos.clone(),
            booking.clone(),
            ReservationsConfig {
                hash_param_name: "code".to_string(),
                ..Default::default()
            },
        );

        let reservation = booking
            .make_reservation(NewReservation {
                customer_id: None,
                location_id: location.id,
                table_id: None,
                guest_num: 2,
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                telephone: "+1".to_string(),
                reserve_at: Utc::now() + Duration::hours(2),
            })
            .await
            .unwrap();

        // under the configured name it resolves
        let request = request_with_hash("code", &reservation.hash);
        assert!(component
            .resolve_by_hash(&request, None)
            .await
            .unwrap()
            .is_some());

        // under the default name it does not
        let request = request_with_hash("hash", &reservation.hash);
        assert!(component
            .resolve_by_hash(&request, None)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn non_numeric_ids_are_silently_ignored() {
        let fixture = fixture(0);
        let reservation = book(&fixture, Some(1), 4).await;

        for raw in ["abc", "", "12.5", "1e3"] {
            let outcome = fixture.component.cancel(raw).await.unwrap();
            assert!(matches!(outcome, CancelOutcome::Ignored), "raw={raw:?}");
        }

        // nothing changed
        let current = fixture
            .repos
            .reservations()
            .find_by_id(reservation.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(current.status, ReservationStatus::Pending);
    }

    #[tokio::test]
    async fn unknown_id_is_silently_ignored() {
        let fixture = fixture(0);
        let outcome = fixture.component.cancel("424242").await.unwrap();
        assert!(matches!(outcome, CancelOutcome::Ignored));
    }

    #[tokio::test]
    async fn eligible_reservation_cancels_exactly_once() {
        let fixture = fixture(0);
        let reservation = book(&fixture, Some(1), 4).await;

        let outcome = fixture
            .component
            .cancel(&reservation.id.to_string())
            .await
            .unwrap();
        let CancelOutcome::Canceled(canceled) = outcome else {
            panic!("expected Canceled");
        };
        assert_eq!(canceled.status, ReservationStatus::Canceled);

        let current = fixture
            .repos
            .reservations()
            .find_by_id(reservation.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(current.status, ReservationStatus::Canceled);

        // the second attempt lands on an already-canceled reservation
        let outcome = fixture
            .component
            .cancel(&reservation.id.to_string())
            .await
            .unwrap();
        assert!(matches!(outcome, CancelOutcome::Rejected));
    }

    #[tokio::test]
    async fn cancel_inside_window_is_rejected() {
        // 8 hour window, reservation only 4 hours away
        let fixture = fixture(8 * 60);
        let reservation = book(&fixture, Some(1), 4).await;

        let outcome = fixture
            .component
            .cancel(&reservation.id.to_string())
            .await
            .unwrap();
        assert!(matches!(outcome, CancelOutcome::Rejected));

        let current = fixture
            .repos
            .reservations()
            .find_by_id(reservation.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(current.status, ReservationStatus::Pending);
    }

    #[tokio::test]
    async fn cancel_button_hidden_for_canceled_and_windowed() {
        let fixture = fixture(0);
        let reservation = book(&fixture, Some(1), 4).await;

        let request = request_with_hash("hash", &reservation.hash);
        let resolved = fixture
            .component
            .resolve_by_hash(&request, Some(&identity(1)))
            .await
            .unwrap()
            .unwrap();
        assert!(fixture.component.show_cancel_button(&resolved));

        fixture
            .component
            .cancel(&reservation.id.to_string())
            .await
            .unwrap();

        let resolved = fixture
            .component
            .resolve_by_hash(&request, Some(&identity(1)))
            .await
            .unwrap()
            .unwrap();
        assert!(!fixture.component.show_cancel_button(&resolved));
    }
}
