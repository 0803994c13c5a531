//! Booking manager
//!
//! Resolves reservations by their opaque lookup hash and creates new
//! bookings. The hash stands in for the numeric id in customer-facing URLs.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::domain::customer::CustomerIdentity;
use crate::domain::reservation::{
    NewReservation, Reservation, ReservationStatus, ReservationWithRelations,
};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::shared::lang;

/// Hash-based reservation lookup, scoped to a customer.
///
/// A trait seam so page components can be tested against a counting fake.
#[async_trait]
pub trait BookingLookup: Send + Sync {
    /// Resolve a reservation by hash.
    ///
    /// With an authenticated customer the lookup is additionally filtered
    /// by owner, so a correct hash belonging to someone else resolves to
    /// `None`. Anonymous lookups resolve by hash alone; the opaque hash is
    /// the capability.
    async fn find_by_hash(
        &self,
        hash: &str,
        customer: Option<&CustomerIdentity>,
    ) -> DomainResult<Option<ReservationWithRelations>>;
}

pub struct BookingManager {
    repos: Arc<dyn RepositoryProvider>,
}

impl BookingManager {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Create a booking: validates the location and the requested time,
    /// assigns a fresh lookup hash and persists with status Pending.
    pub async fn make_reservation(&self, new: NewReservation) -> DomainResult<Reservation> {
        let location = self
            .repos
            .locations()
            .find_by_id(new.location_id)
            .await?
            .filter(|l| l.is_active)
            .ok_or(DomainError::NotFound {
                entity: "Location",
                field: "id",
                value: new.location_id.to_string(),
            })?;

        if new.reserve_at <= Utc::now() {
            return Err(DomainError::Validation(
                lang("booking.past_datetime").to_string(),
            ));
        }

        let now = Utc::now();
        let reservation = Reservation {
            id: 0, // assigned by the repository
            hash: generate_hash(),
            customer_id: new.customer_id,
            location_id: location.id,
            table_id: new.table_id,
            guest_num: new.guest_num,
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
            telephone: new.telephone,
            reserve_at: new.reserve_at,
            status: ReservationStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        let saved = self.repos.reservations().create(reservation).await?;
        info!(
            reservation_id = saved.id,
            location_id = saved.location_id,
            "Reservation created"
        );
        Ok(saved)
    }
}

#[async_trait]
impl BookingLookup for BookingManager {
    async fn find_by_hash(
        &self,
        hash: &str,
        customer: Option<&CustomerIdentity>,
    ) -> DomainResult<Option<ReservationWithRelations>> {
        self.repos
            .reservations()
            .find_by_hash(hash, customer.map(|c| c.id))
            .await
    }
}

/// 32 lowercase hex chars, non-sequential
fn generate_hash() -> String {
    Uuid::new_v4().simple().to_string()
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    use crate::infrastructure::memory::InMemoryRepositoryProvider;

    fn new_reservation(location_id: i32, customer_id: Option<i32>) -> NewReservation {
        NewReservation {
            customer_id,
            location_id,
            table_id: None,
            guest_num: 2,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            telephone: "+100000000".to_string(),
            reserve_at: Utc::now() + Duration::hours(4),
        }
    }

    #[tokio::test]
    async fn make_reservation_assigns_id_and_hash() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let location = repos.seed_location("Main Hall", 0);
        let manager = BookingManager::new(repos);

        let saved = manager
            .make_reservation(new_reservation(location.id, Some(1)))
            .await
            .unwrap();

        assert!(saved.id > 0);
        assert_eq!(saved.hash.len(), 32);
        assert!(saved.hash.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(saved.status, ReservationStatus::Pending);
    }

    #[tokio::test]
    async fn rejects_unknown_location() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let manager = BookingManager::new(repos);

        let err = manager
            .make_reservation(new_reservation(99, None))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn rejects_past_datetime() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let location = repos.seed_location("Main Hall", 0);
        let manager = BookingManager::new(repos);

        let mut request = new_reservation(location.id, None);
        request.reserve_at = Utc::now() - Duration::minutes(5);

        let err = manager.make_reservation(request).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn hash_lookup_is_scoped_to_owner() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let location = repos.seed_location("Main Hall", 0);
        let manager = BookingManager::new(repos);

        let saved = manager
            .make_reservation(new_reservation(location.id, Some(1)))
            .await
            .unwrap();

        let owner = CustomerIdentity {
            id: 1,
            email: "ada@example.com".to_string(),
            name: "Ada Lovelace".to_string(),
        };
        let stranger = CustomerIdentity {
            id: 2,
            email: "eve@example.com".to_string(),
            name: "Eve".to_string(),
        };

        // owner resolves
        let found = manager
            .find_by_hash(&saved.hash, Some(&owner))
            .await
            .unwrap();
        assert!(found.is_some());

        // a different customer does not, despite the correct hash
        let found = manager
            .find_by_hash(&saved.hash, Some(&stranger))
            .await
            .unwrap();
        assert!(found.is_none());

        // anonymous lookup resolves by hash alone
        let found = manager.find_by_hash(&saved.hash, None).await.unwrap();
        assert!(found.is_some());
    }
}
