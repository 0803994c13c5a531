//! In-memory repositories for development and testing

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use crate::domain::customer::{Customer, CustomerRepository, NewCustomer};
use crate::domain::location::{DiningTable, Location, LocationRepository};
use crate::domain::reservation::{
    Reservation, ReservationRepository, ReservationStatus, ReservationWithRelations, SortOrder,
};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::shared::PaginatedResult;

/// Repository provider backed by dashmaps. No persistence; rows live as
/// long as the process.
pub struct InMemoryRepositoryProvider {
    customers: InMemoryCustomerRepository,
    locations: InMemoryLocationRepository,
    reservations: InMemoryReservationRepository,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        let locations: Arc<DashMap<i32, Location>> = Arc::new(DashMap::new());
        let tables: Arc<DashMap<i32, DiningTable>> = Arc::new(DashMap::new());

        Self {
            customers: InMemoryCustomerRepository {
                rows: DashMap::new(),
                counter: AtomicI32::new(1),
            },
            locations: InMemoryLocationRepository {
                locations: Arc::clone(&locations),
                tables: Arc::clone(&tables),
                counter: AtomicI32::new(1),
            },
            reservations: InMemoryReservationRepository {
                rows: DashMap::new(),
                locations,
                tables,
                counter: AtomicI32::new(1),
            },
        }
    }

    /// Insert a location, assigning its id
    pub fn seed_location(&self, name: &str, cancellation_timeout_mins: i64) -> Location {
        let id = self.locations.counter.fetch_add(1, Ordering::SeqCst);
        let location = Location {
            id,
            name: name.to_string(),
            telephone: None,
            is_active: true,
            cancellation_timeout_mins,
            created_at: Utc::now(),
        };
        self.locations.locations.insert(id, location.clone());
        location
    }

    /// Insert a dining table, assigning its id
    pub fn seed_table(
        &self,
        location_id: i32,
        name: &str,
        min_capacity: i32,
        max_capacity: i32,
    ) -> DiningTable {
        let id = self
            .locations
            .tables
            .iter()
            .map(|t| t.id)
            .max()
            .unwrap_or(0)
            + 1;
        let table = DiningTable {
            id,
            location_id,
            name: name.to_string(),
            min_capacity,
            max_capacity,
            is_active: true,
        };
        self.locations.tables.insert(id, table.clone());
        table
    }
}

impl Default for InMemoryRepositoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn customers(&self) -> &dyn CustomerRepository {
        &self.customers
    }

    fn locations(&self) -> &dyn LocationRepository {
        &self.locations
    }

    fn reservations(&self) -> &dyn ReservationRepository {
        &self.reservations
    }
}

// ── Customers ───────────────────────────────────────────────────

struct InMemoryCustomerRepository {
    rows: DashMap<i32, Customer>,
    counter: AtomicI32,
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn create(&self, customer: NewCustomer) -> DomainResult<Customer> {
        if self
            .rows
            .iter()
            .any(|c| c.email.eq_ignore_ascii_case(&customer.email))
        {
            return Err(DomainError::Conflict(customer.email));
        }

        let id = self.counter.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let row = Customer {
            id,
            first_name: customer.first_name,
            last_name: customer.last_name,
            email: customer.email,
            telephone: customer.telephone,
            password_hash: customer.password_hash,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.rows.insert(id, row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Customer>> {
        Ok(self.rows.get(&id).map(|c| c.clone()))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Customer>> {
        Ok(self
            .rows
            .iter()
            .find(|c| c.email.eq_ignore_ascii_case(email))
            .map(|c| c.clone()))
    }
}

// ── Locations ───────────────────────────────────────────────────

struct InMemoryLocationRepository {
    locations: Arc<DashMap<i32, Location>>,
    tables: Arc<DashMap<i32, DiningTable>>,
    counter: AtomicI32,
}

#[async_trait]
impl LocationRepository for InMemoryLocationRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Location>> {
        Ok(self.locations.get(&id).map(|l| l.clone()))
    }

    async fn find_table_by_id(&self, id: i32) -> DomainResult<Option<DiningTable>> {
        Ok(self.tables.get(&id).map(|t| t.clone()))
    }

    async fn find_active(&self) -> DomainResult<Vec<Location>> {
        let mut active: Vec<Location> = self
            .locations
            .iter()
            .filter(|l| l.is_active)
            .map(|l| l.clone())
            .collect();
        active.sort_by_key(|l| l.id);
        Ok(active)
    }
}

// ── Reservations ────────────────────────────────────────────────

struct InMemoryReservationRepository {
    rows: DashMap<i32, Reservation>,
    locations: Arc<DashMap<i32, Location>>,
    tables: Arc<DashMap<i32, DiningTable>>,
    counter: AtomicI32,
}

impl InMemoryReservationRepository {
    fn attach_relations(&self, reservation: Reservation) -> ReservationWithRelations {
        let location = self
            .locations
            .get(&reservation.location_id)
            .map(|l| l.clone());
        let table = reservation
            .table_id
            .and_then(|id| self.tables.get(&id).map(|t| t.clone()));
        ReservationWithRelations {
            reservation,
            location,
            table,
        }
    }
}

#[async_trait]
impl ReservationRepository for InMemoryReservationRepository {
    async fn create(&self, mut reservation: Reservation) -> DomainResult<Reservation> {
        reservation.id = self.counter.fetch_add(1, Ordering::SeqCst);
        self.rows.insert(reservation.id, reservation.clone());
        Ok(reservation)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>> {
        Ok(self.rows.get(&id).map(|r| r.clone()))
    }

    async fn find_by_hash(
        &self,
        hash: &str,
        customer_id: Option<i32>,
    ) -> DomainResult<Option<ReservationWithRelations>> {
        let matched = self
            .rows
            .iter()
            .find(|r| {
                r.hash == hash
                    && customer_id
                        .map(|id| r.customer_id == Some(id))
                        .unwrap_or(true)
            })
            .map(|r| r.clone());
        Ok(matched.map(|r| self.attach_relations(r)))
    }

    async fn list_for_customer(
        &self,
        customer_id: i32,
        page: u32,
        limit: u32,
        sort: SortOrder,
    ) -> DomainResult<PaginatedResult<ReservationWithRelations>> {
        let mut matched: Vec<Reservation> = self
            .rows
            .iter()
            .filter(|r| r.customer_id == Some(customer_id))
            .map(|r| r.clone())
            .collect();

        // id is the tie-breaker so rows created in the same instant keep
        // insertion order
        match sort {
            SortOrder::CreatedAtDesc => {
                matched.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)))
            }
            SortOrder::CreatedAtAsc => {
                matched.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)))
            }
            SortOrder::ReserveAtDesc => {
                matched.sort_by(|a, b| (b.reserve_at, b.id).cmp(&(a.reserve_at, a.id)))
            }
            SortOrder::ReserveAtAsc => {
                matched.sort_by(|a, b| (a.reserve_at, a.id).cmp(&(b.reserve_at, b.id)))
            }
        }

        let total = matched.len() as u64;
        let start = ((page.max(1) - 1) as usize).saturating_mul(limit as usize);
        let items: Vec<ReservationWithRelations> = matched
            .into_iter()
            .skip(start)
            .take(limit as usize)
            .map(|r| self.attach_relations(r))
            .collect();

        Ok(PaginatedResult::new(items, total, page, limit))
    }

    async fn mark_as_canceled(&self, id: i32) -> DomainResult<bool> {
        let Some(mut entry) = self.rows.get_mut(&id) else {
            return Ok(false);
        };
        if entry.status == ReservationStatus::Canceled {
            return Ok(false);
        }
        entry.cancel();
        Ok(true)
    }
}
