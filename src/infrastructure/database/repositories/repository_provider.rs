//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::customer::CustomerRepository;
use crate::domain::location::LocationRepository;
use crate::domain::reservation::ReservationRepository;
use crate::domain::RepositoryProvider;

use super::customer_repository::SeaOrmCustomerRepository;
use super::location_repository::SeaOrmLocationRepository;
use super::reservation_repository::SeaOrmReservationRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
pub struct SeaOrmRepositoryProvider {
    customers: SeaOrmCustomerRepository,
    locations: SeaOrmLocationRepository,
    reservations: SeaOrmReservationRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            customers: SeaOrmCustomerRepository::new(db.clone()),
            locations: SeaOrmLocationRepository::new(db.clone()),
            reservations: SeaOrmReservationRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
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
