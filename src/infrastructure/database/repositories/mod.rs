//! SeaORM repositories

pub mod customer_repository;
pub mod location_repository;
pub mod repository_provider;
pub mod reservation_repository;

pub use customer_repository::SeaOrmCustomerRepository;
pub use location_repository::SeaOrmLocationRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use reservation_repository::SeaOrmReservationRepository;
