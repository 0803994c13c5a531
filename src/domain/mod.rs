pub mod customer;
pub mod error;
pub mod location;
pub mod reservation;

// Re-export commonly used types
pub use customer::{Customer, CustomerIdentity, CustomerRepository, NewCustomer};
pub use error::{DomainError, DomainResult};
pub use location::{DiningTable, Location, LocationRepository};
pub use reservation::{
    NewReservation, Reservation, ReservationRepository, ReservationStatus,
    ReservationWithRelations, SortOrder,
};

/// Unified repository access.
///
/// Holds one backing store and exposes per-aggregate repository accessors,
/// so application services depend on a single injected object.
pub trait RepositoryProvider: Send + Sync {
    fn customers(&self) -> &dyn CustomerRepository;
    fn locations(&self) -> &dyn LocationRepository;
    fn reservations(&self) -> &dyn ReservationRepository;
}
