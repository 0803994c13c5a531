pub mod model;
pub mod repository;

pub use model::{NewReservation, Reservation, ReservationStatus, ReservationWithRelations};
pub use repository::{ReservationRepository, SortOrder};
