pub mod dto;
pub mod handlers;

pub use dto::{
    CancelReservationRequest, MakeReservationRequest, ReservationDto, ReservationsPageDto,
};
pub use handlers::{
    cancel_reservation, get_reservation, make_reservation, my_reservations, ReservationAppState,
};
