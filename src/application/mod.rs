//! Application services: booking manager, reservations page component and
//! flash notifications.

pub mod booking;
pub mod flash;
pub mod reservations;

pub use booking::{BookingLookup, BookingManager};
pub use flash::{FlashLevel, FlashMessage, FlashStore};
pub use reservations::{CancelOutcome, PageRequest, RenderContext, Reservations};
