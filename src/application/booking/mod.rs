pub mod manager;

pub use manager::{BookingLookup, BookingManager};
