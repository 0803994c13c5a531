pub mod model;
pub mod repository;

pub use model::{DiningTable, Location};
pub use repository::LocationRepository;
