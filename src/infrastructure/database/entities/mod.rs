//! SeaORM entities

pub mod customer;
pub mod dining_table;
pub mod location;
pub mod reservation;
