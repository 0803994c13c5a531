pub mod model;
pub mod repository;

pub use model::{Customer, CustomerIdentity, NewCustomer};
pub use repository::CustomerRepository;
