//! # Tablebook
//!
//! Restaurant table reservation service: customer accounts, bookings with
//! opaque lookup hashes, and the account reservations page (paginated
//! listing, hash lookup, cancel with per-location cancellation windows).
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, types and repository traits
//! - **application**: Business logic (booking manager, reservations page component, flash messages)
//! - **infrastructure**: External concerns (SeaORM persistence, in-memory repositories)
//! - **interfaces**: REST API with Swagger documentation
//! - **auth**: JWT authentication and password hashing
//! - **shared**: Cross-cutting helpers (pagination, message catalog, shutdown)

pub mod application;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

// Re-export API router
pub use interfaces::http::create_api_router;
