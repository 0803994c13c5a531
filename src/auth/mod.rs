//! Authentication: JWT tokens, bcrypt password hashing, axum middleware.

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{create_token, verify_token, AuthError, Claims, JwtConfig};
pub use middleware::{auth_middleware, optional_auth_middleware, AuthState};
pub use password::{hash_password, verify_password};
