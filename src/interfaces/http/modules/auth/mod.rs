pub mod dto;
pub mod handlers;

pub use dto::{CustomerInfo, LoginRequest, LoginResponse, RegisterRequest};
pub use handlers::{get_current_customer, login, register, AuthHandlerState};
