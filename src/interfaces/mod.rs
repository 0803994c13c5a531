//! Delivery layer: the HTTP API.

pub mod http;
