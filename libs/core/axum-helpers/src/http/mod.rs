//! HTTP middleware.

pub mod cors;

pub use cors::{CorsOrigins, create_cors_layer};
