//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod aggregate;
pub mod health;

pub use aggregate::aggregate;
pub use health::health_check;
