//! Application layer
//!
//! Use cases and service orchestration. Services drive the forge ports and
//! hand finished domain values to the handlers.

pub mod aggregate_service;
pub mod profile_collector;

pub use aggregate_service::AggregateService;
pub use profile_collector::ProfileCollector;
