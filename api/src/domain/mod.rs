//! Domain layer
//!
//! Contains pure business logic with no external dependencies.
//! - `entities`: Organization statistics and the merged report
//! - `ports`: Trait definitions for the transport and the hosting platforms

pub mod entities;
pub mod ports;
