//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod forge;
pub mod http;

pub use forge::Forge;
pub use http::{Fetched, HttpClient, HttpResponse, IntoFetched};
