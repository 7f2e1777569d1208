//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod forge;
pub mod http;

pub use forge::{BitbucketForge, GithubForge};
pub use http::ReqwestHttpClient;
