//! HTTP adapter
//!
//! reqwest implementation of the transport port.

pub mod client;

pub use client::ReqwestHttpClient;
