//! HTTP transport port
//!
//! The only I/O the collectors perform: a GET that yields a parsed JSON body
//! plus the response headers.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{FetchError, UnreachableError};

/// Successful upstream response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HttpResponse {
    pub body: Value,
    /// Header names are stored lowercase
    pub headers: BTreeMap<String, String>,
}

impl HttpResponse {
    pub fn new(body: Value) -> Self {
        Self {
            body,
            headers: BTreeMap::new(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers
            .insert(name.to_ascii_lowercase(), value.to_string());
        self
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

/// Port trait for upstream GET requests
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(
        &self,
        url: &str,
        headers: &[(&'static str, &'static str)],
    ) -> Result<HttpResponse, FetchError>;
}

/// Outcome of one upstream lookup once invalid-resource failures are folded in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched<T> {
    Found(T),
    /// The upstream rejected the request; callers substitute a default
    Invalid,
}

impl<T> Fetched<T> {
    pub fn map<U, F>(self, f: F) -> Fetched<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Fetched::Found(value) => Fetched::Found(f(value)),
            Fetched::Invalid => Fetched::Invalid,
        }
    }

    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Fetched::Found(value) => value,
            Fetched::Invalid => default,
        }
    }

    pub fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        self.unwrap_or(T::default())
    }
}

/// Split a transport result into "keep going" and "abort the run"
pub trait IntoFetched<T> {
    fn into_fetched(self) -> Result<Fetched<T>, UnreachableError>;
}

impl<T> IntoFetched<T> for Result<T, FetchError> {
    fn into_fetched(self) -> Result<Fetched<T>, UnreachableError> {
        match self {
            Ok(value) => Ok(Fetched::Found(value)),
            Err(FetchError::InvalidResource { url, reason }) => {
                tracing::debug!("Treating {} as empty: {}", url, reason);
                Ok(Fetched::Invalid)
            }
            Err(FetchError::Unreachable(e)) => Err(e),
        }
    }
}
