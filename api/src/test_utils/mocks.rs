//! Mock implementation of the HTTP transport port
//!
//! Responses are scripted per URL. Any URL that was not scripted answers
//! like a real server would for an unknown resource: 404.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::ports::{HttpClient, HttpResponse};
use crate::error::FetchError;

#[derive(Debug, Clone)]
enum MockReply {
    Ok(HttpResponse),
    Invalid,
    Unreachable,
}

/// A request the mock has seen
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

#[derive(Default)]
pub struct MockHttpClient {
    replies: Arc<RwLock<HashMap<String, MockReply>>>,
    requests: Arc<RwLock<Vec<RecordedRequest>>>,
    /// Every request fails with a connectivity error
    all_unreachable: bool,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport whose every call fails to connect
    pub fn unreachable() -> Self {
        Self {
            all_unreachable: true,
            ..Self::default()
        }
    }

    pub fn with_response(self, url: &str, response: HttpResponse) -> Self {
        self.script(url, MockReply::Ok(response))
    }

    pub fn with_json(self, url: &str, body: Value) -> Self {
        self.with_response(url, HttpResponse::new(body))
    }

    /// Answer `url` with a 404
    pub fn with_invalid(self, url: &str) -> Self {
        self.script(url, MockReply::Invalid)
    }

    /// Fail `url` with a connectivity error
    pub fn with_unreachable(self, url: &str) -> Self {
        self.script(url, MockReply::Unreachable)
    }

    fn script(self, url: &str, reply: MockReply) -> Self {
        self.replies.write().unwrap().insert(url.to_string(), reply);
        self
    }

    /// URLs requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .read()
            .unwrap()
            .iter()
            .map(|r| r.url.clone())
            .collect()
    }

    pub fn request_count(&self, url: &str) -> usize {
        self.requests
            .read()
            .unwrap()
            .iter()
            .filter(|r| r.url == url)
            .count()
    }

    /// Headers sent with the first request to `url`
    pub fn headers_sent(&self, url: &str) -> Option<Vec<(String, String)>> {
        self.requests
            .read()
            .unwrap()
            .iter()
            .find(|r| r.url == url)
            .map(|r| r.headers.clone())
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(
        &self,
        url: &str,
        headers: &[(&'static str, &'static str)],
    ) -> Result<HttpResponse, FetchError> {
        self.requests.write().unwrap().push(RecordedRequest {
            url: url.to_string(),
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });

        if self.all_unreachable {
            return Err(FetchError::unreachable(url, "Mock connection refused"));
        }

        match self.replies.read().unwrap().get(url).cloned() {
            Some(MockReply::Ok(response)) => Ok(response),
            Some(MockReply::Unreachable) => {
                Err(FetchError::unreachable(url, "Mock connection refused"))
            }
            Some(MockReply::Invalid) | None => Err(FetchError::invalid(url, "HTTP 404")),
        }
    }
}
