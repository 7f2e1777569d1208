//! reqwest implementation of the HTTP transport port

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::config::Config;
use crate::domain::ports::{HttpClient, HttpResponse};
use crate::error::FetchError;

/// Upstream HTTP client shared by both forges
pub struct ReqwestHttpClient {
    http: Client,
}

impl ReqwestHttpClient {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self { http })
    }

    async fn handle_response(
        &self,
        url: &str,
        response: reqwest::Response,
    ) -> Result<HttpResponse, FetchError> {
        let status = response.status();

        if !status.is_success() {
            tracing::error!("Unable to retrieve request for URL: {} ({})", url, status);
            return Err(FetchError::invalid(url, format!("HTTP {}", status.as_u16())));
        }

        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let body = response.json::<Value>().await.map_err(|e| {
            if e.is_decode() {
                tracing::error!("Malformed body from {}: {}", url, e);
                FetchError::invalid(url, format!("malformed body: {}", e))
            } else {
                tracing::error!("Connection dropped while reading {}: {}", url, e);
                FetchError::unreachable(url, e.to_string())
            }
        })?;

        Ok(headers
            .iter()
            .fold(HttpResponse::new(body), |response, (name, value)| {
                response.with_header(name, value)
            }))
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(
        &self,
        url: &str,
        headers: &[(&'static str, &'static str)],
    ) -> Result<HttpResponse, FetchError> {
        tracing::debug!("GET {}", url);

        let mut request = self.http.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_builder() {
                tracing::error!("Unable to build request for URL: {}: {}", url, e);
                FetchError::invalid(url, e.to_string())
            } else {
                tracing::error!("Connection not made to {}: {}", url, e);
                FetchError::unreachable(url, e.to_string())
            }
        })?;

        self.handle_response(url, response).await
    }
}
