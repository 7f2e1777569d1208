//! Profiles API Server
//!
//! Aggregates public statistics of one Bitbucket and one GitHub organization
//! into a single report. Uses hexagonal (ports & adapters) architecture: the
//! collectors only see the `Forge` and `HttpClient` ports.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{routing::get, Router};
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{BitbucketForge, GithubForge, ReqwestHttpClient};
use app::AggregateService;
use config::Config;
use domain::ports::HttpClient;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub aggregate_service: Arc<AggregateService>,
}

/// Routes and middleware common to the server and the tests
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health-check", get(handlers::health_check))
        .route("/aggregate", get(handlers::aggregate))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,profiles_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Profiles API...");

    let config = Config::from_env();

    // One pooled client shared by both forges
    let http: Arc<dyn HttpClient> =
        Arc::new(ReqwestHttpClient::new(&config).context("Failed to build HTTP client")?);

    let bitbucket = Arc::new(BitbucketForge::new(
        config.bitbucket_api_url.clone(),
        http.clone(),
    ));
    let github = Arc::new(GithubForge::new(config.github_api_url.clone(), http));
    tracing::info!(
        "Upstreams: bitbucket={} github={}",
        config.bitbucket_api_url,
        config.github_api_url
    );

    let state = AppState {
        aggregate_service: Arc::new(AggregateService::new(bitbucket, github)),
    };

    // Rate limiting per client IP taken from the socket connection
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(config.rate_limit_per_second)
            .burst_size(config.rate_limit_burst)
            .finish()
            .context("Invalid rate limit configuration")?,
    );

    let app = build_router(state).layer(GovernorLayer {
        config: governor_config,
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
