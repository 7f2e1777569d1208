//! Aggregate handler
//!
//! Combined Bitbucket + GitHub statistics for a pair of organizations.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;

use crate::domain::entities::{MergedReport, OrgName};
use crate::error::AppError;
use crate::AppState;

const MISSING_ORGS: &str = "Missing query string parameters \"bitbucket\" and/or \"github\"";

/// Query parameters for the aggregate endpoint
#[derive(Debug, Deserialize)]
pub struct AggregateQuery {
    /// Bitbucket organization (workspace) name
    pub bitbucket: Option<String>,
    /// GitHub organization name
    pub github: Option<String>,
}

/// GET /aggregate?bitbucket=<org>&github=<org>
///
/// Both organizations are crawled concurrently. Upstream failures never fail
/// the request; they only shrink the numbers.
pub async fn aggregate(
    State(state): State<AppState>,
    query: Result<Query<AggregateQuery>, QueryRejection>,
) -> Result<Json<MergedReport>, AppError> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let bitbucket = query.bitbucket.as_deref().and_then(OrgName::parse);
    let github = query.github.as_deref().and_then(OrgName::parse);

    let (Some(bitbucket), Some(github)) = (bitbucket, github) else {
        return Err(AppError::BadRequest(MISSING_ORGS.to_string()));
    };

    tracing::info!("Aggregating bitbucket={} github={}", bitbucket, github);
    let report = state.aggregate_service.aggregate(&bitbucket, &github).await;

    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    use crate::adapters::forge::{BitbucketForge, GithubForge};
    use crate::app::AggregateService;
    use crate::domain::ports::HttpClient;
    use crate::test_utils::{github_repo, MockHttpClient, BITBUCKET_API, GITHUB_API};
    use crate::{build_router, AppState};

    fn server(http: MockHttpClient) -> (TestServer, Arc<MockHttpClient>) {
        let http = Arc::new(http);
        let transport: Arc<dyn HttpClient> = http.clone();
        let state = AppState {
            aggregate_service: Arc::new(AggregateService::new(
                Arc::new(BitbucketForge::new(BITBUCKET_API.to_string(), transport.clone())),
                Arc::new(GithubForge::new(GITHUB_API.to_string(), transport)),
            )),
        };
        (TestServer::new(build_router(state)).unwrap(), http)
    }

    fn missing_orgs_body() -> Value {
        json!({
            "error": "Bad request",
            "details": "Missing query string parameters \"bitbucket\" and/or \"github\""
        })
    }

    #[tokio::test]
    async fn missing_parameter_is_rejected_without_upstream_calls() {
        let (server, http) = server(MockHttpClient::new());

        let response = server
            .get("/aggregate")
            .add_query_param("bitbucket", "acme")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&missing_orgs_body());
        assert!(http.requests().is_empty());
    }

    #[tokio::test]
    async fn blank_parameter_is_rejected() {
        let (server, _) = server(MockHttpClient::new());

        let response = server
            .get("/aggregate")
            .add_query_param("bitbucket", "acme")
            .add_query_param("github", "   ")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&missing_orgs_body());
    }

    #[tokio::test]
    async fn repeated_parameter_is_rejected_as_json() {
        let (server, http) = server(MockHttpClient::new());

        let response = server.get("/aggregate?bitbucket=acme&github=a&github=b").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "Bad request");
        assert!(body["details"].is_string());
        assert!(http.requests().is_empty());
    }

    #[tokio::test]
    async fn unknown_orgs_aggregate_to_zero() {
        let (server, _) = server(MockHttpClient::new());

        let response = server
            .get("/aggregate")
            .add_query_param("bitbucket", "nobody")
            .add_query_param("github", "nobody")
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "followers": 0,
            "languages": {"list": [], "count": 0},
            "topics": {"list": [], "count": 0},
            "repos": {"forked": 0, "unforked": 0, "count": 0},
            "watchers": 0
        }));
    }

    #[tokio::test]
    async fn github_only_org_is_reported() {
        let http = MockHttpClient::new()
            .with_json(
                "https://github.test/orgs/acme/repos?per_page=100",
                json!([github_repo("widget", true, 7, &["cli"])]),
            )
            .with_json(
                "https://github.test/repos/acme/widget/languages",
                json!({"Rust": 1}),
            );
        let (server, _) = server(http);

        let response = server
            .get("/aggregate")
            .add_query_param("bitbucket", "acme")
            .add_query_param("github", "acme")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["languages"], json!({"list": ["rust"], "count": 1}));
        assert_eq!(body["topics"], json!({"list": ["cli"], "count": 1}));
        assert_eq!(body["repos"], json!({"forked": 1, "unforked": 0, "count": 1}));
        assert_eq!(body["watchers"], 7);
    }
}
