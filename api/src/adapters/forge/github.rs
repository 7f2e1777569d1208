//! GitHub REST v3 forge
//!
//! Listings use `Link` header pagination. Fork status, watchers and topics
//! come straight from the repository record; languages need one request per
//! repository.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use super::{decode_records, lenient, lenient_strings};
use super::pagination::{last_page, LinkHeaderPaginator, Paginator};
use crate::domain::entities::{ForkStatus, Language, OrgName};
use crate::domain::ports::{Fetched, Forge, HttpClient, IntoFetched};
use crate::error::UnreachableError;

const LANGUAGES_ACCEPT: (&str, &str) = ("accept", "application/vnd.github.v3+json");

/// GitHub repository record (only the fields we read)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GithubRepo {
    #[serde(deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub fork: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub watchers: Option<u64>,
    #[serde(deserialize_with = "lenient_strings")]
    pub topics: Option<Vec<String>>,
}

pub struct GithubForge {
    http: Arc<dyn HttpClient>,
    base_url: String,
    paginator: LinkHeaderPaginator,
}

impl GithubForge {
    pub fn new(base_url: String, http: Arc<dyn HttpClient>) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            paginator: LinkHeaderPaginator,
        }
    }
}

#[async_trait]
impl Forge for GithubForge {
    type Repo = GithubRepo;

    fn name(&self) -> &'static str {
        "github"
    }

    fn tracks_topics(&self) -> bool {
        true
    }

    async fn list_repositories(&self, org: &OrgName) -> Result<Vec<GithubRepo>, UnreachableError> {
        let url = format!("{}/orgs/{}/repos?per_page=100", self.base_url, org.path_segment());
        let records = self.paginator.collect_records(self.http.as_ref(), &url).await?;
        tracing::debug!("GitHub listed {} repositories for {}", records.len(), org);
        Ok(decode_records(records))
    }

    async fn fork_status(
        &self,
        _org: &OrgName,
        repo: &GithubRepo,
    ) -> Result<Fetched<ForkStatus>, UnreachableError> {
        let status = if repo.fork.unwrap_or(false) {
            ForkStatus::Forked
        } else {
            ForkStatus::Original
        };
        Ok(Fetched::Found(status))
    }

    async fn languages(
        &self,
        org: &OrgName,
        repo: &GithubRepo,
    ) -> Result<Fetched<Vec<Language>>, UnreachableError> {
        let Some(name) = repo.name.as_deref() else {
            return Ok(Fetched::Invalid);
        };

        let url = format!(
            "{}/repos/{}/{}/languages",
            self.base_url,
            org.path_segment(),
            urlencoding::encode(name)
        );
        let response = self.http.get(&url, &[LANGUAGES_ACCEPT]).await.into_fetched()?;

        Ok(response.map(|response| {
            response
                .body
                .as_object()
                .map(|languages| {
                    languages
                        .keys()
                        .map(|language| Some(language.to_lowercase()))
                        .collect()
                })
                .unwrap_or_default()
        }))
    }

    async fn watchers(
        &self,
        _org: &OrgName,
        repo: &GithubRepo,
    ) -> Result<Fetched<u64>, UnreachableError> {
        Ok(Fetched::Found(repo.watchers.unwrap_or(0)))
    }

    fn topics(&self, repo: &GithubRepo) -> Vec<String> {
        repo.topics.clone().unwrap_or_default()
    }

    async fn followers(&self, org: &OrgName) -> Result<Fetched<u64>, UnreachableError> {
        let url = format!("{}/users/{}/followers?per_page=1", self.base_url, org.path_segment());
        let response = self.http.get(&url, &[]).await.into_fetched()?;

        // One follower per page, so the last page number is the follower count
        Ok(response.map(|response| match response.header("link").and_then(last_page) {
            Some(last) => u64::from(last),
            None => response.body.as_array().map_or(0, |page| page.len() as u64),
        }))
    }
}
