//! Bitbucket Cloud forge
//!
//! Repositories, watchers and followers are cursor-paginated. Fork status
//! needs one request per repository to its forks listing.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use super::{decode_records, lenient};
use super::pagination::{CursorPaginator, Paginator};
use crate::domain::entities::{ForkStatus, Language, OrgName};
use crate::domain::ports::{Fetched, Forge, HttpClient, IntoFetched};
use crate::error::UnreachableError;

/// Bitbucket repository record (only the fields we read)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BitbucketRepo {
    #[serde(deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub language: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub links: BitbucketRepoLinks,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BitbucketRepoLinks {
    #[serde(deserialize_with = "lenient")]
    pub forks: Option<BitbucketLink>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BitbucketLink {
    #[serde(deserialize_with = "lenient")]
    pub href: Option<String>,
}

impl BitbucketRepo {
    fn forks_href(&self) -> Option<&str> {
        self.links.forks.as_ref()?.href.as_deref()
    }
}

/// Repository names are embedded in URLs with whitespace runs turned into `-`
pub fn repo_slug(name: &str) -> String {
    let hyphenated = name.split_whitespace().collect::<Vec<_>>().join("-");
    urlencoding::encode(&hyphenated).into_owned()
}

pub struct BitbucketForge {
    http: Arc<dyn HttpClient>,
    base_url: String,
    paginator: CursorPaginator,
}

impl BitbucketForge {
    pub fn new(base_url: String, http: Arc<dyn HttpClient>) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            paginator: CursorPaginator,
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}?pagelen=100", self.base_url, path)
    }
}

#[async_trait]
impl Forge for BitbucketForge {
    type Repo = BitbucketRepo;

    fn name(&self) -> &'static str {
        "bitbucket"
    }

    async fn list_repositories(&self, org: &OrgName) -> Result<Vec<BitbucketRepo>, UnreachableError> {
        let url = self.api_url(&format!("/repositories/{}", org.path_segment()));
        let pages = self.paginator.fetch_pages(self.http.as_ref(), &url).await?;
        if pages.is_truncated() {
            tracing::debug!("Bitbucket repository listing for {} is incomplete", org);
        }
        tracing::debug!(
            "Bitbucket listed {} repositories for {} over {} page(s)",
            pages.record_count(),
            org,
            pages.page_count()
        );
        Ok(decode_records(pages.into_records()))
    }

    async fn fork_status(
        &self,
        _org: &OrgName,
        repo: &BitbucketRepo,
    ) -> Result<Fetched<ForkStatus>, UnreachableError> {
        let Some(href) = repo.forks_href() else {
            return Ok(Fetched::Invalid);
        };

        let listing = self.http.get(href, &[]).await.into_fetched()?;
        Ok(listing.map(|response| {
            let has_forks = response
                .body
                .get("values")
                .and_then(|values| values.as_array())
                .is_some_and(|values| !values.is_empty());
            if has_forks {
                ForkStatus::Forked
            } else {
                ForkStatus::Original
            }
        }))
    }

    async fn languages(
        &self,
        _org: &OrgName,
        repo: &BitbucketRepo,
    ) -> Result<Fetched<Vec<Language>>, UnreachableError> {
        // A repository without a language still contributes its `null`
        Ok(Fetched::Found(vec![repo.language.clone()]))
    }

    async fn watchers(
        &self,
        org: &OrgName,
        repo: &BitbucketRepo,
    ) -> Result<Fetched<u64>, UnreachableError> {
        let Some(name) = repo.name.as_deref() else {
            return Ok(Fetched::Invalid);
        };

        let url = self.api_url(&format!(
            "/repositories/{}/{}/watchers",
            org.path_segment(),
            repo_slug(name)
        ));
        let count = self.paginator.count_records(self.http.as_ref(), &url).await?;
        Ok(Fetched::Found(count))
    }

    async fn followers(&self, org: &OrgName) -> Result<Fetched<u64>, UnreachableError> {
        let url = self.api_url(&format!("/teams/{}/followers", org.path_segment()));
        let count = self.paginator.count_records(self.http.as_ref(), &url).await?;
        Ok(Fetched::Found(count))
    }
}
