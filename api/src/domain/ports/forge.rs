//! Forge port trait
//!
//! A forge is one hosting platform's answer to the questions a profile
//! collection asks: which repositories exist, which are forks, which
//! languages and topics they use, how many watchers and followers there are.
//! URL layout, paging style and response shapes stay behind this trait.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::http::Fetched;
use crate::domain::entities::{ForkStatus, Language, OrgName};
use crate::error::UnreachableError;

/// Port trait for one hosting platform
#[async_trait]
pub trait Forge: Send + Sync {
    /// Platform-native repository record, decoded leniently
    type Repo: DeserializeOwned + Default + Send + Sync;

    /// Short platform name used in logs
    fn name(&self) -> &'static str;

    /// Whether this platform has repository topics
    fn tracks_topics(&self) -> bool {
        false
    }

    /// Every repository of the organization, across all pages
    async fn list_repositories(&self, org: &OrgName) -> Result<Vec<Self::Repo>, UnreachableError>;

    async fn fork_status(
        &self,
        org: &OrgName,
        repo: &Self::Repo,
    ) -> Result<Fetched<ForkStatus>, UnreachableError>;

    async fn languages(
        &self,
        org: &OrgName,
        repo: &Self::Repo,
    ) -> Result<Fetched<Vec<Language>>, UnreachableError>;

    async fn watchers(
        &self,
        org: &OrgName,
        repo: &Self::Repo,
    ) -> Result<Fetched<u64>, UnreachableError>;

    fn topics(&self, _repo: &Self::Repo) -> Vec<String> {
        Vec::new()
    }

    async fn followers(&self, org: &OrgName) -> Result<Fetched<u64>, UnreachableError>;
}
