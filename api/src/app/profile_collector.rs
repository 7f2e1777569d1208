//! Profile collector
//!
//! Crawls one organization on one platform and folds everything into an
//! `OrgStats`. The same orchestration runs for every forge; only the forge
//! knows URLs and record shapes.

use std::sync::Arc;

use crate::domain::entities::{ForkStatus, OrgName, OrgStats, ProfileAccumulator};
use crate::domain::ports::Forge;
use crate::error::UnreachableError;

pub struct ProfileCollector<F: Forge> {
    forge: Arc<F>,
}

impl<F: Forge> ProfileCollector<F> {
    pub fn new(forge: Arc<F>) -> Self {
        Self { forge }
    }

    /// Collect statistics for `org`.
    ///
    /// Never fails. Invalid resources contribute nothing, and if the platform
    /// becomes unreachable the run stops and whatever was gathered up to that
    /// point is returned.
    pub async fn produce_result(&self, org: &OrgName) -> OrgStats {
        let platform = self.forge.name();
        let mut accumulator = ProfileAccumulator::new(self.forge.tracks_topics());

        tracing::info!("Collecting {} data for {}", platform, org);
        if let Err(e) = self.collect_repositories(org, &mut accumulator).await {
            tracing::warn!("Stopped collecting {} data for {}: {}", platform, org, e);
        }

        tracing::info!("Processing {} results for {}", platform, org);
        accumulator.finish()
    }

    async fn collect_repositories(
        &self,
        org: &OrgName,
        accumulator: &mut ProfileAccumulator,
    ) -> Result<(), UnreachableError> {
        let repos = self.forge.list_repositories(org).await?;

        for repo in &repos {
            let languages = self.forge.languages(org, repo).await?;
            accumulator.add_languages(languages.unwrap_or_default());

            let status = self.forge.fork_status(org, repo).await?;
            accumulator.record_repository(status.unwrap_or(ForkStatus::Original));

            accumulator.add_topics(self.forge.topics(repo));

            let watchers = self.forge.watchers(org, repo).await?;
            accumulator.add_watchers(watchers.unwrap_or_default());
        }

        self.collect_follower_count(org, accumulator).await
    }

    async fn collect_follower_count(
        &self,
        org: &OrgName,
        accumulator: &mut ProfileAccumulator,
    ) -> Result<(), UnreachableError> {
        let followers = self.forge.followers(org).await?;
        accumulator.add_followers(followers.unwrap_or_default());
        Ok(())
    }
}
