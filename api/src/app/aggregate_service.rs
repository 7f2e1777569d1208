//! Aggregate service
//!
//! Runs the Bitbucket and GitHub collectors side by side and merges their
//! results into one report.

use std::sync::Arc;

use crate::adapters::forge::{BitbucketForge, GithubForge};
use crate::app::ProfileCollector;
use crate::domain::entities::{merge, MergedReport, OrgName};

pub struct AggregateService {
    bitbucket: ProfileCollector<BitbucketForge>,
    github: ProfileCollector<GithubForge>,
}

impl AggregateService {
    pub fn new(bitbucket: Arc<BitbucketForge>, github: Arc<GithubForge>) -> Self {
        Self {
            bitbucket: ProfileCollector::new(bitbucket),
            github: ProfileCollector::new(github),
        }
    }

    pub async fn aggregate(&self, bitbucket_org: &OrgName, github_org: &OrgName) -> MergedReport {
        let (bitbucket, github) = tokio::join!(
            self.bitbucket.produce_result(bitbucket_org),
            self.github.produce_result(github_org)
        );

        tracing::debug!(
            "Merging {} Bitbucket and {} GitHub repositories",
            bitbucket.repos.count(),
            github.repos.count()
        );
        merge(&bitbucket, &github)
    }
}
