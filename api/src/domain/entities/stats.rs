//! Per-platform organization statistics
//!
//! A `ProfileAccumulator` is filled in while one platform is being crawled
//! and is finalized exactly once into an immutable `OrgStats`.

use std::collections::BTreeSet;

use serde::Serialize;

/// A language entry as reported by a platform.
///
/// `None` is a real member: Bitbucket reports repositories without a
/// language and those are kept as a `null` entry.
pub type Language = Option<String>;

/// Whether a repository is a fork of another one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForkStatus {
    Forked,
    Original,
}

/// Repository counts split by fork status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RepoCounts {
    pub forked: u64,
    pub unforked: u64,
}

impl RepoCounts {
    pub fn count(&self) -> u64 {
        self.forked + self.unforked
    }

    fn record(&mut self, status: ForkStatus) {
        match status {
            ForkStatus::Forked => self.forked += 1,
            ForkStatus::Original => self.unforked += 1,
        }
    }
}

/// Finalized statistics for one organization on one platform
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrgStats {
    pub followers: u64,
    pub languages: BTreeSet<Language>,
    pub repos: RepoCounts,
    pub watchers: u64,
    /// Only present for platforms that have a topic concept
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topics: Option<BTreeSet<String>>,
}

/// Running totals for one collection run
#[derive(Debug, Default)]
pub struct ProfileAccumulator {
    followers: u64,
    languages: BTreeSet<Language>,
    repos: RepoCounts,
    watchers: u64,
    topics: Option<BTreeSet<String>>,
}

impl ProfileAccumulator {
    pub fn new(tracks_topics: bool) -> Self {
        Self {
            topics: tracks_topics.then(BTreeSet::new),
            ..Self::default()
        }
    }

    pub fn add_followers(&mut self, followers: u64) {
        self.followers += followers;
    }

    pub fn add_languages<I>(&mut self, languages: I)
    where
        I: IntoIterator<Item = Language>,
    {
        self.languages.extend(languages);
    }

    pub fn record_repository(&mut self, status: ForkStatus) {
        self.repos.record(status);
    }

    pub fn add_watchers(&mut self, watchers: u64) {
        self.watchers += watchers;
    }

    /// Ignored when the platform has no topic concept
    pub fn add_topics<I>(&mut self, topics: I)
    where
        I: IntoIterator<Item = String>,
    {
        if let Some(set) = self.topics.as_mut() {
            set.extend(topics);
        }
    }

    pub fn finish(self) -> OrgStats {
        OrgStats {
            followers: self.followers,
            languages: self.languages,
            repos: self.repos,
            watchers: self.watchers,
            topics: self.topics,
        }
    }
}
