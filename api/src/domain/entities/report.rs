//! Merged cross-platform report

use std::collections::BTreeSet;

use serde::Serialize;

use super::stats::{Language, OrgStats};

/// A deduplicated list together with its length
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing<T> {
    pub list: Vec<T>,
    pub count: usize,
}

impl<T> From<BTreeSet<T>> for Listing<T> {
    fn from(set: BTreeSet<T>) -> Self {
        let list: Vec<T> = set.into_iter().collect();
        Self {
            count: list.len(),
            list,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RepoTotals {
    pub forked: u64,
    pub unforked: u64,
    pub count: u64,
}

/// Statistics for one Bitbucket and one GitHub organization combined
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergedReport {
    pub followers: u64,
    pub languages: Listing<Language>,
    pub topics: Listing<String>,
    pub repos: RepoTotals,
    pub watchers: u64,
}

/// Combine the Bitbucket and GitHub results.
///
/// Counts are summed and languages unioned. Topics only exist on GitHub, so
/// they are taken from `github` alone.
pub fn merge(bitbucket: &OrgStats, github: &OrgStats) -> MergedReport {
    let languages: BTreeSet<Language> = bitbucket
        .languages
        .iter()
        .chain(github.languages.iter())
        .cloned()
        .collect();

    let forked = bitbucket.repos.forked + github.repos.forked;
    let unforked = bitbucket.repos.unforked + github.repos.unforked;

    MergedReport {
        followers: bitbucket.followers + github.followers,
        languages: languages.into(),
        topics: github.topics.clone().unwrap_or_default().into(),
        repos: RepoTotals {
            forked,
            unforked,
            count: forked + unforked,
        },
        watchers: bitbucket.watchers + github.watchers,
    }
}
