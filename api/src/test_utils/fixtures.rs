//! Test fixtures
//!
//! Factory functions for upstream payloads and finished statistics.

use std::collections::BTreeSet;

use serde_json::{json, Value};

use crate::adapters::forge::pagination::with_page;
use crate::domain::entities::{OrgName, OrgStats, RepoCounts};

pub const BITBUCKET_API: &str = "https://bitbucket.test/2.0";
pub const GITHUB_API: &str = "https://github.test";

pub fn test_org() -> OrgName {
    OrgName::parse("acme").unwrap()
}

/// `n` placeholder records
pub fn records(n: usize) -> Vec<Value> {
    (0..n).map(|i| json!({ "id": i })).collect()
}

/// A Bitbucket page body
pub fn bitbucket_page(values: Vec<Value>, next: Option<&str>) -> Value {
    match next {
        Some(next) => json!({ "values": values, "next": next }),
        None => json!({ "values": values }),
    }
}

/// A Bitbucket repository record
pub fn bitbucket_repo(name: &str, language: Option<&str>, forks_href: &str) -> Value {
    json!({
        "name": name,
        "language": language,
        "links": { "forks": { "href": forks_href } }
    })
}

/// A GitHub repository record
pub fn github_repo(name: &str, fork: bool, watchers: u64, topics: &[&str]) -> Value {
    json!({
        "name": name,
        "fork": fork,
        "watchers": watchers,
        "topics": topics
    })
}

/// A GitHub `Link` header for the first page of `url`
pub fn github_link_header(url: &str, last: u32) -> String {
    format!(
        "<{}>; rel=\"next\", <{}>; rel=\"last\"",
        with_page(url, 2),
        with_page(url, last)
    )
}

/// Bitbucket-side input of the reference merge
pub fn bitbucket_stats() -> OrgStats {
    OrgStats {
        followers: 1,
        languages: BTreeSet::from([Some("python".to_string())]),
        repos: RepoCounts {
            forked: 1,
            unforked: 1,
        },
        watchers: 1,
        topics: None,
    }
}

/// GitHub-side input of the reference merge
pub fn github_stats() -> OrgStats {
    OrgStats {
        followers: 1,
        languages: BTreeSet::from([Some("javascript".to_string())]),
        repos: RepoCounts {
            forked: 1,
            unforked: 1,
        },
        watchers: 1,
        topics: Some(BTreeSet::from(["flask".to_string()])),
    }
}

pub fn empty_stats(tracks_topics: bool) -> OrgStats {
    OrgStats {
        topics: tracks_topics.then(BTreeSet::new),
        ..OrgStats::default()
    }
}
