//! Pagination drivers
//!
//! Two paging conventions are in use:
//! - cursor style (Bitbucket): each page body carries `values` and, while
//!   more pages remain, a `next` URL to follow verbatim
//! - header style (GitHub): the first response's `Link` header names the
//!   last page; pages `2..=last` are requested with a `page` parameter
//!
//! Both halt on an invalid-resource response and keep what they already
//! have. Connectivity failures propagate.

use std::collections::HashSet;
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use serde_json::Value;

use crate::domain::ports::{Fetched, HttpClient, IntoFetched};
use crate::error::UnreachableError;

static PAGE_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&]page=(\d+)").expect("invalid regex"));

/// Records of every page fetched, in page order
#[derive(Debug, Default)]
pub struct Pages {
    pages: Vec<Vec<Value>>,
    truncated: bool,
}

impl Pages {
    fn push(&mut self, records: Vec<Value>) {
        self.pages.push(records);
    }

    fn halt(&mut self, url: &str) {
        tracing::warn!(
            "Pagination stopped at {} after {} page(s)",
            url,
            self.pages.len()
        );
        self.truncated = true;
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// True when an invalid page cut pagination short
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn record_count(&self) -> u64 {
        self.pages.iter().map(|page| page.len() as u64).sum()
    }

    pub fn into_records(self) -> Vec<Value> {
        self.pages.into_iter().flatten().collect()
    }
}

/// Drives one paging convention to completion
#[async_trait]
pub trait Paginator: Send + Sync {
    async fn fetch_pages(
        &self,
        http: &dyn HttpClient,
        url: &str,
    ) -> Result<Pages, UnreachableError>;

    /// Every record across all pages
    async fn collect_records(
        &self,
        http: &dyn HttpClient,
        url: &str,
    ) -> Result<Vec<Value>, UnreachableError> {
        Ok(self.fetch_pages(http, url).await?.into_records())
    }

    /// Number of records across all pages
    async fn count_records(
        &self,
        http: &dyn HttpClient,
        url: &str,
    ) -> Result<u64, UnreachableError> {
        Ok(self.fetch_pages(http, url).await?.record_count())
    }
}

/// Follows the `next` link embedded in each page body
#[derive(Debug, Clone, Copy, Default)]
pub struct CursorPaginator;

#[async_trait]
impl Paginator for CursorPaginator {
    async fn fetch_pages(
        &self,
        http: &dyn HttpClient,
        url: &str,
    ) -> Result<Pages, UnreachableError> {
        let mut pages = Pages::default();
        let mut link = url.to_string();
        let mut visited = HashSet::new();

        loop {
            visited.insert(link.clone());

            let mut body = match http.get(&link, &[]).await.into_fetched()? {
                Fetched::Found(response) => response.body,
                Fetched::Invalid => {
                    pages.halt(&link);
                    break;
                }
            };

            let next = body
                .get("next")
                .and_then(Value::as_str)
                .filter(|next| !next.is_empty())
                .map(str::to_string);
            pages.push(take_array(body.get_mut("values")));

            match next {
                // A cycle of `next` links would never terminate
                Some(next) if !visited.contains(&next) => link = next,
                Some(next) => {
                    tracing::warn!("Pagination cycle back to {} stopped", next);
                    break;
                }
                None => break,
            }
        }

        Ok(pages)
    }
}

/// Reads the last page number from the first response's `Link` header
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkHeaderPaginator;

#[async_trait]
impl Paginator for LinkHeaderPaginator {
    async fn fetch_pages(
        &self,
        http: &dyn HttpClient,
        url: &str,
    ) -> Result<Pages, UnreachableError> {
        let mut pages = Pages::default();

        let first = match http.get(url, &[]).await.into_fetched()? {
            Fetched::Found(response) => response,
            Fetched::Invalid => {
                pages.halt(url);
                return Ok(pages);
            }
        };

        let last = first.header("link").and_then(last_page).unwrap_or(1);
        let mut body = first.body;
        pages.push(take_array(Some(&mut body)));

        for page in 2..=last {
            let page_url = with_page(url, page);
            match http.get(&page_url, &[]).await.into_fetched()? {
                Fetched::Found(mut response) => pages.push(take_array(Some(&mut response.body))),
                Fetched::Invalid => {
                    pages.halt(&page_url);
                    break;
                }
            }
        }

        Ok(pages)
    }
}

/// Move a JSON array out of `value`; anything else is an empty page
pub fn take_array(value: Option<&mut Value>) -> Vec<Value> {
    match value.map(Value::take) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

/// Page number of the `rel="last"` entry of a `Link` header.
///
/// Entries look like
/// `<https://api.github.com/organizations/1/repos?per_page=100&page=3>; rel="last"`.
pub fn last_page(link_header: &str) -> Option<u32> {
    link_header.split(',').find_map(|entry| {
        let mut url = None;
        let mut is_last = false;

        for segment in entry.split(';') {
            let segment = segment.trim();
            if let Some(inner) = segment.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
                url = Some(inner);
            } else if let Some(rel) = segment.strip_prefix("rel=") {
                is_last = rel
                    .trim_matches('"')
                    .split_whitespace()
                    .any(|r| r == "last");
            }
        }

        if is_last {
            url.and_then(page_param)
        } else {
            None
        }
    })
}

fn page_param(url: &str) -> Option<u32> {
    PAGE_PARAM
        .captures(url)
        .and_then(|caps| caps.get(1))
        .and_then(|page| page.as_str().parse().ok())
}

/// Append a `page` query parameter to `url`
pub fn with_page(url: &str, page: u32) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}page={}", url, separator, page)
}
