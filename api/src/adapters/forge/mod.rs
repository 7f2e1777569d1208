//! Forge adapters
//!
//! Bitbucket and GitHub implementations of the `Forge` port, plus the
//! pagination drivers they share.

pub mod bitbucket;
pub mod github;
pub mod pagination;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub use bitbucket::BitbucketForge;
pub use github::GithubForge;

/// Field deserializer that falls back to the default when the value has the
/// wrong shape, so one bad field leaves the rest of the record intact
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Like `lenient`, for a list of strings: non-string entries are dropped
fn lenient_strings<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_array().map(|items| {
        items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect()
    }))
}

/// Decode raw records, falling back to the all-default record for entries
/// that are not objects
fn decode_records<T>(records: Vec<Value>) -> Vec<T>
where
    T: DeserializeOwned + Default,
{
    records
        .into_iter()
        .map(|record| {
            serde_json::from_value(record).unwrap_or_else(|e| {
                tracing::warn!("Malformed repository record, using defaults: {}", e);
                T::default()
            })
        })
        .collect()
}
