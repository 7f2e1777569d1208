use std::env;
use std::str::FromStr;

pub const DEFAULT_BITBUCKET_API_URL: &str = "https://api.bitbucket.org/2.0";
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Bitbucket Cloud API root, including the API version segment
    pub bitbucket_api_url: String,
    pub github_api_url: String,
    /// Sent on every upstream request (GitHub rejects requests without one)
    pub user_agent: String,
    pub request_timeout_secs: u64,
    /// Inbound rate limit per client IP
    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source
    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            port: parse_var(&var, "PORT").unwrap_or(8080),
            bitbucket_api_url: var("BITBUCKET_API_URL")
                .unwrap_or_else(|| DEFAULT_BITBUCKET_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            github_api_url: var("GITHUB_API_URL")
                .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            user_agent: var("HTTP_USER_AGENT")
                .unwrap_or_else(|| format!("profiles-api/{}", env!("CARGO_PKG_VERSION"))),
            request_timeout_secs: parse_var(&var, "HTTP_TIMEOUT_SECS").unwrap_or(30),
            rate_limit_per_second: parse_var(&var, "RATE_LIMIT_PER_SECOND").unwrap_or(2),
            rate_limit_burst: parse_var(&var, "RATE_LIMIT_BURST").unwrap_or(5),
        }
    }
}

fn parse_var<T, F>(var: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    var(key).and_then(|v| v.trim().parse().ok())
}
