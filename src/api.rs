// API client module: a small blocking HTTP client for the VK link
// utilities (`utils.getShortLink` and `utils.getLinkStats`).
//
// Every call is a plain GET with the token and API version in the query
// string. Responses are kept as `serde_json::Value` so that a missing
// field can be reported by name.

use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

/// API version sent with every request.
pub const API_VERSION: &str = "5.199";

const SHORTEN_METHOD: &str = "utils.getShortLink";
const STATS_METHOD: &str = "utils.getLinkStats";

/// Stats interval covering the whole lifetime of a link.
const ALL_TIME: &str = "forever";

/// Blocking VK API client holding the reqwest client, the API root and
/// the access token.
#[derive(Clone)]
pub struct VkClient {
    client: Client,
    base_url: String,
    token: String,
}

/// Query string of `utils.getShortLink`.
#[derive(Serialize, Debug)]
struct ShortenQuery<'a> {
    access_token: &'a str,
    v: &'a str,
    url: &'a str,
    private: u8,
}

/// Query string of `utils.getLinkStats`.
#[derive(Serialize, Debug)]
struct StatsQuery<'a> {
    access_token: &'a str,
    v: &'a str,
    key: &'a str,
    interval: &'a str,
}

impl VkClient {
    /// Create a client talking to `base_url` (without trailing slash).
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(VkClient {
            client,
            base_url: base_url.into(),
            token: token.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.api_base_url.clone(), config.token.clone())
    }

    /// Ask VK for a public short link to `url`.
    pub fn shorten_url(&self, url: &str) -> ApiResult<String> {
        debug!(url, "shortening link");
        let query = ShortenQuery {
            access_token: &self.token,
            v: API_VERSION,
            url,
            private: 0,
        };
        let body = self.call(SHORTEN_METHOD, &query)?;
        let short_url = field(field(&body, "response")?, "short_url")?;
        short_url
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ApiError::Value(format!("short_url is not a string: {}", short_url)))
    }

    /// All-time view count of a vk.cc link.
    pub fn count_clicks(&self, short_url: &str) -> ApiResult<u64> {
        let body = self.link_stats(link_key(short_url))?;
        let stats = field(field(&body, "response")?, "stats")?;
        let first = stats
            .as_array()
            .ok_or_else(|| ApiError::Value(format!("stats is not a list: {}", stats)))?
            .first()
            .ok_or_else(|| ApiError::Index("stats[0]".into()))?;
        let views = field(first, "views")?;
        views
            .as_u64()
            .ok_or_else(|| ApiError::Value(format!("views is not a count: {}", views)))
    }

    /// A link counts as shortened when its stats query comes back without
    /// an `error` object, whatever that error says.
    pub fn is_shorten_link(&self, url: &str) -> ApiResult<bool> {
        let body = self.link_stats(link_key(url))?;
        Ok(body.get("error").is_none())
    }

    fn link_stats(&self, key: &str) -> ApiResult<Value> {
        debug!(key, "fetching link stats");
        let query = StatsQuery {
            access_token: &self.token,
            v: API_VERSION,
            key,
            interval: ALL_TIME,
        };
        self.call(STATS_METHOD, &query)
    }

    /// Perform one GET and parse the JSON body. Non-success statuses are
    /// returned as `ApiError::Status`; the query itself is never logged
    /// because it carries the token.
    fn call<Q: Serialize>(&self, method: &'static str, query: &Q) -> ApiResult<Value> {
        let url = format!("{}/{}", &self.base_url, method);
        let res = self.client.get(&url).query(query).send()?;
        let status = res.status();
        if !status.is_success() {
            warn!(method, %status, "VK API returned an error status");
            return Err(ApiError::Status { status, method });
        }
        let txt = res.text()?;
        serde_json::from_str(&txt)
            .map_err(|e| ApiError::Value(format!("invalid JSON from {}: {}", method, e)))
    }
}

/// Trailing path segment of a link, used as the stats lookup key.
/// `https://vk.cc/abcDEF` gives `abcDEF`.
pub fn link_key(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

fn field<'a>(value: &'a Value, key: &str) -> ApiResult<&'a Value> {
    value
        .get(key)
        .ok_or_else(|| ApiError::MissingKey(key.to_string()))
}
