//! Immutable configuration shared by every Reddit tool call
//!
//! The shell builds one [`RedditConfig`] at startup (defaults, then environment,
//! then CLI overrides) and hands out read-only references to it. Nothing in
//! this module performs I/O.

use std::ops::RangeInclusive;
use std::time::Duration;

use crate::reddit::args::{CommentSort, SearchSort};

/// Public Reddit host used when no override is given
pub const DEFAULT_BASE_URL: &str = "https://www.reddit.com";

/// Domain whose links are treated as self-links in post details
pub const DEFAULT_SITE_DOMAIN: &str = "reddit.com";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default `User-Agent` header value
///
/// Reddit throttles or blocks generic user agents, so every request carries
/// an identifying one.
pub fn default_user_agent() -> String {
    format!("redditools/{}", env!("CARGO_PKG_VERSION"))
}

/// Defaults and bounds for the `reddit_search` tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchDefaults {
    pub sort: SearchSort,
    pub limit: u32,
    pub limit_bounds: RangeInclusive<u32>,
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            sort: SearchSort::Relevance,
            limit: 10,
            limit_bounds: 1..=25,
        }
    }
}

/// Defaults and bounds for the `reddit_comments` tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentsDefaults {
    pub sort: CommentSort,
    pub limit: u32,
    pub limit_bounds: RangeInclusive<u32>,
}

impl Default for CommentsDefaults {
    fn default() -> Self {
        Self {
            sort: CommentSort::Top,
            limit: 25,
            limit_bounds: 1..=100,
        }
    }
}

/// Everything a tool call needs to know that is not in its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedditConfig {
    /// Scheme and host, without a trailing slash (e.g. `https://www.reddit.com`)
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub site_domain: String,
    pub search: SearchDefaults,
    pub comments: CommentsDefaults,
}

impl Default for RedditConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: default_user_agent(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            site_domain: DEFAULT_SITE_DOMAIN.to_string(),
            search: SearchDefaults::default(),
            comments: CommentsDefaults::default(),
        }
    }
}

impl RedditConfig {
    /// Apply optional overrides on top of the current values
    ///
    /// Empty strings are ignored so an unset-but-exported environment
    /// variable does not wipe out a default.
    pub fn with_overrides(
        mut self,
        base_url: Option<String>,
        user_agent: Option<String>,
        timeout_secs: Option<u64>,
    ) -> Self {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.base_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(agent) = user_agent.filter(|a| !a.trim().is_empty()) {
            self.user_agent = agent.trim().to_string();
        }
        if let Some(secs) = timeout_secs {
            self.timeout = Duration::from_secs(secs);
        }
        self
    }
}
