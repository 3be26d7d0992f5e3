//! Endpoint paths and query strings for the Reddit JSON API

use std::collections::BTreeMap;

use super::args::{post_fullname, CommentsParams, PostParams, SearchParams};

/// One GET against the Reddit JSON API
///
/// Query keys live in a `BTreeMap` so the rendered URL is always in key order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedditRequest {
    pub path: String,
    pub query: BTreeMap<&'static str, String>,
}

impl RedditRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: BTreeMap::new(),
        }
    }

    pub fn param(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.insert(key, value.to_string());
        self
    }

    /// URL-encoded query string, without the leading `?`
    pub fn query_string(&self) -> String {
        self.query
            .iter()
            .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Full URL against `base_url`
    pub fn url(&self, base_url: &str) -> String {
        let mut url = format!("{}{}", base_url.trim_end_matches('/'), self.path);
        if !self.query.is_empty() {
            url.push('?');
            url.push_str(&self.query_string());
        }
        url
    }
}

/// `GET /search.json` or `GET /r/<subreddit>/search.json`
pub fn search_request(params: &SearchParams) -> RedditRequest {
    let path = match &params.subreddit {
        Some(subreddit) => format!("/r/{subreddit}/search.json"),
        None => "/search.json".to_string(),
    };

    let request = RedditRequest::new(path)
        .param("q", &params.query)
        .param("sort", params.sort)
        .param("limit", params.limit);

    // Without restrict_sr Reddit ignores the subreddit in the path.
    if params.subreddit.is_some() {
        request.param("restrict_sr", 1)
    } else {
        request
    }
}

/// `GET /api/info.json?id=t3_<id>`
pub fn post_request(params: &PostParams) -> RedditRequest {
    RedditRequest::new("/api/info.json").param("id", post_fullname(&params.post_id))
}

/// `GET /comments/<id>.json`
pub fn comments_request(params: &CommentsParams) -> RedditRequest {
    RedditRequest::new(format!("/comments/{}.json", params.post_id))
        .param("sort", params.sort)
        .param("limit", params.limit)
}
