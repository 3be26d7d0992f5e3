use redditools_core::config::RedditConfig;
use redditools_core::reddit::{Payload, RedditRequest};
use reqwest::StatusCode;

use crate::error::FetchError;

/// HTTP client carrying the configured `User-Agent` and timeout
pub fn create_client(config: &RedditConfig) -> Result<reqwest::Client, FetchError> {
    reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout)
        .build()
        .map_err(|e| FetchError::Client(e.to_string()))
}

/// Issue one GET and decode the body
///
/// Only `200 OK` counts as success. There are no retries.
pub async fn fetch(config: &RedditConfig, request: &RedditRequest) -> Result<Payload, FetchError> {
    let client = create_client(config)?;
    let url = request.url(&config.base_url);

    log::debug!("GET {url}");

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| FetchError::Request(e.to_string()))?;

    let status = response.status();
    if status != StatusCode::OK {
        log::warn!("GET {url} returned {status}");
        return Err(FetchError::Status(status.as_u16()));
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| FetchError::Body(e.to_string()))?;

    Payload::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
}
