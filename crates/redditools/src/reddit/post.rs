use crate::prelude::{println, *};
use redditools_core::config::RedditConfig;
use redditools_core::reddit::{extract_post_args, format_post_details, post_request, Payload};
use serde_json::{json, Map, Value};

use super::fetch::fetch;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct PostOptions {
    /// Reddit post ID (with or without the "t3_" prefix) or post URL
    pub post_id: String,

    /// Print the raw API response as JSON
    #[arg(long)]
    pub raw: bool,
}

impl PostOptions {
    fn arguments(&self) -> Map<String, Value> {
        super::arguments(vec![("post_id", Some(json!(self.post_id)))])
    }
}

pub async fn run(options: PostOptions, global: crate::Global) -> Result<()> {
    let arguments = options.arguments();

    if global.verbose {
        println!("Fetching post: {}", options.post_id);
    }

    if options.raw {
        let payload = post_payload(Some(&arguments), &global.config).await?;
        return super::output_raw(payload);
    }

    let text = post_data(Some(&arguments), &global.config).await?;
    println!("{text}");

    Ok(())
}

/// Fetch a post and render its details as text
pub async fn post_data(
    arguments: Option<&Map<String, Value>>,
    config: &RedditConfig,
) -> Result<String, ToolError> {
    let payload = post_payload(arguments, config).await?;
    format_post_details(&payload, &config.site_domain).map_err(ToolError::format("post details"))
}

/// Fetch a post and return the decoded `/api/info.json` response
pub async fn post_payload(
    arguments: Option<&Map<String, Value>>,
    config: &RedditConfig,
) -> Result<Payload, ToolError> {
    let params = extract_post_args(arguments)?;
    let request = post_request(&params);
    Ok(fetch(config, &request).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reddit::testing::FixtureServer;
    use axum::http::StatusCode;

    const POST: &str = r#"{
        "kind": "Listing",
        "data": {
            "children": [{
                "kind": "t3",
                "data": {
                    "title": "Announcing Rust 1.80",
                    "author": "rustlang",
                    "score": 900,
                    "upvote_ratio": 0.98,
                    "num_comments": 120,
                    "created_utc": 1721952000.0,
                    "selftext": "",
                    "url": "https://blog.rust-lang.org/2024/07/25/Rust-1.80.0.html"
                }
            }]
        }
    }"#;

    fn config_for(server: &FixtureServer) -> RedditConfig {
        RedditConfig::default().with_overrides(Some(server.base_url.clone()), None, None)
    }

    #[tokio::test]
    async fn test_post_data_end_to_end() {
        let server = FixtureServer::start(StatusCode::OK, POST).await;
        let arguments = json!({ "post_id": "t3_1ebxyz" });

        let text = post_data(arguments.as_object(), &config_for(&server))
            .await
            .unwrap();

        assert_eq!(
            text,
            "Title: Announcing Rust 1.80\n\n\
             Author: u/rustlang\n\
             Score: 900 (98% upvoted)\n\
             Comments: 120\n\
             Created: 2024-07-26 00:00:00 UTC\n\n\
             URL: https://blog.rust-lang.org/2024/07/25/Rust-1.80.0.html\n\n"
        );
    }

    #[tokio::test]
    async fn test_post_prefix_yields_identical_request() {
        let server = FixtureServer::start(StatusCode::OK, POST).await;
        let config = config_for(&server);

        for post_id in ["t3_1ebxyz", "1ebxyz"] {
            let arguments = json!({ "post_id": post_id });
            post_data(arguments.as_object(), &config).await.unwrap();
        }

        let requests = server.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].path_and_query, "/api/info.json?id=t3_1ebxyz");
        assert_eq!(requests[0].path_and_query, requests[1].path_and_query);
    }

    #[tokio::test]
    async fn test_post_not_found() {
        let server =
            FixtureServer::start(StatusCode::OK, r#"{"kind":"Listing","data":{"children":[]}}"#).await;
        let arguments = json!({ "post_id": "gone" });

        let err = post_data(arguments.as_object(), &config_for(&server))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Failed to format post details: post not found");
    }

    #[tokio::test]
    async fn test_post_upstream_error() {
        let server = FixtureServer::start(StatusCode::NOT_FOUND, "{}").await;
        let arguments = json!({ "post_id": "abc" });

        let err = post_data(arguments.as_object(), &config_for(&server))
            .await
            .unwrap_err();

        assert!(matches!(err, ToolError::Fetch(FetchError::Status(404))));
        assert!(err.to_string().starts_with("Reddit API error:"));
    }
}
