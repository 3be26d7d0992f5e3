use crate::prelude::{println, *};
use redditools_core::config::RedditConfig;
use redditools_core::reddit::{comments_request, extract_comments_args, format_comments, Payload};
use serde_json::{json, Map, Value};

use super::fetch::fetch;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct CommentsOptions {
    /// Reddit post ID (with or without the "t3_" prefix) or post URL
    pub post_id: String,

    /// Sort method: top, new, controversial, old, qa
    #[arg(long)]
    pub sort: Option<String>,

    /// Maximum number of comments to return (1-100)
    #[arg(short, long, env = "REDDIT_COMMENTS_LIMIT")]
    pub limit: Option<u32>,

    /// Print the raw API response as JSON
    #[arg(long)]
    pub raw: bool,
}

impl CommentsOptions {
    fn arguments(&self) -> Map<String, Value> {
        super::arguments(vec![
            ("post_id", Some(json!(self.post_id))),
            ("sort", self.sort.as_ref().map(|s| json!(s))),
            ("limit", self.limit.map(|l| json!(l))),
        ])
    }
}

pub async fn run(options: CommentsOptions, global: crate::Global) -> Result<()> {
    let arguments = options.arguments();

    if global.verbose {
        println!("Fetching comments for post: {}", options.post_id);
    }

    if options.raw {
        let payload = comments_payload(Some(&arguments), &global.config).await?;
        return super::output_raw(payload);
    }

    let text = comments_data(Some(&arguments), &global.config).await?;
    println!("{text}");

    Ok(())
}

/// Fetch a post's comments and render the top-level ones as text
pub async fn comments_data(
    arguments: Option<&Map<String, Value>>,
    config: &RedditConfig,
) -> Result<String, ToolError> {
    let payload = comments_payload(arguments, config).await?;
    format_comments(&payload).map_err(ToolError::format("comments"))
}

/// Fetch a post's comments and return the decoded response
pub async fn comments_payload(
    arguments: Option<&Map<String, Value>>,
    config: &RedditConfig,
) -> Result<Payload, ToolError> {
    let params = extract_comments_args(arguments, &config.comments)?;
    let request = comments_request(&params);
    Ok(fetch(config, &request).await?)
}
