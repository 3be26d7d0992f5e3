use crate::prelude::{println, *};
use redditools_core::config::RedditConfig;
use redditools_core::reddit::{extract_search_args, format_search_results, search_request, Payload};
use serde_json::{json, Map, Value};

use super::fetch::fetch;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct SearchOptions {
    /// Search query terms
    pub query: String,

    /// Subreddit to search within (without the 'r/' prefix)
    #[arg(short, long)]
    pub subreddit: Option<String>,

    /// Sort method: relevance, hot, new, top
    #[arg(long)]
    pub sort: Option<String>,

    /// Maximum number of results to return (1-25)
    #[arg(short, long, env = "REDDIT_SEARCH_LIMIT")]
    pub limit: Option<u32>,

    /// Print the raw API response as JSON
    #[arg(long)]
    pub raw: bool,
}

impl SearchOptions {
    fn arguments(&self) -> Map<String, Value> {
        super::arguments(vec![
            ("query", Some(json!(self.query))),
            ("subreddit", self.subreddit.as_ref().map(|s| json!(s))),
            ("sort", self.sort.as_ref().map(|s| json!(s))),
            ("limit", self.limit.map(|l| json!(l))),
        ])
    }
}

pub async fn run(options: SearchOptions, global: crate::Global) -> Result<()> {
    let arguments = options.arguments();

    if global.verbose {
        println!("Searching for: {}", options.query);
    }

    if options.raw {
        let payload = search_payload(Some(&arguments), &global.config).await?;
        return super::output_raw(payload);
    }

    let text = search_data(Some(&arguments), &global.config).await?;
    println!("{text}");

    Ok(())
}

/// Run a search and render it as text
pub async fn search_data(
    arguments: Option<&Map<String, Value>>,
    config: &RedditConfig,
) -> Result<String, ToolError> {
    let payload = search_payload(arguments, config).await?;
    format_search_results(&payload).map_err(ToolError::format("results"))
}

/// Run a search and return the decoded response
pub async fn search_payload(
    arguments: Option<&Map<String, Value>>,
    config: &RedditConfig,
) -> Result<Payload, ToolError> {
    let params = extract_search_args(arguments, &config.search)?;
    let request = search_request(&params);
    Ok(fetch(config, &request).await?)
}
