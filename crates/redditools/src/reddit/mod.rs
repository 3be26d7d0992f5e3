use crate::prelude::{println, *};
use colored::Colorize;

pub mod comments;
pub mod fetch;
pub mod post;
pub mod search;

#[cfg(test)]
pub(crate) mod testing;

// Re-export public data functions
pub use comments::comments_data;
pub use post::post_data;
pub use search::search_data;

#[derive(Debug, clap::Parser)]
#[command(name = "reddit")]
#[command(about = "Reddit (www.reddit.com) operations")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Search Reddit for posts matching a query
    #[clap(name = "search")]
    Search(search::SearchOptions),

    /// Show the details of a single post
    #[clap(name = "post")]
    Post(post::PostOptions),

    /// Show the top-level comments of a post
    #[clap(name = "comments")]
    Comments(comments::CommentsOptions),
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!(
            "{} {}",
            "Reddit API Base:".bright_black(),
            global.config.base_url.bright_black()
        );
        println!();
    }

    match app.command {
        Commands::Search(options) => search::run(options, global).await,
        Commands::Post(options) => post::run(options, global).await,
        Commands::Comments(options) => comments::run(options, global).await,
    }
}

/// Print the raw API response, pretty-printed
fn output_raw(payload: redditools_core::reddit::Payload) -> Result<()> {
    let json = serde_json::to_string_pretty(&payload.into_value())
        .map_err(|e| eyre!("JSON serialization failed: {}", e))?;
    println!("{json}");
    Ok(())
}

/// Turn CLI flags into the same argument object an MCP client would send
fn arguments(pairs: Vec<(&str, Option<serde_json::Value>)>) -> serde_json::Map<String, serde_json::Value> {
    pairs
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key.to_string(), v)))
        .collect()
}
