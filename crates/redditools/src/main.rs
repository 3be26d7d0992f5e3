#![allow(unused)]

use crate::prelude::*;
use clap::Parser;
use redditools_core::config::RedditConfig;

mod config;
mod error;
mod mcp;
mod prelude;
mod reddit;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Search Reddit, read posts and their comments, from the terminal or as MCP tools"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Reddit base URL (scheme and host)
    #[clap(long, env = "REDDIT_BASE_URL", global = true)]
    base_url: Option<String>,

    /// User-Agent header sent with every Reddit request
    #[clap(long, env = "REDDIT_USER_AGENT", global = true)]
    user_agent: Option<String>,

    /// Request timeout in seconds
    #[clap(long, env = "REDDIT_TIMEOUT_SECS", global = true)]
    timeout: Option<u64>,

    /// Whether to display additional information.
    #[clap(long, env = "REDDITOOLS_VERBOSE", global = true, default_value = "false")]
    verbose: bool,

    /// Effective configuration, resolved once at startup
    #[clap(skip)]
    config: RedditConfig,
}

impl Global {
    /// Defaults, overridden by environment variables and then CLI flags
    fn resolve_config(&self) -> RedditConfig {
        RedditConfig::default().with_overrides(
            self.base_url.clone(),
            self.user_agent.clone(),
            self.timeout,
        )
    }
}

#[cfg(test)]
impl Global {
    pub fn with_config(config: RedditConfig) -> Self {
        Self {
            base_url: None,
            user_agent: None,
            timeout: None,
            verbose: false,
            config,
        }
    }
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Reddit (www.reddit.com) operations
    Reddit(crate::reddit::App),

    /// Model Context Protocol server
    MCP(crate::mcp::App),

    /// Show the effective configuration
    Config(crate::config::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let mut app = App::parse();
    app.global.config = app.global.resolve_config();

    match app.command {
        SubCommands::Reddit(sub_app) => crate::reddit::run(sub_app, app.global).await,
        SubCommands::MCP(sub_app) => crate::mcp::run(sub_app, app.global).await,
        SubCommands::Config(sub_app) => crate::config::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
