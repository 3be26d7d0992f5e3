#[derive(Debug, clap::Parser)]
#[command(name = "mcp")]
#[command(about = "Serve the reddit_search, reddit_post and reddit_comments tools over MCP")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// JSON-RPC messages, one per line, on stdin/stdout
    #[clap(name = "stdio")]
    Stdio,

    /// HTTP server with `GET /sse` and `POST /message` endpoints
    #[clap(name = "sse")]
    Sse(SseOptions),
}

#[derive(Debug, clap::Args)]
pub struct SseOptions {
    /// Port for the /sse and /message endpoints
    #[arg(short, long, env = "REDDITOOLS_MCP_PORT", default_value = "3000")]
    pub port: u16,

    /// Interface to bind; keep the loopback default unless clients are remote
    #[arg(long, env = "REDDITOOLS_MCP_HOST", default_value = "127.0.0.1")]
    pub host: String,
}

impl SseOptions {
    /// `host:port` as handed to the TCP listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
