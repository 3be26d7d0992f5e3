use crate::prelude::{println, *};
use prettytable::row;
use redditools_core::config::RedditConfig;

#[derive(Debug, clap::Parser)]
#[command(name = "config")]
#[command(about = "Show the effective configuration")]
pub struct App {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, serde::Serialize)]
struct ConfigOutput {
    base_url: String,
    user_agent: String,
    timeout_secs: u64,
    site_domain: String,
    search_default_sort: String,
    search_default_limit: u32,
    search_limit_range: String,
    comments_default_sort: String,
    comments_default_limit: u32,
    comments_limit_range: String,
}

impl From<&RedditConfig> for ConfigOutput {
    fn from(config: &RedditConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            user_agent: config.user_agent.clone(),
            timeout_secs: config.timeout.as_secs(),
            site_domain: config.site_domain.clone(),
            search_default_sort: config.search.sort.to_string(),
            search_default_limit: config.search.limit,
            search_limit_range: f!(
                "{}-{}",
                config.search.limit_bounds.start(),
                config.search.limit_bounds.end()
            ),
            comments_default_sort: config.comments.sort.to_string(),
            comments_default_limit: config.comments.limit,
            comments_limit_range: f!(
                "{}-{}",
                config.comments.limit_bounds.start(),
                config.comments.limit_bounds.end()
            ),
        }
    }
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let output = ConfigOutput::from(&global.config);

    if app.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let mut table = new_table();
    table.add_row(row!["base_url", output.base_url]);
    table.add_row(row!["user_agent", output.user_agent]);
    table.add_row(row!["timeout", f!("{}s", output.timeout_secs)]);
    table.add_row(row!["site_domain", output.site_domain]);
    table.add_row(row![
        "search",
        f!(
            "sort={} limit={} ({})",
            output.search_default_sort,
            output.search_default_limit,
            output.search_limit_range
        )
    ]);
    table.add_row(row![
        "comments",
        f!(
            "sort={} limit={} ({})",
            output.comments_default_sort,
            output.comments_default_limit,
            output.comments_limit_range
        )
    ]);
    table.printstd();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_output_from_defaults() {
        let output = ConfigOutput::from(&RedditConfig::default());
        assert_eq!(output.base_url, "https://www.reddit.com");
        assert_eq!(output.timeout_secs, 30);
        assert_eq!(output.search_default_sort, "relevance");
        assert_eq!(output.search_limit_range, "1-25");
        assert_eq!(output.comments_default_sort, "top");
        assert_eq!(output.comments_limit_range, "1-100");
    }
}
