use clap::{Parser, ValueEnum};

use crate::sources::http::BROWSER_USER_AGENT;

/// Which upstream the run pulls games from.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Scrape a web page for JSON fragments embedded in its scripts
    Html,
    /// Weekly-schedule API: week list plus per-week games (`?week=N`)
    Weekly,
    /// Single consolidated feed endpoint
    Feed,
}

/// NHL starting-goalie feed normalizer with goalie-matchup betting edges
#[derive(Parser, Debug, Clone)]
#[command(name = "goalie-edges", version, about)]
pub struct Config {
    /// Upstream source to fetch games from
    #[arg(long, env = "SOURCE", value_enum, default_value = "html")]
    pub source: SourceKind,

    /// Page scraped by the `html` source
    #[arg(long, env = "PAGE_URL", default_value = "https://goaliepost.com/")]
    pub page_url: String,

    /// Week list endpoint for the `weekly` source
    #[arg(long, env = "WEEKS_URL")]
    pub weeks_url: Option<String>,

    /// Per-week games endpoint for the `weekly` source (receives `?week=N`)
    #[arg(long, env = "WEEKLY_GAMES_URL")]
    pub weekly_games_url: Option<String>,

    /// Explicit weeks to fetch, comma separated (skips the week list call)
    #[arg(long, env = "WEEKS", value_delimiter = ',')]
    pub weeks: Vec<u32>,

    /// Endpoint for the `feed` source
    #[arg(long, env = "FEED_URL")]
    pub feed_url: Option<String>,

    /// JSON pointer to the game list inside the feed (e.g. /data/content/weeklyGames)
    #[arg(long, env = "GAMES_POINTER")]
    pub games_pointer: Option<String>,

    /// Output JSON document path (overwritten on every successful run)
    #[arg(long, env = "OUTPUT_PATH", default_value = "data.json")]
    pub output_path: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "TIMEOUT_SECS", default_value = "30")]
    pub timeout_secs: u64,

    /// User-Agent sent with every upstream request
    #[arg(long, env = "USER_AGENT", default_value = BROWSER_USER_AGENT)]
    pub user_agent: String,

    /// Keep at most this many games in the output
    #[arg(long, env = "MAX_GAMES")]
    pub max_games: Option<usize>,

    /// After writing, serve the document over HTTP on this address (e.g. 0.0.0.0:8080)
    #[arg(long = "serve", env = "SERVE_ADDR")]
    pub serve_addr: Option<String>,

    /// Directory of front-end assets served alongside the data API
    #[arg(long, env = "STATIC_DIR")]
    pub static_dir: Option<String>,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        match self.source {
            SourceKind::Html => {}
            SourceKind::Weekly => {
                if self.weekly_games_url.is_none() {
                    anyhow::bail!("WEEKLY_GAMES_URL is required for the weekly source");
                }
                if self.weeks_url.is_none() && self.weeks.is_empty() {
                    anyhow::bail!("The weekly source needs WEEKS_URL or an explicit --weeks list");
                }
            }
            SourceKind::Feed => {
                if self.feed_url.is_none() {
                    anyhow::bail!("FEED_URL is required for the feed source");
                }
            }
        }
        if let Some(pointer) = &self.games_pointer {
            if !pointer.is_empty() && !pointer.starts_with('/') {
                anyhow::bail!("games_pointer must be a JSON pointer starting with '/'");
            }
        }
        if self.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be positive");
        }
        if self.max_games == Some(0) {
            anyhow::bail!("max_games must be positive when set");
        }
        Ok(())
    }
}
