use anyhow::{Context, Result};
use async_trait::async_trait;
use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use super::http::HttpFetcher;
use super::provider::GameSource;

/// A flat JSON object that mentions a `"game"` key. Nested objects are not
/// matched; the page embeds one flat fragment per game.
const FRAGMENT_PATTERN: &str = r#"\{[^{}]*"game"[^{}]*\}"#;

/// Compiled matchers for game fragments in `<script>` tags.
pub struct FragmentScanner {
    pattern: Regex,
    scripts: Selector,
}

impl FragmentScanner {
    pub fn new() -> Result<Self> {
        let pattern = Regex::new(FRAGMENT_PATTERN).context("Invalid fragment pattern")?;
        let scripts = Selector::parse("script")
            .map_err(|e| anyhow::anyhow!("Invalid script selector: {:?}", e))?;
        Ok(FragmentScanner { pattern, scripts })
    }

    /// Every fragment in a game-related `<script>` that parses as JSON.
    pub fn scan(&self, html: &str) -> Vec<Value> {
        let document = Html::parse_document(html);

        let mut games = Vec::new();
        for script in document.select(&self.scripts) {
            let text: String = script.text().collect();
            if !text.to_lowercase().contains("game") {
                continue;
            }
            for fragment in self.pattern.find_iter(&text) {
                match serde_json::from_str::<Value>(fragment.as_str()) {
                    Ok(value) => games.push(value),
                    Err(e) => debug!("Ignoring unparseable fragment: {}", e),
                }
            }
        }
        games
    }
}

/// Scrapes a web page for game fragments embedded in its `<script>` tags.
pub struct HtmlScrapeSource {
    fetcher: HttpFetcher,
    page_url: Url,
    scanner: FragmentScanner,
}

impl HtmlScrapeSource {
    pub fn new(fetcher: HttpFetcher, page_url: Url) -> Result<Self> {
        Ok(HtmlScrapeSource {
            fetcher,
            page_url,
            scanner: FragmentScanner::new()?,
        })
    }
}

#[async_trait]
impl GameSource for HtmlScrapeSource {
    fn name(&self) -> &str {
        "html"
    }

    async fn fetch_games(&self) -> Result<Vec<Value>> {
        info!("Scraping {}", self.page_url);
        let html = self.fetcher.get_text(&self.page_url).await?;
        let games = self.scanner.scan(&html);
        if games.is_empty() {
            warn!("No embedded games found on {}", self.page_url);
        } else {
            info!("Found {} potential games in page scripts", games.len());
        }
        Ok(games)
    }
}
