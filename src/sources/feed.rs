use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use tracing::info;
use url::Url;

use super::http::HttpFetcher;
use super::provider::GameSource;

/// JSON pointers tried, in order, when no pointer is configured.
const GAME_LIST_POINTERS: &[&str] = &["/games", "/data/content/weeklyGames", "/data/games", "/weeklyGames"];

/// Single REST endpoint returning a consolidated game feed.
pub struct FeedSource {
    fetcher: HttpFetcher,
    url: Url,
    pointer: Option<String>,
}

impl FeedSource {
    pub fn new(fetcher: HttpFetcher, url: Url, pointer: Option<String>) -> Self {
        FeedSource {
            fetcher,
            url,
            pointer,
        }
    }
}

#[async_trait]
impl GameSource for FeedSource {
    fn name(&self) -> &str {
        "feed"
    }

    async fn fetch_games(&self) -> Result<Vec<Value>> {
        let raw = self.fetcher.get_json(&self.url).await?;
        let games = locate_games(&raw, self.pointer.as_deref())
            .with_context(|| format!("Unexpected feed shape from {}", self.url))?;
        info!("Feed returned {} game(s)", games.len());
        Ok(games)
    }
}

/// Find the game list inside a response body.
///
/// With a pointer, the value there must be an array. Without one, a bare
/// top-level array wins, then the first well-known location holding an array.
pub fn locate_games(raw: &Value, pointer: Option<&str>) -> Result<Vec<Value>> {
    if let Some(pointer) = pointer {
        return match raw.pointer(pointer) {
            Some(Value::Array(items)) => Ok(items.clone()),
            Some(_) => anyhow::bail!("value at '{}' is not a list", pointer),
            None => anyhow::bail!("nothing at '{}'", pointer),
        };
    }

    if let Value::Array(items) = raw {
        return Ok(items.clone());
    }
    GAME_LIST_POINTERS
        .iter()
        .find_map(|p| raw.pointer(p).and_then(Value::as_array))
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("no game list found (tried {:?})", GAME_LIST_POINTERS))
}
