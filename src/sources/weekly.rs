use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, warn};
use url::Url;

use super::feed::locate_games;
use super::http::HttpFetcher;
use super::provider::GameSource;
use crate::normalize::fields::{u32_field, value_as_u32};

/// Weekly-schedule API: a week list endpoint plus a games endpoint taking
/// `?week=N`.
///
/// Weeks are fetched one after another. A failing week is logged and
/// skipped; only a failure to obtain the week list aborts the run.
pub struct WeeklyScheduleSource {
    fetcher: HttpFetcher,
    weeks_url: Option<Url>,
    games_url: Url,
    /// Explicit weeks; when non-empty the week list endpoint is not called.
    weeks: Vec<u32>,
}

impl WeeklyScheduleSource {
    pub fn new(
        fetcher: HttpFetcher,
        weeks_url: Option<Url>,
        games_url: Url,
        weeks: Vec<u32>,
    ) -> Self {
        WeeklyScheduleSource {
            fetcher,
            weeks_url,
            games_url,
            weeks,
        }
    }

    async fn week_numbers(&self) -> Result<Vec<u32>> {
        if !self.weeks.is_empty() {
            return Ok(self.weeks.clone());
        }
        let weeks_url = self
            .weeks_url
            .as_ref()
            .context("No week list URL and no explicit weeks configured")?;
        let raw = self
            .fetcher
            .get_json(weeks_url)
            .await
            .context("Failed to fetch week list")?;
        Ok(parse_week_numbers(&raw))
    }

    async fn fetch_week(&self, week: u32) -> Result<Vec<Value>> {
        let raw = self.fetcher.get_json(&week_url(&self.games_url, week)).await?;
        locate_games(&raw, None)
    }
}

#[async_trait]
impl GameSource for WeeklyScheduleSource {
    fn name(&self) -> &str {
        "weekly"
    }

    async fn fetch_games(&self) -> Result<Vec<Value>> {
        let weeks = self.week_numbers().await?;
        info!("Fetching games for {} week(s): {:?}", weeks.len(), weeks);

        let mut games = Vec::new();
        for week in weeks {
            match self.fetch_week(week).await {
                Ok(found) => {
                    info!("Week {}: {} game(s)", week, found.len());
                    games.extend(found);
                }
                Err(e) => warn!("Week {} skipped: {:#}", week, e),
            }
        }
        Ok(games)
    }
}

pub fn week_url(games_url: &Url, week: u32) -> Url {
    let mut url = games_url.clone();
    url.query_pairs_mut().append_pair("week", &week.to_string());
    url
}

/// Week numbers from a week list response, de-duplicated in order.
///
/// Descriptors may be bare numbers or objects carrying `week`,
/// `weekNumber` or `number`; the list may sit at the top level or under
/// `weeks`, `data` or `data.weeks`.
pub fn parse_week_numbers(raw: &Value) -> Vec<u32> {
    let list = [
        Some(raw),
        raw.get("weeks"),
        raw.get("data"),
        raw.pointer("/data/weeks"),
    ]
    .into_iter()
    .flatten()
    .find_map(Value::as_array);

    let mut weeks: Vec<u32> = Vec::new();
    for descriptor in list.into_iter().flatten() {
        let week = match descriptor {
            Value::Object(obj) => u32_field(obj, &["week", "weekNumber", "number"]),
            other => value_as_u32(other),
        };
        match week {
            Some(w) if !weeks.contains(&w) => weeks.push(w),
            Some(_) => {}
            None => warn!("Ignoring unrecognised week descriptor: {}", descriptor),
        }
    }
    weeks
}
