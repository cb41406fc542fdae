pub mod feed;
pub mod html;
pub mod http;
pub mod provider;
pub mod weekly;

pub use feed::FeedSource;
pub use html::HtmlScrapeSource;
pub use http::HttpFetcher;
pub use provider::GameSource;
pub use weekly::WeeklyScheduleSource;

use anyhow::{Context, Result};
use std::time::Duration;
use url::Url;

use crate::config::{Config, SourceKind};

fn parse_url(raw: &str, what: &str) -> Result<Url> {
    Url::parse(raw).with_context(|| format!("Invalid {} '{}'", what, raw))
}

fn required_url(raw: Option<&str>, what: &str) -> Result<Url> {
    let raw = raw.with_context(|| format!("Missing {}", what))?;
    parse_url(raw, what)
}

/// Build the one source selected by the configuration.
pub fn from_config(config: &Config) -> Result<Box<dyn GameSource>> {
    let fetcher = HttpFetcher::new(&config.user_agent, Duration::from_secs(config.timeout_secs))?;

    let source: Box<dyn GameSource> = match config.source {
        SourceKind::Html => Box::new(HtmlScrapeSource::new(
            fetcher,
            parse_url(&config.page_url, "page URL")?,
        )?),
        SourceKind::Weekly => Box::new(WeeklyScheduleSource::new(
            fetcher,
            config
                .weeks_url
                .as_deref()
                .map(|u| parse_url(u, "week list URL"))
                .transpose()?,
            required_url(config.weekly_games_url.as_deref(), "weekly games URL")?,
            config.weeks.clone(),
        )),
        SourceKind::Feed => Box::new(FeedSource::new(
            fetcher,
            required_url(config.feed_url.as_deref(), "feed URL")?,
            config.games_pointer.clone().filter(|p| !p.is_empty()),
        )),
    };
    Ok(source)
}

/// Serve `app` on an ephemeral local port and return its base URL.
#[cfg(test)]
pub(crate) async fn spawn_test_server(app: axum::Router) -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    Url::parse(&format!("http://{}", addr)).unwrap()
}
