use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::info;

use crate::edges::calculate_edges;
use crate::models::OutputDocument;
use crate::normalize::Normalizer;
use crate::sources::GameSource;

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub max_games: Option<usize>,
}

/// One full fetch → normalize → edges pass.
///
/// Source errors abort the run; malformed records are skipped by the
/// normalizer. Nothing is written here, so a failed run leaves the previous
/// output untouched.
pub async fn run_once(
    source: &dyn GameSource,
    options: RunOptions,
    now: DateTime<Utc>,
) -> Result<OutputDocument> {
    let raw_games = source
        .fetch_games()
        .await
        .with_context(|| format!("Source '{}' failed", source.name()))?;
    info!("Fetched {} raw game(s) from {}", raw_games.len(), source.name());

    let mut games = Normalizer::new(now.date_naive()).normalize_batch(&raw_games);
    if let Some(limit) = options.max_games {
        games.truncate(limit);
    }

    let edges = calculate_edges(&games);
    info!("{} game(s), {} betting edge(s)", games.len(), edges.len());

    Ok(OutputDocument::new(now, games, edges))
}
