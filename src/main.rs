use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;

mod config;
mod dashboard;
mod edges;
mod models;
mod normalize;
mod output;
mod pipeline;
mod sources;

use config::Config;
use dashboard::AppState;
use pipeline::{run_once, RunOptions};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    run(&config).await
}

async fn run(config: &Config) -> Result<()> {
    let source = sources::from_config(config)?;
    info!("Using {} source", source.name());

    let options = RunOptions {
        max_games: config.max_games,
    };
    let doc = run_once(source.as_ref(), options, Utc::now()).await?;

    let output_path = PathBuf::from(&config.output_path);
    output::write_document(&output_path, &doc)?;
    info!(
        "✅ Wrote {} game(s) and {} betting edge(s) to {}",
        doc.games.len(),
        doc.betting_edges.len(),
        output_path.display()
    );

    if let Some(addr) = &config.serve_addr {
        let addr: SocketAddr = addr
            .parse()
            .with_context(|| format!("Invalid serve address '{}'", addr))?;
        let app = dashboard::router(
            AppState { output_path },
            config.static_dir.as_ref().map(PathBuf::from),
        );
        info!("Serving data on http://{}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;
    }

    Ok(())
}
