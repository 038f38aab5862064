//! Cinerank application shell.
//!
//! This is the thin shell that wires configuration, logging and output around
//! the pipeline. Scraping and ranking logic lives in the `crates/` directory.

pub mod output;
pub mod pipeline;

use anyhow::Context;
use cinerank_core::AppConfig;
use cinerank_scanner::HttpFetcher;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

pub use output::write_movies;
pub use pipeline::Pipeline;

/// Initialize tracing subscriber for logging
pub fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,cinerank=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}

/// Run one full collection: load config, scrape, rank, validate, write.
///
/// Nothing is written unless every stage succeeds.
pub async fn run(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    info!("Starting cinerank v{}", env!("CARGO_PKG_VERSION"));

    let config =
        AppConfig::load_with_env(config_path.as_deref()).context("failed to load configuration")?;

    let fetcher = Arc::new(
        HttpFetcher::new(&config.scraping).context("failed to set up HTTP client")?,
    );
    let pipeline = Pipeline::new(&config, fetcher)?;

    let movies = pipeline.run().await?;
    write_movies(&config.output.path, &movies, config.output.pretty)?;

    info!(
        "Wrote {} ranked movies to {}",
        movies.len(),
        config.output.path.display()
    );
    Ok(())
}
