//! The collection pipeline: scrape, validate, adjust, sort, validate.

use cinerank_core::{AppConfig, RankedMovie, Result};
use cinerank_ranking::{rank_movies, MovieSchema};
use cinerank_scanner::{PageFetcher, ScrapeOrchestrator};
use std::sync::Arc;
use tracing::info;

/// One configured run over the ranking source.
pub struct Pipeline {
    orchestrator: ScrapeOrchestrator,
    schema: MovieSchema,
    top_number: u32,
}

impl Pipeline {
    /// Build the pipeline from configuration and a page transport.
    pub fn new(config: &AppConfig, fetcher: Arc<dyn PageFetcher>) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            orchestrator: ScrapeOrchestrator::new(fetcher, &config.scraping)?,
            schema: MovieSchema::new(config.schema.clone()),
            top_number: config.scraping.top_number,
        })
    }

    /// Produce the validated batch sorted by adjusted rating, highest first.
    ///
    /// Any fetch, layout or schema failure aborts the run.
    pub async fn run(&self) -> Result<Vec<RankedMovie>> {
        let records = self.orchestrator.collect(self.top_number).await?;
        self.schema.validate_raw(&records)?;

        let ranked = rank_movies(&records);
        self.schema.validate_adjusted(&ranked)?;

        info!("Ranked {} movies", ranked.len());
        for (position, movie) in ranked.iter().enumerate() {
            info!(
                "{:>3}. {} ({:.2}, base {})",
                position + 1,
                movie.title,
                movie.adjusted_rating,
                movie.rating
            );
        }

        Ok(ranked)
    }
}
