//! Scrape orchestrator for assembling the raw batch.
//!
//! This module provides the `ScrapeOrchestrator` which fetches the ranking
//! listing, truncates it, and enriches every entry with its Oscar count from
//! the entry's award page.

use crate::awards::{AwardLookup, AwardParser};
use crate::error::Result;
use crate::fetcher::PageFetcher;
use crate::listing::ListingParser;
use crate::url_builder::build_award_url;
use cinerank_core::{ImdbId, ListingEntry, MovieRecord, ScrapingConfig};
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;

/// Default number of award pages fetched at once.
const DEFAULT_MAX_CONCURRENT_LOOKUPS: usize = 1;

/// Orchestrates listing extraction and award enrichment.
pub struct ScrapeOrchestrator {
    /// Transport for all page requests
    fetcher: Arc<dyn PageFetcher>,
    /// Ranking page URL
    listing_url: String,
    /// Award page URL template
    award_url_template: String,
    listing_parser: ListingParser,
    award_parser: AwardParser,
    /// Maximum award pages in flight
    max_concurrent_lookups: usize,
}

impl ScrapeOrchestrator {
    /// Create a new orchestrator from scraping settings.
    ///
    /// # Errors
    /// Returns [`crate::ScrapeError::InvalidSelector`] if a configured listing
    /// selector is not valid CSS.
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: &ScrapingConfig) -> Result<Self> {
        Ok(Self {
            fetcher,
            listing_url: config.listing_url.clone(),
            award_url_template: config.award_url_template.clone(),
            listing_parser: ListingParser::new(&config.selectors)?,
            award_parser: AwardParser::new()?,
            max_concurrent_lookups: DEFAULT_MAX_CONCURRENT_LOOKUPS,
        }
        .with_max_concurrent_lookups(config.max_concurrent_lookups))
    }

    /// Set the maximum number of award pages fetched at once (at least 1).
    #[must_use]
    pub fn with_max_concurrent_lookups(mut self, max: usize) -> Self {
        self.max_concurrent_lookups = max.max(1);
        self
    }

    /// Fetch the ranking page and extract the first `top_number` ranked entries.
    pub async fn fetch_listing(&self, top_number: u32) -> Result<Vec<ListingEntry>> {
        tracing::info!("Fetching ranking listing from {}", self.listing_url);
        let html = self.fetcher.fetch(&self.listing_url).await?;

        let entries = self.listing_parser.parse(&html, top_number)?;
        tracing::info!("Extracted {} listing entries", entries.len());
        Ok(entries)
    }

    /// Fetch one award page and count its Oscar wins.
    pub async fn lookup_oscars(&self, imdb_id: &ImdbId) -> Result<AwardLookup> {
        let url = build_award_url(&self.award_url_template, imdb_id)?;
        let html = self.fetcher.fetch(&url).await?;
        Ok(self.award_parser.parse(&html))
    }

    /// Build the raw batch: listing entries in rank order, each with its Oscar count.
    ///
    /// Award pages are fetched up to `max_concurrent_lookups` at a time. Records
    /// are placed by listing position, so the batch order never depends on which
    /// request finished first. The first failure aborts the collection.
    pub async fn collect(&self, top_number: u32) -> Result<Vec<MovieRecord>> {
        let entries = self.fetch_listing(top_number).await?;

        let mut slots: Vec<Option<MovieRecord>> = vec![None; entries.len()];
        let mut pending = FuturesUnordered::new();

        for (position, entry) in entries.into_iter().enumerate() {
            pending.push(self.enrich(position, entry));

            // Respect concurrency limit
            while pending.len() >= self.max_concurrent_lookups {
                if let Some(result) = pending.next().await {
                    let (position, record) = result?;
                    slots[position] = Some(record);
                }
            }
        }

        // Collect remaining results
        while let Some(result) = pending.next().await {
            let (position, record) = result?;
            slots[position] = Some(record);
        }

        Ok(slots.into_iter().flatten().collect())
    }

    async fn enrich(&self, position: usize, entry: ListingEntry) -> Result<(usize, MovieRecord)> {
        let lookup = self.lookup_oscars(&entry.imdb_id).await?;
        if lookup == AwardLookup::NotFound {
            tracing::debug!(
                "No award table for {} ({}), counting 0 oscars",
                entry.title,
                entry.imdb_id
            );
        }

        let record = entry.into_record(lookup.oscar_count());
        tracing::debug!(
            "{}: rating {}, {} ratings, {} oscars",
            record.title,
            record.rating,
            record.number_of_ratings,
            record.number_of_oscars
        );
        Ok((position, record))
    }
}

