//! Cinerank Scanner - Ranking listing extraction and award enrichment.
//!
//! This crate turns the public ranking page into the raw batch of movie
//! records: it reads the ranked rows, stops at the requested rank, and fills in
//! each movie's Oscar count from its award page.
//!
//! # Features
//!
//! - Typed page traversal where every missing element is an explicit parse error
//! - Configurable listing selectors for when the page layout drifts
//! - Award pages without a table degrade to zero Oscars instead of failing
//! - Optional bounded concurrency for award lookups with rank order preserved
//!
//! # Example
//!
//! ```rust,ignore
//! use cinerank_scanner::{HttpFetcher, ScrapeOrchestrator};
//! use std::sync::Arc;
//!
//! let fetcher = Arc::new(HttpFetcher::new(&config.scraping)?);
//! let orchestrator = ScrapeOrchestrator::new(fetcher, &config.scraping)?;
//!
//! let records = orchestrator.collect(config.scraping.top_number).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

#[allow(missing_docs)]
pub mod awards;
#[allow(missing_docs)]
pub mod error;
pub mod fetcher;
#[allow(missing_docs)]
pub mod listing;
pub mod orchestrator;
#[allow(missing_docs)]
pub mod page;
#[allow(missing_docs)]
pub mod url_builder;

// Re-export commonly used types
pub use awards::{AwardLookup, AwardParser, OSCAR_WIN_MARKER};
pub use error::{Result, ScrapeError};
pub use fetcher::{HttpFetcher, PageFetcher};
pub use listing::ListingParser;
pub use orchestrator::ScrapeOrchestrator;
pub use page::{Node, Page, Query};
pub use url_builder::build_award_url;
