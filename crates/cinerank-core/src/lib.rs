//! Cinerank Core - Foundation crate for the cinerank movie ranking pipeline.
//!
//! This crate provides the shared record types, error handling and
//! configuration management that the scanner, ranking and app crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths and env overrides
//! - [`types`] - Record types flowing through the pipeline (`ImdbId`, `ListingEntry`,
//!   `MovieRecord`, `RankedMovie`)
//!
//! # Example
//!
//! ```rust
//! use cinerank_core::AppConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! config.validate()?;
//! assert_eq!(config.scraping.top_number, 20);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, ListingSelectors, OutputConfig, SchemaRules, ScrapingConfig};
pub use error::{CinerankError, ConfigError, ConfigResult, Result};
pub use types::{ImdbId, ListingEntry, MovieRecord, RankedMovie};
