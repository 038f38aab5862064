//! Cinerank Ranking - Rating adjustment, schema validation and ordering.
//!
//! The raw batch collected by the scanner is checked against a [`MovieSchema`],
//! each movie's rating is adjusted for review volume and Oscar wins, the batch
//! is sorted by the adjusted rating, and the result is checked again.
//!
//! # Example
//!
//! ```rust
//! use cinerank_core::MovieRecord;
//! use cinerank_ranking::{rank_movies, MovieSchema};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let records = vec![MovieRecord {
//!     title: "Movie 1".to_string(),
//!     rank: 1,
//!     rating: 9.6,
//!     number_of_ratings: 2_456_123,
//!     number_of_oscars: 0,
//! }];
//!
//! let schema = MovieSchema::default();
//! schema.validate_raw(&records)?;
//! let ranked = rank_movies(&records);
//! schema.validate_adjusted(&ranked)?;
//! assert!((ranked[0].adjusted_rating - 9.6).abs() < 1e-9);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod adjust;
#[allow(missing_docs)]
pub mod aggregate;
#[allow(missing_docs)]
pub mod error;
#[allow(missing_docs)]
pub mod schema;

// Re-export commonly used types
pub use adjust::{
    adjusted_rating, max_number_of_ratings, oscar_bonus, oscar_bonuses, review_volume_adjustment,
    review_volume_adjustments,
};
pub use aggregate::rank_movies;
pub use error::{Result, ValidationError};
pub use schema::{MovieSchema, SchemaRow};
