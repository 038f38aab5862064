//! Record types shared across the pipeline.
//!
//! A movie moves through three shapes: the partial [`ListingEntry`] read from
//! the ranking page, the raw [`MovieRecord`] once its oscar count is known, and
//! the [`RankedMovie`] carrying the adjusted rating that ends up in the output.

use crate::error::CinerankError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Newtype for source title identifiers with validation.
///
/// Ids are `tt` followed by 7 or 8 digits, e.g. `tt0111161`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImdbId(String);

impl ImdbId {
    /// Create a new `ImdbId` from a string.
    ///
    /// # Errors
    /// Returns error if the id doesn't match the required format.
    pub fn new(id: impl Into<String>) -> Result<Self, CinerankError> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(id: &str) -> Result<(), CinerankError> {
        static IMDB_ID_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex =
            IMDB_ID_REGEX.get_or_init(|| Regex::new(r"^tt[0-9]{7,8}$").expect("valid regex"));

        if regex.is_match(id) {
            Ok(())
        } else {
            Err(CinerankError::Validation(format!(
                "invalid title id: expected 'tt' followed by 7-8 digits, got '{id}'"
            )))
        }
    }
}

impl fmt::Display for ImdbId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One row of the ranking page, before award enrichment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingEntry {
    /// Display title
    pub title: String,
    /// Source id taken from the title link
    pub imdb_id: ImdbId,
    /// Position in the chart (1-based)
    pub rank: u32,
    /// Base rating on a 0-10 scale
    pub rating: f64,
    /// Number of votes behind the rating
    pub number_of_ratings: u64,
}

impl ListingEntry {
    /// Complete the entry with its oscar count.
    #[must_use]
    pub fn into_record(self, number_of_oscars: u32) -> MovieRecord {
        MovieRecord {
            title: self.title,
            rank: self.rank,
            rating: self.rating,
            number_of_ratings: self.number_of_ratings,
            number_of_oscars,
        }
    }
}

/// A fully populated raw record, validated before adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    /// Display title, unique within a batch
    pub title: String,
    /// Chart position; only bounds extraction and orders ties
    #[serde(skip_serializing, default)]
    pub rank: u32,
    /// Base rating on a 0-10 scale
    pub rating: f64,
    /// Number of votes behind the rating
    pub number_of_ratings: u64,
    /// Oscar wins, 0 when the award page has no table
    pub number_of_oscars: u32,
}

/// A record extended with its adjusted rating. This is the output row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RankedMovie {
    /// Display title
    pub title: String,
    /// Base rating on a 0-10 scale
    pub rating: f64,
    /// Number of votes behind the rating
    pub number_of_ratings: u64,
    /// Oscar wins
    pub number_of_oscars: u32,
    /// Rating plus review-volume penalty plus oscar bonus
    pub adjusted_rating: f64,
}
