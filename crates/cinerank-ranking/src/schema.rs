//! Strict schema checks for movie batches.
//!
//! [`MovieSchema`] owns its bounds and checks a whole batch at once: every row
//! must carry a non-empty unique title and finite values within range. Nothing
//! is coerced or dropped; the first violation is returned.

use crate::error::{Result, ValidationError};
use cinerank_core::{MovieRecord, RankedMovie, SchemaRules};
use std::collections::HashMap;

/// Columns shared by the raw and adjusted rows.
pub trait SchemaRow {
    fn title(&self) -> &str;
    fn rating(&self) -> f64;
    fn number_of_ratings(&self) -> u64;
    fn number_of_oscars(&self) -> u32;
}

impl SchemaRow for MovieRecord {
    fn title(&self) -> &str {
        &self.title
    }
    fn rating(&self) -> f64 {
        self.rating
    }
    fn number_of_ratings(&self) -> u64 {
        self.number_of_ratings
    }
    fn number_of_oscars(&self) -> u32 {
        self.number_of_oscars
    }
}

impl SchemaRow for RankedMovie {
    fn title(&self) -> &str {
        &self.title
    }
    fn rating(&self) -> f64 {
        self.rating
    }
    fn number_of_ratings(&self) -> u64 {
        self.number_of_ratings
    }
    fn number_of_oscars(&self) -> u32 {
        self.number_of_oscars
    }
}

#[derive(Debug, Clone, Default)]
pub struct MovieSchema {
    rules: SchemaRules,
}

impl MovieSchema {
    #[must_use]
    pub fn new(rules: SchemaRules) -> Self {
        Self { rules }
    }

    #[must_use]
    pub fn rules(&self) -> &SchemaRules {
        &self.rules
    }

    /// Check a batch before adjustment.
    pub fn validate_raw(&self, records: &[MovieRecord]) -> Result<()> {
        self.check_rows(records)?;
        tracing::debug!("Raw batch of {} records passed validation", records.len());
        Ok(())
    }

    /// Check a batch after adjustment: the raw contract plus the adjusted rating bound.
    pub fn validate_adjusted(&self, movies: &[RankedMovie]) -> Result<()> {
        self.check_rows(movies)?;

        for (row, movie) in movies.iter().enumerate() {
            check_float(
                row,
                &movie.title,
                "adjusted_rating",
                movie.adjusted_rating,
                f64::NEG_INFINITY,
                self.rules.max_adjusted_rating,
            )?;
        }

        tracing::debug!("Adjusted batch of {} movies passed validation", movies.len());
        Ok(())
    }

    #[allow(clippy::cast_precision_loss)]
    fn check_rows<R: SchemaRow>(&self, rows: &[R]) -> Result<()> {
        let mut seen: HashMap<&str, usize> = HashMap::with_capacity(rows.len());

        for (row, item) in rows.iter().enumerate() {
            let title = item.title();
            if title.is_empty() {
                return Err(ValidationError::EmptyTitle { row });
            }
            if let Some(&first) = seen.get(title) {
                return Err(ValidationError::DuplicateTitle {
                    row,
                    first,
                    title: title.to_string(),
                });
            }
            seen.insert(title, row);

            check_float(row, title, "rating", item.rating(), 0.0, self.rules.max_rating)?;

            let ratings = item.number_of_ratings();
            if ratings < self.rules.min_number_of_ratings
                || ratings > self.rules.max_number_of_ratings
            {
                return Err(ValidationError::OutOfRange {
                    row,
                    title: title.to_string(),
                    field: "number_of_ratings",
                    value: ratings as f64,
                    min: self.rules.min_number_of_ratings as f64,
                    max: self.rules.max_number_of_ratings as f64,
                });
            }

            let oscars = item.number_of_oscars();
            if oscars > self.rules.max_number_of_oscars {
                return Err(ValidationError::OutOfRange {
                    row,
                    title: title.to_string(),
                    field: "number_of_oscars",
                    value: f64::from(oscars),
                    min: 0.0,
                    max: f64::from(self.rules.max_number_of_oscars),
                });
            }
        }

        Ok(())
    }
}

/// Non-finite values count as missing.
fn check_float(
    row: usize,
    title: &str,
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<()> {
    if !value.is_finite() {
        return Err(ValidationError::Missing {
            row,
            title: title.to_string(),
            field,
        });
    }
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            row,
            title: title.to_string(),
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}
