//! Rating adjustments.
//!
//! Two independent terms are added to a movie's base rating: a penalty that
//! grows with how far its vote count trails the most-voted movie of the batch,
//! and a bonus stepped by its Oscar wins.

use cinerank_core::MovieRecord;

/// Vote-count gap that costs one penalty step.
pub const RATINGS_PER_STEP: u64 = 100_000;

/// Highest vote count in the batch, `None` for an empty batch.
#[must_use]
pub fn max_number_of_ratings(records: &[MovieRecord]) -> Option<u64> {
    records.iter().map(|record| record.number_of_ratings).max()
}

/// `-floor((max_ratings - number_of_ratings) / 100_000) * 0.1`.
///
/// The movie holding the batch maximum gets exactly 0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn review_volume_adjustment(record: &MovieRecord, max_ratings: u64) -> f64 {
    let gap = i128::from(max_ratings) - i128::from(record.number_of_ratings);
    let steps = gap.div_euclid(i128::from(RATINGS_PER_STEP));
    (-steps) as f64 / 10.0
}

/// Bonus for Oscar wins, in half-open buckets:
/// `[0,1)` 0, `[1,3)` 0.3, `[3,6)` 0.5, `[6,11)` 1.0, `[11,∞)` 1.5.
#[must_use]
pub fn oscar_bonus(record: &MovieRecord) -> f64 {
    match record.number_of_oscars {
        0 => 0.0,
        1..=2 => 0.3,
        3..=5 => 0.5,
        6..=10 => 1.0,
        _ => 1.5,
    }
}

/// Base rating plus both adjustments.
#[must_use]
pub fn adjusted_rating(record: &MovieRecord, max_ratings: u64) -> f64 {
    record.rating + review_volume_adjustment(record, max_ratings) + oscar_bonus(record)
}

/// Review-volume adjustment for every record, against the batch maximum.
#[must_use]
pub fn review_volume_adjustments(records: &[MovieRecord]) -> Vec<f64> {
    let Some(max_ratings) = max_number_of_ratings(records) else {
        return Vec::new();
    };
    records
        .iter()
        .map(|record| review_volume_adjustment(record, max_ratings))
        .collect()
}

/// Oscar bonus for every record.
#[must_use]
pub fn oscar_bonuses(records: &[MovieRecord]) -> Vec<f64> {
    records.iter().map(oscar_bonus).collect()
}
