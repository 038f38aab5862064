use crate::adjust::{adjusted_rating, max_number_of_ratings};
use cinerank_core::{MovieRecord, RankedMovie};

/// Attach the adjusted rating to every record and order the batch by it,
/// highest first. Equal adjusted ratings keep chart rank order.
#[must_use]
pub fn rank_movies(records: &[MovieRecord]) -> Vec<RankedMovie> {
    let Some(max_ratings) = max_number_of_ratings(records) else {
        return Vec::new();
    };

    let mut ranked: Vec<(u32, RankedMovie)> = records
        .iter()
        .map(|record| {
            (
                record.rank,
                RankedMovie {
                    title: record.title.clone(),
                    rating: record.rating,
                    number_of_ratings: record.number_of_ratings,
                    number_of_oscars: record.number_of_oscars,
                    adjusted_rating: adjusted_rating(record, max_ratings),
                },
            )
        })
        .collect();

    ranked.sort_by(|(rank_a, a), (rank_b, b)| {
        b.adjusted_rating
            .total_cmp(&a.adjusted_rating)
            .then(rank_a.cmp(rank_b))
    });

    ranked.into_iter().map(|(_, movie)| movie).collect()
}
