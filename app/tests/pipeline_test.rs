//! Integration tests for the collection pipeline.

use async_trait::async_trait;
use cinerank_app::{write_movies, Pipeline};
use cinerank_core::{AppConfig, CinerankError};
use cinerank_scanner::{PageFetcher, ScrapeError};
use std::collections::HashMap;
use std::sync::Arc;
use tempfile::TempDir;

const LISTING_URL: &str = "https://ranking.test/chart/top/";

/// Serves a fixed set of pages; anything else is unreachable.
struct StaticSite {
    pages: HashMap<String, String>,
}

#[async_trait]
impl PageFetcher for StaticSite {
    async fn fetch(&self, url: &str) -> cinerank_scanner::Result<String> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| ScrapeError::Fetch {
                url: url.to_string(),
                reason: "connection refused".to_string(),
            })
    }
}

struct Movie {
    id: &'static str,
    title: &'static str,
    rating: f64,
    votes: u64,
    oscars: Option<usize>,
}

fn catalogue() -> Vec<Movie> {
    vec![
        Movie {
            id: "tt0000001",
            title: "Movie 1",
            rating: 9.6,
            votes: 2_456_123,
            oscars: None,
        },
        Movie {
            id: "tt0000002",
            title: "Movie 2",
            rating: 9.4,
            votes: 1_258_369,
            oscars: Some(2),
        },
        Movie {
            id: "tt0000003",
            title: "Movie 3",
            rating: 7.4,
            votes: 456_123,
            oscars: Some(4),
        },
        Movie {
            id: "tt0000004",
            title: "Movie 4",
            rating: 7.0,
            votes: 300_000,
            oscars: Some(0),
        },
    ]
}

fn site(movies: &[Movie]) -> Arc<StaticSite> {
    let rows: String = movies
        .iter()
        .enumerate()
        .map(|(i, m)| {
            format!(
                r#"<tr>
                    <td class="posterColumn">
                        <span name="rk" data-value="{rank}"></span>
                        <span name="ir" data-value="{rating}"></span>
                        <span name="nv" data-value="{votes}"></span>
                    </td>
                    <td class="titleColumn"><a href="/title/{id}/">{title}</a></td>
                </tr>"#,
                rank = i + 1,
                rating = m.rating,
                votes = m.votes,
                id = m.id,
                title = m.title,
            )
        })
        .collect();

    let mut pages = HashMap::new();
    pages.insert(
        LISTING_URL.to_string(),
        format!(r#"<table class="chart full-width"><tbody>{rows}</tbody></table>"#),
    );

    for movie in movies {
        let body = match movie.oscars {
            None => "<p>No awards.</p>".to_string(),
            Some(wins) => {
                let rows: String = (0..wins)
                    .map(|_| "<tr><td>Winner  Oscar</td><td>Best Picture</td></tr>")
                    .collect();
                format!("<table>{rows}<tr><td>Winner  BAFTA Film Award</td></tr></table>")
            }
        };
        pages.insert(
            format!("https://ranking.test/title/{}/awards/", movie.id),
            body,
        );
    }

    Arc::new(StaticSite { pages })
}

fn config(top_number: u32, output: &std::path::Path) -> AppConfig {
    let mut config = AppConfig::default();
    config.scraping.top_number = top_number;
    config.scraping.listing_url = LISTING_URL.to_string();
    config.scraping.award_url_template = "https://ranking.test/title/{id}/awards/".to_string();
    config.output.path = output.to_path_buf();
    config
}

#[tokio::test]
async fn test_pipeline_ranks_and_writes_top_three() {
    let tmp = TempDir::new().expect("create temp dir");
    let output = tmp.path().join("movies.json");
    let config = config(3, &output);

    let pipeline = Pipeline::new(&config, site(&catalogue())).expect("build pipeline");
    let movies = pipeline.run().await.expect("run pipeline");

    let titles: Vec<&str> = movies.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["Movie 1", "Movie 2", "Movie 3"]);

    let oscars: Vec<u32> = movies.iter().map(|m| m.number_of_oscars).collect();
    assert_eq!(oscars, vec![0, 2, 4]);

    let expected = [9.6, 8.6, 5.9];
    for (movie, expected) in movies.iter().zip(expected) {
        assert!((movie.adjusted_rating - expected).abs() < 1e-9);
    }

    write_movies(&config.output.path, &movies, config.output.pretty).expect("write output");
    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).expect("read output"))
            .expect("valid JSON");
    assert_eq!(written.as_array().map(Vec::len), Some(3));
    assert_eq!(written[1]["title"], "Movie 2");
    assert_eq!(written[1]["number_of_oscars"], 2);
}

#[tokio::test]
async fn test_reordering_by_adjusted_rating() {
    let tmp = TempDir::new().expect("create temp dir");
    let mut movies = catalogue();
    // Highly rated but thinly voted: the penalty drops it below Movie 2.
    movies[0].votes = 150_000;
    movies[1].votes = 2_900_000;

    let pipeline =
        Pipeline::new(&config(2, &tmp.path().join("m.json")), site(&movies)).expect("build pipeline");
    let ranked = pipeline.run().await.expect("run pipeline");

    let titles: Vec<&str> = ranked.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["Movie 2", "Movie 1"]);
}

#[tokio::test]
async fn test_schema_violation_aborts_run() {
    let tmp = TempDir::new().expect("create temp dir");
    let mut movies = catalogue();
    movies[2].votes = 50_000;

    let pipeline =
        Pipeline::new(&config(3, &tmp.path().join("m.json")), site(&movies)).expect("build pipeline");
    let err = pipeline.run().await.expect_err("too few ratings");

    assert!(matches!(err, CinerankError::Validation(_)));
    assert!(err.to_string().contains("Movie 3"));
}

#[tokio::test]
async fn test_duplicate_titles_abort_run() {
    let tmp = TempDir::new().expect("create temp dir");
    let mut movies = catalogue();
    movies[1].title = "Movie 1";

    let pipeline =
        Pipeline::new(&config(3, &tmp.path().join("m.json")), site(&movies)).expect("build pipeline");
    assert!(matches!(
        pipeline.run().await,
        Err(CinerankError::Validation(_))
    ));
}

#[tokio::test]
async fn test_unreachable_listing_is_fetch_error() {
    let tmp = TempDir::new().expect("create temp dir");
    let empty = Arc::new(StaticSite {
        pages: HashMap::new(),
    });

    let pipeline =
        Pipeline::new(&config(3, &tmp.path().join("m.json")), empty).expect("build pipeline");
    assert!(matches!(pipeline.run().await, Err(CinerankError::Fetch(_))));
}

#[tokio::test]
async fn test_listing_without_table_is_parse_error() {
    let tmp = TempDir::new().expect("create temp dir");
    let mut pages = HashMap::new();
    pages.insert(LISTING_URL.to_string(), "<main>redesigned</main>".to_string());

    let pipeline = Pipeline::new(
        &config(3, &tmp.path().join("m.json")),
        Arc::new(StaticSite { pages }),
    )
    .expect("build pipeline");
    assert!(matches!(pipeline.run().await, Err(CinerankError::Parse(_))));
}

#[test]
fn test_zero_top_number_is_rejected() {
    let tmp = TempDir::new().expect("create temp dir");
    let result = Pipeline::new(&config(0, &tmp.path().join("m.json")), site(&catalogue()));
    assert!(matches!(result, Err(CinerankError::Config(_))));
}

#[test]
fn test_invalid_selector_is_config_error() {
    let tmp = TempDir::new().expect("create temp dir");
    let mut config = config(3, &tmp.path().join("m.json"));
    config.scraping.selectors.rows = "table..chart".to_string();

    let result = Pipeline::new(&config, site(&catalogue()));
    assert!(matches!(result, Err(CinerankError::Config(_))));
}
