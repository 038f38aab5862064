//! Configuration management for cinerank.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides. The configuration is built once by the
//! binary and handed to each stage explicitly.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Placeholder substituted with the source id in award page URLs.
pub const AWARD_ID_PLACEHOLDER: &str = "{id}";

/// Main application configuration.
///
/// This is loaded from `~/.config/cinerank/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Listing and award page retrieval
    pub scraping: ScrapingConfig,
    /// Bounds enforced by the schema validator
    pub schema: SchemaRules,
    /// Output document settings
    pub output: OutputConfig,
}

impl AppConfig {
    /// Load configuration from the default location, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path, falling back to defaults if not found.
    pub fn load_from(config_path: &Path) -> ConfigResult<Self> {
        if config_path.exists() {
            tracing::debug!("Loading config from {}", config_path.display());
            let contents = fs::read_to_string(config_path)?;
            let config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                config_path.display()
            );
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides, then validate it.
    ///
    /// Supports the following environment variables:
    /// - `CINERANK_TOP_NUMBER`: Override the number of listing entries to collect
    /// - `CINERANK_MOVIES_PATH`: Override the output document path
    /// - `CINERANK_MAX_CONCURRENT_LOOKUPS`: Override the award lookup concurrency
    pub fn load_with_env(config_path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::load_from(path)?,
            None => Self::load()?,
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup (the process environment in production).
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("CINERANK_TOP_NUMBER") {
            self.scraping.top_number = parse_override("CINERANK_TOP_NUMBER", &val)?;
            tracing::debug!(
                "Override scraping.top_number from env: {}",
                self.scraping.top_number
            );
        }

        if let Some(val) = lookup("CINERANK_MOVIES_PATH") {
            self.output.path = PathBuf::from(val);
            tracing::debug!("Override output.path from env: {}", self.output.path.display());
        }

        if let Some(val) = lookup("CINERANK_MAX_CONCURRENT_LOOKUPS") {
            self.scraping.max_concurrent_lookups =
                parse_override("CINERANK_MAX_CONCURRENT_LOOKUPS", &val)?;
            tracing::debug!(
                "Override scraping.max_concurrent_lookups from env: {}",
                self.scraping.max_concurrent_lookups
            );
        }

        Ok(())
    }

    /// Check values that would make a run meaningless before any request is sent.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.scraping.top_number == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scraping.top_number".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        if self.scraping.max_concurrent_lookups == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scraping.max_concurrent_lookups".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        if !self
            .scraping
            .award_url_template
            .contains(AWARD_ID_PLACEHOLDER)
        {
            return Err(ConfigError::InvalidValue {
                field: "scraping.award_url_template".to_string(),
                reason: format!("must contain the {AWARD_ID_PLACEHOLDER} placeholder"),
            });
        }

        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/cinerank/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "cinerank", "cinerank").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

fn parse_override<T: std::str::FromStr>(key: &str, val: &str) -> ConfigResult<T>
where
    T::Err: std::fmt::Display,
{
    val.trim().parse().map_err(|e| ConfigError::InvalidValue {
        field: key.to_string(),
        reason: format!("'{val}': {e}"),
    })
}

/// Listing and award page retrieval settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapingConfig {
    /// Number of ranked entries to collect (inclusive rank bound)
    pub top_number: u32,
    /// Ranking page URL
    pub listing_url: String,
    /// Award page URL template, `{id}` is replaced with the source id
    pub award_url_template: String,
    /// `Accept-Language` header sent on every request
    pub accept_language: String,
    /// User agent string
    pub user_agent: String,
    /// Request timeout in seconds (unset = transport default)
    pub timeout_secs: Option<u64>,
    /// Award pages fetched at once (1 = strictly sequential)
    pub max_concurrent_lookups: usize,
    /// Where each listing field lives on the ranking page
    pub selectors: ListingSelectors,
}

impl Default for ScrapingConfig {
    fn default() -> Self {
        Self {
            top_number: 20,
            listing_url: "https://www.imdb.com/chart/top/".to_string(),
            award_url_template: "https://www.imdb.com/title/{id}/awards/".to_string(),
            accept_language: "en-US,en;q=0.5".to_string(),
            user_agent: concat!("cinerank/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: None,
            max_concurrent_lookups: 1,
            selectors: ListingSelectors::default(),
        }
    }
}

/// CSS selectors locating each field of a ranking page row.
///
/// Kept as data so a layout change on the ranking page is a config edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingSelectors {
    /// One element per ranked entry
    pub rows: String,
    /// Link inside a row; its text is the title, its `href` carries the id
    pub title_link: String,
    /// Element carrying the rank
    pub rank: String,
    /// Element carrying the base rating
    pub rating: String,
    /// Element carrying the vote count
    pub votes: String,
    /// Attribute holding the raw value on the rank/rating/votes elements
    pub value_attr: String,
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self {
            rows: "table.chart.full-width > tbody > tr".to_string(),
            title_link: "td.titleColumn a".to_string(),
            rank: r#"td.posterColumn span[name="rk"]"#.to_string(),
            rating: r#"td.posterColumn span[name="ir"]"#.to_string(),
            votes: r#"td.posterColumn span[name="nv"]"#.to_string(),
            value_attr: "data-value".to_string(),
        }
    }
}

/// Bounds enforced by the schema validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaRules {
    /// Upper bound for the base rating
    pub max_rating: f64,
    /// Lower bound for the vote count
    pub min_number_of_ratings: u64,
    /// Upper bound for the vote count
    pub max_number_of_ratings: u64,
    /// Upper bound for the oscar count
    pub max_number_of_oscars: u32,
    /// Upper bound for the adjusted rating
    pub max_adjusted_rating: f64,
}

impl Default for SchemaRules {
    fn default() -> Self {
        Self {
            max_rating: 10.0,
            min_number_of_ratings: 100_000,
            max_number_of_ratings: 3_000_000,
            max_number_of_oscars: 11,
            max_adjusted_rating: 11.5,
        }
    }
}

/// Output document settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Destination of the JSON document
    pub path: PathBuf,
    /// Pretty-print the JSON document
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("movies.json"),
            pretty: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.scraping.top_number, 20);
        assert_eq!(config.scraping.accept_language, "en-US,en;q=0.5");
        assert_eq!(config.scraping.max_concurrent_lookups, 1);
        assert!(config.scraping.timeout_secs.is_none());
        assert_eq!(config.schema.max_number_of_oscars, 11);
        assert_eq!(config.output.path, PathBuf::from("movies.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("[scraping]"));
        assert!(toml_str.contains("[schema]"));
        assert!(toml_str.contains("[output]"));
        assert!(toml_str.contains("[scraping.selectors]"));

        let parsed: AppConfig = toml::from_str(&toml_str).expect("parse serialized config");
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_config_load_from_file() {
        let tmp = TempDir::new().expect("create temp dir");
        let config_path = tmp.path().join("config.toml");
        fs::write(
            &config_path,
            r#"
[scraping]
top_number = 5

[output]
path = "/tmp/top5.json"
"#,
        )
        .expect("write config");

        let loaded = AppConfig::load_from(&config_path).expect("load config");
        assert_eq!(loaded.scraping.top_number, 5);
        assert_eq!(loaded.output.path, PathBuf::from("/tmp/top5.json"));
        assert_eq!(loaded.scraping.selectors, ListingSelectors::default());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let tmp = TempDir::new().expect("create temp dir");
        let config_path = tmp.path().join("config.toml");
        fs::write(&config_path, "[scraping\ntop_number = ").expect("write config");

        assert!(matches!(
            AppConfig::load_from(&config_path),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_listing_selectors_override() {
        let toml_str = r#"
[scraping.selectors]
rows = "table.chart > tbody > tr"
value_attr = "data-sort"
"#;

        let config: AppConfig = toml::from_str(toml_str).expect("parse selectors section");
        let selectors = &config.scraping.selectors;
        assert_eq!(selectors.rows, "table.chart > tbody > tr");
        assert_eq!(selectors.value_attr, "data-sort");
        // Unset selectors keep their defaults
        assert_eq!(selectors.title_link, "td.titleColumn a");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let tmp = TempDir::new().expect("create temp dir");
        let loaded =
            AppConfig::load_from(&tmp.path().join("absent.toml")).expect("load defaults");
        assert_eq!(loaded, AppConfig::default());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("CINERANK_TOP_NUMBER", "3"),
            ("CINERANK_MOVIES_PATH", "out/movies.json"),
            ("CINERANK_MAX_CONCURRENT_LOOKUPS", "4"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config
            .apply_env_overrides(|key| vars.get(key).map(|v| (*v).to_string()))
            .expect("apply overrides");

        assert_eq!(config.scraping.top_number, 3);
        assert_eq!(config.output.path, PathBuf::from("out/movies.json"));
        assert_eq!(config.scraping.max_concurrent_lookups, 4);
    }

    #[test]
    fn test_invalid_env_override_is_rejected() {
        let mut config = AppConfig::default();
        let err = config
            .apply_env_overrides(|key| (key == "CINERANK_TOP_NUMBER").then(|| "many".to_string()))
            .expect_err("non-numeric top number");

        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "CINERANK_TOP_NUMBER"));
        assert_eq!(config.scraping.top_number, 20);
    }

    #[test]
    fn test_validate_rejects_zero_top_number() {
        let mut config = AppConfig::default();
        config.scraping.top_number = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_template_without_placeholder() {
        let mut config = AppConfig::default();
        config.scraping.award_url_template = "https://www.imdb.com/awards/".to_string();
        let err = config.validate().expect_err("template without placeholder");
        assert!(err.to_string().contains("{id}"));
    }

    #[test]
    fn test_example_config_parses() {
        let example = include_str!("../../../cinerank.example.toml");
        let config: AppConfig = toml::from_str(example).expect("parse example config");
        assert_eq!(config.scraping.top_number, 20);
        assert_eq!(config.scraping.selectors, ListingSelectors::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[scraping]
top_number = 3

[output]
path = "top3.json"
"#;

        let config: AppConfig = toml::from_str(toml_str).expect("parse partial config");
        assert_eq!(config.scraping.top_number, 3);
        assert_eq!(config.output.path, PathBuf::from("top3.json"));
        // These should be defaults
        assert_eq!(config.scraping.listing_url, "https://www.imdb.com/chart/top/");
        assert!((config.schema.max_adjusted_rating - 11.5).abs() < f64::EPSILON);
    }
}
