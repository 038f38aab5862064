use cinerank_core::{CinerankError, ConfigError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("unexpected layout on {page}: {reason}")]
    Parse { page: String, reason: String },

    #[error("invalid award URL template '{template}': missing {{id}} placeholder")]
    InvalidTemplate { template: String },

    #[error("invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("HTTP client error: {0}")]
    Client(String),
}

impl ScrapeError {
    pub(crate) fn parse(page: &str, reason: impl Into<String>) -> Self {
        Self::Parse {
            page: page.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn fetch(url: &str, reason: impl std::fmt::Display) -> Self {
        Self::Fetch {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<ScrapeError> for CinerankError {
    fn from(err: ScrapeError) -> Self {
        match err {
            ScrapeError::Fetch { .. } | ScrapeError::Client(_) => Self::Fetch(err.to_string()),
            ScrapeError::Parse { .. } => Self::Parse(err.to_string()),
            ScrapeError::InvalidTemplate { template } => Self::Config(ConfigError::InvalidValue {
                field: "scraping.award_url_template".to_string(),
                reason: format!("'{template}' has no {{id}} placeholder"),
            }),
            ScrapeError::InvalidSelector { .. } => Self::Config(ConfigError::InvalidValue {
                field: "scraping.selectors".to_string(),
                reason: err.to_string(),
            }),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
