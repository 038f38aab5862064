//! Page retrieval.
//!
//! [`PageFetcher`] is the only place the pipeline touches the network. The
//! orchestrator holds it as a trait object so tests can serve pages from memory.

use crate::error::{Result, ScrapeError};
use async_trait::async_trait;
use cinerank_core::ScrapingConfig;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::Client;
use std::time::Duration;

/// Retrieves the body of a page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return its body.
    ///
    /// # Errors
    /// Returns [`ScrapeError::Fetch`] if the page cannot be retrieved or the
    /// server answers with a non-success status.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// [`PageFetcher`] over HTTP, sending the configured language preference on
/// every request.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build the HTTP client from scraping settings.
    ///
    /// # Errors
    /// Returns error if a header value is invalid or the client cannot be created.
    pub fn new(config: &ScrapingConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let language = HeaderValue::from_str(&config.accept_language).map_err(|e| {
            ScrapeError::Client(format!(
                "invalid Accept-Language '{}': {e}",
                config.accept_language
            ))
        })?;
        headers.insert(ACCEPT_LANGUAGE, language);

        let mut builder = Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.clone());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder
            .build()
            .map_err(|e| ScrapeError::Client(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ScrapeError::fetch(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::fetch(url, format!("HTTP {status}")));
        }

        response.text().await.map_err(|e| ScrapeError::fetch(url, e))
    }
}
