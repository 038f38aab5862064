use crate::error::{Result, ScrapeError};
use cinerank_core::config::AWARD_ID_PLACEHOLDER;
use cinerank_core::ImdbId;

pub fn build_award_url(template: &str, imdb_id: &ImdbId) -> Result<String> {
    if !template.contains(AWARD_ID_PLACEHOLDER) {
        return Err(ScrapeError::InvalidTemplate {
            template: template.to_string(),
        });
    }

    Ok(template.replace(AWARD_ID_PLACEHOLDER, imdb_id.as_str()))
}
