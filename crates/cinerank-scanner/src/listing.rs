use crate::error::{Result, ScrapeError};
use crate::page::{Node, Page, Query};
use cinerank_core::{ImdbId, ListingEntry, ListingSelectors};

pub struct ListingParser {
    rows: Query,
    title_link: Query,
    rank: Query,
    rating: Query,
    votes: Query,
    value_attr: String,
}

impl ListingParser {
    pub fn new(selectors: &ListingSelectors) -> Result<Self> {
        Ok(Self {
            rows: Query::new(&selectors.rows)?,
            title_link: Query::new(&selectors.title_link)?,
            rank: Query::new(&selectors.rank)?,
            rating: Query::new(&selectors.rating)?,
            votes: Query::new(&selectors.votes)?,
            value_attr: selectors.value_attr.clone(),
        })
    }

    /// Extract entries in document order, stopping after the row whose rank
    /// reaches `top_number`.
    pub fn parse(&self, html: &str, top_number: u32) -> Result<Vec<ListingEntry>> {
        let page = Page::parse("ranking listing", html);
        let rows = page.select_rows(&self.rows)?;

        let mut entries = Vec::new();
        for row in rows {
            let entry = self.parse_row(&row)?;
            let rank = entry.rank;
            entries.push(entry);

            if rank >= top_number {
                return Ok(entries);
            }
        }

        tracing::warn!(
            "Listing ended after {} rows before reaching rank {}",
            entries.len(),
            top_number
        );
        Ok(entries)
    }

    fn parse_row(&self, row: &Node<'_>) -> Result<ListingEntry> {
        let link = row.find(&self.title_link)?;
        let href = link.attr("href")?;
        let imdb_id = imdb_id_from_href(href)
            .and_then(|id| ImdbId::new(id).ok())
            .ok_or_else(|| {
                ScrapeError::parse(
                    "ranking listing",
                    format!("title link '{href}' carries no title id"),
                )
            })?;

        Ok(ListingEntry {
            title: link.text().trim().to_string(),
            imdb_id,
            rank: row.find(&self.rank)?.attr_as(&self.value_attr)?,
            rating: row.find(&self.rating)?.attr_as(&self.value_attr)?,
            number_of_ratings: row.find(&self.votes)?.attr_as(&self.value_attr)?,
        })
    }
}

/// The id is the second-to-last path segment of the title link:
/// `/title/tt0111161/?ref_=chttp` yields `tt0111161`.
#[must_use]
pub fn imdb_id_from_href(href: &str) -> Option<&str> {
    let mut segments = href.rsplit('/');
    segments.next()?;
    segments.next().filter(|segment| !segment.is_empty())
}
