//! Oscar win counting on award pages.

use crate::error::Result;
use crate::page::{Node, Page, Query};
use serde::{Deserialize, Serialize};

/// First-cell text marking an Oscar win. The double space is what the award
/// page yields and is matched verbatim.
pub const OSCAR_WIN_MARKER: &str = "Winner  Oscar";

/// Outcome of reading one award page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AwardLookup {
    /// The page has award tables; holds the number of Oscar wins found in them
    Found(u32),
    /// The page has no table with at least one row
    NotFound,
}

impl AwardLookup {
    /// Oscar count for the record; a page without tables counts as zero.
    #[must_use]
    pub fn oscar_count(self) -> u32 {
        match self {
            Self::Found(count) => count,
            Self::NotFound => 0,
        }
    }
}

/// Upper bound on `colspan`, as in the HTML table model.
const MAX_COLSPAN: usize = 1000;

pub struct AwardParser {
    tables: Query,
    rows: Query,
}

impl AwardParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            tables: Query::new("table")?,
            rows: Query::new("tr")?,
        })
    }

    /// Count grid rows, across every table on the page, whose first column
    /// reads exactly [`OSCAR_WIN_MARKER`] once surrounding whitespace is trimmed.
    ///
    /// A first-column cell spanning several rows counts once per row it spans.
    #[must_use]
    pub fn parse(&self, html: &str) -> AwardLookup {
        let page = Page::parse("award page", html);
        let tables = page.select_all(&self.tables);

        let mut has_rows = false;
        let mut wins: u32 = 0;
        for table in &tables {
            // Rows of a nested table belong to that table.
            let rows: Vec<Node<'_>> = table
                .find_all(&self.rows)
                .into_iter()
                .filter(|row| row_belongs_to(row, table))
                .collect();
            has_rows |= !rows.is_empty();

            for line in table_grid(&rows) {
                if line.first().is_some_and(|cell| cell == OSCAR_WIN_MARKER) {
                    wins += 1;
                }
            }
        }

        if has_rows {
            AwardLookup::Found(wins)
        } else {
            AwardLookup::NotFound
        }
    }
}

fn row_belongs_to<'a>(row: &Node<'a>, table: &Node<'a>) -> bool {
    row.closest("table").is_some_and(|owner| owner.is_same(table))
}

/// Lay rows out as a grid of trimmed cell texts, copying a `rowspan` or
/// `colspan` cell into every slot it covers.
fn table_grid(rows: &[Node<'_>]) -> Vec<Vec<String>> {
    // Per column: rows still covered from above, and the covering text.
    let mut carried: Vec<Option<(usize, String)>> = Vec::new();
    let mut grid = Vec::with_capacity(rows.len());

    for row in rows {
        let mut line: Vec<String> = Vec::new();
        let mut cells = row.children_named(&["td", "th"]).into_iter();

        loop {
            let column = line.len();
            if let Some(slot) = carried.get_mut(column) {
                if let Some((left, text)) = slot.take() {
                    if left > 1 {
                        *slot = Some((left - 1, text.clone()));
                    }
                    line.push(text);
                    continue;
                }
            }

            let Some(cell) = cells.next() else { break };
            let text = cell.text().trim().to_string();
            let rowspan = span(&cell, "rowspan");
            let colspan = span(&cell, "colspan").min(MAX_COLSPAN);

            for _ in 0..colspan {
                if rowspan > 1 {
                    let column = line.len();
                    if carried.len() <= column {
                        carried.resize(column + 1, None);
                    }
                    carried[column] = Some((rowspan - 1, text.clone()));
                }
                line.push(text.clone());
            }
        }

        grid.push(line);
    }

    grid
}

/// A span attribute; absent, malformed or zero means 1.
fn span(cell: &Node<'_>, name: &str) -> usize {
    cell.attr_as::<usize>(name)
        .ok()
        .filter(|&n| n > 0)
        .unwrap_or(1)
}
