//! Typed access to retrieved pages.
//!
//! All scraping goes through [`Page`] and [`Node`]: select elements with a
//! compiled [`Query`], read text, read and convert attributes. A missing
//! element or attribute is reported as [`ScrapeError::Parse`] naming the page
//! and the query, so a layout change surfaces in one place.

use crate::error::{Result, ScrapeError};
use scraper::{ElementRef, Html, Selector};
use std::str::FromStr;

/// A compiled CSS selector that remembers its source text for error messages.
#[derive(Debug, Clone)]
pub struct Query {
    css: String,
    selector: Selector,
}

impl Query {
    pub fn new(css: &str) -> Result<Self> {
        let selector = Selector::parse(css).map_err(|e| ScrapeError::InvalidSelector {
            selector: css.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            css: css.to_string(),
            selector,
        })
    }
}

/// A parsed HTML document labelled with a name used in error messages.
pub struct Page {
    name: String,
    document: Html,
}

impl Page {
    pub fn parse(name: impl Into<String>, html: &str) -> Self {
        Self {
            name: name.into(),
            document: Html::parse_document(html),
        }
    }

    /// All elements matching `query`, in document order.
    pub fn select_all<'a>(&'a self, query: &Query) -> Vec<Node<'a>> {
        self.document
            .select(&query.selector)
            .map(|element| Node {
                page: &self.name,
                element,
            })
            .collect()
    }

    /// Like [`Page::select_all`], but an empty match is a layout error.
    pub fn select_rows<'a>(&'a self, query: &Query) -> Result<Vec<Node<'a>>> {
        let rows = self.select_all(query);
        if rows.is_empty() {
            return Err(ScrapeError::parse(
                &self.name,
                format!("no elements match '{}'", query.css),
            ));
        }
        Ok(rows)
    }
}

/// One element of a [`Page`].
#[derive(Clone, Copy)]
pub struct Node<'a> {
    page: &'a str,
    element: ElementRef<'a>,
}

impl<'a> Node<'a> {
    /// First descendant matching `query`.
    pub fn find(&self, query: &Query) -> Result<Node<'a>> {
        self.element
            .select(&query.selector)
            .next()
            .map(|element| Node {
                page: self.page,
                element,
            })
            .ok_or_else(|| {
                ScrapeError::parse(self.page, format!("missing element '{}'", query.css))
            })
    }

    /// All descendants matching `query`, in document order.
    pub fn find_all(&self, query: &Query) -> Vec<Node<'a>> {
        self.element
            .select(&query.selector)
            .map(|element| Node {
                page: self.page,
                element,
            })
            .collect()
    }

    /// Direct child elements whose tag is one of `names`, in document order.
    #[must_use]
    pub fn children_named(&self, names: &[&str]) -> Vec<Node<'a>> {
        self.element
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|child| names.contains(&child.value().name()))
            .map(|element| Node {
                page: self.page,
                element,
            })
            .collect()
    }

    /// Nearest ancestor element with tag `name`.
    #[must_use]
    pub fn closest(&self, name: &str) -> Option<Node<'a>> {
        self.element
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|ancestor| ancestor.value().name() == name)
            .map(|element| Node {
                page: self.page,
                element,
            })
    }

    #[must_use]
    pub fn is_same(&self, other: &Node<'a>) -> bool {
        self.element == other.element
    }

    /// Concatenated text of all descendant text nodes, untouched.
    #[must_use]
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    pub fn attr(&self, name: &str) -> Result<&'a str> {
        self.element.value().attr(name).ok_or_else(|| {
            ScrapeError::parse(
                self.page,
                format!(
                    "<{}> has no '{name}' attribute",
                    self.element.value().name()
                ),
            )
        })
    }

    /// Read an attribute and convert it, failing on absent or malformed values.
    pub fn attr_as<T>(&self, name: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let raw = self.attr(name)?;
        raw.trim().parse().map_err(|e| {
            ScrapeError::parse(
                self.page,
                format!("attribute '{name}' value '{raw}' is malformed: {e}"),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HTML: &str = r#"
        <table>
            <tr><td class="name"> Heat </td><td><span data-value="8.3">8.3</span></td></tr>
            <tr><td class="name">Ran</td><td><span data-value="n/a">?</span></td></tr>
        </table>
    "#;

    #[test]
    fn test_select_and_extract() {
        let page = Page::parse("fixture", HTML);
        let rows = page
            .select_rows(&Query::new("tr").expect("valid selector"))
            .expect("rows present");
        assert_eq!(rows.len(), 2);

        let name = rows[0]
            .find(&Query::new("td.name").expect("valid selector"))
            .expect("name cell");
        assert_eq!(name.text(), " Heat ");

        let span = rows[0]
            .find(&Query::new("span").expect("valid selector"))
            .expect("span");
        let value: f64 = span.attr_as("data-value").expect("numeric value");
        assert!((value - 8.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_element_names_query() {
        let page = Page::parse("fixture", HTML);
        let rows = page.select_all(&Query::new("tr").expect("valid selector"));

        let err = rows[0]
            .find(&Query::new("a.title").expect("valid selector"))
            .err()
            .expect("no link in row");
        assert!(matches!(err, ScrapeError::Parse { ref page, .. } if page == "fixture"));
        assert!(err.to_string().contains("a.title"));
    }

    #[test]
    fn test_malformed_attribute() {
        let page = Page::parse("fixture", HTML);
        let span = page.select_all(&Query::new("span").expect("valid selector"))[1];

        let result: Result<f64> = span.attr_as("data-value");
        assert!(matches!(result, Err(ScrapeError::Parse { .. })));
        assert!(span.attr("data-missing").is_err());
    }

    #[test]
    fn test_empty_selection_is_layout_error() {
        let page = Page::parse("fixture", HTML);
        let result = page.select_rows(&Query::new("ul > li").expect("valid selector"));
        assert!(matches!(result, Err(ScrapeError::Parse { .. })));
    }

    #[test]
    fn test_children_named() {
        let page = Page::parse("fixture", HTML);
        let row = page.select_all(&Query::new("tr").expect("valid selector"))[1];
        let cells = row.children_named(&["td", "th"]);
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].text(), "Ran");
    }

    #[test]
    fn test_invalid_selector() {
        assert!(matches!(
            Query::new("td[["),
            Err(ScrapeError::InvalidSelector { ref selector, .. }) if selector == "td[["
        ));
    }
}
