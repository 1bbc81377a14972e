//! Minimal parsed-document interface
//!
//! Discovery and extraction query pages through [`Page`] and [`Node`]
//! rather than through the parsing library directly, keeping the
//! selector vocabulary small: find the first match, find the first
//! match among an ordered list of alternatives, or find all matches.

use scraper::{ElementRef, Html, Selector};

/// A parsed HTML document
#[derive(Debug)]
pub struct Page {
    document: Html,
}

impl Page {
    /// Parses an HTML string into a queryable page.
    ///
    /// HTML parsing is lenient and never fails; malformed markup simply
    /// yields a best-effort tree.
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    /// Returns the first element matching the given CSS selector.
    pub fn find_first(&self, selector: &str) -> Option<Node<'_>> {
        let selector = Selector::parse(selector).ok()?;
        self.document.select(&selector).next().map(Node::new)
    }

    /// Returns the first match among an ordered list of selectors.
    ///
    /// Selectors are tried in the order given; the first selector with
    /// any match wins and later alternatives are not consulted.
    pub fn find_first_of(&self, selectors: &[&str]) -> Option<Node<'_>> {
        selectors
            .iter()
            .find_map(|selector| self.find_first(selector))
    }

    /// Returns all elements matching the given CSS selector.
    ///
    /// Selector lists (comma-separated alternatives) yield each matching
    /// element once, in document order.
    pub fn find_all(&self, selector: &str) -> Vec<Node<'_>> {
        match Selector::parse(selector) {
            Ok(selector) => self.document.select(&selector).map(Node::new).collect(),
            Err(_) => Vec::new(),
        }
    }
}

/// A single element within a [`Page`]
pub struct Node<'a> {
    element: ElementRef<'a>,
}

impl<'a> Node<'a> {
    fn new(element: ElementRef<'a>) -> Self {
        Self { element }
    }

    /// Returns the value of an attribute, if present.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Returns the concatenated text content, trimmed.
    pub fn text(&self) -> String {
        self.element.text().collect::<String>().trim().to_string()
    }

    /// Returns the inner HTML of the element.
    pub fn inner_html(&self) -> String {
        self.element.inner_html()
    }
}
