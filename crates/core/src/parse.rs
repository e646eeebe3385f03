//! HTML parsing.
//!
//! This module provides the [`Document`] type, the tree source of the
//! pipeline. It wraps a `scraper` document for CSS-selector queries (used by
//! the metadata extractor) and converts it into the mutable [`DomTree`] the
//! later stages edit.
//!
//! # Example
//!
//! ```rust
//! use pith_core::parse::Document;
//!
//! let html = r#"
//!     <html>
//!         <head><title>Title</title></head>
//!         <body><p class="content">Paragraph</p></body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html);
//! assert_eq!(doc.title(), Some("Title".to_string()));
//! let paragraphs = doc.select("p.content").unwrap();
//! assert_eq!(paragraphs.len(), 1);
//! ```

use std::io::Read;

use scraper::{Html, Selector};
use url::Url;

use crate::dom_tree::DomTree;
use crate::{PithError, Result};

/// Represents a parsed HTML document.
///
/// # Example
///
/// ```rust
/// use pith_core::parse::Document;
///
/// let html = "<html><head><title>Test</title></head><body><p>Hello</p></body></html>";
/// let doc = Document::parse(html);
/// assert_eq!(doc.title(), Some("Test".to_string()));
/// ```
pub struct Document {
    html: Html,
    base_url: Option<Url>,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// Malformed markup is recovered by the HTML5 parser; this never fails.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html), base_url: None }
    }

    /// Parses HTML with a base URL used to resolve relative metadata links.
    pub fn parse_with_url(html: &str, base_url: Url) -> Self {
        Self { html: Html::parse_document(html), base_url: Some(base_url) }
    }

    /// Reads a byte stream to the end and parses it.
    ///
    /// Invalid UTF-8 sequences are replaced rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns [`PithError::Io`] if reading fails.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(Self::parse(&String::from_utf8_lossy(&bytes)))
    }

    /// Gets the base URL used for resolving relative links.
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// Replaces the base URL.
    pub fn set_base_url(&mut self, base_url: Option<Url>) {
        self.base_url = base_url;
    }

    /// Gets the raw `scraper::Html` representation.
    pub fn html(&self) -> &Html {
        &self.html
    }

    /// Converts the parsed document into a mutable tree.
    ///
    /// # Errors
    ///
    /// Returns [`PithError::UnknownNodeKind`] if the parser produced a node
    /// kind the pipeline does not model.
    pub fn to_tree(&self) -> Result<DomTree> {
        DomTree::from_html(&self.html)
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`PithError::InvalidConfig`] if the selector is invalid.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel =
            Selector::parse(selector).map_err(|e| PithError::InvalidConfig(format!("Invalid selector: {}", e)))?;

        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Gets the title of the document.
    ///
    /// Returns the trimmed content of the first `<title>` element, if any.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
    }
}

/// A wrapper around scraper's ElementRef for attribute and text access.
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: scraper::ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the text content of this element.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the value of an attribute.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.element.value().attr(name)
    }
}
