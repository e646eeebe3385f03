//! Main content extraction API.
//!
//! [`Extractor`] runs the whole pipeline over one document: metadata and
//! thumbnail detection, cleaning, minification, density analysis, region
//! selection and assembly. The free functions [`extract`],
//! [`extract_from_reader`], [`extract_with_url`] and [`fetch_and_extract`]
//! cover the common cases with default settings.
//!
//! # Example
//!
//! ```rust
//! use pith_core::extract;
//!
//! let html = "<html><head><title>Post</title></head><body><p>Body text</p></body></html>";
//! let article = extract(html).unwrap();
//! assert_eq!(article.meta().title.as_deref(), Some("Post"));
//! ```

use std::io::Read;
use std::sync::Arc;

use tracing::debug;
use url::Url;

use crate::article::Article;
use crate::assemble::assemble;
use crate::clean::clean;
use crate::density::analyze;
use crate::formatters::html::RenderConfig;
use crate::metadata::find_thumbnail;
use crate::minify::minify;
use crate::parse::Document;
use crate::region::{LeashParams, select_region};
use crate::tags::TagSets;
use crate::{PithError, Result};

#[cfg(feature = "fetch")]
use crate::fetch::{FetchConfig, fetch_url};

/// Configuration for the extraction pipeline.
///
/// # Example
///
/// ```rust
/// use pith_core::{ExtractConfig, LeashParams};
///
/// let config = ExtractConfig::builder()
///     .leash(LeashParams::new(0.0, 800.0, 1.0, 20.0).unwrap())
///     .indent(2)
///     .build();
/// assert_eq!(config.render.indent, "  ");
/// ```
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Length-to-leash mapping for region growth.
    pub leash: LeashParams,

    /// Tag classification used by every stage.
    pub tags: Arc<TagSets>,

    /// Layout of the HTML renderer.
    pub render: RenderConfig,

    /// Base URL for resolving metadata links and the thumbnail.
    pub base_url: Option<Url>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            leash: LeashParams::default(),
            tags: TagSets::standard(),
            render: RenderConfig::default(),
            base_url: None,
        }
    }
}

impl ExtractConfig {
    pub fn builder() -> ExtractConfigBuilder {
        ExtractConfigBuilder::default()
    }
}

/// Builder for [`ExtractConfig`].
#[derive(Debug, Clone, Default)]
pub struct ExtractConfigBuilder {
    config: ExtractConfig,
}

impl ExtractConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn leash(mut self, value: LeashParams) -> Self {
        self.config.leash = value;
        self
    }

    pub fn tags(mut self, value: Arc<TagSets>) -> Self {
        self.config.tags = value;
        self
    }

    pub fn render(mut self, value: RenderConfig) -> Self {
        self.config.render = value;
        self
    }

    /// Indent rendered HTML with `width` spaces.
    pub fn indent(mut self, width: usize) -> Self {
        self.config.render = self.config.render.with_indent(width);
        self
    }

    pub fn base_url(mut self, value: Url) -> Self {
        self.config.base_url = Some(value);
        self
    }

    pub fn build(self) -> ExtractConfig {
        self.config
    }
}

/// Runs the extraction pipeline with a fixed configuration.
///
/// Each call works on its own trees, so one extractor can be shared between
/// threads and used for many documents.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractConfig,
}

impl Extractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ExtractConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Extracts the main content of an HTML string.
    ///
    /// # Errors
    ///
    /// - [`PithError::NoBody`] if the document has no `<body>`
    /// - [`PithError::InvalidConfig`] if the leash parameters are invalid
    /// - [`PithError::UnknownNodeKind`] if the parser produced an unsupported node
    pub fn extract(&self, html: &str) -> Result<Article> {
        let mut doc = Document::parse(html);
        doc.set_base_url(self.config.base_url.clone());
        self.extract_document(&doc)
    }

    /// Extracts from a byte stream, replacing invalid UTF-8.
    pub fn extract_from_reader<R: Read>(&self, reader: R) -> Result<Article> {
        let mut doc = Document::from_reader(reader)?;
        doc.set_base_url(self.config.base_url.clone());
        self.extract_document(&doc)
    }

    /// Extracts with `url` as the base for relative links.
    ///
    /// # Errors
    ///
    /// Returns [`PithError::InvalidUrl`] if `url` does not parse.
    pub fn extract_with_url(&self, html: &str, url: &str) -> Result<Article> {
        let base_url = Url::parse(url).map_err(|e| PithError::InvalidUrl(e.to_string()))?;
        self.extract_document(&Document::parse_with_url(html, base_url))
    }

    /// Fetches a page and extracts it, using the requested URL as base.
    #[cfg(feature = "fetch")]
    pub async fn fetch_and_extract(&self, url: &str, fetch_config: &FetchConfig) -> Result<Article> {
        let html = fetch_url(url, fetch_config).await?;
        self.extract_with_url(&html, url)
    }

    /// Runs the pipeline over a parsed document.
    pub fn extract_document(&self, doc: &Document) -> Result<Article> {
        let config = &self.config;
        config.leash.validate()?;

        let mut tree = doc.to_tree()?;
        let body = tree.find_element("body").ok_or(PithError::NoBody)?;
        debug!(nodes = tree.len(), "found body");

        let meta = doc.extract_metadata();
        let thumbnail = find_thumbnail(&tree, body, &meta, |src| doc.resolve(src));

        clean(&mut tree, body, &config.tags);
        minify(&mut tree, body, &config.tags);

        // A thumbnail inside an ignored element is gone after cleaning.
        let thumbnail = thumbnail.filter(|thumb| tree.is_attached(thumb.node));

        let records = analyze(&tree, body, &config.tags);
        let region = select_region(&records, &config.leash)?;
        let output = assemble(&tree, &meta, thumbnail.as_ref(), &records, &region);

        Ok(Article::new(
            meta,
            thumbnail,
            records,
            region,
            tree,
            output,
            Arc::clone(&config.tags),
            config.render.clone(),
        ))
    }
}

/// Extracts with default settings.
///
/// # Example
///
/// ```rust
/// use pith_core::extract;
///
/// let article = extract("<html><body><p>Hello</p></body></html>").unwrap();
/// assert_eq!(article.text(), "Hello");
/// ```
pub fn extract(html: &str) -> Result<Article> {
    Extractor::new().extract(html)
}

/// Extracts from a byte stream with default settings.
pub fn extract_from_reader<R: Read>(reader: R) -> Result<Article> {
    Extractor::new().extract_from_reader(reader)
}

/// Extracts with default settings and a base URL.
pub fn extract_with_url(html: &str, url: &str) -> Result<Article> {
    Extractor::new().extract_with_url(html, url)
}

/// Fetches a URL and extracts it with default settings.
///
/// # Example
///
/// ```ignore
/// use pith_core::fetch_and_extract;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let article = fetch_and_extract("https://example.com/article").await?;
///     println!("{}", article.text());
///     Ok(())
/// }
/// ```
#[cfg(feature = "fetch")]
pub async fn fetch_and_extract(url: &str) -> Result<Article> {
    Extractor::new().fetch_and_extract(url, &FetchConfig::default()).await
}

/// Fetches a URL and extracts it with custom settings.
#[cfg(feature = "fetch")]
pub async fn fetch_and_extract_with_config(
    url: &str, config: &ExtractConfig, fetch_config: &FetchConfig,
) -> Result<Article> {
    Extractor::with_config(config.clone()).fetch_and_extract(url, fetch_config).await
}
