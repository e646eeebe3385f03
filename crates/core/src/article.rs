//! Article output type with metadata, density table and renderers.
//!
//! This module defines the [`Article`] struct which holds everything one
//! extraction produced: the document metadata, the optional thumbnail, the
//! density table and selected region, the cleaned source tree and the
//! assembled output tree. Renderers read the output tree without mutating it,
//! so they can be called any number of times.

use std::sync::Arc;

use crate::assemble::Skeleton;
use crate::density::{self, BlockRecord};
use crate::dom_tree::{DomTree, NodeId};
use crate::formatters::html::{RenderConfig, render_html, render_node};
use crate::formatters::json::{JsonConfig, convert_to_json};
use crate::formatters::markdown::{MarkdownConfig, convert_to_markdown};
use crate::formatters::text::render_text;
use crate::metadata::{Meta, Thumbnail};
use crate::region::Region;
use crate::tags::TagSets;
use crate::Result;

/// Output format options for Article content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed HTML document.
    Html,
    /// Flattened plain text.
    Text,
    /// Markdown converted from the output body.
    Markdown,
    /// JSON with metadata, region, density table and content.
    Json,
    /// One line per density record.
    Density,
}

/// The complete result of extracting one HTML document.
#[derive(Debug, Clone)]
pub struct Article {
    meta: Meta,
    thumbnail: Option<Thumbnail>,
    records: Vec<BlockRecord>,
    region: Region,
    cleaned: DomTree,
    output: Skeleton,
    tags: Arc<TagSets>,
    render: RenderConfig,
}

impl Article {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        meta: Meta, thumbnail: Option<Thumbnail>, records: Vec<BlockRecord>, region: Region, cleaned: DomTree,
        output: Skeleton, tags: Arc<TagSets>, render: RenderConfig,
    ) -> Self {
        Self { meta, thumbnail, records, region, cleaned, output, tags, render }
    }

    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    pub fn thumbnail(&self) -> Option<&Thumbnail> {
        self.thumbnail.as_ref()
    }

    /// The density table; record ids point into [`Article::cleaned`].
    pub fn records(&self) -> &[BlockRecord] {
        &self.records
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    /// The source document after cleaning and minification
    pub fn cleaned(&self) -> &DomTree {
        &self.cleaned
    }

    /// The assembled output document
    pub fn output(&self) -> &DomTree {
        &self.output.tree
    }

    /// Body of the output document
    pub fn body(&self) -> NodeId {
        self.output.body
    }

    /// Renders the output document as pretty-printed HTML.
    pub fn html(&self) -> Result<String> {
        render_html(&self.output.tree, &self.tags, &self.render)
    }

    /// Renders the output body as plain text.
    pub fn text(&self) -> String {
        render_text(&self.output.tree, self.output.body, &self.tags)
    }

    /// Converts the output body to Markdown.
    pub fn markdown(&self, config: &MarkdownConfig) -> Result<String> {
        let tree = &self.output.tree;
        let parts = tree
            .children(self.output.body)
            .map(|child| render_node(tree, child, &self.tags, &self.render))
            .collect::<Result<Vec<_>>>()?;

        convert_to_markdown(&parts.join(&self.render.newline), &self.meta, config)
    }

    /// Diagnostic dump of the density table.
    pub fn density(&self) -> String {
        density::dump(&self.records)
    }

    /// Serializes the article to JSON.
    pub fn to_json(&self, config: &JsonConfig) -> Result<String> {
        convert_to_json(self, config)
    }

    /// Converts the article to the specified format with default options.
    pub fn to_format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Html => self.html(),
            OutputFormat::Text => Ok(self.text()),
            OutputFormat::Markdown => self.markdown(&MarkdownConfig::default()),
            OutputFormat::Json => self.to_json(&JsonConfig::default()),
            OutputFormat::Density => Ok(self.density()),
        }
    }
}
