use serde::Serialize;

use crate::article::Article;
use crate::formatters::markdown::MarkdownConfig;
use crate::metadata::{Meta, Thumbnail};
use crate::region::Region;
use crate::Result;

/// Complete JSON output structure
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput<'a> {
    pub meta: &'a Meta,
    pub thumbnail: Option<&'a Thumbnail>,
    pub region: &'a Region,
    pub density: Vec<DensityEntry<'a>>,
    pub content: ContentFormats,
}

/// One row of the density table
#[derive(Debug, Clone, Serialize)]
pub struct DensityEntry<'a> {
    pub index: usize,
    pub length: usize,
    pub text: &'a str,
}

/// Content in multiple formats
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContentFormats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,
}

/// Configuration for JSON output
#[derive(Debug, Clone)]
pub struct JsonConfig {
    pub include_html: bool,
    pub include_text: bool,
    pub include_markdown: bool,
    /// Pretty print JSON output
    pub pretty: bool,
}

impl Default for JsonConfig {
    fn default() -> Self {
        Self { include_html: true, include_text: true, include_markdown: false, pretty: true }
    }
}

/// Serialize an article with its metadata, region and density table
pub fn convert_to_json(article: &Article, config: &JsonConfig) -> Result<String> {
    let content = ContentFormats {
        html: if config.include_html { Some(article.html()?) } else { None },
        text: if config.include_text { Some(article.text()) } else { None },
        markdown: if config.include_markdown { Some(article.markdown(&MarkdownConfig::default())?) } else { None },
    };

    let density = article
        .records()
        .iter()
        .enumerate()
        .map(|(index, record)| DensityEntry { index, length: record.len(), text: &record.text })
        .collect();

    let output = JsonOutput {
        meta: article.meta(),
        thumbnail: article.thumbnail(),
        region: article.region(),
        density,
        content,
    };

    let json = if config.pretty { serde_json::to_string_pretty(&output)? } else { serde_json::to_string(&output)? };
    Ok(json)
}
