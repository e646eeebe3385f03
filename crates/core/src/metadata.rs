//! Document metadata and thumbnail detection.
//!
//! Metadata is read from the parsed document before the cleaner runs, since
//! cleaning strips `meta`, `link` and `title` elements from the body.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::dom_tree::{DomTree, NodeId};
use crate::parse::Document;

/// Metadata taken from the html document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Meta {
    pub lang: Option<String>,
    pub canonical: Option<String>,
    pub title: Option<String>,
    pub favicon: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<String>,
    /// `og:*` properties, keyed without the `og:` prefix
    pub open_graph: BTreeMap<String, String>,
}

/// A header image for the article, found among the body images
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Thumbnail {
    pub src: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    #[serde(skip)]
    pub node: NodeId,
}

impl Document {
    /// Extract all metadata at once
    pub fn extract_metadata(&self) -> Meta {
        let mut open_graph = BTreeMap::new();
        if let Ok(elements) = self.select("meta[property^=\"og:\"]") {
            for el in elements {
                if let (Some(property), Some(content)) = (el.attr("property"), el.attr("content"))
                    && let Some(key) = property.strip_prefix("og:")
                    && let Some(value) = non_empty(content)
                {
                    let value = if key == "image" { self.resolve(&value) } else { value };
                    open_graph.entry(key.to_string()).or_insert(value);
                }
            }
        }

        Meta {
            lang: self.extract_lang(),
            canonical: self.link_href("link[rel=\"canonical\"]").map(|href| self.resolve(&href)),
            title: self.title().or_else(|| open_graph.get("title").cloned()),
            favicon: self.link_href("link[rel~=\"icon\"]").map(|href| self.resolve(&href)),
            description: self.get_meta_content("description"),
            keywords: self.get_meta_content("keywords"),
            open_graph,
        }
    }

    /// Extract the `lang` attribute of the root element
    fn extract_lang(&self) -> Option<String> {
        let elements = self.select("html[lang]").ok()?;
        elements.first().and_then(|el| el.attr("lang")).and_then(non_empty)
    }

    /// Get meta tag content by name attribute
    fn get_meta_content(&self, name: &str) -> Option<String> {
        let selector = format!("meta[name=\"{}\"]", name);
        let elements = self.select(&selector).ok()?;
        elements.iter().filter_map(|el| el.attr("content")).find_map(non_empty)
    }

    /// First `href` of the links matching the selector
    fn link_href(&self, selector: &str) -> Option<String> {
        let elements = self.select(selector).ok()?;
        elements.iter().filter_map(|el| el.attr("href")).find_map(non_empty)
    }

    /// Resolve a possibly relative URL against the base URL
    pub(crate) fn resolve(&self, href: &str) -> String {
        match self.base_url().and_then(|base| base.join(href).ok()) {
            Some(absolute) => absolute.to_string(),
            None => href.to_string(),
        }
    }
}

/// Find the body image announced by `og:image`.
///
/// `resolve` maps a raw `src` to the form stored in [`Meta::open_graph`].
pub fn find_thumbnail(tree: &DomTree, body: NodeId, meta: &Meta, resolve: impl Fn(&str) -> String) -> Option<Thumbnail> {
    let target = meta.open_graph.get("image")?;

    tree.descendants(body).find_map(|id| {
        let el = tree.element(id).filter(|el| el.tag == "img")?;
        let src = el.attr("src").map(|s| resolve(s.trim()))?;
        (&src == target).then(|| Thumbnail {
            src,
            width: el.attr("width").and_then(|w| w.trim().parse().ok()),
            height: el.attr("height").and_then(|h| h.trim().parse().ok()),
            node: id,
        })
    })
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() { None } else { Some(value.to_string()) }
}
