//! Output tree assembly.
//!
//! Builds a fresh document and fills it from the metadata, the thumbnail and
//! the selected span of the density table. Selected blocks are imported as
//! deep copies, so the output tree never shares nodes with the cleaned tree.

use tracing::debug;

use crate::density::BlockRecord;
use crate::dom_tree::{DomTree, NodeData, NodeId};
use crate::metadata::{Meta, Thumbnail};
use crate::region::Region;

/// The empty output document and the handles needed to fill it
#[derive(Debug, Clone)]
pub struct Skeleton {
    pub tree: DomTree,
    pub html: NodeId,
    pub head: NodeId,
    pub body: NodeId,
}

impl Skeleton {
    /// `<!DOCTYPE html>` with an `html` root holding `head` and `body`.
    ///
    /// The head starts with a UTF-8 charset and a viewport declaration.
    pub fn new() -> Self {
        let mut tree = DomTree::new();
        let root = tree.root();

        let doctype = tree.create(NodeData::Doctype { name: "html".to_string() });
        tree.append(root, doctype);

        let html = tree.create_element("html", &[]);
        let head = tree.create_element("head", &[]);
        let body = tree.create_element("body", &[]);
        tree.append(root, html);
        tree.append(html, head);
        tree.append(html, body);

        let charset = tree.create_element("meta", &[("charset", "utf-8")]);
        let viewport =
            tree.create_element("meta", &[("name", "viewport"), ("content", "width=device-width, initial-scale=1")]);
        tree.append(head, charset);
        tree.append(head, viewport);

        Self { tree, html, head, body }
    }

    fn head_element(&mut self, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let id = self.tree.create_element(tag, attrs);
        self.tree.append(self.head, id);
        id
    }

    fn text_element(&mut self, parent: NodeId, tag: &str, text: &str) {
        let el = self.tree.create_element(tag, &[]);
        let content = self.tree.create_text(text);
        self.tree.append(el, content);
        self.tree.append(parent, el);
    }

    fn add_meta(&mut self, meta: &Meta) {
        if let Some(lang) = &meta.lang
            && let Some(html) = self.tree.element_mut(self.html)
        {
            html.attrs.push(("lang".to_string(), lang.clone()));
        }

        if let Some(description) = &meta.description {
            self.head_element("meta", &[("name", "description"), ("content", description.as_str())]);
        }
        if let Some(keywords) = &meta.keywords {
            self.head_element("meta", &[("name", "keywords"), ("content", keywords.as_str())]);
        }

        for (key, value) in &meta.open_graph {
            let property = format!("og:{}", key);
            self.head_element("meta", &[("property", property.as_str()), ("content", value.as_str())]);
        }

        if let Some(title) = &meta.title {
            self.text_element(self.head, "title", title);
            self.text_element(self.body, "h1", title);
        }

        if let Some(canonical) = &meta.canonical {
            self.head_element("link", &[("rel", "canonical"), ("href", canonical.as_str())]);
        }
        if let Some(favicon) = &meta.favicon {
            self.head_element(
                "link",
                &[("rel", "shortcut icon"), ("type", "image/x-icon"), ("href", favicon.as_str())],
            );
        }
    }
}

impl Default for Skeleton {
    fn default() -> Self {
        Self::new()
    }
}

/// Assemble the output document.
///
/// Blocks `region.start..=region.end` of `records` are copied out of `source`
/// in index order. A nested block inside an earlier selected block is copied
/// again on its own, as the table lists it.
pub fn assemble(
    source: &DomTree, meta: &Meta, thumbnail: Option<&Thumbnail>, records: &[BlockRecord], region: &Region,
) -> Skeleton {
    let mut out = Skeleton::new();
    out.add_meta(meta);

    if let Some(thumb) = thumbnail {
        let copy = out.tree.import(source, thumb.node);
        out.tree.append(out.body, copy);
    }

    let mut copied = 0;
    for record in records.get(region.span()).unwrap_or_default() {
        let copy = out.tree.import(source, record.block);
        out.tree.append(out.body, copy);
        copied += 1;
    }

    debug!(blocks = copied, thumbnail = thumbnail.is_some(), "assembled output");
    out
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use super::*;

    fn source() -> (DomTree, Vec<BlockRecord>) {
        let mut tree = DomTree::new();
        let root = tree.root();
        let body = tree.create_element("body", &[]);
        let div = tree.create_element("div", &[]);
        let p1 = tree.create_element("p", &[("id", "one")]);
        let p2 = tree.create_element("p", &[]);
        let t1 = tree.create_text("first");
        let t2 = tree.create_text("second");
        tree.append(root, body);
        tree.append(body, div);
        tree.append(div, p1);
        tree.append(div, p2);
        tree.append(p1, t1);
        tree.append(p2, t2);

        let records = vec![
            BlockRecord { block: body, text: String::new() },
            BlockRecord { block: div, text: String::new() },
            BlockRecord { block: p1, text: "first".to_string() },
            BlockRecord { block: p2, text: "second".to_string() },
        ];
        (tree, records)
    }

    fn region(start: usize, end: usize) -> Region {
        Region { smax: end, start, end, members: BTreeSet::from([start, end]) }
    }

    fn body_tags(out: &Skeleton) -> Vec<&str> {
        out.tree.children(out.body).filter_map(|c| out.tree.tag(c)).collect()
    }

    #[test]
    fn test_skeleton_layout() {
        let out = Skeleton::new();
        let first = out.tree.first_child(out.tree.root()).unwrap();

        assert_eq!(out.tree.data(first), &NodeData::Doctype { name: "html".to_string() });
        assert_eq!(out.tree.children(out.html).collect::<Vec<_>>(), vec![out.head, out.body]);
        assert_eq!(out.tree.children(out.head).count(), 2);
        assert!(!out.tree.has_children(out.body));
    }

    #[test]
    fn test_selected_blocks_in_order_without_wrapper() {
        let (tree, records) = source();
        let out = assemble(&tree, &Meta::default(), None, &records, &region(2, 3));

        assert_eq!(body_tags(&out), vec!["p", "p"]);
        assert_eq!(out.tree.text_content(out.body), "firstsecond");
        let first = out.tree.first_child(out.body).unwrap();
        assert_eq!(out.tree.element(first).unwrap().attr("id"), Some("one"));
    }

    #[test]
    fn test_nested_blocks_are_copied_again() {
        let (tree, records) = source();
        let out = assemble(&tree, &Meta::default(), None, &records, &region(1, 2));

        assert_eq!(body_tags(&out), vec!["div", "p"]);
        assert_eq!(out.tree.text_content(out.body), "firstsecondfirst");
    }

    #[test]
    fn test_copies_do_not_alias_source() {
        let (tree, records) = source();
        let mut out = assemble(&tree, &Meta::default(), None, &records, &region(2, 2));

        let p = out.tree.first_child(out.body).unwrap();
        let text = out.tree.first_child(p).unwrap();
        *out.tree.data_mut(text) = NodeData::Text("changed".to_string());

        assert_eq!(tree.text_content(records[2].block), "first");
    }

    #[test]
    fn test_title_becomes_title_and_first_heading() {
        let (tree, records) = source();
        let meta = Meta { title: Some("Hello".to_string()), ..Meta::default() };
        let out = assemble(&tree, &meta, None, &records, &region(2, 3));

        let titles: Vec<_> = out.tree.descendants(out.head).filter(|&id| out.tree.tag(id) == Some("title")).collect();
        assert_eq!(titles.len(), 1);
        assert_eq!(out.tree.text_content(titles[0]), "Hello");

        let first = out.tree.first_child(out.body).unwrap();
        assert_eq!(out.tree.tag(first), Some("h1"));
        assert_eq!(out.tree.text_content(first), "Hello");
        assert_eq!(body_tags(&out), vec!["h1", "p", "p"]);
    }

    #[test]
    fn test_metadata_elements() {
        let (tree, records) = source();
        let meta = Meta {
            lang: Some("en".to_string()),
            description: Some("About".to_string()),
            keywords: Some("a, b".to_string()),
            canonical: Some("https://example.com/a".to_string()),
            favicon: Some("/favicon.ico".to_string()),
            open_graph: BTreeMap::from([
                ("type".to_string(), "article".to_string()),
                ("site_name".to_string(), "Example".to_string()),
            ]),
            ..Meta::default()
        };
        let out = assemble(&tree, &meta, None, &records, &region(3, 3));

        assert_eq!(out.tree.element(out.html).unwrap().attr("lang"), Some("en"));

        let head: Vec<_> =
            out.tree.children(out.head).filter_map(|c| out.tree.element(c)).skip(2).cloned().collect();
        let summary: Vec<(String, Option<&str>, Option<&str>)> = head
            .iter()
            .map(|el| {
                let key = el.attr("name").or(el.attr("property")).or(el.attr("rel")).unwrap_or_default();
                (format!("{}:{}", el.tag, key), el.attr("content"), el.attr("href"))
            })
            .collect();

        assert_eq!(
            summary,
            vec![
                ("meta:description".to_string(), Some("About"), None),
                ("meta:keywords".to_string(), Some("a, b"), None),
                ("meta:og:site_name".to_string(), Some("Example"), None),
                ("meta:og:type".to_string(), Some("article"), None),
                ("link:canonical".to_string(), None, Some("https://example.com/a")),
                ("link:shortcut icon".to_string(), None, Some("/favicon.ico")),
            ]
        );
    }

    #[test]
    fn test_thumbnail_precedes_blocks() {
        let (mut tree, records) = source();
        let img = tree.create_element("img", &[("src", "cover.jpg")]);
        tree.append(records[0].block, img);
        let thumb = Thumbnail { src: "cover.jpg".to_string(), width: None, height: None, node: img };

        let out = assemble(&tree, &Meta::default(), Some(&thumb), &records, &region(2, 3));

        assert_eq!(body_tags(&out), vec!["img", "p", "p"]);
    }
}
