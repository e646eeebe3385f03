use std::sync::LazyLock;

use regex::Regex;

use crate::dom_tree::{DomTree, NodeData, NodeId};
use crate::tags::TagSets;

static BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Flatten the subtree under `root` to plain text.
///
/// Lists become ` - ` items, paragraphs and headings are separated by a
/// blank line, and a `div` only breaks the line when it opens with text.
pub fn render_text(tree: &DomTree, root: NodeId, tags: &TagSets) -> String {
    let mut out = String::new();
    flatten(tree, root, tags, &mut out);

    BLANK_LINES.replace_all(&out, "\n\n").trim().to_string()
}

fn flatten(tree: &DomTree, id: NodeId, tags: &TagSets, out: &mut String) {
    match tree.data(id) {
        NodeData::Text(text) => out.push_str(text),
        NodeData::Element(el) => {
            match el.tag.as_str() {
                "ul" | "br" => out.push('\n'),
                "li" => out.push_str("\n - "),
                "div" => {
                    if tree.first_child(id).is_some_and(|c| tree.is_text(c)) {
                        out.push_str("\n\n");
                    }
                }
                tag if tags.is_block(tag) => out.push_str("\n\n"),
                _ => {}
            }
            for child in tree.children(id) {
                flatten(tree, child, tags, out);
            }
        }
        NodeData::Document => {
            for child in tree.children(id) {
                flatten(tree, child, tags, out);
            }
        }
        NodeData::Doctype { .. } | NodeData::Comment(_) => {}
    }
}
