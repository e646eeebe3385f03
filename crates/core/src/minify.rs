//! Whitespace minification.
//!
//! Runs of spaces, tabs and line breaks collapse to a single space outside
//! `pre`/`code`. Two directional passes then strip whitespace at block and
//! `<br>` boundaries, so spacing survives only between inline content.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::dom_tree::{DomTree, NodeData, NodeId};
use crate::tags::TagSets;

const WHITESPACE: [char; 4] = [' ', '\t', '\n', '\r'];

static SPACING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \r\n\t]+").unwrap());

/// Minify the subtree rooted at `root` in place
pub fn minify(tree: &mut DomTree, root: NodeId, tags: &TagSets) {
    collapse_whitespace(tree, root);
    trim_left(tree, root, true, tags);
    trim_right(tree, root, true, tags);
    trace!(nodes = tree.descendants(root).count(), "minified body");
}

fn collapse_whitespace(tree: &mut DomTree, root: NodeId) {
    let texts: Vec<NodeId> = tree.descendants(root).filter(|&id| tree.is_text(id)).collect();

    for id in texts {
        if has_preformatted_ancestor(tree, id) {
            continue;
        }
        if let NodeData::Text(text) = tree.data_mut(id)
            && SPACING.is_match(text)
        {
            *text = SPACING.replace_all(text, " ").into_owned();
        }
    }
}

fn has_preformatted_ancestor(tree: &DomTree, id: NodeId) -> bool {
    let mut current = tree.parent(id);
    while let Some(parent) = current {
        if matches!(tree.tag(parent), Some("pre" | "code")) {
            return true;
        }
        current = tree.parent(parent);
    }
    false
}

/// Left-biased pass: strips leading whitespace after a boundary.
///
/// Returns whether trimming is still active for the next sibling.
fn trim_left(tree: &mut DomTree, id: NodeId, mut trim: bool, tags: &TagSets) -> bool {
    match tree.data(id) {
        NodeData::Element(el) => {
            let block = tags.is_block(&el.tag);
            let boundary = block || el.tag == "br";
            if block {
                trim = true;
            }

            let mut child = tree.first_child(id);
            while let Some(c) = child {
                let next = tree.next_sibling(c);
                trim = trim_left(tree, c, trim, tags);
                child = next;
            }

            if boundary { true } else { trim }
        }
        NodeData::Text(text) => {
            if !trim {
                return false;
            }
            let trimmed = text.trim_start_matches(WHITESPACE).to_string();
            if trimmed.is_empty() {
                tree.detach(id);
                return true;
            }
            *tree.data_mut(id) = NodeData::Text(trimmed);
            false
        }
        _ => trim,
    }
}

/// Right-biased mirror of [`trim_left`], walking children last to first.
fn trim_right(tree: &mut DomTree, id: NodeId, mut trim: bool, tags: &TagSets) -> bool {
    match tree.data(id) {
        NodeData::Element(el) => {
            let block = tags.is_block(&el.tag);
            let boundary = block || el.tag == "br";
            if block {
                trim = true;
            }

            let mut child = tree.last_child(id);
            while let Some(c) = child {
                let prev = tree.prev_sibling(c);
                trim = trim_right(tree, c, trim, tags);
                child = prev;
            }

            if boundary { true } else { trim }
        }
        NodeData::Text(text) => {
            if !trim {
                return false;
            }
            let trimmed = text.trim_end_matches(WHITESPACE).to_string();
            if trimmed.is_empty() {
                tree.detach(id);
                return true;
            }
            *tree.data_mut(id) = NodeData::Text(trimmed);
            false
        }
        _ => trim,
    }
}
