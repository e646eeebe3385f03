//! Structural cleaning of the body subtree.
//!
//! Removes comments and ignored elements, and strips `class` attributes from
//! what remains. The walk captures each node's next sibling before unlinking
//! it, so removal never cuts the traversal short.

use tracing::debug;

use crate::dom_tree::{DomTree, NodeData, NodeId};
use crate::tags::TagSets;

/// Counts of what a cleaning pass removed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanStats {
    pub comments: usize,
    pub elements: usize,
    pub class_attrs: usize,
}

enum Action {
    Remove,
    Descend,
    Skip,
}

/// Clean the subtree rooted at `root` in place
pub fn clean(tree: &mut DomTree, root: NodeId, tags: &TagSets) -> CleanStats {
    let mut stats = CleanStats::default();
    strip_class(tree, root, &mut stats);
    clean_children(tree, root, tags, &mut stats);

    debug!(
        comments = stats.comments,
        elements = stats.elements,
        class_attrs = stats.class_attrs,
        "cleaned body"
    );
    stats
}

fn clean_children(tree: &mut DomTree, parent: NodeId, tags: &TagSets, stats: &mut CleanStats) {
    let mut child = tree.first_child(parent);

    while let Some(id) = child {
        let next = tree.next_sibling(id);

        let action = match tree.data(id) {
            NodeData::Comment(_) => {
                stats.comments += 1;
                Action::Remove
            }
            NodeData::Element(el) if tags.is_ignored(&el.tag) => {
                stats.elements += 1;
                Action::Remove
            }
            NodeData::Element(_) => Action::Descend,
            _ => Action::Skip,
        };

        match action {
            Action::Remove => tree.detach(id),
            Action::Descend => {
                strip_class(tree, id, stats);
                clean_children(tree, id, tags, stats);
            }
            Action::Skip => {}
        }

        child = next;
    }
}

fn strip_class(tree: &mut DomTree, id: NodeId, stats: &mut CleanStats) {
    if let Some(el) = tree.element_mut(id)
        && el.attr("class").is_some()
    {
        el.remove_attr("class");
        stats.class_attrs += 1;
    }
}
