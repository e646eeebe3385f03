//! Per-block text density.
//!
//! One pre-order walk over the cleaned body. Record 0 is the body itself;
//! every block element opens a new record, and each text node is appended to
//! the most recently opened record. Inline text therefore lands in the
//! nearest block boundary already seen, including text that follows a nested
//! block inside its parent.

use std::fmt::Write;

use serde::Serialize;
use tracing::debug;

use crate::dom_tree::{DomTree, NodeData, NodeId};
use crate::tags::TagSets;

/// A structural block and the text attributed to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockRecord {
    #[serde(skip)]
    pub block: NodeId,
    pub text: String,
}

impl BlockRecord {
    /// Text length in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Build the density table for `body`.
///
/// The table always holds at least the body record.
pub fn analyze(tree: &DomTree, body: NodeId, tags: &TagSets) -> Vec<BlockRecord> {
    let mut records = vec![BlockRecord { block: body, text: String::new() }];

    for id in tree.descendants(body).skip(1) {
        match tree.data(id) {
            NodeData::Element(el) if tags.is_block(&el.tag) => {
                records.push(BlockRecord { block: id, text: String::new() });
            }
            NodeData::Text(text) => {
                if let Some(current) = records.last_mut() {
                    current.text.push_str(text);
                }
            }
            _ => {}
        }
    }

    debug!(records = records.len(), "built density table");
    records
}

/// Diagnostic dump, one `"<index> (<length>) - <text>"` line per record
pub fn dump(records: &[BlockRecord]) -> String {
    let mut out = String::new();
    for (i, record) in records.iter().enumerate() {
        let _ = writeln!(out, "{} ({}) - {}", i, record.len(), record.text);
    }
    out
}
