//! Arena-backed mutable node tree.
//!
//! The pipeline edits the document in place (removing nodes, rewriting text)
//! and builds a second tree for the output. Nodes live in a `Vec` and are
//! addressed by [`NodeId`]; each node links to its parent, its first and last
//! child, and its previous and next sibling, so navigation, appending and
//! removal are all constant time.
//!
//! Detaching a node unlinks it from its siblings and its parent and clears its
//! own links in the same step, so the two directions never disagree. Detached
//! nodes stay in the arena as orphans and are simply unreachable from the root.

use ego_tree::iter::Edge;
use scraper::{Html, Node};

use crate::{PithError, Result};

/// Stable index of a node inside a [`DomTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in its arena
    pub fn index(self) -> usize {
        self.0
    }
}

/// An element: tag name plus its attributes in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
}

impl ElementData {
    pub fn new(tag: &str, attrs: &[(&str, &str)]) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: attrs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        }
    }

    /// Gets the value of an attribute.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    /// Removes every attribute with the given key.
    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|(k, _)| k != name);
    }
}

/// The payload of a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    Document,
    Doctype { name: String },
    Comment(String),
    Text(String),
    Element(ElementData),
}

/// A node in the arena
#[derive(Debug, Clone)]
pub struct DomNode {
    pub data: NodeData,
    parent: Option<NodeId>,
    prev_sibling: Option<NodeId>,
    next_sibling: Option<NodeId>,
    first_child: Option<NodeId>,
    last_child: Option<NodeId>,
}

impl DomNode {
    fn new(data: NodeData) -> Self {
        Self { data, parent: None, prev_sibling: None, next_sibling: None, first_child: None, last_child: None }
    }
}

/// A mutable document tree
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<DomNode>,
}

impl DomTree {
    /// Creates a tree holding only a Document root
    pub fn new() -> Self {
        Self { nodes: vec![DomNode::new(NodeData::Document)] }
    }

    /// Builds a tree from a parsed `scraper` document.
    ///
    /// # Errors
    ///
    /// Returns [`PithError::UnknownNodeKind`] for node kinds the pipeline has no
    /// representation for (processing instructions).
    pub fn from_html(html: &Html) -> Result<Self> {
        let mut tree = DomTree::new();
        let mut stack = vec![tree.root()];

        for edge in html.tree.root().traverse() {
            match edge {
                Edge::Open(node) => {
                    let data = match node.value() {
                        Node::Document | Node::Fragment => continue,
                        Node::Doctype(doctype) => NodeData::Doctype { name: doctype.name().to_string() },
                        Node::Comment(comment) => NodeData::Comment(comment.to_string()),
                        Node::Text(text) => NodeData::Text(text.to_string()),
                        Node::Element(element) => NodeData::Element(ElementData {
                            tag: element.name().to_ascii_lowercase(),
                            attrs: element.attrs().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
                        }),
                        Node::ProcessingInstruction(_) => {
                            return Err(PithError::UnknownNodeKind("processing instruction".to_string()));
                        }
                    };

                    let parent = stack.last().copied().unwrap_or(tree.root());
                    let id = tree.create(data);
                    tree.append(parent, id);
                    stack.push(id);
                }
                Edge::Close(node) => {
                    if !matches!(node.value(), Node::Document | Node::Fragment) {
                        stack.pop();
                    }
                }
            }
        }

        Ok(tree)
    }

    /// The Document root
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes in the arena, detached ones included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&DomNode> {
        self.nodes.get(id.0)
    }

    /// Payload of a node.
    ///
    /// Ids are only valid for the tree that created them; a foreign id panics.
    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0].data
    }

    pub fn data_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.0].data
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        match self.data(id) {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        match self.data_mut(id) {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Tag name if the node is an element
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|el| el.tag.as_str())
    }

    /// Content if the node is a text node
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.data(id) {
            NodeData::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_text(&self, id: NodeId) -> bool {
        matches!(self.data(id), NodeData::Text(_))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Children of a node, first to last (reversible)
    pub fn children(&self, id: NodeId) -> Children<'_> {
        let node = &self.nodes[id.0];
        Children { tree: self, front: node.first_child, back: node.last_child }
    }

    pub fn has_children(&self, id: NodeId) -> bool {
        self.nodes[id.0].first_child.is_some()
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].first_child
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].last_child
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].next_sibling
    }

    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].prev_sibling
    }

    /// Adds a detached node to the arena
    pub fn create(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(DomNode::new(data));
        id
    }

    pub fn create_element(&mut self, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        self.create(NodeData::Element(ElementData::new(tag, attrs)))
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.create(NodeData::Text(text.to_string()))
    }

    /// Appends `child` as the last child of `parent`, detaching it first if needed
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);

        let last = self.nodes[parent.0].last_child;
        match last {
            Some(last) => self.nodes[last.0].next_sibling = Some(child),
            None => self.nodes[parent.0].first_child = Some(child),
        }
        self.nodes[parent.0].last_child = Some(child);

        let node = &mut self.nodes[child.0];
        node.parent = Some(parent);
        node.prev_sibling = last;
    }

    /// Unlinks a node from its parent. No-op for nodes without a parent.
    pub fn detach(&mut self, id: NodeId) {
        let node = &mut self.nodes[id.0];
        let Some(parent) = node.parent.take() else {
            return;
        };
        let prev = node.prev_sibling.take();
        let next = node.next_sibling.take();

        match prev {
            Some(prev) => self.nodes[prev.0].next_sibling = next,
            None => self.nodes[parent.0].first_child = next,
        }
        match next {
            Some(next) => self.nodes[next.0].prev_sibling = prev,
            None => self.nodes[parent.0].last_child = prev,
        }
    }

    /// Whether the node is still reachable from the root
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current == self.root()
    }

    /// Pre-order iterator over a subtree, `id` included
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants { tree: self, stack: vec![id] }
    }

    /// First element with the given tag in pre-order from the root
    pub fn find_element(&self, tag: &str) -> Option<NodeId> {
        self.descendants(self.root()).find(|&id| self.tag(id) == Some(tag))
    }

    /// Concatenated text of every text node below `id`
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id).filter_map(|n| self.text(n)).collect()
    }

    /// Copies a subtree of `source` into this tree.
    ///
    /// The copy is detached: it has no parent until appended, and nothing in it
    /// refers back to `source`.
    pub fn import(&mut self, source: &DomTree, id: NodeId) -> NodeId {
        let copy = self.create(source.data(id).clone());
        for child in source.children(id) {
            let child_copy = self.import(source, child);
            self.append(copy, child_copy);
        }
        copy
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Pre-order subtree iterator returned by [`DomTree::descendants`]
pub struct Descendants<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack.extend(self.tree.children(id).rev());
        Some(id)
    }
}

/// Child iterator returned by [`DomTree::children`]
pub struct Children<'a> {
    tree: &'a DomTree,
    front: Option<NodeId>,
    back: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.front?;
        if self.front == self.back {
            self.front = None;
            self.back = None;
        } else {
            self.front = self.tree.next_sibling(id);
        }
        Some(id)
    }
}

impl DoubleEndedIterator for Children<'_> {
    fn next_back(&mut self) -> Option<NodeId> {
        let id = self.back?;
        if self.front == self.back {
            self.front = None;
            self.back = None;
        } else {
            self.back = self.tree.prev_sibling(id);
        }
        Some(id)
    }
}
