//! Pretty-printing HTML serializer.
//!
//! Block structure is indented one level per depth. Inline flow is written
//! on a single line so no whitespace is introduced between words and inline
//! elements: inline elements, `pre`, elements with a single text child and
//! elements whose children are all text or inline are laid out compactly,
//! and so is everything below them.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::dom_tree::{DomTree, ElementData, NodeData, NodeId};
use crate::tags::TagSets;
use crate::{PithError, Result};

/// Layout options for the HTML renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Indentation unit, repeated once per depth
    pub indent: String,
    /// Line separator
    pub newline: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { indent: "    ".to_string(), newline: "\n".to_string() }
    }
}

impl RenderConfig {
    /// Indent with `width` spaces
    pub fn with_indent(mut self, width: usize) -> Self {
        self.indent = " ".repeat(width);
        self
    }

    pub fn with_newline(mut self, newline: impl Into<String>) -> Self {
        self.newline = newline.into();
        self
    }
}

/// Render a whole tree, starting at its Document root.
///
/// # Errors
///
/// Returns [`PithError::VoidWithChildren`] if a void element has children.
pub fn render_html(tree: &DomTree, tags: &TagSets, config: &RenderConfig) -> Result<String> {
    render_node(tree, tree.root(), tags, config)
}

/// Render the subtree rooted at `id`
pub fn render_node(tree: &DomTree, id: NodeId, tags: &TagSets, config: &RenderConfig) -> Result<String> {
    let mut renderer = HtmlRenderer { tree, tags, config, out: String::new() };
    renderer.node(id, 0, false)?;
    Ok(renderer.out)
}

struct HtmlRenderer<'a> {
    tree: &'a DomTree,
    tags: &'a TagSets,
    config: &'a RenderConfig,
    out: String,
}

impl HtmlRenderer<'_> {
    fn node(&mut self, id: NodeId, depth: usize, compact: bool) -> Result<()> {
        let tree = self.tree;
        match tree.data(id) {
            NodeData::Document => {
                for (i, child) in self.visible_children(id).into_iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(&self.config.newline);
                    }
                    self.node(child, depth, compact)?;
                }
            }
            NodeData::Doctype { name } => {
                self.out.push_str("<!DOCTYPE ");
                self.out.push_str(name);
                self.out.push('>');
            }
            NodeData::Comment(_) => {}
            NodeData::Text(text) => self.out.push_str(&encode_text(text)),
            NodeData::Element(el) => self.element(id, el, depth, compact)?,
        }
        Ok(())
    }

    fn element(&mut self, id: NodeId, el: &ElementData, depth: usize, compact: bool) -> Result<()> {
        let children = self.visible_children(id);

        if self.tags.is_void(&el.tag) {
            if self.tree.has_children(id) {
                return Err(PithError::VoidWithChildren { tag: el.tag.clone() });
            }
            self.open_tag(el);
            self.out.push_str("/>");
            return Ok(());
        }

        self.open_tag(el);
        self.out.push('>');

        if compact || self.is_compact(el, &children) {
            for child in children {
                self.node(child, depth + 1, true)?;
            }
        } else {
            let mut prev: Option<NodeId> = None;
            for child in children {
                if !prev.is_some_and(|p| self.joins(p, child)) {
                    self.line(depth + 1);
                }
                self.node(child, depth + 1, false)?;
                prev = Some(child);
            }
            self.line(depth);
        }

        self.out.push_str("</");
        self.out.push_str(&el.tag);
        self.out.push('>');
        Ok(())
    }

    fn open_tag(&mut self, el: &ElementData) {
        self.out.push('<');
        self.out.push_str(&el.tag);
        for (key, value) in &el.attrs {
            self.out.push(' ');
            self.out.push_str(key);
            self.out.push_str("=\"");
            self.out.push_str(&encode_double_quoted_attribute(value));
            self.out.push('"');
        }
    }

    fn line(&mut self, depth: usize) {
        self.out.push_str(&self.config.newline);
        for _ in 0..depth {
            self.out.push_str(&self.config.indent);
        }
    }

    fn is_compact(&self, el: &ElementData, children: &[NodeId]) -> bool {
        self.tags.is_inline(&el.tag)
            || el.tag == "pre"
            || matches!(children, [only] if self.tree.is_text(*only))
            || children.iter().all(|&c| self.is_flow(c))
    }

    /// Text or an inline element
    fn is_flow(&self, id: NodeId) -> bool {
        match self.tree.data(id) {
            NodeData::Text(_) => true,
            NodeData::Element(el) => self.tags.is_inline(&el.tag),
            _ => false,
        }
    }

    fn is_inline_element(&self, id: NodeId) -> bool {
        self.tree.tag(id).is_some_and(|tag| self.tags.is_inline(tag))
    }

    /// Whether `next` continues on the line of `prev`
    fn joins(&self, prev: NodeId, next: NodeId) -> bool {
        (self.is_inline_element(prev) && self.is_flow(next)) || (self.is_inline_element(next) && self.is_flow(prev))
    }

    /// Children that produce output; dropped comments take no line
    fn visible_children(&self, id: NodeId) -> Vec<NodeId> {
        let tree = self.tree;
        tree.children(id).filter(|&c| !matches!(tree.data(c), NodeData::Comment(_))).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::Document;

    fn render_body_child(html: &str) -> String {
        let tree = Document::parse(html).to_tree().unwrap();
        let body = tree.find_element("body").unwrap();
        let first = tree.first_child(body).unwrap();
        render_node(&tree, first, &TagSets::standard(), &RenderConfig::default()).unwrap()
    }

    #[test]
    fn test_inline_flow_stays_on_one_line() {
        let out = render_body_child("<html><body><p>a<b>bold</b>c</p></body></html>");
        assert_eq!(out, "<p>a<b>bold</b>c</p>");
    }

    #[test]
    fn test_blocks_are_indented() {
        let out = render_body_child("<html><body><div><p>x</p><p>y</p></div></body></html>");
        assert_eq!(out, "<div>\n    <p>x</p>\n    <p>y</p>\n</div>");
    }

    #[test]
    fn test_nested_indentation() {
        let out = render_body_child("<html><body><div><ul><li>a</li><li>b</li></ul></div></body></html>");
        assert_eq!(out, "<div>\n    <ul>\n        <li>a</li>\n        <li>b</li>\n    </ul>\n</div>");
    }

    #[test]
    fn test_inline_siblings_of_blocks_join() {
        let out = render_body_child("<html><body><div>lead <a href=\"/x\">link</a><p>para</p></div></body></html>");
        assert_eq!(out, "<div>\n    lead <a href=\"/x\">link</a>\n    <p>para</p>\n</div>");
    }

    #[test]
    fn test_void_elements_self_close() {
        let out = render_body_child("<html><body><p>one<br>two<img src=\"a.png\" alt=\"\"></p></body></html>");
        assert_eq!(out, "<p>one<br/>two<img src=\"a.png\" alt=\"\"/></p>");
    }

    #[test]
    fn test_void_with_children_is_an_error() {
        let mut tree = DomTree::new();
        let root = tree.root();
        let br = tree.create_element("br", &[]);
        let text = tree.create_text("oops");
        tree.append(root, br);
        tree.append(br, text);

        let result = render_html(&tree, &TagSets::standard(), &RenderConfig::default());
        assert!(matches!(result, Err(PithError::VoidWithChildren { tag }) if tag == "br"));
    }

    #[test]
    fn test_pre_is_verbatim() {
        let out = render_body_child("<html><body><pre>line 1\n  <b>line</b> 2</pre></body></html>");
        assert_eq!(out, "<pre>line 1\n  <b>line</b> 2</pre>");
    }

    #[test]
    fn test_escapes_text_and_attributes() {
        let out = render_body_child("<html><body><p title=\"a &quot;q&quot; &amp; b\">1 &lt; 2 &amp; 3</p></body></html>");
        assert_eq!(out, "<p title=\"a &quot;q&quot; &amp; b\">1 &lt; 2 &amp; 3</p>");
    }

    #[test]
    fn test_comments_are_dropped() {
        let out = render_body_child("<html><body><div><p>a</p><!-- note --><p>b</p></div></body></html>");
        assert_eq!(out, "<div>\n    <p>a</p>\n    <p>b</p>\n</div>");
    }

    #[test]
    fn test_document_layout_and_custom_config() {
        let tree = Document::parse("<!DOCTYPE html><html><head></head><body><div><p>x</p></div></body></html>")
            .to_tree()
            .unwrap();
        let config = RenderConfig::default().with_indent(2);

        let out = render_html(&tree, &TagSets::standard(), &config).unwrap();

        assert_eq!(
            out,
            "<!DOCTYPE html>\n<html>\n  <head></head>\n  <body>\n    <div>\n      <p>x</p>\n    </div>\n  </body>\n</html>"
        );
    }
}
