//! Tag classification tables.
//!
//! Four membership sets drive every stage of the pipeline:
//!
//! - **void**: elements that cannot hold content (`br`, `img`, `meta`, ...)
//! - **ignore**: elements stripped by the cleaner (`script`, `style`, ...)
//! - **block**: elements that always start a new line; each one opens a density record
//! - **inline**: elements that flow within a line; the HTML renderer keeps them on one line
//!
//! The standard tables are built once per process and shared through an [`Arc`].
//! Custom classifications are derived from them with the `with_*`/`without_*` builders.

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input", "keygen", "link", "meta", "param", "source",
    "track", "wbr",
];

const IGNORE_TAGS: &[&str] = &["base", "command", "link", "meta", "noscript", "script", "style", "title"];

const BLOCK_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "canvas",
    "dd",
    "div",
    "dl",
    "dt",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hr",
    "li",
    "main",
    "nav",
    "noscript",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "tfoot",
    "ul",
    "video",
];

const INLINE_TAGS: &[&str] = &[
    "a", "abbr", "acronym", "b", "bdi", "bdo", "big", "br", "button", "cite", "code", "data", "del", "dfn", "em", "i",
    "img", "input", "ins", "kbd", "label", "mark", "meter", "object", "output", "q", "s", "samp", "select", "small",
    "span", "strike", "strong", "sub", "sup", "textarea", "time", "tt", "u", "var", "wbr",
];

static STANDARD: LazyLock<Arc<TagSets>> = LazyLock::new(|| {
    Arc::new(TagSets {
        void: to_set(VOID_TAGS),
        ignore: to_set(IGNORE_TAGS),
        block: to_set(BLOCK_TAGS),
        inline: to_set(INLINE_TAGS),
    })
});

fn to_set(tags: &[&str]) -> HashSet<String> {
    tags.iter().map(|t| t.to_string()).collect()
}

/// Which classification set an override targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagClass {
    Void,
    Ignore,
    Block,
    Inline,
}

/// The four tag classification sets.
///
/// # Example
///
/// ```rust
/// use pith_core::{TagClass, TagSets};
///
/// let tags = TagSets::standard();
/// assert!(tags.is_block("p"));
///
/// let custom = TagSets::builder().with(TagClass::Ignore, "nav").without(TagClass::Block, "nav").build();
/// assert!(custom.is_ignored("nav"));
/// assert!(!custom.is_block("nav"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSets {
    void: HashSet<String>,
    ignore: HashSet<String>,
    block: HashSet<String>,
    inline: HashSet<String>,
}

impl TagSets {
    /// The process-wide standard tables.
    pub fn standard() -> Arc<TagSets> {
        Arc::clone(&STANDARD)
    }

    /// Starts a builder seeded with the standard tables.
    pub fn builder() -> TagSetsBuilder {
        TagSetsBuilder { sets: (**STANDARD).clone() }
    }

    pub fn is_void(&self, tag: &str) -> bool {
        self.void.contains(tag)
    }

    pub fn is_ignored(&self, tag: &str) -> bool {
        self.ignore.contains(tag)
    }

    pub fn is_block(&self, tag: &str) -> bool {
        self.block.contains(tag)
    }

    pub fn is_inline(&self, tag: &str) -> bool {
        self.inline.contains(tag)
    }

    fn set_mut(&mut self, class: TagClass) -> &mut HashSet<String> {
        match class {
            TagClass::Void => &mut self.void,
            TagClass::Ignore => &mut self.ignore,
            TagClass::Block => &mut self.block,
            TagClass::Inline => &mut self.inline,
        }
    }
}

/// Builder for a customized [`TagSets`].
pub struct TagSetsBuilder {
    sets: TagSets,
}

impl TagSetsBuilder {
    /// Adds a tag to a classification set.
    pub fn with(mut self, class: TagClass, tag: &str) -> Self {
        self.sets.set_mut(class).insert(tag.to_ascii_lowercase());
        self
    }

    /// Removes a tag from a classification set.
    pub fn without(mut self, class: TagClass, tag: &str) -> Self {
        self.sets.set_mut(class).remove(&tag.to_ascii_lowercase());
        self
    }

    /// Builds the shared tag sets.
    pub fn build(self) -> Arc<TagSets> {
        Arc::new(self.sets)
    }
}
