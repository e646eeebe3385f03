pub mod article;
pub mod assemble;
pub mod clean;
pub mod density;
pub mod dom_tree;
pub mod error;
pub mod extractor;
pub mod fetch;
pub mod formatters;
pub mod metadata;
pub mod minify;
pub mod parse;
pub mod region;
pub mod tags;

pub use article::{Article, OutputFormat};
pub use assemble::{Skeleton, assemble};
pub use clean::{CleanStats, clean};
pub use density::{BlockRecord, analyze};
pub use dom_tree::{DomNode, DomTree, ElementData, NodeData, NodeId};
pub use error::{PithError, Result};
pub use extractor::{ExtractConfig, ExtractConfigBuilder, Extractor, extract, extract_from_reader, extract_with_url};
#[cfg(feature = "fetch")]
pub use extractor::{fetch_and_extract, fetch_and_extract_with_config};
#[cfg(feature = "fetch")]
pub use fetch::fetch_url;
pub use fetch::{FetchConfig, fetch_file, fetch_stdin};
pub use formatters::{JsonConfig, MarkdownConfig, RenderConfig, convert_to_json, convert_to_markdown};
pub use formatters::{render_html, render_node, render_text};
pub use metadata::{Meta, Thumbnail, find_thumbnail};
pub use minify::minify;
pub use parse::Document;
pub use region::{LeashParams, Region, select_region};
pub use tags::{TagClass, TagSets, TagSetsBuilder};
