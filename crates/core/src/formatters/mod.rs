pub mod html;
pub mod json;
pub mod markdown;
pub mod text;

pub use html::{RenderConfig, render_html, render_node};
pub use json::{ContentFormats, DensityEntry, JsonConfig, JsonOutput, convert_to_json};
pub use markdown::{MarkdownConfig, convert_to_markdown};
pub use text::render_text;
