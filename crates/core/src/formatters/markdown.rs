use crate::metadata::Meta;
use crate::{PithError, Result};

/// Configuration for Markdown conversion
#[derive(Debug, Clone, Default)]
pub struct MarkdownConfig {
    /// Include TOML frontmatter with metadata
    pub include_frontmatter: bool,
}

/// Convert rendered HTML to Markdown with optional frontmatter
pub fn convert_to_markdown(html: &str, meta: &Meta, config: &MarkdownConfig) -> Result<String> {
    let mut output = String::new();

    if config.include_frontmatter {
        output.push_str(&generate_frontmatter(meta));
        output.push('\n');
    }

    output.push_str(html_to_markdown(html)?.trim());
    Ok(output)
}

/// Generate TOML frontmatter from metadata
fn generate_frontmatter(meta: &Meta) -> String {
    let fields = [
        ("title", &meta.title),
        ("description", &meta.description),
        ("keywords", &meta.keywords),
        ("lang", &meta.lang),
        ("canonical", &meta.canonical),
    ];

    let mut frontmatter = String::from("+++");
    for (key, value) in fields {
        if let Some(value) = value {
            frontmatter.push_str(&format!("\n{} = {}", key, toml_escape_string(value)));
        }
    }
    frontmatter.push_str("\n+++\n");
    frontmatter
}

/// Escape a string as a TOML basic string
fn toml_escape_string(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n"))
}

#[cfg(feature = "markdown")]
fn html_to_markdown(html: &str) -> Result<String> {
    htmd::convert(html).map_err(|e| PithError::Markdown(e.to_string()))
}

#[cfg(not(feature = "markdown"))]
fn html_to_markdown(_html: &str) -> Result<String> {
    Err(PithError::Markdown("built without the `markdown` feature".to_string()))
}
