//! Markdown serialization (document tree → Markdown)
//!
//! Each node kind renders to a string fragment and containers concatenate
//! their children. Rendering never fails: missing attributes fall back to
//! defaults, unknown kinds render only their children, and images whose
//! source is not a hosted http(s) URL are dropped from the output.

use super::inline::render_text;
use crate::error::FormatError;
use crate::ir::nodes::{clamp_heading_level, DocumentNode};
use std::collections::HashMap;
use url::Url;

/// Prefix of inline binary payloads, which must never reach text storage.
const DATA_URI_PREFIX: &str = "data:";

/// Knobs for the Markdown serializer. The defaults produce the canonical
/// storage format.
#[derive(Debug, Clone, PartialEq)]
pub struct SerializeOptions {
    /// Marker for bullet list items. The parser recognises `-` and `*`.
    pub bullet_marker: char,
    /// URL schemes an image source may use to be kept.
    pub image_schemes: Vec<String>,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        SerializeOptions {
            bullet_marker: '-',
            image_schemes: vec!["http".to_string(), "https".to_string()],
        }
    }
}

impl SerializeOptions {
    /// Build options from `--extra-*` style parameters.
    ///
    /// Recognised keys: `bullet-marker` and `image-schemes` (comma separated).
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, FormatError> {
        let mut options = SerializeOptions::default();
        for (key, value) in params {
            match key.as_str() {
                "bullet-marker" => options.bullet_marker = parse_bullet_marker(value)?,
                "image-schemes" => {
                    options.image_schemes = value
                        .split(',')
                        .map(|scheme| scheme.trim().to_ascii_lowercase())
                        .filter(|scheme| !scheme.is_empty())
                        .collect();
                }
                other => {
                    return Err(FormatError::NotSupported(format!(
                        "Format 'markdown' does not support parameter '{other}'"
                    )))
                }
            }
        }
        Ok(options)
    }
}

/// Validate a bullet marker given as text.
pub fn parse_bullet_marker(value: &str) -> Result<char, FormatError> {
    match value.trim() {
        "-" => Ok('-'),
        "*" => Ok('*'),
        other => Err(FormatError::SerializationError(format!(
            "Invalid bullet marker '{other}', expected '-' or '*'"
        ))),
    }
}

/// Serialize a node (usually a `doc`) to Markdown with default options.
pub fn serialize_to_markdown(node: &DocumentNode) -> String {
    serialize_with_options(node, &SerializeOptions::default())
}

/// Serialize a node to Markdown.
pub fn serialize_with_options(node: &DocumentNode, options: &SerializeOptions) -> String {
    Renderer { options }.render(node)
}

struct Renderer<'a> {
    options: &'a SerializeOptions,
}

impl Renderer<'_> {
    fn render(&self, node: &DocumentNode) -> String {
        match node {
            DocumentNode::Doc { children } => self.join_blocks(children, "\n\n"),
            DocumentNode::Paragraph { children } => self.inline(children),
            DocumentNode::Heading { level, children } => {
                let level = clamp_heading_level(i64::from(*level));
                format!("{} {}", "#".repeat(level as usize), self.inline(children))
            }
            DocumentNode::BulletList { children } => self.list(children, false),
            DocumentNode::OrderedList { children } => self.list(children, true),
            DocumentNode::ListItem { children } => self.join_blocks(children, "\n"),
            DocumentNode::Blockquote { children } => {
                quote_lines(&self.join_blocks(children, "\n\n"))
            }
            DocumentNode::CodeBlock { language, code } => fence(language.as_deref(), code),
            DocumentNode::HorizontalRule => "---".to_string(),
            DocumentNode::Image { src, alt } => {
                if self.image_allowed(src) {
                    format!("![{alt}]({src})")
                } else {
                    log::debug!("dropping image with unhosted source ({} bytes)", src.len());
                    String::new()
                }
            }
            DocumentNode::HardBreak => "\n".to_string(),
            DocumentNode::Text { text, marks } => render_text(text, marks),
            // Tables are not decomposed into pipe syntax.
            DocumentNode::Table { children } => self.join_blocks(children, "\n"),
            DocumentNode::Unknown { kind, children } => {
                log::debug!("rendering unknown node kind '{kind}' through its children");
                self.inline(children)
            }
        }
    }

    fn inline(&self, children: &[DocumentNode]) -> String {
        children.iter().map(|child| self.render(child)).collect()
    }

    fn join_blocks(&self, children: &[DocumentNode], separator: &str) -> String {
        children
            .iter()
            .map(|child| self.render(child))
            .filter(|rendered| !rendered.is_empty())
            .collect::<Vec<_>>()
            .join(separator)
    }

    fn list(&self, items: &[DocumentNode], ordered: bool) -> String {
        let mut lines = Vec::new();
        for (index, item) in items.iter().enumerate() {
            let marker = if ordered {
                format!("{}. ", index + 1)
            } else {
                format!("{} ", self.options.bullet_marker)
            };
            let indent = " ".repeat(marker.len());
            let body = self.render(item);
            let mut body_lines = body.split('\n');

            let first = body_lines.next().unwrap_or_default();
            if first.is_empty() {
                lines.push(marker.trim_end().to_string());
            } else {
                lines.push(format!("{marker}{first}"));
            }
            for line in body_lines {
                if line.is_empty() {
                    lines.push(String::new());
                } else {
                    lines.push(format!("{indent}{line}"));
                }
            }
        }
        lines.join("\n")
    }

    fn image_allowed(&self, src: &str) -> bool {
        if src.is_empty() || src.starts_with(DATA_URI_PREFIX) {
            return false;
        }
        match Url::parse(src) {
            Ok(url) => self
                .options
                .image_schemes
                .iter()
                .any(|scheme| scheme == url.scheme()),
            Err(_) => false,
        }
    }
}

fn quote_lines(inner: &str) -> String {
    if inner.is_empty() {
        return String::new();
    }
    inner
        .split('\n')
        .map(|line| {
            if line.is_empty() {
                ">".to_string()
            } else {
                format!("> {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The closing fence always sits on its own line after the literal, so a
/// trailing newline in the literal shows up as a blank last line.
fn fence(language: Option<&str>, code: &str) -> String {
    let mut out = format!("```{}\n", language.unwrap_or_default());
    if !code.is_empty() {
        out.push_str(code);
        out.push('\n');
    }
    out.push_str("```");
    out
}
