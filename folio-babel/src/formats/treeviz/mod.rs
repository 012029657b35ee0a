//! Treeviz formatter for document trees
//!
//! A visual, line based rendering of the node structure, meant for debugging
//! what the decoder produced or what the editor stored. One line per node:
//!
//! <prefix><connector> <icon> <label>
//!
//! where labels are truncated to 30 characters. Example:
//!
//! ```text
//! ⧉ Document (3 blocks)
//! ├─ § h1 Release notes
//! │ └─ ◦ Release notes
//! ├─ ☰ 2 items
//! │ ├─ • First item
//! │ │ └─ ¶ First item
//! │ │   └─ ◦ First item
//! ...
//! ```
//!
//! Parameters:
//!
//! - `show-marks`: when not `"false"`, text lines carry their marks, e.g.
//!   `◦ word [bold, link=https://x.io]`. On by default.

use super::icons::get_icon;
use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::{DocumentNode, Mark};
use std::collections::HashMap;

const LABEL_WIDTH: usize = 30;

fn truncate(label: &str) -> String {
    if label.chars().count() <= LABEL_WIDTH {
        label.to_string()
    } else {
        let cut: String = label.chars().take(LABEL_WIDTH - 1).collect();
        format!("{cut}…")
    }
}

fn mark_label(mark: &Mark) -> String {
    match mark {
        Mark::Link { href } => format!("link={href}"),
        other => other.name().to_string(),
    }
}

fn items_label(count: usize) -> String {
    if count == 1 {
        "1 item".to_string()
    } else {
        format!("{count} items")
    }
}

fn display_label(node: &DocumentNode, show_marks: bool) -> String {
    match node {
        DocumentNode::Heading { level, .. } => {
            truncate(&format!("h{level} {}", node.plain_text()))
        }
        DocumentNode::BulletList { children } | DocumentNode::OrderedList { children } => {
            items_label(children.len())
        }
        DocumentNode::CodeBlock { language, code } => {
            let lines = if code.is_empty() { 0 } else { code.lines().count() };
            format!(
                "{} ({lines} lines)",
                language.as_deref().unwrap_or("plain")
            )
        }
        DocumentNode::HorizontalRule => "---".to_string(),
        DocumentNode::HardBreak => "break".to_string(),
        DocumentNode::Image { src, alt } => truncate(&format!("{alt} <{src}>")),
        DocumentNode::Text { text, marks } => {
            let label = truncate(text.trim());
            if show_marks && !marks.is_empty() {
                let marks: Vec<_> = marks.iter().map(mark_label).collect();
                format!("{label} [{}]", marks.join(", "))
            } else {
                label
            }
        }
        DocumentNode::Table { children } => format!("{} rows", children.len()),
        DocumentNode::Unknown { kind, .. } => format!("<{kind}>"),
        _ => truncate(&node.plain_text().replace('\n', " ")),
    }
}

fn format_node(
    node: &DocumentNode,
    prefix: &str,
    child_index: usize,
    child_count: usize,
    show_marks: bool,
) -> String {
    let is_last = child_index + 1 == child_count;
    let connector = if is_last { "└─" } else { "├─" };
    let mut output = format!(
        "{prefix}{connector} {} {}\n",
        get_icon(node.kind()),
        display_label(node, show_marks)
    );

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    output.push_str(&format_children(node.children(), &child_prefix, show_marks));
    output
}

fn format_children(children: &[DocumentNode], prefix: &str, show_marks: bool) -> String {
    children
        .iter()
        .enumerate()
        .map(|(i, child)| format_node(child, prefix, i, children.len(), show_marks))
        .collect()
}

pub fn to_treeviz_str(doc: &DocumentNode) -> String {
    to_treeviz_str_with_params(doc, &HashMap::new())
}

/// Convert a tree to its treeviz rendering.
///
/// A `doc` root gets a summary header line; any other root is rendered as
/// the only entry of a one-node forest.
pub fn to_treeviz_str_with_params(doc: &DocumentNode, params: &HashMap<String, String>) -> String {
    let show_marks = params
        .get("show-marks")
        .map(|v| v.to_lowercase() != "false")
        .unwrap_or(true);

    match doc {
        DocumentNode::Doc { children } => {
            let noun = if children.len() == 1 { "block" } else { "blocks" };
            let header = format!(
                "{} Document ({} {noun})\n",
                get_icon("doc"),
                children.len()
            );
            header + &format_children(children, "", show_marks)
        }
        other => format_node(other, "", 0, 1, show_marks),
    }
}

/// Format implementation for treeviz format
pub struct TreevizFormat;

impl Format for TreevizFormat {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn description(&self) -> &str {
        "Visual tree representation with indentation and Unicode icons"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tree", "treeviz"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &DocumentNode) -> Result<String, FormatError> {
        Ok(to_treeviz_str(doc))
    }

    fn serialize_with_options(
        &self,
        doc: &DocumentNode,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        if let Some(key) = options.keys().find(|key| key.as_str() != "show-marks") {
            return Err(FormatError::NotSupported(format!(
                "Format 'treeviz' does not support parameter '{key}'"
            )));
        }
        Ok(to_treeviz_str_with_params(doc, options))
    }
}
