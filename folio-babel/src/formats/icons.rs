//! Icon mapping for the tree visualization format
//!
//! Keys are the wire names of node kinds (see [`DocumentNode::kind`]).
//!
//! [`DocumentNode::kind`]: crate::ir::nodes::DocumentNode::kind

/// Get the Unicode icon for a given node kind
///
/// Unknown kinds fall back to a hollow circle.
pub fn get_icon(node_kind: &str) -> &'static str {
    match node_kind {
        "doc" => "⧉",
        "paragraph" => "¶",
        "heading" => "§",
        "bulletList" | "orderedList" => "☰",
        "listItem" => "•",
        "blockquote" => "❝",
        "codeBlock" => "𝒱",
        "horizontalRule" => "⎯",
        "image" => "▣",
        "hardBreak" => "↵",
        "text" => "◦",
        "table" => "▦",
        _ => "○",
    }
}
