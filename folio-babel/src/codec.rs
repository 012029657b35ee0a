//! Codec facade: the two calls the editor makes on save and on load.
//!
//! Both directions are total. Whatever the input, [`encode`] returns a string
//! and [`decode`] returns a `doc` node; malformed content degrades to literal
//! text, an empty paragraph or an omitted node instead of an error.

use crate::formats::markdown::{parser, serializer};
use crate::ir::nodes::DocumentNode;
use serde_json::Value;

/// What the editor may hand to [`encode`].
///
/// Stored content may already be Markdown (older records, or content that
/// never went through the rich editor), so a plain string is accepted and
/// returned as is.
#[derive(Debug, Clone, Copy)]
pub enum EncodeInput<'a> {
    Document(&'a DocumentNode),
    Markdown(&'a str),
    Empty,
}

impl<'a> From<&'a DocumentNode> for EncodeInput<'a> {
    fn from(node: &'a DocumentNode) -> Self {
        EncodeInput::Document(node)
    }
}

impl<'a> From<&'a str> for EncodeInput<'a> {
    fn from(markdown: &'a str) -> Self {
        EncodeInput::Markdown(markdown)
    }
}

impl<'a> From<&'a String> for EncodeInput<'a> {
    fn from(markdown: &'a String) -> Self {
        EncodeInput::Markdown(markdown)
    }
}

impl<'a, T: Into<EncodeInput<'a>>> From<Option<T>> for EncodeInput<'a> {
    fn from(input: Option<T>) -> Self {
        input.map_or(EncodeInput::Empty, Into::into)
    }
}

/// Encode editor content to Markdown for storage.
///
/// ```ignore
/// let doc = decode("# Title");
/// assert_eq!(encode(&doc), "# Title");
/// assert_eq!(encode("already markdown"), "already markdown");
/// assert_eq!(encode(None::<&str>), "");
/// ```
pub fn encode<'a>(input: impl Into<EncodeInput<'a>>) -> String {
    match input.into() {
        EncodeInput::Document(node) => serializer::serialize_to_markdown(node),
        EncodeInput::Markdown(markdown) => markdown.to_string(),
        EncodeInput::Empty => String::new(),
    }
}

/// Encode untyped editor JSON.
///
/// Strings pass through, objects are read as a node tree and encoded.
/// Anything that is not a node object with a string `type` encodes to `""`;
/// malformed fields further down degrade to their defaults.
pub fn encode_value(value: &Value) -> String {
    match value {
        Value::String(markdown) => markdown.clone(),
        Value::Object(_) => match serde_json::from_value::<DocumentNode>(value.clone()) {
            Ok(node) => encode(&node),
            Err(err) => {
                log::debug!("editor value is not a node tree, encoding as empty: {err}");
                String::new()
            }
        },
        _ => String::new(),
    }
}

/// Decode stored Markdown into a `doc` node for the editor.
pub fn decode(markdown: &str) -> DocumentNode {
    parser::parse_from_markdown(markdown)
}
