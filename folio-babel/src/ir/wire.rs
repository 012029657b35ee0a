//! JSON wire shape of the document tree.
//!
//! The editor exchanges documents as loosely typed JSON objects:
//!
//! ```text
//! {"type": "heading", "attrs": {"level": 2}, "content": [
//!     {"type": "text", "text": "Hi", "marks": [{"type": "bold"}]}
//! ]}
//! ```
//!
//! Fields are present or absent depending on the kind. [`RawNode`] mirrors that
//! shape exactly; conversion into [`DocumentNode`] normalizes it (clamps heading
//! levels, drops unknown marks, keeps unknown kinds as `Unknown`). Conversion
//! from JSON never fails once the value has the basic object shape: a node
//! needs a string `type`, every other field degrades to its default when it is
//! null or of the wrong type, and children without a usable `type` are skipped.

use super::nodes::{clamp_heading_level, DocumentNode, Mark};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// A node exactly as it appears on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawNode {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(
        default,
        deserialize_with = "lenient_attrs",
        skip_serializing_if = "Option::is_none"
    )]
    pub attrs: Option<Map<String, Value>>,
    #[serde(
        default,
        deserialize_with = "lenient_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub content: Vec<RawNode>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub text: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub marks: Vec<RawMark>,
}

/// A mark exactly as it appears on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMark {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(
        default,
        deserialize_with = "lenient_attrs",
        skip_serializing_if = "Option::is_none"
    )]
    pub attrs: Option<Map<String, Value>>,
}

fn lenient_attrs<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Map<String, Value>>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Object(map) => Ok(Some(map)),
        Value::Null => Ok(None),
        other => {
            log::debug!("ignoring non-object attrs: {other}");
            Ok(None)
        }
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(Some(text)),
        Value::Null => Ok(None),
        other => {
            log::debug!("ignoring non-string text: {other}");
            Ok(None)
        }
    }
}

/// Reads an array of wire items, skipping entries that do not have the item
/// shape. Anything other than an array reads as empty.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        Value::Null => return Ok(Vec::new()),
        other => {
            log::debug!("ignoring non-array list field: {other}");
            return Ok(Vec::new());
        }
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                log::debug!("skipping malformed wire item: {err}");
                None
            }
        })
        .collect())
}

impl RawNode {
    fn attr_str(&self, key: &str) -> Option<&str> {
        self.attrs.as_ref()?.get(key)?.as_str()
    }

    fn heading_level(&self) -> u8 {
        let level = self.attrs.as_ref().and_then(|attrs| attrs.get("level"));
        match level {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .map(clamp_heading_level)
                .unwrap_or(1),
            Some(Value::String(s)) => s.trim().parse().map(clamp_heading_level).unwrap_or(1),
            _ => 1,
        }
    }

    fn into_children(self) -> Vec<DocumentNode> {
        self.content.into_iter().map(DocumentNode::from).collect()
    }
}

impl From<RawNode> for DocumentNode {
    fn from(raw: RawNode) -> Self {
        match raw.kind.as_str() {
            "doc" => DocumentNode::Doc {
                children: raw.into_children(),
            },
            "paragraph" => DocumentNode::Paragraph {
                children: raw.into_children(),
            },
            "heading" => DocumentNode::Heading {
                level: raw.heading_level(),
                children: raw.into_children(),
            },
            "bulletList" => DocumentNode::BulletList {
                children: raw.into_children(),
            },
            "orderedList" => DocumentNode::OrderedList {
                children: raw.into_children(),
            },
            "listItem" => DocumentNode::ListItem {
                children: raw.into_children(),
            },
            "blockquote" => DocumentNode::Blockquote {
                children: raw.into_children(),
            },
            "table" => DocumentNode::Table {
                children: raw.into_children(),
            },
            "codeBlock" => {
                let language = raw
                    .attr_str("language")
                    .map(str::trim)
                    .filter(|lang| !lang.is_empty())
                    .map(str::to_string);
                let mut code = raw.text.clone().unwrap_or_default();
                for child in &raw.content {
                    if let Some(text) = &child.text {
                        code.push_str(text);
                    }
                }
                DocumentNode::CodeBlock { language, code }
            }
            "horizontalRule" => DocumentNode::HorizontalRule,
            "hardBreak" => DocumentNode::HardBreak,
            "image" => DocumentNode::Image {
                src: raw.attr_str("src").unwrap_or_default().to_string(),
                alt: raw.attr_str("alt").unwrap_or_default().to_string(),
            },
            "text" => DocumentNode::Text {
                text: raw.text.unwrap_or_default(),
                marks: raw.marks.into_iter().filter_map(mark_from_raw).collect(),
            },
            _ => DocumentNode::Unknown {
                kind: raw.kind.clone(),
                children: raw.into_children(),
            },
        }
    }
}

fn mark_from_raw(raw: RawMark) -> Option<Mark> {
    let mark = match raw.kind.as_str() {
        "bold" => Mark::Bold,
        "italic" => Mark::Italic,
        "code" => Mark::Code,
        "strike" => Mark::Strike,
        "link" => {
            let href = raw
                .attrs
                .as_ref()
                .and_then(|attrs| attrs.get("href"))
                .and_then(Value::as_str);
            match href {
                Some(href) => Mark::Link {
                    href: href.to_string(),
                },
                None => {
                    log::debug!("dropping link mark without href");
                    return None;
                }
            }
        }
        other => {
            log::debug!("dropping unsupported mark '{other}'");
            return None;
        }
    };
    Some(mark)
}

fn container(kind: &str, children: &[DocumentNode]) -> RawNode {
    RawNode {
        kind: kind.to_string(),
        content: children.iter().map(RawNode::from).collect(),
        ..RawNode::default()
    }
}

fn attrs<const N: usize>(pairs: [(&str, Value); N]) -> Option<Map<String, Value>> {
    Some(pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
}

impl From<&DocumentNode> for RawNode {
    fn from(node: &DocumentNode) -> Self {
        match node {
            DocumentNode::Heading { level, children } => RawNode {
                attrs: attrs([("level", Value::from(*level))]),
                ..container("heading", children)
            },
            DocumentNode::CodeBlock { language, code } => RawNode {
                kind: "codeBlock".to_string(),
                attrs: attrs([(
                    "language",
                    language.clone().map(Value::String).unwrap_or(Value::Null),
                )]),
                content: if code.is_empty() {
                    vec![]
                } else {
                    vec![RawNode::from(&DocumentNode::text(code.clone()))]
                },
                ..RawNode::default()
            },
            DocumentNode::Image { src, alt } => RawNode {
                kind: "image".to_string(),
                attrs: attrs([
                    ("src", Value::String(src.clone())),
                    ("alt", Value::String(alt.clone())),
                ]),
                ..RawNode::default()
            },
            DocumentNode::Text { text, marks } => RawNode {
                kind: "text".to_string(),
                text: Some(text.clone()),
                marks: marks.iter().map(RawMark::from).collect(),
                ..RawNode::default()
            },
            DocumentNode::HorizontalRule | DocumentNode::HardBreak => RawNode {
                kind: node.kind().to_string(),
                ..RawNode::default()
            },
            _ => container(node.kind(), node.children()),
        }
    }
}

impl From<&Mark> for RawMark {
    fn from(mark: &Mark) -> Self {
        RawMark {
            kind: mark.name().to_string(),
            attrs: match mark {
                Mark::Link { href } => attrs([("href", Value::String(href.clone()))]),
                _ => None,
            },
        }
    }
}

impl Serialize for DocumentNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RawNode::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DocumentNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawNode::deserialize(deserializer).map(DocumentNode::from)
    }
}
