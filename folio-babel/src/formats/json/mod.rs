//! JSON format: the editor's own document shape.
//!
//! Unlike Markdown, JSON has a strict grammar, so malformed input is reported
//! as a [`FormatError::ParseError`]. Once the input is a well-formed node
//! object, field-level oddities are normalized (see [`crate::ir::wire`]).

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::DocumentNode;
use std::collections::HashMap;

/// Format implementation for editor JSON
pub struct JsonFormat;

impl JsonFormat {
    fn to_json(doc: &DocumentNode, pretty: bool) -> Result<String, FormatError> {
        let mut text = if pretty {
            serde_json::to_string_pretty(doc)?
        } else {
            serde_json::to_string(doc)?
        };
        text.push('\n');
        Ok(text)
    }
}

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Editor document tree as JSON"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<DocumentNode, FormatError> {
        Ok(serde_json::from_str(source)?)
    }

    fn serialize(&self, doc: &DocumentNode) -> Result<String, FormatError> {
        Self::to_json(doc, true)
    }

    fn serialize_with_options(
        &self,
        doc: &DocumentNode,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let mut pretty = true;
        for (key, value) in options {
            match key.as_str() {
                "pretty" => pretty = value.to_lowercase() != "false",
                other => {
                    return Err(FormatError::NotSupported(format!(
                        "Format 'json' does not support parameter '{other}'"
                    )))
                }
            }
        }
        Self::to_json(doc, pretty)
    }
}
