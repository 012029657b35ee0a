//! Markdown format implementation
//!
//! This module implements bidirectional conversion between the editor document
//! tree and the Markdown dialect used for storage.
//!
//! # Element Mapping Table
//!
//! | Node             | Markdown                | Export Notes                        | Import Notes                          |
//! |------------------|-------------------------|-------------------------------------|---------------------------------------|
//! | paragraph        | Plain lines             | Direct mapping                      | Consecutive lines joined with a space |
//! | heading          | `#` .. `######`         | Level clamped to 1-6                | Level = number of `#`                 |
//! | bulletList       | `- item`                | One line per item                   | One single-item list per line         |
//! | orderedList      | `1. item`               | Numbered from 1                     | One single-item list per line         |
//! | blockquote       | `> text`                | Every line prefixed                 | Runs of quoted lines → paragraphs     |
//! | codeBlock        | Fenced ```` ``` ````    | Language → info string              | Content kept verbatim                 |
//! | horizontalRule   | `---`                   | Direct                              | `---` or `***`                        |
//! | image            | `![alt](src)`           | Only hosted http(s) sources         | Whole-line images only                |
//! | hardBreak        | Newline                 | Direct                              | Folded into the paragraph             |
//! | table            | Cell text, row per line | No pipe syntax                      | Not recognised                        |
//! | text marks:      |                         |                                     |                                       |
//! |   bold           | `**x**`                 |                                     |                                       |
//! |   italic         | `*x*`                   |                                     |                                       |
//! |   bold + italic  | `***x***`               |                                     |                                       |
//! |   strike         | `~~x~~`                 |                                     |                                       |
//! |   code           | `` `x` ``               |                                     |                                       |
//! |   link           | `[x](url)`              |                                     |                                       |
//!
//! # Lossy Conversions
//!
//! - Images with data URIs, relative or non-http sources are dropped on export.
//! - Consecutive list items come back as separate single-item lists.
//! - Nested marks come back as a single mark with the inner delimiters as text.
//! - Hard breaks and soft line breaks become spaces on import.
//! - Tables lose their structure.

pub mod inline;
pub mod parser;
pub mod serializer;

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::DocumentNode;
use serializer::SerializeOptions;
use std::collections::HashMap;

/// Format implementation for Markdown
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "Markdown storage format"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<DocumentNode, FormatError> {
        Ok(parser::parse_from_markdown(source))
    }

    fn serialize(&self, doc: &DocumentNode) -> Result<String, FormatError> {
        Ok(serializer::serialize_to_markdown(doc))
    }

    fn serialize_with_options(
        &self,
        doc: &DocumentNode,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let options = SerializeOptions::from_params(options)?;
        Ok(serializer::serialize_with_options(doc, &options))
    }
}
