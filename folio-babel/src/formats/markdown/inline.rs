//! Inline marks: scanning text runs into marked leaves and rendering them back.
//!
//! Both directions read the same tables. [`DELIMITER_PRECEDENCE`] is the order
//! in which the scanner tries delimiters at each cursor position, and
//! [`MARK_RENDER_ORDER`] is the order in which the renderer wraps a leaf.
//!
//! Nesting is not supported. Once a delimiter pair is consumed its interior is
//! kept verbatim, so `**a *b* c**` yields one bold leaf with text `a *b* c`.

use crate::ir::nodes::{DocumentNode, Mark, MarkKind, MARK_RENDER_ORDER};

/// An inline delimiter recognised by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// `` `code` ``
    Code,
    /// `[text](url)`
    Link,
    /// `***text***`, bold and italic at once
    BoldItalic,
    /// `**text**`
    Bold,
    /// `*text*`
    Italic,
    /// `~~text~~`
    Strike,
}

/// Delimiters in the order they are tried; the first match wins.
pub const DELIMITER_PRECEDENCE: [Delimiter; 6] = [
    Delimiter::Code,
    Delimiter::Link,
    Delimiter::BoldItalic,
    Delimiter::Bold,
    Delimiter::Italic,
    Delimiter::Strike,
];

impl Delimiter {
    /// Opening and closing token for symmetric delimiters.
    fn token(self) -> Option<&'static str> {
        match self {
            Delimiter::Code => Some("`"),
            Delimiter::BoldItalic => Some("***"),
            Delimiter::Bold => Some("**"),
            Delimiter::Italic => Some("*"),
            Delimiter::Strike => Some("~~"),
            Delimiter::Link => None,
        }
    }

    fn marks(self) -> Vec<Mark> {
        match self {
            Delimiter::Code => vec![Mark::Code],
            Delimiter::BoldItalic => vec![Mark::Bold, Mark::Italic],
            Delimiter::Bold => vec![Mark::Bold],
            Delimiter::Italic => vec![Mark::Italic],
            Delimiter::Strike => vec![Mark::Strike],
            Delimiter::Link => vec![],
        }
    }

    /// Try to consume a complete span at the start of `rest`.
    ///
    /// Returns the leaf and the number of bytes consumed.
    fn match_at(self, rest: &str) -> Option<(DocumentNode, usize)> {
        match self {
            Delimiter::Link => match_link(rest),
            Delimiter::Italic if rest.starts_with("**") => None,
            _ => {
                let token = self.token()?;
                let inner = rest.strip_prefix(token)?;
                let end = inner.find(token)?;
                if end == 0 {
                    return None;
                }
                let node = DocumentNode::marked_text(&inner[..end], self.marks());
                Some((node, token.len() * 2 + end))
            }
        }
    }
}

fn match_link(rest: &str) -> Option<(DocumentNode, usize)> {
    let inner = rest.strip_prefix('[')?;
    let text_end = inner.find(']')?;
    let text = &inner[..text_end];
    let target = inner[text_end + 1..].strip_prefix('(')?;
    let href_end = target.find(')')?;
    let href = &target[..href_end];
    if text.is_empty() || href.is_empty() {
        return None;
    }
    let node = DocumentNode::marked_text(
        text,
        vec![Mark::Link {
            href: href.to_string(),
        }],
    );
    // '[' + text + "](" + href + ')'
    Some((node, text.len() + href.len() + 4))
}

/// Scan a flat run of text into marked leaves.
///
/// Never fails: an opener without a matching closer is kept as literal text.
pub fn parse_inline(source: &str) -> Vec<DocumentNode> {
    let mut nodes = Vec::new();
    let mut plain = String::new();
    let mut cursor = 0;

    while cursor < source.len() {
        let rest = &source[cursor..];
        let span = DELIMITER_PRECEDENCE
            .iter()
            .find_map(|delimiter| delimiter.match_at(rest));

        if let Some((node, consumed)) = span {
            if !plain.is_empty() {
                nodes.push(DocumentNode::text(std::mem::take(&mut plain)));
            }
            nodes.push(node);
            cursor += consumed;
            continue;
        }

        let Some(ch) = rest.chars().next() else {
            break;
        };
        plain.push(ch);
        cursor += ch.len_utf8();
    }

    if !plain.is_empty() {
        nodes.push(DocumentNode::text(plain));
    }
    nodes
}

/// Render one text leaf, wrapping it in its marks from innermost to outermost.
pub fn render_text(text: &str, marks: &[Mark]) -> String {
    if text.is_empty() {
        return String::new();
    }
    let mut out = text.to_string();
    for kind in MARK_RENDER_ORDER {
        if let Some(mark) = marks.iter().find(|mark| mark.kind() == kind) {
            out = wrap(mark, &out);
        }
    }
    out
}

fn wrap(mark: &Mark, inner: &str) -> String {
    let delimiter = match mark.kind() {
        MarkKind::Code => Delimiter::Code,
        MarkKind::Bold => Delimiter::Bold,
        MarkKind::Italic => Delimiter::Italic,
        MarkKind::Strike => Delimiter::Strike,
        MarkKind::Link => {
            let href = match mark {
                Mark::Link { href } => href.as_str(),
                _ => "",
            };
            return format!("[{inner}]({href})");
        }
    };
    let token = delimiter.token().unwrap_or_default();
    format!("{token}{inner}{token}")
}
