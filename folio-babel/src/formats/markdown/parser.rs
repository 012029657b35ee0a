//! Markdown parsing (Markdown → document tree)
//!
//! A line-oriented state machine. Each line is classified by its prefix and
//! either appended to one of two buffers (paragraph lines, quote lines) or
//! emitted directly as a block. Buffers are flushed when a line of another
//! kind arrives and at end of input. Text content goes through the inline
//! scanner; code block content never does.
//!
//! | state      | line                      | effect                                  |
//! |------------|---------------------------|-----------------------------------------|
//! | Normal     | ```` ```lang ````         | flush paragraph and quote, open code    |
//! | CodeBlock  | ```` ``` ````             | emit code block                         |
//! | CodeBlock  | anything else             | append raw line                         |
//! | Normal     | `---` or `***`            | emit horizontal rule                    |
//! | Normal     | `#`..`######` + space     | emit heading                            |
//! | Normal     | `>` ...                   | accumulate quote line                   |
//! | Normal     | `- x` / `* x`             | emit a one-item bullet list             |
//! | Normal     | `1. x`                    | emit a one-item ordered list            |
//! | Normal     | `![alt](src)`             | emit image                              |
//! | Normal     | blank                     | flush paragraph                         |
//! | Normal     | anything else             | accumulate paragraph line               |
//!
//! A pending quote is flushed as soon as a line not starting with `>` shows up.
//!
//! Consecutive list lines are deliberately not merged: `- a\n- b` yields two
//! sibling lists of one item each. Stored content depends on this shape.

use super::inline::parse_inline;
use crate::ir::nodes::DocumentNode;
use once_cell::sync::Lazy;
use regex::Regex;

const FENCE: &str = "```";

static HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").expect("heading pattern is valid"));
static BULLET_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-*]\s+(.+)$").expect("bullet pattern is valid"));
static ORDERED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\s+(.+)$").expect("ordered pattern is valid"));
static IMAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^!\[([^\]]*)\]\(([^)]+)\)$").expect("image pattern is valid")
});

/// Parse Markdown into a `doc` node.
///
/// Never fails. Input without any content yields a document holding a single
/// empty paragraph.
pub fn parse_from_markdown(source: &str) -> DocumentNode {
    let mut decoder = Decoder::default();
    for line in source.lines() {
        decoder.feed(line);
    }
    decoder.finish()
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Normal,
    CodeBlock {
        language: Option<String>,
        lines: Vec<String>,
    },
}

#[derive(Debug, Default)]
struct Decoder {
    state: State,
    blocks: Vec<DocumentNode>,
    paragraph: Vec<String>,
    quote: Vec<String>,
}

impl Decoder {
    fn feed(&mut self, line: &str) {
        self.state = match std::mem::take(&mut self.state) {
            State::CodeBlock {
                language,
                mut lines,
            } => {
                if line.starts_with(FENCE) {
                    log::trace!("closing code block after {} lines", lines.len());
                    self.blocks.push(DocumentNode::CodeBlock {
                        language,
                        code: lines.join("\n"),
                    });
                    State::Normal
                } else {
                    lines.push(line.to_string());
                    State::CodeBlock { language, lines }
                }
            }
            State::Normal => self.normal_line(line),
        };
    }

    fn normal_line(&mut self, line: &str) -> State {
        if !self.quote.is_empty() && !line.starts_with('>') {
            self.flush_quote();
        }

        if let Some(info) = line.strip_prefix(FENCE) {
            self.flush_pending();
            let language = Some(info.trim())
                .filter(|lang| !lang.is_empty())
                .map(str::to_string);
            log::trace!("opening code block (language: {language:?})");
            return State::CodeBlock {
                language,
                lines: Vec::new(),
            };
        }

        if line == "---" || line == "***" {
            self.flush_paragraph();
            self.blocks.push(DocumentNode::HorizontalRule);
        } else if let Some(caps) = HEADING.captures(line) {
            self.flush_pending();
            let level = caps[1].len() as u8;
            self.blocks
                .push(DocumentNode::heading(level, parse_inline(caps[2].trim())));
        } else if let Some(rest) = line.strip_prefix('>') {
            self.flush_paragraph();
            let rest = rest.strip_prefix(' ').unwrap_or(rest);
            self.quote.push(rest.to_string());
        } else if let Some(caps) = BULLET_ITEM.captures(line) {
            self.flush_pending();
            self.blocks.push(DocumentNode::BulletList {
                children: vec![single_item(caps[1].trim())],
            });
        } else if let Some(caps) = ORDERED_ITEM.captures(line) {
            self.flush_pending();
            self.blocks.push(DocumentNode::OrderedList {
                children: vec![single_item(caps[1].trim())],
            });
        } else if let Some(caps) = IMAGE.captures(line) {
            self.flush_pending();
            self.blocks.push(DocumentNode::image(&caps[2], &caps[1]));
        } else if line.trim().is_empty() {
            self.flush_paragraph();
        } else {
            self.paragraph.push(line.trim().to_string());
        }
        State::Normal
    }

    fn flush_pending(&mut self) {
        self.flush_paragraph();
        self.flush_quote();
    }

    fn flush_paragraph(&mut self) {
        if self.paragraph.is_empty() {
            return;
        }
        let text = self.paragraph.join(" ");
        self.paragraph.clear();
        self.blocks.push(DocumentNode::paragraph(parse_inline(&text)));
    }

    /// Emit the quote buffer as a blockquote, one paragraph per run of
    /// non-blank lines.
    fn flush_quote(&mut self) {
        if self.quote.is_empty() {
            return;
        }
        let lines = std::mem::take(&mut self.quote);
        let mut children: Vec<DocumentNode> = lines
            .split(|line| line.trim().is_empty())
            .filter(|run| !run.is_empty())
            .map(|run| {
                let text = run
                    .iter()
                    .map(|line| line.trim())
                    .collect::<Vec<_>>()
                    .join(" ");
                DocumentNode::paragraph(parse_inline(&text))
            })
            .collect();
        if children.is_empty() {
            children.push(DocumentNode::paragraph(vec![]));
        }
        self.blocks.push(DocumentNode::Blockquote { children });
    }

    fn finish(mut self) -> DocumentNode {
        self.flush_paragraph();
        if let State::CodeBlock { language, lines } = std::mem::take(&mut self.state) {
            log::trace!("closing unterminated code block at end of input");
            self.blocks.push(DocumentNode::CodeBlock {
                language,
                code: lines.join("\n"),
            });
        }
        self.flush_quote();

        if self.blocks.is_empty() {
            DocumentNode::empty_doc()
        } else {
            DocumentNode::doc(self.blocks)
        }
    }
}

fn single_item(text: &str) -> DocumentNode {
    DocumentNode::list_item(vec![DocumentNode::paragraph(parse_inline(text))])
}
