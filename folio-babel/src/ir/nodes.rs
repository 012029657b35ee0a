//! Core data structures for the editor document tree.

/// A node in the editor's structured document.
///
/// Container variants own their children; `Text` is always a leaf. Kinds the
/// codec does not know about (for example table rows coming from the editor)
/// are carried as [`DocumentNode::Unknown`] so they can still be rendered
/// through their children.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentNode {
    Doc { children: Vec<DocumentNode> },
    Paragraph { children: Vec<DocumentNode> },
    Heading { level: u8, children: Vec<DocumentNode> },
    BulletList { children: Vec<DocumentNode> },
    OrderedList { children: Vec<DocumentNode> },
    ListItem { children: Vec<DocumentNode> },
    Blockquote { children: Vec<DocumentNode> },
    CodeBlock { language: Option<String>, code: String },
    HorizontalRule,
    Image { src: String, alt: String },
    HardBreak,
    Text { text: String, marks: Vec<Mark> },
    Table { children: Vec<DocumentNode> },
    Unknown { kind: String, children: Vec<DocumentNode> },
}

/// An inline annotation applied to a text leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mark {
    Bold,
    Italic,
    Code,
    Strike,
    Link { href: String },
}

/// Discriminant of a [`Mark`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkKind {
    Bold,
    Italic,
    Code,
    Strike,
    Link,
}

/// Order in which marks wrap a text leaf when rendered, innermost first.
pub const MARK_RENDER_ORDER: [MarkKind; 5] = [
    MarkKind::Code,
    MarkKind::Bold,
    MarkKind::Italic,
    MarkKind::Strike,
    MarkKind::Link,
];

/// Smallest and largest heading level.
pub const HEADING_LEVELS: std::ops::RangeInclusive<u8> = 1..=6;

impl Mark {
    pub fn kind(&self) -> MarkKind {
        match self {
            Mark::Bold => MarkKind::Bold,
            Mark::Italic => MarkKind::Italic,
            Mark::Code => MarkKind::Code,
            Mark::Strike => MarkKind::Strike,
            Mark::Link { .. } => MarkKind::Link,
        }
    }

    /// Wire name used by the editor.
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }
}

impl MarkKind {
    pub fn name(self) -> &'static str {
        match self {
            MarkKind::Bold => "bold",
            MarkKind::Italic => "italic",
            MarkKind::Code => "code",
            MarkKind::Strike => "strike",
            MarkKind::Link => "link",
        }
    }
}

impl DocumentNode {
    /// Wire name of this node's kind (`"bulletList"`, `"codeBlock"`, ...).
    pub fn kind(&self) -> &str {
        match self {
            DocumentNode::Doc { .. } => "doc",
            DocumentNode::Paragraph { .. } => "paragraph",
            DocumentNode::Heading { .. } => "heading",
            DocumentNode::BulletList { .. } => "bulletList",
            DocumentNode::OrderedList { .. } => "orderedList",
            DocumentNode::ListItem { .. } => "listItem",
            DocumentNode::Blockquote { .. } => "blockquote",
            DocumentNode::CodeBlock { .. } => "codeBlock",
            DocumentNode::HorizontalRule => "horizontalRule",
            DocumentNode::Image { .. } => "image",
            DocumentNode::HardBreak => "hardBreak",
            DocumentNode::Text { .. } => "text",
            DocumentNode::Table { .. } => "table",
            DocumentNode::Unknown { kind, .. } => kind,
        }
    }

    /// Children of a container node; empty for leaves.
    pub fn children(&self) -> &[DocumentNode] {
        match self {
            DocumentNode::Doc { children }
            | DocumentNode::Paragraph { children }
            | DocumentNode::Heading { children, .. }
            | DocumentNode::BulletList { children }
            | DocumentNode::OrderedList { children }
            | DocumentNode::ListItem { children }
            | DocumentNode::Blockquote { children }
            | DocumentNode::Table { children }
            | DocumentNode::Unknown { children, .. } => children,
            DocumentNode::CodeBlock { .. }
            | DocumentNode::HorizontalRule
            | DocumentNode::Image { .. }
            | DocumentNode::HardBreak
            | DocumentNode::Text { .. } => &[],
        }
    }

    /// Whether this kind may appear directly under a `doc` node.
    pub fn is_block(&self) -> bool {
        !matches!(
            self,
            DocumentNode::Doc { .. }
                | DocumentNode::Text { .. }
                | DocumentNode::HardBreak
                | DocumentNode::ListItem { .. }
        )
    }

    /// Concatenated text of every leaf below this node, marks ignored.
    ///
    /// Code blocks contribute their literal; hard breaks contribute a newline.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            DocumentNode::Text { text, .. } => out.push_str(text),
            DocumentNode::CodeBlock { code, .. } => out.push_str(code),
            DocumentNode::HardBreak => out.push('\n'),
            _ => {
                for child in self.children() {
                    child.collect_text(out);
                }
            }
        }
    }

    pub fn doc(children: Vec<DocumentNode>) -> Self {
        DocumentNode::Doc { children }
    }

    /// The smallest valid document: one empty paragraph.
    pub fn empty_doc() -> Self {
        DocumentNode::Doc {
            children: vec![DocumentNode::Paragraph { children: vec![] }],
        }
    }

    pub fn paragraph(children: Vec<DocumentNode>) -> Self {
        DocumentNode::Paragraph { children }
    }

    pub fn heading(level: u8, children: Vec<DocumentNode>) -> Self {
        DocumentNode::Heading {
            level: clamp_heading_level(i64::from(level)),
            children,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        DocumentNode::Text {
            text: text.into(),
            marks: vec![],
        }
    }

    pub fn marked_text(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        DocumentNode::Text {
            text: text.into(),
            marks,
        }
    }

    pub fn list_item(children: Vec<DocumentNode>) -> Self {
        DocumentNode::ListItem { children }
    }

    pub fn code_block(language: Option<&str>, code: impl Into<String>) -> Self {
        DocumentNode::CodeBlock {
            language: language.map(str::to_string),
            code: code.into(),
        }
    }

    pub fn image(src: impl Into<String>, alt: impl Into<String>) -> Self {
        DocumentNode::Image {
            src: src.into(),
            alt: alt.into(),
        }
    }
}

/// Clamp an arbitrary level into the valid heading range.
pub fn clamp_heading_level(level: i64) -> u8 {
    let (min, max) = (*HEADING_LEVELS.start(), *HEADING_LEVELS.end());
    level.clamp(i64::from(min), i64::from(max)) as u8
}
