//! Import tests for Markdown format (Markdown → document tree)
//!
//! Stored documents come from older records as well as from the editor, so
//! these focus on what real content looks like: mixed blocks, sloppy spacing
//! and shapes the dialect does not know.

use folio_babel::format::Format;
use folio_babel::formats::markdown::MarkdownFormat;
use folio_babel::ir::nodes::{DocumentNode, Mark};
use folio_babel::{decode, validate};

fn blocks(md: &str) -> Vec<DocumentNode> {
    match MarkdownFormat.parse(md).expect("Markdown parsing never fails") {
        DocumentNode::Doc { children } => children,
        other => panic!("Expected doc, got {other:?}"),
    }
}

fn para(text: &str) -> DocumentNode {
    DocumentNode::paragraph(vec![DocumentNode::text(text)])
}

#[test]
fn test_mixed_document() {
    let md = "# Notes\n\nSome *context* here.\n\n- one\n- two\n\n```\ncode\n```\n";
    let children = blocks(md);

    let kinds: Vec<_> = children.iter().map(|node| node.kind().to_string()).collect();
    assert_eq!(
        kinds,
        vec!["heading", "paragraph", "bulletList", "bulletList", "codeBlock"]
    );
    assert_eq!(
        children[1],
        DocumentNode::paragraph(vec![
            DocumentNode::text("Some "),
            DocumentNode::marked_text("context", vec![Mark::Italic]),
            DocumentNode::text(" here."),
        ])
    );
}

#[test]
fn test_decoded_documents_validate() {
    let md = "## A\n\ntext\n\n> quote\n\n1. item\n\n---\n\n![x](https://h.io/x.png)";
    assert!(validate(&decode(md)).is_empty());
}

#[test]
fn test_unknown_syntax_is_paragraph_text() {
    assert_eq!(
        blocks("| a | b |\n|---|---|\n| 1 | 2 |"),
        vec![para("| a | b | |---|---| | 1 | 2 |")]
    );
    assert_eq!(blocks("Title\n==="), vec![para("Title ===")]);
}

#[test]
fn test_indented_list_line_is_paragraph() {
    assert_eq!(blocks("  - indented"), vec![para("- indented")]);
}

#[test]
fn test_inline_image_reads_as_link() {
    // Only whole-line images are blocks; inside text the brackets are a link.
    assert_eq!(
        blocks("see ![x](https://h.io/x.png) here"),
        vec![DocumentNode::paragraph(vec![
            DocumentNode::text("see !"),
            DocumentNode::marked_text(
                "x",
                vec![Mark::Link {
                    href: "https://h.io/x.png".to_string(),
                }],
            ),
            DocumentNode::text(" here"),
        ])]
    );
}

#[test]
fn test_link_in_list_item() {
    let children = blocks("- read [the docs](https://example.com)");
    let expected = DocumentNode::BulletList {
        children: vec![DocumentNode::list_item(vec![DocumentNode::paragraph(
            vec![
                DocumentNode::text("read "),
                DocumentNode::marked_text(
                    "the docs",
                    vec![Mark::Link {
                        href: "https://example.com".to_string(),
                    }],
                ),
            ],
        )])],
    };
    assert_eq!(children, vec![expected]);
}

#[test]
fn test_quote_ends_at_first_unquoted_line() {
    let children = blocks("> a\nb");
    assert_eq!(
        children,
        vec![
            DocumentNode::Blockquote {
                children: vec![para("a")]
            },
            para("b"),
        ]
    );
}
