//! Export tests for Markdown format (document tree → Markdown)
//!
//! These tests verify that encoded documents read back as the intended
//! structure by an independent CommonMark parser (Comrak), not only by our
//! own decoder.

use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{parse_document, Arena, Options};
use folio_babel::ir::nodes::{DocumentNode, Mark};
use folio_babel::encode;

/// Helper to encode a tree and parse the Markdown with Comrak
fn encode_to_comrak_ast<'a>(doc: &DocumentNode, arena: &'a Arena<AstNode<'a>>) -> &'a AstNode<'a> {
    let md = encode(doc);
    let mut options = Options::default();
    options.extension.strikethrough = true;
    parse_document(arena, &md, &options)
}

fn collect_text<'a>(node: &'a AstNode<'a>, out: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(text) => out.push_str(text),
        NodeValue::Code(code) => out.push_str(&code.literal),
        _ => {}
    }
    for child in node.children() {
        collect_text(child, out);
    }
}

fn para(text: &str) -> DocumentNode {
    DocumentNode::paragraph(vec![DocumentNode::text(text)])
}

fn item(text: &str) -> DocumentNode {
    DocumentNode::list_item(vec![para(text)])
}

#[test]
fn test_paragraph_simple() {
    let doc = DocumentNode::doc(vec![para("This is a simple paragraph.")]);

    let arena = Arena::new();
    let root = encode_to_comrak_ast(&doc, &arena);

    let children: Vec<_> = root.children().collect();
    assert_eq!(children.len(), 1);
    assert!(matches!(
        children[0].data.borrow().value,
        NodeValue::Paragraph
    ));
}

#[test]
fn test_heading_levels_and_separation() {
    let doc = DocumentNode::doc(vec![
        DocumentNode::heading(3, vec![DocumentNode::text("Title")]),
        para("Body text."),
    ]);

    let arena = Arena::new();
    let root = encode_to_comrak_ast(&doc, &arena);

    let mut heading_text = String::new();
    let mut paragraph_text = String::new();
    let mut heading_level = 0;

    for child in root.children() {
        match &child.data.borrow().value {
            NodeValue::Heading(heading) => {
                heading_level = heading.level;
                collect_text(child, &mut heading_text);
            }
            NodeValue::Paragraph => collect_text(child, &mut paragraph_text),
            _ => {}
        }
    }

    assert_eq!(heading_level, 3);
    assert_eq!(heading_text, "Title");
    assert_eq!(paragraph_text, "Body text.");
}

#[test]
fn test_lists() {
    let doc = DocumentNode::doc(vec![
        DocumentNode::BulletList {
            children: vec![item("a"), item("b")],
        },
        DocumentNode::OrderedList {
            children: vec![item("one"), item("two"), item("three")],
        },
    ]);

    let arena = Arena::new();
    let root = encode_to_comrak_ast(&doc, &arena);

    let lists: Vec<_> = root
        .children()
        .filter_map(|child| match &child.data.borrow().value {
            NodeValue::List(list) => Some((list.list_type, child.children().count())),
            _ => None,
        })
        .collect();

    assert_eq!(lists.len(), 2);
    assert_eq!(lists[0].0, ListType::Bullet);
    assert_eq!(lists[0].1, 2);
    assert_eq!(lists[1].0, ListType::Ordered);
    assert_eq!(lists[1].1, 3);
}

#[test]
fn test_nested_list_stays_inside_item() {
    let doc = DocumentNode::doc(vec![DocumentNode::BulletList {
        children: vec![DocumentNode::list_item(vec![
            para("outer"),
            DocumentNode::OrderedList {
                children: vec![item("inner")],
            },
        ])],
    }]);

    let arena = Arena::new();
    let root = encode_to_comrak_ast(&doc, &arena);

    let outer_list = root.first_child().expect("Should have a list");
    let outer_item = outer_list.first_child().expect("Should have an item");
    let nested = outer_item
        .children()
        .any(|child| matches!(child.data.borrow().value, NodeValue::List(_)));
    assert!(nested, "Inner list should be a child of the outer item");
}

#[test]
fn test_marks_map_to_inline_nodes() {
    let doc = DocumentNode::doc(vec![DocumentNode::paragraph(vec![
        DocumentNode::marked_text("both", vec![Mark::Bold, Mark::Italic]),
        DocumentNode::text(" "),
        DocumentNode::marked_text("gone", vec![Mark::Strike]),
        DocumentNode::text(" "),
        DocumentNode::marked_text("x + 1", vec![Mark::Code]),
        DocumentNode::text(" "),
        DocumentNode::marked_text(
            "docs",
            vec![Mark::Link {
                href: "https://example.com/docs".to_string(),
            }],
        ),
    ])]);

    let arena = Arena::new();
    let root = encode_to_comrak_ast(&doc, &arena);

    let mut found = Vec::new();
    for node in root.descendants() {
        match &node.data.borrow().value {
            NodeValue::Strong => found.push("strong".to_string()),
            NodeValue::Emph => found.push("emph".to_string()),
            NodeValue::Strikethrough => found.push("strike".to_string()),
            NodeValue::Code(code) => found.push(format!("code:{}", code.literal)),
            NodeValue::Link(link) => found.push(format!("link:{}", link.url)),
            _ => {}
        }
    }

    for expected in [
        "strong",
        "emph",
        "strike",
        "code:x + 1",
        "link:https://example.com/docs",
    ] {
        assert!(
            found.iter().any(|f| f == expected),
            "Missing {expected} in {found:?}"
        );
    }
}

#[test]
fn test_code_block_is_fenced_and_literal() {
    let code = "fn main() {\n    let x = **y**;\n}";
    let doc = DocumentNode::doc(vec![DocumentNode::code_block(Some("rust"), code)]);

    let arena = Arena::new();
    let root = encode_to_comrak_ast(&doc, &arena);

    let block = root.first_child().expect("Should have a code block");
    match &block.data.borrow().value {
        NodeValue::CodeBlock(block) => {
            assert!(block.fenced);
            assert_eq!(block.info, "rust");
            assert_eq!(block.literal, format!("{code}\n"));
        }
        other => panic!("Expected code block, got {other:?}"),
    };
}

#[test]
fn test_blockquote_keeps_paragraphs() {
    let doc = DocumentNode::doc(vec![DocumentNode::Blockquote {
        children: vec![para("first"), para("second")],
    }]);

    let arena = Arena::new();
    let root = encode_to_comrak_ast(&doc, &arena);

    let quote = root.first_child().expect("Should have a blockquote");
    assert!(matches!(quote.data.borrow().value, NodeValue::BlockQuote));
    let paragraphs = quote
        .children()
        .filter(|child| matches!(child.data.borrow().value, NodeValue::Paragraph))
        .count();
    assert_eq!(paragraphs, 2);
}

#[test]
fn test_hosted_image_and_rule() {
    let doc = DocumentNode::doc(vec![
        DocumentNode::image("https://cdn.example.com/a.png", "A"),
        DocumentNode::HorizontalRule,
        DocumentNode::image("data:image/png;base64,AAAA", "inline"),
    ]);

    let arena = Arena::new();
    let root = encode_to_comrak_ast(&doc, &arena);

    let mut images = Vec::new();
    let mut rules = 0;
    for node in root.descendants() {
        match &node.data.borrow().value {
            NodeValue::Image(link) => images.push(link.url.clone()),
            NodeValue::ThematicBreak => rules += 1,
            _ => {}
        }
    }
    assert_eq!(images, vec!["https://cdn.example.com/a.png"]);
    assert_eq!(rules, 1);
}
