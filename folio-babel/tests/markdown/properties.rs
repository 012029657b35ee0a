//! Property tests for the Markdown codec.

use folio_babel::formats::markdown::inline::parse_inline;
use folio_babel::ir::nodes::DocumentNode;
use folio_babel::{decode, encode};
use proptest::prelude::*;

/// Lines built from the characters the decoder cares about.
fn markdownish_line() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("#".to_string()),
            Just("> ".to_string()),
            Just("- ".to_string()),
            Just("1. ".to_string()),
            Just("```".to_string()),
            Just("---".to_string()),
            Just("*".to_string()),
            Just("**".to_string()),
            Just("~~".to_string()),
            Just("`".to_string()),
            Just("[a](b)".to_string()),
            Just("![".to_string()),
            Just(" ".to_string()),
            "[a-zé]{1,4}",
        ],
        0..8,
    )
    .prop_map(|parts| parts.concat())
}

fn markdownish_document() -> impl Strategy<Value = String> {
    prop::collection::vec(markdownish_line(), 0..12).prop_map(|lines| lines.join("\n"))
}

proptest! {
    #[test]
    fn test_decode_always_returns_a_non_empty_doc(source in markdownish_document()) {
        let doc = decode(&source);
        match &doc {
            DocumentNode::Doc { children } => prop_assert!(!children.is_empty()),
            other => prop_assert!(false, "Expected doc, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_never_panics_on_arbitrary_text(source in any::<String>()) {
        let _ = encode(&decode(&source));
    }

    #[test]
    fn test_delimiter_free_text_is_kept_verbatim(text in "[a-zA-Z0-9 ,.!?é]{1,40}") {
        let leaves = parse_inline(&text);
        prop_assert_eq!(leaves, vec![DocumentNode::text(text.clone())]);
    }
}
