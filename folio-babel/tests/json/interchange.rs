//! Interchange tests: editor JSON ↔ Markdown through the registry.

use folio_babel::ir::nodes::DocumentNode;
use folio_babel::{encode, validate, FormatError, FormatRegistry};
use insta::assert_snapshot;
use std::collections::HashMap;
use std::path::PathBuf;

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"))
}

fn editor_doc() -> DocumentNode {
    FormatRegistry::default()
        .parse(&fixture("kitchensink.json"), "json")
        .expect("Fixture should be valid JSON")
}

#[test]
fn test_editor_json_to_markdown() {
    // The pasted data-URI image is dropped, the unknown mark is dropped and
    // the unknown callout renders as its content.
    assert_snapshot!(encode(&editor_doc()), @r#"
## From the editor

Hello ***world***
next line

![Chart](https://cdn.example.com/chart.png)

- alpha
- beta

```sh
echo "*hi*"
```

boxed
"#);
}

#[test]
fn test_editor_json_validation_flags_unknown_kind() {
    let errors = validate(&editor_doc());
    let messages: Vec<_> = errors.iter().map(|e| e.to_string()).collect();
    assert_eq!(
        messages,
        vec!["6: unknown node kind 'callout' is rendered as plain content"]
    );
}

#[test]
fn test_unknown_kind_survives_json_round_trip() {
    let registry = FormatRegistry::default();
    let doc = editor_doc();
    let json = registry.serialize(&doc, "json").unwrap();
    assert!(json.contains("\"type\": \"callout\""));
    assert!(!json.contains("underline"));
    assert_eq!(registry.parse(&json, "json").unwrap(), doc);
}

#[test]
fn test_markdown_to_compact_json() {
    let registry = FormatRegistry::default();
    let doc = registry.parse("# Hi", "markdown").unwrap();

    let mut options = HashMap::new();
    options.insert("pretty".to_string(), "false".to_string());
    let json = registry
        .serialize_with_options(&doc, "json", &options)
        .unwrap();
    assert_eq!(
        json.trim_end(),
        r#"{"type":"doc","content":[{"type":"heading","attrs":{"level":1},"content":[{"type":"text","text":"Hi"}]}]}"#
    );
}

#[test]
fn test_malformed_editor_json_is_an_error() {
    let registry = FormatRegistry::default();
    match registry.parse("{\"type\": \"doc\", \"content\": [", "json") {
        Err(FormatError::ParseError(_)) => {}
        other => panic!("Expected parse error, got {other:?}"),
    }
}

#[test]
fn test_treeviz_is_output_only() {
    let registry = FormatRegistry::default();
    match registry.parse("anything", "treeviz") {
        Err(FormatError::NotSupported(_)) => {}
        other => panic!("Expected NotSupported, got {other:?}"),
    }
    let tree = registry.serialize(&editor_doc(), "treeviz").unwrap();
    assert!(tree.starts_with("⧉ Document (7 blocks)\n"));
}
