//! Kitchensink document: every construct of the dialect in one file.

use folio_babel::{decode, encode, validate};
use insta::assert_snapshot;
use std::path::PathBuf;

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"))
}

#[test]
fn test_kitchensink_reencodes_canonically() {
    let doc = decode(&fixture("kitchensink.md"));
    assert!(validate(&doc).is_empty());

    // Lists come back one item per list, and quote lines are rejoined.
    assert_snapshot!(encode(&doc), @r#"
# Folio kitchensink

Intro with **bold**, *italic*, ~~struck~~, `code` and a [link](https://example.com). Second line of the same paragraph.

## Lists

- first bullet

- second bullet

1. ordered one

1. ordered two

> quoted line continues
>
> second quote paragraph

```rust
fn main() {
    println!("**not bold**");
}
```

---

![Logo](https://cdn.example.com/logo.png)

###### Deepest heading
"#);
}

#[test]
fn test_kitchensink_is_a_fixpoint_after_one_pass() {
    let once = decode(&fixture("kitchensink.md"));
    let twice = decode(&encode(&once));
    assert_eq!(once, twice);
}

#[test]
fn test_kitchensink_block_kinds() {
    let doc = decode(&fixture("kitchensink.md"));
    let kinds: Vec<_> = doc
        .children()
        .iter()
        .map(|node| node.kind().to_string())
        .collect();
    assert_eq!(
        kinds,
        vec![
            "heading",
            "paragraph",
            "heading",
            "bulletList",
            "bulletList",
            "orderedList",
            "orderedList",
            "blockquote",
            "codeBlock",
            "horizontalRule",
            "image",
            "heading",
        ]
    );
}
