//! Structural checks over a document tree.
//!
//! The codec accepts any tree and degrades quietly. Callers that want to know
//! whether a tree is well formed (an import job, the `folio validate` command)
//! run [`validate`] on it explicitly.

use super::nodes::{DocumentNode, HEADING_LEVELS};
use std::fmt;

/// A single structural problem, located by the index path from the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub path: Vec<usize>,
    pub kind: ViolationKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// The root node is not a `doc`.
    RootNotDoc(String),
    /// A `doc` appears below the root.
    NestedDoc,
    /// A node that is not block-level sits directly under `doc`.
    InlineAtDocLevel(String),
    /// A list holds something other than `listItem`.
    NonItemInList(String),
    /// A heading level outside 1..=6.
    HeadingLevelOutOfRange(u8),
    /// A kind the codec renders only through its children.
    UnknownKind(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self
            .path
            .iter()
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(".");
        let path = if path.is_empty() { "root" } else { path.as_str() };
        match &self.kind {
            ViolationKind::RootNotDoc(kind) => {
                write!(f, "{path}: root node is '{kind}', expected 'doc'")
            }
            ViolationKind::NestedDoc => write!(f, "{path}: 'doc' nested inside another node"),
            ViolationKind::InlineAtDocLevel(kind) => {
                write!(f, "{path}: '{kind}' is not allowed directly under 'doc'")
            }
            ViolationKind::NonItemInList(kind) => {
                write!(f, "{path}: lists may only contain 'listItem', found '{kind}'")
            }
            ViolationKind::HeadingLevelOutOfRange(level) => {
                write!(f, "{path}: heading level {level} is outside 1..=6")
            }
            ViolationKind::UnknownKind(kind) => {
                write!(f, "{path}: unknown node kind '{kind}' is rendered as plain content")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check a document tree. An empty result means the tree is well formed.
pub fn validate(root: &DocumentNode) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut path = Vec::new();

    if !matches!(root, DocumentNode::Doc { .. }) {
        errors.push(ValidationError {
            path: vec![],
            kind: ViolationKind::RootNotDoc(root.kind().to_string()),
        });
    }
    visit(root, &mut path, &mut errors);
    errors
}

fn visit(node: &DocumentNode, path: &mut Vec<usize>, errors: &mut Vec<ValidationError>) {
    match node {
        DocumentNode::Doc { .. } if !path.is_empty() => {
            report(errors, path, ViolationKind::NestedDoc)
        }
        DocumentNode::Heading { level, .. } if !HEADING_LEVELS.contains(level) => {
            report(errors, path, ViolationKind::HeadingLevelOutOfRange(*level))
        }
        DocumentNode::Unknown { kind, .. } => {
            report(errors, path, ViolationKind::UnknownKind(kind.clone()))
        }
        _ => {}
    }

    for (index, child) in node.children().iter().enumerate() {
        path.push(index);
        match node {
            DocumentNode::Doc { .. } if !child.is_block() => {
                report(errors, path, ViolationKind::InlineAtDocLevel(child.kind().to_string()))
            }
            DocumentNode::BulletList { .. } | DocumentNode::OrderedList { .. }
                if !matches!(child, DocumentNode::ListItem { .. }) =>
            {
                report(errors, path, ViolationKind::NonItemInList(child.kind().to_string()))
            }
            _ => {}
        }
        visit(child, path, errors);
        path.pop();
    }
}

fn report(errors: &mut Vec<ValidationError>, path: &[usize], kind: ViolationKind) {
    errors.push(ValidationError {
        path: path.to_vec(),
        kind,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_document_has_no_errors() {
        let doc = DocumentNode::doc(vec![
            DocumentNode::heading(2, vec![DocumentNode::text("Title")]),
            DocumentNode::BulletList {
                children: vec![DocumentNode::list_item(vec![DocumentNode::paragraph(vec![
                    DocumentNode::text("item"),
                ])])],
            },
        ]);
        assert!(validate(&doc).is_empty());
    }

    #[test]
    fn test_bare_text_under_doc() {
        let doc = DocumentNode::doc(vec![DocumentNode::text("loose")]);
        let errors = validate(&doc);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, vec![0]);
        assert_eq!(
            errors[0].kind,
            ViolationKind::InlineAtDocLevel("text".to_string())
        );
    }

    #[test]
    fn test_heading_level_built_by_hand() {
        let doc = DocumentNode::doc(vec![DocumentNode::Heading {
            level: 0,
            children: vec![],
        }]);
        let errors = validate(&doc);
        assert_eq!(errors[0].kind, ViolationKind::HeadingLevelOutOfRange(0));
        assert_eq!(errors[0].to_string(), "0: heading level 0 is outside 1..=6");
    }

    #[test]
    fn test_list_with_paragraph_child() {
        let doc = DocumentNode::doc(vec![DocumentNode::OrderedList {
            children: vec![DocumentNode::paragraph(vec![])],
        }]);
        let errors = validate(&doc);
        assert_eq!(
            errors,
            vec![ValidationError {
                path: vec![0, 0],
                kind: ViolationKind::NonItemInList("paragraph".to_string()),
            }]
        );
    }

    #[test]
    fn test_root_and_nested_doc() {
        let para = DocumentNode::paragraph(vec![DocumentNode::doc(vec![])]);
        let errors = validate(&para);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].to_string(), "root: root node is 'paragraph', expected 'doc'");
        assert_eq!(errors[1].kind, ViolationKind::NestedDoc);
    }

    #[test]
    fn test_unknown_kind_is_reported() {
        let doc = DocumentNode::doc(vec![DocumentNode::Table {
            children: vec![DocumentNode::Unknown {
                kind: "tableRow".to_string(),
                children: vec![],
            }],
        }]);
        let errors = validate(&doc);
        assert_eq!(
            errors[0].kind,
            ViolationKind::UnknownKind("tableRow".to_string())
        );
    }
}
