//! Extraction error types.

use serde::Serialize;

/// What was missing at a fixed layout position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum MismatchKind {
    /// No element at the expected child index
    #[error("no element at this position")]
    MissingNode,

    /// The element exists but lacks a required attribute
    #[error("missing attribute `{0}`")]
    MissingAttribute(&'static str),

    /// The element exists but has no (non-blank) text
    #[error("element has no text")]
    MissingText,
}

/// A journey entry does not have the shape the extractor expects.
///
/// Scoped to one entry: the extractor skips the entry and keeps going.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("layout mismatch at {path}: {kind}")]
pub struct LayoutMismatch {
    pub kind: MismatchKind,
    /// Fixed path from the entry root, e.g. `entry[0][0][1]`.
    pub path: &'static str,
}

impl LayoutMismatch {
    pub(super) fn missing_node(path: &'static str) -> Self {
        Self {
            kind: MismatchKind::MissingNode,
            path,
        }
    }

    pub(super) fn missing_attribute(path: &'static str, attr: &'static str) -> Self {
        Self {
            kind: MismatchKind::MissingAttribute(attr),
            path,
        }
    }

    pub(super) fn missing_text(path: &'static str) -> Self {
        Self {
            kind: MismatchKind::MissingText,
            path,
        }
    }
}
