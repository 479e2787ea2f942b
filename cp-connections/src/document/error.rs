//! Document parser error types.

/// Input that cannot be turned into an element tree at all.
///
/// Malformed markup is never an error; the parser repairs it the way a
/// browser would, and undecodable bytes become U+FFFD. Only input that is
/// not text at all is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The start of the input is dense with control bytes
    #[error("input looks like binary data (control byte at offset {offset})")]
    Binary { offset: usize },

    /// Element nesting is deeper than the tree builder accepts
    #[error("element nesting exceeds {max} levels")]
    TooDeep { max: usize },
}
