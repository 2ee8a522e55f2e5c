//! The error type shared by the whole crate.

use thiserror::Error;

/// Errors reported by [`Tree`](crate::Tree) and its configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// `min` or `max` was asked of a tree with no elements.
    #[error("tree is empty")]
    Empty,
    /// A variant name that doesn't match any of the balancing strategies.
    #[error("unknown tree variant `{0}`, expected one of: bst, avl, rb, llrb")]
    UnknownVariant(String),
}
