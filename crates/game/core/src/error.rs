//! Error types for puzzle construction.
//!
//! Gameplay operations on [`crate::Puzzle`] never fail: invalid input is a
//! no-op reported through [`crate::Placement`]. Errors only arise while
//! assembling a puzzle from external data.

/// Errors raised when building a [`crate::WordDeck`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WordDeckError {
    #[error("word list is empty")]
    Empty,

    #[error("word at position {index} is blank")]
    BlankWord { index: usize },
}
