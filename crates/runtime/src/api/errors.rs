//! Error types surfaced by the runtime API.
//!
//! Only construction can fail. Once a [`crate::GameFlow`] exists, every flow
//! operation degrades to a silent no-op instead of returning an error.
use thiserror::Error;

use speller_core::WordDeckError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("game flow requires a playback service before building")]
    MissingPlayback,

    #[error("failed to build the word deck")]
    Deck(#[from] WordDeckError),
}
