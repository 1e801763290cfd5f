//! Data-driven content for the spelling game.
//!
//! This crate houses static content and optional loaders for RON/TOML files:
//! - Word lists (built-in default, or data-driven via RON/TOML)
//! - Narration phrase texts (greeting, "is spelled", encouragement pool)
//!
//! Content is consumed by the runtime and never appears in puzzle state.

pub mod phrases;
pub mod words;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use phrases::{EncouragementLine, PhraseCatalog};
pub use words::{DEFAULT_WORDS, WordList};

#[cfg(feature = "loaders")]
pub use loaders::{LoadResult, PhraseCatalogLoader, WordListLoader};
