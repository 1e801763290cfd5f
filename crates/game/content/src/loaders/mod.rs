//! Content loaders for reading game data from files.
//!
//! Word lists may be RON or TOML (picked by file extension); phrase catalogs
//! are RON.

pub mod phrases;
pub mod words;

pub use phrases::PhraseCatalogLoader;
pub use words::WordListLoader;

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}
