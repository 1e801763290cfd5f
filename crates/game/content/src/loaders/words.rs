//! Word list loader.

use std::path::Path;

use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};
use crate::words::WordList;

/// TOML layout: `words = ["cat", "dog"]`.
#[derive(Deserialize)]
struct WordFile {
    words: Vec<String>,
}

/// Loader for word lists.
pub struct WordListLoader;

impl WordListLoader {
    /// Load a word list from a `.toml` file or a RON array (any other extension).
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or parsed, or holds no usable word.
    pub fn load(path: &Path) -> LoadResult<WordList> {
        let content = read_file(path)?;
        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let words = if is_toml {
            Self::parse_toml(&content)?
        } else {
            Self::parse_ron(&content)?
        };

        WordList::new(words)
            .ok_or_else(|| anyhow::anyhow!("Word list {} contains no words", path.display()))
    }

    fn parse_ron(content: &str) -> LoadResult<Vec<String>> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse word list RON: {}", e))
    }

    fn parse_toml(content: &str) -> LoadResult<Vec<String>> {
        let file: WordFile = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse word list TOML: {}", e))?;
        Ok(file.words)
    }
}
