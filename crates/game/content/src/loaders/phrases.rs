//! Phrase catalog loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::phrases::PhraseCatalog;

/// Loader for narration phrase catalogs from RON files.
pub struct PhraseCatalogLoader;

impl PhraseCatalogLoader {
    /// Load a [`PhraseCatalog`] from a RON file.
    ///
    /// An empty encouragement pool is rejected: celebration cadence always
    /// needs at least one line to say.
    pub fn load(path: &Path) -> LoadResult<PhraseCatalog> {
        let content = read_file(path)?;
        let catalog: PhraseCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse phrase catalog RON: {}", e))?;

        if catalog.encouragements.is_empty() {
            anyhow::bail!(
                "Phrase catalog {} has no encouragement lines",
                path.display()
            );
        }
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_catalog() {
        let mut file = tempfile::Builder::new().suffix(".ron").tempfile().unwrap();
        write!(
            file,
            r#"(
                greeting: "Hi there!",
                is_spelled: "is spelled",
                encouragements: [(key: "wow", text: "Wow!")],
            )"#
        )
        .unwrap();

        let catalog = PhraseCatalogLoader::load(file.path()).unwrap();
        assert_eq!(catalog.greeting, "Hi there!");
        assert_eq!(catalog.encouragements.len(), 1);
    }

    #[test]
    fn rejects_empty_encouragements() {
        let mut file = tempfile::Builder::new().suffix(".ron").tempfile().unwrap();
        write!(
            file,
            r#"(greeting: "Hi", is_spelled: "is spelled", encouragements: [])"#
        )
        .unwrap();

        assert!(PhraseCatalogLoader::load(file.path()).is_err());
    }
}
