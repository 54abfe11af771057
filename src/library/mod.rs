//! Owned-book index.
//!
//! Callers mark candidates they already own by checking them against a
//! precomputed set of ASINs and alternate catalog ids. The core never
//! builds this set itself; it is loaded from a plain text file.

use std::collections::HashSet;
use std::path::Path;

use crate::error::{Error, Result, ResultExt};
use crate::model::SearchResult;

/// Set of known ASINs and alternate catalog ids.
#[derive(Debug, Clone, Default)]
pub struct LibraryIndex {
    asins: HashSet<String>,
    catalog_ids: HashSet<String>,
}

impl LibraryIndex {
    pub fn new(
        asins: impl IntoIterator<Item = impl AsRef<str>>,
        catalog_ids: impl IntoIterator<Item = impl AsRef<str>>,
    ) -> Self {
        Self {
            asins: asins.into_iter().filter_map(|a| normalize_asin(a.as_ref())).collect(),
            catalog_ids: catalog_ids
                .into_iter()
                .map(|id| id.as_ref().trim().to_string())
                .filter(|id| !id.is_empty())
                .collect(),
        }
    }

    /// Parse a newline-separated list.
    ///
    /// Blank lines and `#` comments are skipped. Lines that look like an
    /// ASIN go into the ASIN set, everything else is an alternate id.
    pub fn parse(contents: &str) -> Self {
        let (asins, ids): (Vec<&str>, Vec<&str>) = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .partition(|line| crate::search::validation::is_strict_asin(line));
        Self::new(asins, ids)
    }

    /// Load an index from a newline-separated file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::not_found(path));
        }
        let contents = std::fs::read_to_string(path)
            .with_context(format!("reading library file {}", path.display()))?;
        let index = Self::parse(&contents);
        tracing::info!(
            target: "library",
            asins = index.asins.len(),
            catalog_ids = index.catalog_ids.len(),
            "Loaded library index from {:?}",
            path
        );
        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.asins.len() + self.catalog_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `result` is already owned.
    ///
    /// Checks the ASIN when the result has one, otherwise its id.
    pub fn is_owned(&self, result: &SearchResult) -> bool {
        match result.asin.as_deref().and_then(normalize_asin) {
            Some(asin) => self.asins.contains(&asin),
            None => {
                let id = result.id.trim();
                !id.is_empty() && (self.catalog_ids.contains(id) || self.asins.contains(id))
            }
        }
    }
}

fn normalize_asin(asin: &str) -> Option<String> {
    let asin = asin.trim();
    (!asin.is_empty()).then(|| asin.to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::result;

    #[test]
    fn test_is_owned_by_asin() {
        let index = LibraryIndex::new(["b08g9prs1k"], Vec::<String>::new());
        let owned = SearchResult {
            asin: Some("B08G9PRS1K".to_string()),
            ..result("Project Hail Mary", "Andy Weir")
        };
        assert!(index.is_owned(&owned));
        assert!(!index.is_owned(&result("Project Hail Mary", "Andy Weir")));
    }

    #[test]
    fn test_falls_back_to_id_without_asin() {
        let index = LibraryIndex::new(Vec::<String>::new(), ["goodreads:54493401"]);
        let by_id = SearchResult {
            id: "goodreads:54493401".to_string(),
            ..result("Project Hail Mary", "Andy Weir")
        };
        assert!(index.is_owned(&by_id));

        // An ASIN that isn't owned is not rescued by the id
        let with_asin = SearchResult {
            asin: Some("B00B5HZGUG".to_string()),
            ..by_id
        };
        assert!(!index.is_owned(&with_asin));
    }

    #[test]
    fn test_parse_and_load() {
        let contents = "# owned books\nB08G9PRS1K\n\n  isbn:9780547928227 \nB00B5HZGUG\n";
        let index = LibraryIndex::parse(contents);
        assert_eq!(index.len(), 3);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("owned.txt");
        std::fs::write(&path, contents).unwrap();
        let loaded = LibraryIndex::load(&path).unwrap();
        assert_eq!(loaded.len(), 3);

        let missing = LibraryIndex::load(&dir.path().join("nope.txt"));
        assert!(matches!(missing, Err(Error::NotFound(_))));
    }
}
