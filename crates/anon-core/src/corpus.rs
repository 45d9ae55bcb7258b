use std::path::Path;
use std::sync::Arc;

use crate::errors::AnonError;

const BUNDLED_NAMES: &str = include_str!("../data/names.json");

/// Immutable, ascending, duplicate-free list of candidate display names.
///
/// Cloning is cheap: entries live behind an `Arc` and are never mutated after
/// construction, so a single corpus can be shared by any number of threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    entries: Arc<[String]>,
}

impl Corpus {
    /// Build a corpus from arbitrary names. Sorts and drops duplicates.
    pub fn from_names<I, S>(names: I) -> Result<Self, AnonError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut entries: Vec<String> = names.into_iter().map(Into::into).collect();
        entries.sort();
        entries.dedup();
        if entries.is_empty() {
            return Err(AnonError::EmptyCorpus);
        }
        Ok(Self {
            entries: entries.into(),
        })
    }

    /// Parse a JSON array of strings.
    pub fn from_json(source: &str) -> Result<Self, AnonError> {
        let names: Vec<String> =
            serde_json::from_str(source).map_err(|e| AnonError::CorpusParse(e.to_string()))?;
        Self::from_names(names)
    }

    /// Read and parse a JSON corpus file.
    pub fn from_file(path: &Path) -> Result<Self, AnonError> {
        let content = std::fs::read_to_string(path)?;
        let corpus = Self::from_json(&content)?;
        tracing::info!("Loaded corpus from {} ({} names)", path.display(), corpus.len());
        Ok(corpus)
    }

    /// The name list compiled into the crate.
    pub fn bundled() -> Result<Self, AnonError> {
        let corpus = Self::from_json(BUNDLED_NAMES)?;
        tracing::info!("Loaded bundled corpus ({} names)", corpus.len());
        Ok(corpus)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a successfully loaded corpus.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn get(&self, idx: usize) -> Option<&str> {
        self.entries.get(idx).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries
            .binary_search_by(|e| e.as_str().cmp(name))
            .is_ok()
    }
}
