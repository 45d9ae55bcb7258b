use serde::{Deserialize, Serialize};

use crate::corpus::Corpus;
use crate::errors::AnonError;

/// Names already in use within one allocation scope.
///
/// Always strictly ascending, so membership is a binary search and the dense
/// strategy can subtract it from the corpus in a single merge pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct ExclusionSet {
    names: Vec<String>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sort and dedup arbitrary caller input.
    pub fn normalize<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
        names.sort();
        names.dedup();
        Self { names }
    }

    /// Accept an already-sorted sequence without re-sorting it.
    /// Errors on the first position that is not strictly greater than its predecessor.
    pub fn from_sorted(names: Vec<String>) -> Result<Self, AnonError> {
        if let Some(pos) = names.windows(2).position(|w| w[0] >= w[1]) {
            return Err(AnonError::UnsortedExclusion { index: pos + 1 });
        }
        Ok(Self { names })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names
            .binary_search_by(|n| n.as_str().cmp(name))
            .is_ok()
    }

    /// Insert keeping order. Returns false if the name was already present.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        match self.names.binary_search(&name) {
            Ok(_) => false,
            Err(pos) => {
                self.names.insert(pos, name);
                true
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    /// Entries that are not corpus names, such as suffixed names produced
    /// once the corpus was exhausted.
    pub fn foreign_entries<'a>(&'a self, corpus: &'a Corpus) -> impl Iterator<Item = &'a str> {
        self.iter().filter(move |n| !corpus.contains(n))
    }
}

impl TryFrom<Vec<String>> for ExclusionSet {
    type Error = AnonError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        Self::from_sorted(names)
    }
}

impl From<ExclusionSet> for Vec<String> {
    fn from(set: ExclusionSet) -> Self {
        set.names
    }
}

impl<S: Into<String>> FromIterator<S> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::normalize(iter)
    }
}
