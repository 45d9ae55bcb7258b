use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::allocator::Allocator;
use crate::errors::AnonError;
use crate::exclusion::ExclusionSet;

/// Pseudonyms handed out within one allocation scope, such as a discussion thread.
///
/// A participant keeps the same name for the lifetime of the scope. The ledger
/// is plain data; storing it alongside the thread is the caller's job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    assigned: BTreeMap<String, String>,
    used: ExclusionSet,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name for `participant`, allocating and recording one on first sight.
    pub fn assign(&mut self, allocator: &Allocator, participant: &str) -> Result<String, AnonError> {
        self.assign_with(allocator, participant, &mut rand::thread_rng())
    }

    pub fn assign_with<R: Rng + ?Sized>(
        &mut self,
        allocator: &Allocator,
        participant: &str,
        rng: &mut R,
    ) -> Result<String, AnonError> {
        if let Some(name) = self.assigned.get(participant) {
            return Ok(name.clone());
        }
        let name = allocator.allocate_with(&self.used, rng)?;
        self.used.insert(name.clone());
        self.assigned.insert(participant.to_string(), name.clone());
        tracing::debug!("assigned {name} to {participant}");
        Ok(name)
    }

    pub fn name_of(&self, participant: &str) -> Option<&str> {
        self.assigned.get(participant).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }

    /// Names taken in this scope, ready to pass to the allocator.
    pub fn used(&self) -> &ExclusionSet {
        &self.used
    }

    /// Participants in id order with their names.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.assigned.iter().map(|(p, n)| (p.as_str(), n.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Corpus;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn participant_keeps_name() {
        let allocator = Allocator::new(Corpus::bundled().unwrap());
        let mut scope = Scope::new();
        let first = scope.assign(&allocator, "user-1").unwrap();
        let again = scope.assign(&allocator, "user-1").unwrap();
        assert_eq!(first, again);
        assert_eq!(scope.len(), 1);
        assert_eq!(scope.name_of("user-1"), Some(first.as_str()));
        assert_eq!(scope.name_of("user-2"), None);
    }

    #[test]
    fn names_are_unique_past_exhaustion() {
        let corpus = Corpus::from_names(["alpha", "beta", "gamma"]).unwrap();
        let allocator = Allocator::new(corpus.clone());
        let mut scope = Scope::new();
        let mut rng = StdRng::seed_from_u64(9);

        for i in 0..3 {
            let name = scope.assign_with(&allocator, &format!("p{i}"), &mut rng).unwrap();
            assert!(corpus.contains(&name));
        }
        // Corpus is used up; the next participant gets a suffixed name.
        let extra = scope.assign_with(&allocator, "p3", &mut rng).unwrap();
        assert!(!corpus.contains(&extra));
        assert_eq!(scope.used().len(), 4);

        let mut names: Vec<_> = scope.iter().map(|(_, n)| n.to_string()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 4);
    }

    #[test]
    fn scope_roundtrips_through_json() {
        let allocator = Allocator::new(Corpus::bundled().unwrap());
        let mut scope = Scope::new();
        scope.assign(&allocator, "a").unwrap();
        scope.assign(&allocator, "b").unwrap();

        let json = serde_json::to_string(&scope).unwrap();
        let restored: Scope = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, scope);
    }
}
