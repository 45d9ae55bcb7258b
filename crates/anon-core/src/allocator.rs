use rand::Rng;

use crate::config::AllocatorConfig;
use crate::corpus::Corpus;
use crate::errors::AnonError;
use crate::exclusion::ExclusionSet;
use crate::strategy::{self, Density};

/// Picks a name that no one in the scope is using yet.
///
/// Holds only the shared read-only corpus and its settings; every call takes
/// the scope's current exclusion set and leaves it untouched. Recording the
/// returned name is up to the caller.
#[derive(Debug, Clone)]
pub struct Allocator {
    corpus: Corpus,
    config: AllocatorConfig,
}

impl Allocator {
    pub fn new(corpus: Corpus) -> Self {
        Self::with_config(corpus, AllocatorConfig::default())
    }

    pub fn with_config(corpus: Corpus, config: AllocatorConfig) -> Self {
        Self { corpus, config }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    /// Bucket a call with this exclusion set would land in.
    pub fn density(&self, excluded: &ExclusionSet) -> Density {
        Density::classify(excluded.len(), self.corpus.len())
    }

    /// Allocate using the thread-local generator and the wall clock.
    pub fn allocate(&self, excluded: &ExclusionSet) -> Result<String, AnonError> {
        self.allocate_with(excluded, &mut rand::thread_rng())
    }

    pub fn allocate_with<R: Rng + ?Sized>(
        &self,
        excluded: &ExclusionSet,
        rng: &mut R,
    ) -> Result<String, AnonError> {
        self.dispatch(excluded, rng, || chrono::Utc::now().timestamp())
    }

    /// Like [`Allocator::allocate_with`] with the suffix clock pinned to `unix_secs`.
    pub fn allocate_at<R: Rng + ?Sized>(
        &self,
        excluded: &ExclusionSet,
        rng: &mut R,
        unix_secs: i64,
    ) -> Result<String, AnonError> {
        self.dispatch(excluded, rng, || unix_secs)
    }

    fn dispatch<R, C>(
        &self,
        excluded: &ExclusionSet,
        rng: &mut R,
        clock: C,
    ) -> Result<String, AnonError>
    where
        R: Rng + ?Sized,
        C: FnMut() -> i64,
    {
        if self.config.strict_exclusions {
            if let Some(name) = excluded.foreign_entries(&self.corpus).next() {
                return Err(AnonError::ForeignExclusion {
                    name: name.to_string(),
                });
            }
        }

        let density = self.density(excluded);
        tracing::debug!(
            "allocating with {} of {} names excluded ({density})",
            excluded.len(),
            self.corpus.len()
        );

        match density {
            Density::Sparse => {
                strategy::rejection_sample(&self.corpus, excluded, self.config.max_attempts, rng)
            }
            Density::Dense => match strategy::merge_subtract(&self.corpus, excluded, rng) {
                Some(name) => Ok(name),
                // Unreachable for a deduplicated set smaller than the corpus.
                None => self.synthesize(excluded, rng, clock),
            },
            Density::Exhausted => self.synthesize(excluded, rng, clock),
        }
    }

    fn synthesize<R, C>(
        &self,
        excluded: &ExclusionSet,
        rng: &mut R,
        clock: C,
    ) -> Result<String, AnonError>
    where
        R: Rng + ?Sized,
        C: FnMut() -> i64,
    {
        strategy::synthesize(
            &self.corpus,
            excluded,
            &self.config.separator,
            self.config.max_attempts,
            rng,
            clock,
        )
    }
}

/// One-off allocation with default settings.
pub fn allocate(corpus: &Corpus, excluded: &ExclusionSet) -> Result<String, AnonError> {
    Allocator::new(corpus.clone()).allocate(excluded)
}
