use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::corpus::Corpus;
use crate::errors::AnonError;
use crate::exclusion::ExclusionSet;

/// Load-factor bucket that decides which selection strategy runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Density {
    /// Fewer than an eighth of the corpus is taken: rejection sampling.
    Sparse,
    /// At least an eighth but not all: merge subtraction.
    Dense,
    /// Every corpus entry is taken: suffix synthesis.
    Exhausted,
}

impl Density {
    pub fn classify(excluded: usize, corpus: usize) -> Self {
        if excluded < corpus >> 3 {
            Density::Sparse
        } else if excluded < corpus {
            Density::Dense
        } else {
            Density::Exhausted
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Density::Sparse => "sparse",
            Density::Dense => "dense",
            Density::Exhausted => "exhausted",
        }
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Draw uniformly from the whole corpus until a name outside `excluded` comes up.
pub fn rejection_sample<R: Rng + ?Sized>(
    corpus: &Corpus,
    excluded: &ExclusionSet,
    max_attempts: u32,
    rng: &mut R,
) -> Result<String, AnonError> {
    let entries = corpus.entries();
    for attempt in 1..=max_attempts {
        let name = &entries[rng.gen_range(0..entries.len())];
        if !excluded.contains(name) {
            tracing::debug!("sparse draw accepted after {attempt} attempt(s)");
            return Ok(name.clone());
        }
    }
    tracing::warn!("sparse allocation hit the retry cap ({max_attempts})");
    Err(AnonError::Exhausted {
        strategy: Density::Sparse.as_str(),
        attempts: max_attempts,
    })
}

/// Corpus entries not present in `excluded`, in corpus order.
///
/// Walks both sorted sequences once. Exclusion entries that are not corpus
/// names are stepped over and counted in the second return value.
pub fn remainder<'a>(corpus: &'a Corpus, excluded: &ExclusionSet) -> (Vec<&'a str>, usize) {
    let entries = corpus.entries();
    let mut remaining = Vec::with_capacity(entries.len().saturating_sub(excluded.len()));
    let mut taken = excluded.as_slice().iter().peekable();
    let mut foreign = 0;

    for name in entries {
        while taken.next_if(|t| t.as_str() < name.as_str()).is_some() {
            foreign += 1;
        }
        if taken.next_if(|t| *t == name).is_none() {
            remaining.push(name.as_str());
        }
    }
    foreign += taken.count();

    (remaining, foreign)
}

/// Pick uniformly among the names left after subtracting `excluded`.
/// `None` only when nothing is left.
pub fn merge_subtract<R: Rng + ?Sized>(
    corpus: &Corpus,
    excluded: &ExclusionSet,
    rng: &mut R,
) -> Option<String> {
    let (remaining, foreign) = remainder(corpus, excluded);
    if foreign > 0 {
        tracing::warn!("exclusion set holds {foreign} name(s) outside the corpus; skipped during merge");
    }
    tracing::debug!("dense merge left {} candidate(s)", remaining.len());
    remaining.choose(rng).map(|name| (*name).to_string())
}

/// Standard base64 of the little-endian 8-byte Unix timestamp.
pub fn timestamp_suffix(unix_secs: i64) -> String {
    STANDARD.encode((unix_secs as u64).to_le_bytes())
}

/// Append `separator` and a timestamp suffix to random corpus names until the
/// result is not in `excluded`. `clock` is read once per attempt.
pub fn synthesize<R, C>(
    corpus: &Corpus,
    excluded: &ExclusionSet,
    separator: &str,
    max_attempts: u32,
    rng: &mut R,
    mut clock: C,
) -> Result<String, AnonError>
where
    R: Rng + ?Sized,
    C: FnMut() -> i64,
{
    let entries = corpus.entries();
    for attempt in 1..=max_attempts {
        let base = &entries[rng.gen_range(0..entries.len())];
        let name = format!("{base}{separator}{}", timestamp_suffix(clock()));
        if !excluded.contains(&name) {
            tracing::debug!("suffixed name accepted after {attempt} attempt(s)");
            return Ok(name);
        }
    }
    tracing::warn!("suffix synthesis hit the retry cap ({max_attempts})");
    Err(AnonError::Exhausted {
        strategy: Density::Exhausted.as_str(),
        attempts: max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn greek() -> Corpus {
        Corpus::from_names(["alpha", "beta", "gamma", "delta"]).unwrap()
    }

    #[test]
    fn classify_thresholds() {
        assert_eq!(Density::classify(0, 64), Density::Sparse);
        assert_eq!(Density::classify(7, 64), Density::Sparse);
        assert_eq!(Density::classify(8, 64), Density::Dense);
        assert_eq!(Density::classify(63, 64), Density::Dense);
        assert_eq!(Density::classify(64, 64), Density::Exhausted);
        assert_eq!(Density::classify(70, 64), Density::Exhausted);
        // n / 8 rounds down to zero for tiny corpora
        assert_eq!(Density::classify(0, 4), Density::Dense);
    }

    #[test]
    fn remainder_is_set_difference() {
        let corpus = greek();
        let excluded = ExclusionSet::normalize(["beta", "gamma"]);
        let (left, foreign) = remainder(&corpus, &excluded);
        assert_eq!(left, ["alpha", "delta"]);
        assert_eq!(foreign, 0);
    }

    #[test]
    fn remainder_steps_over_foreign_names() {
        let corpus = greek();
        let excluded = ExclusionSet::normalize(["alpha_x", "beta", "zeta"]);
        let (left, foreign) = remainder(&corpus, &excluded);
        assert_eq!(left, ["alpha", "delta", "gamma"]);
        assert_eq!(foreign, 2);
    }

    #[test]
    fn merge_subtract_single_survivor() {
        let corpus = greek();
        let excluded = ExclusionSet::normalize(["alpha", "beta", "gamma"]);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert_eq!(merge_subtract(&corpus, &excluded, &mut rng).as_deref(), Some("delta"));
        }
    }

    #[test]
    fn merge_subtract_nothing_left() {
        let corpus = greek();
        let excluded = ExclusionSet::normalize(["alpha", "beta", "delta", "gamma"]);
        let mut rng = StdRng::seed_from_u64(7);
        assert!(merge_subtract(&corpus, &excluded, &mut rng).is_none());
    }

    #[test]
    fn rejection_sample_avoids_excluded() {
        let corpus = Corpus::from_names((0..64).map(|i| format!("name-{i:02}"))).unwrap();
        let excluded = ExclusionSet::normalize(["name-00", "name-01", "name-02"]);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let name = rejection_sample(&corpus, &excluded, 1024, &mut rng).unwrap();
            assert!(!excluded.contains(&name));
        }
    }

    #[test]
    fn rejection_sample_respects_cap() {
        let corpus = greek();
        let excluded = ExclusionSet::normalize(["alpha", "beta", "delta", "gamma"]);
        let mut rng = StdRng::seed_from_u64(1);
        let err = rejection_sample(&corpus, &excluded, 5, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            AnonError::Exhausted { strategy: "sparse", attempts: 5 }
        ));
    }

    #[test]
    fn timestamp_suffix_is_base64_of_le_bytes() {
        assert_eq!(timestamp_suffix(0), "AAAAAAAAAAA=");
        assert_eq!(timestamp_suffix(1), "AQAAAAAAAAA=");
        assert_eq!(timestamp_suffix(1_700_000_000).len(), 12);
    }

    #[test]
    fn synthesize_appends_separator_and_suffix() {
        let corpus = greek();
        let excluded = ExclusionSet::normalize(["alpha", "beta", "delta", "gamma"]);
        let mut rng = StdRng::seed_from_u64(3);
        let name = synthesize(&corpus, &excluded, "_", 16, &mut rng, || 1).unwrap();
        let (base, suffix) = name.split_once('_').unwrap();
        assert!(corpus.contains(base));
        assert_eq!(suffix, "AQAAAAAAAAA=");
    }

    #[test]
    fn synthesize_retries_until_clock_moves() {
        let corpus = Corpus::from_names(["solo"]).unwrap();
        let excluded = ExclusionSet::normalize(["solo", "solo_AAAAAAAAAAA="]);
        let mut rng = StdRng::seed_from_u64(3);
        let mut now = -1;
        let name = synthesize(&corpus, &excluded, "_", 16, &mut rng, || {
            now += 1;
            now / 3
        })
        .unwrap();
        assert_eq!(name, "solo_AQAAAAAAAAA=");
    }

    #[test]
    fn synthesize_gives_up_when_second_is_saturated() {
        let corpus = Corpus::from_names(["solo"]).unwrap();
        let excluded = ExclusionSet::normalize(["solo", "solo_AAAAAAAAAAA="]);
        let mut rng = StdRng::seed_from_u64(3);
        let err = synthesize(&corpus, &excluded, "_", 8, &mut rng, || 0).unwrap_err();
        assert!(matches!(
            err,
            AnonError::Exhausted { strategy: "exhausted", attempts: 8 }
        ));
    }
}
