use std::path::PathBuf;

/// Unified error type for corpus loading and name allocation.
#[derive(Debug, thiserror::Error)]
pub enum AnonError {
    #[error("corpus parse error: {0}")]
    CorpusParse(String),

    #[error("corpus is empty")]
    EmptyCorpus,

    #[error("exclusion set is not strictly ascending at index {index}")]
    UnsortedExclusion { index: usize },

    #[error("exclusion set contains a name outside the corpus: {name}")]
    ForeignExclusion { name: String },

    #[error("{strategy} allocation gave up after {attempts} attempts")]
    Exhausted {
        strategy: &'static str,
        attempts: u32,
    },

    #[error("config not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
