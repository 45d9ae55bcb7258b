use std::path::PathBuf;

use anon_core::config::{find_config_root, AnonConfig};
use anon_core::{Allocator, Corpus};
use clap::Args;

/// Where the corpus and allocator settings come from.
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// JSON corpus file (overrides the config file)
    #[arg(long, global = true)]
    pub corpus: Option<PathBuf>,

    /// Directory holding .anon/config.toml (default: search upward from cwd)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

impl SourceArgs {
    pub fn load_config(&self) -> anyhow::Result<AnonConfig> {
        let root = match &self.config {
            Some(root) => Some(root.clone()),
            None => find_config_root(&std::env::current_dir()?),
        };
        let config = match root {
            Some(root) => {
                tracing::debug!("using config under {}", root.display());
                AnonConfig::load(&root)?
            }
            None => AnonConfig::default(),
        };
        Ok(config)
    }

    pub fn load_corpus(&self) -> anyhow::Result<Corpus> {
        let config = self.load_config()?;
        self.corpus_for(&config)
    }

    pub fn load_allocator(&self) -> anyhow::Result<Allocator> {
        let config = self.load_config()?;
        let corpus = self.corpus_for(&config)?;
        Ok(Allocator::with_config(corpus, config.allocator))
    }

    fn corpus_for(&self, config: &AnonConfig) -> anyhow::Result<Corpus> {
        let corpus = match &self.corpus {
            Some(path) => Corpus::from_file(path)?,
            None => config.load_corpus()?,
        };
        Ok(corpus)
    }
}
