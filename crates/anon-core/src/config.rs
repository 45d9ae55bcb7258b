use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::corpus::Corpus;
use crate::errors::AnonError;

pub const CONFIG_DIR: &str = ".anon";
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocatorConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_separator")]
    pub separator: String,
    #[serde(default)]
    pub strict_exclusions: bool,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            separator: default_separator(),
            strict_exclusions: false,
        }
    }
}

fn default_max_attempts() -> u32 {
    1024
}

fn default_separator() -> String {
    "_".into()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnonConfig {
    /// JSON corpus file. Relative paths resolve against the config root.
    #[serde(default)]
    pub corpus: Option<PathBuf>,
    #[serde(default)]
    pub allocator: AllocatorConfig,
}

impl AnonConfig {
    /// Load the config under `root` (`<root>/.anon/config.toml`).
    pub fn load(root: &Path) -> Result<Self, AnonError> {
        let path = config_path(root);
        if !path.exists() {
            return Err(AnonError::ConfigNotFound(path));
        }
        let content = std::fs::read_to_string(&path)?;
        let mut config: AnonConfig =
            toml::from_str(&content).map_err(|e| AnonError::ConfigParse(e.to_string()))?;
        if let Some(corpus) = config.corpus.take() {
            config.corpus = Some(root.join(corpus));
        }
        Ok(config)
    }

    /// The configured corpus file, or the bundled list when none is set.
    pub fn load_corpus(&self) -> Result<Corpus, AnonError> {
        match &self.corpus {
            Some(path) => Corpus::from_file(path),
            None => Corpus::bundled(),
        }
    }
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_DIR).join(CONFIG_FILE)
}

/// Resolve the config root directory. Walks up from `start` looking for `.anon/config.toml`.
pub fn find_config_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        if config_path(&current).exists() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Load and parse a TOML config file.
pub fn load_config<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}
