use std::path::PathBuf;

use anon_core::Corpus;
use clap::Subcommand;

use crate::source::SourceArgs;

#[derive(Debug, Subcommand)]
pub enum CorpusCommand {
    /// Show corpus size, range and density thresholds
    Info,
    /// Print every corpus entry in order
    List,
    /// Validate a JSON corpus file
    Check {
        /// Path to the JSON array of names
        path: PathBuf,
    },
}

pub fn run(source: &SourceArgs, cmd: &CorpusCommand) -> anyhow::Result<()> {
    match cmd {
        CorpusCommand::Info => {
            let corpus = source.load_corpus()?;
            let n = corpus.len();
            println!("Names:     {n}");
            println!("First:     {}", corpus.get(0).unwrap_or("-"));
            println!("Last:      {}", corpus.get(n.saturating_sub(1)).unwrap_or("-"));
            println!("Sparse:    0..{} excluded", n >> 3);
            println!("Dense:     {}..{} excluded", n >> 3, n);
            println!("Exhausted: {n}+ excluded");
        }
        CorpusCommand::List => {
            let corpus = source.load_corpus()?;
            for name in corpus.entries() {
                println!("{name}");
            }
        }
        CorpusCommand::Check { path } => {
            let raw: Vec<String> = serde_json::from_str(&std::fs::read_to_string(path)?)?;
            let corpus = Corpus::from_names(raw.iter().cloned())?;
            let duplicates = raw.len() - corpus.len();
            println!("[ok] {} parsed: {} names", path.display(), corpus.len());
            if duplicates > 0 {
                println!("[!!] {duplicates} duplicate entries dropped");
            }
        }
    }
    Ok(())
}
