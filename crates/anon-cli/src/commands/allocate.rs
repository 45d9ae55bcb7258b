use std::path::PathBuf;

use anon_core::ExclusionSet;
use clap::Args;

use crate::source::SourceArgs;

#[derive(Debug, Args)]
pub struct AllocateCommand {
    /// Name already in use (repeatable)
    #[arg(short = 'x', long = "exclude")]
    pub exclude: Vec<String>,

    /// File with one in-use name per line
    #[arg(long)]
    pub exclude_file: Option<PathBuf>,

    /// How many names to allocate; each is excluded from the ones after it
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: usize,
}

pub fn run(source: &SourceArgs, cmd: &AllocateCommand) -> anyhow::Result<()> {
    let allocator = source.load_allocator()?;

    let mut names = cmd.exclude.clone();
    if let Some(path) = &cmd.exclude_file {
        let content = std::fs::read_to_string(path)?;
        names.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(String::from),
        );
    }
    let mut excluded = ExclusionSet::normalize(names);

    for _ in 0..cmd.count {
        let density = allocator.density(&excluded);
        let name = allocator.allocate(&excluded)?;
        tracing::debug!("{density} bucket produced {name}");
        println!("{name}");
        excluded.insert(name);
    }
    Ok(())
}
