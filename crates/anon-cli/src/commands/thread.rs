use anon_core::Scope;
use clap::Args;

use crate::source::SourceArgs;

#[derive(Debug, Args)]
pub struct ThreadCommand {
    /// Participant ids in posting order; repeats keep their first name
    #[arg(required = true)]
    pub participants: Vec<String>,

    /// Print the scope ledger as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub fn run(source: &SourceArgs, cmd: &ThreadCommand) -> anyhow::Result<()> {
    let allocator = source.load_allocator()?;
    let mut scope = Scope::new();

    for participant in &cmd.participants {
        let name = scope.assign(&allocator, participant)?;
        if !cmd.json {
            println!("  {participant:<16} {name}");
        }
    }

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&scope)?);
    } else {
        println!();
        println!("{} participant(s), {} name(s) in use", scope.len(), scope.used().len());
    }
    Ok(())
}
