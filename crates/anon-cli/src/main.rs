mod commands;
mod source;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

/// anon — thread-scoped pseudonym allocator
#[derive(Debug, Parser)]
#[command(name = "anon", version, about, long_about = "\
anon — thread-scoped pseudonym allocator

Quick reference:
  anon allocate                     Pick one unused name
  anon allocate -x NAME -n 3        Pick three names, avoiding NAME and each other
  anon corpus info                  Show corpus size and bucket thresholds
  anon corpus check <FILE>          Validate a JSON corpus file
  anon thread alice bob alice       Simulate a thread; repeats keep their name

Configuration:
  .anon/config.toml is discovered by walking up from the current directory.
  --corpus and --config override it. RUST_LOG controls log verbosity.
")]
struct Cli {
    #[command(flatten)]
    source: source::SourceArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Allocate names that are not in the exclusion list
    Allocate(commands::allocate::AllocateCommand),

    /// Inspect or validate a name corpus
    #[command(subcommand)]
    Corpus(commands::corpus::CorpusCommand),

    /// Assign pseudonyms to thread participants
    Thread(commands::thread::ThreadCommand),

    /// Show version info
    Version,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Command::Allocate(cmd) => commands::allocate::run(&cli.source, cmd),
        Command::Corpus(cmd) => commands::corpus::run(&cli.source, cmd),
        Command::Thread(cmd) => commands::thread::run(&cli.source, cmd),
        Command::Version => {
            println!("anon {} (core {})", env!("CARGO_PKG_VERSION"), anon_core::version());
            Ok(())
        }
        Command::Completions { shell } => {
            clap_complete::generate(
                *shell,
                &mut Cli::command(),
                "anon",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}
