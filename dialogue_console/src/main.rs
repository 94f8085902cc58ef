//! Play a branching dialogue in the terminal.
//!
//! ```bash
//! cargo run -p dialogue_console -- samples/tavern.json --width 60
//! ```

use anyhow::Context;
use clap::Parser;
use dialogue_console::{ConsoleConfig, ConsoleEngine, RunOutcome};
use dialogue_core::Dialogue;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "dialogue", about = "Play a branching dialogue document")]
struct Cli {
    /// Dialogue document (.json or .toml)
    document: PathBuf,

    /// Console configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Wrap text at this column
    #[arg(short, long)]
    width: Option<usize>,

    /// Do not print variables before each prompt
    #[arg(long)]
    hide_globals: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ConsoleConfig::load(path)
            .with_context(|| format!("failed to read config {}", path.display()))?,
        None => ConsoleConfig::default(),
    };
    if let Some(width) = cli.width {
        config = config.with_wrap_width(width);
    }
    if cli.hide_globals {
        config = config.with_show_globals(false);
    }

    let dialogue = Dialogue::load(&cli.document)
        .with_context(|| format!("failed to load dialogue {}", cli.document.display()))?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut engine = ConsoleEngine::new(dialogue, stdin.lock(), stdout.lock(), config);

    match engine.run()? {
        RunOutcome::Finished | RunOutcome::InputClosed => Ok(()),
        RunOutcome::NoResponses => anyhow::bail!("dialogue stuck: no responses on offer"),
    }
}
