use std::path::PathBuf;

use clap::Parser;
use sky_editor::config::{ConfigError, EditorConfig};
use sky_editor::replay::{self, ReplayError, Script};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Replay(#[from] ReplayError),
    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "sky-replay", about = "Replay a scripted editing session and print the settled state")]
struct Cli {
    /// JSON script `{ "state": ..., "steps": [...] }`.
    script: PathBuf,

    /// Override the history capacity (0 = unbounded).
    #[arg(long)]
    max_history_stack: Option<usize>,

    /// Override the history debounce window.
    #[arg(long)]
    history_delay_ms: Option<u64>,

    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    let mut config = EditorConfig::from_env()?;
    if let Some(capacity) = cli.max_history_stack {
        config = config.with_max_history_stack(Some(capacity));
    }
    if let Some(delay_ms) = cli.history_delay_ms {
        config = config.with_history_delay_ms(delay_ms);
    }

    let script = Script::from_path(&cli.script)?;
    let report = replay::run(script, config)?;
    let out = if cli.pretty { serde_json::to_string_pretty(&report)? } else { serde_json::to_string(&report)? };
    println!("{out}");
    Ok(())
}
