#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod command;
mod picker;

use command::{CommandStrategy, ExtractInput, ExtractStrategy, InitStrategy, VersionStrategy};

#[derive(Parser)]
#[command(name = "petstat")]
#[command(about = "Extract pet s0/sg stats from CHAT_*.TXT logs into pets.json", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Chat log to read, e.g. CHAT_250926.TXT
    input: Option<PathBuf>,

    /// Output file (default: input name with a .pets.json extension)
    #[arg(short = 'o', long = "out")]
    out: Option<PathBuf>,

    /// Merge into an existing pets.json (other fields kept, only s0/sg replaced)
    #[arg(long)]
    merge: Option<PathBuf>,

    /// Config file (default: ~/petstat/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a template configuration file
    Init,
    /// Show version
    Version,
}

fn main() -> anyhow::Result<ExitCode> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => InitStrategy.execute(cli.config),
        Some(Commands::Version) => VersionStrategy.execute(()),
        None => ExtractStrategy.execute(ExtractInput {
            input: cli.input,
            out: cli.out,
            merge: cli.merge,
            config: cli.config,
        }),
    }
}
