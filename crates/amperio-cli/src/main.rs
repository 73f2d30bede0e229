//! Amperio CLI - offline tools for the amperio neural amp engine.

mod commands;
mod wav;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "amperio")]
#[command(author, version, about = "Amperio neural amp engine CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a WAV file through a model
    Process(commands::process::ProcessArgs),

    /// Show what a model file contains
    Inspect(commands::inspect::InspectArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Inspect(args) => commands::inspect::run(args),
    }
}
