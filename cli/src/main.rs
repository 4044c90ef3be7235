//! Akshara CLI - command-line interface for the subword tokenizer.
//!
//! This is the main entry point for the `akshara` command-line tool.

mod commands;

use clap::{Parser, Subcommand};
use commands::{EncodeCommand, SessionCommand, TrainCommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "akshara")]
#[command(about = "A subword tokenizer built on byte-pair merges", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a new tokenizer from text data
    Train(TrainCommand),
    /// Encode text with a trained model
    Encode(EncodeCommand),
    /// Tokenize text per character with a persistent session model
    Session(SessionCommand),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Train(cmd) => commands::train::run(cmd)?,
        Commands::Encode(cmd) => commands::encode::run(cmd)?,
        Commands::Session(cmd) => commands::session::run(cmd)?,
    }

    Ok(())
}
