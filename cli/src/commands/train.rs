//! Train command implementation.

use clap::Parser;

/// Train command arguments.
#[derive(Parser)]
pub struct TrainCommand {
    /// Path to the training data file
    #[arg(short, long)]
    pub input: String,

    /// Output directory for the trained model
    #[arg(short, long)]
    pub output: String,

    /// Target vocabulary size
    #[arg(short, long, default_value_t = 5_000)]
    pub vocab_size: usize,

    /// Minimum frequency for merges
    #[arg(short, long, default_value_t = 2)]
    pub min_frequency: u64,
}

use akshara_tokenizer::Tokenizer;
use anyhow::Result as AnyhowResult;
use std::fs;
use std::path::Path;
use std::time::Instant;

pub fn run(cmd: TrainCommand) -> AnyhowResult<()> {
    println!("Training tokenizer...");
    println!("  Input: {}", cmd.input);
    println!("  Output: {}", cmd.output);
    println!("  Vocab size: {}", cmd.vocab_size);
    println!("  Min frequency: {}", cmd.min_frequency);
    println!();

    let start = Instant::now();
    let data = fs::read_to_string(&cmd.input)?;
    println!(
        "Read {} bytes in {:.2}s",
        data.len(),
        start.elapsed().as_secs_f64()
    );
    println!();

    let mut tokenizer = Tokenizer::builder()
        .vocab_size(cmd.vocab_size)
        .min_frequency(cmd.min_frequency)
        .build();

    let start = Instant::now();
    let report = tokenizer.train(&data)?;
    println!("Training completed in {:.2}s", start.elapsed().as_secs_f64());
    println!("  Final vocab size: {}", report.vocab_size);
    println!("  Merges learned: {}", report.merges_learned);
    if !report.reached_target() {
        println!(
            "  Note: stopped at {} of {} requested entries (no pair met the frequency floor)",
            report.vocab_size, report.requested_vocab_size
        );
    }
    println!(
        "  Corpus compression: {:.2} chars/token",
        report.compression_ratio
    );
    println!();

    let output_path = Path::new(&cmd.output);
    let start = Instant::now();
    tokenizer.save(output_path)?;
    println!(
        "Model saved to {} in {:.2}s",
        cmd.output,
        start.elapsed().as_secs_f64()
    );

    Ok(())
}
