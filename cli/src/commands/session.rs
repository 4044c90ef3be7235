//! Session command implementation.
//!
//! Per-character tokenization against a persistent session model, with
//! colored terminal output. The model file grows across invocations.

use clap::Parser;

/// Session command arguments.
#[derive(Parser)]
pub struct SessionCommand {
    /// Path to the session model file
    #[arg(short, long, default_value = "session_model.json")]
    pub model: String,

    /// Text to tokenize (prompts on stdin if not specified)
    #[arg(short, long)]
    pub input: Option<String>,
}

use akshara_tokenizer::session::{SessionModel, TokenPalette};
use anyhow::Result as AnyhowResult;
use std::io::Write;
use std::path::Path;

pub fn run(cmd: SessionCommand) -> AnyhowResult<()> {
    let model_path = Path::new(&cmd.model);
    let mut model = SessionModel::load(model_path)?;
    println!("Session model: {} known characters", model.len());

    let input_text = match cmd.input {
        Some(text) => text,
        None => {
            print!("Enter a sentence: ");
            std::io::stdout().flush()?;
            let mut buffer = String::new();
            std::io::stdin().read_line(&mut buffer)?;
            buffer.trim_end_matches(['\n', '\r']).to_string()
        }
    };

    let tokens = model.tokenize(&input_text);
    model.save(model_path)?;

    let mut palette = TokenPalette::new();
    let mut rng = rand::thread_rng();
    println!();
    println!("Tokens: {}", palette.colorize_tokens(&tokens, &mut rng));
    println!("Text:   {}", palette.colorize_text(&input_text, &tokens, &mut rng));
    println!();

    let char_count = input_text.chars().count();
    println!("{} tokens for {} characters", tokens.len(), char_count);
    if !tokens.is_empty() {
        println!(
            "Compression ratio: {:.2} chars/token",
            char_count as f64 / tokens.len() as f64
        );
    }
    println!("Model now knows {} characters", model.len());

    Ok(())
}
