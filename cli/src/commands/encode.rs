//! Encode command implementation.

use clap::Parser;

/// Encode command arguments.
#[derive(Parser)]
pub struct EncodeCommand {
    /// Path to the trained tokenizer model directory
    #[arg(short, long)]
    pub tokenizer: String,

    /// Text to encode (reads stdin if "-")
    #[arg(short, long)]
    pub input: String,

    /// Print token strings instead of ids
    #[arg(short, long, default_value_t = false)]
    pub show_tokens: bool,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<String>,
}

use akshara_tokenizer::Tokenizer;
use anyhow::Result as AnyhowResult;
use std::path::Path;

pub fn run(cmd: EncodeCommand) -> AnyhowResult<()> {
    let tokenizer_path = Path::new(&cmd.tokenizer);
    let tokenizer = Tokenizer::load(tokenizer_path)?;

    let input_text = if cmd.input == "-" {
        use std::io::Read;
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        cmd.input
    };

    let encoding = tokenizer.encode(&input_text)?;

    let output = if cmd.show_tokens {
        tokenizer.tokens(&encoding)?.join(" ")
    } else {
        let ids: Vec<String> = encoding.ids.iter().map(|id| id.to_string()).collect();
        ids.join(" ")
    };

    match &cmd.output {
        Some(path) => {
            std::fs::write(path, &output)?;
            println!("Encoded {} tokens to {}", encoding.len(), path);
        }
        None => {
            println!("{}", output);
        }
    }

    println!(
        "{} tokens, {:.2} chars/token",
        encoding.len(),
        encoding.compression_ratio()
    );

    Ok(())
}
