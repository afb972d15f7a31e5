//! pdf-base64 CLI
//!
//! Encode a PDF to Base64 text, or decode Base64 text back to a PDF.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use pdf_base64::{Transfer, TransferConfig};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pdf-base64")]
#[command(version)]
#[command(about = "Convert PDF files to Base64 text and back")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode a PDF file to Base64
    Encode {
        /// PDF file to encode
        input: PathBuf,

        /// Output text file (default: stdout)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Emit the bare Base64 body without the data URL prefix
        #[arg(long)]
        no_prefix: bool,

        /// Accept files that are not PDFs
        #[arg(long)]
        any_type: bool,
    },

    /// Decode Base64 text back to a PDF file
    Decode {
        /// File holding the Base64 text (default: stdin)
        #[arg(short = 'i', long, conflicts_with = "text")]
        input: Option<PathBuf>,

        /// Base64 text given inline
        #[arg(short = 't', long)]
        text: Option<String>,

        /// Name for the decoded file (".pdf" is appended when missing)
        #[arg(short = 'n', long, default_value = "")]
        name: String,

        /// Directory to write the decoded file to
        #[arg(short = 'C', long, default_value = ".")]
        directory: PathBuf,

        /// Write the decoded bytes to stdout instead of a file
        #[arg(long)]
        stdout: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Encode { input, output, no_prefix, any_type } => {
            let config = TransferConfig::default()
                .with_prefix(!no_prefix)
                .with_require_pdf(!any_type);
            encode_file(config, input, output)?;
        }
        Commands::Decode { input, text, name, directory, stdout } => {
            let config = TransferConfig::default().with_output_dir(directory);
            decode_text(config, input, text, &name, stdout)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn encode_file(config: TransferConfig, input: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let transfer = Transfer::new(config);
    let encoded = transfer
        .encode_file(&input)
        .with_context(|| format!("Failed to encode: {}", input.display()))?;

    if let Some(output_path) = output {
        let file = fs::File::create(&output_path)
            .with_context(|| format!("Failed to create: {}", output_path.display()))?;
        transfer.copy_to(&encoded, file)?;
    } else {
        let stdout = io::stdout();
        transfer.copy_to(&encoded, stdout.lock())?;
    }

    Ok(())
}

fn decode_text(
    config: TransferConfig,
    input: Option<PathBuf>,
    text: Option<String>,
    name: &str,
    to_stdout: bool,
) -> Result<()> {
    let text = match (text, input) {
        (Some(text), _) => text,
        (None, Some(input_path)) => fs::read_to_string(&input_path)
            .with_context(|| format!("Failed to read: {}", input_path.display()))?,
        (None, None) => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            buffer
        }
    };

    let transfer = Transfer::new(config);
    if to_stdout {
        let stdout = io::stdout();
        transfer.decode_to_writer(&text, name, stdout.lock())?;
    } else {
        let path = transfer.decode_to_dir(&text, name)?;
        eprintln!("Decoded: {}", path.display());
    }

    Ok(())
}
