use std::fs;
use std::path::PathBuf;

use bagtag::io_utils::{bagtag_cli_error, io_cli_error, json_cli_error, simple_cli_error};
use bagtag::{BagTagRecord, Codec, CodecConfig};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Encode bag tag records into Base45 barcode payloads and back.
#[derive(Parser)]
#[command(name = "bagtag", version)]
struct Cli {
    /// JSON file with codec settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode a JSON bag tag record and print the printable payload
    Encode {
        /// JSON record file
        input: PathBuf,
        /// Also print a hex dump of the encoded bytes
        #[arg(long)]
        hex: bool,
        /// Encode the whole fixed-size buffer, padding included
        #[arg(long)]
        pad: bool,
        /// Output buffer size in bytes
        #[arg(long)]
        capacity: Option<usize>,
    },
    /// Decode a printable payload and print the record as JSON
    Decode {
        /// Printable payload
        #[arg(required_unless_present = "input")]
        text: Option<String>,
        /// Read the payload from a file instead
        #[arg(long, conflicts_with = "text")]
        input: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => {
            CodecConfig::load(path).map_err(|e| io_cli_error("reading config file", path, e))?
        }
        None => CodecConfig::default(),
    };

    match cli.command {
        Command::Encode {
            input,
            hex,
            pad,
            capacity,
        } => {
            if pad {
                config.pad_printable = true;
            }
            if let Some(capacity) = capacity {
                config.capacity = capacity;
            }
            let data =
                fs::read(&input).map_err(|e| io_cli_error("reading input file", &input, e))?;
            let record: BagTagRecord = serde_json::from_slice(&data)
                .map_err(|e| json_cli_error("parsing input record", e))?;
            let codec = Codec::new(config);
            let tag = codec
                .encode(&record)
                .map_err(|e| bagtag_cli_error("encoding failed", e))?;
            info!(bytes = tag.len(), path = %input.display(), "encoded record");
            if hex {
                for line in hex_dump(tag.as_bytes()) {
                    println!("{line}");
                }
            }
            println!("{}", codec.to_printable(&tag));
        }
        Command::Decode { text, input } => {
            let text = match (text, input) {
                (Some(text), _) => text,
                (None, Some(path)) => fs::read_to_string(&path)
                    .map_err(|e| io_cli_error("reading input file", &path, e))?,
                (None, None) => return Err(simple_cli_error("no payload given").into()),
            };
            let record = Codec::new(config)
                .decode(text.trim_end_matches(['\r', '\n']))
                .map_err(|e| bagtag_cli_error("decoding failed", e))?;
            let json = serde_json::to_string_pretty(&record)
                .map_err(|e| simple_cli_error(&format!("rendering record: {e}")))?;
            println!("{json}");
        }
    }
    Ok(())
}

/// Sixteen bytes per line, prefixed with the offset.
fn hex_dump(bytes: &[u8]) -> Vec<String> {
    bytes
        .chunks(16)
        .enumerate()
        .map(|(i, chunk)| {
            let digits = hex::encode_upper(chunk);
            let pairs: Vec<&str> = (0..digits.len())
                .step_by(2)
                .map(|j| &digits[j..j + 2])
                .collect();
            format!("{:04x}  {}", i * 16, pairs.join(" "))
        })
        .collect()
}
