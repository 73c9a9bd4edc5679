use clap::{Parser, ValueEnum};
use serde_json::{Value, json};
use shc_decoder::{DecodedCard, ImageQrReader, ReaderConfig, ShcError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "shc-decode",
    version,
    about = "Decode SMART Health Card QR codes into header, payload and signature"
)]
struct Cli {
    /// Image files containing an SHC QR code
    #[arg(required_unless_present = "qr_text")]
    images: Vec<PathBuf>,

    /// Decode QR text (`shc:/...`) directly instead of reading an image
    #[arg(long, conflicts_with = "images")]
    qr_text: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Downscale images whose longest side exceeds this many pixels (0 disables)
    #[arg(long, env = "QR_MAX_DIM", default_value_t = 0)]
    max_dim: u32,

    /// Log each decoding stage to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let results: Vec<(String, Result<DecodedCard, ShcError>)> = match &cli.qr_text {
        Some(text) => vec![("qr-text".to_string(), shc_decoder::decode(text))],
        None => {
            let reader = ImageQrReader::with_config(ReaderConfig::with_max_dim(cli.max_dim));
            let cards = shc_decoder::decode_image_files(&reader, &cli.images);
            cli.images
                .iter()
                .map(|p| p.display().to_string())
                .zip(cards)
                .collect()
        }
    };

    let show_source = results.len() > 1;
    let mut first_failure: Option<ExitCode> = None;

    for (source, result) in &results {
        match result {
            Ok(card) => match cli.format {
                OutputFormat::Text => print_text(source, card, show_source),
                OutputFormat::Json => println!("{}", card_json(source, card)),
            },
            Err(err) => {
                eprintln!("error: {}: [{}] {}", source, err.kind(), err);
                first_failure.get_or_insert(ExitCode::from(err.exit_code()));
            }
        }
    }

    first_failure.unwrap_or(ExitCode::SUCCESS)
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "shc_decoder=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_text(source: &str, card: &DecodedCard, show_source: bool) {
    if show_source {
        println!("== {} ==", source);
    }
    println!("HEADER: {}\n", card.header());
    println!("PAYLOAD: {}\n", card.payload());
    println!("SIGNATURE: {}", card.signature_hex());
    if show_source {
        println!();
    }
}

/// Embed header/payload as JSON values when they parse, strings otherwise
fn card_json(source: &str, card: &DecodedCard) -> Value {
    let header = card
        .header_json()
        .unwrap_or_else(|_| Value::String(card.header().to_string()));
    let payload = card
        .payload_json()
        .unwrap_or_else(|_| Value::String(card.payload().to_string()));
    json!({
        "source": source,
        "header": header,
        "payload": payload,
        "signature": card.signature_hex(),
    })
}
