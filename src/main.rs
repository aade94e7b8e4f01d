//! booksum - Summarize EPUB books chapter by chapter with a local LLM

use std::fs::File;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use booksum::report::{ReportWriter, report_filename};
use booksum::summarize::DEFAULT_HOST;
use booksum::{OllamaClient, ReportFormat, Summarizer, Thresholds, extract};

#[derive(Parser)]
#[command(name = "booksum")]
#[command(version, about = "Summarize EPUB books chapter by chapter", long_about = None)]
#[command(after_help = "EXAMPLES:
    booksum book.epub --model llama3.2                     Write <title>_summary.txt
    booksum book.epub --model qwen3 --format markdown      Write <title>_summary.md")]
struct Cli {
    /// Input EPUB file
    #[arg(value_name = "INPUT")]
    input: String,

    /// Name of the Ollama model to use
    #[arg(long)]
    model: String,

    /// Ollama host (defaults to $OLLAMA_HOST or http://localhost:11434)
    #[arg(long)]
    host: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: ReportFormat,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let input = Path::new(&cli.input);
    if !input.exists() {
        eprintln!("error: input file not found: {}", cli.input);
        return ExitCode::FAILURE;
    }
    if input.extension().is_none_or(|ext| ext != "epub") {
        eprintln!("error: input file must be an epub file: {}", cli.input);
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let (workdir, book) = extract(&cli.input, &Thresholds::default())?;
    info!(
        title = %book.title,
        chapters = book.chapters.len(),
        "extraction complete"
    );

    let host = cli
        .host
        .clone()
        .or_else(|| std::env::var("OLLAMA_HOST").ok())
        .unwrap_or_else(|| DEFAULT_HOST.to_string());
    let client = OllamaClient::new(host)?;
    let mut summarizer = Summarizer::new(client, cli.model.as_str());

    let filename = report_filename(&book.title, cli.format);
    let file = File::create(&filename)?;
    let mut report = ReportWriter::new(cli.format, file)?;

    for chapter in &book.chapters {
        if let Some(summary) = summarizer.summarize_chapter(chapter)? {
            report.chapter(&chapter.title, &summary)?;
        }
    }

    drop(workdir);
    println!("wrote {filename}");
    Ok(())
}
