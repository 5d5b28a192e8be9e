//! Bad-redaction inspector CLI.
//!
//! Scans a local PDF or a URL and lists the boxes that hide text which can
//! still be extracted.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use redaction_inspector::{DocumentSource, InspectorConfig, MupdfBackend, RedactionService};

/// PDF Bad-Redaction Inspector
///
/// Finds black boxes drawn over text that is still in the document.
#[derive(Parser)]
#[command(name = "redaction-inspector")]
#[command(version, about, long_about = None)]
struct Cli {
    /// PDF file path or http(s) URL
    #[arg(value_name = "FILE|URL")]
    input: String,

    /// YAML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Inspection command handler.
struct InspectHandler {
    service: RedactionService,
    format: Format,
}

impl InspectHandler {
    fn new(config: Option<&Path>, format: Format) -> Result<Self> {
        let config = match config {
            Some(path) => InspectorConfig::from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => InspectorConfig::default(),
        };
        let service = RedactionService::with_config(Box::new(MupdfBackend::new()), config)
            .context("Invalid configuration")?;
        Ok(Self { service, format })
    }

    fn inspect(&self, input: &str) -> Result<()> {
        let source = DocumentSource::parse(input);
        let report = self
            .service
            .inspect(&source)
            .with_context(|| format!("Failed to inspect {}", source))?;

        match self.format {
            Format::Json => {
                let json = serde_json::to_string_pretty(&report)
                    .context("Failed to serialise report")?;
                println!("{}", json);
            }
            Format::Text if report.is_empty() => println!("No bad redactions found"),
            Format::Text => print!("{}", report),
        }
        Ok(())
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let handler = InspectHandler::new(cli.config.as_deref(), cli.format)?;
    handler.inspect(&cli.input)
}
