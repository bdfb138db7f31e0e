//! cachecfg - Validator for cache-control rule files

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod config;
mod report;

use cachecfg_core::rules;
use config::{Config, LogFormat, LoggingConfig};
use report::{Report, ReportFormat};

/// cachecfg - Validate cache-control rule files
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Rule file to validate; reads stdin when omitted or "-"
    input: Option<String>,

    /// Configuration file path
    #[arg(short, long, env = "CACHECFG_CONFIG", default_value = "config/cachecfg.toml")]
    config: String,

    /// Report format
    #[arg(short, long, value_enum, env = "CACHECFG_FORMAT", default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    /// Abort on internal misuse of the error framework
    #[arg(long)]
    strict: bool,

    /// Include per-code error usage statistics in the report
    #[arg(long)]
    stats: bool,
}

fn main() -> Result<ExitCode> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration
    let mut config = Config::load(&args.config)?;
    if args.strict {
        config.validator.abort_on_misuse = true;
    }

    // Initialize logging
    init_logging(&config.logging);

    info!("Starting cachecfg v{}", env!("CARGO_PKG_VERSION"));

    let ctx = rules::error_context(&config.validator)?;
    let (source, text) = read_input(args.input.as_deref())?;

    let result = rules::validate_rules(&ctx, &text);
    match &result {
        Ok(()) => info!("{}: all rules valid", source),
        Err(e) => warn!("{}: rejected with code {}: {}", source, e.code(), e),
    }

    let stats = if args.stats { ctx.usage_stats() } else { None };
    let report = Report::new(source, &result, stats);
    println!("{}", report.render(args.format)?);

    Ok(if report.valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Read the rule text and a label for it.
///
/// One trailing newline is dropped so a file ending in a newline does not
/// present an empty final rule.
fn read_input(input: Option<&str>) -> Result<(String, String)> {
    let (source, mut text) = match input {
        None | Some("-") => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read rules from stdin")?;
            ("<stdin>".to_string(), text)
        }
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read rule file: {}", path))?;
            (path.to_string(), text)
        }
    };

    if text.ends_with('\n') {
        text.pop();
    }
    Ok((source, text))
}

/// Initialize logging
fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let registry = tracing_subscriber::registry().with(filter);
    match logging.format {
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}
