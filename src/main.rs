//! btlx-contour - CLI tool to decompose BTLx contours into line segments.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use btlx_contour::{parse_btlx_file, process_document, ConvertError, ErrorKind, ProcessConfig};

/// Output format for the segment report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Decompose BTLx part contours into line segments.
#[derive(Parser, Debug)]
#[command(name = "btlx-contour")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input BTLx file path
    #[arg(short, long)]
    input: PathBuf,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Fail when the document does not conform to the schema
    #[arg(long)]
    strict: bool,

    /// Validate only, don't decompose
    #[arg(long)]
    validate: bool,

    /// Directory for diagnostic logs (defaults to the input's directory)
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = ProcessConfig::new(args.strict);

    info!("Processing: {}", args.input.display());

    // Parse the input file
    let document = match parse_btlx_file(&args.input) {
        Ok(document) => document,
        Err(err @ ConvertError::Xml { .. }) => {
            let log_path = diagnostic_log_path(&args, "error_syntax");
            std::fs::write(&log_path, format!("{}\n", err))
                .with_context(|| format!("Failed to write {}", log_path.display()))?;
            error!(
                "{} XML syntax error, see {}",
                args.input.display(),
                log_path.display()
            );
            return Err(err).with_context(|| format!("Failed to parse {}", args.input.display()));
        }
        Err(err) if err.kind() == ErrorKind::MalformedDocument => {
            error!("{} invalid BTLx structure: {}", args.input.display(), err);
            return Err(err).with_context(|| format!("Failed to parse {}", args.input.display()));
        }
        Err(err) => {
            return Err(err).with_context(|| format!("Failed to read {}", args.input.display()))
        }
    };

    info!(
        "Parsed {} part(s), {} contour(s)",
        document.parts().len(),
        document.contour_count()
    );

    // Validate and decompose
    let outcome = match process_document(document, &config) {
        Ok(outcome) => outcome,
        Err(err) => {
            if let ConvertError::SchemaViolation { log, .. } = &err {
                write_schema_log(&args, log)?;
            }
            return Err(err).context("Validation failed");
        }
    };

    if !outcome.validation.passed {
        write_schema_log(&args, &outcome.validation.to_log())?;
    }

    // Validate-only mode
    if args.validate {
        if outcome.validation.passed {
            info!("Validation passed");
        }
        return Ok(());
    }

    // Report
    let report = &outcome.report;
    let rendered = match args.format {
        Format::Json => report.to_json()?,
        Format::Text => report.to_string(),
    };

    match &args.output {
        Some(output_path) => {
            std::fs::write(output_path, &rendered)
                .with_context(|| format!("Failed to write {}", output_path.display()))?;
            info!("Generated: {}", output_path.display());
        }
        None => println!("{}", rendered.trim_end()),
    }

    info!(
        "{} segment(s), {} anomaly(ies)",
        report.segment_count(),
        report.anomaly_count()
    );

    Ok(())
}

/// Write the schema diagnostics next to the input (or into `--log-dir`).
fn write_schema_log(args: &Args, log: &str) -> Result<()> {
    let log_path = diagnostic_log_path(args, "error_schema");
    std::fs::write(&log_path, log)
        .with_context(|| format!("Failed to write {}", log_path.display()))?;
    warn!(
        "{} schema validation error, see {}",
        args.input.display(),
        log_path.display()
    );
    Ok(())
}

/// Path of a diagnostic log for the input file, e.g. `input-error_syntax.log`.
fn diagnostic_log_path(args: &Args, suffix: &str) -> PathBuf {
    let stem = args
        .input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("input");
    let dir = args
        .log_dir
        .clone()
        .or_else(|| args.input.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    dir.join(format!("{}-{}.log", stem, suffix))
}
