//! # menu-import
//!
//! Command line caller for the menu import pipeline.
//!
//! ## Usage
//! ```bash
//! # Validate an upload and print the result as JSON
//! menu-import validate ./menu.csv
//!
//! # Human-readable summary
//! menu-import validate ./menu.csv --format text
//!
//! # Write the downloadable template
//! menu-import sample --output ./menu-template.csv
//! ```
//!
//! ## Exit Codes
//! - `0`: file is valid (warnings may still be printed)
//! - `1`: file has blocking errors
//! - `2`: the file could not be read, or configuration is invalid
//!
//! ## Environment
//! - `RUST_LOG`: log filter for stderr output (default: `info`)
//! - `MENU_IMPORT_MAX_FILE_BYTES`: upload size limit (default: 5 MiB)
//! - `MENU_IMPORT_FORMAT`: `json` or `text` (default: `json`)

mod config;
mod report;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use menu_import_core::{generate_sample_csv, validate_import, ImportValidationResult};

use crate::config::{CliConfig, OutputFormat};

#[derive(Parser)]
#[command(name = "menu-import")]
#[command(about = "Validate bulk menu import files")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate an import file and print the result
    Validate {
        /// Path to the CSV file
        file: PathBuf,

        /// Output format (overrides MENU_IMPORT_FORMAT)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Size limit in bytes (overrides MENU_IMPORT_MAX_FILE_BYTES)
        #[arg(long)]
        max_bytes: Option<u64>,
    },

    /// Write the sample template file
    Sample {
        /// Destination file (stdout when omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            error!(error = %format!("{:#}", e), "menu-import failed");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut config = CliConfig::from_env().context("Failed to load configuration")?;

    match cli.command {
        Command::Validate {
            file,
            format,
            max_bytes,
        } => {
            if let Some(format) = format {
                config.format = format;
            }
            if let Some(max_bytes) = max_bytes {
                config.max_file_bytes = max_bytes;
            }
            validate_file(&file, &config)
        }
        Command::Sample { output } => {
            write_sample(output.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn read_upload(path: &Path, max_bytes: u64) -> anyhow::Result<String> {
    let metadata = fs::metadata(path)
        .with_context(|| format!("Failed to stat {}", path.display()))?;
    if metadata.len() > max_bytes {
        bail!(
            "{} is {} bytes, larger than the {} byte limit",
            path.display(),
            metadata.len(),
            max_bytes
        );
    }

    fs::read_to_string(path).with_context(|| format!("Failed to read {} as UTF-8 text", path.display()))
}

fn validate_file(path: &Path, config: &CliConfig) -> anyhow::Result<ExitCode> {
    let text = read_upload(path, config.max_file_bytes)?;
    info!(file = %path.display(), bytes = text.len(), "Validating import file");

    let result = validate_import(&text).unwrap_or_else(|fatal| {
        warn!(error = %fatal, "File rejected before row validation");
        ImportValidationResult::from(fatal)
    });

    info!(
        valid = result.is_valid,
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        "Validation complete"
    );

    let rendered = report::render(&result, config.format).context("Failed to render result")?;
    println!("{}", rendered);

    Ok(if result.is_valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn write_sample(output: Option<&Path>) -> anyhow::Result<()> {
    let csv = generate_sample_csv().context("Failed to build the sample template")?;
    match output {
        Some(path) => {
            fs::write(path, &csv).with_context(|| format!("Failed to write {}", path.display()))?;
            info!(file = %path.display(), "Sample template written");
        }
        None => print!("{}", csv),
    }
    Ok(())
}
