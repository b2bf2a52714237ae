//! Utility Allocation - command-line calculator
//!
//! Reads one allocation job as JSON and writes the reconciled shares as JSON
//! to stdout. Logs go to stderr.
//!
//! # Usage
//!
//! ```bash
//! # Job from a file
//! allocation-calc job.json
//!
//! # Job from stdin, largest-remainder rounding, JSON logs
//! ALLOC_ROUNDING=largest_remainder ALLOC_LOG_JSON=true allocation-calc < job.json
//! ```
//!
//! # Environment Variables
//!
//! * `ALLOC_CURRENCY` - Currency for jobs that do not name one (default: CZK)
//! * `ALLOC_ROUNDING` - `last_share` or `largest_remainder` (default: last_share)
//! * `ALLOC_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `ALLOC_LOG_JSON` - Emit logs as JSON lines (default: false)

use std::io::Read;
use std::process::ExitCode;

use anyhow::Context;
use interface_cli::{config::CliConfig, run_job_to_json};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    // Load .env file if present
    dotenvy::dotenv().ok();

    match run() {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "Allocation job failed");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<String> {
    let config = CliConfig::from_env().context("failed to load ALLOC_* configuration")?;
    init_tracing(&config.log_level, config.log_json);

    tracing::debug!(
        currency = %config.currency,
        rounding = ?config.rounding,
        "Configuration loaded"
    );

    let input = read_input(std::env::args().nth(1))?;
    let output = run_job_to_json(&input, &config)?;
    Ok(output)
}

/// Reads the job from `path`, or from stdin when no path is given or it is `-`
fn read_input(path: Option<String>) -> anyhow::Result<String> {
    match path.as_deref() {
        None | Some("-") => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read job from stdin")?;
            Ok(buffer)
        }
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("failed to read job file {path}"))
        }
    }
}

/// Initializes the tracing subscriber; output goes to stderr so stdout stays
/// machine-readable
fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}
