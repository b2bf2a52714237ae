//! CLI error handling

use thiserror::Error;

use domain_allocation::AllocationError;

/// Errors raised while running a job
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid job document: {0}")]
    InvalidJob(#[from] serde_json::Error),

    #[error("Allocation failed: {0}")]
    Allocation(#[from] AllocationError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
