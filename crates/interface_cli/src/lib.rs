//! Allocation CLI
//!
//! Reads an allocation job (JSON), runs it through the
//! [`DistributionEngine`], and renders the reconciled shares as JSON.
//!
//! # Job format
//!
//! ```json
//! {
//!   "meter": { "name": "Teplo", "scope": "individual", "kind": "heating" },
//!   "method": "per_area",
//!   "context": { "unit_count": 3, "total_area": "100" },
//!   "request": { "total_amount": "1000", "areas": ["30", "20", "50"] }
//! }
//! ```

pub mod config;
pub mod dto;
pub mod error;

use tracing::{debug, info};

use core_kernel::BuildingId;
use domain_allocation::{DistributionEngine, Meter};

use crate::config::CliConfig;
use crate::dto::{AllocationJob, JobOutput};
use crate::error::CliError;

/// Parses and runs one job
pub fn run_job(input: &str, config: &CliConfig) -> Result<JobOutput, CliError> {
    let job: AllocationJob = serde_json::from_str(input)?;
    let engine = DistributionEngine::from_config(config.rounding);

    let meter = resolve_meter(&job)?;
    debug!(meter_id = %meter.id, kind = %meter.kind, method = %meter.method, "Meter resolved");

    let request = job.request.into_request(config.currency);
    let result = engine.distribute_for_meter(&meter, &job.context, &request)?;

    info!(
        kind = %meter.kind,
        method = %meter.method,
        shares = result.amounts.len(),
        total = %result.total,
        strategy = engine.strategy_name(),
        "Allocation complete"
    );
    Ok(JobOutput::new(meter.kind, meter.method, &result))
}

/// Parses, runs and serialises one job
pub fn run_job_to_json(input: &str, config: &CliConfig) -> Result<String, CliError> {
    let output = run_job(input, config)?;
    Ok(serde_json::to_string_pretty(&output)?)
}

// Jobs are not tied to a stored building, so the meter gets a throwaway one.
fn resolve_meter(job: &AllocationJob) -> Result<Meter, CliError> {
    let spec = &job.meter;
    let building_id = BuildingId::new();

    let meter = match spec.kind {
        Some(kind) => {
            let meter = match job.method {
                Some(method) => Meter::new(building_id, spec.name.clone(), spec.scope, kind, method)?,
                None => Meter::with_default_method(building_id, spec.name.clone(), spec.scope, kind),
            };
            match &spec.unit {
                Some(unit) => meter.with_unit(unit.clone()),
                None => meter,
            }
        }
        None => Meter::import(
            building_id,
            spec.name.clone(),
            spec.scope,
            spec.unit.clone(),
            job.method,
        )?,
    };
    Ok(meter)
}
