//! Job input and output documents

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::Currency;
use domain_allocation::{
    DistributionMethod, DistributionRequest, DistributionResult, MeterKind, MeterScope,
    PreconditionContext,
};

/// Meter the job is billing
#[derive(Debug, Clone, Deserialize)]
pub struct MeterSpec {
    pub name: String,
    pub scope: MeterScope,
    /// Stored kind; when absent the kind is inferred from name and unit
    #[serde(default)]
    pub kind: Option<MeterKind>,
    #[serde(default)]
    pub unit: Option<String>,
}

/// One allocation job read from stdin or a file
#[derive(Debug, Clone, Deserialize)]
pub struct AllocationJob {
    pub meter: MeterSpec,
    /// Method to apply; defaults to the kind's default method
    #[serde(default)]
    pub method: Option<DistributionMethod>,
    #[serde(default)]
    pub context: PreconditionContext,
    /// Inputs for the calculator; `currency` falls back to the configured one
    pub request: JobRequest,
}

/// Calculator inputs as they appear in a job file
#[derive(Debug, Clone, Deserialize)]
pub struct JobRequest {
    #[serde(default)]
    pub currency: Option<Currency>,
    #[serde(flatten)]
    pub inputs: DistributionRequest,
}

impl JobRequest {
    /// Resolves the request currency against the configured default
    pub fn into_request(self, default_currency: Currency) -> DistributionRequest {
        DistributionRequest {
            currency: self.currency.unwrap_or(default_currency),
            ..self.inputs
        }
    }
}

/// Result document written to stdout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobOutput {
    pub meter_kind: MeterKind,
    pub method: DistributionMethod,
    pub currency: Currency,
    pub amounts: Vec<Decimal>,
    pub total: Decimal,
}

impl JobOutput {
    pub fn new(kind: MeterKind, method: DistributionMethod, result: &DistributionResult) -> Self {
        Self {
            meter_kind: kind,
            method,
            currency: result.currency(),
            amounts: result.amounts.iter().map(|m| m.amount()).collect(),
            total: result.total.amount(),
        }
    }
}
