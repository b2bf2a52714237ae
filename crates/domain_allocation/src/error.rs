//! Allocation domain errors

use thiserror::Error;

use core_kernel::MoneyError;

use crate::meter_kind::MeterKind;
use crate::method::DistributionMethod;
use crate::precondition::PreconditionViolation;

/// Errors that can occur in the allocation domain
#[derive(Debug, Error, PartialEq)]
pub enum AllocationError {
    /// The distribution method is not legal for the meter kind
    #[error("Distribution method {method} is not allowed for meter kind {kind}")]
    MethodNotAllowed {
        kind: MeterKind,
        method: DistributionMethod,
    },

    /// A required calculation input was not supplied
    #[error("Missing input for {method}: {input}")]
    MissingInput {
        method: DistributionMethod,
        input: &'static str,
    },

    /// An input was supplied but cannot be used
    #[error("Invalid input for {method}: {reason}")]
    InvalidInput {
        method: DistributionMethod,
        reason: String,
    },

    /// The building snapshot does not satisfy the method's preconditions
    #[error("Precondition failed: {0}")]
    PreconditionFailed(PreconditionViolation),

    /// Calculation inputs were rejected by the validation facade
    #[error("Invalid calculation inputs: {0}")]
    InvalidInputs(String),

    /// Reconciliation needs at least one share
    #[error("Cannot reconcile an empty list of shares")]
    EmptyShares,

    /// Money arithmetic failed
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),
}
