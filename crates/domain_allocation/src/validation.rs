//! Validation facade
//!
//! Two separate entry points with different failure semantics:
//!
//! - [`validate_meter_distribution`] guards meter creation and editing. A
//!   method that the policy table forbids is a data-integrity problem, so it
//!   is a hard error and the write must be rejected.
//! - [`validate_calculation_inputs`] guards a calculation. Missing data is
//!   expected in day-to-day use, so the outcome is returned as a value the
//!   caller can turn into a form warning.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use core_kernel::Money;

use crate::calculator::DistributionRequest;
use crate::classifier::classify;
use crate::error::AllocationError;
use crate::meter_kind::{MeterKind, MeterScope};
use crate::method::DistributionMethod;
use crate::policy;

/// Rejects a method the policy table does not allow for `kind`
pub fn ensure_method_allowed(
    kind: MeterKind,
    method: DistributionMethod,
) -> Result<(), AllocationError> {
    if policy::is_allowed(kind, method) {
        return Ok(());
    }
    warn!(%kind, %method, "Rejected meter configuration");
    Err(AllocationError::MethodNotAllowed { kind, method })
}

/// Classifies a meter by name and checks its configured method
///
/// Returns the inferred kind on success.
///
/// # Errors
///
/// [`AllocationError::MethodNotAllowed`] if the method is not in the
/// kind's allowed set.
pub fn validate_meter_distribution(
    name: &str,
    scope: MeterScope,
    method: DistributionMethod,
) -> Result<MeterKind, AllocationError> {
    let kind = classify(name, scope, None);
    ensure_method_allowed(kind, method)?;
    Ok(kind)
}

/// Outcome of [`validate_calculation_inputs`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputValidation {
    pub valid: bool,
    pub reason: Option<String>,
}

impl InputValidation {
    pub fn valid() -> Self {
        Self {
            valid: true,
            reason: None,
        }
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            reason: Some(reason.into()),
        }
    }

    /// Converts a failed validation into an error
    pub fn into_result(self) -> Result<(), AllocationError> {
        match self.reason {
            Some(reason) if !self.valid => Err(AllocationError::InvalidInputs(reason)),
            _ => Ok(()),
        }
    }
}

/// Checks that `request` carries what the calculator needs for `method`
pub fn validate_calculation_inputs(
    method: DistributionMethod,
    request: &DistributionRequest,
) -> InputValidation {
    if let Some(total) = request.total_amount {
        if total < Decimal::ZERO {
            return InputValidation::invalid("total amount must not be negative");
        }
    }

    match method {
        DistributionMethod::PerConsumption => {
            if request.readings.is_empty() {
                return InputValidation::invalid("meter readings are required");
            }
            if request.price_per_unit.is_none() {
                return InputValidation::invalid("price per unit is required");
            }
        }
        DistributionMethod::PerApartment => {
            if request.total_amount.is_none() {
                return InputValidation::invalid("total amount is required");
            }
            if request.unit_count.unwrap_or(0) == 0 {
                return InputValidation::invalid("unit count must be positive");
            }
        }
        DistributionMethod::PerPerson => {
            if request.total_amount.is_none() {
                return InputValidation::invalid("total amount is required");
            }
            if request.headcount().unwrap_or(0) == 0 {
                return InputValidation::invalid("occupant count must be positive");
            }
        }
        DistributionMethod::PerArea => {
            if request.total_amount.is_none() {
                return InputValidation::invalid("total amount is required");
            }
            if request.areas.is_empty() || request.sum_area() <= Decimal::ZERO {
                return InputValidation::invalid("total area must be positive");
            }
        }
        DistributionMethod::FixedSplit => {
            let fixed = request.fixed_amount.unwrap_or(Decimal::ZERO);
            if fixed <= Decimal::ZERO {
                return InputValidation::invalid("fixed amount must be positive");
            }
            // Every unit is billed the same fee, so it must not need rounding.
            if !Money::new(fixed, request.currency).is_whole_minor_units() {
                return InputValidation::invalid("fixed amount must be a whole number of minor units");
            }
            if request.unit_count.unwrap_or(0) == 0 {
                return InputValidation::invalid("unit count must be positive");
            }
        }
    }

    InputValidation::valid()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    #[test]
    fn test_meter_distribution_accepts_default() {
        let kind = validate_meter_distribution("Teplá voda", MeterScope::Individual, DistributionMethod::PerConsumption)
            .unwrap();
        assert_eq!(kind, MeterKind::HotWater);
    }

    #[test]
    fn test_meter_distribution_rejects_disallowed_method() {
        let err = validate_meter_distribution("Výtah", MeterScope::Communal, DistributionMethod::PerConsumption)
            .unwrap_err();
        assert_eq!(
            err,
            AllocationError::MethodNotAllowed {
                kind: MeterKind::Elevator,
                method: DistributionMethod::PerConsumption
            }
        );
    }

    #[test]
    fn test_negative_total_is_invalid_for_every_method() {
        let request = DistributionRequest::new(Currency::CZK).with_total_amount(dec!(-1));
        for method in DistributionMethod::ALL {
            let result = validate_calculation_inputs(method, &request);
            assert_eq!(result.reason.as_deref(), Some("total amount must not be negative"));
        }
    }

    #[test]
    fn test_fixed_fee_below_minor_unit_is_invalid() {
        let request = DistributionRequest::new(Currency::CZK)
            .with_fixed_amount(dec!(10.005))
            .with_unit_count(3);
        let result = validate_calculation_inputs(DistributionMethod::FixedSplit, &request);
        assert_eq!(
            result.reason.as_deref(),
            Some("fixed amount must be a whole number of minor units")
        );

        let request = request.with_fixed_amount(dec!(10.50));
        assert!(validate_calculation_inputs(DistributionMethod::FixedSplit, &request).valid);
    }

    #[test]
    fn test_into_result() {
        assert_eq!(InputValidation::valid().into_result(), Ok(()));
        assert_eq!(
            InputValidation::invalid("nope").into_result(),
            Err(AllocationError::InvalidInputs("nope".to_string()))
        );
    }
}
