//! Allocation pipeline
//!
//! [`DistributionEngine`] chains the pieces in the order a billing run
//! needs them: policy check, precondition check, input validation,
//! calculation, and rounding reconciliation.

use tracing::{instrument, warn};

use crate::calculator::{calculate, DistributionRequest, DistributionResult};
use crate::error::AllocationError;
use crate::meter::Meter;
use crate::meter_kind::MeterKind;
use crate::method::DistributionMethod;
use crate::precondition::{check, PreconditionContext};
use crate::reconciliation::{ReconciliationStrategy, RoundingStrategy};
use crate::validation::{ensure_method_allowed, validate_calculation_inputs};

/// Runs complete distributions with a configured rounding strategy
#[derive(Debug)]
pub struct DistributionEngine {
    strategy: Box<dyn RoundingStrategy>,
}

impl Default for DistributionEngine {
    fn default() -> Self {
        Self::from_config(ReconciliationStrategy::default())
    }
}

impl DistributionEngine {
    /// Creates an engine with a custom strategy
    pub fn new(strategy: Box<dyn RoundingStrategy>) -> Self {
        Self { strategy }
    }

    /// Creates an engine from a configured strategy choice
    pub fn from_config(strategy: ReconciliationStrategy) -> Self {
        Self::new(strategy.build())
    }

    /// Name of the rounding strategy in use
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Splits a cost and returns rounded shares that sum to the total
    ///
    /// # Errors
    ///
    /// * [`AllocationError::MethodNotAllowed`] if the policy table forbids the method
    /// * [`AllocationError::PreconditionFailed`] if the building snapshot does not allow it
    /// * [`AllocationError::InvalidInputs`] if the request lacks required data
    /// * calculator and reconciliation errors otherwise
    #[instrument(skip(self, ctx, request), fields(strategy = self.strategy.name()))]
    pub fn distribute(
        &self,
        kind: MeterKind,
        method: DistributionMethod,
        ctx: &PreconditionContext,
        request: &DistributionRequest,
    ) -> Result<DistributionResult, AllocationError> {
        ensure_method_allowed(kind, method)?;

        let precondition = check(kind, method, ctx);
        if let Some(violation) = precondition.reason {
            warn!(%violation, "Distribution blocked by precondition");
            return Err(AllocationError::PreconditionFailed(violation));
        }

        validate_calculation_inputs(method, request).into_result()?;

        let raw = calculate(method, request)?;
        let total = raw.total.round_to_currency();
        let amounts = self.strategy.reconcile(&raw.amounts, total)?;

        Ok(DistributionResult { amounts, total })
    }

    /// Splits a cost using the kind and method stored on `meter`
    pub fn distribute_for_meter(
        &self,
        meter: &Meter,
        ctx: &PreconditionContext,
        request: &DistributionRequest,
    ) -> Result<DistributionResult, AllocationError> {
        self.distribute(meter.kind, meter.method, ctx, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{Currency, Money};
    use rust_decimal_macros::dec;

    use crate::precondition::PreconditionViolation;

    #[test]
    fn test_three_way_equal_split_sums_to_total() {
        let ctx = PreconditionContext::new()
            .with_unit_count(3)
            .with_individual_meters(true);
        let request = DistributionRequest::new(Currency::CZK)
            .with_total_amount(dec!(100))
            .with_unit_count(3);

        let result = DistributionEngine::default()
            .distribute(MeterKind::Gas, DistributionMethod::PerApartment, &ctx, &request)
            .unwrap();

        let amounts: Vec<_> = result.amounts.iter().map(Money::amount).collect();
        assert_eq!(amounts, vec![dec!(33.33), dec!(33.33), dec!(33.34)]);
        assert_eq!(result.total.amount(), dec!(100));
    }

    #[test]
    fn test_precondition_blocks_before_calculation() {
        let ctx = PreconditionContext::new().with_unit_count(4);
        let request = DistributionRequest::new(Currency::CZK)
            .with_total_amount(dec!(100))
            .with_unit_count(4);

        let err = DistributionEngine::default()
            .distribute(MeterKind::Trash, DistributionMethod::PerApartment, &ctx, &request)
            .unwrap_err();
        assert_eq!(err, AllocationError::PreconditionFailed(PreconditionViolation::NoIndividualMeters));
    }
}
