//! Precondition evaluation
//!
//! The policy registry says which methods are legal for a meter kind in
//! principle. The evaluator answers the runtime question: does the
//! building, as it is right now, let us apply the chosen method?
//!
//! Rules run in a fixed order and the first failing rule decides the
//! result. A failed precondition is a recoverable condition (missing data,
//! missing hardware), so it is returned as a value rather than an error.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::meter_kind::MeterKind;
use crate::method::DistributionMethod;

/// Snapshot of building state at calculation time
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PreconditionContext {
    /// Number of units taking part in the split
    pub unit_count: u32,
    /// Sum of the floor areas of those units
    pub total_area: Decimal,
    /// Whether every unit has its own meter for this utility
    pub has_individual_meters: bool,
    /// Whether a fixed fee has been configured
    pub has_fixed_amount: bool,
    /// Whether heat-cost allocators are installed
    pub has_heating_allocators: bool,
}

impl PreconditionContext {
    /// Creates an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the unit count
    pub fn with_unit_count(mut self, unit_count: u32) -> Self {
        self.unit_count = unit_count;
        self
    }

    /// Sets the summed floor area
    pub fn with_total_area(mut self, total_area: Decimal) -> Self {
        self.total_area = total_area;
        self
    }

    /// Marks whether individual meters exist
    pub fn with_individual_meters(mut self, present: bool) -> Self {
        self.has_individual_meters = present;
        self
    }

    /// Marks whether a fixed amount is configured
    pub fn with_fixed_amount(mut self, present: bool) -> Self {
        self.has_fixed_amount = present;
        self
    }

    /// Marks whether heat-cost allocators exist
    pub fn with_heating_allocators(mut self, present: bool) -> Self {
        self.has_heating_allocators = present;
        self
    }
}

/// Why a precondition failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreconditionViolation {
    MissingUnitAreas,
    NoUnits,
    NoIndividualMeters,
    NoFixedAmount,
    NoHeatingAllocators,
}

impl PreconditionViolation {
    /// User-facing message
    pub fn message(&self) -> &'static str {
        match self {
            PreconditionViolation::MissingUnitAreas => "missing unit areas",
            PreconditionViolation::NoUnits => "no units",
            PreconditionViolation::NoIndividualMeters => "no individual meters",
            PreconditionViolation::NoFixedAmount => "no fixed amount",
            PreconditionViolation::NoHeatingAllocators => "no heating allocators",
        }
    }
}

impl fmt::Display for PreconditionViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Outcome of a precondition check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PreconditionResult {
    pub allowed: bool,
    pub reason: Option<PreconditionViolation>,
}

impl PreconditionResult {
    /// A passing result
    pub fn allowed() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    /// A failing result
    pub fn denied(reason: PreconditionViolation) -> Self {
        Self {
            allowed: false,
            reason: Some(reason),
        }
    }

    /// The failure message, if any
    pub fn reason_text(&self) -> Option<&'static str> {
        self.reason.map(|r| r.message())
    }
}

/// A named precondition rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreconditionRule {
    /// `per_area` needs a positive total area
    AreaRequired,
    /// `per_apartment` needs at least one unit
    UnitsRequired,
    /// `per_apartment` is only offered where units have their own meters.
    ///
    /// Equal splitting does not read the meters, so this ties two unrelated
    /// facts together. Kept as its own rule so it can be dropped in one place.
    EqualSplitRequiresIndividualMeters,
    /// `fixed_split` needs a configured fee
    FixedAmountRequired,
    /// Heating split per apartment needs heat-cost allocators
    HeatingAllocatorsRequired,
}

impl PreconditionRule {
    /// Evaluation order
    pub const ORDERED: [PreconditionRule; 5] = [
        PreconditionRule::AreaRequired,
        PreconditionRule::UnitsRequired,
        PreconditionRule::EqualSplitRequiresIndividualMeters,
        PreconditionRule::FixedAmountRequired,
        PreconditionRule::HeatingAllocatorsRequired,
    ];

    /// Returns the violation if this rule applies and fails
    pub fn evaluate(
        &self,
        kind: MeterKind,
        method: DistributionMethod,
        ctx: &PreconditionContext,
    ) -> Option<PreconditionViolation> {
        use DistributionMethod::*;

        let failed = match self {
            PreconditionRule::AreaRequired => method == PerArea && ctx.total_area <= Decimal::ZERO,
            PreconditionRule::UnitsRequired => method == PerApartment && ctx.unit_count == 0,
            PreconditionRule::EqualSplitRequiresIndividualMeters => {
                method == PerApartment && !ctx.has_individual_meters
            }
            PreconditionRule::FixedAmountRequired => method == FixedSplit && !ctx.has_fixed_amount,
            PreconditionRule::HeatingAllocatorsRequired => {
                kind == MeterKind::Heating && method == PerApartment && !ctx.has_heating_allocators
            }
        };

        failed.then_some(self.violation())
    }

    fn violation(&self) -> PreconditionViolation {
        match self {
            PreconditionRule::AreaRequired => PreconditionViolation::MissingUnitAreas,
            PreconditionRule::UnitsRequired => PreconditionViolation::NoUnits,
            PreconditionRule::EqualSplitRequiresIndividualMeters => {
                PreconditionViolation::NoIndividualMeters
            }
            PreconditionRule::FixedAmountRequired => PreconditionViolation::NoFixedAmount,
            PreconditionRule::HeatingAllocatorsRequired => PreconditionViolation::NoHeatingAllocators,
        }
    }
}

/// Checks whether `method` can be applied to a meter of `kind` right now
///
/// Returns the first failing rule; never aggregates.
pub fn check(
    kind: MeterKind,
    method: DistributionMethod,
    ctx: &PreconditionContext,
) -> PreconditionResult {
    match PreconditionRule::ORDERED
        .iter()
        .find_map(|rule| rule.evaluate(kind, method, ctx))
    {
        Some(violation) => {
            debug!(%kind, %method, %violation, "Precondition failed");
            PreconditionResult::denied(violation)
        }
        None => PreconditionResult::allowed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn ready_building() -> PreconditionContext {
        PreconditionContext::new()
            .with_unit_count(5)
            .with_total_area(dec!(320.5))
            .with_individual_meters(true)
            .with_fixed_amount(true)
            .with_heating_allocators(true)
    }

    #[test]
    fn test_ready_building_passes_every_method() {
        for method in DistributionMethod::ALL {
            assert_eq!(check(MeterKind::Heating, method, &ready_building()), PreconditionResult::allowed());
        }
    }

    #[test]
    fn test_heating_per_apartment_without_allocators() {
        let ctx = ready_building().with_heating_allocators(false);
        let result = check(MeterKind::Heating, DistributionMethod::PerApartment, &ctx);
        assert!(!result.allowed);
        assert_eq!(result.reason_text(), Some("no heating allocators"));
    }

    #[test]
    fn test_allocators_only_matter_for_heating() {
        let ctx = ready_building().with_heating_allocators(false);
        assert!(check(MeterKind::Gas, DistributionMethod::PerApartment, &ctx).allowed);
        assert!(check(MeterKind::Heating, DistributionMethod::PerArea, &ctx).allowed);
    }

    #[test]
    fn test_first_failure_wins() {
        let ctx = PreconditionContext::new();
        let result = check(MeterKind::Heating, DistributionMethod::PerApartment, &ctx);
        assert_eq!(result.reason, Some(PreconditionViolation::NoUnits));
    }

    #[test]
    fn test_negative_area_is_missing() {
        let ctx = ready_building().with_total_area(dec!(-1));
        let result = check(MeterKind::Ventilation, DistributionMethod::PerArea, &ctx);
        assert_eq!(result.reason_text(), Some("missing unit areas"));
    }
}
