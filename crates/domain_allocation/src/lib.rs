//! Utility Allocation Domain
//!
//! This crate decides how the cost of a building utility is split across
//! its apartments and computes the resulting shares.
//!
//! # Pipeline
//!
//! 1. **Classifier** - maps a legacy meter name to a [`MeterKind`] (import only)
//! 2. **Policy registry** - legal and default [`DistributionMethod`]s per kind
//! 3. **Precondition evaluator** - is the method applicable to the building now?
//! 4. **Calculator** - unrounded per-unit shares
//! 5. **Reconciliation** - rounded shares that add up to the total exactly
//!
//! The validation facade and [`DistributionEngine`] tie these together.
//! Everything here is synchronous and free of I/O; the only shared state is
//! the constant policy table.
//!
//! # Example
//!
//! ```rust
//! use core_kernel::Currency;
//! use domain_allocation::{
//!     DistributionEngine, DistributionMethod, DistributionRequest, MeterKind, PreconditionContext,
//! };
//! use rust_decimal_macros::dec;
//!
//! let ctx = PreconditionContext::new()
//!     .with_unit_count(3)
//!     .with_total_area(dec!(100));
//! let request = DistributionRequest::new(Currency::CZK)
//!     .with_total_amount(dec!(1000))
//!     .with_areas(vec![dec!(30), dec!(20), dec!(50)]);
//!
//! let result = DistributionEngine::default()
//!     .distribute(MeterKind::Heating, DistributionMethod::PerArea, &ctx, &request)
//!     .unwrap();
//! assert_eq!(result.amounts[2].amount(), dec!(500));
//! ```

pub mod meter_kind;
pub mod method;
pub mod classifier;
pub mod policy;
pub mod precondition;
pub mod calculator;
pub mod reconciliation;
pub mod validation;
pub mod meter;
pub mod engine;
pub mod error;

pub use meter_kind::{MeterKind, MeterScope};
pub use method::{DistributionMethod, UnknownMethod};
pub use classifier::classify;
pub use policy::{
    allowed_methods, default_method, is_allowed, policy_for, supports_individual_metering,
    AllocationPolicy,
};
pub use precondition::{
    check, PreconditionContext, PreconditionResult, PreconditionRule, PreconditionViolation,
};
pub use calculator::{calculate, DistributionRequest, DistributionResult, MeterReading, MAX_SHARES};
pub use reconciliation::{
    reconcile, LargestRemainder, LastShareAbsorbs, ReconciliationStrategy, RoundingStrategy,
};
pub use validation::{
    ensure_method_allowed, validate_calculation_inputs, validate_meter_distribution,
    InputValidation,
};
pub use meter::Meter;
pub use engine::DistributionEngine;
pub use error::AllocationError;
