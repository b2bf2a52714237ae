//! Property-Based Test Generators
//!
//! Proptest strategies for allocation inputs.

use core_kernel::{Currency, Money};
use domain_allocation::{DistributionMethod, MeterKind, MeterReading};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for generating supported currencies
pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::CZK),
        Just(Currency::EUR),
        Just(Currency::USD),
        Just(Currency::GBP),
        Just(Currency::PLN),
        Just(Currency::CHF),
        Just(Currency::HUF),
    ]
}

/// Strategy for non-negative totals, two decimal places
pub fn total_amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for unrounded CZK shares with up to six decimal places
pub fn raw_shares_strategy(max_len: usize) -> impl Strategy<Value = Vec<Money>> {
    proptest::collection::vec(0i64..100_000_000i64, 1..=max_len).prop_map(|values| {
        values
            .into_iter()
            .map(|v| Money::new(Decimal::new(v, 6), Currency::CZK))
            .collect()
    })
}

/// Strategy for apartment floor areas (10 to 200 m², one decimal place)
pub fn areas_strategy(max_len: usize) -> impl Strategy<Value = Vec<Decimal>> {
    proptest::collection::vec(100i64..2_000i64, 1..=max_len)
        .prop_map(|values| values.into_iter().map(|v| Decimal::new(v, 1)).collect())
}

/// Strategy for readings, including ones where the counter went backwards
pub fn reading_strategy() -> impl Strategy<Value = MeterReading> {
    (0i64..1_000_000i64, 0i64..1_000_000i64)
        .prop_map(|(current, previous)| MeterReading::new(Decimal::new(current, 3), Decimal::new(previous, 3)))
}

/// Strategy for unit counts (1 to 50)
pub fn unit_count_strategy() -> impl Strategy<Value = u32> {
    1u32..=50u32
}

/// Strategy for any meter kind
pub fn meter_kind_strategy() -> impl Strategy<Value = MeterKind> {
    proptest::sample::select(MeterKind::ALL.to_vec())
}

/// Strategy for any distribution method
pub fn method_strategy() -> impl Strategy<Value = DistributionMethod> {
    proptest::sample::select(DistributionMethod::ALL.to_vec())
}
