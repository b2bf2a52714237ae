//! Custom Test Assertions
//!
//! Assertion helpers for allocation results that print the whole share
//! vector when they fail.

use core_kernel::Money;
use rust_decimal::Decimal;

/// Asserts that two Money values are approximately equal within a tolerance
///
/// # Panics
///
/// Panics if the currencies don't match or the amounts differ by more than tolerance
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );

    let diff = (actual.amount() - expected.amount()).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual.amount(),
        expected.amount(),
        diff,
        tolerance
    );
}

/// Asserts that shares sum exactly to a total
///
/// # Panics
///
/// Panics if the sum doesn't equal the total or a share has another currency
pub fn assert_money_sum_equals(parts: &[Money], total: &Money) {
    let sum = parts.iter().fold(Money::zero(total.currency()), |acc, m| {
        acc.checked_add(m).expect("Currency mismatch in sum")
    });

    assert_eq!(
        sum.amount(),
        total.amount(),
        "Sum of parts ({}) doesn't equal total ({}); parts: {:?}",
        sum.amount(),
        total.amount(),
        parts.iter().map(Money::amount).collect::<Vec<_>>()
    );
}

/// Asserts that every share is a whole number of minor units
pub fn assert_all_whole_minor_units(parts: &[Money]) {
    for (index, part) in parts.iter().enumerate() {
        assert!(
            part.is_whole_minor_units(),
            "Share {} ({}) is not rounded to the currency's minor unit",
            index,
            part.amount()
        );
    }
}

/// Asserts that no share is negative
pub fn assert_non_negative(parts: &[Money]) {
    for (index, part) in parts.iter().enumerate() {
        assert!(
            !part.is_negative(),
            "Share {} is negative: {}",
            index,
            part.amount()
        );
    }
}

/// Asserts that shares match the expected decimals exactly
pub fn assert_amounts(parts: &[Money], expected: &[Decimal]) {
    let actual: Vec<Decimal> = parts.iter().map(Money::amount).collect();
    assert_eq!(actual, expected, "Share amounts differ");
}

/// Asserts that a decimal value is approximately equal to another
pub fn assert_decimal_approx_eq(actual: Decimal, expected: Decimal, tolerance: Decimal) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "Decimals differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual,
        expected,
        diff,
        tolerance
    );
}

/// Asserts that a result is Ok and returns the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $msg:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Asserts that an error matches a specific variant
#[macro_export]
macro_rules! assert_err_variant {
    ($result:expr, $pattern:pat) => {
        match $result {
            Ok(value) => panic!("Expected Err matching {}, got Ok({:?})", stringify!($pattern), value),
            Err(ref e) => {
                assert!(
                    matches!(e, $pattern),
                    "Error {:?} does not match pattern {}",
                    e,
                    stringify!($pattern)
                );
            }
        }
    };
}
