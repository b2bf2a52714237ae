//! Unit tests for the Money module
//!
//! Tests cover money creation, checked arithmetic, rounding,
//! currency handling, and edge cases.

use core_kernel::{Money, Currency, MoneyError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

mod creation {
    use super::*;

    #[test]
    fn test_new_creates_money_with_correct_amount() {
        let m = Money::new(dec!(100.50), Currency::CZK);
        assert_eq!(m.amount(), dec!(100.50));
        assert_eq!(m.currency(), Currency::CZK);
    }

    #[test]
    fn test_new_does_not_round() {
        let m = Money::new(dec!(100.123456789), Currency::EUR);
        assert_eq!(m.amount(), dec!(100.123456789));
    }

    #[test]
    fn test_from_minor_converts_haler_correctly() {
        let m = Money::from_minor(10050, Currency::CZK);
        assert_eq!(m.amount(), dec!(100.50));
    }

    #[test]
    fn test_zero_creates_zero_amount() {
        let m = Money::zero(Currency::EUR);
        assert!(m.is_zero());
        assert!(!m.is_negative());
        assert!(!m.is_positive());
    }

    #[test]
    fn test_default_currency_is_czk() {
        assert_eq!(Currency::default(), Currency::CZK);
    }
}

mod arithmetic {
    use super::*;

    #[test]
    fn test_checked_sub() {
        let a = Money::new(dec!(100.00), Currency::CZK);
        let b = Money::new(dec!(33.34), Currency::CZK);
        assert_eq!(a.checked_sub(&b).unwrap().amount(), dec!(66.66));
    }

    #[test]
    fn test_checked_sub_currency_mismatch() {
        let a = Money::new(dec!(1), Currency::CZK);
        let b = Money::new(dec!(1), Currency::PLN);
        assert_eq!(
            a.checked_sub(&b),
            Err(MoneyError::CurrencyMismatch("CZK".to_string(), "PLN".to_string()))
        );
    }

    #[test]
    fn test_multiply_by_price() {
        let price = Money::new(dec!(1.2), Currency::CZK);
        assert_eq!(price.checked_multiply(dec!(5.2)).unwrap().amount(), dec!(6.24));
    }

    #[test]
    fn test_multiply_large_price_by_consumption_overflows() {
        let price = Money::new(dec!(1000000000000000), Currency::CZK);
        assert_eq!(
            price.checked_multiply(dec!(100000000000000)),
            Err(MoneyError::Overflow)
        );
    }

    #[test]
    fn test_divide_keeps_full_precision() {
        let total = Money::new(dec!(100), Currency::CZK);
        let share = total.divide(dec!(3)).unwrap();
        assert!(share.amount() > dec!(33.3333333));
        assert!(share.amount() < dec!(33.3333334));
    }

    #[test]
    fn test_negation() {
        let m = -Money::new(dec!(5), Currency::EUR);
        assert!(m.is_negative());
    }

    #[test]
    fn test_try_sum_empty_is_zero() {
        let total = Money::try_sum(Vec::<Money>::new().iter(), Currency::EUR).unwrap();
        assert!(total.is_zero());
    }

    #[test]
    fn test_try_sum_rejects_mixed_currencies() {
        let parts = [
            Money::new(dec!(1), Currency::EUR),
            Money::new(dec!(1), Currency::USD),
        ];
        assert!(Money::try_sum(&parts, Currency::EUR).is_err());
    }
}

mod rounding {
    use super::*;

    #[test]
    fn test_round_to_currency() {
        let m = Money::new(dec!(6.2449), Currency::CZK);
        assert_eq!(m.round_to_currency().amount(), dec!(6.24));
    }

    #[test]
    fn test_minor_unit() {
        assert_eq!(Currency::EUR.minor_unit(), dec!(0.01));
    }

    #[test]
    fn test_is_whole_minor_units() {
        assert!(Money::new(dec!(33.34), Currency::CZK).is_whole_minor_units());
        assert!(!Money::new(dec!(33.345), Currency::CZK).is_whole_minor_units());
        assert!(Money::new(Decimal::ZERO, Currency::CZK).is_whole_minor_units());
    }
}

mod display {
    use super::*;

    #[test]
    fn test_display_uses_two_decimals() {
        let m = Money::new(dec!(1250.5), Currency::CZK);
        assert_eq!(m.to_string(), "1250.50 Kč");
    }

    #[test]
    fn test_currency_display_is_iso_code() {
        assert_eq!(Currency::HUF.to_string(), "HUF");
    }
}
