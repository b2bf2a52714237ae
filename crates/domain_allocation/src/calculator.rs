//! Distribution calculator
//!
//! Pure arithmetic turning readings, areas or fees into per-unit shares.
//! Shares are returned at full decimal precision; rounding to the currency
//! happens later in [`reconciliation`](crate::reconciliation).
//!
//! Missing inputs are always an error. The calculator never substitutes a
//! zero or a default for data it was not given.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::{Currency, Money};

use crate::error::AllocationError;
use crate::method::DistributionMethod;

/// Upper bound on the number of shares an equal or fixed split may produce
pub const MAX_SHARES: u32 = 100_000;

/// One unit's meter reading for the billing period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeterReading {
    /// Reading at the end of the period
    pub current: Decimal,
    /// Reading at the start of the period
    pub previous: Decimal,
}

impl MeterReading {
    /// Creates a reading pair
    pub fn new(current: Decimal, previous: Decimal) -> Self {
        Self { current, previous }
    }

    /// Consumption over the period, clamped at zero
    ///
    /// A lower current reading means the meter was replaced or rolled over;
    /// that unit is billed nothing rather than credited.
    pub fn consumption(&self) -> Decimal {
        (self.current - self.previous).max(Decimal::ZERO)
    }
}

/// Inputs for one distribution
///
/// Which fields are required depends on the method:
///
/// | Method            | Required                                   |
/// |-------------------|--------------------------------------------|
/// | `per_consumption` | `readings`, `price_per_unit`               |
/// | `per_apartment`   | `total_amount`, `unit_count`               |
/// | `per_person`      | `total_amount`, `occupant_count` or `unit_count` |
/// | `per_area`        | `total_amount`, `areas`                    |
/// | `fixed_split`     | `fixed_amount`, `unit_count`               |
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DistributionRequest {
    pub currency: Currency,
    /// Cost to be split
    pub total_amount: Option<Decimal>,
    /// Per-unit readings, in unit order
    pub readings: Vec<MeterReading>,
    /// Price of one unit of consumption
    pub price_per_unit: Option<Decimal>,
    /// Per-unit floor areas, in unit order
    pub areas: Vec<Decimal>,
    /// Area denominator; defaults to the sum of positive `areas`
    pub total_area: Option<Decimal>,
    /// Fee charged to every unit under `fixed_split`
    pub fixed_amount: Option<Decimal>,
    pub unit_count: Option<u32>,
    pub occupant_count: Option<u32>,
}

impl DistributionRequest {
    /// Creates an empty request in `currency`
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            ..Default::default()
        }
    }

    pub fn with_total_amount(mut self, amount: Decimal) -> Self {
        self.total_amount = Some(amount);
        self
    }

    pub fn with_readings(mut self, readings: Vec<MeterReading>) -> Self {
        self.readings = readings;
        self
    }

    /// Appends one unit's reading
    pub fn add_reading(mut self, current: Decimal, previous: Decimal) -> Self {
        self.readings.push(MeterReading::new(current, previous));
        self
    }

    pub fn with_price_per_unit(mut self, price: Decimal) -> Self {
        self.price_per_unit = Some(price);
        self
    }

    pub fn with_areas(mut self, areas: Vec<Decimal>) -> Self {
        self.areas = areas;
        self
    }

    pub fn with_total_area(mut self, total_area: Decimal) -> Self {
        self.total_area = Some(total_area);
        self
    }

    pub fn with_fixed_amount(mut self, amount: Decimal) -> Self {
        self.fixed_amount = Some(amount);
        self
    }

    pub fn with_unit_count(mut self, count: u32) -> Self {
        self.unit_count = Some(count);
        self
    }

    pub fn with_occupant_count(mut self, count: u32) -> Self {
        self.occupant_count = Some(count);
        self
    }

    /// Area denominator for `per_area`
    pub fn sum_area(&self) -> Decimal {
        self.total_area.unwrap_or_else(|| {
            self.areas
                .iter()
                .filter(|a| **a > Decimal::ZERO)
                .sum()
        })
    }

    /// Divisor for `per_person`
    pub fn headcount(&self) -> Option<u32> {
        self.occupant_count.or(self.unit_count)
    }
}

/// Per-unit shares produced by the calculator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionResult {
    /// One share per unit (or per person for `per_person`), in input order
    pub amounts: Vec<Money>,
    /// Amount the shares are meant to add up to
    pub total: Money,
}

impl DistributionResult {
    pub fn currency(&self) -> Currency {
        self.total.currency()
    }

    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }
}

/// Splits a cost according to `method`
///
/// # Errors
///
/// * [`AllocationError::MissingInput`] when a required field is absent
/// * [`AllocationError::InvalidInput`] when a field is present but unusable
///   (zero divisor, negative amount)
///
/// # Example
///
/// ```rust
/// use core_kernel::Currency;
/// use domain_allocation::{calculate, DistributionMethod, DistributionRequest};
/// use rust_decimal_macros::dec;
///
/// let request = DistributionRequest::new(Currency::CZK)
///     .with_total_amount(dec!(100.00))
///     .with_areas(vec![dec!(30), dec!(20), dec!(50)]);
///
/// let result = calculate(DistributionMethod::PerArea, &request).unwrap();
/// assert_eq!(result.amounts[0].amount(), dec!(30));
/// ```
pub fn calculate(
    method: DistributionMethod,
    request: &DistributionRequest,
) -> Result<DistributionResult, AllocationError> {
    let result = match method {
        DistributionMethod::PerConsumption => per_consumption(request),
        DistributionMethod::PerApartment => {
            let units = required_count(method, request.unit_count, "unit_count")?;
            equal_split(method, request, units)
        }
        DistributionMethod::PerPerson => {
            let people = required_count(method, request.headcount(), "occupant_count")?;
            equal_split(method, request, people)
        }
        DistributionMethod::PerArea => per_area(request),
        DistributionMethod::FixedSplit => fixed_split(request),
    }?;

    debug!(
        %method,
        shares = result.amounts.len(),
        total = %result.total,
        "Distribution calculated"
    );
    Ok(result)
}

fn per_consumption(request: &DistributionRequest) -> Result<DistributionResult, AllocationError> {
    let method = DistributionMethod::PerConsumption;
    if request.readings.is_empty() {
        return Err(AllocationError::MissingInput { method, input: "readings" });
    }
    let price = request
        .price_per_unit
        .ok_or(AllocationError::MissingInput { method, input: "price_per_unit" })?;
    if price < Decimal::ZERO {
        return Err(AllocationError::InvalidInput {
            method,
            reason: format!("price per unit must not be negative, got {}", price),
        });
    }

    let price = Money::new(price, request.currency);
    let amounts = request
        .readings
        .iter()
        .map(|reading| price.checked_multiply(reading.consumption()))
        .collect::<Result<Vec<_>, _>>()?;
    let total = Money::try_sum(&amounts, request.currency)?;

    Ok(DistributionResult { amounts, total })
}

fn equal_split(
    method: DistributionMethod,
    request: &DistributionRequest,
    parts: u32,
) -> Result<DistributionResult, AllocationError> {
    let total = required_total(method, request)?;
    let share = total.divide(Decimal::from(parts))?;

    Ok(DistributionResult {
        amounts: vec![share; parts as usize],
        total,
    })
}

fn per_area(request: &DistributionRequest) -> Result<DistributionResult, AllocationError> {
    let method = DistributionMethod::PerArea;
    let total = required_total(method, request)?;
    if request.areas.is_empty() {
        return Err(AllocationError::MissingInput { method, input: "areas" });
    }
    let sum_area = request.sum_area();
    if sum_area <= Decimal::ZERO {
        return Err(AllocationError::InvalidInput {
            method,
            reason: format!("total area must be positive, got {}", sum_area),
        });
    }

    let amounts = request
        .areas
        .iter()
        .map(|area| {
            if *area <= Decimal::ZERO {
                Ok(Money::zero(request.currency))
            } else {
                total.checked_multiply(*area)?.divide(sum_area)
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DistributionResult { amounts, total })
}

fn fixed_split(request: &DistributionRequest) -> Result<DistributionResult, AllocationError> {
    let method = DistributionMethod::FixedSplit;
    let fixed = request
        .fixed_amount
        .ok_or(AllocationError::MissingInput { method, input: "fixed_amount" })?;
    if fixed <= Decimal::ZERO {
        return Err(AllocationError::InvalidInput {
            method,
            reason: format!("fixed amount must be positive, got {}", fixed),
        });
    }
    let units = required_count(method, request.unit_count, "unit_count")?;

    let share = Money::new(fixed, request.currency);
    let total = share.checked_multiply(Decimal::from(units))?;
    Ok(DistributionResult {
        amounts: vec![share; units as usize],
        total,
    })
}

fn required_total(
    method: DistributionMethod,
    request: &DistributionRequest,
) -> Result<Money, AllocationError> {
    let total = request
        .total_amount
        .ok_or(AllocationError::MissingInput { method, input: "total_amount" })?;
    if total < Decimal::ZERO {
        return Err(AllocationError::InvalidInput {
            method,
            reason: format!("total amount must not be negative, got {}", total),
        });
    }
    Ok(Money::new(total, request.currency))
}

fn required_count(
    method: DistributionMethod,
    count: Option<u32>,
    input: &'static str,
) -> Result<u32, AllocationError> {
    match count {
        None => Err(AllocationError::MissingInput { method, input }),
        Some(0) => Err(AllocationError::InvalidInput {
            method,
            reason: format!("{} must be positive", input),
        }),
        Some(n) if n > MAX_SHARES => Err(AllocationError::InvalidInput {
            method,
            reason: format!("{} must not exceed {}, got {}", input, MAX_SHARES, n),
        }),
        Some(n) => Ok(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::MoneyError;
    use rust_decimal_macros::dec;

    #[test]
    fn test_consumption_scenario() {
        let request = DistributionRequest::new(Currency::CZK)
            .add_reading(dec!(45.2), dec!(40))
            .with_price_per_unit(dec!(1.2));

        let result = calculate(DistributionMethod::PerConsumption, &request).unwrap();
        assert_eq!(result.amounts.len(), 1);
        assert_eq!(result.amounts[0].amount(), dec!(6.24));
        assert_eq!(result.total.amount(), dec!(6.24));
    }

    #[test]
    fn test_rollback_is_clamped_to_zero() {
        let reading = MeterReading::new(dec!(10), dec!(950));
        assert_eq!(reading.consumption(), Decimal::ZERO);
    }

    #[test]
    fn test_equal_split_replicates_share() {
        let request = DistributionRequest::new(Currency::CZK)
            .with_total_amount(dec!(90))
            .with_unit_count(3);

        let result = calculate(DistributionMethod::PerApartment, &request).unwrap();
        assert_eq!(result.amounts, vec![Money::new(dec!(30), Currency::CZK); 3]);
        assert_eq!(result.total.amount(), dec!(90));
    }

    #[test]
    fn test_per_person_prefers_occupant_count() {
        let request = DistributionRequest::new(Currency::CZK)
            .with_total_amount(dec!(120))
            .with_unit_count(3)
            .with_occupant_count(8);

        let result = calculate(DistributionMethod::PerPerson, &request).unwrap();
        assert_eq!(result.len(), 8);
        assert_eq!(result.amounts[0].amount(), dec!(15));
    }

    #[test]
    fn test_missing_price_is_an_error() {
        let request = DistributionRequest::new(Currency::CZK).add_reading(dec!(2), dec!(1));
        let err = calculate(DistributionMethod::PerConsumption, &request).unwrap_err();
        assert_eq!(
            err,
            AllocationError::MissingInput {
                method: DistributionMethod::PerConsumption,
                input: "price_per_unit"
            }
        );
    }

    #[test]
    fn test_consumption_overflow_is_an_error() {
        let request = DistributionRequest::new(Currency::CZK)
            .add_reading(dec!(100000000000000), dec!(0))
            .with_price_per_unit(dec!(1000000000000000));
        let err = calculate(DistributionMethod::PerConsumption, &request).unwrap_err();
        assert_eq!(err, AllocationError::Money(MoneyError::Overflow));
    }

    #[test]
    fn test_fixed_split_total_overflow_is_an_error() {
        let request = DistributionRequest::new(Currency::CZK)
            .with_fixed_amount(dec!(10000000000000000000000000000))
            .with_unit_count(10);
        let err = calculate(DistributionMethod::FixedSplit, &request).unwrap_err();
        assert_eq!(err, AllocationError::Money(MoneyError::Overflow));
    }

    #[test]
    fn test_area_overflow_is_an_error() {
        let request = DistributionRequest::new(Currency::CZK)
            .with_total_amount(dec!(10000000000000000000000000000))
            .with_areas(vec![dec!(1000), dec!(1000)]);
        let err = calculate(DistributionMethod::PerArea, &request).unwrap_err();
        assert_eq!(err, AllocationError::Money(MoneyError::Overflow));
    }

    #[test]
    fn test_share_count_is_capped() {
        let request = DistributionRequest::new(Currency::CZK)
            .with_total_amount(dec!(100))
            .with_unit_count(MAX_SHARES + 1);
        let err = calculate(DistributionMethod::PerApartment, &request).unwrap_err();
        assert!(matches!(err, AllocationError::InvalidInput { .. }));

        let request = request.with_unit_count(MAX_SHARES);
        assert_eq!(calculate(DistributionMethod::PerApartment, &request).unwrap().len(), 100_000);
    }

    #[test]
    fn test_sum_area_defaults_to_positive_areas() {
        let request = DistributionRequest::new(Currency::CZK)
            .with_areas(vec![dec!(40), dec!(0), dec!(-5), dec!(60)]);
        assert_eq!(request.sum_area(), dec!(100));
    }
}
