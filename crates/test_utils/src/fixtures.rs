//! Pre-built Test Fixtures
//!
//! Ready-to-use data for the recurring billing scenarios. Values are fixed so
//! expected shares can be written down by hand.

use core_kernel::{BuildingId, Currency, Money};
use domain_allocation::{
    DistributionRequest, MeterReading, MeterScope, PreconditionContext,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// A round CZK amount
    pub fn czk_1000() -> Money {
        Money::new(dec!(1000.00), Currency::CZK)
    }

    /// A CZK amount that does not split evenly in three
    pub fn czk_100() -> Money {
        Money::new(dec!(100.00), Currency::CZK)
    }

    /// Creates a zero amount
    pub fn czk_zero() -> Money {
        Money::zero(Currency::CZK)
    }

    /// A EUR amount for currency mismatch tests
    pub fn eur_100() -> Money {
        Money::new(dec!(100.00), Currency::EUR)
    }
}

/// Fixture for building snapshots
pub struct ContextFixtures;

impl ContextFixtures {
    /// Three units, 100 m², individual meters, nothing else configured
    pub fn three_metered_units() -> PreconditionContext {
        PreconditionContext::new()
            .with_unit_count(3)
            .with_total_area(dec!(100))
            .with_individual_meters(true)
    }

    /// Four units, 240 m², no individual meters
    pub fn four_unmetered_units() -> PreconditionContext {
        PreconditionContext::new()
            .with_unit_count(4)
            .with_total_area(dec!(240))
    }

    /// Building with heat-cost allocators installed
    pub fn heated_building() -> PreconditionContext {
        Self::three_metered_units().with_heating_allocators(true)
    }

    /// Building with a configured flat fee
    pub fn fixed_fee_building() -> PreconditionContext {
        Self::three_metered_units().with_fixed_amount(true)
    }

    /// Building with no units at all
    pub fn empty_building() -> PreconditionContext {
        PreconditionContext::new()
    }
}

/// Fixture for calculator requests
pub struct RequestFixtures;

impl RequestFixtures {
    /// 1000 CZK split over 30, 20 and 50 m²
    pub fn area_split() -> DistributionRequest {
        DistributionRequest::new(Currency::CZK)
            .with_total_amount(dec!(1000))
            .with_areas(vec![dec!(30), dec!(20), dec!(50)])
    }

    /// 100 CZK split across three apartments
    pub fn three_way_split() -> DistributionRequest {
        DistributionRequest::new(Currency::CZK)
            .with_total_amount(dec!(100))
            .with_unit_count(3)
    }

    /// Two water meters at 50 CZK per m³; consumption 10 and 0
    pub fn water_readings() -> DistributionRequest {
        DistributionRequest::new(Currency::CZK)
            .with_readings(vec![
                MeterReading::new(dec!(110), dec!(100)),
                MeterReading::new(dec!(50), dec!(60)),
            ])
            .with_price_per_unit(dec!(50))
    }

    /// 250 CZK flat fee for each of four units
    pub fn flat_fee() -> DistributionRequest {
        DistributionRequest::new(Currency::CZK)
            .with_fixed_amount(dec!(250))
            .with_unit_count(4)
    }
}

/// Fixture for meter names found in legacy data
pub struct MeterNameFixtures;

impl MeterNameFixtures {
    /// Names paired with their scope and the unit label they were stored with
    pub fn legacy_meters() -> Vec<(&'static str, MeterScope, Option<&'static str>)> {
        vec![
            ("Studená voda", MeterScope::Individual, Some("m³")),
            ("Teplá voda", MeterScope::Individual, Some("m³")),
            ("Teplo", MeterScope::Individual, Some("GJ")),
            ("Elektřina chodba", MeterScope::Communal, Some("kWh")),
            ("Výtah", MeterScope::Communal, None),
            ("Odpad", MeterScope::Communal, None),
        ]
    }
}

/// Fixture for identifiers
pub struct IdFixtures;

impl IdFixtures {
    pub fn building_id() -> BuildingId {
        BuildingId::new()
    }
}

/// Sums plain decimals; keeps test code free of fold boilerplate
pub fn decimal_sum(values: &[Decimal]) -> Decimal {
    values.iter().copied().sum()
}
