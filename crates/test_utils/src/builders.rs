//! Test Data Builders
//!
//! [`TestBuildingBuilder`] describes a building apartment by apartment and
//! derives both the precondition snapshot and calculator requests from the
//! same data, so the two never disagree.

use core_kernel::Currency;
use domain_allocation::{DistributionRequest, MeterReading, PreconditionContext};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// One apartment in a test building
#[derive(Debug, Clone, PartialEq)]
pub struct TestApartment {
    pub area: Decimal,
    pub occupants: u32,
    pub reading: Option<MeterReading>,
}

impl TestApartment {
    pub fn new(area: Decimal, occupants: u32) -> Self {
        Self {
            area,
            occupants,
            reading: None,
        }
    }

    /// Adds a meter reading; consumption is `current - previous`
    pub fn with_reading(mut self, current: Decimal, previous: Decimal) -> Self {
        self.reading = Some(MeterReading::new(current, previous));
        self
    }
}

/// Builder for a test building
#[derive(Debug, Clone)]
pub struct TestBuildingBuilder {
    currency: Currency,
    apartments: Vec<TestApartment>,
    fixed_amount: Option<Decimal>,
    heating_allocators: bool,
}

impl Default for TestBuildingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBuildingBuilder {
    /// Creates an empty CZK building
    pub fn new() -> Self {
        Self {
            currency: Currency::CZK,
            apartments: Vec::new(),
            fixed_amount: None,
            heating_allocators: false,
        }
    }

    /// Three apartments of 30, 20 and 50 m² with 2, 1 and 3 occupants
    pub fn standard() -> Self {
        Self::new()
            .with_apartment(TestApartment::new(dec!(30), 2))
            .with_apartment(TestApartment::new(dec!(20), 1))
            .with_apartment(TestApartment::new(dec!(50), 3))
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_apartment(mut self, apartment: TestApartment) -> Self {
        self.apartments.push(apartment);
        self
    }

    /// Adds `count` identical apartments
    pub fn with_apartments(mut self, count: usize, area: Decimal, occupants: u32) -> Self {
        self.apartments
            .extend(std::iter::repeat(TestApartment::new(area, occupants)).take(count));
        self
    }

    /// Gives every apartment a reading with the given consumption
    pub fn with_uniform_consumption(mut self, consumption: Decimal) -> Self {
        for apartment in &mut self.apartments {
            apartment.reading = Some(MeterReading::new(consumption, Decimal::ZERO));
        }
        self
    }

    pub fn with_fixed_amount(mut self, amount: Decimal) -> Self {
        self.fixed_amount = Some(amount);
        self
    }

    pub fn with_heating_allocators(mut self) -> Self {
        self.heating_allocators = true;
        self
    }

    pub fn unit_count(&self) -> u32 {
        u32::try_from(self.apartments.len()).unwrap_or(u32::MAX)
    }

    pub fn occupant_count(&self) -> u32 {
        self.apartments.iter().map(|a| a.occupants).sum()
    }

    pub fn total_area(&self) -> Decimal {
        self.apartments.iter().map(|a| a.area).sum()
    }

    /// Every apartment has a reading
    pub fn has_individual_meters(&self) -> bool {
        !self.apartments.is_empty() && self.apartments.iter().all(|a| a.reading.is_some())
    }

    /// Builds the precondition snapshot
    pub fn context(&self) -> PreconditionContext {
        PreconditionContext::new()
            .with_unit_count(self.unit_count())
            .with_total_area(self.total_area())
            .with_individual_meters(self.has_individual_meters())
            .with_fixed_amount(self.fixed_amount.is_some())
            .with_heating_allocators(self.heating_allocators)
    }

    /// Builds a request carrying every input the building can supply
    ///
    /// `total` is the cost to split; readings, areas and counts come from the
    /// apartments.
    pub fn request(&self, total: Decimal) -> DistributionRequest {
        let mut request = DistributionRequest::new(self.currency)
            .with_total_amount(total)
            .with_areas(self.apartments.iter().map(|a| a.area).collect())
            .with_unit_count(self.unit_count())
            .with_occupant_count(self.occupant_count())
            .with_readings(self.apartments.iter().filter_map(|a| a.reading).collect());

        if let Some(fee) = self.fixed_amount {
            request = request.with_fixed_amount(fee);
        }
        request
    }

    /// Builds a consumption request at `price` per unit
    pub fn consumption_request(&self, price: Decimal) -> DistributionRequest {
        DistributionRequest::new(self.currency)
            .with_readings(self.apartments.iter().filter_map(|a| a.reading).collect())
            .with_price_per_unit(price)
    }
}
