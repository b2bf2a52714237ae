//! Rounding reconciliation
//!
//! Rounding every share to the currency's minor unit independently can make
//! the shares miss the bill total by a few cents. A [`RoundingStrategy`]
//! rounds the shares and puts the difference somewhere, so that the result
//! always adds up to the (rounded) target exactly.
//!
//! Two strategies are provided:
//!
//! - [`LastShareAbsorbs`] puts the whole drift on the last share. Simple,
//!   but the outcome depends on list order.
//! - [`LargestRemainder`] (Hamilton method) floors every share and hands the
//!   missing cents to the shares that lost the most to flooring.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use core_kernel::{Currency, Money, MoneyError};

use crate::error::AllocationError;

/// Turns unrounded shares into rounded shares that sum to a target
pub trait RoundingStrategy: fmt::Debug + Send + Sync {
    /// Short name used in logs and configuration
    fn name(&self) -> &'static str;

    /// Rounds `shares` so that they sum exactly to `target` rounded to the
    /// currency's minor unit
    ///
    /// # Errors
    ///
    /// * [`AllocationError::EmptyShares`] if `shares` is empty
    /// * [`AllocationError::Money`] on a currency mismatch
    fn reconcile(&self, shares: &[Money], target: Money) -> Result<Vec<Money>, AllocationError>;
}

/// Rounds every share and adds the drift to the last one
#[derive(Debug, Clone, Copy, Default)]
pub struct LastShareAbsorbs;

impl RoundingStrategy for LastShareAbsorbs {
    fn name(&self) -> &'static str {
        "last_share"
    }

    fn reconcile(&self, shares: &[Money], target: Money) -> Result<Vec<Money>, AllocationError> {
        let currency = ensure_reconcilable(shares, target)?;
        let target = target.round_to_currency();

        let mut rounded: Vec<Money> = shares.iter().map(Money::round_to_currency).collect();
        let sum = Money::try_sum(&rounded, currency)?;
        let drift = target.checked_sub(&sum)?;

        if let Some(last) = rounded.last_mut() {
            *last = last.checked_add(&drift)?.round_to_currency();
        }

        debug!(strategy = self.name(), %drift, shares = rounded.len(), "Shares reconciled");
        Ok(rounded)
    }
}

/// Hamilton / largest-remainder apportionment of minor units
#[derive(Debug, Clone, Copy, Default)]
pub struct LargestRemainder;

impl RoundingStrategy for LargestRemainder {
    fn name(&self) -> &'static str {
        "largest_remainder"
    }

    fn reconcile(&self, shares: &[Money], target: Money) -> Result<Vec<Money>, AllocationError> {
        let currency = ensure_reconcilable(shares, target)?;
        let scale = minor_units_per_major(currency);

        let scaled = shares
            .iter()
            .map(|s| s.amount().checked_mul(scale).ok_or(MoneyError::Overflow))
            .collect::<Result<Vec<Decimal>, _>>()?;
        let floors: Vec<Decimal> = scaled.iter().map(|s| s.floor()).collect();
        let remainders: Vec<Decimal> = scaled.iter().zip(&floors).map(|(s, f)| s - f).collect();

        let target_units = target
            .round_to_currency()
            .amount()
            .checked_mul(scale)
            .ok_or(MoneyError::Overflow)?;
        let floor_units = floors
            .iter()
            .try_fold(Decimal::ZERO, |acc, f| acc.checked_add(*f))
            .ok_or(MoneyError::Overflow)?;
        let missing = target_units
            .checked_sub(floor_units)
            .ok_or(MoneyError::Overflow)?;

        // Every share gets `base` extra units; the `extra` largest remainders
        // get one more. Works for negative `missing` as well.
        let count = Decimal::from(shares.len());
        let base = (missing / count).floor();
        let extra = (missing - base * count)
            .to_usize()
            .ok_or(MoneyError::Overflow)?;

        let mut order: Vec<usize> = (0..shares.len()).collect();
        order.sort_by(|a, b| remainders[*b].cmp(&remainders[*a]).then(a.cmp(b)));

        let mut units: Vec<Decimal> = floors.iter().map(|f| f + base).collect();
        for index in order.into_iter().take(extra) {
            units[index] += Decimal::ONE;
        }

        debug!(strategy = self.name(), %missing, shares = shares.len(), "Shares reconciled");
        Ok(units
            .into_iter()
            .map(|u| Money::new(u / scale, currency))
            .collect())
    }
}

/// Reconciles with the default [`LastShareAbsorbs`] strategy
pub fn reconcile(shares: &[Money], target: Money) -> Result<Vec<Money>, AllocationError> {
    LastShareAbsorbs.reconcile(shares, target)
}

/// Configurable choice of reconciliation strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconciliationStrategy {
    #[default]
    LastShare,
    LargestRemainder,
}

impl ReconciliationStrategy {
    /// Instantiates the strategy
    pub fn build(&self) -> Box<dyn RoundingStrategy> {
        match self {
            ReconciliationStrategy::LastShare => Box::new(LastShareAbsorbs),
            ReconciliationStrategy::LargestRemainder => Box::new(LargestRemainder),
        }
    }
}

fn ensure_reconcilable(shares: &[Money], target: Money) -> Result<Currency, AllocationError> {
    if shares.is_empty() {
        return Err(AllocationError::EmptyShares);
    }
    let currency = target.currency();
    if let Some(other) = shares.iter().find(|s| s.currency() != currency) {
        return Err(MoneyError::CurrencyMismatch(
            currency.to_string(),
            other.currency().to_string(),
        )
        .into());
    }
    Ok(currency)
}

fn minor_units_per_major(currency: Currency) -> Decimal {
    Decimal::ONE / currency.minor_unit()
}
