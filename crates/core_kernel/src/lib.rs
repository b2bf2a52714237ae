//! Core Kernel - Foundational types for the utility allocation engine
//!
//! This crate provides the building blocks shared by every other crate:
//! - Money types with precise decimal arithmetic
//! - Strongly typed identifiers for meters and buildings

pub mod money;
pub mod identifiers;

pub use money::{Money, Currency, MoneyError};
pub use identifiers::{BuildingId, MeterId};
