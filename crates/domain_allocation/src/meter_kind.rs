//! Meter kinds and scopes
//!
//! A meter kind is the canonical category of a utility meter. It is stored
//! with the meter record when the meter is created and drives every policy
//! decision afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a meter belongs to one apartment or to the whole building
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeterScope {
    /// Dedicated to a single apartment
    Individual,
    /// Shared across the building and split among its units
    Communal,
}

impl fmt::Display for MeterScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeterScope::Individual => write!(f, "individual"),
            MeterScope::Communal => write!(f, "communal"),
        }
    }
}

/// Canonical category of a utility meter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeterKind {
    /// Cold water
    ColdWater,
    /// Hot water
    HotWater,
    /// Electricity metered per apartment
    Electricity,
    /// Gas
    Gas,
    /// Heating
    Heating,
    /// Common-area electricity (hallways, basement, lighting)
    SharedElectricity,
    /// Ventilation / air handling
    Ventilation,
    /// Elevator operation
    Elevator,
    /// Building internet connection
    Internet,
    /// Waste collection
    Trash,
    /// Anything else configured by the landlord
    Custom,
}

impl MeterKind {
    /// Every kind, in declaration order
    pub const ALL: [MeterKind; 11] = [
        MeterKind::ColdWater,
        MeterKind::HotWater,
        MeterKind::Electricity,
        MeterKind::Gas,
        MeterKind::Heating,
        MeterKind::SharedElectricity,
        MeterKind::Ventilation,
        MeterKind::Elevator,
        MeterKind::Internet,
        MeterKind::Trash,
        MeterKind::Custom,
    ];

    /// Returns the stable snake_case code used in storage and JSON
    pub fn code(&self) -> &'static str {
        match self {
            MeterKind::ColdWater => "cold_water",
            MeterKind::HotWater => "hot_water",
            MeterKind::Electricity => "electricity",
            MeterKind::Gas => "gas",
            MeterKind::Heating => "heating",
            MeterKind::SharedElectricity => "shared_electricity",
            MeterKind::Ventilation => "ventilation",
            MeterKind::Elevator => "elevator",
            MeterKind::Internet => "internet",
            MeterKind::Trash => "trash",
            MeterKind::Custom => "custom",
        }
    }

    /// Returns the scope this kind normally has
    ///
    /// `Custom` can be either; it reports `Individual`.
    pub fn natural_scope(&self) -> MeterScope {
        match self {
            MeterKind::SharedElectricity
            | MeterKind::Ventilation
            | MeterKind::Elevator
            | MeterKind::Internet
            | MeterKind::Trash => MeterScope::Communal,
            _ => MeterScope::Individual,
        }
    }
}

impl fmt::Display for MeterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_unique() {
        let mut codes: Vec<&str> = MeterKind::ALL.iter().map(|k| k.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), MeterKind::ALL.len());
    }

    #[test]
    fn test_serde_matches_code() {
        for kind in MeterKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.code()));
        }
    }

    #[test]
    fn test_natural_scope() {
        assert_eq!(MeterKind::HotWater.natural_scope(), MeterScope::Individual);
        assert_eq!(MeterKind::Elevator.natural_scope(), MeterScope::Communal);
    }
}
