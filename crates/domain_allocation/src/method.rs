//! Distribution methods

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rule used to split a utility cost across apartments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionMethod {
    /// Metered consumption times unit price
    PerConsumption,
    /// Equal split across units
    PerApartment,
    /// Proportional to floor area
    PerArea,
    /// Equal split across occupants
    PerPerson,
    /// Every unit pays the same configured fee
    FixedSplit,
}

impl DistributionMethod {
    /// Every method, in declaration order
    pub const ALL: [DistributionMethod; 5] = [
        DistributionMethod::PerConsumption,
        DistributionMethod::PerApartment,
        DistributionMethod::PerArea,
        DistributionMethod::PerPerson,
        DistributionMethod::FixedSplit,
    ];

    /// Returns the stable snake_case code
    pub fn code(&self) -> &'static str {
        match self {
            DistributionMethod::PerConsumption => "per_consumption",
            DistributionMethod::PerApartment => "per_apartment",
            DistributionMethod::PerArea => "per_area",
            DistributionMethod::PerPerson => "per_person",
            DistributionMethod::FixedSplit => "fixed_split",
        }
    }

    /// True for the two methods that divide a total equally
    pub fn is_equal_split(&self) -> bool {
        matches!(
            self,
            DistributionMethod::PerApartment | DistributionMethod::PerPerson
        )
    }
}

impl fmt::Display for DistributionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when parsing an unknown method code
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown distribution method: {0}")]
pub struct UnknownMethod(pub String);

impl FromStr for DistributionMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        DistributionMethod::ALL
            .into_iter()
            .find(|m| m.code() == normalized)
            .ok_or(UnknownMethod(normalized))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_codes() {
        for method in DistributionMethod::ALL {
            assert_eq!(method.code().parse::<DistributionMethod>().unwrap(), method);
        }
        assert_eq!(" PER_AREA ".parse::<DistributionMethod>().unwrap(), DistributionMethod::PerArea);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "per_moon_phase".parse::<DistributionMethod>().unwrap_err();
        assert_eq!(err, UnknownMethod("per_moon_phase".to_string()));
    }

    #[test]
    fn test_equal_split() {
        assert!(DistributionMethod::PerApartment.is_equal_split());
        assert!(DistributionMethod::PerPerson.is_equal_split());
        assert!(!DistributionMethod::FixedSplit.is_equal_split());
    }
}
