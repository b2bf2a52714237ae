//! Allocation policy registry
//!
//! A static table stating, for each [`MeterKind`], which distribution
//! methods are legal and which one is offered by default. The table is a
//! compile-time constant, so lookups need no locking and can be shared
//! freely between concurrent billing runs.

use serde::Serialize;

use crate::meter_kind::MeterKind;
use crate::method::DistributionMethod;
use crate::method::DistributionMethod::{FixedSplit, PerApartment, PerArea, PerConsumption, PerPerson};

/// Legal distribution methods for one meter kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AllocationPolicy {
    /// Methods that may be configured for the kind
    pub allowed: &'static [DistributionMethod],
    /// Method offered when a meter is created; always in `allowed`
    pub default: DistributionMethod,
    /// Whether the kind can be read per apartment
    pub supports_individual_metering: bool,
}

impl AllocationPolicy {
    /// Returns true if `method` is in the allowed set
    pub fn allows(&self, method: DistributionMethod) -> bool {
        self.allowed.contains(&method)
    }
}

const METERED_WATER: AllocationPolicy = AllocationPolicy {
    allowed: &[PerConsumption, PerPerson, PerApartment, PerArea],
    default: PerConsumption,
    supports_individual_metering: true,
};

const POLICY_ELECTRICITY: AllocationPolicy = AllocationPolicy {
    allowed: &[PerConsumption, FixedSplit],
    default: PerConsumption,
    supports_individual_metering: true,
};

const POLICY_GAS: AllocationPolicy = AllocationPolicy {
    allowed: &[PerConsumption, PerApartment, FixedSplit],
    default: PerConsumption,
    supports_individual_metering: true,
};

const POLICY_HEATING: AllocationPolicy = AllocationPolicy {
    allowed: &[PerArea, PerConsumption, PerApartment],
    default: PerArea,
    supports_individual_metering: true,
};

const POLICY_SHARED_ELECTRICITY: AllocationPolicy = AllocationPolicy {
    allowed: &[PerApartment, PerArea, PerPerson],
    default: PerApartment,
    supports_individual_metering: false,
};

const POLICY_VENTILATION: AllocationPolicy = AllocationPolicy {
    allowed: &[PerArea, PerApartment],
    default: PerArea,
    supports_individual_metering: false,
};

const POLICY_ELEVATOR: AllocationPolicy = AllocationPolicy {
    allowed: &[PerApartment, PerPerson],
    default: PerApartment,
    supports_individual_metering: false,
};

const POLICY_INTERNET: AllocationPolicy = AllocationPolicy {
    allowed: &[PerApartment, FixedSplit],
    default: PerApartment,
    supports_individual_metering: false,
};

const POLICY_TRASH: AllocationPolicy = AllocationPolicy {
    allowed: &[PerPerson, PerApartment, FixedSplit],
    default: PerPerson,
    supports_individual_metering: false,
};

const POLICY_CUSTOM: AllocationPolicy = AllocationPolicy {
    allowed: &DistributionMethod::ALL,
    default: PerApartment,
    supports_individual_metering: true,
};

/// Returns the policy for a meter kind
pub fn policy_for(kind: MeterKind) -> &'static AllocationPolicy {
    match kind {
        MeterKind::ColdWater | MeterKind::HotWater => &METERED_WATER,
        MeterKind::Electricity => &POLICY_ELECTRICITY,
        MeterKind::Gas => &POLICY_GAS,
        MeterKind::Heating => &POLICY_HEATING,
        MeterKind::SharedElectricity => &POLICY_SHARED_ELECTRICITY,
        MeterKind::Ventilation => &POLICY_VENTILATION,
        MeterKind::Elevator => &POLICY_ELEVATOR,
        MeterKind::Internet => &POLICY_INTERNET,
        MeterKind::Trash => &POLICY_TRASH,
        MeterKind::Custom => &POLICY_CUSTOM,
    }
}

/// Methods that may be configured for `kind`
pub fn allowed_methods(kind: MeterKind) -> &'static [DistributionMethod] {
    policy_for(kind).allowed
}

/// Method offered by default for `kind`
pub fn default_method(kind: MeterKind) -> DistributionMethod {
    policy_for(kind).default
}

/// Returns true if `method` is legal for `kind`
pub fn is_allowed(kind: MeterKind, method: DistributionMethod) -> bool {
    policy_for(kind).allows(method)
}

/// Returns true if meters of `kind` can be read per apartment
pub fn supports_individual_metering(kind: MeterKind) -> bool {
    policy_for(kind).supports_individual_metering
}
