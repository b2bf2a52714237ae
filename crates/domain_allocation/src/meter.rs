//! Meter records
//!
//! A meter carries its [`MeterKind`] explicitly. The kind is decided once,
//! when the meter is created or imported, and is never re-derived from the
//! name afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use core_kernel::{BuildingId, MeterId};

use crate::classifier::classify;
use crate::error::AllocationError;
use crate::meter_kind::{MeterKind, MeterScope};
use crate::method::DistributionMethod;
use crate::policy;
use crate::validation::ensure_method_allowed;

/// A utility meter configured for a building
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meter {
    /// Unique identifier
    pub id: MeterId,
    /// Building the meter belongs to
    pub building_id: BuildingId,
    /// Display name
    pub name: String,
    /// Individual or communal
    pub scope: MeterScope,
    /// Canonical kind, fixed at creation
    pub kind: MeterKind,
    /// How its cost is split
    pub method: DistributionMethod,
    /// Measurement unit label ("m³", "kWh")
    pub unit: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Meter {
    /// Creates a meter with an explicit kind
    ///
    /// # Errors
    ///
    /// [`AllocationError::MethodNotAllowed`] if `method` is not legal for `kind`.
    pub fn new(
        building_id: BuildingId,
        name: impl Into<String>,
        scope: MeterScope,
        kind: MeterKind,
        method: DistributionMethod,
    ) -> Result<Self, AllocationError> {
        ensure_method_allowed(kind, method)?;
        let now = Utc::now();

        Ok(Self {
            id: MeterId::new_v7(),
            building_id,
            name: name.into(),
            scope,
            kind,
            method,
            unit: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Creates a meter with the kind's default method
    pub fn with_default_method(
        building_id: BuildingId,
        name: impl Into<String>,
        scope: MeterScope,
        kind: MeterKind,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: MeterId::new_v7(),
            building_id,
            name: name.into(),
            scope,
            kind,
            method: policy::default_method(kind),
            unit: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Imports a legacy meter that has no stored kind
    ///
    /// The kind is inferred from the name and unit label once. When `method`
    /// is `None` the kind's default is used.
    pub fn import(
        building_id: BuildingId,
        name: impl Into<String>,
        scope: MeterScope,
        unit: Option<String>,
        method: Option<DistributionMethod>,
    ) -> Result<Self, AllocationError> {
        let name = name.into();
        let kind = classify(&name, scope, unit.as_deref());
        let method = method.unwrap_or_else(|| policy::default_method(kind));

        let mut meter = Self::new(building_id, name, scope, kind, method)?;
        meter.unit = unit;
        info!(meter_id = %meter.id, %kind, %method, "Imported legacy meter");
        Ok(meter)
    }

    /// Sets the measurement unit label
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Changes the distribution method
    ///
    /// # Errors
    ///
    /// [`AllocationError::MethodNotAllowed`]; the meter is left unchanged.
    pub fn change_method(&mut self, method: DistributionMethod) -> Result<(), AllocationError> {
        ensure_method_allowed(self.kind, method)?;
        self.method = method;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Renames the meter; the kind is not re-derived
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.updated_at = Utc::now();
    }
}
