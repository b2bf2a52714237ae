//! Heuristic meter kind classifier
//!
//! Maps a free-text meter name (Czech or English) plus its scope to a
//! [`MeterKind`]. This is an import helper for meters that were recorded
//! before kinds were stored explicitly. The billing path never calls it;
//! it reads the kind from the [`Meter`](crate::meter::Meter) record.
//!
//! Matching is a case-insensitive substring search over a fixed vocabulary,
//! tried in priority order so that specific terms win over generic ones
//! ("teplá voda" is hot water, not heating; "voda" alone is cold water).
//! Classification never fails: when nothing matches, the unit label is
//! consulted and finally a scope-specific default is returned.

use tracing::debug;

use crate::meter_kind::{MeterKind, MeterScope};

#[derive(Debug, Clone, Copy)]
enum Resolution {
    Kind(MeterKind),
    ByScope {
        individual: MeterKind,
        communal: MeterKind,
    },
}

impl Resolution {
    fn resolve(self, scope: MeterScope) -> MeterKind {
        match self {
            Resolution::Kind(kind) => kind,
            Resolution::ByScope { individual, communal } => match scope {
                MeterScope::Individual => individual,
                MeterScope::Communal => communal,
            },
        }
    }
}

struct VocabularyRule {
    terms: &'static [&'static str],
    resolution: Resolution,
}

const ELECTRICITY_BY_SCOPE: Resolution = Resolution::ByScope {
    individual: MeterKind::Electricity,
    communal: MeterKind::SharedElectricity,
};

/// Ordered vocabulary; the first rule with a matching term wins.
const VOCABULARY: &[VocabularyRule] = &[
    VocabularyRule {
        terms: &["studená voda", "studena voda", "studená", "studena", "cold water", "svv"],
        resolution: Resolution::Kind(MeterKind::ColdWater),
    },
    VocabularyRule {
        terms: &["teplá voda", "tepla voda", "teplou vodu", "tuv", "hot water", "warm water"],
        resolution: Resolution::Kind(MeterKind::HotWater),
    },
    VocabularyRule {
        terms: &[
            "topení", "topeni", "vytápění", "vytapeni", "teplo", "tepla", "heating", "heat",
            "radiátor", "radiator", "indikátor", "allocator",
        ],
        resolution: Resolution::Kind(MeterKind::Heating),
    },
    VocabularyRule {
        terms: &["plyn", "gas"],
        resolution: Resolution::Kind(MeterKind::Gas),
    },
    VocabularyRule {
        terms: &[
            "společná elektřina", "spolecna elektrina", "společné prostory", "spolecne prostory",
            "shared electricity", "common electricity", "chodba", "hallway", "osvětlení",
            "osvetleni", "lighting",
        ],
        resolution: Resolution::Kind(MeterKind::SharedElectricity),
    },
    VocabularyRule {
        terms: &["vzduchotechnika", "ventilace", "rekuperace", "ventilation", "hvac"],
        resolution: Resolution::Kind(MeterKind::Ventilation),
    },
    VocabularyRule {
        terms: &["výtah", "vytah", "elevator", "lift"],
        resolution: Resolution::Kind(MeterKind::Elevator),
    },
    VocabularyRule {
        terms: &["internet", "wifi", "wi-fi", "broadband"],
        resolution: Resolution::Kind(MeterKind::Internet),
    },
    VocabularyRule {
        terms: &["odpad", "popelnice", "trash", "garbage", "waste", "refuse"],
        resolution: Resolution::Kind(MeterKind::Trash),
    },
    VocabularyRule {
        terms: &["vodné", "vodne", "voda", "water"],
        resolution: Resolution::Kind(MeterKind::ColdWater),
    },
    VocabularyRule {
        terms: &["elektřina", "elektrina", "elektra", "elektro", "electric", "proud", "power"],
        resolution: ELECTRICITY_BY_SCOPE,
    },
    VocabularyRule {
        terms: &["vlastní", "vlastni", "ostatní", "ostatni", "custom"],
        resolution: Resolution::Kind(MeterKind::Custom),
    },
];

/// Classifies a meter by name, scope and optional unit label
///
/// # Arguments
///
/// * `name` - Free-text meter name as entered by the landlord
/// * `scope` - Individual or communal
/// * `unit` - Optional measurement unit label ("kWh", "m³", "GJ")
///
/// # Example
///
/// ```rust
/// use domain_allocation::{classify, MeterKind, MeterScope};
///
/// assert_eq!(classify("Elektra", MeterScope::Individual, None), MeterKind::Electricity);
/// assert_eq!(classify("Elektra", MeterScope::Communal, None), MeterKind::SharedElectricity);
/// ```
pub fn classify(name: &str, scope: MeterScope, unit: Option<&str>) -> MeterKind {
    let normalized = name.trim().to_lowercase();

    if let Some(rule) = VOCABULARY
        .iter()
        .find(|rule| rule.terms.iter().any(|term| normalized.contains(term)))
    {
        let kind = rule.resolution.resolve(scope);
        debug!(meter_name = name, %scope, %kind, "Meter classified by name");
        return kind;
    }

    if let Some(kind) = unit.and_then(|u| classify_unit(u, scope)) {
        debug!(meter_name = name, %scope, %kind, "Meter classified by unit label");
        return kind;
    }

    let kind = ELECTRICITY_BY_SCOPE.resolve(scope);
    debug!(meter_name = name, %scope, %kind, "No vocabulary match, using scope default");
    kind
}

fn classify_unit(unit: &str, scope: MeterScope) -> Option<MeterKind> {
    let unit = unit.trim().to_lowercase();
    match unit.as_str() {
        "kwh" | "mwh" => Some(ELECTRICITY_BY_SCOPE.resolve(scope)),
        "gj" => Some(MeterKind::Heating),
        "m3" | "m³" if scope == MeterScope::Individual => Some(MeterKind::ColdWater),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_specific_water_terms_win_over_heating() {
        assert_eq!(classify("Teplá voda - byt 3", MeterScope::Individual, None), MeterKind::HotWater);
        assert_eq!(classify("Teplo", MeterScope::Individual, None), MeterKind::Heating);
        assert_eq!(classify("Studená voda", MeterScope::Individual, None), MeterKind::ColdWater);
    }

    #[test]
    fn test_generic_water_is_cold_water() {
        assert_eq!(classify("Voda", MeterScope::Individual, None), MeterKind::ColdWater);
        assert_eq!(classify("WATER main", MeterScope::Communal, None), MeterKind::ColdWater);
    }

    #[test]
    fn test_scope_narrows_electricity() {
        assert_eq!(classify("elektra", MeterScope::Individual, None), MeterKind::Electricity);
        assert_eq!(classify("elektra", MeterScope::Communal, None), MeterKind::SharedElectricity);
    }

    #[test]
    fn test_common_area_electricity_ignores_scope() {
        assert_eq!(
            classify("Elektřina chodba", MeterScope::Individual, None),
            MeterKind::SharedElectricity
        );
    }

    #[test]
    fn test_communal_services() {
        assert_eq!(classify("Výtah", MeterScope::Communal, None), MeterKind::Elevator);
        assert_eq!(classify("Vzduchotechnika", MeterScope::Communal, None), MeterKind::Ventilation);
        assert_eq!(classify("Internet 1Gbit", MeterScope::Communal, None), MeterKind::Internet);
        assert_eq!(classify("Odpad", MeterScope::Communal, None), MeterKind::Trash);
        assert_eq!(classify("Plyn", MeterScope::Individual, None), MeterKind::Gas);
    }

    #[test]
    fn test_custom_keyword() {
        assert_eq!(classify("Vlastní poplatek", MeterScope::Communal, None), MeterKind::Custom);
    }

    #[test]
    fn test_unit_label_fallback() {
        assert_eq!(classify("Měřič A", MeterScope::Individual, Some("GJ")), MeterKind::Heating);
        assert_eq!(classify("Měřič A", MeterScope::Individual, Some("m³")), MeterKind::ColdWater);
        assert_eq!(classify("Měřič A", MeterScope::Communal, Some("kWh")), MeterKind::SharedElectricity);
    }

    #[test]
    fn test_scope_default_when_nothing_matches() {
        assert_eq!(classify("???", MeterScope::Individual, None), MeterKind::Electricity);
        assert_eq!(classify("", MeterScope::Communal, Some("ks")), MeterKind::SharedElectricity);
    }
}
