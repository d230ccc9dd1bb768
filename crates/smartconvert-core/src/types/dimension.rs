//! Dimension registry
//!
//! Every converter is described once here: its unit catalog, how values
//! are converted, its default unit pair and its quick-example shortcuts.
//! Dispatch goes through [`Method`] so nothing switches on strings per
//! call.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::unit::{self, UnitDef};
use crate::convert::factors::{self, FactorTable};

/// Convertible dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dimension {
    Distance,
    Weight,
    Temperature,
    Time,
    Volume,
    Speed,
    Area,
    DataStorage,
    Energy,
    Pressure,
    Power,
    FuelEconomy,
    Currency,
}

/// How values of a dimension are converted
#[derive(Debug)]
pub enum Method {
    /// Multiplicative factors anchored to a base unit
    Linear(&'static FactorTable),
    /// Offset scales routed through Celsius
    Affine,
    /// Distance-per-volume vs volume-per-distance, routed through km/L
    Harmonic,
    /// Externally supplied exchange rates
    Rates,
}

/// One-click example shown under a converter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuickExample {
    pub from_unit: &'static str,
    pub to_unit: &'static str,
    pub value: f64,
    pub label: &'static str,
}

const fn example(
    from_unit: &'static str,
    to_unit: &'static str,
    value: f64,
    label: &'static str,
) -> QuickExample {
    QuickExample {
        from_unit,
        to_unit,
        value,
        label,
    }
}

/// Static description of a dimension
#[derive(Debug)]
pub struct DimensionDef {
    pub dimension: Dimension,
    /// Stable key (e.g. "fuel-economy")
    pub key: &'static str,
    /// Display name (e.g. "Fuel Economy")
    pub name: &'static str,
    pub units: &'static [UnitDef],
    pub method: Method,
    /// Pair selected when no preference applies
    pub default_pair: (&'static str, &'static str),
    pub examples: &'static [QuickExample],
}

/// Complete registry of all dimensions
pub static DIMENSIONS: &[DimensionDef] = &[
    DimensionDef {
        dimension: Dimension::Distance,
        key: "distance",
        name: "Distance",
        units: unit::DISTANCE_UNITS,
        method: Method::Linear(&factors::DISTANCE),
        default_pair: ("km", "mi"),
        examples: &[
            example("km", "mi", 1.0, "1 km → mi"),
            example("m", "ft", 1.0, "1 m → ft"),
            example("in", "cm", 1.0, "1 in → cm"),
            example("mi", "km", 1.0, "1 mi → km"),
        ],
    },
    DimensionDef {
        dimension: Dimension::Weight,
        key: "weight",
        name: "Weight",
        units: unit::WEIGHT_UNITS,
        method: Method::Linear(&factors::WEIGHT),
        default_pair: ("kg", "lb"),
        examples: &[
            example("kg", "lb", 1.0, "1 kg → lb"),
            example("g", "oz", 100.0, "100 g → oz"),
            example("lb", "kg", 1.0, "1 lb → kg"),
            example("st", "lb", 1.0, "1 st → lb"),
        ],
    },
    DimensionDef {
        dimension: Dimension::Temperature,
        key: "temperature",
        name: "Temperature",
        units: unit::TEMPERATURE_UNITS,
        method: Method::Affine,
        default_pair: ("C", "F"),
        examples: &[
            example("C", "F", 100.0, "100°C → °F"),
            example("F", "C", 32.0, "32°F → °C"),
            example("C", "K", 0.0, "0°C → K"),
        ],
    },
    DimensionDef {
        dimension: Dimension::Time,
        key: "time",
        name: "Time",
        units: unit::TIME_UNITS,
        method: Method::Linear(&factors::TIME),
        default_pair: ("s", "ms"),
        examples: &[],
    },
    DimensionDef {
        dimension: Dimension::Volume,
        key: "volume",
        name: "Volume",
        units: unit::VOLUME_UNITS,
        method: Method::Linear(&factors::VOLUME),
        default_pair: ("l", "ml"),
        examples: &[],
    },
    DimensionDef {
        dimension: Dimension::Speed,
        key: "speed",
        name: "Speed",
        units: unit::SPEED_UNITS,
        method: Method::Linear(&factors::SPEED),
        default_pair: ("m/s", "km/h"),
        examples: &[
            example("km/h", "mph", 100.0, "100 km/h → mph"),
            example("mph", "km/h", 60.0, "60 mph → km/h"),
            example("m/s", "km/h", 1.0, "1 m/s → km/h"),
        ],
    },
    DimensionDef {
        dimension: Dimension::Area,
        key: "area",
        name: "Area",
        units: unit::AREA_UNITS,
        method: Method::Linear(&factors::AREA),
        default_pair: ("m2", "km2"),
        examples: &[
            example("acre", "m2", 1.0, "1 acre → m²"),
            example("ha", "acre", 1.0, "1 ha → acres"),
            example("ft2", "m2", 1000.0, "1000 ft² → m²"),
            example("m2", "ft2", 100.0, "100 m² → ft²"),
        ],
    },
    DimensionDef {
        dimension: Dimension::DataStorage,
        key: "data-storage",
        name: "Data Storage",
        units: unit::DATA_STORAGE_UNITS,
        method: Method::Linear(&factors::DATA_STORAGE),
        default_pair: ("B", "KB"),
        examples: &[],
    },
    DimensionDef {
        dimension: Dimension::Energy,
        key: "energy",
        name: "Energy",
        units: unit::ENERGY_UNITS,
        method: Method::Linear(&factors::ENERGY),
        default_pair: ("J", "kJ"),
        examples: &[
            example("kJ", "J", 1.0, "1 kJ → J"),
            example("kcal", "kJ", 100.0, "100 kcal → kJ"),
            example("kWh", "J", 1.0, "1 kWh → Joules"),
            example("Btu", "kJ", 1.0, "1 BTU → kJ"),
        ],
    },
    DimensionDef {
        dimension: Dimension::Pressure,
        key: "pressure",
        name: "Pressure",
        units: unit::PRESSURE_UNITS,
        method: Method::Linear(&factors::PRESSURE),
        default_pair: ("Pa", "kPa"),
        examples: &[
            example("atm", "Pa", 1.0, "1 atm → Pa"),
            example("bar", "psi", 1.0, "1 bar → psi"),
            example("torr", "atm", 760.0, "760 mmHg → atm"),
        ],
    },
    DimensionDef {
        dimension: Dimension::Power,
        key: "power",
        name: "Power",
        units: unit::POWER_UNITS,
        method: Method::Linear(&factors::POWER),
        default_pair: ("W", "kW"),
        examples: &[
            example("kW", "W", 1.0, "1 kW → W"),
            example("hp_e", "W", 1.0, "1 hp → W"),
            example("W", "Btu/h", 100.0, "100 W → BTU/h"),
            example("kW", "hp_e", 10.0, "10 kW → hp"),
        ],
    },
    DimensionDef {
        dimension: Dimension::FuelEconomy,
        key: "fuel-economy",
        name: "Fuel Economy",
        units: unit::FUEL_ECONOMY_UNITS,
        method: Method::Harmonic,
        default_pair: ("mpg_us", "mpg_uk"),
        examples: &[],
    },
    DimensionDef {
        dimension: Dimension::Currency,
        key: "currency",
        name: "Currency",
        units: unit::CURRENCY_UNITS,
        method: Method::Rates,
        default_pair: ("USD", "INR"),
        examples: &[],
    },
];

impl Dimension {
    /// Get the dimension definition
    pub fn def(&self) -> &'static DimensionDef {
        DIMENSIONS
            .iter()
            .find(|d| d.dimension == *self)
            .expect("All dimensions must have definitions")
    }

    pub fn key(&self) -> &'static str {
        self.def().key
    }

    pub fn name(&self) -> &'static str {
        self.def().name
    }

    pub fn units(&self) -> &'static [UnitDef] {
        self.def().units
    }

    /// Find a unit of this dimension by id (case-sensitive: "mm" vs "Mm")
    pub fn unit(&self, id: &str) -> Option<&'static UnitDef> {
        self.units().iter().find(|u| u.id == id)
    }

    pub fn has_unit(&self, id: &str) -> bool {
        self.unit(id).is_some()
    }

    pub fn examples(&self) -> &'static [QuickExample] {
        self.def().examples
    }

    /// Parse dimension from its key
    pub fn parse(s: &str) -> Option<Dimension> {
        DIMENSIONS
            .iter()
            .find(|d| d.key.eq_ignore_ascii_case(s))
            .map(|d| d.dimension)
    }

    /// Iterator over all dimensions
    pub fn all() -> impl Iterator<Item = Dimension> {
        DIMENSIONS.iter().map(|d| d.dimension)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dimension::parse(s).ok_or_else(|| format!("Unknown converter: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_dimensions_have_defs() {
        for dimension in Dimension::all() {
            let def = dimension.def();
            assert!(!def.units.is_empty());
            assert!(dimension.has_unit(def.default_pair.0), "{dimension}");
            assert!(dimension.has_unit(def.default_pair.1), "{dimension}");
            assert_ne!(def.default_pair.0, def.default_pair.1);
        }
    }

    #[test]
    fn test_linear_tables_match_catalogs() {
        for def in DIMENSIONS {
            if let Method::Linear(table) = def.method {
                assert_eq!(table.factors.len(), def.units.len(), "{}", def.key);
                for unit in def.units {
                    assert!(table.factor(unit.id).is_some(), "{} in {}", unit.id, def.key);
                }
            }
        }
    }

    #[test]
    fn test_examples_reference_known_units() {
        for def in DIMENSIONS {
            for ex in def.examples {
                assert!(def.dimension.has_unit(ex.from_unit), "{}", ex.label);
                assert!(def.dimension.has_unit(ex.to_unit), "{}", ex.label);
            }
        }
    }

    #[test]
    fn test_parse_keys() {
        assert_eq!(Dimension::parse("fuel-economy"), Some(Dimension::FuelEconomy));
        assert_eq!("Data-Storage".parse::<Dimension>(), Ok(Dimension::DataStorage));
        assert!("quiz".parse::<Dimension>().is_err());
    }

    #[test]
    fn test_serde_uses_keys() {
        let json = serde_json::to_string(&Dimension::DataStorage).unwrap();
        assert_eq!(json, "\"data-storage\"");
    }
}
