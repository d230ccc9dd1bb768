//! Ohm's law solver: given two of V, I, R, find the third
//!
//! Inputs are scaled to SI (volts, amps, ohms) before solving and the
//! result is scaled back into the unit chosen for the unknown.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::error::CalcError;
use crate::format::format_value;

/// Decimal places shown for a solved quantity
const DISPLAY_PRECISION: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    Voltage,
    Current,
    Resistance,
}

/// A unit prefix for one electrical quantity
#[derive(Debug, Serialize)]
pub struct ScaledUnit {
    pub id: &'static str,
    pub label: &'static str,
    /// SI value of one of this unit
    pub factor: f64,
}

pub static VOLTAGE_UNITS: &[ScaledUnit] = &[
    ScaledUnit { id: "V", label: "Volts (V)", factor: 1.0 },
    ScaledUnit { id: "mV", label: "Millivolts (mV)", factor: 1e-3 },
    ScaledUnit { id: "kV", label: "Kilovolts (kV)", factor: 1e3 },
];

pub static CURRENT_UNITS: &[ScaledUnit] = &[
    ScaledUnit { id: "A", label: "Amps (A)", factor: 1.0 },
    ScaledUnit { id: "mA", label: "Milliamps (mA)", factor: 1e-3 },
    ScaledUnit { id: "kA", label: "Kiloamps (kA)", factor: 1e3 },
];

pub static RESISTANCE_UNITS: &[ScaledUnit] = &[
    ScaledUnit { id: "Ohm", label: "Ohms (Ω)", factor: 1.0 },
    ScaledUnit { id: "kOhm", label: "Kiloohms (kΩ)", factor: 1e3 },
    ScaledUnit { id: "MOhm", label: "Megaohms (MΩ)", factor: 1e6 },
];

impl Quantity {
    pub fn name(&self) -> &'static str {
        match self {
            Quantity::Voltage => "voltage",
            Quantity::Current => "current",
            Quantity::Resistance => "resistance",
        }
    }

    pub fn units(&self) -> &'static [ScaledUnit] {
        match self {
            Quantity::Voltage => VOLTAGE_UNITS,
            Quantity::Current => CURRENT_UNITS,
            Quantity::Resistance => RESISTANCE_UNITS,
        }
    }

    /// SI unit, used when no unit is given
    pub fn base_unit(&self) -> &'static str {
        self.units()[0].id
    }

    pub fn unit(&self, id: &str) -> Result<&'static ScaledUnit, CalcError> {
        self.units()
            .iter()
            .find(|u| u.id == id)
            .ok_or_else(|| CalcError::UnknownUnit {
                dimension: self.name().to_string(),
                unit: id.to_string(),
            })
    }

    pub fn parse(s: &str) -> Option<Quantity> {
        match s.to_ascii_lowercase().as_str() {
            "v" | "voltage" => Some(Quantity::Voltage),
            "i" | "current" => Some(Quantity::Current),
            "r" | "resistance" => Some(Quantity::Resistance),
            _ => None,
        }
    }
}

/// A value in a named unit, e.g. 4.7 kOhm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub value: f64,
    pub unit: String,
}

impl Reading {
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }
}

/// Ohm's law problem: the unknown plus the two known readings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OhmsLaw {
    pub unknown: Quantity,
    #[serde(default)]
    pub voltage: Option<Reading>,
    #[serde(default)]
    pub current: Option<Reading>,
    #[serde(default)]
    pub resistance: Option<Reading>,
    /// Unit for the solved quantity; SI when absent
    #[serde(default)]
    pub result_unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OhmsLawResult {
    pub quantity: Quantity,
    /// Solved value in `unit`
    pub value: f64,
    pub unit: &'static str,
    pub unit_label: &'static str,
    /// Dissipated power P = V × I in watts
    pub power_watts: f64,
}

impl fmt::Display for OhmsLawResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            format_value(self.value, DISPLAY_PRECISION),
            self.unit_label
        )
    }
}

impl OhmsLaw {
    /// Known reading converted to SI
    fn si(&self, quantity: Quantity) -> Result<f64, CalcError> {
        let reading = match quantity {
            Quantity::Voltage => &self.voltage,
            Quantity::Current => &self.current,
            Quantity::Resistance => &self.resistance,
        };
        let reading = reading
            .as_ref()
            .filter(|r| r.value.is_finite())
            .ok_or_else(|| CalcError::InvalidInput(format!("Please enter a valid {}", quantity.name())))?;
        Ok(reading.value * quantity.unit(&reading.unit)?.factor)
    }

    /// Solve for the unknown quantity
    pub fn solve(&self) -> Result<OhmsLawResult, CalcError> {
        let result_unit = self.unknown.unit(
            self.result_unit
                .as_deref()
                .unwrap_or_else(|| self.unknown.base_unit()),
        )?;

        let (si_value, volts, amps) = match self.unknown {
            Quantity::Voltage => {
                let i = self.si(Quantity::Current)?;
                let r = self.si(Quantity::Resistance)?;
                (i * r, i * r, i)
            }
            Quantity::Current => {
                let v = self.si(Quantity::Voltage)?;
                let r = self.si(Quantity::Resistance)?;
                if r == 0.0 {
                    return Err(CalcError::Domain(
                        "Resistance cannot be zero when calculating current".to_string(),
                    ));
                }
                (v / r, v, v / r)
            }
            Quantity::Resistance => {
                let v = self.si(Quantity::Voltage)?;
                let i = self.si(Quantity::Current)?;
                if i == 0.0 {
                    return Err(CalcError::Domain(
                        "Current cannot be zero when calculating resistance".to_string(),
                    ));
                }
                (v / i, v, i)
            }
        };

        debug!(unknown = self.unknown.name(), si_value, "solved Ohm's law");
        Ok(OhmsLawResult {
            quantity: self.unknown,
            value: si_value / result_unit.factor,
            unit: result_unit.id,
            unit_label: result_unit.label,
            power_watts: volts * amps,
        })
    }
}
