//! Conversion functions for every dimension

pub mod factors;
pub mod fuel;
pub mod temperature;

use serde::Serialize;
use tracing::debug;

use crate::error::CalcError;
use crate::rates::RateBook;
use crate::types::{Dimension, Method};
use factors::FactorTable;

/// Outcome of a single conversion
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Conversion {
    /// A finite numeric result
    Value(f64),
    /// The result is unbounded (zero on a reciprocal unit)
    Pole,
    /// Exchange rates have not been fetched yet
    Loading,
    /// Exchange rates failed to load, or a currency has no rate
    RatesUnavailable,
}

impl Conversion {
    /// Numeric result, if any
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Conversion::Value(v) => Some(*v),
            _ => None,
        }
    }

    /// Display text for results that are not numbers
    pub fn sentinel(&self) -> Option<&'static str> {
        match self {
            Conversion::Value(_) => None,
            Conversion::Pole => Some("Undefined"),
            Conversion::Loading => Some("Loading..."),
            Conversion::RatesUnavailable => Some("Rate N/A"),
        }
    }
}

/// Convert through a linear factor table.
///
/// `value / factor[from] * factor[to]`; identical units return the input
/// untouched. Returns `None` when a unit is missing from the table.
pub fn convert_linear(table: &FactorTable, value: f64, from: &str, to: &str) -> Option<f64> {
    if from == to {
        return Some(value);
    }
    let in_base = value / table.factor(from)?;
    Some(in_base * table.factor(to)?)
}

fn unknown_unit(dimension: Dimension, unit: &str) -> CalcError {
    CalcError::UnknownUnit {
        dimension: dimension.to_string(),
        unit: unit.to_string(),
    }
}

impl Dimension {
    /// Convert `value` from one unit of this dimension to another.
    ///
    /// Both units must belong to the dimension's catalog. `rates` is only
    /// consulted for currency.
    pub fn convert(
        self,
        value: f64,
        from: &str,
        to: &str,
        rates: &RateBook,
    ) -> Result<Conversion, CalcError> {
        for unit in [from, to] {
            if !self.has_unit(unit) {
                return Err(unknown_unit(self, unit));
            }
        }

        let result = match &self.def().method {
            Method::Linear(table) => convert_linear(table, value, from, to).map(Conversion::Value),
            Method::Affine => temperature::convert(value, from, to).map(Conversion::Value),
            Method::Harmonic => fuel::convert(value, from, to),
            Method::Rates => return rates.convert(value, from, to),
        };

        let result = result.ok_or_else(|| unknown_unit(self, from))?;
        debug!(dimension = %self, value, from, to, ?result, "converted");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DIMENSIONS;

    #[test]
    fn test_linear() {
        let km = convert_linear(&factors::DISTANCE, 1609.344, "m", "mi").unwrap();
        assert!((km - 1.0).abs() < 1e-12);
        assert_eq!(convert_linear(&factors::DISTANCE, 1.0, "km", "m"), Some(1000.0));
        assert_eq!(convert_linear(&factors::DISTANCE, 1.0, "km", "lb"), None);
    }

    #[test]
    fn test_identity_is_exact() {
        let rates = RateBook::with_defaults();
        for def in DIMENSIONS {
            for unit in def.units {
                for v in [0.1 + 0.2, -5.0, 1e-300, 123_456.789] {
                    let result = def.dimension.convert(v, unit.id, unit.id, &rates);
                    assert_eq!(result, Ok(Conversion::Value(v)), "{} {}", def.key, unit.id);
                }
            }
        }
    }

    #[test]
    fn test_unknown_unit_rejected() {
        let rates = RateBook::new();
        let err = Dimension::Distance.convert(1.0, "km", "kg", &rates).unwrap_err();
        assert_eq!(
            err,
            CalcError::UnknownUnit {
                dimension: "distance".into(),
                unit: "kg".into()
            }
        );
    }

    #[test]
    fn test_currency_uses_rate_book() {
        let pending = RateBook::new();
        assert_eq!(
            Dimension::Currency.convert(1.0, "USD", "EUR", &pending),
            Ok(Conversion::Loading)
        );
        let ready = RateBook::with_defaults();
        assert_eq!(
            Dimension::Currency.convert(100.0, "USD", "EUR", &ready),
            Ok(Conversion::Value(92.0))
        );
    }

    #[test]
    fn test_sentinels() {
        assert_eq!(Conversion::Pole.sentinel(), Some("Undefined"));
        assert_eq!(Conversion::Value(1.0).sentinel(), None);
        assert_eq!(Conversion::Loading.as_f64(), None);
    }
}
