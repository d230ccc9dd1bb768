//! pH / pOH / [H+] / [OH-] interconversion at 25 °C

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use tracing::debug;

use crate::error::CalcError;

/// pH + pOH for water at 25 °C (Kw = 1.0e-14)
pub const PKW: f64 = 14.0;

/// Which quantity the user entered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhInput {
    Ph,
    Poh,
    /// Hydrogen ion concentration [H+] in mol/L
    Hydrogen,
    /// Hydroxide ion concentration [OH-] in mol/L
    Hydroxide,
}

impl PhInput {
    pub fn parse(s: &str) -> Option<PhInput> {
        match s.to_ascii_lowercase().as_str() {
            "ph" => Some(PhInput::Ph),
            "poh" => Some(PhInput::Poh),
            "h" | "h+" | "hydrogen" => Some(PhInput::Hydrogen),
            "oh" | "oh-" | "hydroxide" => Some(PhInput::Hydroxide),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Acidity {
    Acidic,
    Neutral,
    Basic,
}

/// All four quantities of a solution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhResult {
    pub ph: f64,
    pub poh: f64,
    pub hydrogen: f64,
    pub hydroxide: f64,
    /// The pH/pOH derived from a concentration fell outside [0, 14] and was
    /// clamped before re-deriving the other concentration
    pub clamped: bool,
}

impl PhResult {
    pub fn acidity(&self) -> Acidity {
        let ph = (self.ph * 100.0).round() / 100.0;
        if ph < 7.0 {
            Acidity::Acidic
        } else if ph > 7.0 {
            Acidity::Basic
        } else {
            Acidity::Neutral
        }
    }
}

impl Serialize for PhResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PhResult", 6)?;
        state.serialize_field("ph", &self.ph)?;
        state.serialize_field("poh", &self.poh)?;
        state.serialize_field("hydrogen", &self.hydrogen)?;
        state.serialize_field("hydroxide", &self.hydroxide)?;
        state.serialize_field("clamped", &self.clamped)?;
        state.serialize_field("acidity", &self.acidity())?;
        state.end()
    }
}

impl fmt::Display for PhResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pH {:.2}, pOH {:.2}, [H+] {:.3e} mol/L, [OH-] {:.3e} mol/L",
            self.ph, self.poh, self.hydrogen, self.hydroxide
        )
    }
}

fn check_scale(name: &'static str, value: f64) -> Result<f64, CalcError> {
    if !(0.0..=PKW).contains(&value) {
        return Err(CalcError::out_of_range(name, "between 0 and 14"));
    }
    Ok(value)
}

fn check_concentration(name: &'static str, value: f64) -> Result<f64, CalcError> {
    if value <= 0.0 {
        return Err(CalcError::out_of_range(name, "positive"));
    }
    Ok(value)
}

/// `-log10(c)` clamped into [0, 14]; the flag reports whether it moved
fn scale_of(concentration: f64) -> (f64, bool) {
    let p = -concentration.log10();
    let clamped = p.clamp(0.0, PKW);
    (clamped, clamped != p)
}

/// Derive the other three quantities from one known value.
///
/// pH and pOH must lie in [0, 14]; concentrations must be positive. A
/// concentration whose scale value falls outside [0, 14] is accepted, but
/// the derived pH/pOH is clamped into range and `clamped` is set.
pub fn solve(input: PhInput, value: f64) -> Result<PhResult, CalcError> {
    if !value.is_finite() {
        return Err(CalcError::InvalidInput(value.to_string()));
    }

    let result = match input {
        PhInput::Ph => {
            let ph = check_scale("pH", value)?;
            let poh = PKW - ph;
            PhResult {
                ph,
                poh,
                hydrogen: 10f64.powf(-ph),
                hydroxide: 10f64.powf(-poh),
                clamped: false,
            }
        }
        PhInput::Poh => {
            let poh = check_scale("pOH", value)?;
            let ph = PKW - poh;
            PhResult {
                ph,
                poh,
                hydrogen: 10f64.powf(-ph),
                hydroxide: 10f64.powf(-poh),
                clamped: false,
            }
        }
        PhInput::Hydrogen => {
            let hydrogen = check_concentration("[H+]", value)?;
            let (ph, clamped) = scale_of(hydrogen);
            let poh = PKW - ph;
            PhResult {
                ph,
                poh,
                hydrogen,
                hydroxide: 10f64.powf(-poh),
                clamped,
            }
        }
        PhInput::Hydroxide => {
            let hydroxide = check_concentration("[OH-]", value)?;
            let (poh, clamped) = scale_of(hydroxide);
            let ph = PKW - poh;
            PhResult {
                ph,
                poh,
                hydrogen: 10f64.powf(-ph),
                hydroxide,
                clamped,
            }
        }
    };

    debug!(?input, value, ph = result.ph, "solved pH");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_water() {
        let r = solve(PhInput::Ph, 7.0).unwrap();
        assert_eq!(r.poh, 7.0);
        assert!((r.hydrogen - 1e-7).abs() < 1e-20);
        assert_eq!(r.acidity(), Acidity::Neutral);
    }

    #[test]
    fn test_from_hydrogen() {
        let r = solve(PhInput::Hydrogen, 1e-3).unwrap();
        assert!((r.ph - 3.0).abs() < 1e-12);
        assert!((r.poh - 11.0).abs() < 1e-12);
        assert!(!r.clamped);
        assert_eq!(r.acidity(), Acidity::Acidic);
    }

    #[test]
    fn test_from_hydroxide() {
        let r = solve(PhInput::Hydroxide, 1e-2).unwrap();
        assert!((r.ph - 12.0).abs() < 1e-12);
        assert_eq!(r.acidity(), Acidity::Basic);
    }

    #[test]
    fn test_concentrated_acid_is_clamped() {
        let r = solve(PhInput::Hydrogen, 10.0).unwrap();
        assert_eq!(r.ph, 0.0);
        assert_eq!(r.poh, 14.0);
        assert_eq!(r.hydrogen, 10.0);
        assert!(r.clamped);
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            solve(PhInput::Ph, 14.5),
            Err(CalcError::out_of_range("pH", "between 0 and 14"))
        );
        assert!(solve(PhInput::Poh, -0.1).is_err());
        assert_eq!(
            solve(PhInput::Hydroxide, 0.0),
            Err(CalcError::out_of_range("[OH-]", "positive"))
        );
        assert!(matches!(solve(PhInput::Ph, f64::NAN), Err(CalcError::InvalidInput(_))));
    }

    #[test]
    fn test_display() {
        let r = solve(PhInput::Ph, 7.0).unwrap();
        assert_eq!(
            r.to_string(),
            "pH 7.00, pOH 7.00, [H+] 1.000e-7 mol/L, [OH-] 1.000e-7 mol/L"
        );
    }

    #[test]
    fn test_parse_input() {
        assert_eq!(PhInput::parse("H+"), Some(PhInput::Hydrogen));
        assert_eq!(PhInput::parse("pOH"), Some(PhInput::Poh));
        assert_eq!(PhInput::parse("ppm"), None);
    }
}
