//! Affine temperature conversion
//!
//! Celsius, Fahrenheit and Kelvin have different zero points, so values
//! are routed through Celsius with a forward and an inverse formula
//! instead of a single multiplicative factor.

/// Convert a temperature in `unit` to Celsius
fn to_celsius(value: f64, unit: &str) -> Option<f64> {
    match unit {
        "C" => Some(value),
        "F" => Some((value - 32.0) * 5.0 / 9.0),
        "K" => Some(value - 273.15),
        _ => None,
    }
}

/// Convert a Celsius temperature to `unit`
fn from_celsius(celsius: f64, unit: &str) -> Option<f64> {
    match unit {
        "C" => Some(celsius),
        "F" => Some(celsius * 9.0 / 5.0 + 32.0),
        "K" => Some(celsius + 273.15),
        _ => None,
    }
}

/// Convert between two temperature scales.
/// Returns `None` when either unit is not a known scale.
pub fn convert(value: f64, from: &str, to: &str) -> Option<f64> {
    let celsius = to_celsius(value, from)?;
    if from == to {
        return Some(value);
    }
    from_celsius(celsius, to)
}
