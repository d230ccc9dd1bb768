//! Precision formatting for displayed results

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Default number of decimal places
pub const DEFAULT_PRECISION: u32 = 4;
/// Smallest user-selectable precision
pub const MIN_PRECISION: u32 = 2;
/// Largest user-selectable precision
pub const MAX_PRECISION: u32 = 8;

/// Clamp a requested precision into the supported range
pub fn clamp_precision(precision: u32) -> u32 {
    precision.clamp(MIN_PRECISION, MAX_PRECISION)
}

/// Strip trailing fractional zeros, and the point itself if nothing is
/// left after it ("1.2500" -> "1.25", "3.000" -> "3")
fn trim_fraction(s: &str) -> &str {
    if !s.contains('.') {
        return s;
    }
    s.trim_end_matches('0').trim_end_matches('.')
}

/// Round to `precision` decimal places (half away from zero) and drop
/// trailing zeros. Negative zero prints as "0".
///
/// Values beyond the range of `Decimal` fall back to float formatting.
pub fn format_value(value: f64, precision: u32) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let text = match Decimal::from_f64(value) {
        Some(d) => d
            .round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero)
            .normalize()
            .to_string(),
        None => {
            let s = format!("{value:.prec$}", prec = precision as usize);
            trim_fraction(&s).to_string()
        }
    };

    match text.as_str() {
        "-0" => "0".to_string(),
        _ => text,
    }
}
