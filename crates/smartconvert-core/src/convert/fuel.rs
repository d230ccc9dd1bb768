//! Harmonic fuel-economy conversion
//!
//! Distance-per-volume units (km/L, MPG) scale linearly against each
//! other, while volume-per-distance (L/100km) is their reciprocal. Every
//! value goes through km/L.

use super::Conversion;

const KM_PER_MILE: f64 = 1.609_344;
const LITERS_PER_US_GALLON: f64 = 3.785_411_784;
const LITERS_PER_UK_GALLON: f64 = 4.546_09;

/// How a unit relates to km/L
#[derive(Debug, Clone, Copy)]
enum Scale {
    /// `km/L = value * k`
    Direct(f64),
    /// `km/L = k / value`
    Reciprocal(f64),
}

fn scale(unit: &str) -> Option<Scale> {
    match unit {
        "km_l" => Some(Scale::Direct(1.0)),
        "mpg_us" => Some(Scale::Direct(KM_PER_MILE / LITERS_PER_US_GALLON)),
        "mpg_uk" => Some(Scale::Direct(KM_PER_MILE / LITERS_PER_UK_GALLON)),
        "l_100km" => Some(Scale::Reciprocal(100.0)),
        _ => None,
    }
}

/// Convert between fuel-economy units.
///
/// A reciprocal relation evaluated at zero has no finite result: 0 L/100km
/// is unbounded efficiency and 0 km/L is unbounded consumption. Both are
/// reported as [`Conversion::Pole`] rather than infinity or NaN, in either
/// direction. Returns `None` for unknown units.
pub fn convert(value: f64, from: &str, to: &str) -> Option<Conversion> {
    let from_scale = scale(from)?;
    let to_scale = scale(to)?;
    if from == to {
        return Some(Conversion::Value(value));
    }

    let km_per_liter = match from_scale {
        Scale::Direct(k) => value * k,
        Scale::Reciprocal(_) if value == 0.0 => return Some(Conversion::Pole),
        Scale::Reciprocal(k) => k / value,
    };

    let result = match to_scale {
        Scale::Direct(k) => km_per_liter / k,
        Scale::Reciprocal(_) if km_per_liter == 0.0 => return Some(Conversion::Pole),
        Scale::Reciprocal(k) => k / km_per_liter,
    };
    Some(Conversion::Value(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(c: Option<Conversion>) -> f64 {
        c.and_then(|c| c.as_f64()).expect("expected a finite value")
    }

    #[test]
    fn test_reciprocal() {
        assert!((value(convert(10.0, "km_l", "l_100km")) - 10.0).abs() < 1e-12);
        assert!((value(convert(5.0, "l_100km", "km_l")) - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_mpg_to_l_100km() {
        // 30 US MPG is about 7.84 L/100km
        let l = value(convert(30.0, "mpg_us", "l_100km"));
        assert!((l - 7.840_486).abs() < 1e-5);
    }

    #[test]
    fn test_zero_is_a_pole_both_ways() {
        assert_eq!(convert(0.0, "km_l", "l_100km"), Some(Conversion::Pole));
        assert_eq!(convert(0.0, "l_100km", "km_l"), Some(Conversion::Pole));
        assert_eq!(convert(0.0, "l_100km", "mpg_us"), Some(Conversion::Pole));
    }

    #[test]
    fn test_zero_between_direct_units_is_zero() {
        assert_eq!(convert(0.0, "km_l", "mpg_uk"), Some(Conversion::Value(0.0)));
        assert_eq!(convert(0.0, "l_100km", "l_100km"), Some(Conversion::Value(0.0)));
    }

    #[test]
    fn test_unknown_unit() {
        assert_eq!(convert(1.0, "km_l", "furlongs_per_hogshead"), None);
    }
}
