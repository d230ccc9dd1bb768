//! Unit catalogs, one per dimension
//!
//! To add a new unit, add an entry to the catalog of its dimension and a
//! factor to the matching table in `convert::factors` (linear dimensions
//! only). Lookups, defaults and display pick it up automatically.

use serde::Serialize;
use std::fmt;

/// Unit metadata - single source of truth for each selectable unit
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct UnitDef {
    /// Stable key used by conversion tables and preferences (e.g. "km")
    pub id: &'static str,
    /// Display label (e.g. "Kilometer (km)")
    pub label: &'static str,
    /// Flag hint for currencies (ISO 3166 alpha-2, "EU" for the euro)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<&'static str>,
}

impl UnitDef {
    const fn new(id: &'static str, label: &'static str) -> Self {
        Self {
            id,
            label,
            country_code: None,
        }
    }

    const fn currency(id: &'static str, label: &'static str, country: &'static str) -> Self {
        Self {
            id,
            label,
            country_code: Some(country),
        }
    }
}

impl fmt::Display for UnitDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

pub static DISTANCE_UNITS: &[UnitDef] = &[
    UnitDef::new("km", "Kilometer (km)"),
    UnitDef::new("m", "Meter (m)"),
    UnitDef::new("cm", "Centimeter (cm)"),
    UnitDef::new("mm", "Millimeter (mm)"),
    UnitDef::new("mi", "Mile (mi)"),
    UnitDef::new("yd", "Yard (yd)"),
    UnitDef::new("ft", "Foot (ft)"),
    UnitDef::new("in", "Inch (in)"),
];

pub static WEIGHT_UNITS: &[UnitDef] = &[
    UnitDef::new("kg", "Kilogram (kg)"),
    UnitDef::new("g", "Gram (g)"),
    UnitDef::new("mg", "Milligram (mg)"),
    UnitDef::new("t", "Metric Ton (t)"),
    UnitDef::new("lb", "Pound (lb)"),
    UnitDef::new("oz", "Ounce (oz)"),
    UnitDef::new("st", "Stone (st)"),
];

pub static TEMPERATURE_UNITS: &[UnitDef] = &[
    UnitDef::new("C", "Celsius (°C)"),
    UnitDef::new("F", "Fahrenheit (°F)"),
    UnitDef::new("K", "Kelvin (K)"),
];

pub static TIME_UNITS: &[UnitDef] = &[
    UnitDef::new("s", "Second (s)"),
    UnitDef::new("ms", "Millisecond (ms)"),
    UnitDef::new("min", "Minute (min)"),
    UnitDef::new("h", "Hour (h)"),
    UnitDef::new("d", "Day (d)"),
    UnitDef::new("wk", "Week (wk)"),
    UnitDef::new("mo", "Month (approx)"),
    UnitDef::new("yr", "Year (approx)"),
];

pub static VOLUME_UNITS: &[UnitDef] = &[
    UnitDef::new("l", "Liter (L)"),
    UnitDef::new("ml", "Milliliter (mL)"),
    UnitDef::new("m3", "Cubic Meter (m³)"),
    UnitDef::new("gal_us", "US Gallon (gal)"),
    UnitDef::new("qt_us", "US Quart (qt)"),
    UnitDef::new("pt_us", "US Pint (pt)"),
    UnitDef::new("cup_us", "US Cup"),
    UnitDef::new("floz_us", "US Fluid Ounce (fl oz)"),
    UnitDef::new("gal_uk", "UK Gallon (gal)"),
    UnitDef::new("floz_uk", "UK Fluid Ounce (fl oz)"),
];

pub static SPEED_UNITS: &[UnitDef] = &[
    UnitDef::new("m/s", "Meter per second (m/s)"),
    UnitDef::new("km/h", "Kilometer per hour (km/h)"),
    UnitDef::new("mph", "Mile per hour (mph)"),
    UnitDef::new("ft/s", "Foot per second (ft/s)"),
    UnitDef::new("knot", "Knot (kn)"),
];

pub static AREA_UNITS: &[UnitDef] = &[
    UnitDef::new("m2", "Square Meter (m²)"),
    UnitDef::new("km2", "Square Kilometer (km²)"),
    UnitDef::new("ha", "Hectare (ha)"),
    UnitDef::new("ft2", "Square Foot (ft²)"),
    UnitDef::new("yd2", "Square Yard (yd²)"),
    UnitDef::new("acre", "Acre (ac)"),
    UnitDef::new("mi2", "Square Mile (mi²)"),
];

pub static DATA_STORAGE_UNITS: &[UnitDef] = &[
    UnitDef::new("B", "Byte (B)"),
    UnitDef::new("KB", "Kilobyte (KB)"),
    UnitDef::new("KiB", "Kibibyte (KiB)"),
    UnitDef::new("MB", "Megabyte (MB)"),
    UnitDef::new("MiB", "Mebibyte (MiB)"),
    UnitDef::new("GB", "Gigabyte (GB)"),
    UnitDef::new("GiB", "Gibibyte (GiB)"),
    UnitDef::new("TB", "Terabyte (TB)"),
    UnitDef::new("TiB", "Tebibyte (TiB)"),
    UnitDef::new("bit", "Bit (b)"),
];

pub static ENERGY_UNITS: &[UnitDef] = &[
    UnitDef::new("J", "Joule (J)"),
    UnitDef::new("kJ", "Kilojoule (kJ)"),
    UnitDef::new("cal", "Calorie (cal)"),
    UnitDef::new("kcal", "Kilocalorie (kcal)"),
    UnitDef::new("Wh", "Watt-hour (Wh)"),
    UnitDef::new("kWh", "Kilowatt-hour (kWh)"),
    UnitDef::new("Btu", "British Thermal Unit (BTU)"),
    UnitDef::new("ftlb", "Foot-pound (ft⋅lb)"),
];

pub static PRESSURE_UNITS: &[UnitDef] = &[
    UnitDef::new("Pa", "Pascal (Pa)"),
    UnitDef::new("kPa", "Kilopascal (kPa)"),
    UnitDef::new("bar", "Bar (bar)"),
    UnitDef::new("psi", "Pound per square inch (psi)"),
    UnitDef::new("atm", "Atmosphere (atm)"),
    UnitDef::new("torr", "Torr (mmHg)"),
];

pub static POWER_UNITS: &[UnitDef] = &[
    UnitDef::new("W", "Watt (W)"),
    UnitDef::new("kW", "Kilowatt (kW)"),
    UnitDef::new("MW", "Megawatt (MW)"),
    UnitDef::new("hp_m", "Metric Horsepower (hp(M))"),
    UnitDef::new("hp_e", "Mechanical Horsepower (hp(I))"),
    UnitDef::new("Btu/h", "BTU per hour (BTU/h)"),
    UnitDef::new("ftlb/s", "Foot-pound per second (ft⋅lb/s)"),
];

pub static FUEL_ECONOMY_UNITS: &[UnitDef] = &[
    UnitDef::new("mpg_us", "Miles per Gallon (US MPG)"),
    UnitDef::new("mpg_uk", "Miles per Gallon (UK MPG)"),
    UnitDef::new("l_100km", "Liters per 100km (L/100km)"),
    UnitDef::new("km_l", "Kilometers per Liter (km/L)"),
];

pub static CURRENCY_UNITS: &[UnitDef] = &[
    UnitDef::currency("USD", "USD - US Dollar", "US"),
    UnitDef::currency("EUR", "EUR - Euro", "EU"),
    UnitDef::currency("GBP", "GBP - British Pound", "GB"),
    UnitDef::currency("JPY", "JPY - Japanese Yen", "JP"),
    UnitDef::currency("CAD", "CAD - Canadian Dollar", "CA"),
    UnitDef::currency("AUD", "AUD - Australian Dollar", "AU"),
    UnitDef::currency("INR", "INR - Indian Rupee", "IN"),
    UnitDef::currency("CHF", "CHF - Swiss Franc", "CH"),
    UnitDef::currency("CNY", "CNY - Chinese Yuan", "CN"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_unit_ids_unique_per_catalog() {
        for catalog in [
            DISTANCE_UNITS,
            WEIGHT_UNITS,
            TEMPERATURE_UNITS,
            TIME_UNITS,
            VOLUME_UNITS,
            SPEED_UNITS,
            AREA_UNITS,
            DATA_STORAGE_UNITS,
            ENERGY_UNITS,
            PRESSURE_UNITS,
            POWER_UNITS,
            FUEL_ECONOMY_UNITS,
            CURRENCY_UNITS,
        ] {
            let ids: HashSet<_> = catalog.iter().map(|u| u.id).collect();
            assert_eq!(ids.len(), catalog.len());
            assert!(catalog.iter().all(|u| !u.label.is_empty()));
        }
    }

    #[test]
    fn test_currencies_carry_country_hint() {
        assert!(CURRENCY_UNITS.iter().all(|u| u.country_code.is_some()));
        assert!(DISTANCE_UNITS.iter().all(|u| u.country_code.is_none()));
    }
}
