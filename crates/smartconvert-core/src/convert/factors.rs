//! Conversion factor tables for the linear dimensions
//!
//! Each entry is the number of that unit in one canonical base unit, so
//! the base unit itself is always exactly 1.

/// Read-only table of `unit id -> units per base unit`
#[derive(Debug)]
pub struct FactorTable {
    /// Canonical unit every factor is anchored to
    pub base: &'static str,
    pub factors: &'static [(&'static str, f64)],
}

impl FactorTable {
    /// Look up the factor of a unit
    pub fn factor(&self, unit: &str) -> Option<f64> {
        self.factors
            .iter()
            .find(|(id, _)| *id == unit)
            .map(|(_, factor)| *factor)
    }

    /// Iterator over all unit ids in the table
    pub fn units(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factors.iter().map(|(id, _)| *id)
    }
}

pub static DISTANCE: FactorTable = FactorTable {
    base: "m",
    factors: &[
        ("km", 0.001),
        ("m", 1.0),
        ("cm", 100.0),
        ("mm", 1000.0),
        ("mi", 1.0 / 1609.344),
        ("yd", 1.0 / 0.9144),
        ("ft", 1.0 / 0.3048),
        ("in", 1.0 / 0.0254),
    ],
};

pub static WEIGHT: FactorTable = FactorTable {
    base: "kg",
    factors: &[
        ("kg", 1.0),
        ("g", 1000.0),
        ("mg", 1_000_000.0),
        ("t", 0.001),
        ("lb", 1.0 / 0.453_592_37),
        ("oz", 1.0 / 0.028_349_523_125),
        ("st", 1.0 / 6.350_293_18),
    ],
};

pub static TIME: FactorTable = FactorTable {
    base: "s",
    factors: &[
        ("s", 1.0),
        ("ms", 1000.0),
        ("min", 1.0 / 60.0),
        ("h", 1.0 / 3600.0),
        ("d", 1.0 / 86_400.0),
        ("wk", 1.0 / 604_800.0),
        // Average month and year, leap years included
        ("mo", 1.0 / (86_400.0 * 30.4375)),
        ("yr", 1.0 / (86_400.0 * 365.25)),
    ],
};

pub static VOLUME: FactorTable = FactorTable {
    base: "l",
    factors: &[
        ("l", 1.0),
        ("ml", 1000.0),
        ("m3", 0.001),
        ("gal_us", 1.0 / 3.785_411_784),
        ("qt_us", 1.0 / 0.946_352_946),
        ("pt_us", 1.0 / 0.473_176_473),
        ("cup_us", 1.0 / 0.236_588_236_5),
        ("floz_us", 1.0 / 0.029_573_529_562_5),
        ("gal_uk", 1.0 / 4.546_09),
        ("floz_uk", 1.0 / 0.028_413_062_5),
    ],
};

pub static SPEED: FactorTable = FactorTable {
    base: "m/s",
    factors: &[
        ("m/s", 1.0),
        ("km/h", 3.6),
        ("mph", 3600.0 / 1609.344),
        ("ft/s", 1.0 / 0.3048),
        ("knot", 3600.0 / 1852.0),
    ],
};

pub static AREA: FactorTable = FactorTable {
    base: "m2",
    factors: &[
        ("m2", 1.0),
        ("km2", 1e-6),
        ("ha", 1e-4),
        ("ft2", 1.0 / 0.092_903_04),
        ("yd2", 1.0 / 0.836_127_36),
        ("acre", 1.0 / 4_046.856_422_4),
        ("mi2", 1.0 / 2_589_988.110_336),
    ],
};

pub static DATA_STORAGE: FactorTable = FactorTable {
    base: "B",
    factors: &[
        ("B", 1.0),
        ("KB", 1e-3),
        ("KiB", 1.0 / 1024.0),
        ("MB", 1e-6),
        ("MiB", 1.0 / 1_048_576.0),
        ("GB", 1e-9),
        ("GiB", 1.0 / 1_073_741_824.0),
        ("TB", 1e-12),
        ("TiB", 1.0 / 1_099_511_627_776.0),
        ("bit", 8.0),
    ],
};

pub static ENERGY: FactorTable = FactorTable {
    base: "J",
    factors: &[
        ("J", 1.0),
        ("kJ", 1e-3),
        // Thermochemical calorie
        ("cal", 1.0 / 4.184),
        ("kcal", 1.0 / 4184.0),
        ("Wh", 1.0 / 3600.0),
        ("kWh", 1.0 / 3_600_000.0),
        // International Table BTU
        ("Btu", 1.0 / 1_055.055_852_62),
        ("ftlb", 1.0 / 1.355_817_948_331_400_4),
    ],
};

pub static PRESSURE: FactorTable = FactorTable {
    base: "Pa",
    factors: &[
        ("Pa", 1.0),
        ("kPa", 1e-3),
        ("bar", 1e-5),
        ("psi", 1.0 / 6_894.757_293_168),
        ("atm", 1.0 / 101_325.0),
        ("torr", 760.0 / 101_325.0),
    ],
};

pub static POWER: FactorTable = FactorTable {
    base: "W",
    factors: &[
        ("W", 1.0),
        ("kW", 1e-3),
        ("MW", 1e-6),
        ("hp_m", 1.0 / 735.498_75),
        ("hp_e", 1.0 / 745.699_871_582_270_2),
        ("Btu/h", 3600.0 / 1_055.055_852_62),
        ("ftlb/s", 1.0 / 1.355_817_948_331_400_4),
    ],
};

/// Every linear table, for exhaustive checks
pub static ALL: &[&FactorTable] = &[
    &DISTANCE,
    &WEIGHT,
    &TIME,
    &VOLUME,
    &SPEED,
    &AREA,
    &DATA_STORAGE,
    &ENERGY,
    &PRESSURE,
    &POWER,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_factor_is_exactly_one() {
        for table in ALL {
            assert_eq!(table.factor(table.base), Some(1.0), "base of {}", table.base);
        }
    }

    #[test]
    fn test_factors_positive_and_finite() {
        for table in ALL {
            for (id, factor) in table.factors {
                assert!(factor.is_finite() && *factor > 0.0, "{id}");
            }
        }
    }

    #[test]
    fn test_unknown_unit() {
        assert_eq!(DISTANCE.factor("parsec"), None);
    }
}
