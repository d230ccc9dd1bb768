//! Conversion properties across every dimension

use smartconvert_core::{Conversion, Dimension, RateBook, DIMENSIONS};

const VALUES: [f64; 5] = [0.0, 1.0, 1000.0, 0.0001, -5.0];

fn value(result: Result<Conversion, smartconvert_core::CalcError>) -> f64 {
    match result {
        Ok(Conversion::Value(v)) => v,
        other => panic!("expected a value, got {other:?}"),
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

#[test]
fn test_round_trip_every_pair() {
    let rates = RateBook::with_defaults();
    for def in DIMENSIONS {
        for from in def.units {
            for to in def.units {
                for v in VALUES {
                    if def.dimension == Dimension::FuelEconomy && v <= 0.0 {
                        continue;
                    }
                    let there = value(def.dimension.convert(v, from.id, to.id, &rates));
                    let back = value(def.dimension.convert(there, to.id, from.id, &rates));
                    assert!(
                        close(back, v),
                        "{}: {v} {} -> {there} {} -> {back}",
                        def.key,
                        from.id,
                        to.id
                    );
                }
            }
        }
    }
}

#[test]
fn test_identity_never_touches_tables() {
    let rates = RateBook::new();
    let v = 0.1 + 0.2;
    for def in DIMENSIONS {
        if def.dimension == Dimension::Currency {
            continue;
        }
        for unit in def.units {
            assert_eq!(
                def.dimension.convert(v, unit.id, unit.id, &rates),
                Ok(Conversion::Value(v))
            );
        }
    }
}

#[test]
fn test_known_factors() {
    let rates = RateBook::new();
    let cases = [
        (Dimension::Distance, 1.0, "mi", "km", 1.609344),
        (Dimension::Distance, 1.0, "ft", "in", 12.0),
        (Dimension::Weight, 1.0, "lb", "kg", 0.45359237),
        (Dimension::Weight, 1.0, "st", "lb", 14.0),
        (Dimension::Time, 1.0, "d", "h", 24.0),
        (Dimension::Time, 1.0, "yr", "d", 365.25),
        (Dimension::Volume, 1.0, "gal_us", "l", 3.785411784),
        (Dimension::Volume, 1.0, "gal_us", "qt_us", 4.0),
        (Dimension::Speed, 100.0, "km/h", "m/s", 27.777_777_777_777_78),
        (Dimension::Area, 1.0, "ha", "m2", 10_000.0),
        (Dimension::Area, 640.0, "acre", "mi2", 1.0),
        (Dimension::DataStorage, 1.0, "GiB", "MiB", 1024.0),
        (Dimension::DataStorage, 1.0, "KB", "bit", 8000.0),
        (Dimension::Energy, 1.0, "kWh", "J", 3_600_000.0),
        (Dimension::Energy, 1.0, "kcal", "cal", 1000.0),
        (Dimension::Pressure, 1.0, "atm", "torr", 760.0),
        (Dimension::Pressure, 1.0, "bar", "kPa", 100.0),
        (Dimension::Power, 1.0, "kW", "W", 1000.0),
    ];
    for (dimension, v, from, to, expected) in cases {
        let got = value(dimension.convert(v, from, to, &rates));
        assert!(close(got, expected), "{v} {from} -> {to}: {got} != {expected}");
    }
}

#[test]
fn test_temperature_fixed_points() {
    let rates = RateBook::new();
    let t = Dimension::Temperature;
    assert!(close(value(t.convert(0.0, "C", "F", &rates)), 32.0));
    assert!(close(value(t.convert(100.0, "C", "F", &rates)), 212.0));
    assert!(close(value(t.convert(0.0, "C", "K", &rates)), 273.15));
    assert!(close(value(t.convert(-40.0, "F", "C", &rates)), -40.0));
    assert!(close(value(t.convert(0.0, "K", "F", &rates)), -459.67));
}

#[test]
fn test_fuel_economy() {
    let rates = RateBook::new();
    let f = Dimension::FuelEconomy;
    let l = value(f.convert(30.0, "mpg_us", "l_100km", &rates));
    assert!((l - 7.840_486).abs() < 1e-5);
    let uk = value(f.convert(1.0, "mpg_us", "mpg_uk", &rates));
    assert!((uk - 1.200_95).abs() < 1e-5);

    assert_eq!(f.convert(0.0, "l_100km", "km_l", &rates), Ok(Conversion::Pole));
    assert_eq!(f.convert(0.0, "km_l", "l_100km", &rates), Ok(Conversion::Pole));
    assert_eq!(f.convert(0.0, "mpg_us", "km_l", &rates), Ok(Conversion::Value(0.0)));
}

#[test]
fn test_currency_states() {
    let pending = RateBook::new();
    assert_eq!(
        Dimension::Currency.convert(1.0, "USD", "EUR", &pending),
        Ok(Conversion::Loading)
    );

    let mut failed = RateBook::new();
    failed.fail("offline");
    assert_eq!(
        Dimension::Currency.convert(1.0, "USD", "EUR", &failed),
        Ok(Conversion::RatesUnavailable)
    );

    let ready = RateBook::with_defaults();
    let yen = value(Dimension::Currency.convert(1.0, "EUR", "JPY", &ready));
    assert!(close(yen, 157.0 / 0.92));
}

#[test]
fn test_unit_ids_are_case_sensitive() {
    let rates = RateBook::new();
    assert!(Dimension::Distance.convert(1.0, "KM", "mi", &rates).is_err());
    assert!(Dimension::DataStorage.convert(1.0, "kb", "B", &rates).is_err());
}
