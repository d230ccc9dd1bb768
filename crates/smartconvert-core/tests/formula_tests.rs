//! Molar mass, pH and Ohm's law from the public API

use pretty_assertions::assert_eq;
use smartconvert_core::chem::{self, Acidity, PhInput};
use smartconvert_core::electrical::{OhmsLaw, Quantity, Reading};
use smartconvert_core::{CalcError, FormulaError};

fn total(formula: &str) -> f64 {
    chem::molar_mass(formula)
        .unwrap_or_else(|e| panic!("{formula}: {e}"))
        .total
}

#[test]
fn test_common_molar_masses() {
    let cases = [
        ("H2O", 18.015),
        ("NaCl", 58.44),
        ("C6H12O6", 180.156),
        ("(NH4)2SO4", 132.134),
        ("Ca3(PO4)2", 310.174),
        ("CuSO4·5H2O", 249.677),
        ("CuSO4*5H2O", 249.677),
    ];
    for (formula, expected) in cases {
        assert!((total(formula) - expected).abs() < 1e-9, "{formula}");
    }
}

#[test]
fn test_breakdown_sums_to_total() {
    let mass = chem::molar_mass("K4(Fe(CN)6)").unwrap();
    let elements: Vec<&str> = mass.breakdown.iter().map(|e| e.element.as_str()).collect();
    assert_eq!(elements, vec!["C", "Fe", "K", "N"]);
    let sum: f64 = mass.breakdown.iter().map(|e| e.mass).sum();
    assert!((sum - mass.total).abs() < 1e-9);
}

#[test]
fn test_formula_errors() {
    assert_eq!(
        chem::molar_mass("Qq"),
        Err(FormulaError::UnknownElement("Qq".into()))
    );
    assert!(matches!(
        chem::molar_mass("Ca(OH2"),
        Err(FormulaError::UnbalancedParens { .. })
    ));
    assert_eq!(chem::molar_mass(""), Err(FormulaError::Empty));
    // Lowercase symbols are not elements
    assert!(chem::molar_mass("h2o").is_err());
}

#[test]
fn test_ph_identity_holds() {
    for (input, value) in [
        (PhInput::Ph, 2.5),
        (PhInput::Poh, 4.0),
        (PhInput::Hydrogen, 3.2e-9),
        (PhInput::Hydroxide, 0.05),
    ] {
        let r = chem::ph::solve(input, value).unwrap();
        assert!((r.ph + r.poh - 14.0).abs() < 1e-9, "{input:?}");
        assert!((r.hydrogen * r.hydroxide - 1e-14).abs() < 1e-22, "{input:?}");
    }
}

#[test]
fn test_ph_identity_across_scale() {
    for step in 0..=56 {
        let p = f64::from(step) * 0.25;
        let r = chem::ph::solve(PhInput::Ph, p).unwrap();
        assert!((r.poh - (14.0 - p)).abs() < 1e-9, "pH {p}");
        let product = r.hydrogen * r.hydroxide;
        assert!((product - 1e-14).abs() / 1e-14 < 1e-9, "pH {p}: {product}");
        assert!(!r.clamped);
    }
}

#[test]
fn test_ph_classification() {
    assert_eq!(chem::ph::solve(PhInput::Ph, 7.004).unwrap().acidity(), Acidity::Neutral);
    assert_eq!(chem::ph::solve(PhInput::Poh, 2.0).unwrap().acidity(), Acidity::Basic);
    assert_eq!(
        chem::ph::solve(PhInput::Hydrogen, -1.0),
        Err(CalcError::OutOfRange {
            name: "[H+]",
            expected: "positive"
        })
    );
}

#[test]
fn test_ohms_law_all_unknowns() {
    let solve = |unknown, v: Option<f64>, i: Option<f64>, r: Option<f64>| {
        OhmsLaw {
            unknown,
            voltage: v.map(|v| Reading::new(v, "V")),
            current: i.map(|i| Reading::new(i, "A")),
            resistance: r.map(|r| Reading::new(r, "Ohm")),
            result_unit: None,
        }
        .solve()
    };

    assert_eq!(solve(Quantity::Voltage, None, Some(0.5), Some(220.0)).unwrap().value, 110.0);
    assert_eq!(solve(Quantity::Current, Some(12.0), None, Some(4.0)).unwrap().value, 3.0);
    let r = solve(Quantity::Resistance, Some(230.0), Some(10.0), None).unwrap();
    assert_eq!(r.value, 23.0);
    assert_eq!(r.power_watts, 2300.0);
    assert!(matches!(
        solve(Quantity::Current, Some(5.0), None, Some(0.0)),
        Err(CalcError::Domain(_))
    ));
}

#[test]
fn test_ohms_law_from_json() {
    let law: OhmsLaw = serde_json::from_str(
        r#"{"unknown":"resistance","voltage":{"value":5,"unit":"V"},"current":{"value":2,"unit":"mA"},"result_unit":"kOhm"}"#,
    )
    .unwrap();
    let r = law.solve().unwrap();
    assert!((r.value - 2.5).abs() < 1e-12);
    assert_eq!(r.unit, "kOhm");
}
