//! WebAssembly bindings for smartconvert-core
//!
//! Enable the "wasm" feature to use these bindings. Results are returned
//! as JSON strings; failures come back as `{"error": "..."}`.

#![cfg(feature = "wasm")]

use serde::Serialize;
use tracing::warn;
use wasm_bindgen::prelude::*;

use crate::chem::{self, PhInput};
use crate::electrical::OhmsLaw;
use crate::error::CalcError;
use crate::finance;
use crate::history::NoHistory;
use crate::preferences::Preferences;
use crate::rates::{RateBook, Rates};
use crate::session::Converter;
use crate::types::Dimension;

/// Initialize panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

#[derive(Serialize)]
struct ErrorJson {
    error: String,
}

fn to_json<T: Serialize>(result: Result<T, CalcError>) -> String {
    let json = match result {
        Ok(value) => serde_json::to_string(&value),
        Err(e) => serde_json::to_string(&ErrorJson {
            error: e.to_string(),
        }),
    };
    json.unwrap_or_else(|_| r#"{"error":"serialization failed"}"#.to_string())
}

fn dimension(key: &str) -> Result<Dimension, CalcError> {
    Dimension::parse(key).ok_or_else(|| CalcError::InvalidInput(format!("Unknown converter: {key}")))
}

/// Converter state kept on the JS side: preferences and exchange rates
#[wasm_bindgen]
pub struct WasmConverter {
    preferences: Preferences,
    rates: RateBook,
}

#[derive(Serialize)]
struct ConversionJson<'a> {
    from_unit: &'a str,
    to_unit: &'a str,
    output: &'a crate::session::Output,
    hint: Option<&'static str>,
    rate_info: Option<String>,
}

#[wasm_bindgen]
impl WasmConverter {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            preferences: Preferences::default(),
            rates: RateBook::new(),
        }
    }

    /// Replace preferences from JSON (missing keys use defaults)
    #[wasm_bindgen]
    pub fn set_preferences(&mut self, json: &str) {
        match serde_json::from_str::<Preferences>(json) {
            Ok(prefs) => self.preferences = prefs,
            Err(e) => warn!(error = %e, "ignoring invalid preferences"),
        }
    }

    /// Apply exchange rates from a JSON object: {"EUR": 0.92, ...}
    #[wasm_bindgen]
    pub fn apply_rates(&mut self, rates_json: &str) {
        match serde_json::from_str::<Rates>(rates_json) {
            Ok(rates) => self.rates.resolve(rates),
            Err(e) => self.rates.fail(e.to_string()),
        }
    }

    /// Report a failed rate fetch
    #[wasm_bindgen]
    pub fn rates_failed(&mut self, message: &str) {
        self.rates.fail(message);
    }

    /// Default (from, to) pair for a converter as JSON
    #[wasm_bindgen]
    pub fn default_pair(&self, converter: &str) -> String {
        to_json(dimension(converter).map(|d| crate::session::default_pair(d, &self.preferences)))
    }

    /// Convert a raw input string; empty `from`/`to` use the default pair
    #[wasm_bindgen]
    pub fn convert(&self, converter: &str, input: &str, from: &str, to: &str) -> String {
        to_json(self.run(converter, input, from, to))
    }
}

impl WasmConverter {
    fn run(&self, converter: &str, input: &str, from: &str, to: &str) -> Result<serde_json::Value, CalcError> {
        let mut session = Converter::new(dimension(converter)?, &self.preferences, &self.rates, &NoHistory);
        if !from.is_empty() {
            session.set_from_unit(from)?;
        }
        if !to.is_empty() {
            session.set_to_unit(to)?;
        }
        session.set_input(input);
        session.preview()?;
        let json = ConversionJson {
            from_unit: session.from_unit(),
            to_unit: session.to_unit(),
            output: session.output(),
            hint: session.hint(),
            rate_info: session.rate_info(),
        };
        serde_json::to_value(&json).map_err(|e| CalcError::InvalidInput(e.to_string()))
    }
}

impl Default for WasmConverter {
    fn default() -> Self {
        Self::new()
    }
}

/// Unit catalog of a converter as JSON
#[wasm_bindgen]
pub fn units(converter: &str) -> String {
    to_json(dimension(converter).map(|d| d.units()))
}

/// Quick examples of a converter as JSON
#[wasm_bindgen]
pub fn examples(converter: &str) -> String {
    to_json(dimension(converter).map(|d| d.examples()))
}

#[wasm_bindgen]
pub fn molar_mass(formula: &str) -> String {
    to_json(chem::molar_mass(formula).map_err(CalcError::from))
}

/// `input` is one of "ph", "poh", "h", "oh"
#[wasm_bindgen]
pub fn ph(input: &str, value: f64) -> String {
    let result = PhInput::parse(input)
        .ok_or_else(|| CalcError::InvalidInput(input.to_string()))
        .and_then(|input| chem::ph::solve(input, value));
    to_json(result)
}

/// Solve an Ohm's law problem given as JSON
#[wasm_bindgen]
pub fn ohms_law(problem_json: &str) -> String {
    let result = serde_json::from_str::<OhmsLaw>(problem_json)
        .map_err(|e| CalcError::InvalidInput(e.to_string()))
        .and_then(|law| law.solve());
    to_json(result)
}

#[wasm_bindgen]
pub fn amortize(principal: f64, annual_rate: f64, years: u32) -> String {
    to_json(finance::amortize(principal, annual_rate, years))
}

#[wasm_bindgen]
pub fn project_growth(initial: f64, monthly: f64, years: f64, annual_rate: f64) -> String {
    to_json(finance::project_growth(initial, monthly, years, annual_rate))
}

#[wasm_bindgen]
pub fn project_retirement(
    current_age: u32,
    retirement_age: u32,
    savings: f64,
    monthly: f64,
    annual_rate: f64,
) -> String {
    to_json(finance::project_retirement(
        current_age,
        retirement_age,
        savings,
        monthly,
        annual_rate,
    ))
}

#[wasm_bindgen]
pub fn plan_savings(target: f64, initial: f64, years: f64, annual_rate: f64) -> String {
    to_json(finance::plan_savings(target, initial, years, annual_rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_preferences_keep_current() {
        let mut converter = WasmConverter::new();
        converter.set_preferences(r#"{"result_precision": 6}"#);
        assert_eq!(converter.preferences.precision(), 6);

        converter.set_preferences("{not json");
        assert_eq!(converter.preferences.precision(), 6);
    }
}
