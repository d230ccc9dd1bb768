//! Converter sessions: input parsing, unit selection and display
//!
//! A [`Converter`] holds the state of one converter panel (unit pair and
//! raw input) and borrows everything else it needs: preferences, the
//! current rate book and a history sink.

use serde::Serialize;
use tracing::debug;

use crate::clock::now_secs;
use crate::convert::Conversion;
use crate::error::CalcError;
use crate::format::format_value;
use crate::history::{HistoryEntry, HistorySink};
use crate::preferences::Preferences;
use crate::rates::RateBook;
use crate::types::{Dimension, QuickExample};

/// Shown when the input is not a number
pub const INVALID_INPUT: &str = "Invalid Input";

const SMALL_RESULT_HINT: &str =
    "Result is very small. Try a different 'To' unit for better readability.";

/// Raw input classified
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    Empty,
    Invalid,
    Number(f64),
}

/// Classify a raw input string. Blank input is not an error.
pub fn parse_input(raw: &str) -> Input {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Input::Empty;
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Input::Number(v),
        _ => Input::Invalid,
    }
}

/// What a converter displays in its result field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Output {
    /// Nothing entered
    Blank,
    /// Numeric result with its formatted text
    Number { value: f64, text: String },
    /// Non-numeric result shown verbatim ("Invalid Input", "Rate N/A", ...)
    Sentinel { text: &'static str },
}

impl Output {
    pub fn text(&self) -> &str {
        match self {
            Output::Blank => "",
            Output::Number { text, .. } => text.as_str(),
            Output::Sentinel { text } => *text,
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Output::Number { value, .. } => Some(*value),
            _ => None,
        }
    }
}

/// Initial (from, to) pair for a dimension.
///
/// The preferred unit wins when it belongs to the catalog. The target is
/// the dimension's default partner when the source is the default source,
/// otherwise the first other unit in the catalog.
pub fn default_pair(dimension: Dimension, preferences: &Preferences) -> (&'static str, &'static str) {
    let def = dimension.def();
    let from = preferences
        .preferred_unit(dimension)
        .and_then(|id| dimension.unit(id))
        .map(|u| u.id)
        .unwrap_or(def.default_pair.0);

    let to = if from == def.default_pair.0 {
        def.default_pair.1
    } else {
        def.units
            .iter()
            .map(|u| u.id)
            .find(|id| *id != from)
            .unwrap_or(from)
    };
    (from, to)
}

/// State of one converter
pub struct Converter<'a> {
    dimension: Dimension,
    preferences: &'a Preferences,
    rates: &'a RateBook,
    history: &'a dyn HistorySink,
    from_unit: &'static str,
    to_unit: &'static str,
    input: String,
    output: Output,
}

impl<'a> Converter<'a> {
    pub fn new(
        dimension: Dimension,
        preferences: &'a Preferences,
        rates: &'a RateBook,
        history: &'a dyn HistorySink,
    ) -> Self {
        let (from_unit, to_unit) = default_pair(dimension, preferences);
        Self {
            dimension,
            preferences,
            rates,
            history,
            from_unit,
            to_unit,
            input: String::new(),
            output: Output::Blank,
        }
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn from_unit(&self) -> &'static str {
        self.from_unit
    }

    pub fn to_unit(&self) -> &'static str {
        self.to_unit
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Result of the last evaluation
    pub fn output(&self) -> &Output {
        &self.output
    }

    fn catalog_unit(&self, id: &str) -> Result<&'static str, CalcError> {
        self.dimension
            .unit(id)
            .map(|u| u.id)
            .ok_or_else(|| CalcError::UnknownUnit {
                dimension: self.dimension.to_string(),
                unit: id.to_string(),
            })
    }

    pub fn set_from_unit(&mut self, id: &str) -> Result<(), CalcError> {
        self.from_unit = self.catalog_unit(id)?;
        Ok(())
    }

    pub fn set_to_unit(&mut self, id: &str) -> Result<(), CalcError> {
        self.to_unit = self.catalog_unit(id)?;
        Ok(())
    }

    pub fn set_input(&mut self, raw: impl Into<String>) {
        self.input = raw.into();
    }

    fn compute(&self) -> Result<Output, CalcError> {
        let value = match parse_input(&self.input) {
            Input::Empty => return Ok(Output::Blank),
            Input::Invalid => {
                return Ok(Output::Sentinel {
                    text: INVALID_INPUT,
                })
            }
            Input::Number(v) => v,
        };

        let conversion = self
            .dimension
            .convert(value, self.from_unit, self.to_unit, self.rates)?;
        Ok(match conversion {
            Conversion::Value(v) => Output::Number {
                value: v,
                text: format_value(v, self.preferences.precision()),
            },
            other => Output::Sentinel {
                text: other.sentinel().unwrap_or(INVALID_INPUT),
            },
        })
    }

    /// Evaluate without recording history (initial load, live preview)
    pub fn preview(&mut self) -> Result<&Output, CalcError> {
        self.output = self.compute()?;
        Ok(&self.output)
    }

    /// Evaluate as a user action. Numeric results are recorded to history
    /// when enabled.
    pub fn convert(&mut self) -> Result<&Output, CalcError> {
        self.output = self.compute()?;
        if let Output::Number { text, .. } = &self.output {
            if self.preferences.save_history {
                self.history.record(&HistoryEntry {
                    dimension: self.dimension,
                    from_unit: self.from_unit.to_string(),
                    to_unit: self.to_unit.to_string(),
                    from_value: self.input.trim().to_string(),
                    to_value: text.clone(),
                    timestamp: now_secs(),
                });
            }
        }
        Ok(&self.output)
    }

    /// Exchange the units. A numeric result becomes the new input so
    /// conversions can be chained.
    pub fn swap(&mut self) -> Result<&Output, CalcError> {
        std::mem::swap(&mut self.from_unit, &mut self.to_unit);
        if let Output::Number { text, .. } = &self.output {
            self.input = text.clone();
        }
        debug!(from = self.from_unit, to = self.to_unit, "swapped units");
        self.preview()
    }

    /// Load a quick example and convert it
    pub fn apply_example(&mut self, example: &QuickExample) -> Result<&Output, CalcError> {
        self.from_unit = self.catalog_unit(example.from_unit)?;
        self.to_unit = self.catalog_unit(example.to_unit)?;
        self.input = example.value.to_string();
        self.convert()
    }

    /// Readability hint for tiny positive results
    pub fn hint(&self) -> Option<&'static str> {
        let value = self.output.value()?;
        let threshold = 10f64.powi(-(self.preferences.precision() as i32 - 1));
        (value > 0.0 && value < threshold).then_some(SMALL_RESULT_HINT)
    }

    /// "1 USD = 0.9200 EUR" for currency, `None` elsewhere
    pub fn rate_info(&self) -> Option<String> {
        match self.dimension {
            Dimension::Currency => self.rates.rate_info(self.from_unit, self.to_unit),
            _ => None,
        }
    }

    /// One-line summary of a numeric conversion, e.g. "5 km is 3.1069 mi"
    pub fn share_text(&self) -> Option<String> {
        let Output::Number { text, .. } = &self.output else {
            return None;
        };
        Some(format!(
            "{} {} is {} {}",
            self.input.trim(),
            self.from_unit,
            text,
            self.to_unit
        ))
    }
}
