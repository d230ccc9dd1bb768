//! Error types shared by every calculator in the crate

use thiserror::Error;

/// Failure while parsing a chemical formula
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    /// Blank input, or input that contained no element at all
    #[error("Please enter a chemical formula")]
    Empty,
    /// Element symbol missing from the atomic-mass table
    #[error("Unknown element: {0}")]
    UnknownElement(String),
    /// `)` without a matching `(`, or a `(` that is never closed
    #[error("Mismatched parentheses at position {position}")]
    UnbalancedParens { position: usize },
    /// A count or multiplier of zero, or one too large to represent
    #[error("Invalid count at position {position}")]
    InvalidCount { position: usize },
    /// Anything that is neither an element, a digit nor a parenthesis
    #[error("Unexpected character '{found}' at position {position}")]
    UnexpectedChar { found: char, position: usize },
}

/// Top-level error returned by every computation in the crate.
///
/// The variants follow the four families surfaced to the user: input
/// validation, mathematically undefined operations, formula parse
/// failures, and an unavailable upstream rate source.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// Non-numeric input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Numeric input outside the accepted range
    #[error("{name} must be {expected}")]
    OutOfRange {
        name: &'static str,
        expected: &'static str,
    },
    /// Division by a zero operand and similar undefined operations
    #[error("{0}")]
    Domain(String),
    /// Formula parser failure
    #[error(transparent)]
    Formula(#[from] FormulaError),
    /// Unit id not present in the dimension's catalog
    #[error("Unknown unit '{unit}' for {dimension}")]
    UnknownUnit { dimension: String, unit: String },
    /// Exchange rates have not been resolved yet
    #[error("Exchange rates are still loading")]
    RatesLoading,
    /// Exchange rate fetch failed or a currency has no rate
    #[error("Exchange rates unavailable: {0}")]
    RatesUnavailable(String),
}

impl CalcError {
    pub(crate) fn out_of_range(name: &'static str, expected: &'static str) -> Self {
        CalcError::OutOfRange { name, expected }
    }

    /// Whether the error comes from the rate provider rather than the input
    pub fn is_upstream(&self) -> bool {
        matches!(self, CalcError::RatesLoading | CalcError::RatesUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_operand() {
        let err = CalcError::out_of_range("pH", "between 0 and 14");
        assert_eq!(err.to_string(), "pH must be between 0 and 14");

        let err: CalcError = FormulaError::UnknownElement("Xx".into()).into();
        assert_eq!(err.to_string(), "Unknown element: Xx");
    }

    #[test]
    fn test_upstream_classification() {
        assert!(CalcError::RatesLoading.is_upstream());
        assert!(!CalcError::Domain("x".into()).is_upstream());
    }
}
