//! Loan amortization and compound-growth projections
//!
//! Rates are annual percentages (6.5 means 6.5%) compounded monthly.

mod amortization;
mod growth;

pub use amortization::{amortize, AmortizationPoint, LoanSummary};
pub use growth::{
    plan_savings, project_growth, project_retirement, GrowthPoint, Projection, SavingsPlan,
};

use crate::error::CalcError;

/// Longest loan term or investment period accepted, in years
pub const MAX_YEARS: u32 = 100;

/// Monthly rate from an annual percentage
fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / 12.0
}

fn positive(name: &'static str, value: f64) -> Result<f64, CalcError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CalcError::out_of_range(name, "greater than zero"))
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<f64, CalcError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(CalcError::out_of_range(name, "zero or more"))
    }
}

/// Reject results that overflowed to infinity or NaN
fn finite(name: &str, value: f64) -> Result<f64, CalcError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::Domain(format!("{name} is too large to compute")))
    }
}
