use serde::Serialize;
use tracing::debug;

use super::{finite, monthly_rate, non_negative, positive, MAX_YEARS};
use crate::error::CalcError;

/// One month of a loan schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AmortizationPoint {
    /// 1-based month number
    pub month: u32,
    /// 1-based loan year, `ceil(month / 12)`
    pub year: u32,
    pub interest: f64,
    pub principal: f64,
    /// Balance after this payment, never below zero
    pub remaining_balance: f64,
    pub total_interest_paid: f64,
}

/// Fixed-payment loan with its full monthly schedule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoanSummary {
    pub monthly_payment: f64,
    pub total_payment: f64,
    pub total_interest: f64,
    pub schedule: Vec<AmortizationPoint>,
}

/// Build the amortization schedule of a fixed-rate loan.
///
/// The payment comes from the annuity formula; at a zero rate the
/// principal is simply split evenly across the payments.
pub fn amortize(
    principal: f64,
    annual_rate_percent: f64,
    years: u32,
) -> Result<LoanSummary, CalcError> {
    let principal = positive("Loan amount", principal)?;
    let annual_rate_percent = non_negative("Interest rate", annual_rate_percent)?;
    if years == 0 || years > MAX_YEARS {
        return Err(CalcError::out_of_range("Loan term", "between 1 and 100 years"));
    }

    let rate = monthly_rate(annual_rate_percent);
    let payments = years * 12;
    let monthly_payment = if rate > 0.0 {
        let growth = (1.0 + rate).powf(f64::from(payments));
        principal * rate * growth / (growth - 1.0)
    } else {
        principal / f64::from(payments)
    };
    let monthly_payment = finite("Monthly payment", monthly_payment)?;
    let total_payment = monthly_payment * f64::from(payments);

    let mut schedule = Vec::with_capacity(payments as usize);
    let mut balance = principal;
    let mut total_interest_paid = 0.0;
    for month in 1..=payments {
        let interest = balance * rate;
        let principal_paid = monthly_payment - interest;
        balance -= principal_paid;
        total_interest_paid += interest;
        schedule.push(AmortizationPoint {
            month,
            year: month.div_ceil(12),
            interest,
            principal: principal_paid,
            remaining_balance: balance.max(0.0),
            total_interest_paid,
        });
    }

    debug!(principal, annual_rate_percent, years, monthly_payment, "amortized loan");
    Ok(LoanSummary {
        monthly_payment,
        total_payment,
        total_interest: total_payment - principal,
        schedule,
    })
}
