use serde::Serialize;
use tracing::debug;

use super::{finite, monthly_rate, non_negative, positive, MAX_YEARS};
use crate::error::CalcError;

/// Portfolio state at the end of a year
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GrowthPoint {
    /// Year 0 is the starting balance; a trailing partial year counts as a
    /// whole one
    pub year: u32,
    pub value: f64,
    pub contributions: f64,
    /// `value - contributions`
    pub gains: f64,
}

/// Year-by-year growth of a balance with monthly contributions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    pub points: Vec<GrowthPoint>,
    pub final_value: f64,
    pub total_contributions: f64,
    pub total_gains: f64,
}

/// Monthly saving needed to hit a target, with the resulting path
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavingsPlan {
    pub monthly_saving: f64,
    pub projection: Projection,
}

impl SavingsPlan {
    /// Everything paid in, including the initial amount
    pub fn total_saved(&self) -> f64 {
        self.projection.total_contributions
    }

    pub fn interest_earned(&self) -> f64 {
        self.projection.total_gains
    }
}

fn months_in(years: f64) -> Result<u32, CalcError> {
    let years = positive("Investment period", years)?;
    let months = (years * 12.0).floor();
    if months < 1.0 || months > f64::from(MAX_YEARS * 12) {
        return Err(CalcError::out_of_range(
            "Investment period",
            "between one month and 100 years",
        ));
    }
    Ok(months as u32)
}

/// Simulate monthly compounding: each month the balance earns interest,
/// then the contribution is added.
///
/// Points are taken at year 0, at every 12th month, and at the final month
/// when the period does not end on a year boundary.
pub fn project_growth(
    initial: f64,
    monthly_contribution: f64,
    years: f64,
    annual_rate_percent: f64,
) -> Result<Projection, CalcError> {
    let initial = non_negative("Initial amount", initial)?;
    let monthly_contribution = non_negative("Monthly contribution", monthly_contribution)?;
    let annual_rate_percent = non_negative("Annual return", annual_rate_percent)?;
    let months = months_in(years)?;

    simulate(initial, monthly_contribution, months, monthly_rate(annual_rate_percent))
}

fn simulate(
    initial: f64,
    monthly_contribution: f64,
    months: u32,
    rate: f64,
) -> Result<Projection, CalcError> {
    let mut points = Vec::with_capacity(months as usize / 12 + 2);
    points.push(GrowthPoint {
        year: 0,
        value: initial,
        contributions: initial,
        gains: 0.0,
    });

    let mut value = initial;
    let mut contributions = initial;
    for month in 1..=months {
        value = value * (1.0 + rate) + monthly_contribution;
        contributions += monthly_contribution;
        if month % 12 == 0 || month == months {
            points.push(GrowthPoint {
                year: month.div_ceil(12),
                value,
                contributions,
                gains: value - contributions,
            });
        }
    }

    let final_value = finite("Final value", value)?;
    Ok(Projection {
        points,
        final_value,
        total_contributions: contributions,
        total_gains: final_value - contributions,
    })
}

/// Growth from `current_age` until `retirement_age`
pub fn project_retirement(
    current_age: u32,
    retirement_age: u32,
    current_savings: f64,
    monthly_contribution: f64,
    annual_rate_percent: f64,
) -> Result<Projection, CalcError> {
    if current_age == 0 {
        return Err(CalcError::out_of_range("Current age", "greater than zero"));
    }
    if retirement_age <= current_age {
        return Err(CalcError::out_of_range(
            "Retirement age",
            "greater than current age",
        ));
    }
    let years = retirement_age - current_age;
    debug!(current_age, retirement_age, "retirement projection");
    project_growth(
        current_savings,
        monthly_contribution,
        f64::from(years),
        annual_rate_percent,
    )
}

/// Solve the level monthly saving that grows `initial` to `target`.
///
/// Uses the future value of an ordinary annuity; at a zero rate the
/// shortfall is spread evenly. Never negative: if the initial amount
/// alone reaches the target, no saving is needed.
pub fn plan_savings(
    target: f64,
    initial: f64,
    years: f64,
    annual_rate_percent: f64,
) -> Result<SavingsPlan, CalcError> {
    let target = positive("Savings goal", target)?;
    let initial = non_negative("Initial amount", initial)?;
    let annual_rate_percent = non_negative("Annual return", annual_rate_percent)?;
    let months = months_in(years)?;

    let rate = monthly_rate(annual_rate_percent);
    let n = f64::from(months);
    let monthly_saving = if rate > 0.0 {
        let growth = (1.0 + rate).powf(n);
        (target - initial * growth) / ((growth - 1.0) / rate)
    } else {
        (target - initial) / n
    }
    .max(0.0);
    let monthly_saving = finite("Monthly saving", monthly_saving)?;

    debug!(target, initial, months, monthly_saving, "savings plan");
    Ok(SavingsPlan {
        monthly_saving,
        projection: simulate(initial, monthly_saving, months, rate)?,
    })
}
