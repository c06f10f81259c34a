//! Effective hourly rate derivation.
//!
//! Income can be entered per year, month, fortnight, week or hour.
//! [`derive_hourly_rate`] normalises any of these to currency units per
//! hour of work.  Every non-hourly period is spread over a fixed
//! 52-week year of `hours_per_week` hours; existing results depend on
//! that denominator, so it is not adjusted for calendar weeks per month
//! or leap years.

use crate::models::{IncomeDescription, IncomePeriod};

/// Weeks in the working year used for every annualised period.
pub const WEEKS_PER_YEAR: f64 = 52.0;

/// Derives the effective hourly rate for `income`.
///
/// Returns `0.0` when the rate cannot be determined: a missing or
/// non-positive amount, or (for any period but hourly) missing or
/// non-positive weekly hours.  The result is not rounded.
pub fn derive_hourly_rate(income: &IncomeDescription) -> f64 {
    if !is_positive(income.amount) {
        return 0.0;
    }
    let periods_per_year = match income.period.periods_per_year() {
        Some(periods) => periods,
        None => return income.amount,
    };
    let hours_per_week = match income.hours_per_week {
        Some(hours) if is_positive(hours) => hours,
        _ => return 0.0,
    };

    let annual_income = income.amount * periods_per_year;
    let annual_hours = hours_per_week * WEEKS_PER_YEAR;
    if annual_hours == 0.0 {
        return 0.0;
    }
    annual_income / annual_hours
}

/// Whether the derived rate for `period` needs weekly hours at all.
pub fn requires_weekly_hours(period: IncomePeriod) -> bool {
    period != IncomePeriod::Hourly
}

// NaN compares false, so it is treated as missing.
pub(crate) fn is_positive(value: f64) -> bool {
    value > 0.0
}
