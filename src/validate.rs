//! Input validation for a calculation request.
//!
//! The engine itself never fails: it degrades to an undetermined result.
//! Before a request reaches it, this module checks the raw numbers the
//! way a form would, collecting every problem per field so that all of
//! them can be shown at once.

use crate::models::IncomeDescription;
use crate::rate::is_positive;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

pub const HOURS_PER_DAY_MAX: f64 = 24.0;
pub const HOURS_PER_WEEK_MAX: f64 = 168.0;
pub const DAYS_PER_WEEK: f64 = 7.0;

/// The input field a [`ValidationError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Income,
    HoursPerWeek,
    HoursPerDay,
    ItemCost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationError {
    #[error("Please enter a valid income.")]
    InvalidIncome,
    #[error("Hours per week must be greater than 0.")]
    HoursPerWeekNotPositive,
    #[error("Hours per week cannot exceed 168 (24 hours × 7 days).")]
    HoursPerWeekExceedsWeek,
    #[error("Hours per day must be greater than 0.")]
    HoursPerDayNotPositive,
    #[error("Hours per day cannot exceed 24.")]
    HoursPerDayExceedsDay,
    #[error("Hours per week cannot be less than hours per day.")]
    WeekShorterThanDay,
    #[error("Hours per week cannot be more than hours per day × 7.")]
    WeekLongerThanSevenDays,
    #[error("Hours per day cannot be more than hours per week.")]
    DayLongerThanWeek,
    #[error("Hours per day × 7 must be at least equal to hours per week.")]
    SevenDaysShorterThanWeek,
    #[error("Please enter a valid item cost.")]
    InvalidItemCost,
}

/// All validation failures of one request, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, ValidationError>,
}

impl ValidationErrors {
    pub fn get(&self, field: Field) -> Option<ValidationError> {
        self.errors.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, ValidationError)> + '_ {
        self.errors.iter().map(|(field, error)| (*field, *error))
    }

    /// Field name to message, for rendering next to form inputs.
    pub fn messages(&self) -> BTreeMap<Field, String> {
        self.iter().map(|(field, error)| (field, error.to_string())).collect()
    }

    fn set(&mut self, field: Field, error: ValidationError) {
        self.errors.insert(field, error);
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, error) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field:?}: {error}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validates the income details and purchase price of one calculation.
///
/// Unlike the rate derivation, this also checks upper bounds and the
/// consistency between daily and weekly hours.  Both hour fields are
/// required here even for hourly income.
pub fn validate_calculation(
    income: &IncomeDescription,
    item_cost: Option<f64>,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if !is_positive(income.amount) {
        errors.set(Field::Income, ValidationError::InvalidIncome);
    }

    let per_week = income.hours_per_week.filter(|hours| is_positive(*hours));
    match per_week {
        None => errors.set(Field::HoursPerWeek, ValidationError::HoursPerWeekNotPositive),
        Some(hours) if hours > HOURS_PER_WEEK_MAX => {
            errors.set(Field::HoursPerWeek, ValidationError::HoursPerWeekExceedsWeek)
        }
        Some(_) => {}
    }

    let per_day = income.hours_per_day.filter(|hours| is_positive(*hours));
    match per_day {
        None => errors.set(Field::HoursPerDay, ValidationError::HoursPerDayNotPositive),
        Some(hours) if hours > HOURS_PER_DAY_MAX => {
            errors.set(Field::HoursPerDay, ValidationError::HoursPerDayExceedsDay)
        }
        Some(_) => {}
    }

    // Cross-field problems replace the single-field ones on both inputs,
    // each worded from its own field's side.
    if let (Some(week), Some(day)) = (per_week, per_day) {
        let conflict = if week < day {
            Some((ValidationError::WeekShorterThanDay, ValidationError::DayLongerThanWeek))
        } else if week > day * DAYS_PER_WEEK {
            Some((
                ValidationError::WeekLongerThanSevenDays,
                ValidationError::SevenDaysShorterThanWeek,
            ))
        } else {
            None
        };
        if let Some((week_error, day_error)) = conflict {
            errors.set(Field::HoursPerWeek, week_error);
            errors.set(Field::HoursPerDay, day_error);
        }
    }

    if !item_cost.is_some_and(is_positive) {
        errors.set(Field::ItemCost, ValidationError::InvalidItemCost);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
