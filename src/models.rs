//! Data models for the Work-Time Engine.
//!
//! The `models` module defines the serialisable structs and enums that
//! flow through the engine: the income description supplied by the
//! caller, the time-cost breakdown returned for a purchase, and the
//! saved-insight records a caller may keep.  They derive `Serialize`
//! and `Deserialize` with camelCase field names so they can be stored
//! in local JSON files or exchanged over HTTP unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How often the income `amount` is received.
///
/// The set is closed: an unknown period name fails deserialisation
/// instead of being treated as annual income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum IncomePeriod {
    #[default]
    Annual,
    Monthly,
    Fortnightly,
    Weekly,
    /// The amount already is an hourly rate.
    Hourly,
}

impl IncomePeriod {
    /// Number of pay periods in a year, or `None` for [`IncomePeriod::Hourly`]
    /// which is not annualised.
    pub const fn periods_per_year(self) -> Option<f64> {
        match self {
            IncomePeriod::Annual => Some(1.0),
            IncomePeriod::Monthly => Some(12.0),
            IncomePeriod::Fortnightly => Some(26.0),
            IncomePeriod::Weekly => Some(52.0),
            IncomePeriod::Hourly => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            IncomePeriod::Annual => "Annual",
            IncomePeriod::Monthly => "Monthly",
            IncomePeriod::Fortnightly => "Fortnightly",
            IncomePeriod::Weekly => "Weekly",
            IncomePeriod::Hourly => "Hourly",
        }
    }
}

impl fmt::Display for IncomePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Income details entered by the user.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeDescription {
    /// Income received per `period`, in currency units.  A value of
    /// zero stands for "not entered yet".
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub period: IncomePeriod,
    /// Hours worked per week.  Required for every period except
    /// [`IncomePeriod::Hourly`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours_per_week: Option<f64>,
    /// Length of the user's workday.  Not used to derive the rate; it
    /// is passed on to the time-cost conversion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours_per_day: Option<f64>,
}

impl IncomeDescription {
    pub fn new(amount: f64, period: IncomePeriod, hours_per_week: f64) -> Self {
        Self {
            amount,
            period,
            hours_per_week: Some(hours_per_week),
            hours_per_day: None,
        }
    }

    pub fn with_hours_per_day(mut self, hours_per_day: f64) -> Self {
        self.hours_per_day = Some(hours_per_day);
        self
    }
}

/// How a time cost should be shown.  Each variant carries exactly the
/// fields that make sense for it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "presentationMode", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Presentation {
    /// Costs of at most one hour that fit in the first workday.
    Minutes { minutes: u64 },
    /// Everything else: whole workdays plus the hours left over,
    /// rounded to one decimal.
    DaysAndHours { days: u64, remaining_hours: f64 },
}

/// The work-time needed to afford a purchase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeCostBreakdown {
    /// Total hours of work, rounded to one decimal.
    pub total_hours: f64,
    #[serde(flatten)]
    pub presentation: Presentation,
    /// The workday length that was applied after defaulting.
    pub workday_hours_used: f64,
}

impl TimeCostBreakdown {
    pub fn is_minutes(&self) -> bool {
        matches!(self.presentation, Presentation::Minutes { .. })
    }

    /// Whole workdays; zero in minutes mode.
    pub fn days(&self) -> u64 {
        match self.presentation {
            Presentation::Minutes { .. } => 0,
            Presentation::DaysAndHours { days, .. } => days,
        }
    }
}

/// A purchase to be priced in a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedItem {
    pub name: String,
    pub price: f64,
}

/// The result of pricing a single item in a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemTimeCost {
    pub item: PricedItem,
    /// `None` when the item's time cost cannot be determined, e.g. a
    /// non-positive price or an undetermined hourly rate.
    pub time_cost: Option<TimeCostBreakdown>,
}

/// The aggregate result of pricing a batch of items against one income.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    pub hourly_rate: f64,
    /// One entry per input item, in input order.
    pub results: Vec<ItemTimeCost>,
}

/// A named purchase the user chose to keep, together with the rate it
/// was computed at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedInsight {
    pub id: u64,
    pub name: String,
    /// Price rounded to cents.
    pub price: f64,
    pub time_cost: TimeCostBreakdown,
    /// Hourly rate rounded to cents.
    pub hourly_rate: f64,
}
