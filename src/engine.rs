//! Time-cost conversion engine.
//!
//! The `engine` module turns a purchase price and an hourly rate into a
//! [`TimeCostBreakdown`].  [`compute_time_cost`] is the single-item
//! conversion; [`price_items`] derives the rate for an income once and
//! uses the [`rayon`] crate to convert a whole list of purchases across
//! multiple CPU cores.

use crate::models::{
    BatchResult, IncomeDescription, ItemTimeCost, Presentation, PricedItem, TimeCostBreakdown,
};
use crate::rate::{derive_hourly_rate, is_positive};
use rayon::prelude::*;
use tracing::debug;

/// Workday length applied when none (or a non-positive one) is given.
pub const DEFAULT_WORKDAY_HOURS: f64 = 8.0;

/// Costs of at most this many hours, within the first workday, are
/// shown in minutes.
pub const MINUTES_THRESHOLD_HOURS: f64 = 1.0;

/// Converts `item_cost` into work-time at `hourly_rate`.
///
/// Returns `None` when the cost or the rate is missing or non-positive,
/// or when the hours they imply are too large to represent; callers
/// should render nothing rather than a zero breakdown.
/// `hours_per_day` falls back to [`DEFAULT_WORKDAY_HOURS`] when absent,
/// non-positive or infinite and is otherwise used as given.
pub fn compute_time_cost(
    item_cost: f64,
    hourly_rate: f64,
    hours_per_day: Option<f64>,
) -> Option<TimeCostBreakdown> {
    if !is_positive(item_cost) || !is_positive(hourly_rate) {
        return None;
    }
    let workday = effective_workday(hours_per_day);

    let total_hours = item_cost / hourly_rate;
    let days = (total_hours / workday).floor();
    let remaining_hours = round_to_tenth(total_hours % workday);
    let rounded_total = round_to_tenth(total_hours);
    // Every field must stay a finite number that JSON can carry.
    if !rounded_total.is_finite() || !remaining_hours.is_finite() || days > u64::MAX as f64 {
        return None;
    }

    // The tie at exactly one hour reads as "60 minutes".
    let presentation = if total_hours <= MINUTES_THRESHOLD_HOURS && days == 0.0 {
        Presentation::Minutes {
            minutes: (total_hours * 60.0).round() as u64,
        }
    } else {
        Presentation::DaysAndHours {
            days: days as u64,
            remaining_hours,
        }
    };

    Some(TimeCostBreakdown {
        total_hours: rounded_total,
        presentation,
        workday_hours_used: workday,
    })
}

/// Prices every item in `items` against the rate derived from `income`.
///
/// The income's own `hours_per_day` is used as the workday length.
/// Results keep the order of `items`; an item whose time cost is
/// undetermined is returned with `time_cost: None`.
pub fn price_items(income: &IncomeDescription, items: &[PricedItem]) -> BatchResult {
    let hourly_rate = derive_hourly_rate(income);
    debug!(items = items.len(), hourly_rate, "pricing batch");

    let results = items
        .par_iter()
        .map(|item| ItemTimeCost {
            item: item.clone(),
            time_cost: compute_time_cost(item.price, hourly_rate, income.hours_per_day),
        })
        .collect();
    BatchResult {
        hourly_rate,
        results,
    }
}

pub fn effective_workday(hours_per_day: Option<f64>) -> f64 {
    match hours_per_day {
        Some(hours) if is_positive(hours) && hours.is_finite() => hours,
        _ => DEFAULT_WORKDAY_HOURS,
    }
}

/// Rounds half away from zero to one decimal place.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Rounds half away from zero to cents.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IncomePeriod;
    use proptest::prelude::*;

    #[test]
    fn test_days_and_hours() {
        // $1000 at $50/hr is 20 hours: two 8-hour days and 4 hours
        let cost = compute_time_cost(1000.0, 50.0, Some(8.0)).unwrap();
        assert_eq!(cost.total_hours, 20.0);
        assert_eq!(
            cost.presentation,
            Presentation::DaysAndHours {
                days: 2,
                remaining_hours: 4.0
            }
        );
        assert_eq!(cost.workday_hours_used, 8.0);
    }

    #[test]
    fn test_half_hour_is_minutes() {
        let cost = compute_time_cost(31.0, 62.0, Some(8.0)).unwrap();
        assert_eq!(cost.total_hours, 0.5);
        assert_eq!(cost.presentation, Presentation::Minutes { minutes: 30 });
        assert_eq!(cost.days(), 0);
    }

    #[test]
    fn test_exactly_one_hour_is_sixty_minutes() {
        let cost = compute_time_cost(62.0, 62.0, Some(8.0)).unwrap();
        assert_eq!(cost.total_hours, 1.0);
        assert_eq!(cost.presentation, Presentation::Minutes { minutes: 60 });
    }

    #[test]
    fn test_just_over_one_hour_is_hours() {
        let cost = compute_time_cost(63.0, 62.0, Some(8.0)).unwrap();
        assert!(!cost.is_minutes());
        assert_eq!(cost.days(), 0);
        assert_eq!(cost.total_hours, 1.0);
    }

    #[test]
    fn test_short_workday_forces_days_mode() {
        // 0.75 hours is a full day when the workday is half an hour long
        let cost = compute_time_cost(30.0, 40.0, Some(0.5)).unwrap();
        assert_eq!(
            cost.presentation,
            Presentation::DaysAndHours {
                days: 1,
                remaining_hours: 0.3
            }
        );
    }

    #[test]
    fn test_undetermined_inputs() {
        assert_eq!(compute_time_cost(0.0, 50.0, Some(8.0)), None);
        assert_eq!(compute_time_cost(1000.0, 0.0, Some(8.0)), None);
        assert_eq!(compute_time_cost(-5.0, 50.0, Some(8.0)), None);
        assert_eq!(compute_time_cost(1000.0, -50.0, Some(8.0)), None);
        assert_eq!(compute_time_cost(f64::NAN, 50.0, Some(8.0)), None);
    }

    #[test]
    fn test_workday_defaults_to_eight() {
        let expected = compute_time_cost(1000.0, 50.0, Some(8.0));
        assert_eq!(compute_time_cost(1000.0, 50.0, Some(0.0)), expected);
        assert_eq!(compute_time_cost(1000.0, 50.0, None), expected);
        assert_eq!(compute_time_cost(1000.0, 50.0, Some(-3.0)), expected);
    }

    #[test]
    fn test_overflowing_hours_are_undetermined() {
        assert_eq!(compute_time_cost(1e300, 1e-10, Some(8.0)), None);
        assert_eq!(compute_time_cost(f64::INFINITY, 50.0, Some(8.0)), None);
        // Finite hours, but more whole days than a u64 can count
        assert_eq!(compute_time_cost(1e300, 1.0, Some(8.0)), None);
        // Finite hours and days, but too large to round to a tenth
        assert_eq!(compute_time_cost(1e308, 1.0, Some(1e308)), None);
    }

    #[test]
    fn test_infinite_workday_defaults_to_eight() {
        let cost = compute_time_cost(1000.0, 50.0, Some(f64::INFINITY)).unwrap();
        assert_eq!(cost.workday_hours_used, DEFAULT_WORKDAY_HOURS);
        assert_eq!(cost.days(), 2);
    }

    #[test]
    fn test_workday_above_a_day_is_used_as_is() {
        let cost = compute_time_cost(1000.0, 50.0, Some(30.0)).unwrap();
        assert_eq!(cost.workday_hours_used, 30.0);
        assert_eq!(cost.days(), 0);
    }

    #[test]
    fn test_salary_to_purchase() {
        let income = IncomeDescription::new(130000.0, IncomePeriod::Annual, 38.0);
        let rate = derive_hourly_rate(&income);
        let cost = compute_time_cost(2200.0, rate, Some(8.0)).unwrap();
        assert_eq!(cost.days(), 4);
        assert_eq!(cost.total_hours, 33.4);
        assert_eq!(
            cost.presentation,
            Presentation::DaysAndHours {
                days: 4,
                remaining_hours: 1.4
            }
        );
    }

    #[test]
    fn test_price_items_keeps_order_and_marks_undetermined() {
        let income = IncomeDescription::new(52000.0, IncomePeriod::Annual, 40.0).with_hours_per_day(8.0);
        let items = vec![
            PricedItem { name: "laptop".into(), price: 1000.0 },
            PricedItem { name: "free sample".into(), price: 0.0 },
            PricedItem { name: "coffee".into(), price: 5.0 },
        ];
        let batch = price_items(&income, &items);
        assert_eq!(batch.hourly_rate, 25.0);
        assert_eq!(batch.results.len(), 3);
        assert_eq!(batch.results[0].item.name, "laptop");
        assert_eq!(batch.results[0].time_cost.unwrap().days(), 5);
        assert_eq!(batch.results[1].time_cost, None);
        assert_eq!(
            batch.results[2].time_cost.unwrap().presentation,
            Presentation::Minutes { minutes: 12 }
        );
    }

    #[test]
    fn test_price_items_with_undetermined_rate() {
        let income = IncomeDescription::new(52000.0, IncomePeriod::Annual, 0.0);
        let items = vec![PricedItem { name: "laptop".into(), price: 1000.0 }];
        let batch = price_items(&income, &items);
        assert_eq!(batch.hourly_rate, 0.0);
        assert_eq!(batch.results[0].time_cost, None);
    }

    proptest! {
        #[test]
        fn test_conversion_is_idempotent(
            cost in 0.01f64..1_000_000.0,
            rate in 0.01f64..10_000.0,
            workday in 0.5f64..24.0,
        ) {
            prop_assert_eq!(
                compute_time_cost(cost, rate, Some(workday)),
                compute_time_cost(cost, rate, Some(workday))
            );
        }

        #[test]
        fn test_total_hours_monotonic_in_cost(
            cost in 0.01f64..1_000_000.0,
            extra in 0.0f64..1_000_000.0,
            rate in 0.01f64..10_000.0,
            workday in 0.5f64..24.0,
        ) {
            let lower = compute_time_cost(cost, rate, Some(workday)).unwrap();
            let higher = compute_time_cost(cost + extra, rate, Some(workday)).unwrap();
            prop_assert!(higher.total_hours >= lower.total_hours);
        }

        #[test]
        fn test_minutes_mode_only_within_first_hour(
            cost in 0.01f64..10_000.0,
            rate in 0.01f64..1_000.0,
        ) {
            let breakdown = compute_time_cost(cost, rate, Some(8.0)).unwrap();
            prop_assert_eq!(breakdown.is_minutes(), cost / rate <= 1.0);
        }
    }
}
