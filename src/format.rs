//! Display formatting.
//!
//! Money is always shown in US dollars with `en-US` digit grouping;
//! there is no locale selection.

use crate::models::{IncomeDescription, Presentation, SavedInsight, TimeCostBreakdown};
use crate::rate::is_positive;

/// Price used for the "minutes to buy a coffee" figure.
pub const COFFEE_PRICE: f64 = 5.0;

/// Formats `value` as dollars and cents, e.g. `$1,234.50`.
pub fn format_currency(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${}.{:02}", group_thousands(cents / 100), cents % 100)
}

/// Formats `value` as whole dollars, e.g. `$60,000`.
pub fn format_whole_currency(value: f64) -> String {
    let dollars = value.abs().round() as u64;
    let sign = if value < 0.0 && dollars > 0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(dollars))
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

fn plural(count: u64, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

// Hours always carry their one decimal, e.g. `4.0 hours`.
fn hours(value: f64) -> String {
    if value == 1.0 {
        format!("{value:.1} hour")
    } else {
        format!("{value:.1} hours")
    }
}

/// Renders a breakdown as text: `30 minutes`, `2 work days, 4.0 hours`,
/// `1 work day` or `5.5 hours`.
pub fn format_time_cost(time_cost: &TimeCostBreakdown) -> String {
    match time_cost.presentation {
        Presentation::Minutes { minutes } => plural(minutes, "minute", "minutes"),
        Presentation::DaysAndHours {
            days,
            remaining_hours,
        } if days > 0 => {
            let days_text = plural(days, "work day", "work days");
            if remaining_hours > 0.0 {
                format!("{days_text}, {}", hours(remaining_hours))
            } else {
                days_text
            }
        }
        Presentation::DaysAndHours {
            remaining_hours, ..
        } => hours(remaining_hours),
    }
}

/// One line describing a saved insight, e.g.
/// `$1,000.00 • 2 work days, 4.0 hours @ $50.00 p/hr`.
pub fn format_insight(insight: &SavedInsight) -> String {
    let mut line = format!(
        "{} • {}",
        format_currency(insight.price),
        format_time_cost(&insight.time_cost)
    );
    if is_positive(insight.hourly_rate) {
        line.push_str(&format!(" @ {} p/hr", format_currency(insight.hourly_rate)));
    }
    line
}

/// Whole minutes of work needed to earn `price`, rounded up.
/// `None` while the rate is undetermined.
pub fn minutes_to_afford(price: f64, hourly_rate: f64) -> Option<u64> {
    if !is_positive(hourly_rate) {
        return None;
    }
    Some((price / hourly_rate * 60.0).ceil() as u64)
}

/// Short summary of the income details, e.g. `$60,000 / Annual @ 40 hrs/week`.
pub fn income_summary(income: &IncomeDescription) -> String {
    let mut summary = format!(
        "{} / {}",
        format_whole_currency(income.amount.max(0.0)),
        income.period
    );
    if let Some(hours) = income.hours_per_week {
        summary.push_str(&format!(" @ {hours} hrs/week"));
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::compute_time_cost;
    use crate::models::IncomePeriod;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(5.0), "$5.00");
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_currency(62.7115), "$62.71");
        assert_eq!(format_currency(-42.1), "-$42.10");
    }

    #[test]
    fn test_format_whole_currency() {
        assert_eq!(format_whole_currency(60000.0), "$60,000");
        assert_eq!(format_whole_currency(999.0), "$999");
        assert_eq!(format_whole_currency(123456.4), "$123,456");
    }

    #[test]
    fn test_format_time_cost() {
        let render = |cost, rate| format_time_cost(&compute_time_cost(cost, rate, Some(8.0)).unwrap());
        assert_eq!(render(31.0, 62.0), "30 minutes");
        assert_eq!(render(1.0, 60.0), "1 minute");
        assert_eq!(render(1000.0, 50.0), "2 work days, 4.0 hours");
        assert_eq!(render(400.0, 50.0), "1 work day");
        assert_eq!(render(450.0, 50.0), "1 work day, 1.0 hour");
        assert_eq!(render(63.0, 62.0), "1.0 hour");
        assert_eq!(render(124.0, 62.0), "2.0 hours");
        assert_eq!(render(275.0, 50.0), "5.5 hours");
    }

    #[test]
    fn test_format_insight() {
        let insight = SavedInsight {
            id: 1,
            name: "Gaming PC".into(),
            price: 1000.0,
            time_cost: compute_time_cost(1000.0, 50.0, Some(8.0)).unwrap(),
            hourly_rate: 50.0,
        };
        assert_eq!(
            format_insight(&insight),
            "$1,000.00 • 2 work days, 4.0 hours @ $50.00 p/hr"
        );
    }

    #[test]
    fn test_minutes_to_afford() {
        assert_eq!(minutes_to_afford(COFFEE_PRICE, 25.0), Some(12));
        assert_eq!(minutes_to_afford(COFFEE_PRICE, 62.71), Some(5));
        assert_eq!(minutes_to_afford(COFFEE_PRICE, 0.0), None);
    }

    #[test]
    fn test_income_summary() {
        let income = IncomeDescription::new(60000.0, IncomePeriod::Annual, 40.0);
        assert_eq!(income_summary(&income), "$60,000 / Annual @ 40 hrs/week");
        let hourly = IncomeDescription {
            amount: 30.0,
            period: IncomePeriod::Hourly,
            hours_per_week: None,
            hours_per_day: None,
        };
        assert_eq!(income_summary(&hourly), "$30 / Hourly");
    }
}
