//! Collection summary figures, in integer cents.

use api_types::expense::Expense;
use chrono::{DateTime, Datelike, TimeZone, Utc};

use crate::{amount, view};

/// Aggregates over the whole fetched collection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExpenseStats {
    pub total_cents: i64,
    pub count: usize,
    /// Truncating mean; 0 for an empty collection.
    pub average_cents: i64,
    pub this_month_cents: i64,
    pub last_month_cents: i64,
}

fn month_start(year: i32, month: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Summarizes a collection around the given clock instant.
///
/// "This month" is everything at or after the first of the current
/// calendar month; "last month" covers the previous calendar month.
/// Unparsable amounts count as 0, unparsable timestamps as epoch 0.
pub fn summarize(expenses: &[Expense], now: DateTime<Utc>) -> ExpenseStats {
    if expenses.is_empty() {
        return ExpenseStats::default();
    }

    let this_month_start = month_start(now.year(), now.month());
    let last_month_start = if now.month() == 1 {
        month_start(now.year() - 1, 12)
    } else {
        month_start(now.year(), now.month() - 1)
    };
    let this_ms = this_month_start.timestamp_millis();
    let last_ms = last_month_start.timestamp_millis();

    let mut stats = ExpenseStats {
        count: expenses.len(),
        ..ExpenseStats::default()
    };
    for expense in expenses {
        let cents = amount::parse_cents(&expense.amount).unwrap_or(0);
        let at = view::created_at_millis(expense);
        stats.total_cents = stats.total_cents.saturating_add(cents);
        if at >= this_ms {
            stats.this_month_cents = stats.this_month_cents.saturating_add(cents);
        } else if at >= last_ms {
            stats.last_month_cents = stats.last_month_cents.saturating_add(cents);
        }
    }
    stats.average_cents = stats.total_cents / stats.count as i64;
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(amount: &str, created_at: &str) -> Expense {
        Expense {
            id: "x".to_string(),
            name: "X".to_string(),
            amount: amount.to_string(),
            description: String::new(),
            created_at: created_at.to_string(),
        }
    }

    fn now() -> DateTime<Utc> {
        "2024-03-15T10:00:00Z".parse().unwrap()
    }

    #[test]
    fn empty_collection_is_all_zero() {
        assert_eq!(summarize(&[], now()), ExpenseStats::default());
    }

    #[test]
    fn buckets_by_calendar_month() {
        let expenses = vec![
            expense("10", "2024-03-02T00:00:00Z"),
            expense("20", "2024-02-20T00:00:00Z"),
            expense("5", "2024-01-31T00:00:00Z"),
        ];
        let stats = summarize(&expenses, now());
        assert_eq!(stats.total_cents, 3500);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.this_month_cents, 1000);
        assert_eq!(stats.last_month_cents, 2000);
    }

    #[test]
    fn january_looks_back_into_previous_year() {
        let expenses = vec![expense("7.5", "2023-12-10T00:00:00Z")];
        let stats = summarize(&expenses, "2024-01-15T00:00:00Z".parse().unwrap());
        assert_eq!(stats.last_month_cents, 750);
        assert_eq!(stats.this_month_cents, 0);
    }

    #[test]
    fn average_truncates() {
        let expenses = vec![
            expense("1", "2024-03-01T00:00:00Z"),
            expense("0.01", "2024-03-01T00:00:00Z"),
        ];
        let stats = summarize(&expenses, now());
        assert_eq!(stats.average_cents, 50);
    }
}
