//! The expense view-model: turns the raw, server-ordered collection
//! into what the user sees.
//!
//! Every operation here is a pure, synchronous function of its
//! inputs; the only state is the last-applied sort field/direction,
//! which together form a six-state machine driven solely by
//! [`ExpenseView::toggle_sort`]. Malformed amounts or timestamps
//! degrade to defaults, nothing panics.

use std::cmp::Ordering;

use api_types::expense::Expense;
use chrono::DateTime;

use crate::amount;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortField {
    Date,
    Amount,
    Name,
}

impl SortField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Amount => "amount",
            Self::Name => "name",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Search and sort state over the fetched collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpenseView {
    query: String,
    field: SortField,
    direction: SortDirection,
}

impl Default for ExpenseView {
    fn default() -> Self {
        Self {
            query: String::new(),
            field: SortField::Date,
            direction: SortDirection::Desc,
        }
    }
}

impl ExpenseView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn sort_field(&self) -> SortField {
        self.field
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.direction
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    /// Toggling the current field flips the direction; switching to a
    /// new field always restarts at descending. The asymmetry is a
    /// fixed UX rule, not an accident.
    pub fn toggle_sort(&mut self, field: SortField) {
        if self.field == field {
            self.direction = match self.direction {
                SortDirection::Asc => SortDirection::Desc,
                SortDirection::Desc => SortDirection::Asc,
            };
        } else {
            self.field = field;
            self.direction = SortDirection::Desc;
        }
    }

    /// Filtered and sorted copy of the input collection.
    pub fn apply(&self, expenses: &[Expense]) -> Vec<Expense> {
        sort(filter(expenses, &self.query), self.field, self.direction)
    }
}

/// Case-insensitive substring match against name OR description.
///
/// The empty query matches everything; relative input order is
/// preserved.
pub fn filter(expenses: &[Expense], query: &str) -> Vec<Expense> {
    let needle = query.to_lowercase();
    expenses
        .iter()
        .filter(|e| {
            e.name.to_lowercase().contains(&needle)
                || e.description.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Stable sort by the given field and direction.
///
/// `Desc` reverses the comparator, not the list, so equal keys keep
/// their input order in both directions. Ties must not reorder: this
/// feeds a visible list and re-renders must not jump.
pub fn sort(mut expenses: Vec<Expense>, field: SortField, direction: SortDirection) -> Vec<Expense> {
    expenses.sort_by(|a, b| {
        let ord = compare(a, b, field);
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    expenses
}

fn compare(a: &Expense, b: &Expense, field: SortField) -> Ordering {
    match field {
        SortField::Date => created_at_millis(a).cmp(&created_at_millis(b)),
        SortField::Amount => amount_cents(a).cmp(&amount_cents(b)),
        SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
    }
}

/// Parsed `createdAt`; unparsable timestamps sort as epoch 0.
pub(crate) fn created_at_millis(expense: &Expense) -> i64 {
    DateTime::parse_from_rfc3339(&expense.created_at)
        .map(|t| t.timestamp_millis())
        .unwrap_or(0)
}

fn amount_cents(expense: &Expense) -> i64 {
    amount::parse_cents(&expense.amount).unwrap_or(0)
}

/// Sum of the parsed amounts, unparsable entries counting as 0,
/// formatted with exactly two decimals.
pub fn total(expenses: &[Expense]) -> String {
    let cents = expenses
        .iter()
        .map(|e| amount::parse_cents(&e.amount).unwrap_or(0))
        .fold(0i64, i64::saturating_add);
    amount::format_cents(cents)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(id: &str, name: &str, amount: &str, created_at: &str) -> Expense {
        Expense {
            id: id.to_string(),
            name: name.to_string(),
            amount: amount.to_string(),
            description: String::new(),
            created_at: created_at.to_string(),
        }
    }

    fn sample() -> Vec<Expense> {
        vec![
            expense("1", "Lunch", "12.5", "2024-03-01T12:00:00Z"),
            expense("2", "Gas", "40", "2024-03-02T12:00:00Z"),
            expense("3", "Coffee", "3.5", "2024-03-01T08:00:00Z"),
        ]
    }

    #[test]
    fn empty_query_keeps_everything_in_order() {
        let input = sample();
        let out = filter(&input, "");
        assert_eq!(out, input);
    }

    #[test]
    fn filter_matches_name_or_description_case_insensitively() {
        let mut input = sample();
        input[2].description = "morning GAS station stop".to_string();
        let out = filter(&input, "gas");
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].id, "2");
        assert_eq!(out[1].id, "3");
    }

    #[test]
    fn default_sort_is_date_descending() {
        let view = ExpenseView::new();
        let out = view.apply(&sample());
        let ids: Vec<&str> = out.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["2", "1", "3"]);
    }

    #[test]
    fn sort_is_stable_on_equal_keys_in_both_directions() {
        let input = vec![
            expense("a", "One", "5", "2024-01-01T00:00:00Z"),
            expense("b", "Two", "5", "2024-01-02T00:00:00Z"),
            expense("c", "Three", "5", "2024-01-03T00:00:00Z"),
        ];
        let asc = sort(input.clone(), SortField::Amount, SortDirection::Asc);
        let desc = sort(input.clone(), SortField::Amount, SortDirection::Desc);
        let ids = |v: &[Expense]| v.iter().map(|e| e.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&asc), ids(&input));
        assert_eq!(ids(&desc), ids(&input));
    }

    #[test]
    fn unparsable_amount_and_date_degrade_to_zero() {
        let input = vec![
            expense("a", "Bad", "abc", "not-a-date"),
            expense("b", "Good", "1", "2024-01-01T00:00:00Z"),
        ];
        let out = sort(input, SortField::Amount, SortDirection::Asc);
        assert_eq!(out[0].id, "a");
        assert_eq!(total(&out), "1.00");
    }

    #[test]
    fn toggle_same_field_flips_direction_twice_returns() {
        let mut view = ExpenseView::new();
        assert_eq!(view.sort_direction(), SortDirection::Desc);
        view.toggle_sort(SortField::Date);
        assert_eq!(view.sort_direction(), SortDirection::Asc);
        view.toggle_sort(SortField::Date);
        assert_eq!(view.sort_direction(), SortDirection::Desc);
    }

    #[test]
    fn toggle_new_field_always_restarts_descending() {
        let mut view = ExpenseView::new();
        view.toggle_sort(SortField::Date);
        assert_eq!(view.sort_direction(), SortDirection::Asc);
        view.toggle_sort(SortField::Amount);
        assert_eq!(view.sort_field(), SortField::Amount);
        assert_eq!(view.sort_direction(), SortDirection::Desc);
        view.toggle_sort(SortField::Name);
        assert_eq!(view.sort_field(), SortField::Name);
        assert_eq!(view.sort_direction(), SortDirection::Desc);
    }

    #[test]
    fn total_of_empty_is_zero_and_unparsable_counts_as_zero() {
        assert_eq!(total(&[]), "0.00");
        let input = vec![
            expense("a", "A", "10.5", "2024-01-01T00:00:00Z"),
            expense("b", "B", "abc", "2024-01-01T00:00:00Z"),
        ];
        assert_eq!(total(&input), "10.50");
    }
}
