//! Record builders shared by the engine tests

use chrono::NaiveDate;

use crate::models::{Expense, Goal, GoalKind, Income, Money, RecordId};

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn income(id: i64, category: &str, units: i64, on: &str) -> Income {
    Income::new(RecordId::new(id), category, Money::from_units(units), date(on))
}

pub fn expense(id: i64, category: &str, units: i64, on: &str) -> Expense {
    Expense::new(RecordId::new(id), category, Money::from_units(units), date(on))
}

pub fn goal(id: i64, category: &str, kind: GoalKind, units: i64, start: &str, end: &str) -> Goal {
    Goal::new(
        RecordId::new(id),
        category,
        kind,
        Money::from_units(units),
        date(start),
        date(end),
    )
}
