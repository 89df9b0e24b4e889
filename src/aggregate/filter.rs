//! Date-range filtering

use chrono::Datelike;

use crate::models::{Period, Record};

/// Keep the records whose date falls in `period`
///
/// [`Period::All`] passes every record through. Month and year periods match
/// on calendar fields only. Output preserves input order.
pub fn filter_by_period<I>(records: I, period: Period) -> Vec<I::Item>
where
    I: IntoIterator,
    I::Item: Record,
{
    records
        .into_iter()
        .filter(|record| period.contains(record.date()))
        .collect()
}

/// Keep the records dated in calendar year `year`
pub fn filter_by_year<I>(records: I, year: i32) -> Vec<I::Item>
where
    I: IntoIterator,
    I::Item: Record,
{
    records
        .into_iter()
        .filter(|record| record.date().year() == year)
        .collect()
}
