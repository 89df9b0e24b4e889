//! Month and day bucketing
//!
//! Month buckets are labelled "Jan 2024" by default. Month-only labels
//! ("Jan") merge the same month of different years into one bucket, so they
//! are only appropriate when the caller knows the input spans one year.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{Money, Record};

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Short English name for a month number (1-12)
pub fn month_abbreviation(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_ABBREVIATIONS.get(i as usize))
        .copied()
        .unwrap_or("???")
}

/// How month buckets are labelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthLabelFormat {
    /// "Jan 2024"; one bucket per calendar month
    #[default]
    MonthYear,
    /// "Jan"; years are merged
    MonthOnly,
}

impl MonthLabelFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "month_year" => Some(Self::MonthYear),
            "month_only" => Some(Self::MonthOnly),
            _ => None,
        }
    }

    /// Bucket key for a date: the year is dropped for month-only labels
    fn key(&self, date: NaiveDate) -> MonthKey {
        match self {
            Self::MonthYear => MonthKey {
                year: Some(date.year()),
                month: date.month(),
            },
            Self::MonthOnly => MonthKey {
                year: None,
                month: date.month(),
            },
        }
    }
}

impl std::fmt::Display for MonthLabelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MonthYear => write!(f, "month_year"),
            Self::MonthOnly => write!(f, "month_only"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct MonthKey {
    year: Option<i32>,
    month: u32,
}

impl MonthKey {
    fn label(&self) -> String {
        let name = month_abbreviation(self.month);
        match self.year {
            Some(year) => format!("{} {}", name, year),
            None => name.to_string(),
        }
    }
}

/// Total for one month bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthTotal {
    pub label: String,
    /// `None` when years were merged under a month-only label
    pub year: Option<i32>,
    pub month: u32,
    pub total: Money,
}

/// Month buckets in chronological order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthlyTotals {
    months: Vec<MonthTotal>,
}

impl MonthlyTotals {
    pub fn get(&self, label: &str) -> Option<Money> {
        self.months.iter().find(|m| m.label == label).map(|m| m.total)
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MonthTotal> {
        self.months.iter()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.months.iter().map(|m| m.label.as_str())
    }

    pub fn total(&self) -> Money {
        self.months.iter().map(|m| m.total).sum()
    }

    pub fn into_vec(self) -> Vec<MonthTotal> {
        self.months
    }
}

impl<'a> IntoIterator for &'a MonthlyTotals {
    type Item = &'a MonthTotal;
    type IntoIter = std::slice::Iter<'a, MonthTotal>;

    fn into_iter(self) -> Self::IntoIter {
        self.months.iter()
    }
}

fn bucket<I>(records: I, format: MonthLabelFormat) -> BTreeMap<MonthKey, Money>
where
    I: IntoIterator,
    I::Item: Record,
{
    let mut buckets: BTreeMap<MonthKey, Money> = BTreeMap::new();
    for record in records {
        *buckets.entry(format.key(record.date())).or_default() += record.amount();
    }
    buckets
}

/// Group records by calendar month and sum each month
pub fn sum_by_month<I>(records: I, format: MonthLabelFormat) -> MonthlyTotals
where
    I: IntoIterator,
    I::Item: Record,
{
    let months = bucket(records, format)
        .into_iter()
        .map(|(key, total)| MonthTotal {
            label: key.label(),
            year: key.year,
            month: key.month,
            total,
        })
        .collect();
    MonthlyTotals { months }
}

/// Sum amounts per calendar day, ordered by date
pub fn daily_totals<I>(records: I) -> BTreeMap<NaiveDate, Money>
where
    I: IntoIterator,
    I::Item: Record,
{
    let mut days: BTreeMap<NaiveDate, Money> = BTreeMap::new();
    for record in records {
        *days.entry(record.date()).or_default() += record.amount();
    }
    days
}

/// Income, expense and their difference for one month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlySavings {
    pub label: String,
    pub year: Option<i32>,
    pub month: u32,
    pub income: Money,
    pub expense: Money,
    pub savings: Money,
}

/// Per-month savings over the union of months seen in either list
pub fn monthly_savings<I, E>(
    incomes: I,
    expenses: E,
    format: MonthLabelFormat,
) -> Vec<MonthlySavings>
where
    I: IntoIterator,
    I::Item: Record,
    E: IntoIterator,
    E::Item: Record,
{
    let income = bucket(incomes, format);
    let expense = bucket(expenses, format);

    let mut keys: Vec<MonthKey> = income.keys().chain(expense.keys()).copied().collect();
    keys.sort();
    keys.dedup();

    keys.into_iter()
        .map(|key| {
            let income = income.get(&key).copied().unwrap_or_default();
            let expense = expense.get(&key).copied().unwrap_or_default();
            MonthlySavings {
                label: key.label(),
                year: key.year,
                month: key.month,
                income,
                expense,
                savings: income - expense,
            }
        })
        .collect()
}

/// Month with the highest savings; the earliest wins a tie
///
/// Only months present in `series` are candidates, so months with no
/// activity never count as a zero-savings best.
pub fn best_month(series: &[MonthlySavings]) -> Option<&MonthlySavings> {
    series.iter().fold(None, |best, current| match best {
        Some(b) if current.savings <= b.savings => Some(b),
        _ => Some(current),
    })
}

/// Month with the lowest savings; the earliest wins a tie
pub fn worst_month(series: &[MonthlySavings]) -> Option<&MonthlySavings> {
    series.iter().fold(None, |worst, current| match worst {
        Some(w) if current.savings >= w.savings => Some(w),
        _ => Some(current),
    })
}

/// Sum of the months that saved money, spread over twelve months
///
/// Deficit months count as zero rather than pulling the average down.
pub fn average_monthly_savings(series: &[MonthlySavings]) -> Money {
    let positive: Money = series
        .iter()
        .map(|m| m.savings)
        .filter(|s| s.is_positive())
        .sum();
    positive.mul_ratio(1, 12)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::testing::{expense, income};
    use crate::models::Income;

    #[test]
    fn test_month_labels() {
        assert_eq!(month_abbreviation(1), "Jan");
        assert_eq!(month_abbreviation(12), "Dec");
        assert_eq!(month_abbreviation(0), "???");
        assert_eq!(MonthLabelFormat::parse("month-only"), Some(MonthLabelFormat::MonthOnly));
        assert_eq!(MonthLabelFormat::parse("weekly"), None);
    }

    #[test]
    fn test_year_qualified_labels_keep_years_apart() {
        let incomes = vec![
            income(1, "salary", 100, "2024-01-05"),
            income(2, "salary", 200, "2023-01-05"),
            income(3, "salary", 50, "2024-01-20"),
            income(4, "salary", 10, "2023-12-01"),
        ];
        let totals = sum_by_month(&incomes, MonthLabelFormat::MonthYear);

        assert_eq!(
            totals.labels().collect::<Vec<_>>(),
            vec!["Jan 2023", "Dec 2023", "Jan 2024"]
        );
        assert_eq!(totals.get("Jan 2024"), Some(Money::from_units(150)));
        assert_eq!(totals.get("Jan 2023"), Some(Money::from_units(200)));
        assert_eq!(totals.total(), Money::from_units(360));
    }

    #[test]
    fn test_month_only_labels_merge_years() {
        let incomes = vec![
            income(1, "salary", 100, "2024-01-05"),
            income(2, "salary", 200, "2023-01-05"),
        ];
        let totals = sum_by_month(&incomes, MonthLabelFormat::MonthOnly);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals.get("Jan"), Some(Money::from_units(300)));
        assert_eq!(totals.iter().next().and_then(|m| m.year), None);
    }

    #[test]
    fn test_empty_input() {
        assert!(sum_by_month(None::<&Income>, MonthLabelFormat::default()).is_empty());
        assert!(daily_totals(Vec::<Income>::new()).is_empty());
    }

    #[test]
    fn test_daily_totals() {
        let expenses = vec![
            expense(1, "food", 10, "2024-01-02"),
            expense(2, "food", 15, "2024-01-01"),
            expense(3, "fun", 5, "2024-01-02"),
        ];
        let days: Vec<(String, i64)> = daily_totals(&expenses)
            .into_iter()
            .map(|(d, m)| (d.to_string(), m.units()))
            .collect();
        assert_eq!(
            days,
            vec![("2024-01-01".to_string(), 15), ("2024-01-02".to_string(), 15)]
        );
    }

    #[test]
    fn test_monthly_savings_union_and_extremes() {
        let incomes = vec![
            income(1, "salary", 1000, "2024-01-05"),
            income(2, "salary", 1000, "2024-02-05"),
        ];
        let expenses = vec![
            expense(1, "rent", 300, "2024-01-10"),
            expense(2, "rent", 1200, "2024-02-10"),
            expense(3, "gift", 100, "2024-03-01"),
        ];
        let series = monthly_savings(&incomes, &expenses, MonthLabelFormat::MonthYear);

        let labels: Vec<&str> = series.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["Jan 2024", "Feb 2024", "Mar 2024"]);
        assert_eq!(series[0].savings, Money::from_units(700));
        assert_eq!(series[1].savings, Money::from_units(-200));
        assert_eq!(series[2].income, Money::zero());

        assert_eq!(best_month(&series).map(|m| m.month), Some(1));
        assert_eq!(worst_month(&series).map(|m| m.month), Some(2));
        assert!(best_month(&[]).is_none());
    }

    #[test]
    fn test_extremes_prefer_earliest_on_tie() {
        let incomes = vec![
            income(1, "salary", 100, "2024-01-05"),
            income(2, "salary", 100, "2024-02-05"),
        ];
        let series = monthly_savings(&incomes, Vec::<Income>::new(), MonthLabelFormat::MonthYear);
        assert_eq!(best_month(&series).map(|m| m.month), Some(1));
        assert_eq!(worst_month(&series).map(|m| m.month), Some(1));
    }

    #[test]
    fn test_best_month_is_never_an_empty_month() {
        let expenses = vec![
            expense(1, "rent", 300, "2024-03-10"),
            expense(2, "rent", 100, "2024-05-10"),
        ];
        let series = monthly_savings(Vec::<Income>::new(), &expenses, MonthLabelFormat::MonthYear);

        let best = best_month(&series).unwrap();
        assert_eq!(best.label, "May 2024");
        assert_eq!(best.savings, Money::from_units(-100));
        assert_eq!(worst_month(&series).map(|m| m.month), Some(3));
    }

    #[test]
    fn test_average_ignores_deficit_months() {
        let incomes = vec![
            income(1, "salary", 1200, "2024-01-05"),
            income(2, "salary", 100, "2024-02-05"),
        ];
        let expenses = vec![expense(1, "rent", 500, "2024-02-10")];
        let series = monthly_savings(&incomes, &expenses, MonthLabelFormat::MonthYear);
        assert_eq!(average_monthly_savings(&series), Money::from_units(100));
    }
}
