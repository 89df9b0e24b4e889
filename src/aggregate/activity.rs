//! Recent activity feed across incomes and expenses

use chrono::NaiveDate;

use crate::models::{Money, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Income,
    Expense,
}

impl ActivityKind {
    fn noun(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

/// One line of the activity feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub kind: ActivityKind,
    pub category: String,
    pub amount: Money,
    pub date: NaiveDate,
    pub description: String,
}

impl Activity {
    fn from_record<R: Record>(kind: ActivityKind, record: R) -> Self {
        let description = match record.description() {
            Some(d) if !d.trim().is_empty() => d.to_string(),
            _ => format!("{} {}", record.category(), kind.noun()),
        };
        Self {
            kind,
            category: record.category().to_string(),
            amount: record.amount(),
            date: record.date(),
            description,
        }
    }

    /// Amount signed by direction: expenses are negative
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            ActivityKind::Income => self.amount,
            ActivityKind::Expense => -self.amount,
        }
    }
}

/// The `limit` most recent incomes and expenses, newest first
///
/// Records on the same day keep their input order, incomes before expenses.
pub fn recent_activity<I, E>(incomes: I, expenses: E, limit: usize) -> Vec<Activity>
where
    I: IntoIterator,
    I::Item: Record,
    E: IntoIterator,
    E::Item: Record,
{
    let mut feed: Vec<Activity> = incomes
        .into_iter()
        .map(|r| Activity::from_record(ActivityKind::Income, r))
        .chain(
            expenses
                .into_iter()
                .map(|r| Activity::from_record(ActivityKind::Expense, r)),
        )
        .collect();

    feed.sort_by(|a, b| b.date.cmp(&a.date));
    feed.truncate(limit);
    feed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::testing::{expense, income};
    use crate::models::{Expense, Income};

    #[test]
    fn test_newest_first_with_limit() {
        let incomes = vec![
            income(1, "salary", 1000, "2024-01-05"),
            income(2, "freelance", 200, "2024-01-20"),
        ];
        let expenses = vec![
            expense(1, "rent", 300, "2024-01-10"),
            expense(2, "food", 20, "2024-01-25"),
        ];
        let feed = recent_activity(&incomes, &expenses, 3);

        let categories: Vec<&str> = feed.iter().map(|a| a.category.as_str()).collect();
        assert_eq!(categories, vec!["food", "freelance", "rent"]);
        assert_eq!(feed[0].signed_amount(), Money::from_units(-20));
    }

    #[test]
    fn test_ties_put_incomes_first() {
        let incomes = vec![income(1, "salary", 1000, "2024-01-05")];
        let expenses = vec![
            expense(1, "rent", 300, "2024-01-05"),
            expense(2, "food", 20, "2024-01-05"),
        ];
        let feed = recent_activity(&incomes, &expenses, 10);
        let kinds: Vec<ActivityKind> = feed.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![ActivityKind::Income, ActivityKind::Expense, ActivityKind::Expense]
        );
        assert_eq!(feed[1].category, "rent");
    }

    #[test]
    fn test_default_descriptions() {
        let incomes = vec![income(1, "salary", 1000, "2024-01-05").with_description("Payday")];
        let expenses = vec![expense(1, "rent", 300, "2024-01-04")];
        let feed = recent_activity(&incomes, &expenses, 5);
        assert_eq!(feed[0].description, "Payday");
        assert_eq!(feed[1].description, "rent expense");
    }

    #[test]
    fn test_empty_inputs() {
        assert!(recent_activity(None::<&Income>, None::<&Expense>, 5).is_empty());
        let incomes = vec![income(1, "salary", 1000, "2024-01-05")];
        assert!(recent_activity(&incomes, None::<&Expense>, 0).is_empty());
    }
}
