//! Sums and per-category totals

use std::collections::HashMap;

use crate::models::{Money, Record};

/// Total amount over all records; zero for no records
pub fn sum_amounts<I>(records: I) -> Money
where
    I: IntoIterator,
    I::Item: Record,
{
    records.into_iter().map(|record| record.amount()).sum()
}

/// Accumulated amount for one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Money,
}

/// Per-category sums, in the order categories were first seen
///
/// Only categories present in the input appear; there is no zero-filling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTotals {
    entries: Vec<CategoryTotal>,
    index: HashMap<String, usize>,
}

impl CategoryTotals {
    fn add(&mut self, category: &str, amount: Money) {
        match self.index.get(category) {
            Some(&i) => self.entries[i].total += amount,
            None => {
                self.index.insert(category.to_string(), self.entries.len());
                self.entries.push(CategoryTotal {
                    category: category.to_string(),
                    total: amount,
                });
            }
        }
    }

    pub fn get(&self, category: &str) -> Option<Money> {
        self.index.get(category).map(|&i| self.entries[i].total)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CategoryTotal> {
        self.entries.iter()
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.category.as_str())
    }

    /// Sum across every category
    pub fn total(&self) -> Money {
        self.entries.iter().map(|e| e.total).sum()
    }

    /// The category with the largest total
    ///
    /// Equal totals keep the first-encountered category.
    pub fn largest(&self) -> Option<&CategoryTotal> {
        let mut best: Option<&CategoryTotal> = None;
        for entry in &self.entries {
            match best {
                Some(current) if entry.total <= current.total => {}
                _ => best = Some(entry),
            }
        }
        best
    }

    /// A category's share of the overall total as a percentage, rounded to
    /// two decimals; 0 when the overall total is zero or the category is absent
    pub fn share(&self, category: &str) -> f64 {
        let Some(amount) = self.get(category) else {
            return 0.0;
        };
        let pct = amount.percent_of(self.total());
        (pct * 100.0).round() / 100.0
    }

    /// Entries ordered by total, largest first; ties keep first-seen order
    pub fn sorted_by_total(&self) -> Vec<&CategoryTotal> {
        let mut sorted: Vec<&CategoryTotal> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.total.cmp(&a.total));
        sorted
    }

    pub fn into_vec(self) -> Vec<CategoryTotal> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a CategoryTotals {
    type Item = &'a CategoryTotal;
    type IntoIter = std::slice::Iter<'a, CategoryTotal>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Group records by category and sum each group
pub fn sum_by_category<I>(records: I) -> CategoryTotals
where
    I: IntoIterator,
    I::Item: Record,
{
    let mut totals = CategoryTotals::default();
    for record in records {
        totals.add(record.category(), record.amount());
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::testing::{expense, income};
    use crate::models::{Expense, Income, Records};

    #[test]
    fn test_sum_empty_is_zero() {
        let none: Vec<Income> = Vec::new();
        assert_eq!(sum_amounts(&none), Money::zero());
        assert_eq!(sum_amounts(None::<&Expense>), Money::zero());
    }

    #[test]
    fn test_sum_is_order_independent() {
        let mut incomes = vec![
            income(1, "salary", 1000, "2024-01-05"),
            income(2, "freelance", 200, "2024-01-20"),
            income(3, "interest", 7, "2024-02-01"),
        ];
        let forward = sum_amounts(&incomes);
        incomes.reverse();
        assert_eq!(sum_amounts(&incomes), forward);
        incomes.swap(0, 1);
        assert_eq!(sum_amounts(&incomes), forward);
        assert_eq!(forward, Money::from_units(1207));
    }

    #[test]
    fn test_sum_decimal_amounts_is_exact() {
        let payload = r#"[
            {"id":1,"category":"food","amount":0.1,"date":"2024-01-01"},
            {"id":2,"category":"food","amount":0.2,"date":"2024-01-02"}
        ]"#;
        let expenses: Records<Expense> = Records::from_body(payload).unwrap();
        assert_eq!(sum_amounts(expenses).cents(), 30);
    }

    #[test]
    fn test_by_category_partitions_total() {
        let expenses = vec![
            expense(1, "rent", 300, "2024-01-10"),
            expense(2, "food", 20, "2024-01-11"),
            expense(3, "food", 35, "2024-01-12"),
            expense(4, "travel", 80, "2024-02-01"),
        ];
        let totals = sum_by_category(&expenses);

        assert_eq!(totals.len(), 3);
        assert_eq!(totals.get("food"), Some(Money::from_units(55)));
        assert_eq!(totals.get("utilities"), None);
        assert_eq!(totals.total(), sum_amounts(&expenses));
        assert_eq!(
            totals.categories().collect::<Vec<_>>(),
            vec!["rent", "food", "travel"]
        );
    }

    #[test]
    fn test_largest_first_wins_on_tie() {
        let expenses = vec![
            expense(1, "food", 50, "2024-01-01"),
            expense(2, "rent", 100, "2024-01-01"),
            expense(3, "travel", 100, "2024-01-02"),
        ];
        let totals = sum_by_category(&expenses);
        assert_eq!(totals.largest().map(|c| c.category.as_str()), Some("rent"));
        assert!(CategoryTotals::default().largest().is_none());
    }

    #[test]
    fn test_share() {
        let incomes = vec![
            income(1, "salary", 1000, "2024-01-05"),
            income(2, "freelance", 200, "2024-01-20"),
        ];
        let totals = sum_by_category(&incomes);
        assert_eq!(totals.share("salary"), 83.33);
        assert_eq!(totals.share("freelance"), 16.67);
        assert_eq!(totals.share("gifts"), 0.0);

        let zero = vec![income(1, "salary", 0, "2024-01-05")];
        assert_eq!(sum_by_category(&zero).share("salary"), 0.0);
    }

    #[test]
    fn test_sorted_by_total() {
        let expenses = vec![
            expense(1, "food", 50, "2024-01-01"),
            expense(2, "rent", 300, "2024-01-01"),
            expense(3, "fun", 50, "2024-01-01"),
        ];
        let totals = sum_by_category(&expenses);
        let order: Vec<&str> = totals
            .sorted_by_total()
            .into_iter()
            .map(|c| c.category.as_str())
            .collect();
        assert_eq!(order, vec!["rent", "food", "fun"]);
    }

    #[test]
    fn test_single_record_matches_singleton_list() {
        let one = income(1, "salary", 1000, "2024-01-05");
        assert_eq!(sum_by_category(Some(&one)), sum_by_category(vec![&one]));
        assert!(sum_by_category(None::<&Income>).is_empty());
    }
}
