//! Comparison Report
//!
//! Two periods side by side: income, expenses and savings with their
//! percentage change, and the same for every category.

use crate::aggregate::{
    available_savings, compare_categories, filter_by_period, percent_change, sum_amounts,
    CategoryComparison,
};
use crate::display::{money, separator, signed_money, truncate};
use crate::error::FinTrackResult;
use crate::models::{Expense, Income, Money, Period, UserId};
use crate::services::{ExpenseService, IncomeService};
use crate::storage::Storage;

/// One headline figure in both periods
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparedTotal {
    pub current: Money,
    pub previous: Money,
    pub change: String,
}

impl ComparedTotal {
    fn new(current: Money, previous: Money) -> Self {
        Self {
            current,
            previous,
            change: percent_change(current, previous),
        }
    }
}

/// Comparison Report
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonReport {
    pub current: Period,
    pub previous: Period,
    pub income: ComparedTotal,
    pub expenses: ComparedTotal,
    pub savings: ComparedTotal,
    pub income_categories: Vec<CategoryComparison>,
    pub expense_categories: Vec<CategoryComparison>,
}

impl ComparisonReport {
    pub fn from_records(
        incomes: &[Income],
        expenses: &[Expense],
        current: Period,
        previous: Period,
    ) -> Self {
        let current_incomes = filter_by_period(incomes, current);
        let previous_incomes = filter_by_period(incomes, previous);
        let current_expenses = filter_by_period(expenses, current);
        let previous_expenses = filter_by_period(expenses, previous);

        let income = ComparedTotal::new(
            sum_amounts(&current_incomes),
            sum_amounts(&previous_incomes),
        );
        let spent = ComparedTotal::new(
            sum_amounts(&current_expenses),
            sum_amounts(&previous_expenses),
        );
        let savings = ComparedTotal::new(
            available_savings(income.current, spent.current),
            available_savings(income.previous, spent.previous),
        );

        Self {
            current,
            previous,
            income,
            expenses: spent,
            savings,
            income_categories: compare_categories(&current_incomes, &previous_incomes),
            expense_categories: compare_categories(&current_expenses, &previous_expenses),
        }
    }

    pub fn generate(
        storage: &Storage,
        user: UserId,
        current: Period,
        previous: Period,
    ) -> FinTrackResult<Self> {
        let incomes = IncomeService::new(storage).list(user)?;
        let expenses = ExpenseService::new(storage).list(user)?;
        Ok(Self::from_records(&incomes, &expenses, current, previous))
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Comparison - {} vs {}\n", self.current, self.previous));
        output.push_str(&"=".repeat(66));
        output.push('\n');
        output.push_str(&format!(
            "{:<18} {:>14} {:>14} {:>10}\n",
            "",
            self.current.to_string(),
            self.previous.to_string(),
            "Change"
        ));

        for (label, total, signed) in [
            ("Income", &self.income, false),
            ("Expenses", &self.expenses, false),
            ("Savings", &self.savings, true),
        ] {
            let show = |amount: Money| {
                if signed {
                    signed_money(amount, symbol)
                } else {
                    money(amount, symbol)
                }
            };
            output.push_str(&format!(
                "{:<18} {:>14} {:>14} {:>10}\n",
                label,
                show(total.current),
                show(total.previous),
                total.change
            ));
        }

        format_categories(&mut output, "Income by Category", &self.income_categories, symbol);
        format_categories(
            &mut output,
            "Expenses by Category",
            &self.expense_categories,
            symbol,
        );

        output
    }
}

fn format_categories(output: &mut String, title: &str, rows: &[CategoryComparison], symbol: &str) {
    output.push_str(&format!("\n{}\n", title));
    output.push_str(&separator(66));
    output.push('\n');

    if rows.is_empty() {
        output.push_str("  No data.\n");
        return;
    }

    for row in rows {
        output.push_str(&format!(
            "  {:<16} {:>14} {:>14} {:>10}\n",
            truncate(&row.category, 16),
            money(row.current, symbol),
            money(row.previous, symbol),
            row.change
        ));
    }
}
