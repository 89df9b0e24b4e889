//! Savings Report
//!
//! All-time savings, the monthly savings series with its best and worst
//! months, and a closer look at one calendar year.

use crate::aggregate::{
    average_monthly_savings, available_savings, best_month, filter_by_year, monthly_savings,
    savings_rate, sum_amounts, worst_month, MonthLabelFormat, MonthlySavings,
};
use crate::display::{format_percentage, money, separator, signed_money};
use crate::error::FinTrackResult;
use crate::models::{Expense, Income, Money, UserId};
use crate::services::{ExpenseService, IncomeService};
use crate::storage::Storage;

/// Totals for the selected year
#[derive(Debug, Clone, PartialEq)]
pub struct YearSummary {
    pub year: i32,
    pub income: Money,
    pub expenses: Money,
    pub savings: Money,
    pub savings_rate: f64,
    pub months: Vec<MonthlySavings>,
    pub average_monthly: Money,
}

/// Savings Report
#[derive(Debug, Clone, PartialEq)]
pub struct SavingsReport {
    pub total_income: Money,
    pub total_expenses: Money,
    pub total_savings: Money,
    pub savings_rate: f64,
    pub months: Vec<MonthlySavings>,
    pub best: Option<MonthlySavings>,
    pub worst: Option<MonthlySavings>,
    pub year: YearSummary,
}

impl SavingsReport {
    pub fn from_records(
        incomes: &[Income],
        expenses: &[Expense],
        year: i32,
        labels: MonthLabelFormat,
    ) -> Self {
        let total_income = sum_amounts(incomes);
        let total_expenses = sum_amounts(expenses);
        let total_savings = available_savings(total_income, total_expenses);

        let months = monthly_savings(incomes, expenses, labels);
        let best = best_month(&months).cloned();
        let worst = worst_month(&months).cloned();

        let year_incomes = filter_by_year(incomes, year);
        let year_expenses = filter_by_year(expenses, year);
        let year_income = sum_amounts(&year_incomes);
        let year_expense_total = sum_amounts(&year_expenses);
        let year_savings = available_savings(year_income, year_expense_total);
        let year_months = monthly_savings(&year_incomes, &year_expenses, labels);

        Self {
            total_income,
            total_expenses,
            total_savings,
            savings_rate: savings_rate(total_income, total_savings),
            months,
            best,
            worst,
            year: YearSummary {
                year,
                income: year_income,
                expenses: year_expense_total,
                savings: year_savings,
                savings_rate: savings_rate(year_income, year_savings),
                average_monthly: average_monthly_savings(&year_months),
                months: year_months,
            },
        }
    }

    pub fn generate(
        storage: &Storage,
        user: UserId,
        year: i32,
        labels: MonthLabelFormat,
    ) -> FinTrackResult<Self> {
        let incomes = IncomeService::new(storage).list(user)?;
        let expenses = ExpenseService::new(storage).list(user)?;
        Ok(Self::from_records(&incomes, &expenses, year, labels))
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str("Savings Report\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>16}\n",
            "Total Income:",
            money(self.total_income, symbol)
        ));
        output.push_str(&format!(
            "{:<20} {:>16}\n",
            "Total Expenses:",
            money(self.total_expenses, symbol)
        ));
        output.push_str(&format!(
            "{:<20} {:>16}  ({})\n",
            "Total Savings:",
            signed_money(self.total_savings, symbol),
            format_percentage(self.savings_rate)
        ));

        if let Some(best) = &self.best {
            output.push_str(&format!(
                "{:<20} {:>16}  {}\n",
                "Best Month:",
                signed_money(best.savings, symbol),
                best.label
            ));
        }
        if let Some(worst) = &self.worst {
            output.push_str(&format!(
                "{:<20} {:>16}  {}\n",
                "Worst Month:",
                signed_money(worst.savings, symbol),
                worst.label
            ));
        }

        output.push_str("\nMonthly Savings\n");
        output.push_str(&separator(60));
        output.push('\n');
        format_series(&mut output, &self.months, symbol);

        let year = &self.year;
        output.push_str(&format!("\nYear {}\n", year.year));
        output.push_str(&separator(60));
        output.push('\n');
        output.push_str(&format!("  Income:           {}\n", money(year.income, symbol)));
        output.push_str(&format!("  Expenses:         {}\n", money(year.expenses, symbol)));
        output.push_str(&format!(
            "  Savings:          {} ({})\n",
            signed_money(year.savings, symbol),
            format_percentage(year.savings_rate)
        ));
        output.push_str(&format!(
            "  Monthly Average:  {}\n",
            money(year.average_monthly, symbol)
        ));

        output
    }
}

fn format_series(output: &mut String, months: &[MonthlySavings], symbol: &str) {
    if months.is_empty() {
        output.push_str("  No data.\n");
        return;
    }

    output.push_str(&format!(
        "  {:<10} {:>14} {:>14} {:>14}\n",
        "Month", "Income", "Expenses", "Savings"
    ));
    for month in months {
        output.push_str(&format!(
            "  {:<10} {:>14} {:>14} {:>14}\n",
            month.label,
            money(month.income, symbol),
            money(month.expense, symbol),
            signed_money(month.savings, symbol),
        ));
    }
}
