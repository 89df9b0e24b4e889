//! Dashboard Report
//!
//! The overview screen: totals for a period, where the money came from and
//! went, a month-by-month series, the latest activity, and how the period
//! compares with the month before it.

use crate::aggregate::{
    available_savings, filter_by_period, percent_change, recent_activity, savings_rate,
    sum_amounts, sum_by_category, sum_by_month, Activity, CategoryTotals, MonthLabelFormat,
    MonthlyTotals,
};
use crate::display::{format_percentage, money, separator, signed_money, truncate};
use crate::error::FinTrackResult;
use crate::models::{Expense, Income, Money, Period, UserId};
use crate::services::{ExpenseService, IncomeService};
use crate::storage::Storage;

/// Month-over-month changes, present when the report covers one month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodChanges {
    pub previous: Period,
    pub previous_income: Money,
    pub previous_expenses: Money,
    pub income: String,
    pub expenses: String,
    pub savings: String,
}

/// Dashboard Report
#[derive(Debug, Clone)]
pub struct DashboardReport {
    pub period: Period,
    pub total_income: Money,
    pub total_expenses: Money,
    pub available_savings: Money,
    pub savings_rate: f64,
    pub income_by_category: CategoryTotals,
    pub expenses_by_category: CategoryTotals,
    pub monthly_income: MonthlyTotals,
    pub monthly_expenses: MonthlyTotals,
    pub recent: Vec<Activity>,
    pub changes: Option<PeriodChanges>,
}

impl DashboardReport {
    /// Build the dashboard from a user's full record lists
    pub fn from_records(
        incomes: &[Income],
        expenses: &[Expense],
        period: Period,
        labels: MonthLabelFormat,
        recent_limit: usize,
    ) -> Self {
        let period_incomes = filter_by_period(incomes, period);
        let period_expenses = filter_by_period(expenses, period);

        let total_income = sum_amounts(&period_incomes);
        let total_expenses = sum_amounts(&period_expenses);
        let available = available_savings(total_income, total_expenses);

        let changes = match period {
            Period::Month { .. } => {
                let previous = period.prev();
                let previous_income = sum_amounts(filter_by_period(incomes, previous));
                let previous_expenses = sum_amounts(filter_by_period(expenses, previous));
                Some(PeriodChanges {
                    previous,
                    previous_income,
                    previous_expenses,
                    income: percent_change(total_income, previous_income),
                    expenses: percent_change(total_expenses, previous_expenses),
                    savings: percent_change(
                        available,
                        available_savings(previous_income, previous_expenses),
                    ),
                })
            }
            _ => None,
        };

        Self {
            period,
            total_income,
            total_expenses,
            available_savings: available,
            savings_rate: savings_rate(total_income, available),
            income_by_category: sum_by_category(&period_incomes),
            expenses_by_category: sum_by_category(&period_expenses),
            monthly_income: sum_by_month(&period_incomes, labels),
            monthly_expenses: sum_by_month(&period_expenses, labels),
            recent: recent_activity(&period_incomes, &period_expenses, recent_limit),
            changes,
        }
    }

    /// Generate the dashboard for one user
    pub fn generate(
        storage: &Storage,
        user: UserId,
        period: Period,
        labels: MonthLabelFormat,
        recent_limit: usize,
    ) -> FinTrackResult<Self> {
        let incomes = IncomeService::new(storage).list(user)?;
        let expenses = ExpenseService::new(storage).list(user)?;
        Ok(Self::from_records(
            &incomes,
            &expenses,
            period,
            labels,
            recent_limit,
        ))
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Dashboard - {}\n", self.period));
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
            "{:<20} {:>16}  ({} of income)\n",
            "Available Savings:",
            signed_money(self.available_savings, symbol),
            format_percentage(self.savings_rate)
        ));

        if let Some(changes) = &self.changes {
            output.push_str(&format!("\nCompared with {}:\n", changes.previous));
            output.push_str(&format!("  Income    {}\n", changes.income));
            output.push_str(&format!("  Expenses  {}\n", changes.expenses));
            output.push_str(&format!("  Savings   {}\n", changes.savings));
        }

        format_breakdown(&mut output, "Income by Category", &self.income_by_category, symbol);
        format_breakdown(
            &mut output,
            "Expenses by Category",
            &self.expenses_by_category,
            symbol,
        );

        output.push_str("\nMonthly Overview\n");
        output.push_str(&separator(60));
        output.push('\n');
        if self.monthly_income.is_empty() && self.monthly_expenses.is_empty() {
            output.push_str("  No data for this period.\n");
        }
        let mut labels: Vec<&str> = self.monthly_income.labels().collect();
        for label in self.monthly_expenses.labels() {
            if !labels.contains(&label) {
                labels.push(label);
            }
        }
        for label in labels {
            output.push_str(&format!(
                "  {:<10} {:>16} {:>16}\n",
                label,
                money(self.monthly_income.get(label).unwrap_or_default(), symbol),
                money(self.monthly_expenses.get(label).unwrap_or_default(), symbol),
            ));
        }

        output.push_str("\nRecent Activity\n");
        output.push_str(&separator(60));
        output.push('\n');
        if self.recent.is_empty() {
            output.push_str("  No recent activity.\n");
        }
        for activity in &self.recent {
            output.push_str(&format!(
                "  {}  {:<30} {:>16}\n",
                activity.date.format("%Y-%m-%d"),
                truncate(&activity.description, 30),
                signed_money(activity.signed_amount(), symbol),
            ));
        }

        output
    }
}

fn format_breakdown(output: &mut String, title: &str, totals: &CategoryTotals, symbol: &str) {
    output.push_str(&format!("\n{}\n", title));
    output.push_str(&separator(60));
    output.push('\n');

    if totals.is_empty() {
        output.push_str("  No data for this period.\n");
        return;
    }

    for row in totals.sorted_by_total() {
        output.push_str(&format!(
            "  {:<24} {:>16} {:>8}\n",
            truncate(&row.category, 24),
            money(row.total, symbol),
            format_percentage(totals.share(&row.category)),
        ));
    }

    if let Some(largest) = totals.largest() {
        output.push_str(&format!("  Largest: {}\n", largest.category));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::testing::{expense, income};

    fn sample() -> (Vec<Income>, Vec<Expense>) {
        let incomes = vec![
            income(1, "salary", 1000, "2024-01-05"),
            income(2, "freelance", 200, "2024-01-20"),
            income(3, "salary", 800, "2023-12-05"),
        ];
        let expenses = vec![
            expense(1, "rent", 300, "2024-01-10"),
            expense(2, "food", 100, "2023-12-12"),
        ];
        (incomes, expenses)
    }

    #[test]
    fn test_month_dashboard() {
        let (incomes, expenses) = sample();
        let report = DashboardReport::from_records(
            &incomes,
            &expenses,
            Period::month(2024, 1),
            MonthLabelFormat::MonthYear,
            5,
        );

        assert_eq!(report.total_income, Money::from_units(1200));
        assert_eq!(report.total_expenses, Money::from_units(300));
        assert_eq!(report.available_savings, Money::from_units(900));
        assert_eq!(report.savings_rate, 75.0);
        assert_eq!(report.income_by_category.get("salary"), Some(Money::from_units(1000)));
        assert_eq!(report.monthly_income.get("Jan 2024"), Some(Money::from_units(1200)));
        assert_eq!(report.recent.len(), 3);

        let changes = report.changes.unwrap();
        assert_eq!(changes.previous, Period::month(2023, 12));
        assert_eq!(changes.income, "+50.0%");
        assert_eq!(changes.expenses, "+200.0%");
        assert_eq!(changes.savings, "+28.6%");
    }

    #[test]
    fn test_all_time_has_no_changes() {
        let (incomes, expenses) = sample();
        let report = DashboardReport::from_records(
            &incomes,
            &expenses,
            Period::All,
            MonthLabelFormat::MonthYear,
            2,
        );

        assert!(report.changes.is_none());
        assert_eq!(report.total_income, Money::from_units(2000));
        assert_eq!(report.monthly_expenses.len(), 2);
        assert_eq!(report.recent.len(), 2);
    }

    #[test]
    fn test_empty_dashboard() {
        let report = DashboardReport::from_records(
            &[],
            &[],
            Period::month(2024, 3),
            MonthLabelFormat::MonthYear,
            5,
        );
        assert_eq!(report.available_savings, Money::zero());
        assert_eq!(report.savings_rate, 0.0);

        let changes = report.changes.as_ref().unwrap();
        assert_eq!(changes.income, "0%");

        let output = report.format_terminal("₹");
        assert!(output.contains("Dashboard - 2024-03"));
        assert!(output.contains("No recent activity."));
    }

    #[test]
    fn test_format_terminal() {
        let (incomes, expenses) = sample();
        let report = DashboardReport::from_records(
            &incomes,
            &expenses,
            Period::month(2024, 1),
            MonthLabelFormat::MonthYear,
            5,
        );
        let output = report.format_terminal("$");

        assert!(output.contains("$1200.00"));
        assert!(output.contains("+$900.00"));
        assert!(output.contains("Compared with 2023-12"));
        assert!(output.contains("Largest: salary"));
        assert!(output.contains("Jan 2024"));
    }
}
