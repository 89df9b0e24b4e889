//! Goals Report
//!
//! Progress on every savings goal, the monthly contribution each one needs,
//! how much of this month's savings is left once those are set aside, and
//! spending against each budget goal.

use chrono::NaiveDate;

use crate::aggregate::{
    available_savings, budget_overview, filter_by_period, goal_monthly_contribution,
    goal_progress, remaining_for_goals, sum_amounts, BudgetOverview, GoalProgress,
};
use crate::display::{format_percentage, money, separator, signed_money, truncate};
use crate::error::FinTrackResult;
use crate::models::{Expense, Goal, Income, Money, Period, UserId};
use crate::services::{ExpenseService, GoalService, IncomeService};
use crate::storage::Storage;

/// One savings goal with its projected progress
#[derive(Debug, Clone)]
pub struct SavingsGoalRow {
    pub goal: Goal,
    pub progress: GoalProgress,
    pub monthly_contribution: Money,
}

/// Goals Report
#[derive(Debug, Clone)]
pub struct GoalsReport {
    pub as_of: NaiveDate,
    pub savings_goals: Vec<SavingsGoalRow>,
    /// Sum of monthly contributions across savings goals
    pub total_contributions: Money,
    /// Income minus expenses in the month of `as_of`
    pub available: Money,
    pub remaining_for_goals: Money,
    pub budget: BudgetOverview,
}

impl GoalsReport {
    pub fn from_records(
        goals: &[Goal],
        incomes: &[Income],
        expenses: &[Expense],
        as_of: NaiveDate,
    ) -> Self {
        let savings_goals: Vec<SavingsGoalRow> = goals
            .iter()
            .filter(|g| g.is_savings())
            .map(|goal| SavingsGoalRow {
                progress: goal_progress(goal, as_of),
                monthly_contribution: goal_monthly_contribution(goal),
                goal: goal.clone(),
            })
            .collect();

        let month = Period::month_of(as_of);
        let month_expenses = filter_by_period(expenses, month);
        let available = available_savings(
            sum_amounts(filter_by_period(incomes, month)),
            sum_amounts(&month_expenses),
        );

        let total_contributions: Money = savings_goals.iter().map(|r| r.monthly_contribution).sum();
        let remaining = remaining_for_goals(
            available,
            savings_goals.iter().map(|r| r.monthly_contribution),
        );

        Self {
            as_of,
            savings_goals,
            total_contributions,
            available,
            remaining_for_goals: remaining,
            budget: budget_overview(goals, &month_expenses, as_of),
        }
    }

    pub fn generate(storage: &Storage, user: UserId, as_of: NaiveDate) -> FinTrackResult<Self> {
        let goals = GoalService::new(storage).list(user)?;
        let incomes = IncomeService::new(storage).list(user)?;
        let expenses = ExpenseService::new(storage).list(user)?;
        Ok(Self::from_records(&goals, &incomes, &expenses, as_of))
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Goals - as of {}\n", self.as_of.format("%Y-%m-%d")));
        output.push_str(&"=".repeat(60));
        output.push('\n');

        output.push_str("\nSavings Goals\n");
        output.push_str(&separator(60));
        output.push('\n');
        if self.savings_goals.is_empty() {
            output.push_str("  No savings goals.\n");
        }
        for row in &self.savings_goals {
            output.push_str(&format!(
                "  {:<18} {:>4}%  {:>14} of {:<14} {}/month, by {}\n",
                truncate(&row.goal.category, 18),
                row.progress.percent,
                money(row.progress.amount_accrued, symbol),
                money(row.goal.amount, symbol),
                money(row.monthly_contribution, symbol),
                row.goal.end_date.format("%Y-%m-%d"),
            ));
        }

        output.push_str(&format!(
            "\n{:<24} {:>16}\n",
            "Available this month:",
            signed_money(self.available, symbol)
        ));
        output.push_str(&format!(
            "{:<24} {:>16}\n",
            "Goal contributions:",
            money(self.total_contributions, symbol)
        ));
        output.push_str(&format!(
            "{:<24} {:>16}\n",
            "Remaining for goals:",
            signed_money(self.remaining_for_goals, symbol)
        ));

        let budget = &self.budget;
        output.push_str("\nBudgets\n");
        output.push_str(&separator(60));
        output.push('\n');
        if budget.usages.is_empty() {
            output.push_str("  No budget goals.\n");
            return output;
        }
        for usage in &budget.usages {
            let flag = if usage.is_over() { " *" } else { "" };
            output.push_str(&format!(
                "  {:<18} {:>14} / {:<14} {:>8}{}\n",
                truncate(&usage.category, 18),
                money(usage.spent, symbol),
                money(usage.allocated, symbol),
                format_percentage(usage.percent),
                flag,
            ));
        }
        output.push_str(&format!(
            "\n  Spent {} of {} ({}), {} left\n",
            money(budget.total_spent, symbol),
            money(budget.total_budget, symbol),
            format_percentage(budget.percent_spent),
            signed_money(budget.remaining, symbol),
        ));
        output.push_str(&format!(
            "  {} days remaining, {} per day\n",
            budget.days_remaining,
            money(budget.daily_budget, symbol),
        ));

        output
    }
}
