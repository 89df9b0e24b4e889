//! Aggregation engine
//!
//! Pure functions over lists of dated, categorized, amount-bearing records:
//! period filtering, sums, grouping by category or month, percentage change
//! and time-elapsed goal progress. Nothing here performs I/O or returns an
//! error; every figure is recomputed from the snapshot it is given.
//!
//! List inputs are any `IntoIterator` whose items implement [`Record`], so
//! `&Vec<Income>`, `Vec<&Expense>` and slices all work. A lone record is
//! passed as `Some(&record)` and an absent list as `None`, which behave
//! exactly like a one-element and an empty list. Malformed wire payloads are
//! coerced the same way by [`Records`](crate::models::Records).
//!
//! [`Record`]: crate::models::Record

mod activity;
mod compare;
mod filter;
mod goals;
mod monthly;
mod savings;
mod totals;

#[cfg(test)]
pub(crate) mod testing;

pub use activity::{recent_activity, Activity, ActivityKind};
pub use compare::{compare_categories, percent_change, CategoryComparison};
pub use filter::{filter_by_period, filter_by_year};
pub use goals::{
    budget_overview, budget_usage, goal_monthly_contribution, goal_progress,
    monthly_contribution, BudgetOverview, BudgetUsage, GoalProgress,
};
pub use monthly::{
    average_monthly_savings, best_month, daily_totals, month_abbreviation, monthly_savings,
    sum_by_month, worst_month, MonthLabelFormat, MonthTotal, MonthlySavings, MonthlyTotals,
};
pub use savings::{available_savings, remaining_for_goals, savings_rate};
pub use totals::{sum_amounts, sum_by_category, CategoryTotal, CategoryTotals};
