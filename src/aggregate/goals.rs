//! Goal progress and budget headroom
//!
//! Progress is a projection from elapsed time: a goal halfway through its
//! date range is reported as half accrued, whatever was actually saved.

use std::borrow::Borrow;

use chrono::{Datelike, NaiveDate};

use crate::models::{Goal, Money, Period, Record};

/// How far along a goal is, as of some date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalProgress {
    /// 0 to 100
    pub percent: u8,
    /// `percent` of the goal amount
    pub amount_accrued: Money,
}

/// Time-elapsed progress of a goal
///
/// Before `start_date` the goal is at 0%, after `end_date` it is at 100%.
/// In between, the whole days elapsed over the whole days in the range,
/// rounded to the nearest percent (halves up). A goal that starts and ends
/// on the same day is complete on that day.
pub fn goal_progress(goal: &Goal, as_of: NaiveDate) -> GoalProgress {
    let percent = if as_of < goal.start_date {
        0
    } else if as_of > goal.end_date {
        100
    } else {
        let total = (goal.end_date - goal.start_date).num_days();
        let elapsed = (as_of - goal.start_date).num_days();
        if total <= 0 {
            100
        } else {
            ((200 * elapsed + total) / (2 * total)).clamp(0, 100)
        }
    };

    GoalProgress {
        percent: percent as u8,
        amount_accrued: goal.amount.mul_ratio(percent, 100),
    }
}

/// Monthly amount needed to reach `target` by `target_date`, counting from `as_of`
///
/// Months are counted by calendar fields only (March 31 to April 1 is one
/// month). With no whole month left the full target is due at once.
pub fn monthly_contribution(target: Money, target_date: NaiveDate, as_of: NaiveDate) -> Money {
    let months = (target_date.year() - as_of.year()) as i64 * 12
        + (target_date.month() as i64 - as_of.month() as i64);
    if months > 0 {
        target.mul_ratio(1, months)
    } else {
        target
    }
}

/// Monthly contribution a savings goal was planned with
///
/// Counted from the goal's start date. Budget goals are spending caps and
/// contribute nothing.
pub fn goal_monthly_contribution(goal: &Goal) -> Money {
    if goal.is_savings() {
        monthly_contribution(goal.amount, goal.end_date, goal.start_date)
    } else {
        Money::zero()
    }
}

/// Spending against one budget goal
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetUsage {
    pub category: String,
    pub allocated: Money,
    pub spent: Money,
    /// Negative when over budget
    pub remaining: Money,
    /// `spent` as a percentage of `allocated`; 0 when nothing is allocated
    pub percent: f64,
}

impl BudgetUsage {
    pub fn is_over(&self) -> bool {
        self.remaining.is_negative()
    }
}

/// Compare a budget goal's cap with expenses in its category
pub fn budget_usage<I>(goal: &Goal, expenses: I) -> BudgetUsage
where
    I: IntoIterator,
    I::Item: Record,
{
    let spent: Money = expenses
        .into_iter()
        .filter(|e| e.category() == goal.category)
        .map(|e| e.amount())
        .sum();

    BudgetUsage {
        category: goal.category.clone(),
        allocated: goal.amount,
        spent,
        remaining: goal.amount - spent,
        percent: spent.percent_of(goal.amount),
    }
}

/// All budget goals rolled up for the month containing `as_of`
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetOverview {
    pub usages: Vec<BudgetUsage>,
    pub total_budget: Money,
    pub total_spent: Money,
    pub remaining: Money,
    pub percent_spent: f64,
    /// Days left in the month after `as_of`
    pub days_remaining: u32,
    /// Remaining budget spread over the remaining days; 0 when either is exhausted
    pub daily_budget: Money,
}

/// Roll up every budget goal against the given expenses
///
/// Savings goals are skipped. The caller decides which expenses count,
/// typically the ones dated in the current month.
pub fn budget_overview<G, E>(goals: G, expenses: E, as_of: NaiveDate) -> BudgetOverview
where
    G: IntoIterator,
    G::Item: Borrow<Goal>,
    E: IntoIterator,
    E::Item: Record,
{
    let expenses: Vec<E::Item> = expenses.into_iter().collect();

    let usages: Vec<BudgetUsage> = goals
        .into_iter()
        .filter_map(|g| {
            let goal: &Goal = g.borrow();
            goal.is_budget().then(|| budget_usage(goal, &expenses))
        })
        .collect();

    let total_budget: Money = usages.iter().map(|u| u.allocated).sum();
    let total_spent: Money = usages.iter().map(|u| u.spent).sum();
    let remaining = total_budget - total_spent;

    let last_day = Period::month_of(as_of)
        .end_date()
        .map(|d| d.day())
        .unwrap_or_else(|| as_of.day());
    let days_remaining = last_day - as_of.day();

    let daily_budget = if remaining.is_positive() && days_remaining > 0 {
        remaining.mul_ratio(1, days_remaining as i64)
    } else {
        Money::zero()
    };

    BudgetOverview {
        usages,
        total_budget,
        total_spent,
        remaining,
        percent_spent: total_spent.percent_of(total_budget),
        days_remaining,
        daily_budget,
    }
}
