//! Savings headroom

use crate::models::Money;

/// Income left after expenses; negative is a deficit
pub fn available_savings(total_income: Money, total_expenses: Money) -> Money {
    total_income - total_expenses
}

/// What is left of `available` once every goal's monthly contribution is set aside
///
/// Sign-preserving: over-committed goals give a negative result.
pub fn remaining_for_goals<I>(available: Money, contributions: I) -> Money
where
    I: IntoIterator<Item = Money>,
{
    available - contributions.into_iter().sum::<Money>()
}

/// Savings as a percentage of income; 0 when there was no income
pub fn savings_rate(total_income: Money, savings: Money) -> f64 {
    if total_income.is_positive() {
        savings.percent_of(total_income)
    } else {
        0.0
    }
}
