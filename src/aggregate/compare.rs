//! Period-over-period comparison

use crate::models::{Money, Record};

use super::totals::sum_by_category;

/// Signed percentage change from `previous` to `current`, for display
///
/// A zero `previous` has no meaningful ratio: the result is "+100%" when
/// `current` is positive and "0%" otherwise. Every other case is formatted
/// to one decimal with an explicit sign, e.g. "+50.0%" or "-12.5%". Halves
/// round away from zero.
pub fn percent_change(current: Money, previous: Money) -> String {
    if previous.is_zero() {
        return if current.is_positive() {
            "+100%".to_string()
        } else {
            "0%".to_string()
        };
    }

    let diff = (current - previous).cents() as i128;
    let previous = previous.cents() as i128;

    // Percent in tenths: diff / previous * 100 * 10
    let tenths = div_round_half_away(diff.abs() * 1000, previous.abs());
    let negative = diff != 0 && ((diff < 0) != (previous < 0));
    let sign = if negative { '-' } else { '+' };

    format!("{}{}.{}%", sign, tenths / 10, tenths % 10)
}

/// Integer division of non-negative operands, rounding halves up
fn div_round_half_away(numerator: i128, denominator: i128) -> i128 {
    (2 * numerator + denominator) / (2 * denominator)
}

/// Category totals side by side for two periods
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryComparison {
    pub category: String,
    pub current: Money,
    pub previous: Money,
    /// [`percent_change`] from `previous` to `current`
    pub change: String,
}

/// Compare per-category totals of two record sets
///
/// Categories come out in the order first seen, scanning `current` before
/// `previous`. A category missing from one side counts as zero there.
pub fn compare_categories<C, P>(current: C, previous: P) -> Vec<CategoryComparison>
where
    C: IntoIterator,
    C::Item: Record,
    P: IntoIterator,
    P::Item: Record,
{
    let current = sum_by_category(current);
    let previous = sum_by_category(previous);

    let mut categories: Vec<&str> = current.categories().collect();
    for category in previous.categories() {
        if current.get(category).is_none() {
            categories.push(category);
        }
    }

    categories
        .into_iter()
        .map(|category| {
            let now = current.get(category).unwrap_or_default();
            let before = previous.get(category).unwrap_or_default();
            CategoryComparison {
                category: category.to_string(),
                current: now,
                previous: before,
                change: percent_change(now, before),
            }
        })
        .collect()
}
