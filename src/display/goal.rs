//! Goal display formatting

use crate::models::Goal;

use super::format::{money, truncate};

const CATEGORY_WIDTH: usize = 16;

/// Format a list of goals as a table
pub fn format_goal_list(goals: &[Goal], symbol: &str) -> String {
    if goals.is_empty() {
        return "No goals found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:>5}  {:<7}  {:<cw$}  {:>14}  {:10}  {:10}\n",
        "ID",
        "Type",
        "Category",
        "Amount",
        "Start",
        "End",
        cw = CATEGORY_WIDTH,
    ));
    output.push_str(&format!(
        "{:->5}  {:-<7}  {:-<cw$}  {:->14}  {:-<10}  {:-<10}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        cw = CATEGORY_WIDTH,
    ));

    for goal in goals {
        output.push_str(&format!(
            "{:>5}  {:<7}  {:<cw$}  {:>14}  {}  {}\n",
            goal.id,
            goal.kind.to_string(),
            truncate(&goal.category, CATEGORY_WIDTH),
            money(goal.amount, symbol),
            goal.start_date.format("%Y-%m-%d"),
            goal.end_date.format("%Y-%m-%d"),
            cw = CATEGORY_WIDTH,
        ));
    }

    output
}

pub fn format_goal_details(goal: &Goal, symbol: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("Goal #{} ({})\n", goal.id, goal.kind));
    output.push_str(&format!("  Category:    {}\n", goal.category));
    output.push_str(&format!("  Amount:      {}\n", money(goal.amount, symbol)));
    output.push_str(&format!(
        "  Dates:       {} to {}\n",
        goal.start_date.format("%Y-%m-%d"),
        goal.end_date.format("%Y-%m-%d")
    ));
    if let Some(description) = &goal.description {
        output.push_str(&format!("  Description: {}\n", description));
    }
    output
}
