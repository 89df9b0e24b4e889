//! Income and expense display formatting

use crate::models::{Money, Record};
use crate::storage::StoredRecord;

use super::format::{money, truncate};

const CATEGORY_WIDTH: usize = 16;
const DESCRIPTION_WIDTH: usize = 30;

/// Format a list of incomes or expenses as a table
///
/// `noun` names the kind in the empty-list message ("incomes", "expenses").
pub fn format_entry_list<T>(entries: &[T], noun: &str, symbol: &str) -> String
where
    T: StoredRecord + Record,
{
    if entries.is_empty() {
        return format!("No {} found.\n", noun);
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:>5}  {:10}  {:<cw$}  {:>14}  {}\n",
        "ID",
        "Date",
        "Category",
        "Amount",
        "Description",
        cw = CATEGORY_WIDTH,
    ));
    output.push_str(&format!(
        "{:->5}  {:-<10}  {:-<cw$}  {:->14}  {:-<11}\n",
        "",
        "",
        "",
        "",
        "",
        cw = CATEGORY_WIDTH,
    ));

    for entry in entries {
        output.push_str(&format!(
            "{:>5}  {}  {:<cw$}  {:>14}  {}\n",
            entry.id(),
            entry.date().format("%Y-%m-%d"),
            truncate(entry.category(), CATEGORY_WIDTH),
            money(entry.amount(), symbol),
            truncate(entry.description().unwrap_or(""), DESCRIPTION_WIDTH),
            cw = CATEGORY_WIDTH,
        ));
    }

    let total: Money = entries.iter().map(|e| e.amount()).sum();
    output.push_str(&format!(
        "\n{} {}, total {}\n",
        entries.len(),
        noun,
        money(total, symbol)
    ));

    output
}

/// Format one income or expense for display
pub fn format_entry_details<T>(entry: &T, symbol: &str) -> String
where
    T: StoredRecord + Record,
{
    let mut output = String::new();
    output.push_str(&format!("{} #{}\n", T::KIND, entry.id()));
    output.push_str(&format!("  Date:        {}\n", entry.date().format("%Y-%m-%d")));
    output.push_str(&format!("  Category:    {}\n", entry.category()));
    output.push_str(&format!("  Amount:      {}\n", money(entry.amount(), symbol)));
    if let Some(description) = entry.description() {
        output.push_str(&format!("  Description: {}\n", description));
    }
    output
}
