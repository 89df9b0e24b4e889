//! Display formatting for terminal output
//!
//! Tables for incomes, expenses and goals, plus the money and percentage
//! helpers the reports share.

pub mod entry;
pub mod format;
pub mod goal;

pub use entry::{format_entry_details, format_entry_list};
pub use format::{
    double_separator, format_header, format_percentage, money, separator, signed_money, truncate,
};
pub use goal::{format_goal_details, format_goal_list};
