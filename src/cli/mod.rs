//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod goal;
pub mod ledger;
pub mod report;

pub use goal::{handle_goal_command, GoalCommands};
pub use ledger::{handle_entry_command, EntryCommands};
pub use report::{handle_report_command, ReportCommands};

use chrono::NaiveDate;

use crate::config::settings::Settings;
use crate::error::{FinTrackError, FinTrackResult};
use crate::models::{Money, Period, UserId};
use crate::storage::Storage;

/// Everything a command handler needs besides its arguments
pub struct CommandContext<'a> {
    pub storage: &'a Storage,
    pub settings: &'a Settings,
    /// User the command acts for
    pub user: UserId,
    /// Reference date for defaults, goal progress and purges
    pub today: NaiveDate,
}

impl CommandContext<'_> {
    pub fn symbol(&self) -> &str {
        &self.settings.currency_symbol
    }
}

pub(crate) fn parse_money(input: &str) -> FinTrackResult<Money> {
    Money::parse(input).map_err(|e| {
        FinTrackError::Validation(format!(
            "Invalid amount '{}': {}. Use a format like '1250.50' or '1250'",
            input, e
        ))
    })
}

pub(crate) fn parse_date(input: &str) -> FinTrackResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        FinTrackError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", input))
    })
}

pub(crate) fn parse_period(input: &str) -> FinTrackResult<Period> {
    Period::parse(input).map_err(|e| FinTrackError::Period(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_money() {
        assert_eq!(parse_money("1250.50").unwrap(), Money::from_cents(125050));
        assert!(parse_money("abc").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(parse_date("2023-02-29").is_err());
        assert!(parse_date("02/03/2024").is_err());
    }

    #[test]
    fn test_parse_period() {
        assert_eq!(parse_period("2024-03").unwrap(), Period::month(2024, 3));
        assert_eq!(parse_period("all").unwrap(), Period::All);
        assert!(matches!(parse_period("2024-13"), Err(FinTrackError::Period(_))));
    }
}
