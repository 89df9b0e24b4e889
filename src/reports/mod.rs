//! Reports module for fintrack
//!
//! Each report is a thin consumer of the aggregation engine: it pulls one
//! user's records through the services, hands them to the engine, and
//! formats the result for the terminal.

pub mod comparison;
pub mod dashboard;
pub mod goals;
pub mod savings;

pub use comparison::{ComparedTotal, ComparisonReport};
pub use dashboard::{DashboardReport, PeriodChanges};
pub use goals::{GoalsReport, SavingsGoalRow};
pub use savings::{SavingsReport, YearSummary};
