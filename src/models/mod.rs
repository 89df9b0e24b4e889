//! Core data models for fintrack
//!
//! Incomes, expenses and goals, plus the value types they are built from:
//! money amounts, reporting periods and integer ids.

pub mod entry;
pub mod goal;
pub mod ids;
pub mod money;
pub mod period;
pub mod record;

pub use entry::{EntryValidationError, Expense, Income};
pub use goal::{Goal, GoalKind, GoalValidationError};
pub use ids::{RecordId, UserId};
pub use money::Money;
pub use period::Period;
pub use record::{Record, Records};
