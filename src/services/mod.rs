//! Service layer for fintrack
//!
//! The service layer sits between the CLI and storage. It validates the
//! invariants the aggregation engine assumes, scopes every read and write
//! to one user, and records each change in the audit log.

pub mod entry;
pub mod goal;

pub use entry::{
    EntryFields, EntryService, EntryUpdate, ExpenseService, IncomeService, LedgerEntry,
};
pub use goal::{GoalFields, GoalService, GoalUpdate};
