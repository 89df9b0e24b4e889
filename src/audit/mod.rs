//! Audit logging for fintrack
//!
//! Every create, update and delete of an income, expense or goal is appended
//! to `audit.log` as one JSON line with the record's before/after values.
//!
//! - `AuditEntry`: one change, with timestamp, operation and record id
//! - `AuditLogger`: JSONL writer and reader
//! - `generate_diff`: readable summary of what an update changed

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
