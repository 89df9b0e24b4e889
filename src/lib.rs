//! fintrack - personal income, expense and goal tracking
//!
//! This library provides the core of the fintrack dashboard: a pure
//! aggregation engine over dated, categorized amounts, plus the storage,
//! services and reports that feed it one user's records.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `aggregate`: Aggregation engine (filters, sums, grouping, percent change, goal progress)
//! - `models`: Core data models (incomes, expenses, goals, money, periods)
//! - `storage`: JSON file storage layer
//! - `services`: Validation and user scoping around storage
//! - `reports`: Dashboard, savings, goals and comparison reports
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//! - `config`: Configuration and path management
//! - `audit`: Audit logging system
//! - `logging`: Diagnostic log setup
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use fintrack::aggregate::{percent_change, sum_amounts, sum_by_category};
//! use fintrack::models::{Expense, Money, RecordId};
//!
//! let day = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
//! let expenses = vec![
//!     Expense::new(RecordId::new(1), "rent", Money::from_units(300), day),
//!     Expense::new(RecordId::new(2), "food", Money::from_units(50), day),
//! ];
//!
//! assert_eq!(sum_amounts(&expenses), Money::from_units(350));
//! assert_eq!(sum_by_category(&expenses).get("rent"), Some(Money::from_units(300)));
//! assert_eq!(percent_change(Money::from_units(350), Money::from_units(280)), "+25.0%");
//! ```

pub mod aggregate;
pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{FinTrackError, FinTrackResult};
