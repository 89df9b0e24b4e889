//! Income and expense entries
//!
//! Both kinds share one shape: `{id, userId, category, amount, date,
//! description?}`. They are distinct types so an expense can never be summed
//! into an income total by accident.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::{RecordId, UserId};
use super::money::Money;
use super::record::Record;

/// Validation errors for income and expense entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValidationError {
    EmptyCategory,
    NegativeAmount,
}

impl std::fmt::Display for EntryValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCategory => write!(f, "Category cannot be empty"),
            Self::NegativeAmount => write!(f, "Amount cannot be negative"),
        }
    }
}

impl std::error::Error for EntryValidationError {}

/// Macro to generate the income and expense entry types
macro_rules! define_entry {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            pub id: RecordId,

            /// Owning user; optional on input payloads
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub user_id: Option<UserId>,

            pub category: String,

            #[serde(with = "crate::models::money::decimal")]
            pub amount: Money,

            pub date: NaiveDate,

            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub description: Option<String>,
        }

        impl $name {
            /// Lowercase kind name used in labels ("income" / "expense")
            pub const KIND: &'static str = $kind;

            pub fn new(
                id: RecordId,
                category: impl Into<String>,
                amount: Money,
                date: NaiveDate,
            ) -> Self {
                Self {
                    id,
                    user_id: None,
                    category: category.into(),
                    amount,
                    date,
                    description: None,
                }
            }

            pub fn with_user(mut self, user_id: UserId) -> Self {
                self.user_id = Some(user_id);
                self
            }

            pub fn with_description(mut self, description: impl Into<String>) -> Self {
                self.description = Some(description.into());
                self
            }

            /// Description, or "<category> <kind>" when none was given
            pub fn display_description(&self) -> String {
                match &self.description {
                    Some(d) if !d.trim().is_empty() => d.clone(),
                    _ => format!("{} {}", self.category, Self::KIND),
                }
            }

            pub fn validate(&self) -> Result<(), EntryValidationError> {
                if self.category.trim().is_empty() {
                    return Err(EntryValidationError::EmptyCategory);
                }
                if self.amount.is_negative() {
                    return Err(EntryValidationError::NegativeAmount);
                }
                Ok(())
            }
        }

        impl Record for $name {
            fn category(&self) -> &str {
                &self.category
            }

            fn amount(&self) -> Money {
                self.amount
            }

            fn date(&self) -> NaiveDate {
                self.date
            }

            fn description(&self) -> Option<&str> {
                self.description.as_deref()
            }
        }
    };
}

define_entry!(
    /// Money received: salary, freelance work, interest
    Income,
    "income"
);

define_entry!(
    /// Money spent: rent, groceries, utilities
    Expense,
    "expense"
);

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_wire_shape() {
        let json = r#"{"id":3,"userId":1,"category":"salary","amount":1000,"date":"2024-01-05"}"#;
        let income: Income = serde_json::from_str(json).unwrap();

        assert_eq!(income.id, RecordId::new(3));
        assert_eq!(income.user_id, Some(UserId::new(1)));
        assert_eq!(income.amount, Money::from_units(1000));
        assert_eq!(income.date, date(2024, 1, 5));
        assert!(income.description.is_none());

        let back = serde_json::to_value(&income).unwrap();
        assert_eq!(back["userId"], 1);
        assert_eq!(back["amount"], 1000.0);
        assert!(back.get("description").is_none());
    }

    #[test]
    fn test_display_description_defaults() {
        let expense = Expense::new(
            RecordId::new(1),
            "rent",
            Money::from_units(300),
            date(2024, 1, 10),
        );
        assert_eq!(expense.display_description(), "rent expense");

        let expense = expense.with_description("January rent");
        assert_eq!(expense.display_description(), "January rent");
    }

    #[test]
    fn test_validation() {
        let income = Income::new(
            RecordId::new(1),
            "salary",
            Money::from_units(10),
            date(2024, 1, 1),
        );
        assert!(income.validate().is_ok());

        let negative = Income::new(
            RecordId::new(1),
            "salary",
            Money::from_cents(-1),
            date(2024, 1, 1),
        );
        assert_eq!(negative.validate(), Err(EntryValidationError::NegativeAmount));

        let blank = Income::new(RecordId::new(1), "  ", Money::from_units(1), date(2024, 1, 1));
        assert_eq!(blank.validate(), Err(EntryValidationError::EmptyCategory));
    }

    #[test]
    fn test_record_trait() {
        let income = Income::new(
            RecordId::new(1),
            "salary",
            Money::from_units(10),
            date(2024, 1, 1),
        );
        let by_ref: &Income = &income;
        assert_eq!(Record::category(&by_ref), "salary");
        assert_eq!(Record::amount(&by_ref), Money::from_units(10));
    }
}
