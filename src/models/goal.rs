//! Savings and budget goals
//!
//! A goal is either a savings target to reach by `end_date`, or a monthly
//! spending cap for one category. Progress on a goal is a time-based
//! projection; nothing in the data model records actual contributions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{RecordId, UserId};
use super::money::Money;
use super::record::Record;

/// What a goal's amount means
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GoalKind {
    /// Amount is a savings target
    Savings,
    /// Amount is a spending cap for the goal's category
    Budget,
}

impl GoalKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "savings" | "saving" => Some(Self::Savings),
            "budget" => Some(Self::Budget),
            _ => None,
        }
    }
}

impl fmt::Display for GoalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Savings => write!(f, "Savings"),
            Self::Budget => write!(f, "Budget"),
        }
    }
}

/// A savings or budget goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: RecordId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,

    pub category: String,

    #[serde(rename = "type")]
    pub kind: GoalKind,

    /// Target (savings) or cap (budget)
    #[serde(with = "crate::models::money::decimal")]
    pub amount: Money,

    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Goal {
    pub fn new(
        id: RecordId,
        category: impl Into<String>,
        kind: GoalKind,
        amount: Money,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            user_id: None,
            category: category.into(),
            kind,
            amount,
            start_date,
            end_date,
            description: None,
        }
    }

    pub fn savings(
        id: RecordId,
        category: impl Into<String>,
        amount: Money,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self::new(id, category, GoalKind::Savings, amount, start_date, end_date)
    }

    pub fn budget(
        id: RecordId,
        category: impl Into<String>,
        amount: Money,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self::new(id, category, GoalKind::Budget, amount, start_date, end_date)
    }

    pub fn with_user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_savings(&self) -> bool {
        self.kind == GoalKind::Savings
    }

    pub fn is_budget(&self) -> bool {
        self.kind == GoalKind::Budget
    }

    /// Whether the goal ended on or before `cutoff`
    pub fn ended_by(&self, cutoff: NaiveDate) -> bool {
        self.end_date <= cutoff
    }

    pub fn validate(&self) -> Result<(), GoalValidationError> {
        if self.category.trim().is_empty() {
            return Err(GoalValidationError::EmptyCategory);
        }
        if self.amount.is_negative() {
            return Err(GoalValidationError::NegativeAmount);
        }
        if self.end_date < self.start_date {
            return Err(GoalValidationError::EndBeforeStart {
                start: self.start_date,
                end: self.end_date,
            });
        }
        Ok(())
    }
}

impl Record for Goal {
    fn category(&self) -> &str {
        &self.category
    }

    fn amount(&self) -> Money {
        self.amount
    }

    fn date(&self) -> NaiveDate {
        self.start_date
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} goal for {} ({} to {})",
            self.kind, self.category, self.start_date, self.end_date
        )
    }
}

/// Validation errors for goals
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalValidationError {
    EmptyCategory,
    NegativeAmount,
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for GoalValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCategory => write!(f, "Category cannot be empty"),
            Self::NegativeAmount => write!(f, "Goal amount cannot be negative"),
            Self::EndBeforeStart { start, end } => {
                write!(f, "End date {} is before start date {}", end, start)
            }
        }
    }
}

impl std::error::Error for GoalValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_wire_shape() {
        let json = r#"{
            "id": 4,
            "userId": 2,
            "category": "vacation",
            "type": "Savings",
            "amount": 5000,
            "startDate": "2024-01-01",
            "endDate": "2024-12-31",
            "description": "Trip"
        }"#;
        let goal: Goal = serde_json::from_str(json).unwrap();

        assert_eq!(goal.kind, GoalKind::Savings);
        assert_eq!(goal.amount, Money::from_units(5000));
        assert_eq!(goal.end_date, date(2024, 12, 31));

        let back = serde_json::to_value(&goal).unwrap();
        assert_eq!(back["type"], "Savings");
        assert_eq!(back["startDate"], "2024-01-01");
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!(GoalKind::parse("savings"), Some(GoalKind::Savings));
        assert_eq!(GoalKind::parse("Budget"), Some(GoalKind::Budget));
        assert_eq!(GoalKind::parse("other"), None);
    }

    #[test]
    fn test_validation() {
        let goal = Goal::savings(
            RecordId::new(1),
            "car",
            Money::from_units(100),
            date(2024, 1, 1),
            date(2024, 6, 1),
        );
        assert!(goal.validate().is_ok());

        let mut inverted = goal.clone();
        inverted.end_date = date(2023, 12, 1);
        assert!(matches!(
            inverted.validate(),
            Err(GoalValidationError::EndBeforeStart { .. })
        ));

        let mut blank = goal;
        blank.category = String::new();
        assert_eq!(blank.validate(), Err(GoalValidationError::EmptyCategory));
    }

    #[test]
    fn test_record_date_is_start() {
        let goal = Goal::budget(
            RecordId::new(1),
            "food",
            Money::from_units(400),
            date(2024, 2, 1),
            date(2024, 2, 29),
        );
        assert_eq!(Record::date(&goal), date(2024, 2, 1));
        assert!(goal.ended_by(date(2024, 2, 29)));
        assert!(!goal.ended_by(date(2024, 2, 28)));
    }
}
