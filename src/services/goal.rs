//! Goal service layer
//!
//! Creates, updates and deletes savings and budget goals, and purges goals
//! whose end date has passed.

use chrono::NaiveDate;
use tracing::info;

use crate::audit::EntityType;
use crate::error::{FinTrackError, FinTrackResult};
use crate::models::period::end_of_previous_month;
use crate::models::{Goal, GoalKind, Money, RecordId, UserId};
use crate::storage::Storage;

/// Fields for a new goal
#[derive(Debug, Clone)]
pub struct GoalFields {
    pub category: String,
    pub kind: GoalKind,
    pub amount: Money,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub description: Option<String>,
}

/// Partial goal update; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct GoalUpdate {
    pub category: Option<String>,
    pub kind: Option<GoalKind>,
    pub amount: Option<Money>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub description: Option<String>,
}

impl GoalUpdate {
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.kind.is_none()
            && self.amount.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.description.is_none()
    }
}

/// Service for goal management
pub struct GoalService<'a> {
    storage: &'a Storage,
}

impl<'a> GoalService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn create(&self, user: UserId, fields: GoalFields) -> FinTrackResult<Goal> {
        let mut goal = Goal::new(
            RecordId::new(0),
            fields.category.trim(),
            fields.kind,
            fields.amount,
            fields.start_date,
            fields.end_date,
        )
        .with_user(user);
        if let Some(description) = fields.description.filter(|d| !d.trim().is_empty()) {
            goal = goal.with_description(description);
        }

        goal.validate()
            .map_err(|e| FinTrackError::Validation(e.to_string()))?;

        let goal = self.storage.goals.insert(goal)?;
        self.storage.goals.save()?;

        self.storage
            .log_create(EntityType::Goal, goal.id, Some(user), &goal.category, &goal)?;

        Ok(goal)
    }

    pub fn list(&self, user: UserId) -> FinTrackResult<Vec<Goal>> {
        self.storage.goals.list_for_user(user)
    }

    pub fn list_savings(&self, user: UserId) -> FinTrackResult<Vec<Goal>> {
        Ok(self
            .list(user)?
            .into_iter()
            .filter(Goal::is_savings)
            .collect())
    }

    pub fn list_budgets(&self, user: UserId) -> FinTrackResult<Vec<Goal>> {
        Ok(self
            .list(user)?
            .into_iter()
            .filter(Goal::is_budget)
            .collect())
    }

    pub fn get(&self, user: UserId, id: RecordId) -> FinTrackResult<Goal> {
        self.storage
            .goals
            .get(id)?
            .filter(|goal| goal.user_id == Some(user))
            .ok_or_else(|| FinTrackError::goal_not_found(id.to_string()))
    }

    pub fn update(&self, user: UserId, id: RecordId, update: GoalUpdate) -> FinTrackResult<Goal> {
        if update.is_empty() {
            return Err(FinTrackError::Validation("Nothing to update".into()));
        }

        let mut goal = self.get(user, id)?;
        let before = goal.clone();

        if let Some(category) = update.category {
            goal.category = category.trim().to_string();
        }
        if let Some(kind) = update.kind {
            goal.kind = kind;
        }
        if let Some(amount) = update.amount {
            goal.amount = amount;
        }
        if let Some(start_date) = update.start_date {
            goal.start_date = start_date;
        }
        if let Some(end_date) = update.end_date {
            goal.end_date = end_date;
        }
        if let Some(description) = update.description {
            goal.description = if description.trim().is_empty() {
                None
            } else {
                Some(description)
            };
        }

        goal.validate()
            .map_err(|e| FinTrackError::Validation(e.to_string()))?;

        self.storage.goals.update(goal.clone())?;
        self.storage.goals.save()?;

        self.storage.log_update(
            EntityType::Goal,
            id,
            Some(user),
            &goal.category,
            &before,
            &goal,
        )?;

        Ok(goal)
    }

    /// Delete the listed goals the user owns; returns how many were removed
    pub fn delete(&self, user: UserId, ids: &[RecordId]) -> FinTrackResult<usize> {
        let owned: Vec<RecordId> = ids
            .iter()
            .copied()
            .filter(|id| self.get(user, *id).is_ok())
            .collect();

        let removed = self.storage.goals.delete_many(&owned)?;
        if removed.is_empty() {
            return Ok(0);
        }

        self.storage.goals.save()?;
        self.storage.log_deletes(EntityType::Goal, &removed)?;
        Ok(removed.len())
    }

    /// Goals that ended on or before the last day of the previous month
    pub fn expired(&self, user: UserId, today: NaiveDate) -> FinTrackResult<Vec<Goal>> {
        let cutoff = end_of_previous_month(today);
        Ok(self
            .list(user)?
            .into_iter()
            .filter(|goal| goal.ended_by(cutoff))
            .collect())
    }

    /// Delete every expired goal; returns the removed goals
    pub fn purge_expired(&self, user: UserId, today: NaiveDate) -> FinTrackResult<Vec<Goal>> {
        let ids: Vec<RecordId> = self.expired(user, today)?.iter().map(|g| g.id).collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let removed = self.storage.goals.delete_many(&ids)?;
        self.storage.goals.save()?;
        self.storage.log_deletes(EntityType::Goal, &removed)?;

        info!(user = %user, count = removed.len(), "purged expired goals");
        Ok(removed)
    }
}
