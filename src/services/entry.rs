//! Income and expense service
//!
//! Both kinds go through the same create/list/update/delete flow, so the
//! service is generic over [`LedgerEntry`]. Every call names the user
//! explicitly; a record owned by someone else is reported as not found.

use std::marker::PhantomData;

use chrono::NaiveDate;

use crate::aggregate::filter_by_period;
use crate::audit::EntityType;
use crate::error::{FinTrackError, FinTrackResult};
use crate::models::{Expense, Income, Money, Period, Record, RecordId, UserId};
use crate::storage::{RecordRepository, Storage, StoredRecord};

/// An income or expense as seen by the service layer
pub trait LedgerEntry: StoredRecord + Record {
    const ENTITY: EntityType;

    fn repository(storage: &Storage) -> &RecordRepository<Self>;

    fn build(user: UserId, fields: EntryFields) -> Self;

    fn apply(&mut self, update: EntryUpdate);

    fn check(&self) -> FinTrackResult<()>;

    fn not_found(id: RecordId) -> FinTrackError;
}

/// Fields for a new income or expense
#[derive(Debug, Clone)]
pub struct EntryFields {
    pub category: String,
    pub amount: Money,
    pub date: NaiveDate,
    pub description: Option<String>,
}

/// Partial update; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct EntryUpdate {
    pub category: Option<String>,
    pub amount: Option<Money>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
}

impl EntryUpdate {
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.amount.is_none()
            && self.date.is_none()
            && self.description.is_none()
    }
}

macro_rules! impl_ledger_entry {
    ($ty:ident, $entity:ident, $repo:ident, $not_found:ident) => {
        impl LedgerEntry for $ty {
            const ENTITY: EntityType = EntityType::$entity;

            fn repository(storage: &Storage) -> &RecordRepository<Self> {
                &storage.$repo
            }

            fn build(user: UserId, fields: EntryFields) -> Self {
                let entry = $ty::new(
                    RecordId::new(0),
                    fields.category.trim(),
                    fields.amount,
                    fields.date,
                )
                .with_user(user);
                match fields.description {
                    Some(d) if !d.trim().is_empty() => entry.with_description(d),
                    _ => entry,
                }
            }

            fn apply(&mut self, update: EntryUpdate) {
                if let Some(category) = update.category {
                    self.category = category.trim().to_string();
                }
                if let Some(amount) = update.amount {
                    self.amount = amount;
                }
                if let Some(date) = update.date {
                    self.date = date;
                }
                if let Some(description) = update.description {
                    self.description = if description.trim().is_empty() {
                        None
                    } else {
                        Some(description)
                    };
                }
            }

            fn check(&self) -> FinTrackResult<()> {
                self.validate()
                    .map_err(|e| FinTrackError::Validation(e.to_string()))
            }

            fn not_found(id: RecordId) -> FinTrackError {
                FinTrackError::$not_found(id.to_string())
            }
        }
    };
}

impl_ledger_entry!(Income, Income, incomes, income_not_found);
impl_ledger_entry!(Expense, Expense, expenses, expense_not_found);

/// Service for one ledger kind
pub struct EntryService<'a, T: LedgerEntry> {
    storage: &'a Storage,
    kind: PhantomData<T>,
}

pub type IncomeService<'a> = EntryService<'a, Income>;
pub type ExpenseService<'a> = EntryService<'a, Expense>;

impl<'a, T: LedgerEntry> EntryService<'a, T> {
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            kind: PhantomData,
        }
    }

    fn repo(&self) -> &RecordRepository<T> {
        T::repository(self.storage)
    }

    /// Validate and store a new entry
    pub fn create(&self, user: UserId, fields: EntryFields) -> FinTrackResult<T> {
        let entry = T::build(user, fields);
        entry.check()?;

        let entry = self.repo().insert(entry)?;
        self.repo().save()?;

        self.storage.log_create(
            T::ENTITY,
            entry.id(),
            Some(user),
            entry.category(),
            &entry,
        )?;

        Ok(entry)
    }

    /// All of a user's entries, ordered by id
    pub fn list(&self, user: UserId) -> FinTrackResult<Vec<T>> {
        self.repo().list_for_user(user)
    }

    /// A user's entries dated within `period`
    pub fn list_in_period(&self, user: UserId, period: Period) -> FinTrackResult<Vec<T>> {
        Ok(filter_by_period(self.list(user)?, period))
    }

    pub fn get(&self, user: UserId, id: RecordId) -> FinTrackResult<T> {
        self.repo()
            .get(id)?
            .filter(|entry| entry.user_id() == Some(user))
            .ok_or_else(|| T::not_found(id))
    }

    pub fn update(&self, user: UserId, id: RecordId, update: EntryUpdate) -> FinTrackResult<T> {
        if update.is_empty() {
            return Err(FinTrackError::Validation("Nothing to update".into()));
        }

        let mut entry = self.get(user, id)?;
        let before = entry.clone();
        entry.apply(update);
        entry.check()?;

        self.repo().update(entry.clone())?;
        self.repo().save()?;

        self.storage.log_update(
            T::ENTITY,
            id,
            Some(user),
            entry.category(),
            &before,
            &entry,
        )?;

        Ok(entry)
    }

    /// Delete the listed entries the user owns; returns how many were removed
    ///
    /// Unknown ids and ids owned by other users are skipped.
    pub fn delete(&self, user: UserId, ids: &[RecordId]) -> FinTrackResult<usize> {
        let owned: Vec<RecordId> = ids
            .iter()
            .copied()
            .filter(|id| self.get(user, *id).is_ok())
            .collect();

        let removed = self.repo().delete_many(&owned)?;
        if removed.is_empty() {
            return Ok(0);
        }

        self.repo().save()?;
        self.storage.log_deletes(T::ENTITY, &removed)?;
        Ok(removed.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::paths::FinTrackPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinTrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn fields(category: &str, units: i64, date: &str) -> EntryFields {
        EntryFields {
            category: category.to_string(),
            amount: Money::from_units(units),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            description: None,
        }
    }

    const ALICE: UserId = UserId::new(1);
    const BOB: UserId = UserId::new(2);

    #[test]
    fn test_create_income() {
        let (_temp_dir, storage) = create_test_storage();
        let service = IncomeService::new(&storage);

        let income = service
            .create(ALICE, fields("  salary ", 1000, "2024-01-05"))
            .unwrap();

        assert_eq!(income.id, RecordId::new(1));
        assert_eq!(income.category, "salary");
        assert_eq!(income.user_id, Some(ALICE));
        assert_eq!(service.list(ALICE).unwrap().len(), 1);
    }

    #[test]
    fn test_create_rejects_invalid() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let result = service.create(ALICE, fields("", 10, "2024-01-05"));
        assert!(matches!(result, Err(FinTrackError::Validation(_))));

        let mut negative = fields("rent", 0, "2024-01-05");
        negative.amount = Money::from_cents(-1);
        assert!(service.create(ALICE, negative).unwrap_err().is_validation());
        assert!(service.list(ALICE).unwrap().is_empty());
    }

    #[test]
    fn test_users_are_isolated() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let alices = service.create(ALICE, fields("rent", 300, "2024-01-10")).unwrap();
        service.create(BOB, fields("rent", 500, "2024-01-10")).unwrap();

        assert_eq!(service.list(ALICE).unwrap().len(), 1);
        assert!(service.get(BOB, alices.id).unwrap_err().is_not_found());
        assert_eq!(service.delete(BOB, &[alices.id]).unwrap(), 0);
        assert_eq!(service.list(ALICE).unwrap().len(), 1);
    }

    #[test]
    fn test_list_in_period() {
        let (_temp_dir, storage) = create_test_storage();
        let service = IncomeService::new(&storage);
        service.create(ALICE, fields("salary", 1000, "2024-01-05")).unwrap();
        service.create(ALICE, fields("salary", 1000, "2024-02-05")).unwrap();

        let january = service.list_in_period(ALICE, Period::month(2024, 1)).unwrap();
        assert_eq!(january.len(), 1);
        assert_eq!(service.list_in_period(ALICE, Period::All).unwrap().len(), 2);
    }

    #[test]
    fn test_update_entry() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let created = service.create(ALICE, fields("rent", 300, "2024-01-10")).unwrap();

        let updated = service
            .update(
                ALICE,
                created.id,
                EntryUpdate {
                    amount: Some(Money::from_units(325)),
                    description: Some("January rent".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.amount, Money::from_units(325));
        assert_eq!(updated.description.as_deref(), Some("January rent"));

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.last().unwrap().operation, Operation::Update);
        assert!(entries
            .last()
            .unwrap()
            .diff_summary
            .as_deref()
            .unwrap()
            .contains("amount: 300.0 -> 325.0"));
    }

    #[test]
    fn test_update_nothing_or_invalid() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let created = service.create(ALICE, fields("rent", 300, "2024-01-10")).unwrap();

        assert!(service
            .update(ALICE, created.id, EntryUpdate::default())
            .unwrap_err()
            .is_validation());

        let blank = EntryUpdate {
            category: Some("   ".into()),
            ..Default::default()
        };
        assert!(service.update(ALICE, created.id, blank).unwrap_err().is_validation());
        assert_eq!(service.get(ALICE, created.id).unwrap().category, "rent");
    }

    #[test]
    fn test_delete_many() {
        let (_temp_dir, storage) = create_test_storage();
        let service = IncomeService::new(&storage);
        let a = service.create(ALICE, fields("salary", 1000, "2024-01-05")).unwrap();
        let b = service.create(ALICE, fields("bonus", 100, "2024-01-06")).unwrap();
        service.create(ALICE, fields("interest", 5, "2024-01-07")).unwrap();

        let removed = service
            .delete(ALICE, &[a.id, b.id, RecordId::new(77)])
            .unwrap();
        assert_eq!(removed, 2);
        assert_eq!(service.list(ALICE).unwrap().len(), 1);

        let deletes = storage
            .audit()
            .read_all()
            .unwrap()
            .into_iter()
            .filter(|e| e.operation == Operation::Delete)
            .count();
        assert_eq!(deletes, 2);
    }
}
