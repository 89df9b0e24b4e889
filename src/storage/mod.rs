//! Storage layer for fintrack
//!
//! Local JSON files stand in for the REST backend: one array file per
//! record kind, atomic writes, and an audit trail of every change.

pub mod file_io;
pub mod records;

pub use file_io::{read_records, write_json_atomic};
pub use records::{RecordRepository, StoredRecord};

use serde::Serialize;
use tracing::info;

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::config::paths::FinTrackPaths;
use crate::error::FinTrackError;
use crate::models::{Expense, Goal, Income, RecordId, UserId};

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: FinTrackPaths,
    pub incomes: RecordRepository<Income>,
    pub expenses: RecordRepository<Expense>,
    pub goals: RecordRepository<Goal>,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance, creating directories as needed
    pub fn new(paths: FinTrackPaths) -> Result<Self, FinTrackError> {
        paths.ensure_directories()?;

        Ok(Self {
            incomes: RecordRepository::new(paths.incomes_file()),
            expenses: RecordRepository::new(paths.expenses_file()),
            goals: RecordRepository::new(paths.goals_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &FinTrackPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), FinTrackError> {
        self.incomes.load()?;
        self.expenses.load()?;
        self.goals.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), FinTrackError> {
        self.incomes.save()?;
        self.expenses.save()?;
        self.goals.save()?;
        Ok(())
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        id: RecordId,
        user: Option<UserId>,
        category: &str,
        entity: &T,
    ) -> Result<(), FinTrackError> {
        info!(%entity_type, %id, category, "created");
        let entry = AuditEntry::create(entity_type, id, entity)
            .for_user(user)
            .with_category(category);
        self.audit.log(&entry)
    }

    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        id: RecordId,
        user: Option<UserId>,
        category: &str,
        before: &T,
        after: &T,
    ) -> Result<(), FinTrackError> {
        let diff = match (serde_json::to_value(before), serde_json::to_value(after)) {
            (Ok(b), Ok(a)) => generate_diff(&b, &a),
            _ => None,
        };
        info!(%entity_type, %id, changes = diff.as_deref().unwrap_or("none"), "updated");

        let entry = AuditEntry::update(entity_type, id, before, after, diff)
            .for_user(user)
            .with_category(category);
        self.audit.log(&entry)
    }

    /// Record one delete entry per removed record
    pub fn log_deletes<T: StoredRecord + crate::models::Record>(
        &self,
        entity_type: EntityType,
        removed: &[T],
    ) -> Result<(), FinTrackError> {
        let entries: Vec<AuditEntry> = removed
            .iter()
            .map(|r| {
                info!(%entity_type, id = %r.id(), "deleted");
                AuditEntry::delete(entity_type, r.id(), r)
                    .for_user(r.user_id())
                    .with_category(r.category())
            })
            .collect();
        self.audit.log_batch(&entries)
    }

    /// Check if storage has been initialized (settings saved)
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::models::Money;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinTrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_storage_creation() {
        let (temp_dir, storage) = create_test_storage();
        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_save_and_load_all() {
        let (temp_dir, storage) = create_test_storage();
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        storage
            .incomes
            .insert(Income::new(RecordId::new(0), "salary", Money::from_units(1000), date))
            .unwrap();
        storage.save_all().unwrap();

        let reopened =
            Storage::new(FinTrackPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        reopened.load_all().unwrap();
        assert_eq!(reopened.incomes.count().unwrap(), 1);
        assert_eq!(reopened.goals.count().unwrap(), 0);
    }

    #[test]
    fn test_audit_helpers() {
        let (_temp, storage) = create_test_storage();
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let before = Expense::new(RecordId::new(1), "rent", Money::from_units(300), date)
            .with_user(UserId::new(1));
        let mut after = before.clone();
        after.amount = Money::from_units(325);

        storage
            .log_create(EntityType::Expense, before.id, before.user_id, "rent", &before)
            .unwrap();
        storage
            .log_update(EntityType::Expense, after.id, after.user_id, "rent", &before, &after)
            .unwrap();
        storage
            .log_deletes(EntityType::Expense, std::slice::from_ref(&after))
            .unwrap();

        let entries = storage.audit().read_all().unwrap();
        let ops: Vec<Operation> = entries.iter().map(|e| e.operation).collect();
        assert_eq!(ops, vec![Operation::Create, Operation::Update, Operation::Delete]);
        assert_eq!(entries[1].diff_summary.as_deref(), Some("amount: 300.0 -> 325.0"));
        assert_eq!(entries[2].user_id, Some(UserId::new(1)));
    }
}
