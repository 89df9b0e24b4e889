//! Generic repository for incomes, expenses and goals
//!
//! Each kind is stored as one JSON array, the same shape the list endpoint
//! of a REST backend returns. Ids are positive integers assigned on insert.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::error::FinTrackError;
use crate::models::{Expense, Goal, Income, RecordId, UserId};

use super::file_io::{read_records, write_json_atomic};

/// A record that can be stored by [`RecordRepository`]
pub trait StoredRecord: Clone + Serialize + DeserializeOwned {
    /// Name used in logs and errors
    const KIND: &'static str;

    fn id(&self) -> RecordId;
    fn set_id(&mut self, id: RecordId);
    fn user_id(&self) -> Option<UserId>;
}

macro_rules! impl_stored_record {
    ($ty:ty, $kind:literal) => {
        impl StoredRecord for $ty {
            const KIND: &'static str = $kind;

            fn id(&self) -> RecordId {
                self.id
            }

            fn set_id(&mut self, id: RecordId) {
                self.id = id;
            }

            fn user_id(&self) -> Option<UserId> {
                self.user_id
            }
        }
    };
}

impl_stored_record!(Income, "Income");
impl_stored_record!(Expense, "Expense");
impl_stored_record!(Goal, "Goal");

/// Repository for one record kind, backed by one JSON file
pub struct RecordRepository<T: StoredRecord> {
    path: PathBuf,
    records: RwLock<BTreeMap<RecordId, T>>,
}

impl<T: StoredRecord> RecordRepository<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            records: RwLock::new(BTreeMap::new()),
        }
    }

    fn read_lock(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, BTreeMap<RecordId, T>>, FinTrackError> {
        self.records
            .read()
            .map_err(|e| FinTrackError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write_lock(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, BTreeMap<RecordId, T>>, FinTrackError> {
        self.records
            .write()
            .map_err(|e| FinTrackError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load records from disk, replacing what is in memory
    pub fn load(&self) -> Result<(), FinTrackError> {
        let loaded = read_records::<T, _>(&self.path)?;
        let mut records = self.write_lock()?;

        records.clear();
        for record in loaded {
            records.insert(record.id(), record);
        }

        debug!(
            kind = T::KIND,
            count = records.len(),
            path = %self.path.display(),
            "loaded records"
        );
        Ok(())
    }

    /// Save records to disk, ordered by id
    pub fn save(&self) -> Result<(), FinTrackError> {
        let records = self.read_lock()?;
        let list: Vec<&T> = records.values().collect();
        write_json_atomic(&self.path, &list)?;

        debug!(kind = T::KIND, count = list.len(), "saved records");
        Ok(())
    }

    /// Every record owned by `user`, ordered by id
    ///
    /// Records without an owner are never returned.
    pub fn list_for_user(&self, user: UserId) -> Result<Vec<T>, FinTrackError> {
        let records = self.read_lock()?;
        Ok(records
            .values()
            .filter(|r| r.user_id() == Some(user))
            .cloned()
            .collect())
    }

    pub fn get(&self, id: RecordId) -> Result<Option<T>, FinTrackError> {
        let records = self.read_lock()?;
        Ok(records.get(&id).cloned())
    }

    /// Store a new record under the next free id and return it
    pub fn insert(&self, mut record: T) -> Result<T, FinTrackError> {
        let mut records = self.write_lock()?;

        let id = records
            .keys()
            .next_back()
            .map(|last| last.next())
            .unwrap_or(RecordId::new(1));
        record.set_id(id);
        records.insert(id, record.clone());

        Ok(record)
    }

    /// Replace an existing record; fails if the id is unknown
    pub fn update(&self, record: T) -> Result<(), FinTrackError> {
        let mut records = self.write_lock()?;
        let id = record.id();

        match records.get_mut(&id) {
            Some(slot) => {
                *slot = record;
                Ok(())
            }
            None => Err(FinTrackError::NotFound {
                entity_type: T::KIND,
                identifier: id.to_string(),
            }),
        }
    }

    /// Remove every listed id that exists; returns the removed records
    pub fn delete_many(&self, ids: &[RecordId]) -> Result<Vec<T>, FinTrackError> {
        let mut records = self.write_lock()?;
        Ok(ids.iter().filter_map(|id| records.remove(id)).collect())
    }

    pub fn count(&self) -> Result<usize, FinTrackError> {
        Ok(self.read_lock()?.len())
    }
}
