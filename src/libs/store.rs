//! Storage seam for time records.
//!
//! The time clock talks to persistence only through [`RecordStore`]. Two
//! implementations exist: the SQLite-backed [`TimeRecords`] and the JSON blob
//! backed [`LocalStore`].

use crate::db::time_records::TimeRecords;
use crate::libs::config::{Config, StorageBackend};
use crate::libs::local_store::{FileBlobStorage, LocalStore};
use crate::libs::record::{RecordQuery, TimeRecord};
use anyhow::Result;
use chrono::NaiveDate;

pub trait RecordStore {
    /// The record of `user_id` for `date`, if the day was started.
    fn find_day(&mut self, user_id: &str, date: NaiveDate) -> Result<Option<TimeRecord>>;

    fn get(&mut self, id: &str) -> Result<Option<TimeRecord>>;

    fn insert(&mut self, record: &TimeRecord) -> Result<()>;

    /// Replaces the stored record with the same id.
    fn update(&mut self, record: &TimeRecord) -> Result<()>;

    /// Hard delete.
    fn delete(&mut self, id: &str) -> Result<()>;

    /// Records matching `query`, newest date first, newest creation first.
    fn fetch(&mut self, query: &RecordQuery) -> Result<Vec<TimeRecord>>;

    /// Removes every record, returning how many were deleted.
    fn clear(&mut self) -> Result<usize>;

    /// Distinct employee names known to the store, sorted.
    fn employee_names(&mut self) -> Result<Vec<String>>;
}

/// Opens the store selected in the configuration.
pub fn open_store(config: &Config) -> Result<Box<dyn RecordStore>> {
    match config.backend() {
        StorageBackend::Database => Ok(Box::new(TimeRecords::new()?)),
        StorageBackend::Local => Ok(Box::new(LocalStore::open(FileBlobStorage::new()?)?)),
    }
}

/// Orders records the way every listing expects them.
pub(crate) fn sort_newest_first(records: &mut [TimeRecord]) {
    records.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
}
