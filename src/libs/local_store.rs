//! Single-machine storage: an employee roster and a record list kept as two
//! JSON blobs.
//!
//! In this variant the employee name is the only identity, so it doubles as
//! the record's `user_id`. The whole dataset is loaded on open and written back
//! after every mutation.

use crate::libs::data_storage::DataStorage;
use crate::libs::error::ClockError;
use crate::libs::record::{RecordQuery, TimeRecord};
use crate::libs::store::{sort_newest_first, RecordStore};
use crate::msg_debug;
use anyhow::Result;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const EMPLOYEES_BLOB: &str = "employees";
pub const RECORDS_BLOB: &str = "time_records";

/// Named text blobs, the only thing the local store needs from persistence.
pub trait BlobStorage {
    fn load(&self, name: &str) -> Result<Option<String>>;
    fn save(&mut self, name: &str, contents: &str) -> Result<()>;
    fn remove(&mut self, name: &str) -> Result<()>;
}

/// Blobs as `<name>.json` files inside a directory.
#[derive(Debug, Clone)]
pub struct FileBlobStorage {
    dir: PathBuf,
}

impl FileBlobStorage {
    /// Uses the application data directory.
    pub fn new() -> Result<Self> {
        let dir = DataStorage::new().dir()?;
        Ok(Self { dir })
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self { dir: dir.to_path_buf() }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", name))
    }
}

impl BlobStorage for FileBlobStorage {
    fn load(&self, name: &str) -> Result<Option<String>> {
        let path = self.path(name);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn save(&mut self, name: &str, contents: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(name), contents)?;
        Ok(())
    }

    fn remove(&mut self, name: &str) -> Result<()> {
        let path = self.path(name);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStorage {
    blobs: HashMap<String, String>,
}

impl BlobStorage for MemoryBlobStorage {
    fn load(&self, name: &str) -> Result<Option<String>> {
        Ok(self.blobs.get(name).cloned())
    }

    fn save(&mut self, name: &str, contents: &str) -> Result<()> {
        self.blobs.insert(name.to_string(), contents.to_string());
        Ok(())
    }

    fn remove(&mut self, name: &str) -> Result<()> {
        self.blobs.remove(name);
        Ok(())
    }
}

pub struct LocalStore<S: BlobStorage> {
    storage: S,
    employees: Vec<String>,
    records: Vec<TimeRecord>,
}

impl<S: BlobStorage> LocalStore<S> {
    pub fn open(storage: S) -> Result<Self> {
        let employees = match storage.load(EMPLOYEES_BLOB)? {
            Some(json) => serde_json::from_str(&json)?,
            None => Vec::new(),
        };
        let records = match storage.load(RECORDS_BLOB)? {
            Some(json) => serde_json::from_str(&json)?,
            None => Vec::new(),
        };
        Ok(Self {
            storage,
            employees,
            records,
        })
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    pub fn employees(&self) -> &[String] {
        &self.employees
    }

    /// Registers a trimmed, non-empty, not yet registered name.
    pub fn add_employee(&mut self, name: &str) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ClockError::EmptyEmployeeName.into());
        }
        if self.employees.iter().any(|e| e == name) {
            return Err(ClockError::DuplicateEmployee(name.to_string()).into());
        }
        self.employees.push(name.to_string());
        self.save_employees()?;
        Ok(name.to_string())
    }

    /// Drops the name from the roster. Their records stay.
    pub fn remove_employee(&mut self, name: &str) -> Result<()> {
        let before = self.employees.len();
        self.employees.retain(|e| e != name);
        if self.employees.len() == before {
            return Err(ClockError::UnknownEmployee(name.to_string()).into());
        }
        self.save_employees()
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.employees.iter().any(|e| e == name)
    }

    fn save_employees(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.employees)?;
        self.storage.save(EMPLOYEES_BLOB, &json)
    }

    fn save_records(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.records)?;
        msg_debug!(format!("Saving {} local time records", self.records.len()));
        self.storage.save(RECORDS_BLOB, &json)
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| ClockError::RecordNotFound(id.to_string()).into())
    }
}

impl<S: BlobStorage> RecordStore for LocalStore<S> {
    fn find_day(&mut self, user_id: &str, date: NaiveDate) -> Result<Option<TimeRecord>> {
        Ok(self.records.iter().find(|r| r.user_id == user_id && r.date == date).cloned())
    }

    fn get(&mut self, id: &str) -> Result<Option<TimeRecord>> {
        Ok(self.records.iter().find(|r| r.id == id).cloned())
    }

    fn insert(&mut self, record: &TimeRecord) -> Result<()> {
        self.records.insert(0, record.clone());
        self.save_records()
    }

    fn update(&mut self, record: &TimeRecord) -> Result<()> {
        let index = self.position(&record.id)?;
        self.records[index] = record.clone();
        self.save_records()
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        let index = self.position(id)?;
        self.records.remove(index);
        self.save_records()
    }

    fn fetch(&mut self, query: &RecordQuery) -> Result<Vec<TimeRecord>> {
        let mut records: Vec<TimeRecord> = self.records.iter().filter(|r| query.matches(r)).cloned().collect();
        sort_newest_first(&mut records);
        Ok(records)
    }

    /// Wipes records and the roster alike.
    fn clear(&mut self) -> Result<usize> {
        let count = self.records.len();
        self.records.clear();
        self.employees.clear();
        self.storage.remove(EMPLOYEES_BLOB)?;
        self.storage.remove(RECORDS_BLOB)?;
        Ok(count)
    }

    fn employee_names(&mut self) -> Result<Vec<String>> {
        let mut names = self.employees.clone();
        for record in &self.records {
            if !names.contains(&record.employee_name) {
                names.push(record.employee_name.clone());
            }
        }
        names.sort();
        Ok(names)
    }
}
