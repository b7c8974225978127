//! Administrative operations: edit, delete, manual insert and clear.
//!
//! Every operation is guarded by [`AdminGate`], a shared passphrase checked on
//! this machine. It keeps casual users away from other people's records; it
//! is not an access-control boundary.

use crate::libs::error::ClockError;
use crate::libs::hours::LunchPolicy;
use crate::libs::messages::Message;
use crate::libs::record::{DayTimes, TimeRecord};
use crate::libs::secret::Secret;
use crate::libs::store::RecordStore;
use crate::msg_debug;
use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};

pub const ADMIN_SECRET_FILE: &str = ".admin_passphrase";

pub struct AdminGate {
    secret: Secret,
}

impl AdminGate {
    pub fn new() -> Self {
        Self {
            secret: Secret::new(ADMIN_SECRET_FILE, &Message::PromptAdminPassphrase.to_string()),
        }
    }

    pub fn with_secret(secret: Secret) -> Self {
        Self { secret }
    }

    pub fn is_configured(&self) -> bool {
        self.secret.exists()
    }

    pub fn set_passphrase(&self, passphrase: &str) -> Result<()> {
        self.secret.store(passphrase)
    }

    /// Prompts for a new passphrase and stores it.
    pub fn setup(&self) -> Result<()> {
        self.secret.prompt_new()?;
        Ok(())
    }

    pub fn verify(&self, input: &str) -> Result<()> {
        match self.secret.read()? {
            None => Err(ClockError::AdminNotConfigured.into()),
            Some(expected) if expected == input => Ok(()),
            Some(_) => Err(ClockError::AdminDenied.into()),
        }
    }

    /// Prompts for the passphrase and verifies it.
    pub fn authorize(&self) -> Result<()> {
        if !self.is_configured() {
            return Err(ClockError::AdminNotConfigured.into());
        }
        let input = self.secret.ask()?;
        self.verify(&input)
    }
}

impl Default for AdminGate {
    fn default() -> Self {
        Self::new()
    }
}

/// Fields an administrator may change on an existing record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordEdit {
    pub date: NaiveDate,
    pub times: DayTimes,
}

/// A record typed in by an administrator, for any day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualEntry {
    pub user_id: String,
    pub employee_name: String,
    pub date: Option<NaiveDate>,
    pub times: DayTimes,
}

impl ManualEntry {
    /// Checks required fields before anything reaches the store.
    pub fn validate(&self) -> Result<NaiveDate, ClockError> {
        if self.employee_name.trim().is_empty() {
            return Err(ClockError::MissingField("employee name"));
        }
        if self.user_id.trim().is_empty() {
            return Err(ClockError::MissingField("user id"));
        }
        let date = self.date.ok_or(ClockError::MissingField("date"))?;
        if self.times.entry.is_none() && self.times.exit.is_none() {
            return Err(ClockError::MissingEntryOrExit);
        }
        Ok(date)
    }
}

/// Inserts a manual record. No one-record-per-day check is made here.
pub fn add_manual_entry(
    store: &mut dyn RecordStore,
    entry: &ManualEntry,
    lunch: LunchPolicy,
    created_at: NaiveDateTime,
) -> Result<TimeRecord> {
    let date = entry.validate()?;
    let record = TimeRecord::new(entry.user_id.trim(), entry.employee_name.trim(), date, created_at).with_times(entry.times.clone(), lunch);
    store.insert(&record)?;
    msg_debug!(format!("Manual record {} added for {}", record.id, record.employee_name));
    Ok(record)
}

/// Replaces date and punches of a record and recomputes its total.
pub fn edit_record(store: &mut dyn RecordStore, id: &str, edit: &RecordEdit, lunch: LunchPolicy) -> Result<TimeRecord> {
    let mut record = store.get(id)?.ok_or_else(|| ClockError::RecordNotFound(id.to_string()))?;
    record.date = edit.date;
    record.times = edit.times.clone();
    record.refresh_total(lunch);
    store.update(&record)?;
    Ok(record)
}

pub fn delete_record(store: &mut dyn RecordStore, id: &str) -> Result<TimeRecord> {
    let record = store.get(id)?.ok_or_else(|| ClockError::RecordNotFound(id.to_string()))?;
    store.delete(id)?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::local_store::{LocalStore, MemoryBlobStorage};
    use crate::libs::record::{parse_time, RecordQuery};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    fn created() -> NaiveDateTime {
        date().and_hms_opt(20, 0, 0).unwrap()
    }

    fn full_day() -> DayTimes {
        DayTimes {
            entry: Some(parse_time("09:00").unwrap()),
            lunch_exit: Some(parse_time("12:00").unwrap()),
            lunch_return: Some(parse_time("13:00").unwrap()),
            exit: Some(parse_time("18:00").unwrap()),
        }
    }

    #[test]
    fn gate_checks_the_stored_passphrase() {
        let dir = tempfile::tempdir().unwrap();
        let gate = AdminGate::with_secret(Secret::at(&dir.path().join("admin"), "Passphrase"));

        let err = gate.verify("anything").unwrap_err();
        assert_eq!(err.downcast_ref::<ClockError>(), Some(&ClockError::AdminNotConfigured));

        gate.set_passphrase("rh-2024").unwrap();
        assert!(gate.verify("rh-2024").is_ok());
        let err = gate.verify("rh-2023").unwrap_err();
        assert_eq!(err.downcast_ref::<ClockError>(), Some(&ClockError::AdminDenied));
    }

    #[test]
    fn manual_entry_requires_name_user_date_and_a_time() {
        let mut entry = ManualEntry::default();
        assert_eq!(entry.validate(), Err(ClockError::MissingField("employee name")));
        entry.employee_name = "Ana".to_string();
        assert_eq!(entry.validate(), Err(ClockError::MissingField("user id")));
        entry.user_id = "u1".to_string();
        assert_eq!(entry.validate(), Err(ClockError::MissingField("date")));
        entry.date = Some(date());
        assert_eq!(entry.validate(), Err(ClockError::MissingEntryOrExit));
        entry.times.exit = Some(parse_time("18:00").unwrap());
        assert_eq!(entry.validate(), Ok(date()));
    }

    #[test]
    fn manual_entries_bypass_the_daily_uniqueness_check() {
        let mut store = LocalStore::open(MemoryBlobStorage::default()).unwrap();
        let entry = ManualEntry {
            user_id: "u1".to_string(),
            employee_name: "Ana".to_string(),
            date: Some(date()),
            times: full_day(),
        };

        let first = add_manual_entry(&mut store, &entry, LunchPolicy::default(), created()).unwrap();
        let second = add_manual_entry(&mut store, &entry, LunchPolicy::default(), created()).unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(first.total_hours, "08:00");
        assert_eq!(store.fetch(&RecordQuery::default()).unwrap().len(), 2);
    }

    #[test]
    fn edit_recomputes_total_and_delete_is_hard() {
        let mut store = LocalStore::open(MemoryBlobStorage::default()).unwrap();
        let record = TimeRecord::new("u1", "Ana", date(), created()).with_times(full_day(), LunchPolicy::default());
        store.insert(&record).unwrap();

        let edit = RecordEdit {
            date: date().succ_opt().unwrap(),
            times: DayTimes {
                exit: Some(parse_time("17:00").unwrap()),
                ..full_day()
            },
        };
        let edited = edit_record(&mut store, &record.id, &edit, LunchPolicy::default()).unwrap();
        assert_eq!(edited.total_hours, "07:00");
        assert_eq!(store.get(&record.id).unwrap().unwrap().date, edit.date);

        delete_record(&mut store, &record.id).unwrap();
        assert!(store.get(&record.id).unwrap().is_none());
        let err = delete_record(&mut store, &record.id).unwrap_err();
        assert_eq!(err.downcast_ref::<ClockError>(), Some(&ClockError::RecordNotFound(record.id.clone())));
    }
}
