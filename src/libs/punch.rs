//! Self-service punches: one record per employee per day, filled in order.

use crate::libs::clock::Clock;
use crate::libs::error::ClockError;
use crate::libs::hours::LunchPolicy;
use crate::libs::record::{DayState, PunchKind, TimeRecord};
use crate::libs::store::RecordStore;
use crate::msg_debug;
use anyhow::Result;

/// Who is punching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub user_id: String,
    pub name: String,
}

impl Employee {
    pub fn new(user_id: &str, name: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            name: name.to_string(),
        }
    }

    /// Local storage identifies people by name only.
    pub fn by_name(name: &str) -> Self {
        Self::new(name, name)
    }
}

/// Marks `kind` at the clock's current minute on today's record.
///
/// The day's record is looked up first and created on the first punch
/// (check-then-insert). Two sessions punching the same employee at the same
/// moment can both insert.
pub fn punch(store: &mut dyn RecordStore, clock: &dyn Clock, employee: &Employee, kind: PunchKind, lunch: LunchPolicy) -> Result<TimeRecord> {
    let today = clock.today();
    let at = clock.now_hm();

    match store.find_day(&employee.user_id, today)? {
        Some(mut record) => {
            record.times.punch(kind, at)?;
            record.refresh_total(lunch);
            store.update(&record)?;
            msg_debug!(format!("{} punched {:?} at {} on record {}", employee.name, kind, at, record.id));
            Ok(record)
        }
        None => {
            if kind != PunchKind::Entry {
                return Err(ClockError::OutOfOrder {
                    kind,
                    state: DayState::Empty,
                }
                .into());
            }
            let mut record = TimeRecord::new(&employee.user_id, &employee.name, today, clock.now());
            record.times.punch(kind, at)?;
            record.refresh_total(lunch);
            store.insert(&record)?;
            msg_debug!(format!("{} started the day at {} with record {}", employee.name, at, record.id));
            Ok(record)
        }
    }
}

/// Today's record for the employee, if any.
pub fn today(store: &mut dyn RecordStore, clock: &dyn Clock, employee: &Employee) -> Result<Option<TimeRecord>> {
    store.find_day(&employee.user_id, clock.today())
}
