//! Domain errors raised by the time clock before any store write happens.
//!
//! Everything else (I/O, SQLite, serialization) travels as `anyhow::Error`;
//! these variants exist so callers and tests can match on the reason a punch
//! or an administrative action was refused.

use crate::libs::record::{DayState, PunchKind};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClockError {
    #[error("{} was already marked today at {at}", .kind.label())]
    AlreadyMarked { kind: PunchKind, at: String },

    #[error("Cannot mark {} now: the day is at '{}'", .kind.label(), .state.label())]
    OutOfOrder { kind: PunchKind, state: DayState },

    #[error("The workday is already closed, no further punches are allowed")]
    DayClosed,

    #[error("Time record {0} not found")]
    RecordNotFound(String),

    #[error("Invalid time '{0}', expected HH:MM")]
    InvalidTime(String),

    #[error("Invalid date '{0}', expected YYYY-MM-DD or DD/MM/YYYY")]
    InvalidDate(String),

    #[error("Invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),

    #[error("Invalid date range: {from} is after {to}")]
    InvalidRange { from: String, to: String },

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Fill in at least the entry or the exit time")]
    MissingEntryOrExit,

    #[error("Incorrect admin passphrase")]
    AdminDenied,

    #[error("Admin passphrase is not set, run `ponto init` first")]
    AdminNotConfigured,

    #[error("Employee name cannot be empty")]
    EmptyEmployeeName,

    #[error("Employee '{0}' is already registered")]
    DuplicateEmployee(String),

    #[error("Employee '{0}' is not registered")]
    UnknownEmployee(String),

    #[error("No records to export")]
    NothingToExport,
}
