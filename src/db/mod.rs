//! Database layer for the time clock.
//!
//! A single SQLite file in the data directory holds the `time_records` table.
//! The schema is created and evolved by [`migrations::MigrationManager`] every
//! time a connection is opened.
//!
//! ```rust,no_run
//! use ponto::db::time_records::TimeRecords;
//! use ponto::libs::record::{RecordFilter, RecordQuery};
//! use ponto::libs::store::RecordStore;
//!
//! let mut records = TimeRecords::new()?;
//! let all = records.fetch(&RecordQuery::new(RecordFilter::All))?;
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Connection management; opening a connection applies pending migrations.
pub mod db;

/// Versioned schema migrations.
pub mod migrations;

/// `RecordStore` implementation over the `time_records` table.
pub mod time_records;
