//! Core library modules for the ponto time clock.
//!
//! Domain types and rules live in [`record`], [`hours`], [`calendar`] and
//! [`grouping`]; persistence goes through the [`store::RecordStore`] seam,
//! implemented by the SQLite table in [`crate::db`] and by [`local_store`].
//!
//! ```rust,no_run
//! use ponto::libs::clock::SaoPauloClock;
//! use ponto::libs::config::Config;
//! use ponto::libs::punch::{punch, Employee};
//! use ponto::libs::record::PunchKind;
//! use ponto::libs::store::open_store;
//!
//! let config = Config::read()?;
//! let mut store = open_store(&config)?;
//! let employee = Employee::new("u-17", "Ana Souza");
//! punch(store.as_mut(), &SaoPauloClock, &employee, PunchKind::Entry, config.work().lunch_policy)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod admin;
pub mod calendar;
pub mod clock;
pub mod config;
pub mod data_storage;
pub mod error;
pub mod export;
pub mod formatter;
pub mod grouping;
pub mod hours;
pub mod local_store;
pub mod messages;
pub mod punch;
pub mod record;
pub mod secret;
pub mod store;
pub mod view;
