//! # Ponto - employee time clock
//!
//! A command-line time clock for recording the four daily punches of an
//! employee (entry, lunch out, lunch back, exit), reviewing records grouped by
//! month with an hour balance, and letting an administrator correct, insert,
//! delete and export records.
//!
//! ## Features
//!
//! - **Punching**: one record per employee per day, filled in order
//! - **Hours**: daily totals with lunch deduction and a monthly balance
//! - **Storage**: SQLite database or JSON files in the data directory
//! - **Administration**: passphrase-gated edit, delete, manual insert and clear
//! - **Export**: Excel and CSV with file names that encode the filter
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ponto::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
