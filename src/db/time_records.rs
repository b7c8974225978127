//! SQLite storage for time records.
//!
//! One row per record in the `time_records` table. Punch times are stored as
//! `HH:MM` text (NULL when absent) and dates as `YYYY-MM-DD`, so the rows read
//! the same as the JSON files of the local backend.
//!
//! ## Ordering
//!
//! Listings come back newest first: by `date`, then by `created_at` for
//! records sharing a date.
//!
//! ## Filters
//!
//! A [`RecordQuery`] becomes a `WHERE` clause with bound parameters. The date
//! filter turns into an inclusive `date BETWEEN` range (plain `date =` for a
//! single day). Employee name and user id are equality checks.

use crate::db::db::Db;
use crate::libs::error::ClockError;
use crate::libs::record::{parse_time, DayTimes, RecordQuery, TimeRecord};
use crate::libs::store::RecordStore;
use crate::msg_debug;
use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use rusqlite::types::Type;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::path::Path;

const SELECT_COLUMNS: &str = "SELECT id, user_id, employee_name, date, entry_time, lunch_exit_time, lunch_return_time, exit_time, total_hours, created_at FROM time_records";
const ORDER_NEWEST_FIRST: &str = " ORDER BY date DESC, created_at DESC";
const INSERT_RECORD: &str = "INSERT INTO time_records (id, user_id, employee_name, date, entry_time, lunch_exit_time, lunch_return_time, exit_time, total_hours, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)";
const UPDATE_RECORD: &str = "UPDATE time_records SET date = ?2, entry_time = ?3, lunch_exit_time = ?4, lunch_return_time = ?5, exit_time = ?6, total_hours = ?7
    WHERE id = ?1";
const DELETE_RECORD: &str = "DELETE FROM time_records WHERE id = ?1";
const DELETE_ALL: &str = "DELETE FROM time_records";
const SELECT_EMPLOYEES: &str = "SELECT DISTINCT employee_name FROM time_records ORDER BY employee_name";

/// SQLite-backed `time_records` table.
pub struct TimeRecords {
    pub conn: Connection,
}

impl TimeRecords {
    pub fn new() -> Result<Self> {
        Ok(Self { conn: Db::new()?.conn })
    }

    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self { conn: Db::open(path)?.conn })
    }

    pub fn in_memory() -> Result<Self> {
        Ok(Self { conn: Db::in_memory()?.conn })
    }

    fn fetch_one(&self, sql: &str, args: &[&str]) -> Result<Option<TimeRecord>> {
        let record = self.conn.query_row(sql, params_from_iter(args.iter()), map_record).optional()?;
        Ok(record)
    }
}

fn hm(time: Option<NaiveTime>) -> Option<String> {
    time.map(|t| t.format("%H:%M").to_string())
}

fn time_column(row: &Row, idx: usize) -> rusqlite::Result<Option<NaiveTime>> {
    match row.get::<_, Option<String>>(idx)? {
        Some(raw) if !raw.trim().is_empty() => parse_time(&raw)
            .map(Some)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))),
        _ => Ok(None),
    }
}

fn map_record(row: &Row) -> rusqlite::Result<TimeRecord> {
    Ok(TimeRecord {
        id: row.get(0)?,
        user_id: row.get(1)?,
        employee_name: row.get(2)?,
        date: row.get(3)?,
        times: DayTimes {
            entry: time_column(row, 4)?,
            lunch_exit: time_column(row, 5)?,
            lunch_return: time_column(row, 6)?,
            exit: time_column(row, 7)?,
        },
        total_hours: row.get::<_, Option<String>>(8)?.unwrap_or_else(|| crate::libs::hours::TOTAL_UNKNOWN.to_string()),
        created_at: row.get(9)?,
    })
}

/// WHERE clause and its positional arguments for a query.
fn where_clause(query: &RecordQuery) -> (String, Vec<String>) {
    let mut conditions = Vec::new();
    let mut args = Vec::new();

    if let Some((from, to)) = query.filter.bounds() {
        if from == to {
            conditions.push("date = ?");
            args.push(from.format("%Y-%m-%d").to_string());
        } else {
            conditions.push("date BETWEEN ? AND ?");
            args.push(from.format("%Y-%m-%d").to_string());
            args.push(to.format("%Y-%m-%d").to_string());
        }
    }
    if let Some(name) = &query.employee_name {
        conditions.push("employee_name = ?");
        args.push(name.clone());
    }
    if let Some(user_id) = &query.user_id {
        conditions.push("user_id = ?");
        args.push(user_id.clone());
    }

    if conditions.is_empty() {
        (String::new(), args)
    } else {
        (format!(" WHERE {}", conditions.join(" AND ")), args)
    }
}

impl RecordStore for TimeRecords {
    fn find_day(&mut self, user_id: &str, date: NaiveDate) -> Result<Option<TimeRecord>> {
        let sql = format!("{} WHERE user_id = ?1 AND date = ?2{} LIMIT 1", SELECT_COLUMNS, ORDER_NEWEST_FIRST);
        self.fetch_one(&sql, &[user_id, &date.format("%Y-%m-%d").to_string()])
    }

    fn get(&mut self, id: &str) -> Result<Option<TimeRecord>> {
        let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);
        self.fetch_one(&sql, &[id])
    }

    fn insert(&mut self, record: &TimeRecord) -> Result<()> {
        self.conn.execute(
            INSERT_RECORD,
            params![
                record.id,
                record.user_id,
                record.employee_name,
                record.date,
                hm(record.times.entry),
                hm(record.times.lunch_exit),
                hm(record.times.lunch_return),
                hm(record.times.exit),
                record.total_hours,
                record.created_at,
            ],
        )?;
        msg_debug!(format!("Inserted time record {} for {}", record.id, record.employee_name));
        Ok(())
    }

    fn update(&mut self, record: &TimeRecord) -> Result<()> {
        let affected = self.conn.execute(
            UPDATE_RECORD,
            params![
                record.id,
                record.date,
                hm(record.times.entry),
                hm(record.times.lunch_exit),
                hm(record.times.lunch_return),
                hm(record.times.exit),
                record.total_hours,
            ],
        )?;
        if affected == 0 {
            return Err(ClockError::RecordNotFound(record.id.clone()).into());
        }
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        let affected = self.conn.execute(DELETE_RECORD, params![id])?;
        if affected == 0 {
            return Err(ClockError::RecordNotFound(id.to_string()).into());
        }
        msg_debug!(format!("Deleted time record {}", id));
        Ok(())
    }

    fn fetch(&mut self, query: &RecordQuery) -> Result<Vec<TimeRecord>> {
        let (clause, args) = where_clause(query);
        let sql = format!("{}{}{}", SELECT_COLUMNS, clause, ORDER_NEWEST_FIRST);
        let mut stmt = self.conn.prepare(&sql)?;
        let records = stmt
            .query_map(params_from_iter(args.iter()), map_record)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    fn clear(&mut self) -> Result<usize> {
        Ok(self.conn.execute(DELETE_ALL, [])?)
    }

    fn employee_names(&mut self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(SELECT_EMPLOYEES)?;
        let names = stmt.query_map([], |row| row.get::<_, String>(0))?.collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }
}
