//! Calendar helpers: month ranges, pt-BR labels and `DD/MM/YYYY` dates.
//!
//! Record dates are pure calendar keys. Nothing here goes through a time zone;
//! the only zone-aware code lives in [`crate::libs::clock`].

use crate::libs::error::ClockError;
use anyhow::Result;
use chrono::{Datelike, Months, NaiveDate};

pub const MONTHS_PT_BR: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Monday first, matching `Weekday::num_days_from_monday`.
pub const WEEKDAYS_PT_BR: [&str; 7] = [
    "segunda-feira",
    "terça-feira",
    "quarta-feira",
    "quinta-feira",
    "sexta-feira",
    "sábado",
    "domingo",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
}

/// First and last calendar day of the month containing `date`.
pub fn month_range(date: NaiveDate) -> MonthRange {
    let first_day = date.with_day(1).unwrap_or(date);
    let last_day = first_day
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date);
    MonthRange { first_day, last_day }
}

/// String form of [`month_range`]. Unparseable input comes back unchanged
/// as both ends of the range.
pub fn month_range_ymd(date_ymd: &str) -> (String, String) {
    match parse_ymd(date_ymd) {
        Ok(date) => {
            let range = month_range(date);
            (range.first_day.format("%Y-%m-%d").to_string(), range.last_day.format("%Y-%m-%d").to_string())
        }
        Err(_) => (date_ymd.to_string(), date_ymd.to_string()),
    }
}

pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

pub fn month_name(date: NaiveDate) -> &'static str {
    MONTHS_PT_BR[date.month0() as usize]
}

/// "fevereiro de 2024"
pub fn month_label(date: NaiveDate) -> String {
    format!("{} de {}", month_name(date), date.year())
}

/// "terça-feira, 5 de março de 2024"
pub fn long_date_label(date: NaiveDate) -> String {
    format!(
        "{}, {} de {} de {}",
        WEEKDAYS_PT_BR[date.weekday().num_days_from_monday() as usize],
        date.day(),
        month_name(date),
        date.year()
    )
}

pub fn format_date_br(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Reorders a `YYYY-MM-DD` string into `DD/MM/YYYY` without parsing it as a
/// date. Input that does not have three parts is returned as is.
pub fn format_date_br_ymd(date_ymd: &str) -> String {
    let parts: Vec<&str> = date_ymd.split('-').collect();
    match parts.as_slice() {
        [year, month, day] if !year.is_empty() && !month.is_empty() && !day.is_empty() => {
            format!("{}/{}/{}", day, month, year)
        }
        _ => date_ymd.to_string(),
    }
}

pub fn parse_ymd(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| ClockError::InvalidDate(input.to_string()).into())
}

pub fn parse_date_br(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%d/%m/%Y").map_err(|_| ClockError::InvalidDate(input.to_string()).into())
}

/// Parses `YYYY-MM` into the first day of that month.
pub fn parse_month(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", input.trim()), "%Y-%m-%d").map_err(|_| ClockError::InvalidMonth(input.to_string()).into())
}
