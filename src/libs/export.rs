//! Spreadsheet export of time records.
//!
//! One row per record with the columns `Data, Funcionário, Entrada,
//! Saída Almoço, Retorno Almoço, Saída, Total Horas`. Excel output goes to a
//! single `Registros` sheet; CSV output carries the same header line.
//!
//! The default file name encodes the active filter, so exporting March 2024
//! for Ana Souza produces `registros_março_2024_Ana_Souza.xlsx`.
//!
//! ```rust,no_run
//! use ponto::libs::export::{ExportFormat, Exporter};
//! use ponto::db::time_records::TimeRecords;
//! use ponto::libs::record::{RecordFilter, RecordQuery};
//! use ponto::libs::store::RecordStore;
//!
//! let query = RecordQuery::new(RecordFilter::All);
//! let records = TimeRecords::new()?.fetch(&query)?;
//! let path = Exporter::new(ExportFormat::Excel, None, &query).export(&records)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::libs::calendar::{format_date_br, month_name};
use crate::libs::error::ClockError;
use crate::libs::record::{format_time, RecordFilter, RecordQuery, TimeRecord};
use crate::msg_debug;
use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use rust_xlsxwriter::{Color, Format, Workbook};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const SHEET_NAME: &str = "Registros";

pub const HEADERS: [&str; 7] = ["Data", "Funcionário", "Entrada", "Saída Almoço", "Retorno Almoço", "Saída", "Total Horas"];

/// Placeholder for an absent punch in Excel output.
const XLSX_ABSENT: &str = "-";
/// Placeholder for an absent punch in CSV output.
const CSV_ABSENT: &str = "--:--";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ExportFormat {
    /// `.xlsx` workbook.
    #[default]
    Excel,
    /// Comma-separated values with a header line.
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Excel => "xlsx",
            ExportFormat::Csv => "csv",
        }
    }

    fn absent(&self) -> &'static str {
        match self {
            ExportFormat::Excel => XLSX_ABSENT,
            ExportFormat::Csv => CSV_ABSENT,
        }
    }
}

/// A record flattened to display strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    #[serde(rename = "Data")]
    pub date: String,
    #[serde(rename = "Funcionário")]
    pub employee_name: String,
    #[serde(rename = "Entrada")]
    pub entry: String,
    #[serde(rename = "Saída Almoço")]
    pub lunch_exit: String,
    #[serde(rename = "Retorno Almoço")]
    pub lunch_return: String,
    #[serde(rename = "Saída")]
    pub exit: String,
    #[serde(rename = "Total Horas")]
    pub total_hours: String,
}

impl ExportRow {
    pub fn from_record(record: &TimeRecord, absent: &str) -> Self {
        let total_hours = if record.total_hours.trim().is_empty() {
            absent.to_string()
        } else {
            record.total_hours.clone()
        };
        Self {
            date: format_date_br(record.date),
            employee_name: record.employee_name.clone(),
            entry: format_time(record.times.entry, absent),
            lunch_exit: format_time(record.times.lunch_exit, absent),
            lunch_return: format_time(record.times.lunch_return, absent),
            exit: format_time(record.times.exit, absent),
            total_hours,
        }
    }

    fn cells(&self) -> [&str; 7] {
        [
            &self.date,
            &self.employee_name,
            &self.entry,
            &self.lunch_exit,
            &self.lunch_return,
            &self.exit,
            &self.total_hours,
        ]
    }
}

fn dashed(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

/// File name without extension for the records selected by `query`.
///
/// `registros_<DD-MM-YYYY>` for one date, `registros_<mês>_<YYYY>` for a month,
/// `registros_<DD-MM-YYYY>_a_<DD-MM-YYYY>` for a range and `registros_todos`
/// for everything. An employee filter appends the name with whitespace runs
/// turned into `_`; combined with no date filter the name replaces `todos`.
pub fn default_file_stem(query: &RecordQuery) -> String {
    let mut parts = vec!["registros".to_string()];

    match query.filter {
        RecordFilter::All => {
            if query.employee_name.is_none() {
                parts.push("todos".to_string());
            }
        }
        RecordFilter::Date(date) => parts.push(dashed(date)),
        RecordFilter::Month(date) => {
            parts.push(month_name(date).to_string());
            parts.push(date.year().to_string());
        }
        RecordFilter::Range { from, to } => parts.push(format!("{}_a_{}", dashed(from), dashed(to))),
    }

    if let Some(name) = &query.employee_name {
        parts.push(name.split_whitespace().collect::<Vec<_>>().join("_"));
    }

    parts.join("_")
}

pub struct Exporter {
    format: ExportFormat,
    output_path: PathBuf,
}

impl Exporter {
    /// Uses `output_path` when given, otherwise the filter-encoded default
    /// name in the current directory.
    pub fn new(format: ExportFormat, output_path: Option<PathBuf>, query: &RecordQuery) -> Self {
        let output_path = output_path.unwrap_or_else(|| PathBuf::from(format!("{}.{}", default_file_stem(query), format.extension())));
        Self { format, output_path }
    }

    /// Places the default file name inside `dir`.
    pub fn in_dir(format: ExportFormat, dir: &Path, query: &RecordQuery) -> Self {
        let output_path = dir.join(format!("{}.{}", default_file_stem(query), format.extension()));
        Self { format, output_path }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Writes `records` in the given order and returns the file path.
    pub fn export(&self, records: &[TimeRecord]) -> Result<PathBuf> {
        if records.is_empty() {
            return Err(ClockError::NothingToExport.into());
        }

        let absent = self.format.absent();
        let rows: Vec<ExportRow> = records.iter().map(|r| ExportRow::from_record(r, absent)).collect();

        match self.format {
            ExportFormat::Excel => self.write_excel(&rows)?,
            ExportFormat::Csv => self.write_csv(&rows)?,
        }

        msg_debug!(format!("Exported {} record(s) to {}", rows.len(), self.output_path.display()));
        Ok(self.output_path.clone())
    }

    fn write_excel(&self, rows: &[ExportRow]) -> Result<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME)?;

        let header_format = Format::new().set_bold().set_background_color(Color::Gray);
        for (col, header) in HEADERS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
        }

        for (i, row) in rows.iter().enumerate() {
            let excel_row = (i + 1) as u32;
            for (col, cell) in row.cells().iter().enumerate() {
                worksheet.write_string(excel_row, col as u16, *cell)?;
            }
        }

        worksheet.autofit();
        workbook.save(&self.output_path)?;
        Ok(())
    }

    fn write_csv(&self, rows: &[ExportRow]) -> Result<()> {
        let mut wtr = csv::Writer::from_path(&self.output_path)?;
        for row in rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}
