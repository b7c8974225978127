//! Console tables for records, the current day and the employee roster.

use crate::libs::calendar::format_date_br;
use crate::libs::config::WorkConfig;
use crate::libs::grouping::MonthGroup;
use crate::libs::hours::balance;
use crate::libs::record::{format_time, TimeRecord};
use prettytable::{row, Table};

const ABSENT: &str = "--:--";

pub struct View {}

impl View {
    /// One table per month, newest month first, each followed by its balance.
    pub fn records(groups: &[MonthGroup], work: &WorkConfig) {
        for group in groups {
            println!("\n{}", group.label);
            Self::month_table(group, work).printstd();
            println!(
                "Saldo: {}",
                balance(group.records.iter(), work.lunch_policy, work.daily_threshold)
            );
        }
    }

    pub fn month_table(group: &MonthGroup, work: &WorkConfig) -> Table {
        let mut table = Table::new();
        table.add_row(row!["ID", "DATA", "FUNCIONÁRIO", "ENTRADA", "SAÍDA ALMOÇO", "RETORNO ALMOÇO", "SAÍDA", "TOTAL"]);
        for record in &group.records {
            table.add_row(row![
                record.id,
                format_date_br(record.date),
                record.employee_name,
                format_time(record.times.entry, ABSENT),
                format_time(record.times.lunch_exit, ABSENT),
                format_time(record.times.lunch_return, ABSENT),
                format_time(record.times.exit, ABSENT),
                Self::total_cell(record, work)
            ]);
        }
        table
    }

    /// The four punches of a single day.
    pub fn day(record: &TimeRecord, work: &WorkConfig) {
        Self::day_table(record, work).printstd();
    }

    pub fn day_table(record: &TimeRecord, work: &WorkConfig) -> Table {
        let mut table = Table::new();
        table.add_row(row!["ENTRADA", "SAÍDA ALMOÇO", "RETORNO ALMOÇO", "SAÍDA", "TOTAL"]);
        table.add_row(row![
            format_time(record.times.entry, ABSENT),
            format_time(record.times.lunch_exit, ABSENT),
            format_time(record.times.lunch_return, ABSENT),
            format_time(record.times.exit, ABSENT),
            Self::total_cell(record, work)
        ]);
        table
    }

    pub fn employees(names: &[String]) {
        let mut table = Table::new();
        table.add_row(row!["#", "NAME"]);
        for (i, name) in names.iter().enumerate() {
            table.add_row(row![i + 1, name]);
        }
        table.printstd();
    }

    /// Stored total with a `*` marker on overtime days.
    fn total_cell(record: &TimeRecord, work: &WorkConfig) -> String {
        let total = record.stored_total(work.overtime_threshold);
        if total.overtime {
            format!("{} *", total.text())
        } else {
            total.text()
        }
    }
}
