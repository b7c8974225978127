//! Administrative record maintenance.
//!
//! Every subcommand asks for the admin passphrase before touching the store.
//! Destructive ones also ask for confirmation unless `--force` is given.

use super::parse_date_arg;
use crate::{
    libs::{
        admin::{add_manual_entry, delete_record, edit_record, AdminGate, ManualEntry, RecordEdit},
        calendar::format_date_br,
        clock::{Clock, SaoPauloClock},
        config::Config,
        error::ClockError,
        messages::Message,
        record::{parse_optional_time, DayTimes},
        store::open_store,
    },
    msg_info, msg_success,
};
use anyhow::Result;
use chrono::NaiveTime;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

/// Value that clears a punch in `admin edit`.
const CLEAR: &str = "-";

#[derive(Debug, Args)]
pub struct AdminArgs {
    #[command(subcommand)]
    command: AdminCommand,
}

#[derive(Debug, Args, Default)]
struct TimeArgs {
    /// Entry time (HH:MM)
    #[arg(long)]
    entry: Option<String>,
    /// Lunch out time (HH:MM)
    #[arg(long)]
    lunch_out: Option<String>,
    /// Lunch back time (HH:MM)
    #[arg(long)]
    lunch_back: Option<String>,
    /// Exit time (HH:MM)
    #[arg(long)]
    exit: Option<String>,
}

#[derive(Debug, Subcommand)]
enum AdminCommand {
    /// Change date or punches of a record; pass `-` to clear a punch
    Edit {
        id: String,
        #[arg(short, long)]
        date: Option<String>,
        #[command(flatten)]
        times: TimeArgs,
    },
    /// Delete a record
    Delete {
        id: String,
        #[arg(short, long)]
        force: bool,
    },
    /// Insert a record for any employee and day
    Add {
        #[arg(short, long)]
        employee: String,
        /// Defaults to the employee name
        #[arg(short, long)]
        user_id: Option<String>,
        #[arg(short, long)]
        date: String,
        #[command(flatten)]
        times: TimeArgs,
    },
    /// Delete every record (and the local roster)
    Clear {
        #[arg(short, long)]
        force: bool,
    },
}

pub fn cmd(args: AdminArgs) -> Result<()> {
    AdminGate::new().authorize()?;

    let config = Config::read()?;
    let lunch = config.work().lunch_policy;
    let mut store = open_store(&config)?;

    match args.command {
        AdminCommand::Edit { id, date, times } => {
            let record = store.get(&id)?.ok_or_else(|| ClockError::RecordNotFound(id.clone()))?;
            let edit = RecordEdit {
                date: match date {
                    Some(date) => parse_date_arg(&date)?,
                    None => record.date,
                },
                times: times.merge_into(&record.times)?,
            };
            edit_record(store.as_mut(), &id, &edit, lunch)?;
            msg_success!(Message::RecordUpdated);
        }
        AdminCommand::Delete { id, force } => {
            let record = store.get(&id)?.ok_or_else(|| ClockError::RecordNotFound(id.clone()))?;
            if !force && !confirm(Message::ConfirmDeleteRecord(record.employee_name.clone(), format_date_br(record.date)))? {
                msg_info!(Message::OperationCancelled);
                return Ok(());
            }
            delete_record(store.as_mut(), &id)?;
            msg_success!(Message::RecordDeleted);
        }
        AdminCommand::Add {
            employee,
            user_id,
            date,
            times,
        } => {
            let entry = ManualEntry {
                user_id: user_id.unwrap_or_else(|| employee.clone()),
                employee_name: employee,
                date: Some(parse_date_arg(&date)?),
                times: times.merge_into(&DayTimes::default())?,
            };
            add_manual_entry(store.as_mut(), &entry, lunch, SaoPauloClock.now())?;
            msg_success!(Message::ManualRecordAdded);
        }
        AdminCommand::Clear { force } => {
            if !force && !confirm(Message::ConfirmClearAll)? {
                msg_info!(Message::OperationCancelled);
                return Ok(());
            }
            let removed = store.clear()?;
            msg_success!(Message::RecordsCleared(removed));
        }
    }
    Ok(())
}

fn confirm(prompt: Message) -> Result<bool> {
    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt.to_string())
        .default(false)
        .interact()?)
}

impl TimeArgs {
    /// Applies the given flags on top of `base`. Missing flags keep the base
    /// value; `-` clears it.
    fn merge_into(&self, base: &DayTimes) -> Result<DayTimes, ClockError> {
        Ok(DayTimes {
            entry: merge(self.entry.as_deref(), base.entry)?,
            lunch_exit: merge(self.lunch_out.as_deref(), base.lunch_exit)?,
            lunch_return: merge(self.lunch_back.as_deref(), base.lunch_return)?,
            exit: merge(self.exit.as_deref(), base.exit)?,
        })
    }
}

fn merge(flag: Option<&str>, current: Option<NaiveTime>) -> Result<Option<NaiveTime>, ClockError> {
    match flag.map(str::trim) {
        None => Ok(current),
        Some(CLEAR) => Ok(None),
        value => parse_optional_time(value),
    }
}
