//! Command-line interface.
//!
//! Each subcommand lives in its own module with an `Args` struct and a `cmd`
//! function. Shared pieces (the date filter flags and resolving who is
//! punching) are defined here.

pub mod admin;
pub mod balance;
pub mod employee;
pub mod export;
pub mod init;
pub mod punch;
pub mod records;
pub mod today;

use crate::libs::calendar::{parse_date_br, parse_month, parse_ymd};
use crate::libs::config::{Config, StorageBackend};
use crate::libs::error::ClockError;
use crate::libs::local_store::{FileBlobStorage, LocalStore};
use crate::libs::messages::Message;
use crate::libs::punch::Employee;
use crate::libs::record::{RecordFilter, RecordQuery};
use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration and admin passphrase setup")]
    Init(init::InitArgs),
    #[command(about = "Punch entry, lunch out, lunch back or exit", arg_required_else_help = true)]
    Punch(punch::PunchArgs),
    #[command(about = "Show today's punches")]
    Today(today::TodayArgs),
    #[command(about = "List records grouped by month")]
    Records(records::RecordsArgs),
    #[command(about = "Show the hour balance for a period")]
    Balance(balance::BalanceArgs),
    #[command(about = "Manage the employee roster (local storage)", arg_required_else_help = true)]
    Employee(employee::EmployeeArgs),
    #[command(about = "Edit, delete, insert or clear records", arg_required_else_help = true)]
    Admin(admin::AdminArgs),
    #[command(about = "Export records to Excel or CSV")]
    Export(export::ExportArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Punch(args) => punch::cmd(args),
            Commands::Today(args) => today::cmd(args),
            Commands::Records(args) => records::cmd(args),
            Commands::Balance(args) => balance::cmd(args),
            Commands::Employee(args) => employee::cmd(args),
            Commands::Admin(args) => admin::cmd(args),
            Commands::Export(args) => export::cmd(args),
        }
    }
}

/// Date selection shared by `records`, `balance` and `export`.
#[derive(Debug, Args, Default)]
pub struct FilterArgs {
    /// Single date (YYYY-MM-DD or DD/MM/YYYY)
    #[arg(short, long, conflicts_with_all = ["month", "from", "to"])]
    pub date: Option<String>,

    /// Month (YYYY-MM)
    #[arg(short, long, conflicts_with_all = ["from", "to"])]
    pub month: Option<String>,

    /// Range start, inclusive
    #[arg(long, requires = "to")]
    pub from: Option<String>,

    /// Range end, inclusive
    #[arg(long, requires = "from")]
    pub to: Option<String>,

    /// Only records of this employee
    #[arg(short, long)]
    pub employee: Option<String>,

    /// Records of every employee instead of the configured profile
    #[arg(short, long, conflicts_with = "employee")]
    pub all: bool,
}

impl FilterArgs {
    pub fn filter(&self) -> Result<RecordFilter> {
        if let Some(date) = &self.date {
            return Ok(RecordFilter::Date(parse_date_arg(date)?));
        }
        if let Some(month) = &self.month {
            return Ok(RecordFilter::Month(parse_month(month)?));
        }
        match (&self.from, &self.to) {
            (Some(from), Some(to)) => Ok(RecordFilter::range(parse_date_arg(from)?, parse_date_arg(to)?)?),
            _ => Ok(RecordFilter::All),
        }
    }

    /// Narrows to `--employee`, to the configured profile, or to nobody with `--all`.
    ///
    /// The profile narrows by user id and carries its name along, so export
    /// file names show whose records they hold.
    pub fn query(&self, config: &Config) -> Result<RecordQuery> {
        let query = RecordQuery::new(self.filter()?);
        if self.all {
            return Ok(query);
        }
        if let Some(name) = &self.employee {
            return Ok(query.employee(Some(name.trim().to_string())));
        }
        Ok(match &config.profile {
            Some(profile) => query
                .user(Some(profile.user_id.clone()))
                .employee(Some(profile.employee_name.clone())),
            None => query,
        })
    }
}

/// Accepts `YYYY-MM-DD` or `DD/MM/YYYY`.
pub fn parse_date_arg(input: &str) -> Result<NaiveDate> {
    parse_ymd(input).or_else(|_| parse_date_br(input))
}

/// Who is punching: `--employee` when given, otherwise the configured profile.
///
/// With local storage the name must be on the roster and doubles as the user id.
pub fn resolve_employee(config: &Config, name: Option<&str>) -> Result<Employee> {
    match (name.map(str::trim), &config.profile) {
        (Some(name), _) if config.backend() == StorageBackend::Local => {
            let roster = LocalStore::open(FileBlobStorage::new()?)?;
            if !roster.is_registered(name) {
                return Err(ClockError::UnknownEmployee(name.to_string()).into());
            }
            Ok(Employee::by_name(name))
        }
        (Some(name), Some(profile)) if profile.employee_name == name => Ok(Employee::new(&profile.user_id, &profile.employee_name)),
        (Some(name), _) => {
            if name.is_empty() {
                return Err(ClockError::EmptyEmployeeName.into());
            }
            Ok(Employee::by_name(name))
        }
        (None, Some(profile)) => Ok(Employee::new(&profile.user_id, &profile.employee_name)),
        (None, None) => anyhow::bail!(Message::ProfileRequired.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::config::ProfileConfig;

    fn profile_config() -> Config {
        Config {
            profile: Some(ProfileConfig {
                user_id: "u-17".to_string(),
                employee_name: "Ana Souza".to_string(),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn date_argument_accepts_both_layouts() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(parse_date_arg("2024-03-05").unwrap(), expected);
        assert_eq!(parse_date_arg("05/03/2024").unwrap(), expected);
        assert!(parse_date_arg("5 de março").is_err());
    }

    #[test]
    fn filter_from_flags() {
        let args = FilterArgs {
            month: Some("2024-02".to_string()),
            ..Default::default()
        };
        assert_eq!(args.filter().unwrap(), RecordFilter::Month(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()));

        let args = FilterArgs {
            from: Some("2024-03-10".to_string()),
            to: Some("2024-03-01".to_string()),
            ..Default::default()
        };
        assert!(args.filter().is_err());

        assert_eq!(FilterArgs::default().filter().unwrap(), RecordFilter::All);
    }

    #[test]
    fn query_defaults_to_profile() {
        let config = profile_config();
        let query = FilterArgs::default().query(&config).unwrap();
        assert_eq!(query.user_id.as_deref(), Some("u-17"));
        assert_eq!(query.employee_name.as_deref(), Some("Ana Souza"));

        let all = FilterArgs {
            all: true,
            ..Default::default()
        };
        let everyone = all.query(&config).unwrap();
        assert_eq!(everyone.user_id, None);
        assert_eq!(everyone.employee_name, None);
    }

    #[test]
    fn employee_resolution_uses_profile() {
        let config = profile_config();
        let employee = resolve_employee(&config, None).unwrap();
        assert_eq!(employee, Employee::new("u-17", "Ana Souza"));

        let employee = resolve_employee(&config, Some("Ana Souza")).unwrap();
        assert_eq!(employee.user_id, "u-17");

        assert!(resolve_employee(&Config::default(), None).is_err());
    }
}
