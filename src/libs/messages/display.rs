use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            Message::PunchRecorded(label, time) => format!("{} recorded: {}", label, time),
            Message::TodayHeader(date) => format!("Today is {}", date),
            Message::NoRecordToday => "No punches recorded today.".to_string(),
            Message::DayTotal(total) => format!("Total hours: {}", total),
            Message::OvertimeWarning => "Overtime: the day is above the daily threshold.".to_string(),

            Message::RecordsHeader(count) => format!("{} record(s) found", count),
            Message::NoRecordsFound => "No records found".to_string(),
            Message::BalanceForPeriod(balance) => format!("Hour balance: {}", balance),
            Message::RecordUpdated => "Record updated successfully.".to_string(),
            Message::RecordDeleted => "Record deleted successfully.".to_string(),
            Message::ManualRecordAdded => "Manual record added successfully!".to_string(),
            Message::RecordsCleared(count) => format!("All data cleared ({} record(s) removed).", count),
            Message::ConfirmDeleteRecord(employee, date) => {
                format!("Delete the record of {} on {}? This action cannot be undone.", employee, date)
            }
            Message::ConfirmClearAll => "Clear ALL data? This action cannot be undone.".to_string(),
            Message::OperationCancelled => "Operation cancelled.".to_string(),

            Message::EmployeeAdded(name) => format!("Employee '{}' added.", name),
            Message::EmployeeRemoved(name) => format!("Employee '{}' removed.", name),
            Message::NoEmployees => "No employees registered.".to_string(),
            Message::EmployeesHeader => "Employees:".to_string(),
            Message::ProfileRequired => "No employee given and no profile configured. Pass --employee or run `ponto init`.".to_string(),
            Message::LocalStorageRequired => "The employee roster only exists with local storage. Select it with `ponto init`.".to_string(),

            Message::AdminPassphraseSet => "Admin passphrase saved.".to_string(),

            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigModuleWork => "Work rules".to_string(),
            Message::ConfigModuleProfile => "Employee profile".to_string(),
            Message::ConfigModuleStorage => "Storage".to_string(),

            Message::ExportCompleted(path) => format!("Data exported successfully to: {}", path),

            Message::MigrationsFound(count) => format!("Found {} pending migration(s)", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),

            Message::PromptSelectModules => "Select sections to configure".to_string(),
            Message::PromptStorageBackend => "Where should records be stored?".to_string(),
            Message::PromptDefaultLunch => "Lunch deduction when lunch is not punched (minutes, 0 for none)".to_string(),
            Message::PromptDailyThreshold => "Expected minutes per day".to_string(),
            Message::PromptOvertimeThreshold => "Overtime above (minutes per day)".to_string(),
            Message::PromptUserId => "Your user id".to_string(),
            Message::PromptEmployeeName => "Your name".to_string(),
            Message::PromptAdminPassphrase => "Admin passphrase".to_string(),
        };
        write!(f, "{}", text)
    }
}
