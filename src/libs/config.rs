//! Application configuration stored as `config.json` in the data directory.
//!
//! Every section is optional. Missing sections fall back to defaults, so the
//! time clock runs without any setup; `ponto init` walks through the sections
//! interactively.
//!
//! ```json
//! {
//!   "work": { "lunch_policy": { "fixed": { "minutes": 60 } }, "daily_threshold": 528, "overtime_threshold": 528 },
//!   "profile": { "user_id": "u-17", "employee_name": "Ana Souza" },
//!   "storage": { "backend": "database" }
//! }
//! ```

use super::data_storage::DataStorage;
use crate::libs::hours::{LunchPolicy, DEFAULT_DAILY_THRESHOLD, DEFAULT_LUNCH_MINUTES};
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Select};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

/// Rules for computing worked hours and balances.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WorkConfig {
    /// Deduction applied when a day has no complete lunch punches.
    pub lunch_policy: LunchPolicy,

    /// Expected minutes per day, subtracted per day in the balance.
    pub daily_threshold: i64,

    /// Days above this many minutes are flagged as overtime.
    pub overtime_threshold: i64,
}

impl Default for WorkConfig {
    fn default() -> Self {
        WorkConfig {
            lunch_policy: LunchPolicy::default(),
            daily_threshold: DEFAULT_DAILY_THRESHOLD,
            overtime_threshold: DEFAULT_DAILY_THRESHOLD,
        }
    }
}

/// The employee punching on this machine.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ProfileConfig {
    pub user_id: String,
    pub employee_name: String,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// SQLite `time_records` table.
    #[default]
    Database,
    /// `employees.json` and `time_records.json` blobs.
    Local,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work: Option<WorkConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<StorageConfig>,
}

impl Config {
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        Self::read_from(&config_file_path)
    }

    /// Reads the file at `path`, or returns the default configuration when it
    /// does not exist.
    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        self.save_to(&config_file_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    pub fn work(&self) -> WorkConfig {
        self.work.clone().unwrap_or_default()
    }

    pub fn backend(&self) -> StorageBackend {
        self.storage.as_ref().map(|s| s.backend).unwrap_or_default()
    }

    /// Interactive setup of the selected sections, starting from the current
    /// configuration.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = vec![
            ConfigModule {
                key: "work".to_string(),
                name: "Work rules".to_string(),
            },
            ConfigModule {
                key: "profile".to_string(),
                name: "Employee profile".to_string(),
            },
            ConfigModule {
                key: "storage".to_string(),
                name: "Storage".to_string(),
            },
        ];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "work" => config.work = Some(Self::init_work(&config.work())?),
                "profile" => config.profile = Some(Self::init_profile(config.profile.as_ref())?),
                "storage" => {
                    msg_print!(Message::ConfigModuleStorage);
                    let backends = ["database", "local"];
                    let current = match config.backend() {
                        StorageBackend::Database => 0,
                        StorageBackend::Local => 1,
                    };
                    let choice = Select::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptStorageBackend.to_string())
                        .items(&backends)
                        .default(current)
                        .interact()?;
                    let backend = if choice == 0 { StorageBackend::Database } else { StorageBackend::Local };
                    config.storage = Some(StorageConfig { backend });
                }
                _ => {}
            }
        }

        Ok(config)
    }

    fn init_work(default: &WorkConfig) -> Result<WorkConfig> {
        msg_print!(Message::ConfigModuleWork);
        let current_lunch = match default.lunch_policy {
            LunchPolicy::Fixed { minutes } => minutes,
            LunchPolicy::None => 0,
        };
        let lunch_minutes: i64 = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptDefaultLunch.to_string())
            .default(if current_lunch > 0 { current_lunch } else { DEFAULT_LUNCH_MINUTES })
            .interact_text()?;
        let daily_threshold: i64 = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptDailyThreshold.to_string())
            .default(default.daily_threshold)
            .interact_text()?;
        let overtime_threshold: i64 = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptOvertimeThreshold.to_string())
            .default(default.overtime_threshold)
            .interact_text()?;

        Ok(WorkConfig {
            lunch_policy: if lunch_minutes > 0 {
                LunchPolicy::Fixed { minutes: lunch_minutes }
            } else {
                LunchPolicy::None
            },
            daily_threshold,
            overtime_threshold,
        })
    }

    fn init_profile(default: Option<&ProfileConfig>) -> Result<ProfileConfig> {
        msg_print!(Message::ConfigModuleProfile);
        let user_id: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptUserId.to_string())
            .default(default.map(|p| p.user_id.clone()).unwrap_or_default())
            .interact_text()?;
        let employee_name: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptEmployeeName.to_string())
            .default(default.map(|p| p.employee_name.clone()).unwrap_or_default())
            .interact_text()?;

        Ok(ProfileConfig {
            user_id: user_id.trim().to_string(),
            employee_name: employee_name.trim().to_string(),
        })
    }
}
