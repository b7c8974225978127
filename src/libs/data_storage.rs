//! Per-user data directory.
//!
//! Holds the database, the local JSON blobs, the config file and the admin
//! passphrase. Linux uses `~/.local/share/ponto`, macOS uses
//! `~/Library/Application Support/ponto` and Windows uses `%LOCALAPPDATA%\ponto`.

use std::env::consts::OS;
use std::env::var;
use std::fs;
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "ponto";

/// Resolves the per-user application data directory.
#[derive(Clone, Debug)]
pub struct DataStorage {
    base_path: PathBuf,
}

impl DataStorage {
    pub fn new() -> Self {
        let base_path = match OS {
            "windows" => var("LOCALAPPDATA").unwrap_or_else(|_| ".".into()),
            "macos" => var("HOME").unwrap_or_else(|_| ".".into()) + "/Library/Application Support",
            _ => var("HOME").unwrap_or_else(|_| ".".into()) + "/.local/share",
        };
        let base_path = Path::new(&base_path).join(APP_NAME);

        Self { base_path }
    }

    /// Creates the data directory if needed and returns it.
    pub fn dir(&self) -> anyhow::Result<PathBuf> {
        if !self.base_path.exists() {
            fs::create_dir_all(&self.base_path)?;
        }
        Ok(self.base_path.clone())
    }

    pub fn get_path(&self, file_name: &str) -> anyhow::Result<PathBuf> {
        Ok(self.dir()?.join(file_name))
    }
}

impl Default for DataStorage {
    fn default() -> Self {
        Self::new()
    }
}
