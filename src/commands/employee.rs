//! Employee roster for the local storage backend.
//!
//! With the database backend the roster is not stored; `list` then shows the
//! distinct names found in the records.

use crate::{
    libs::{
        config::{Config, StorageBackend},
        local_store::{FileBlobStorage, LocalStore},
        messages::Message,
        store::open_store,
        view::View,
    },
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct EmployeeArgs {
    #[command(subcommand)]
    command: EmployeeCommand,
}

#[derive(Debug, Subcommand)]
enum EmployeeCommand {
    /// Register a name
    Add { name: String },
    /// Remove a name; their records are kept
    Remove { name: String },
    /// Show registered employees
    List,
}

pub fn cmd(args: EmployeeArgs) -> Result<()> {
    let config = Config::read()?;

    if let EmployeeCommand::List = args.command {
        let names = match config.backend() {
            StorageBackend::Local => LocalStore::open(FileBlobStorage::new()?)?.employees().to_vec(),
            StorageBackend::Database => open_store(&config)?.employee_names()?,
        };
        if names.is_empty() {
            msg_info!(Message::NoEmployees);
        } else {
            msg_print!(Message::EmployeesHeader);
            View::employees(&names);
        }
        return Ok(());
    }

    if config.backend() != StorageBackend::Local {
        anyhow::bail!(Message::LocalStorageRequired.to_string());
    }
    let mut roster = LocalStore::open(FileBlobStorage::new()?)?;

    match args.command {
        EmployeeCommand::Add { name } => {
            let name = roster.add_employee(&name)?;
            msg_success!(Message::EmployeeAdded(name));
        }
        EmployeeCommand::Remove { name } => {
            let name = name.trim();
            roster.remove_employee(name)?;
            msg_success!(Message::EmployeeRemoved(name.to_string()));
        }
        EmployeeCommand::List => {}
    }
    Ok(())
}
