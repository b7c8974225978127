//! Interactive setup: configuration sections and the admin passphrase.

use crate::{
    libs::{admin::AdminGate, config::Config, messages::Message},
    msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Set a new admin passphrase even if one exists
    #[arg(long)]
    admin: bool,
}

pub fn cmd(args: InitArgs) -> Result<()> {
    Config::init()?.save()?;
    msg_success!(Message::ConfigSaved);

    let gate = AdminGate::new();
    if args.admin || !gate.is_configured() {
        gate.setup()?;
        msg_success!(Message::AdminPassphraseSet);
    }
    Ok(())
}
