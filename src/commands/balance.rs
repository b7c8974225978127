use super::FilterArgs;
use crate::{
    libs::{config::Config, hours::balance, messages::Message, store::open_store},
    msg_print,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct BalanceArgs {
    #[command(flatten)]
    filter: FilterArgs,
}

/// Sum of `worked - daily_threshold` over the complete days in the period.
pub fn cmd(args: BalanceArgs) -> Result<()> {
    let config = Config::read()?;
    let work = config.work();
    let query = args.filter.query(&config)?;
    let mut store = open_store(&config)?;

    let records = store.fetch(&query)?;
    msg_print!(Message::BalanceForPeriod(balance(
        records.iter(),
        work.lunch_policy,
        work.daily_threshold
    )));
    Ok(())
}
