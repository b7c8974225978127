use super::FilterArgs;
use crate::{
    libs::{config::Config, grouping::group_by_month, messages::Message, store::open_store, view::View},
    msg_info, msg_print,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct RecordsArgs {
    #[command(flatten)]
    filter: FilterArgs,
}

pub fn cmd(args: RecordsArgs) -> Result<()> {
    let config = Config::read()?;
    let query = args.filter.query(&config)?;
    let mut store = open_store(&config)?;

    let records = store.fetch(&query)?;
    if records.is_empty() {
        msg_info!(Message::NoRecordsFound);
        return Ok(());
    }

    msg_print!(Message::RecordsHeader(records.len()));
    View::records(&group_by_month(records), &config.work());
    Ok(())
}
