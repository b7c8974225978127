use super::resolve_employee;
use crate::{
    libs::{
        clock::{Clock, SaoPauloClock},
        config::Config,
        messages::Message,
        punch::today,
        store::open_store,
        view::View,
    },
    msg_info, msg_print,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct TodayArgs {
    /// Employee name, defaults to the configured profile
    #[arg(short, long)]
    employee: Option<String>,
}

pub fn cmd(args: TodayArgs) -> Result<()> {
    let config = Config::read()?;
    let employee = resolve_employee(&config, args.employee.as_deref())?;
    let mut store = open_store(&config)?;

    msg_print!(Message::TodayHeader(SaoPauloClock.today_label()), true);
    match today(store.as_mut(), &SaoPauloClock, &employee)? {
        Some(record) => View::day(&record, &config.work()),
        None => msg_info!(Message::NoRecordToday),
    }
    Ok(())
}
