use super::resolve_employee;
use crate::{
    libs::{
        clock::SaoPauloClock,
        config::Config,
        messages::Message,
        punch::punch,
        record::{format_time, DayState, PunchKind},
        store::open_store,
    },
    msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct PunchArgs {
    #[arg(value_enum)]
    kind: PunchKind,

    /// Employee name, defaults to the configured profile
    #[arg(short, long)]
    employee: Option<String>,
}

pub fn cmd(args: PunchArgs) -> Result<()> {
    let config = Config::read()?;
    let work = config.work();
    let employee = resolve_employee(&config, args.employee.as_deref())?;
    let mut store = open_store(&config)?;

    let record = punch(store.as_mut(), &SaoPauloClock, &employee, args.kind, work.lunch_policy)?;
    msg_success!(Message::PunchRecorded(
        args.kind.label().to_string(),
        format_time(record.times.get(args.kind), "--:--")
    ));

    if record.state() == DayState::Closed {
        let total = record.total(work.lunch_policy, work.overtime_threshold);
        msg_print!(Message::DayTotal(total.text()));
        if total.overtime {
            msg_warning!(Message::OvertimeWarning);
        }
    }
    Ok(())
}
