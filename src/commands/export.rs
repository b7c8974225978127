use super::FilterArgs;
use crate::{
    libs::{
        config::Config,
        export::{ExportFormat, Exporter},
        messages::Message,
        store::open_store,
    },
    msg_success,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[command(flatten)]
    filter: FilterArgs,

    #[arg(short, long, value_enum, default_value = "excel")]
    format: ExportFormat,

    /// Output file, defaults to a name built from the filter
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn cmd(args: ExportArgs) -> Result<()> {
    let config = Config::read()?;
    let query = args.filter.query(&config)?;
    let mut store = open_store(&config)?;

    let records = store.fetch(&query)?;
    let path = Exporter::new(args.format, args.output, &query).export(&records)?;

    msg_success!(Message::ExportCompleted(path.display().to_string()));
    Ok(())
}
