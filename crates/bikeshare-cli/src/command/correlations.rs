use std::path::PathBuf;

use anyhow::Context;
use bikeshare_analysis::weather::WeatherReport;

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct CorrelationsArg {
    /// Path to the normalized JSON snapshot
    snapshot: PathBuf,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &CorrelationsArg) -> anyhow::Result<()> {
    let table = util::read_snapshot(&arg.snapshot)?;
    let report = WeatherReport::from_table(&table).context("Failed to correlate weather")?;
    Output::save_json(&report, arg.output.as_deref())
}
