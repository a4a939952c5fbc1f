use std::path::PathBuf;

use anyhow::Context;
use bikeshare_analysis::normalization;

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct NormalizeArg {
    /// Path to the raw `hour.csv` or `day.csv` file
    raw: PathBuf,
    /// Output file path for the JSON snapshot
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &NormalizeArg) -> anyhow::Result<()> {
    let raw = util::read_raw_csv(&arg.raw)?;
    let table = normalization::normalize(&raw)
        .with_context(|| format!("Failed to normalize {}", arg.raw.display()))?;
    log::info!("Normalized {} rows", table.len());
    Output::save_json(&table, arg.output.as_deref())
}
