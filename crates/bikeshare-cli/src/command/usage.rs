use std::path::PathBuf;

use anyhow::Context;
use bikeshare_analysis::usage::{UsageConfig, UsageReport};

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct UsageArg {
    /// Path to the normalized JSON snapshot
    snapshot: PathBuf,
    /// Trailing window (days) of the smoothed daily rides
    #[arg(long, default_value_t = 7)]
    smoothing_window: usize,
    /// Number of histogram bins
    #[arg(long, default_value_t = 30)]
    bins: usize,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &UsageArg) -> anyhow::Result<()> {
    let table = util::read_snapshot(&arg.snapshot)?;
    let config = UsageConfig {
        smoothing_window: arg.smoothing_window,
        bins: arg.bins,
    };
    let report = UsageReport::from_table(&table, &config).context("Failed to build usage report")?;
    Output::save_json(&report, arg.output.as_deref())
}
