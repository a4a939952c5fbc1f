use std::path::PathBuf;

use anyhow::Context;
use bikeshare_analysis::stationarity::{StationarityConfig, StationarityReport};

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct StationarityArg {
    /// Path to the normalized JSON snapshot
    snapshot: PathBuf,
    /// Window of the rolling statistics
    #[arg(long, default_value_t = 10)]
    window: usize,
    /// Center the rolling window instead of trailing it
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    centered: bool,
    /// Trailing window of the moving average subtracted when detrending
    #[arg(long, default_value_t = 10)]
    detrend_window: usize,
    /// Seasonal period of the decomposition, in days
    #[arg(long, default_value_t = 7)]
    period: usize,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &StationarityArg) -> anyhow::Result<()> {
    let table = util::read_snapshot(&arg.snapshot)?;
    let config = StationarityConfig {
        window: arg.window,
        centered: arg.centered,
        detrend_window: arg.detrend_window,
        period: arg.period,
    };
    let report = StationarityReport::from_table(&table, &config)
        .context("Failed to analyze stationarity")?;
    Output::save_json(&report, arg.output.as_deref())
}
