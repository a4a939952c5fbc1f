use std::path::PathBuf;

use anyhow::Context;
use bikeshare_analysis::hypothesis::{HypothesisConfig, HypothesisReport};

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct HypothesisArg {
    /// Path to the normalized JSON snapshot
    snapshot: PathBuf,
    /// Seed of the unbiased random sample
    #[arg(long, default_value_t = 111)]
    seed: u64,
    /// Share of rows drawn for the unbiased sample
    #[arg(long, default_value_t = 0.5)]
    fraction: f64,
    /// Pool variances (Student) instead of Welch's test
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    equal_variance: bool,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &HypothesisArg) -> anyhow::Result<()> {
    let table = util::read_snapshot(&arg.snapshot)?;
    let config = HypothesisConfig {
        seed: arg.seed,
        fraction: arg.fraction,
        equal_variance: arg.equal_variance,
    };
    let report =
        HypothesisReport::from_table(&table, &config).context("Failed to run hypothesis tests")?;
    for outcome in [&report.biased_sample, &report.unbiased_sample] {
        log::info!(
            "{}: t = {:.3}, p = {:.4}",
            outcome.description,
            outcome.result.statistic,
            outcome.result.p_value
        );
    }
    for outcome in &report.weekend_vs_working_days {
        log::info!(
            "{} weekend vs. working days: t = {:.3}, p = {:.4}",
            outcome.response,
            outcome.result.statistic,
            outcome.result.p_value
        );
    }
    Output::save_json(&report, arg.output.as_deref())
}
