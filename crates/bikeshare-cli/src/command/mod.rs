use clap::{Parser, Subcommand};

use self::{
    correlations::CorrelationsArg, describe::DescribeArg, hypothesis::HypothesisArg,
    normalize::NormalizeArg, stationarity::StationarityArg, usage::UsageArg,
};

mod correlations;
mod describe;
mod hypothesis;
mod normalize;
mod stationarity;
mod usage;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Analysis to run
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Normalize a raw CSV file into a JSON snapshot
    Normalize(#[clap(flatten)] NormalizeArg),
    /// Summarize every numeric column of a snapshot
    Describe(#[clap(flatten)] DescribeArg),
    /// Compare registered and casual usage
    Usage(#[clap(flatten)] UsageArg),
    /// Run one-sample and weekend vs. working-day t-tests
    Hypothesis(#[clap(flatten)] HypothesisArg),
    /// Correlate weather covariates with rides
    Correlations(#[clap(flatten)] CorrelationsArg),
    /// Test daily rides for stationarity
    Stationarity(#[clap(flatten)] StationarityArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Normalize(arg) => normalize::run(&arg)?,
        Mode::Describe(arg) => describe::run(&arg)?,
        Mode::Usage(arg) => usage::run(&arg)?,
        Mode::Hypothesis(arg) => hypothesis::run(&arg)?,
        Mode::Correlations(arg) => correlations::run(&arg)?,
        Mode::Stationarity(arg) => stationarity::run(&arg)?,
    }
    Ok(())
}
