use std::path::PathBuf;

use bikeshare_analysis::summary::TableSummary;

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct DescribeArg {
    /// Path to the normalized JSON snapshot
    snapshot: PathBuf,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &DescribeArg) -> anyhow::Result<()> {
    let table = util::read_snapshot(&arg.snapshot)?;
    let summary = TableSummary::from_table(&table);
    if let (Some(first), Some(last)) = (summary.first_date, summary.last_date) {
        log::info!("{} rows from {first} to {last}", summary.rows);
    }
    Output::save_json(&summary, arg.output.as_deref())
}
