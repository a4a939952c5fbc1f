//! Dataset overview: shape, date range and per-column statistics
//!
//! ```text
//! TableSummary
//! ├─ rows, first_date, last_date
//! └─ columns: Vec<ColumnSummary>   (count, min, max, mean, median, std, quartiles)
//! ```

use bikeshare_stats::{descriptive::DescriptiveStats, percentiles::Percentiles};
use chrono::NaiveDate;
use serde::Serialize;

use crate::record::{Column, ObservationTable};

const QUARTILES: [f64; 3] = [25.0, 50.0, 75.0];

#[derive(Debug, Clone, Serialize)]
pub struct TableSummary {
    pub rows: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub columns: Vec<ColumnSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnSummary {
    pub column: Column,
    pub stats: DescriptiveStats,
    pub quartiles: Percentiles,
}

impl TableSummary {
    /// Summarizes every numeric column of `table`.
    ///
    /// Columns without any value (e.g. `hour` in daily data) are omitted.
    #[must_use]
    pub fn from_table(table: &ObservationTable) -> Self {
        let columns = Column::ALL
            .iter()
            .filter_map(|&column| {
                let mut values = table.column_values(column);
                values.sort_by(f64::total_cmp);
                let stats = DescriptiveStats::from_sorted(&values)?;
                Some(ColumnSummary {
                    column,
                    stats,
                    quartiles: Percentiles::from_sorted(&values, &QUARTILES),
                })
            })
            .collect();

        Self {
            rows: table.len(),
            first_date: table.iter().map(|obs| obs.date).min(),
            last_date: table.iter().map(|obs| obs.date).max(),
            columns,
        }
    }

    #[must_use]
    pub fn column(&self, column: Column) -> Option<&ColumnSummary> {
        self.columns.iter().find(|summary| summary.column == column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Covariate, Response, tests::observation};

    #[test]
    fn test_summary_of_small_table() {
        let table = [
            observation("2011-01-02", 2, 10, 2),
            observation("2011-01-01", 0, 20, 4),
            observation("2011-01-03", 1, 30, 6),
        ]
        .into_iter()
        .collect::<ObservationTable>();
        let summary = TableSummary::from_table(&table);

        assert_eq!(summary.rows, 3);
        assert_eq!(summary.first_date, Some("2011-01-01".parse().unwrap()));
        assert_eq!(summary.last_date, Some("2011-01-03".parse().unwrap()));
        assert_eq!(summary.columns.len(), Column::ALL.len());

        let registered = summary.column(Response::Registered.into()).unwrap();
        assert_eq!(registered.stats.count, 3);
        assert_eq!(registered.stats.mean, 20.0);
        assert_eq!(registered.stats.std_dev, 10.0);
        assert_eq!(registered.quartiles.get(25.0), Some(15.0));
        assert_eq!(registered.quartiles.get(75.0), Some(25.0));

        let hour = summary.column(Column::Hour).unwrap();
        assert_eq!(hour.stats.max, 2.0);
    }

    #[test]
    fn test_daily_data_has_no_hour_column() {
        let mut obs = observation("2011-01-01", 0, 1, 1);
        obs.hour = None;
        let table = [obs].into_iter().collect::<ObservationTable>();
        let summary = TableSummary::from_table(&table);
        assert!(summary.column(Column::Hour).is_none());
        assert!(summary.column(Covariate::Windspeed.into()).is_some());
    }

    #[test]
    fn test_column_labels_in_json() {
        let table = [observation("2011-01-01", 0, 1, 1)]
            .into_iter()
            .collect::<ObservationTable>();
        let json = serde_json::to_value(TableSummary::from_table(&table)).unwrap();
        assert_eq!(json["columns"][0]["column"], "hour");
        assert_eq!(json["columns"][4]["column"], "humidity");
    }

    #[test]
    fn test_empty_table() {
        let summary = TableSummary::from_table(&ObservationTable::default());
        assert_eq!(summary.rows, 0);
        assert!(summary.columns.is_empty());
        assert_eq!(summary.first_date, None);
    }
}
