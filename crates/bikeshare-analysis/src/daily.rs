//! Daily aggregation and date-indexed series
//!
//! Hourly rows are summed per calendar date. Dates appear in ascending order
//! and only dates present in the table appear: gaps are kept as gaps.

use std::collections::BTreeMap;

use bikeshare_stats::rolling;
use chrono::NaiveDate;
use serde::Serialize;

use crate::record::{ObservationTable, Response};

/// A numeric series with one date per value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DatedSeries {
    pub dates: Vec<NaiveDate>,
    pub values: Vec<f64>,
}

impl DatedSeries {
    /// Pairs `dates` with `values`, dropping the `None` positions from both.
    ///
    /// # Panics
    ///
    /// Panics if the two slices differ in length.
    #[must_use]
    pub fn from_partial(dates: &[NaiveDate], values: &[Option<f64>]) -> Self {
        let (dates, values) = rolling::drop_nulls_with(dates, values);
        Self { dates, values }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Ride totals per date.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DailyRides {
    pub dates: Vec<NaiveDate>,
    pub registered: Vec<f64>,
    pub casual: Vec<f64>,
    pub total: Vec<f64>,
}

impl DailyRides {
    /// Sums the rides of every row sharing a date.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_table(table: &ObservationTable) -> Self {
        let mut per_date = BTreeMap::<NaiveDate, [u64; 3]>::new();
        for obs in table {
            let sums = per_date.entry(obs.date).or_default();
            sums[0] += u64::from(obs.registered);
            sums[1] += u64::from(obs.casual);
            sums[2] += u64::from(obs.total);
        }

        let mut daily = Self::default();
        for (date, [registered, casual, total]) in per_date {
            daily.dates.push(date);
            daily.registered.push(registered as f64);
            daily.casual.push(casual as f64);
            daily.total.push(total as f64);
        }
        daily
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    #[must_use]
    pub fn values(&self, response: Response) -> &[f64] {
        match response {
            Response::Registered => &self.registered,
            Response::Casual => &self.casual,
            Response::Total => &self.total,
        }
    }

    /// One response as a standalone dated series.
    #[must_use]
    pub fn series(&self, response: Response) -> DatedSeries {
        DatedSeries {
            dates: self.dates.clone(),
            values: self.values(response).to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::tests::observation;

    #[test]
    fn test_groups_by_date_in_order() {
        let table = [
            observation("2011-01-02", 0, 5, 1),
            observation("2011-01-01", 0, 13, 3),
            observation("2011-01-01", 1, 32, 8),
            observation("2011-01-02", 1, 7, 0),
        ]
        .into_iter()
        .collect::<ObservationTable>();
        let daily = DailyRides::from_table(&table);
        assert_eq!(
            daily.dates,
            vec![
                NaiveDate::from_ymd_opt(2011, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2011, 1, 2).unwrap()
            ]
        );
        assert_eq!(daily.registered, vec![45.0, 12.0]);
        assert_eq!(daily.casual, vec![11.0, 1.0]);
        assert_eq!(daily.values(Response::Total), &[56.0, 13.0]);
    }

    #[test]
    fn test_gaps_are_kept() {
        let table = [
            observation("2011-01-01", 0, 1, 1),
            observation("2011-01-05", 0, 2, 2),
        ]
        .into_iter()
        .collect::<ObservationTable>();
        let daily = DailyRides::from_table(&table);
        assert_eq!(daily.len(), 2);
        assert_eq!(daily.dates[1], NaiveDate::from_ymd_opt(2011, 1, 5).unwrap());
    }

    #[test]
    fn test_from_partial_keeps_dates_aligned() {
        let dates = ["2011-01-01", "2011-01-02", "2011-01-03"]
            .map(|d| d.parse::<NaiveDate>().unwrap());
        let series = DatedSeries::from_partial(&dates, &[None, Some(2.0), Some(-1.0)]);
        assert_eq!(series.dates, dates[1..].to_vec());
        assert_eq!(series.values, vec![2.0, -1.0]);
    }
}
