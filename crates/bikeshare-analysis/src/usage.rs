//! Registered versus casual usage
//!
//! Everything the usage charts are drawn from:
//!
//! - **Distributions**: equal-width histograms of hourly rides per user group
//! - **Daily totals**: rides summed per date
//! - **Smoothed daily rides**: trailing rolling mean with a ±2σ band, each
//!   group using its own rolling standard deviation
//! - **Profiles**: mean rides per (weekday, hour), (season, hour) and
//!   (season, weekday)

use std::collections::BTreeMap;

use bikeshare_stats::{descriptive::DescriptiveStats, histogram::Histogram, rolling};
use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    AnalysisError,
    category::{Season, Weekday},
    daily::DailyRides,
    record::{Observation, ObservationTable, Response},
};

/// Knobs of the usage report.
#[derive(Debug, Clone, Copy)]
pub struct UsageConfig {
    /// Trailing window (days) of the smoothed daily series.
    pub smoothing_window: usize,
    /// Number of histogram bins.
    pub bins: usize,
}

impl Default for UsageConfig {
    fn default() -> Self {
        Self {
            smoothing_window: 7,
            bins: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UsageReport {
    pub distributions: Vec<RideDistribution>,
    pub daily: DailyRides,
    pub smoothed: Vec<SmoothedRides>,
    pub weekday_hour: Vec<ProfileEntry<Weekday, u8>>,
    pub season_hour: Vec<ProfileEntry<Season, u8>>,
    pub season_weekday: Vec<ProfileEntry<Season, Weekday>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RideDistribution {
    pub response: Response,
    pub stats: Option<DescriptiveStats>,
    pub histogram: Histogram,
}

/// Rolling mean of daily rides with a band of two rolling standard deviations.
#[derive(Debug, Clone, Serialize)]
pub struct SmoothedRides {
    pub response: Response,
    pub window: usize,
    pub dates: Vec<NaiveDate>,
    pub mean: Vec<Option<f64>>,
    pub std_dev: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
    pub upper: Vec<Option<f64>>,
}

/// Mean rides of the rows sharing one `(row, column)` key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileEntry<R, C> {
    pub row: R,
    pub column: C,
    pub observations: usize,
    pub registered: f64,
    pub casual: f64,
}

impl UsageReport {
    pub fn from_table(table: &ObservationTable, config: &UsageConfig) -> Result<Self, AnalysisError> {
        let distributions = Response::USER_GROUPS
            .iter()
            .map(|&response| {
                let values = table.response_values(response);
                RideDistribution {
                    response,
                    stats: DescriptiveStats::new(values.iter().copied()),
                    histogram: Histogram::new(&values, config.bins),
                }
            })
            .collect();

        let daily = DailyRides::from_table(table);
        log::debug!("aggregated {} rows into {} days", table.len(), daily.len());

        let smoothed = Response::USER_GROUPS
            .iter()
            .map(|&response| SmoothedRides::new(&daily, response, config.smoothing_window))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            distributions,
            smoothed,
            weekday_hour: mean_profile(table, |obs| Some((obs.weekday, obs.hour?))),
            season_hour: mean_profile(table, |obs| Some((obs.season, obs.hour?))),
            season_weekday: mean_profile(table, |obs| Some((obs.season, obs.weekday))),
            daily,
        })
    }
}

impl SmoothedRides {
    pub fn new(daily: &DailyRides, response: Response, window: usize) -> Result<Self, AnalysisError> {
        let stats = rolling::rolling_statistics(daily.values(response), window, false)?;
        let band = |sign: f64| {
            stats
                .mean
                .iter()
                .zip(&stats.std_dev)
                .map(|(mean, std)| Some((*mean)? + sign * 2.0 * (*std)?))
                .collect::<Vec<_>>()
        };
        Ok(Self {
            response,
            window,
            dates: daily.dates.clone(),
            lower: band(-1.0),
            upper: band(1.0),
            mean: stats.mean,
            std_dev: stats.std_dev,
        })
    }
}

/// Groups rows by the key `key` returns (skipping `None`) and averages rides.
#[expect(clippy::cast_precision_loss)]
fn mean_profile<R, C, F>(table: &ObservationTable, key: F) -> Vec<ProfileEntry<R, C>>
where
    R: Ord + Copy,
    C: Ord + Copy,
    F: Fn(&Observation) -> Option<(R, C)>,
{
    let mut groups = BTreeMap::<(R, C), (usize, u64, u64)>::new();
    for obs in table {
        let Some(group) = key(obs) else {
            continue;
        };
        let (count, registered, casual) = groups.entry(group).or_default();
        *count += 1;
        *registered += u64::from(obs.registered);
        *casual += u64::from(obs.casual);
    }
    groups
        .into_iter()
        .map(|((row, column), (count, registered, casual))| ProfileEntry {
            row,
            column,
            observations: count,
            registered: registered as f64 / count as f64,
            casual: casual as f64 / count as f64,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::tests::observation;

    fn table() -> ObservationTable {
        let mut rows = Vec::new();
        for day in 1..=9 {
            for hour in [8, 18] {
                let date = format!("2011-01-{day:02}");
                let mut obs = observation(&date, hour, 10 * day + u32::from(hour), day);
                obs.weekday = if day % 7 == 1 {
                    Weekday::Saturday
                } else {
                    Weekday::Monday
                };
                obs.season = if day <= 4 {
                    Season::Winter
                } else {
                    Season::Spring
                };
                rows.push(obs);
            }
        }
        rows.into_iter().collect()
    }

    #[test]
    fn test_distributions_cover_every_row() {
        let report = UsageReport::from_table(&table(), &UsageConfig::default()).unwrap();
        assert_eq!(report.distributions.len(), 2);
        for distribution in &report.distributions {
            assert_eq!(distribution.histogram.total(), 18);
            assert_eq!(distribution.histogram.bins.len(), 30);
        }
        assert_eq!(report.distributions[1].response, Response::Casual);
    }

    #[test]
    fn test_smoothed_band_uses_own_deviation() {
        let config = UsageConfig {
            smoothing_window: 3,
            bins: 5,
        };
        let report = UsageReport::from_table(&table(), &config).unwrap();
        for smoothed in &report.smoothed {
            assert_eq!(smoothed.dates.len(), 9);
            assert_eq!(smoothed.mean[..2], [None, None]);
            let mean = smoothed.mean[2].unwrap();
            let std = smoothed.std_dev[2].unwrap();
            assert!((smoothed.upper[2].unwrap() - (mean + 2.0 * std)).abs() < 1e-9);
            assert!((smoothed.lower[2].unwrap() - (mean - 2.0 * std)).abs() < 1e-9);
        }
        // casual per day = 2 * day, so a 3-day window has std 2
        let casual = &report.smoothed[1];
        assert!((casual.std_dev[5].unwrap() - 2.0).abs() < 1e-9);
        // registered per day = 20 * day + 26, std 20
        let registered = &report.smoothed[0];
        assert!((registered.std_dev[5].unwrap() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_profiles_are_ordered_and_averaged() {
        let report = UsageReport::from_table(&table(), &UsageConfig::default()).unwrap();

        let keys = report
            .weekday_hour
            .iter()
            .map(|entry| (entry.row, entry.column))
            .collect::<Vec<_>>();
        assert_eq!(
            keys,
            vec![
                (Weekday::Monday, 8),
                (Weekday::Monday, 18),
                (Weekday::Saturday, 8),
                (Weekday::Saturday, 18),
            ]
        );
        // Saturdays are days 1 and 8
        let saturday_morning = &report.weekday_hour[2];
        assert_eq!(saturday_morning.observations, 2);
        assert_eq!(saturday_morning.registered, (18.0 + 88.0) / 2.0);
        assert_eq!(saturday_morning.casual, 4.5);

        assert_eq!(report.season_weekday[0].row, Season::Winter);
        assert_eq!(report.season_hour.len(), 4);
    }

    #[test]
    fn test_daily_data_has_no_hourly_profiles() {
        let rows = (1..=3).map(|day| {
            let mut obs = observation(&format!("2011-02-0{day}"), 0, 100, 10);
            obs.hour = None;
            obs
        });
        let table = rows.collect::<ObservationTable>();
        let report = UsageReport::from_table(&table, &UsageConfig::default()).unwrap();
        assert!(report.weekday_hour.is_empty());
        assert_eq!(report.season_weekday.len(), 1);
    }

    #[test]
    fn test_zero_window_is_rejected() {
        let config = UsageConfig {
            smoothing_window: 0,
            bins: 10,
        };
        let err = UsageReport::from_table(&table(), &config).unwrap_err();
        assert!(matches!(err, AnalysisError::Stats(_)));
    }
}
