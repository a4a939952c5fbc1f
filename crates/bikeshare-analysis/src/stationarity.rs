//! Stationarity of daily ride totals
//!
//! Each user group's daily series is examined as-is and after three
//! detrending transforms:
//!
//! ```text
//! original ──┬─ rolling statistics + unit-root test
//!            ├─ minus trailing rolling mean ─→ rolling statistics + unit-root test
//!            ├─ minus previous day ──────────→ rolling statistics + unit-root test
//!            └─ additive decomposition ─→ residual ─→ rolling statistics + unit-root test
//! ```
//!
//! Leading and trailing positions a transform leaves undefined are dropped
//! together with their dates before the next step.

use bikeshare_stats::{
    decomposition::{self, Decomposition},
    rolling,
    unit_root::{self, UnitRootResult},
};
use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    AnalysisError,
    daily::{DailyRides, DatedSeries},
    record::{ObservationTable, Response},
};

/// Knobs of the stationarity report.
#[derive(Debug, Clone, Copy)]
pub struct StationarityConfig {
    /// Window of the rolling statistics drawn over every series.
    pub window: usize,
    /// Center the rolling window instead of trailing it.
    pub centered: bool,
    /// Trailing window of the moving average subtracted when detrending.
    pub detrend_window: usize,
    /// Seasonal period of the decomposition, in days.
    pub period: usize,
}

impl Default for StationarityConfig {
    fn default() -> Self {
        Self {
            window: 10,
            centered: true,
            detrend_window: 10,
            period: 7,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StationarityReport {
    pub responses: Vec<ResponseStationarity>,
}

/// All stationarity diagnostics of one user group.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseStationarity {
    pub response: Response,
    pub original: StationarityResult,
    pub moving_average_difference: StationarityResult,
    pub lag_difference: StationarityResult,
    pub decomposition: DatedDecomposition,
    pub residual: StationarityResult,
}

/// Rolling statistics and unit-root test of one dated series.
#[derive(Debug, Clone, Serialize)]
pub struct StationarityResult {
    pub series: DatedSeries,
    pub rolling_mean: Vec<Option<f64>>,
    pub rolling_std: Vec<Option<f64>>,
    pub unit_root: UnitRootResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct DatedDecomposition {
    pub dates: Vec<NaiveDate>,
    #[serde(flatten)]
    pub components: Decomposition,
}

impl StationarityReport {
    pub fn from_table(
        table: &ObservationTable,
        config: &StationarityConfig,
    ) -> Result<Self, AnalysisError> {
        let daily = DailyRides::from_table(table);
        let responses = Response::USER_GROUPS
            .iter()
            .map(|&response| ResponseStationarity::new(&daily.series(response), response, config))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { responses })
    }
}

impl ResponseStationarity {
    pub fn new(
        series: &DatedSeries,
        response: Response,
        config: &StationarityConfig,
    ) -> Result<Self, AnalysisError> {
        let analyze = |series: &DatedSeries| StationarityResult::new(series, config.window, config.centered);

        let original = analyze(series)?;
        log_result(response, "original", &original);

        let ma_difference = rolling::moving_average_difference(&series.values, config.detrend_window)?;
        let moving_average_difference =
            analyze(&DatedSeries::from_partial(&series.dates, &ma_difference))?;
        log_result(response, "moving-average difference", &moving_average_difference);

        let lag_difference = rolling::lag_difference(&series.values, 1);
        let lag_difference = analyze(&DatedSeries::from_partial(&series.dates, &lag_difference))?;
        log_result(response, "lag-1 difference", &lag_difference);

        let components = decomposition::decompose(&series.values, config.period)?;
        let residual = analyze(&DatedSeries::from_partial(&series.dates, &components.residual))?;
        log_result(response, "decomposition residual", &residual);

        Ok(Self {
            response,
            original,
            moving_average_difference,
            lag_difference,
            decomposition: DatedDecomposition {
                dates: series.dates.clone(),
                components,
            },
            residual,
        })
    }
}

impl StationarityResult {
    /// Rolling statistics over `window` points and the unit-root test of `series`.
    pub fn new(series: &DatedSeries, window: usize, centered: bool) -> Result<Self, AnalysisError> {
        let rolling = rolling::rolling_statistics(&series.values, window, centered)?;
        let unit_root = unit_root::unit_root_test(&series.values)?;
        Ok(Self {
            series: series.clone(),
            rolling_mean: rolling.mean,
            rolling_std: rolling.std_dev,
            unit_root,
        })
    }
}

fn log_result(response: Response, stage: &str, result: &StationarityResult) {
    log::info!(
        "{response} {stage}: Dickey-Fuller statistic {:.3}, p-value {:.3} ({} lags, {} observations)",
        result.unit_root.statistic,
        result.unit_root.p_value,
        result.unit_root.used_lag,
        result.unit_root.nobs
    );
}

#[cfg(test)]
mod tests {
    use chrono::Days;

    use super::*;
    use crate::record::tests::observation;

    const DAYS: u32 = 140;

    /// Registered rides follow a random walk, casual rides a weekly pattern
    /// plus noise; both driven by a chaotic logistic map.
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn table() -> ObservationTable {
        let start = NaiveDate::from_ymd_opt(2011, 1, 1).unwrap();
        let weekly = [0.0, 1.0, 2.0, 3.0, 2.0, 5.0, 6.0];
        let mut x: f64 = 0.3;
        let mut walk: f64 = 0.0;
        (0..DAYS)
            .map(|day| {
                x = 3.99 * x * (1.0 - x);
                let noise = x - 0.5;
                walk += noise;
                let registered = (2000.0 + 400.0 * walk).round() as u32;
                let casual = (300.0 + 40.0 * weekly[day as usize % 7] + 100.0 * noise).round() as u32;
                let date = start + Days::new(u64::from(day));
                observation(&date.to_string(), 0, registered, casual)
            })
            .collect()
    }

    #[test]
    fn test_series_lengths_and_alignment() {
        let report = StationarityReport::from_table(&table(), &StationarityConfig::default()).unwrap();
        assert_eq!(report.responses.len(), 2);
        let n = DAYS as usize;
        for stationarity in &report.responses {
            assert_eq!(stationarity.original.series.len(), n);
            assert_eq!(stationarity.original.rolling_mean.len(), n);
            assert_eq!(stationarity.moving_average_difference.series.len(), n - 9);
            assert_eq!(stationarity.lag_difference.series.len(), n - 1);
            assert_eq!(stationarity.residual.series.len(), n - 6);
            assert_eq!(stationarity.decomposition.dates.len(), n);

            let dates = &stationarity.original.series.dates;
            assert_eq!(stationarity.lag_difference.series.dates[0], dates[1]);
            assert_eq!(stationarity.moving_average_difference.series.dates[0], dates[9]);
            assert_eq!(stationarity.residual.series.dates[0], dates[3]);
            assert_eq!(stationarity.residual.series.dates.last(), dates.get(n - 4));
        }
    }

    #[test]
    fn test_random_walk_needs_detrending() {
        let report = StationarityReport::from_table(&table(), &StationarityConfig::default()).unwrap();
        let registered = &report.responses[0];
        assert_eq!(registered.response, Response::Registered);
        assert!(registered.original.unit_root.p_value > 0.5);
        assert!(registered.moving_average_difference.unit_root.p_value < 0.05);
        assert!(registered.lag_difference.unit_root.p_value < 0.01);
        assert!(registered.residual.unit_root.p_value < 0.01);
    }

    #[test]
    fn test_weekly_pattern_residual_is_stationary() {
        let report = StationarityReport::from_table(&table(), &StationarityConfig::default()).unwrap();
        let casual = &report.responses[1];
        assert!(casual.residual.unit_root.p_value < 0.01);
        let seasonal = &casual.decomposition.components.seasonal;
        assert!(seasonal[..7].iter().sum::<f64>().abs() < 1e-6);
    }

    #[test]
    fn test_centered_window_nulls_both_ends() {
        let report = StationarityReport::from_table(&table(), &StationarityConfig::default()).unwrap();
        let mean = &report.responses[0].original.rolling_mean;
        // window 10 centered: 5 leading and 4 trailing nulls
        assert_eq!(mean.iter().take_while(|v| v.is_none()).count(), 5);
        assert_eq!(mean.iter().rev().take_while(|v| v.is_none()).count(), 4);
    }

    #[test]
    fn test_short_history_is_rejected() {
        let table: ObservationTable = table().observations.into_iter().take(15).collect();
        let err = StationarityReport::from_table(&table, &StationarityConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::Stats(bikeshare_stats::StatsError::InsufficientSample { .. })
        ));
    }
}
