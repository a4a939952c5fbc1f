//! Additive seasonal decomposition
//!
//! Splits a series into a centered moving-average trend, a repeating
//! seasonal pattern of fixed period and the residual left over. The
//! residual of daily rides with a weekly period is what the stationarity
//! report tests for a unit root.

use serde::Serialize;

use crate::{StatsError, descriptive};

/// Additive decomposition `series = trend + seasonal + residual`.
///
/// `trend` and `residual` are `None` where the centered moving average has
/// no full window; `seasonal` is defined everywhere.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decomposition {
    pub trend: Vec<Option<f64>>,
    pub seasonal: Vec<f64>,
    pub residual: Vec<Option<f64>>,
    pub period: usize,
}

/// Decomposes `series` into trend, seasonal and residual components.
///
/// - **trend**: centered moving average over `period` points. An even
///   period uses `period + 1` points with half weight at both ends, so the
///   average stays centered on the current position.
/// - **seasonal**: mean detrended value for each position within the
///   period, shifted to sum to zero over one period, tiled across the series.
/// - **residual**: `series - trend - seasonal`.
///
/// # Errors
///
/// [`StatsError::InvalidPeriod`] if `period < 2` or `period >= series.len()`.
///
/// # Examples
///
/// ```
/// use bikeshare_stats::decomposition::decompose;
///
/// let weekly = [1.0, 5.0, 3.0].repeat(6);
/// let parts = decompose(&weekly, 3).unwrap();
/// assert_eq!(parts.seasonal[..3], [-2.0, 2.0, 0.0]);
/// ```
pub fn decompose(series: &[f64], period: usize) -> Result<Decomposition, StatsError> {
    if period < 2 || period >= series.len() {
        return Err(StatsError::InvalidPeriod {
            period,
            len: series.len(),
        });
    }

    let trend = centered_moving_average(series, period);

    let mut position_values = vec![vec![]; period];
    for (i, (value, trend)) in series.iter().zip(&trend).enumerate() {
        if let Some(trend) = trend {
            position_values[i % period].push(value - trend);
        }
    }
    let mut position_means = position_values
        .iter()
        .map(|values| descriptive::mean(values).unwrap_or(0.0))
        .collect::<Vec<_>>();
    let offset = descriptive::mean(&position_means).unwrap_or(0.0);
    for mean in &mut position_means {
        *mean -= offset;
    }

    let seasonal = (0..series.len())
        .map(|i| position_means[i % period])
        .collect::<Vec<_>>();
    let residual = series
        .iter()
        .zip(&trend)
        .zip(&seasonal)
        .map(|((value, trend), seasonal)| trend.map(|t| value - t - seasonal))
        .collect();

    Ok(Decomposition {
        trend,
        seasonal,
        residual,
        period,
    })
}

#[expect(clippy::cast_precision_loss)]
fn centered_moving_average(series: &[f64], period: usize) -> Vec<Option<f64>> {
    let half = period / 2;
    let weights = if period % 2 == 0 {
        let mut weights = vec![1.0; period + 1];
        weights[0] = 0.5;
        weights[period] = 0.5;
        weights
    } else {
        vec![1.0; period]
    };
    let scale = period as f64;

    (0..series.len())
        .map(|i| {
            let start = i.checked_sub(half)?;
            let window = series.get(start..start + weights.len())?;
            let sum = window
                .iter()
                .zip(&weights)
                .map(|(value, weight)| value * weight)
                .sum::<f64>();
            Some(sum / scale)
        })
        .collect()
}
