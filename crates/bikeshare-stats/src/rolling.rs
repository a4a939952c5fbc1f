//! Rolling-window statistics and simple detrending transforms
//!
//! Outputs keep the length of the input; positions without a full window
//! are `None`. Detrended series can then be cleaned with [`drop_nulls`]
//! (or [`drop_nulls_with`] to keep a parallel index aligned).

use serde::Serialize;

use crate::{StatsError, descriptive};

/// Rolling mean and standard deviation of a series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RollingStatistics {
    pub mean: Vec<Option<f64>>,
    pub std_dev: Vec<Option<f64>>,
}

/// Computes rolling mean and sample standard deviation over `window` points.
///
/// A trailing window covers `[i + 1 - window, i]`. A centered window covers
/// `[i - window / 2, i - window / 2 + window - 1]`, so even windows lean one
/// point towards the past. A window of one point has zero deviation.
///
/// # Errors
///
/// [`StatsError::InvalidWindow`] if `window == 0`.
///
/// # Examples
///
/// ```
/// use bikeshare_stats::rolling::rolling_statistics;
///
/// let stats = rolling_statistics(&[1.0, 2.0, 3.0, 4.0], 2, false).unwrap();
/// assert_eq!(stats.mean, vec![None, Some(1.5), Some(2.5), Some(3.5)]);
/// ```
pub fn rolling_statistics(
    series: &[f64],
    window: usize,
    centered: bool,
) -> Result<RollingStatistics, StatsError> {
    let bounds = window_bounds(series.len(), window, centered)?;
    let mut mean = Vec::with_capacity(series.len());
    let mut std_dev = Vec::with_capacity(series.len());
    for range in bounds {
        match range {
            Some((start, end)) => {
                let values = &series[start..=end];
                mean.push(descriptive::mean(values));
                std_dev.push(Some(descriptive::sample_std_dev(values).unwrap_or(0.0)));
            }
            None => {
                mean.push(None);
                std_dev.push(None);
            }
        }
    }
    Ok(RollingStatistics { mean, std_dev })
}

/// Rolling mean only.
pub fn rolling_mean(
    series: &[f64],
    window: usize,
    centered: bool,
) -> Result<Vec<Option<f64>>, StatsError> {
    Ok(window_bounds(series.len(), window, centered)?
        .into_iter()
        .map(|range| range.and_then(|(start, end)| descriptive::mean(&series[start..=end])))
        .collect())
}

/// `series[i] - trailing_rolling_mean(series, window)[i]`.
pub fn moving_average_difference(
    series: &[f64],
    window: usize,
) -> Result<Vec<Option<f64>>, StatsError> {
    let mean = rolling_mean(series, window, false)?;
    Ok(series
        .iter()
        .zip(mean)
        .map(|(value, mean)| mean.map(|m| value - m))
        .collect())
}

/// `series[i] - series[i - lag]`; the first `lag` entries are `None`.
///
/// ```
/// use bikeshare_stats::rolling::lag_difference;
///
/// assert_eq!(lag_difference(&[1.0, 4.0, 9.0], 1), vec![None, Some(3.0), Some(5.0)]);
/// ```
#[must_use]
pub fn lag_difference(series: &[f64], lag: usize) -> Vec<Option<f64>> {
    (0..series.len())
        .map(|i| i.checked_sub(lag).map(|j| series[i] - series[j]))
        .collect()
}

/// Removes `None` entries.
#[must_use]
pub fn drop_nulls(series: &[Option<f64>]) -> Vec<f64> {
    series.iter().flatten().copied().collect()
}

/// Removes `None` entries together with the matching entries of `index`.
///
/// # Panics
///
/// Panics if `index` and `series` have different lengths.
#[must_use]
pub fn drop_nulls_with<T>(index: &[T], series: &[Option<f64>]) -> (Vec<T>, Vec<f64>)
where
    T: Clone,
{
    assert_eq!(index.len(), series.len(), "index and series must align");
    index
        .iter()
        .zip(series)
        .filter_map(|(key, value)| value.map(|v| (key.clone(), v)))
        .unzip()
}

fn window_bounds(
    len: usize,
    window: usize,
    centered: bool,
) -> Result<Vec<Option<(usize, usize)>>, StatsError> {
    if window == 0 {
        return Err(StatsError::InvalidWindow { window });
    }
    let bounds = (0..len)
        .map(|i| {
            let start = if centered {
                i.checked_sub(window / 2)?
            } else {
                (i + 1).checked_sub(window)?
            };
            let end = start + window - 1;
            (end < len).then_some((start, end))
        })
        .collect();
    Ok(bounds)
}
