//! Augmented Dickey-Fuller unit-root test
//!
//! The test regresses the first difference of the series on a constant, the
//! lagged level and a number of lagged differences:
//!
//! ```text
//! Δx[t] = α + γ x[t-1] + Σ δ_i Δx[t-i] + ε[t]
//! ```
//!
//! The null hypothesis is a unit root (`γ = 0`, non-stationary). The number
//! of lagged differences is chosen by minimising AIC, with every candidate
//! fitted on the same rows. p-values and critical values come from
//! MacKinnon's response-surface approximations for a regression with a
//! constant and no trend.

use serde::Serialize;
use statrs::function::erf::erfc;

use crate::{StatsError, is_constant, regression::OlsFit};

/// Shortest series the test accepts.
pub const MIN_OBSERVATIONS: usize = 20;

/// Outcome of [`unit_root_test`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UnitRootResult {
    /// t statistic of the lagged level coefficient.
    pub statistic: f64,
    /// MacKinnon approximate p-value.
    pub p_value: f64,
    /// Number of lagged differences in the final regression.
    pub used_lag: usize,
    /// Rows in the final regression.
    pub nobs: usize,
    pub critical_values: CriticalValues,
}

impl UnitRootResult {
    /// Whether the unit-root null is rejected at `alpha`.
    #[must_use]
    pub fn is_stationary(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// Test-statistic thresholds at the usual significance levels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CriticalValues {
    #[serde(rename = "1%")]
    pub one_percent: f64,
    #[serde(rename = "5%")]
    pub five_percent: f64,
    #[serde(rename = "10%")]
    pub ten_percent: f64,
}

// MacKinnon (2010), constant only, one variable. Columns are b0..b3 of
// b0 + b1/T + b2/T^2 + b3/T^3.
const CRIT_1: [f64; 4] = [-3.430_35, -6.5393, -16.786, -79.433];
const CRIT_5: [f64; 4] = [-2.861_54, -2.8903, -4.234, -40.040];
const CRIT_10: [f64; 4] = [-2.566_77, -1.5384, -2.809, 0.0];

// MacKinnon (1994) p-value surface, constant only, one variable.
const TAU_MAX: f64 = 2.74;
const TAU_MIN: f64 = -18.83;
const TAU_STAR: f64 = -1.61;
const TAU_SMALL_P: [f64; 3] = [2.1659, 1.4412, 0.038_269];
const TAU_LARGE_P: [f64; 4] = [1.7339, 0.932_02, -0.127_45, -0.010_368];

/// Runs the augmented Dickey-Fuller test on `series`.
///
/// A series whose first difference is constant (an exact linear trend) has no
/// residual variance to test against; it is reported as a statistic of
/// `0.0`, which is far from rejecting the unit root.
///
/// # Errors
///
/// * [`StatsError::InsufficientSample`] if the series is shorter than
///   [`MIN_OBSERVATIONS`]
/// * [`StatsError::DegenerateInput`] if the series is constant or a
///   regression is singular
///
/// # Examples
///
/// ```
/// use bikeshare_stats::unit_root::unit_root_test;
///
/// let mut x = 0.3;
/// let noise = (0..200)
///     .map(|_| {
///         x = 3.99 * x * (1.0 - x);
///         x - 0.5
///     })
///     .collect::<Vec<f64>>();
/// let result = unit_root_test(&noise).unwrap();
/// assert!(result.is_stationary(0.01));
/// ```
pub fn unit_root_test(series: &[f64]) -> Result<UnitRootResult, StatsError> {
    let n = series.len();
    if n < MIN_OBSERVATIONS {
        return Err(StatsError::InsufficientSample {
            required: MIN_OBSERVATIONS,
            actual: n,
        });
    }
    if is_constant(series) {
        return Err(StatsError::degenerate(
            "unit-root test on a constant series",
        ));
    }

    let diffs = series.windows(2).map(|w| w[1] - w[0]).collect::<Vec<_>>();
    if is_constant(&diffs) {
        let nobs = diffs.len();
        return Ok(UnitRootResult {
            statistic: 0.0,
            p_value: mackinnon_p_value(0.0),
            used_lag: 0,
            nobs,
            critical_values: mackinnon_critical_values(nobs),
        });
    }

    let max_lag = max_lag(n);
    let used_lag = select_lag(series, &diffs, max_lag)?;
    let fit = fit_lagged(series, &diffs, used_lag, used_lag)?;
    let statistic = fit.t_value(1);

    Ok(UnitRootResult {
        statistic,
        p_value: mackinnon_p_value(statistic),
        used_lag,
        nobs: fit.nobs,
        critical_values: mackinnon_critical_values(fit.nobs),
    })
}

/// Approximate p-value of a Dickey-Fuller statistic.
///
/// ```
/// use bikeshare_stats::unit_root::mackinnon_p_value;
///
/// assert!(mackinnon_p_value(-4.0) < 0.01);
/// assert!(mackinnon_p_value(0.0) > 0.9);
/// ```
#[must_use]
pub fn mackinnon_p_value(statistic: f64) -> f64 {
    if statistic > TAU_MAX {
        return 1.0;
    }
    if statistic < TAU_MIN {
        return 0.0;
    }
    let z = if statistic <= TAU_STAR {
        polynomial(&TAU_SMALL_P, statistic)
    } else {
        polynomial(&TAU_LARGE_P, statistic)
    };
    standard_normal_cdf(z)
}

/// Critical values for a regression with `nobs` rows.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn mackinnon_critical_values(nobs: usize) -> CriticalValues {
    let inv = 1.0 / nobs as f64;
    let surface = |b: &[f64; 4]| b[0] + b[1] * inv + b[2] * inv.powi(2) + b[3] * inv.powi(3);
    CriticalValues {
        one_percent: surface(&CRIT_1),
        five_percent: surface(&CRIT_5),
        ten_percent: surface(&CRIT_10),
    }
}

/// `ceil(12 (n / 100)^(1/4))`, capped so the widest regression keeps
/// enough rows.
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn max_lag(n: usize) -> usize {
    let schwert = (12.0 * (n as f64 / 100.0).powf(0.25)).ceil() as usize;
    schwert.min(n / 2 - 2)
}

fn select_lag(series: &[f64], diffs: &[f64], max_lag: usize) -> Result<usize, StatsError> {
    let mut best = None::<(usize, f64)>;
    for lag in 0..=max_lag {
        let aic = fit_lagged(series, diffs, lag, max_lag)?.aic();
        if best.is_none_or(|(_, best_aic)| aic < best_aic) {
            best = Some((lag, aic));
        }
    }
    Ok(best.map_or(0, |(lag, _)| lag))
}

/// Fits the test regression with `lag` lagged differences on the rows
/// available after skipping the first `skip` differences (`skip >= lag`).
fn fit_lagged(series: &[f64], diffs: &[f64], lag: usize, skip: usize) -> Result<OlsFit, StatsError> {
    let (design, response): (Vec<_>, Vec<_>) = (skip..diffs.len())
        .map(|t| {
            let mut row = Vec::with_capacity(lag + 2);
            row.push(1.0);
            row.push(series[t]);
            row.extend((1..=lag).map(|i| diffs[t - i]));
            (row, diffs[t])
        })
        .unzip();
    OlsFit::fit(&design, &response)
}

fn polynomial(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

fn standard_normal_cdf(z: f64) -> f64 {
    0.5 * erfc(-z / std::f64::consts::SQRT_2)
}
