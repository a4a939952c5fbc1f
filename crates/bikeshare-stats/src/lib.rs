//! Statistical primitives for the bike-sharing analysis.
//!
//! Every function in this crate is a pure computation over in-memory `f64`
//! slices. Nothing here knows about rides, dates or CSV files; the
//! `bikeshare-analysis` crate feeds columns of the observation table into
//! these routines.
//!
//! # Modules
//!
//! - [`descriptive`]: Mean, sample variance, median and friends
//! - [`percentiles`]: Linear-interpolated percentiles
//! - [`histogram`]: Equal-width frequency distributions
//! - [`hypothesis`]: One-sample and two-sample Student/Welch t-tests
//! - [`correlation`]: Pearson and Spearman correlation coefficients
//! - [`rolling`]: Rolling mean/std, lag differencing and null handling
//! - [`decomposition`]: Additive trend/seasonal/residual decomposition
//! - [`regression`]: Ordinary least squares with coefficient standard errors
//! - [`unit_root`]: Augmented Dickey-Fuller stationarity test
//!
//! # Examples
//!
//! ## Comparing two groups
//!
//! ```
//! use bikeshare_stats::hypothesis::two_sample_test;
//!
//! let weekend = [3.0, 4.0, 5.0, 4.0, 3.5];
//! let working = [7.0, 8.0, 6.5, 7.5, 8.5];
//! let result = two_sample_test(&weekend, &working, true).unwrap();
//! assert!(result.statistic < 0.0);
//! assert!(result.p_value < 0.001);
//! ```
//!
//! ## Linear vs. rank correlation
//!
//! ```
//! use bikeshare_stats::correlation::{pearson, spearman};
//!
//! let x = (0..50).map(f64::from).collect::<Vec<_>>();
//! let y = x.iter().map(|v| (v / 10.0).exp()).collect::<Vec<_>>();
//! assert!((spearman(&x, &y).unwrap() - 1.0).abs() < 1e-12);
//! assert!(pearson(&x, &y).unwrap() < 1.0);
//! ```
//!
//! ## Testing a series for a unit root
//!
//! ```
//! use bikeshare_stats::unit_root::unit_root_test;
//!
//! let trend = (0..100).map(f64::from).collect::<Vec<_>>();
//! let result = unit_root_test(&trend).unwrap();
//! assert!(result.p_value > 0.3);
//! ```

pub mod correlation;
pub mod decomposition;
pub mod descriptive;
pub mod histogram;
pub mod hypothesis;
pub mod percentiles;
pub mod regression;
pub mod rolling;
pub mod unit_root;

/// Input-validation failures raised by the statistical routines.
///
/// None of these are transient: the computations are deterministic, so the
/// same input always fails the same way.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum StatsError {
    #[display("insufficient sample: need at least {required} observations, got {actual}")]
    InsufficientSample { required: usize, actual: usize },
    #[display("length mismatch: expected {expected} values, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[display("degenerate input: {what}")]
    DegenerateInput { what: String },
    #[display("invalid window {window}: must be at least 1")]
    InvalidWindow { window: usize },
    #[display("invalid period {period} for a series of length {len}: need 2 <= period < len")]
    InvalidPeriod { period: usize, len: usize },
}

impl StatsError {
    pub(crate) fn degenerate(what: impl Into<String>) -> Self {
        Self::DegenerateInput { what: what.into() }
    }
}

/// Returns `true` when every value equals the first one up to a relative tolerance.
///
/// Constant inputs make variances vanish, which leaves t-statistics and
/// correlations undefined.
#[must_use]
pub fn is_constant(values: &[f64]) -> bool {
    let Some(&first) = values.first() else {
        return true;
    };
    let scale = values.iter().fold(1.0_f64, |acc, v| acc.max(v.abs()));
    values
        .iter()
        .all(|v| (v - first).abs() <= scale * 1e-12)
}
