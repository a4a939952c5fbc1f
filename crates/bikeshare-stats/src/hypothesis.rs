//! Student and Welch t-tests for comparing subgroup means
//!
//! Both tests are two-tailed. How a sample was drawn is the caller's
//! business: a sample restricted to one season answers a different question
//! than a uniform random subset, and nothing here tries to correct for that.

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::{StatsError, descriptive};

/// Outcome of a t-test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TestResult {
    /// The t statistic.
    pub statistic: f64,
    /// Two-tailed p-value in `[0, 1]`.
    pub p_value: f64,
    /// Degrees of freedom of the reference Student-t distribution.
    pub degrees_of_freedom: f64,
}

const MIN_SAMPLE: usize = 2;

/// One-sample t-test of `H0: mean(sample) == population_mean`.
///
/// Uses the Bessel-corrected sample standard deviation and `n - 1`
/// degrees of freedom.
///
/// # Errors
///
/// * [`StatsError::InsufficientSample`] if the sample has fewer than two values
/// * [`StatsError::DegenerateInput`] if every sample value is identical
///
/// # Examples
///
/// ```
/// use bikeshare_stats::hypothesis::one_sample_test;
///
/// let sample = [4.8, 5.1, 5.0, 4.9, 5.2];
/// let result = one_sample_test(&sample, 5.0).unwrap();
/// assert!(result.p_value > 0.5);
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn one_sample_test(sample: &[f64], population_mean: f64) -> Result<TestResult, StatsError> {
    let (mean, variance) = mean_and_variance(sample)?;
    if variance <= 0.0 {
        return Err(StatsError::degenerate(
            "one-sample t-test on a sample with zero variance",
        ));
    }
    let n = sample.len() as f64;
    let std_error = (variance / n).sqrt();
    let statistic = (mean - population_mean) / std_error;
    let degrees_of_freedom = n - 1.0;
    Ok(TestResult {
        statistic,
        p_value: two_tailed_p_value(statistic, degrees_of_freedom)?,
        degrees_of_freedom,
    })
}

/// Independent two-sample t-test of `H0: mean(a) == mean(b)`.
///
/// With `equal_variance` the pooled-variance Student test is used
/// (`n_a + n_b - 2` degrees of freedom); otherwise Welch's test with
/// Welch–Satterthwaite degrees of freedom. Swapping `a` and `b` flips the
/// sign of the statistic and leaves the p-value unchanged.
///
/// # Errors
///
/// * [`StatsError::InsufficientSample`] if either sample has fewer than two values
/// * [`StatsError::DegenerateInput`] if the standard error of the difference is zero
#[expect(clippy::cast_precision_loss)]
pub fn two_sample_test(
    a: &[f64],
    b: &[f64],
    equal_variance: bool,
) -> Result<TestResult, StatsError> {
    let (mean_a, var_a) = mean_and_variance(a)?;
    let (mean_b, var_b) = mean_and_variance(b)?;
    let n_a = a.len() as f64;
    let n_b = b.len() as f64;

    let (std_error, degrees_of_freedom) = if equal_variance {
        let df = n_a + n_b - 2.0;
        let pooled = ((n_a - 1.0) * var_a + (n_b - 1.0) * var_b) / df;
        ((pooled * (1.0 / n_a + 1.0 / n_b)).sqrt(), df)
    } else {
        let va = var_a / n_a;
        let vb = var_b / n_b;
        let df = (va + vb).powi(2) / (va.powi(2) / (n_a - 1.0) + vb.powi(2) / (n_b - 1.0));
        ((va + vb).sqrt(), df)
    };
    if std_error <= 0.0 || !std_error.is_finite() {
        return Err(StatsError::degenerate(
            "two-sample t-test where both samples have zero variance",
        ));
    }

    let statistic = (mean_a - mean_b) / std_error;
    Ok(TestResult {
        statistic,
        p_value: two_tailed_p_value(statistic, degrees_of_freedom)?,
        degrees_of_freedom,
    })
}

fn mean_and_variance(sample: &[f64]) -> Result<(f64, f64), StatsError> {
    if sample.len() < MIN_SAMPLE {
        return Err(StatsError::InsufficientSample {
            required: MIN_SAMPLE,
            actual: sample.len(),
        });
    }
    let mean = descriptive::mean(sample).unwrap_or_default();
    let variance = descriptive::sample_variance(sample).unwrap_or_default();
    Ok((mean, variance))
}

fn two_tailed_p_value(statistic: f64, degrees_of_freedom: f64) -> Result<f64, StatsError> {
    let dist = StudentsT::new(0.0, 1.0, degrees_of_freedom).map_err(|e| {
        StatsError::degenerate(format!(
            "Student-t distribution with {degrees_of_freedom} degrees of freedom: {e}"
        ))
    })?;
    // sf(|t|) keeps precision in the far tail where 1 - cdf would round to zero
    Ok((2.0 * dist.sf(statistic.abs())).clamp(0.0, 1.0))
}
