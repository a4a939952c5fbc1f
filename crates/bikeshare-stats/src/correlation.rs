//! Linear (Pearson) and rank (Spearman) correlation
//!
//! Pearson measures linear association and understates strong relationships
//! that are monotonic but curved; Spearman is Pearson on average ranks and
//! captures any monotonic relationship. The two are always reported side by
//! side in [`CorrelationResult`].

use serde::Serialize;

use crate::{StatsError, is_constant};

/// Correlations between one covariate and two response series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CorrelationResult {
    pub pearson_a: f64,
    pub pearson_b: f64,
    pub spearman_a: f64,
    pub spearman_b: f64,
}

/// Correlates `covariate` with `response_a` and `response_b`.
///
/// # Errors
///
/// * [`StatsError::LengthMismatch`] if the three sequences differ in length
/// * [`StatsError::DegenerateInput`] if any sequence has zero variance
///   (or fewer than two values)
pub fn correlate(
    covariate: &[f64],
    response_a: &[f64],
    response_b: &[f64],
) -> Result<CorrelationResult, StatsError> {
    check_lengths(covariate, response_a)?;
    check_lengths(covariate, response_b)?;

    let covariate_ranks = average_ranks(covariate);
    Ok(CorrelationResult {
        pearson_a: pearson(covariate, response_a)?,
        pearson_b: pearson(covariate, response_b)?,
        spearman_a: pearson(&covariate_ranks, &average_ranks(response_a))?,
        spearman_b: pearson(&covariate_ranks, &average_ranks(response_b))?,
    })
}

/// Pearson correlation coefficient, clipped to `[-1, 1]`.
///
/// # Examples
///
/// ```
/// use bikeshare_stats::correlation::pearson;
///
/// let x = [1.0, 2.0, 3.0, 4.0];
/// let y = [3.0, 5.0, 7.0, 9.0];
/// assert!((pearson(&x, &y).unwrap() - 1.0).abs() < 1e-12);
/// ```
pub fn pearson(x: &[f64], y: &[f64]) -> Result<f64, StatsError> {
    check_lengths(x, y)?;
    check_spread(x)?;
    check_spread(y)?;

    #[expect(clippy::cast_precision_loss)]
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let (mut cov, mut ss_x, mut ss_y) = (0.0, 0.0, 0.0);
    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        ss_x += dx * dx;
        ss_y += dy * dy;
    }

    Ok((cov / (ss_x.sqrt() * ss_y.sqrt())).clamp(-1.0, 1.0))
}

/// Spearman rank correlation coefficient (ties receive their average rank).
pub fn spearman(x: &[f64], y: &[f64]) -> Result<f64, StatsError> {
    check_lengths(x, y)?;
    check_spread(x)?;
    check_spread(y)?;
    pearson(&average_ranks(x), &average_ranks(y))
}

/// Pairwise Pearson correlation matrix of equally long columns.
///
/// The diagonal is exactly `1.0`.
pub fn pearson_matrix(columns: &[&[f64]]) -> Result<Vec<Vec<f64>>, StatsError> {
    let mut matrix = vec![vec![1.0; columns.len()]; columns.len()];
    for i in 0..columns.len() {
        for j in (i + 1)..columns.len() {
            let r = pearson(columns[i], columns[j])?;
            matrix[i][j] = r;
            matrix[j][i] = r;
        }
    }
    Ok(matrix)
}

/// One-based ranks of `values`, ties sharing the mean of the ranks they span.
///
/// ```
/// use bikeshare_stats::correlation::average_ranks;
///
/// assert_eq!(average_ranks(&[10.0, 30.0, 20.0, 20.0]), vec![1.0, 4.0, 2.5, 2.5]);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn average_ranks(values: &[f64]) -> Vec<f64> {
    let mut order = (0..values.len()).collect::<Vec<_>>();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && values[order[end]] == values[order[start]] {
            end += 1;
        }
        // positions start..end hold ranks start+1..=end
        let rank = (start + 1 + end) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = rank;
        }
        start = end;
    }
    ranks
}

fn check_lengths(x: &[f64], y: &[f64]) -> Result<(), StatsError> {
    if x.len() == y.len() {
        Ok(())
    } else {
        Err(StatsError::LengthMismatch {
            expected: x.len(),
            actual: y.len(),
        })
    }
}

fn check_spread(values: &[f64]) -> Result<(), StatsError> {
    if values.len() < 2 || is_constant(values) {
        return Err(StatsError::degenerate(
            "correlation is undefined for a sequence with zero variance",
        ));
    }
    Ok(())
}
