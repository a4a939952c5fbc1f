//! Ordinary least squares
//!
//! Only what the unit-root test needs: coefficients, their standard errors,
//! the residual sum of squares and the Gaussian log-likelihood for
//! information criteria. The normal equations are solved through a
//! Cholesky factorization of `XᵀX`.

use nalgebra::{DMatrix, DVector};

use crate::StatsError;

const RESIDUAL_TOLERANCE: f64 = 1e-20;
const PIVOT_TOLERANCE: f64 = 1e-12;

/// Fitted linear model `y = X β + ε`.
#[derive(Debug, Clone)]
pub struct OlsFit {
    /// Estimated coefficients, one per design-matrix column.
    pub coefficients: Vec<f64>,
    /// Standard error of each coefficient.
    pub std_errors: Vec<f64>,
    /// Residual sum of squares.
    pub ssr: f64,
    /// Number of observations (rows).
    pub nobs: usize,
}

impl OlsFit {
    /// Fits `y` on the columns of `design` (row-major, one row per observation).
    ///
    /// # Errors
    ///
    /// * [`StatsError::LengthMismatch`] if rows and `y` differ in length, or
    ///   rows have different widths
    /// * [`StatsError::InsufficientSample`] if there are not more rows than columns
    /// * [`StatsError::DegenerateInput`] if the columns are collinear or the
    ///   fit leaves no residual variance
    ///
    /// # Examples
    ///
    /// ```
    /// use bikeshare_stats::regression::OlsFit;
    ///
    /// let rows = vec![vec![1.0, 0.0], vec![1.0, 1.0], vec![1.0, 2.0], vec![1.0, 3.0]];
    /// let y = [1.1, 2.9, 5.2, 6.8];
    /// let fit = OlsFit::fit(&rows, &y).unwrap();
    /// assert!((fit.coefficients[1] - 1.94).abs() < 1e-9);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    pub fn fit(design: &[Vec<f64>], y: &[f64]) -> Result<Self, StatsError> {
        if design.len() != y.len() {
            return Err(StatsError::LengthMismatch {
                expected: design.len(),
                actual: y.len(),
            });
        }
        let k = design.first().map_or(0, Vec::len);
        if let Some(row) = design.iter().find(|row| row.len() != k) {
            return Err(StatsError::LengthMismatch {
                expected: k,
                actual: row.len(),
            });
        }
        let nobs = y.len();
        if k == 0 || nobs <= k {
            return Err(StatsError::InsufficientSample {
                required: k + 1,
                actual: nobs,
            });
        }

        let x = DMatrix::from_fn(nobs, k, |r, c| design[r][c]);
        let y = DVector::from_column_slice(y);
        let xtx = x.transpose() * &x;
        let xty = x.transpose() * &y;

        let collinear = || StatsError::degenerate("collinear regressors in least squares fit");
        let cholesky = xtx.clone().cholesky().ok_or_else(collinear)?;
        let l = cholesky.l();
        let weak_pivot = |j: usize| {
            let pivot = l[(j, j)].powi(2);
            pivot.is_nan() || pivot <= PIVOT_TOLERANCE * xtx[(j, j)]
        };
        if (0..k).any(weak_pivot) {
            return Err(collinear());
        }
        let beta = cholesky.solve(&xty);
        let xtx_inv = cholesky.inverse();

        let residuals = &y - &x * &beta;
        let ssr = residuals.norm_squared();
        // exact fits leave rounding noise, not zero
        if ssr.is_nan() || ssr <= RESIDUAL_TOLERANCE * y.norm_squared() {
            return Err(StatsError::degenerate(
                "least squares fit leaves no residual variance",
            ));
        }

        let sigma2 = ssr / (nobs - k) as f64;
        let std_errors = (0..k).map(|j| (sigma2 * xtx_inv[(j, j)]).sqrt()).collect();

        Ok(Self {
            coefficients: beta.iter().copied().collect(),
            std_errors,
            ssr,
            nobs,
        })
    }

    /// t statistic of coefficient `j`.
    #[must_use]
    pub fn t_value(&self, j: usize) -> f64 {
        self.coefficients[j] / self.std_errors[j]
    }

    /// Gaussian log-likelihood at the fitted coefficients.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn log_likelihood(&self) -> f64 {
        let n = self.nobs as f64;
        -0.5 * n * ((2.0 * std::f64::consts::PI).ln() + (self.ssr / n).ln() + 1.0)
    }

    /// Akaike information criterion, `2k - 2 ln L`.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn aic(&self) -> f64 {
        2.0 * self.coefficients.len() as f64 - 2.0 * self.log_likelihood()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_intercept(xs: &[f64]) -> Vec<Vec<f64>> {
        xs.iter().map(|&x| vec![1.0, x]).collect()
    }

    #[test]
    fn test_simple_regression() {
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0];
        let y = [1.0, 3.1, 4.9, 7.2, 8.8];
        let fit = OlsFit::fit(&with_intercept(&xs), &y).unwrap();
        // slope = Sxy / Sxx = 19.7 / 10, intercept = mean(y) - slope * mean(x)
        assert!((fit.coefficients[1] - 1.97).abs() < 1e-9);
        assert!((fit.coefficients[0] - (5.0 - 1.97 * 2.0)).abs() < 1e-9);
        assert!(fit.std_errors.iter().all(|se| *se > 0.0));
        assert_eq!(fit.nobs, 5);
    }

    #[test]
    fn test_collinear_columns_are_degenerate() {
        let rows = vec![
            vec![1.0, 2.0],
            vec![2.0, 4.0],
            vec![3.0, 6.0],
            vec![4.0, 8.0],
        ];
        let err = OlsFit::fit(&rows, &[1.0, 2.0, 3.0, 5.0]).unwrap_err();
        assert!(matches!(err, StatsError::DegenerateInput { .. }));
    }

    #[test]
    fn test_exact_fit_is_degenerate() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        let y = xs.iter().map(|x| 3.0 * x - 1.0).collect::<Vec<_>>();
        let err = OlsFit::fit(&with_intercept(&xs), &y).unwrap_err();
        assert!(matches!(err, StatsError::DegenerateInput { .. }));
    }

    #[test]
    fn test_requires_more_rows_than_columns() {
        let err = OlsFit::fit(&with_intercept(&[1.0, 2.0]), &[1.0, 2.0]).unwrap_err();
        assert_eq!(
            err,
            StatsError::InsufficientSample {
                required: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_aic_prefers_the_better_fit() {
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        let y = [0.1, 1.9, 4.2, 5.8, 8.1, 9.9, 12.2, 13.8];
        let slope = OlsFit::fit(&with_intercept(&xs), &y).unwrap();
        let rows = xs.iter().map(|_| vec![1.0]).collect::<Vec<_>>();
        let constant = OlsFit::fit(&rows, &y).unwrap();
        assert!(slope.aic() < constant.aic());
    }
}
