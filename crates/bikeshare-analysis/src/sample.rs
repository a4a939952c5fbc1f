//! Seeded uniform sampling
//!
//! Random subsets are drawn without replacement from a [`Pcg32`] seeded by
//! the caller, so a given `(values, fraction, seed)` always yields the same
//! subset.

use rand::{SeedableRng as _, seq::index};
use rand_pcg::Pcg32;

use crate::AnalysisError;

/// Draws `round(fraction * len)` values uniformly without replacement.
///
/// The chosen values keep their original relative order.
///
/// # Errors
///
/// [`AnalysisError::InvalidFraction`] unless `0 < fraction <= 1`.
///
/// # Examples
///
/// ```
/// use bikeshare_analysis::sample::sample_fraction;
///
/// let values = (0..10).collect::<Vec<_>>();
/// let half = sample_fraction(&values, 0.5, 111).unwrap();
/// assert_eq!(half.len(), 5);
/// assert_eq!(half, sample_fraction(&values, 0.5, 111).unwrap());
/// ```
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn sample_fraction<T>(values: &[T], fraction: f64, seed: u64) -> Result<Vec<T>, AnalysisError>
where
    T: Clone,
{
    if !(fraction > 0.0 && fraction <= 1.0) {
        return Err(AnalysisError::InvalidFraction { fraction });
    }
    let amount = ((fraction * values.len() as f64).round() as usize).min(values.len());

    let mut rng = Pcg32::seed_from_u64(seed);
    let mut chosen = index::sample(&mut rng, values.len(), amount).into_vec();
    chosen.sort_unstable();
    Ok(chosen.into_iter().map(|i| values[i].clone()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_subset() {
        let values = (0..1000).map(f64::from).collect::<Vec<_>>();
        let a = sample_fraction(&values, 0.3, 7).unwrap();
        let b = sample_fraction(&values, 0.3, 7).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 300);
    }

    #[test]
    fn test_different_seeds_differ() {
        let values = (0..1000).collect::<Vec<_>>();
        let a = sample_fraction(&values, 0.5, 1).unwrap();
        let b = sample_fraction(&values, 0.5, 2).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_subset_without_replacement_in_order() {
        let values = (0..200).collect::<Vec<_>>();
        let subset = sample_fraction(&values, 0.25, 111).unwrap();
        assert!(subset.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_full_fraction_returns_everything() {
        let values = vec!["a", "b", "c"];
        assert_eq!(sample_fraction(&values, 1.0, 0).unwrap(), values);
    }

    #[test]
    fn test_invalid_fraction() {
        for fraction in [0.0, -0.5, 1.5, f64::NAN] {
            let err = sample_fraction(&[1, 2, 3], fraction, 0).unwrap_err();
            assert!(matches!(err, AnalysisError::InvalidFraction { .. }));
        }
    }
}
