use std::ops::Range;

use serde::Serialize;

/// A histogram representation of a dataset's distribution.
///
/// The data range `[min, max]` is divided into `num_bins` bins of equal
/// width; the last bin is closed on the right so the maximum is counted.
/// Used for the ride-count distributions of registered vs. casual users.
#[derive(Debug, Clone, Serialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

/// A single bin in a histogram.
#[derive(Debug, Clone, Serialize)]
pub struct HistogramBin {
    /// The range of values covered by this bin (inclusive start, exclusive end).
    pub range: Range<f64>,
    /// The number of values that fall within this bin's range.
    pub count: u64,
    /// `count` divided by the total number of values.
    pub frequency: f64,
}

impl Histogram {
    /// Creates an equal-width histogram.
    ///
    /// Returns an empty histogram for empty input or `num_bins == 0`. When all
    /// values coincide a single unit-wide bin is produced.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bikeshare_stats::histogram::Histogram;
    /// let values = [1.0, 2.0, 2.0, 3.0, 4.0];
    /// let histogram = Histogram::new(&values, 3);
    /// let counts = histogram.bins.iter().map(|b| b.count).collect::<Vec<_>>();
    /// assert_eq!(counts, vec![1, 2, 2]);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new(values: &[f64], num_bins: usize) -> Self {
        if values.is_empty() || num_bins == 0 {
            return Self { bins: vec![] };
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let total = values.len() as f64;

        if max - min < f64::EPSILON {
            return Self {
                bins: vec![HistogramBin {
                    range: min..min + 1.0,
                    count: values.len() as u64,
                    frequency: 1.0,
                }],
            };
        }

        let width = (max - min) / num_bins as f64;
        // recompute edges from `min` to avoid accumulating rounding errors
        let inner_edges = (1..num_bins)
            .map(|idx| min + idx as f64 * width)
            .collect::<Vec<_>>();
        let mut counts = vec![0_u64; num_bins];
        for &value in values {
            counts[inner_edges.partition_point(|&edge| edge <= value)] += 1;
        }

        let bins = counts
            .into_iter()
            .enumerate()
            .map(|(idx, count)| {
                let start = if idx == 0 { min } else { inner_edges[idx - 1] };
                // the last bin is closed so the maximum is counted
                let end = inner_edges.get(idx).copied().unwrap_or(max.next_up());
                HistogramBin {
                    range: start..end,
                    count,
                    frequency: count as f64 / total,
                }
            })
            .collect();

        Self { bins }
    }

    /// Total number of values counted across all bins.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count).sum()
    }
}
