//! Weather covariates against ride counts
//!
//! For each covariate, Pearson and Spearman correlations with registered and
//! with casual rides, each reported under its own response. A Pearson matrix
//! over the covariates and both responses completes the picture.

use bikeshare_stats::correlation::{self, CorrelationResult};
use serde::Serialize;

use crate::{
    AnalysisError,
    record::{Column, Covariate, ObservationTable, Response},
};

#[derive(Debug, Clone, Serialize)]
pub struct WeatherReport {
    pub correlations: Vec<CovariateCorrelation>,
    pub matrix: CorrelationMatrix,
}

/// Correlations of one covariate with registered and casual rides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CovariateCorrelation {
    pub covariate: Covariate,
    pub pearson_registered: f64,
    pub pearson_casual: f64,
    pub spearman_registered: f64,
    pub spearman_casual: f64,
}

/// Symmetric Pearson matrix; `values[i][j]` correlates `labels[i]` and `labels[j]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub labels: Vec<Column>,
    pub values: Vec<Vec<f64>>,
}

impl WeatherReport {
    pub fn from_table(table: &ObservationTable) -> Result<Self, AnalysisError> {
        let registered = table.response_values(Response::Registered);
        let casual = table.response_values(Response::Casual);

        let correlations = Covariate::ALL
            .iter()
            .map(|&covariate| {
                let values = table.covariate_values(covariate);
                let result = correlation::correlate(&values, &registered, &casual)?;
                log::debug!(
                    "{covariate}: pearson {:.3}/{:.3}, spearman {:.3}/{:.3}",
                    result.pearson_a,
                    result.pearson_b,
                    result.spearman_a,
                    result.spearman_b
                );
                Ok::<_, AnalysisError>(CovariateCorrelation::new(covariate, result))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut columns = Covariate::ALL
            .iter()
            .map(|&covariate| (covariate.into(), table.covariate_values(covariate)))
            .collect::<Vec<(Column, _)>>();
        columns.push((Response::Registered.into(), registered));
        columns.push((Response::Casual.into(), casual));
        let matrix = CorrelationMatrix::new(columns)?;

        Ok(Self {
            correlations,
            matrix,
        })
    }
}

impl CovariateCorrelation {
    fn new(covariate: Covariate, result: CorrelationResult) -> Self {
        Self {
            covariate,
            pearson_registered: result.pearson_a,
            pearson_casual: result.pearson_b,
            spearman_registered: result.spearman_a,
            spearman_casual: result.spearman_b,
        }
    }
}

impl CorrelationMatrix {
    fn new(columns: Vec<(Column, Vec<f64>)>) -> Result<Self, AnalysisError> {
        let (labels, values): (Vec<_>, Vec<_>) = columns.into_iter().unzip();
        let slices = values.iter().map(Vec::as_slice).collect::<Vec<_>>();
        Ok(Self {
            values: correlation::pearson_matrix(&slices)?,
            labels,
        })
    }

    #[must_use]
    pub fn get(&self, row: Column, column: Column) -> Option<f64> {
        let i = self.labels.iter().position(|&label| label == row)?;
        let j = self.labels.iter().position(|&label| label == column)?;
        Some(self.values[i][j])
    }
}
