//! Hypothesis tests on registered and casual rides
//!
//! # Tests
//!
//! 1. **Biased sample**: registered rides of summer 2011 against the mean of
//!    all registered rides. The sample covers one season of one year, so a
//!    rejection says more about the sample than about the population.
//! 2. **Unbiased sample**: a seeded uniform random fraction of all
//!    registered rides against the same mean.
//! 3. **Weekend vs. working days**: two-sample tests for registered and for
//!    casual rides, Saturday and Sunday forming the weekend.

use bikeshare_stats::{
    StatsError, descriptive,
    hypothesis::{self, TestResult},
};
use serde::Serialize;

use crate::{
    AnalysisError,
    category::{Season, Year},
    record::{ObservationTable, Response},
    sample,
};

/// Knobs of the hypothesis report.
#[derive(Debug, Clone, Copy)]
pub struct HypothesisConfig {
    pub seed: u64,
    /// Share of rows drawn for the unbiased sample.
    pub fraction: f64,
    /// Pooled-variance (Student) instead of Welch two-sample tests.
    pub equal_variance: bool,
}

impl Default for HypothesisConfig {
    fn default() -> Self {
        Self {
            seed: 111,
            fraction: 0.5,
            equal_variance: true,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HypothesisReport {
    /// Mean registered rides over the whole table.
    pub population_mean: f64,
    pub biased_sample: OneSampleOutcome,
    pub unbiased_sample: OneSampleOutcome,
    pub weekend_vs_working_days: Vec<TwoSampleOutcome>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OneSampleOutcome {
    pub description: String,
    pub sample_size: usize,
    pub sample_mean: f64,
    pub result: TestResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct TwoSampleOutcome {
    pub response: Response,
    pub equal_variance: bool,
    pub weekend_size: usize,
    pub working_days_size: usize,
    pub weekend_mean: f64,
    pub working_days_mean: f64,
    pub result: TestResult,
}

impl HypothesisReport {
    pub fn from_table(
        table: &ObservationTable,
        config: &HypothesisConfig,
    ) -> Result<Self, AnalysisError> {
        let registered = table.response_values(Response::Registered);
        let population_mean =
            descriptive::mean(&registered).ok_or(StatsError::InsufficientSample {
                required: 1,
                actual: 0,
            })?;

        let summer_2011 = table.response_values_where(Response::Registered, |obs| {
            obs.season == Season::Summer && obs.year == Year(2011)
        });
        let biased_sample = OneSampleOutcome::new(
            "registered rides, summer 2011".to_owned(),
            &summer_2011,
            population_mean,
        )?;

        let unbiased = sample::sample_fraction(&registered, config.fraction, config.seed)?;
        let unbiased_sample = OneSampleOutcome::new(
            format!(
                "registered rides, uniform {:.0}% sample (seed {})",
                config.fraction * 100.0,
                config.seed
            ),
            &unbiased,
            population_mean,
        )?;
        log::debug!(
            "one-sample tests: biased p = {:.3}, unbiased p = {:.3}",
            biased_sample.result.p_value,
            unbiased_sample.result.p_value
        );

        let weekend_vs_working_days = Response::USER_GROUPS
            .iter()
            .map(|&response| TwoSampleOutcome::weekend_vs_working_days(table, response, config))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            population_mean,
            biased_sample,
            unbiased_sample,
            weekend_vs_working_days,
        })
    }
}

impl OneSampleOutcome {
    fn new(
        description: String,
        sample: &[f64],
        population_mean: f64,
    ) -> Result<Self, AnalysisError> {
        let result = hypothesis::one_sample_test(sample, population_mean)?;
        Ok(Self {
            description,
            sample_size: sample.len(),
            sample_mean: descriptive::mean(sample).unwrap_or(f64::NAN),
            result,
        })
    }
}

impl TwoSampleOutcome {
    fn weekend_vs_working_days(
        table: &ObservationTable,
        response: Response,
        config: &HypothesisConfig,
    ) -> Result<Self, AnalysisError> {
        let weekend = table.response_values_where(response, |obs| obs.weekday.is_weekend());
        let working_days = table.response_values_where(response, |obs| !obs.weekday.is_weekend());
        let result = hypothesis::two_sample_test(&weekend, &working_days, config.equal_variance)?;
        Ok(Self {
            response,
            equal_variance: config.equal_variance,
            weekend_size: weekend.len(),
            working_days_size: working_days.len(),
            weekend_mean: descriptive::mean(&weekend).unwrap_or(f64::NAN),
            working_days_mean: descriptive::mean(&working_days).unwrap_or(f64::NAN),
            result,
        })
    }
}
