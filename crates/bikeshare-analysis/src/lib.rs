//! Exploratory analysis of the bike-sharing dataset
//!
//! This crate turns raw hourly (or daily) rental rows into normalized
//! observations and derives the reports behind the exploratory charts:
//! descriptive summaries, usage profiles, hypothesis tests, weather
//! correlations and stationarity diagnostics.
//!
//! # Overview
//!
//! ## Normalization Workflow
//!
//! 1. **Load Raw Rows** ([`record::RawRecord`]): One CSV row with integer codes
//! 2. **Normalize** ([`normalization::normalize`]): Decode labels, rescale
//!    humidity and windspeed, check `registered + casual == total`
//! 3. **Store** ([`record::ObservationTable`]): Serializable snapshot reused by
//!    every report
//!
//! ## Report Workflow
//!
//! Every report is built from an [`record::ObservationTable`] and a small
//! config struct with the defaults of the published analysis:
//!
//! - **Summary** ([`summary::TableSummary`]): Shape, date range and per-column
//!   statistics
//! - **Usage** ([`usage::UsageReport`]): Ride distributions, smoothed daily
//!   totals and mean profiles by weekday, season and hour
//! - **Hypotheses** ([`hypothesis::HypothesisReport`]): Biased and unbiased
//!   one-sample tests plus weekend vs. working-day two-sample tests
//! - **Weather** ([`weather::WeatherReport`]): Pearson and Spearman
//!   correlations between weather covariates and rides
//! - **Stationarity** ([`stationarity::StationarityReport`]): Rolling statistics
//!   and unit-root tests of daily rides, raw and detrended
//!
//! # Examples
//!
//! ```
//! use bikeshare_analysis::{
//!     normalization::normalize,
//!     record::{Covariate, RawRecord},
//!     summary::TableSummary,
//! };
//!
//! let csv = "\
//! instant,dteday,season,yr,mnth,hr,holiday,weekday,workingday,weathersit,temp,atemp,hum,windspeed,casual,registered,cnt
//! 1,2011-01-01,1,0,1,0,0,6,0,1,0.24,0.2879,0.81,0.0,3,13,16
//! 2,2011-01-01,1,0,1,1,0,6,0,1,0.22,0.2727,0.8,0.0,8,32,40
//! ";
//! let raw = csv::Reader::from_reader(csv.as_bytes())
//!     .deserialize()
//!     .collect::<Result<Vec<RawRecord>, _>>()
//!     .unwrap();
//! let table = normalize(&raw).unwrap();
//! let summary = TableSummary::from_table(&table);
//! assert_eq!(summary.rows, 2);
//! assert_eq!(summary.column(Covariate::Humidity.into()).unwrap().stats.max, 81.0);
//! ```

pub mod category;
pub mod daily;
pub mod hypothesis;
pub mod normalization;
pub mod record;
pub mod sample;
pub mod stationarity;
pub mod summary;
pub mod usage;
pub mod weather;

use bikeshare_stats::StatsError;

use crate::normalization::NormalizeError;

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum AnalysisError {
    #[display("{_0}")]
    Stats(StatsError),
    #[display("{_0}")]
    Normalize(NormalizeError),
    #[display("invalid sampling fraction {fraction}: must be in (0, 1]")]
    #[from(ignore)]
    InvalidFraction { fraction: f64 },
}
