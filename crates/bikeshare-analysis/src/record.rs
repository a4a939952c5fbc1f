//! Raw and normalized rows of the bike-sharing dataset
//!
//! # Data Structure
//!
//! ```text
//! RawRecord (one CSV row, integer codes, fractional weather)
//!     ↓ normalization::normalize
//! ObservationTable
//! └─ observations: Vec<Observation> (labels, real-world units)
//! ```
//!
//! Columns are selected through the [`Covariate`] and [`Response`]
//! enumerations rather than by name.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};

use crate::category::{Season, WeatherSituation, Weekday, Year};

/// One row of the raw hourly (or daily) CSV file.
///
/// Field names follow the CSV header. The daily file has no `hr` column,
/// in which case [`RawRecord::hour`] is `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub instant: u32,
    #[serde(rename = "dteday")]
    pub date: NaiveDate,
    pub season: u8,
    #[serde(rename = "yr")]
    pub year: u8,
    #[serde(rename = "mnth")]
    pub month: u8,
    #[serde(rename = "hr", default, skip_serializing_if = "Option::is_none")]
    pub hour: Option<u8>,
    pub holiday: u8,
    pub weekday: u8,
    #[serde(rename = "workingday")]
    pub working_day: u8,
    #[serde(rename = "weathersit")]
    pub weather: u8,
    /// Normalized temperature.
    pub temp: f64,
    /// Normalized feeling temperature.
    pub atemp: f64,
    /// Humidity as a fraction of 100 %.
    pub hum: f64,
    /// Windspeed as a fraction of 67.
    pub windspeed: f64,
    pub casual: u32,
    pub registered: u32,
    #[serde(rename = "cnt")]
    pub total: u32,
}

/// One normalized row: labels instead of codes, humidity in percent and
/// windspeed in its real-world unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub instant: u32,
    pub date: NaiveDate,
    /// Hour of day (0–23), absent for daily data.
    pub hour: Option<u8>,
    pub season: Season,
    pub year: Year,
    /// Month of year (1–12).
    pub month: u8,
    pub holiday: bool,
    pub weekday: Weekday,
    pub working_day: bool,
    pub weather: WeatherSituation,
    pub temperature: f64,
    pub feeling_temperature: f64,
    pub humidity: f64,
    pub windspeed: f64,
    pub registered: u32,
    pub casual: u32,
    pub total: u32,
}

impl Observation {
    #[must_use]
    pub fn covariate(&self, covariate: Covariate) -> f64 {
        match covariate {
            Covariate::Temperature => self.temperature,
            Covariate::FeelingTemperature => self.feeling_temperature,
            Covariate::Humidity => self.humidity,
            Covariate::Windspeed => self.windspeed,
        }
    }

    #[must_use]
    pub fn rides(&self, response: Response) -> u32 {
        match response {
            Response::Registered => self.registered,
            Response::Casual => self.casual,
            Response::Total => self.total,
        }
    }

    /// Value of a numeric column; `None` for the hour of a daily row.
    #[must_use]
    pub fn value(&self, column: Column) -> Option<f64> {
        match column {
            Column::Hour => self.hour.map(f64::from),
            Column::Month => Some(f64::from(self.month)),
            Column::Covariate(covariate) => Some(self.covariate(covariate)),
            Column::Response(response) => Some(f64::from(self.rides(response))),
        }
    }
}

/// The normalized dataset, in input order.
///
/// This is also the snapshot format written by `bikeshare normalize`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObservationTable {
    pub observations: Vec<Observation>,
}

impl ObservationTable {
    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.observations.iter()
    }

    /// Values of a numeric column, skipping rows where it is absent.
    #[must_use]
    pub fn column_values(&self, column: Column) -> Vec<f64> {
        self.iter().filter_map(|obs| obs.value(column)).collect()
    }

    /// Values of a weather covariate, one per row.
    #[must_use]
    pub fn covariate_values(&self, covariate: Covariate) -> Vec<f64> {
        self.iter().map(|obs| obs.covariate(covariate)).collect()
    }

    /// Ride counts of a response as floats, one per row.
    #[must_use]
    pub fn response_values(&self, response: Response) -> Vec<f64> {
        self.response_values_where(response, |_| true)
    }

    /// Ride counts of a response for the rows matching `filter`.
    pub fn response_values_where<F>(&self, response: Response, mut filter: F) -> Vec<f64>
    where
        F: FnMut(&Observation) -> bool,
    {
        self.iter()
            .filter(|obs| filter(obs))
            .map(|obs| f64::from(obs.rides(response)))
            .collect()
    }
}

impl<'a> IntoIterator for &'a ObservationTable {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Observation> for ObservationTable {
    fn from_iter<T: IntoIterator<Item = Observation>>(iter: T) -> Self {
        Self {
            observations: iter.into_iter().collect(),
        }
    }
}

/// Weather columns used as correlation covariates.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum Covariate {
    #[display("temperature")]
    Temperature,
    #[display("feeling_temperature")]
    FeelingTemperature,
    #[display("humidity")]
    Humidity,
    #[display("windspeed")]
    Windspeed,
}

impl Covariate {
    pub const ALL: [Self; 4] = [
        Self::Temperature,
        Self::FeelingTemperature,
        Self::Humidity,
        Self::Windspeed,
    ];
}

/// Ride-count columns.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum Response {
    #[display("registered")]
    Registered,
    #[display("casual")]
    Casual,
    #[display("total")]
    Total,
}

impl Response {
    /// The two user groups compared throughout the analysis.
    pub const USER_GROUPS: [Self; 2] = [Self::Registered, Self::Casual];
}

/// Any numeric column of the observation table.
///
/// Serializes and displays as the bare column label (`"hour"`,
/// `"humidity"`, `"casual"`, ...).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    derive_more::Display,
    derive_more::From,
)]
pub enum Column {
    #[display("hour")]
    #[from(ignore)]
    Hour,
    #[display("month")]
    #[from(ignore)]
    Month,
    #[display("{_0}")]
    Covariate(Covariate),
    #[display("{_0}")]
    Response(Response),
}

impl Serialize for Column {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl Column {
    /// Every numeric column, in summary order.
    pub const ALL: [Self; 9] = [
        Self::Hour,
        Self::Month,
        Self::Covariate(Covariate::Temperature),
        Self::Covariate(Covariate::FeelingTemperature),
        Self::Covariate(Covariate::Humidity),
        Self::Covariate(Covariate::Windspeed),
        Self::Response(Response::Registered),
        Self::Response(Response::Casual),
        Self::Response(Response::Total),
    ];
}
