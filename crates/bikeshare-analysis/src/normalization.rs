//! Feature normalization: raw integer codes to labels, fractions to units
//!
//! # Overview
//!
//! [`normalize`] turns raw CSV rows into an [`ObservationTable`]:
//!
//! 1. Each coded column is decoded through its fixed mapping
//!    ([`CodedCategory`]); `hr`, `mnth`, `holiday` and `workingday` are range
//!    checked. A code outside the mapping fails with
//!    [`NormalizeError::UnmappedCode`].
//! 2. Measurements must be finite ([`NormalizeError::NonFinite`]). Humidity
//!    is multiplied by [`HUMIDITY_SCALE`] and windspeed by
//!    [`WINDSPEED_SCALE`].
//! 3. Every row is checked for `registered + casual == total`; all offending
//!    rows are reported together in [`NormalizeError::Consistency`].
//!
//! [`denormalize`] is the inverse mapping.
//!
//! # Examples
//!
//! ```
//! use bikeshare_analysis::{
//!     category::Season,
//!     normalization::normalize,
//!     record::RawRecord,
//! };
//!
//! let raw = RawRecord {
//!     instant: 1,
//!     date: "2011-07-01".parse().unwrap(),
//!     season: 3,
//!     year: 0,
//!     month: 7,
//!     hour: Some(8),
//!     holiday: 0,
//!     weekday: 5,
//!     working_day: 1,
//!     weather: 1,
//!     temp: 0.66,
//!     atemp: 0.62,
//!     hum: 0.5,
//!     windspeed: 0.25,
//!     casual: 20,
//!     registered: 300,
//!     total: 320,
//! };
//! let table = normalize(&[raw]).unwrap();
//! let obs = &table.observations[0];
//! assert_eq!(obs.season, Season::Summer);
//! assert_eq!(obs.humidity, 50.0);
//! assert_eq!(obs.windspeed, 16.75);
//! ```

use crate::{
    category::CodedCategory,
    record::{Observation, ObservationTable, RawRecord},
};

/// Humidity is stored as a fraction of 100 %.
pub const HUMIDITY_SCALE: f64 = 100.0;
/// Windspeed is stored as a fraction of its maximum, 67.
pub const WINDSPEED_SCALE: f64 = 67.0;

/// Raw columns that carry a code or a bounded integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum CodedColumn {
    #[display("season")]
    Season,
    #[display("yr")]
    Year,
    #[display("mnth")]
    Month,
    #[display("hr")]
    Hour,
    #[display("holiday")]
    Holiday,
    #[display("weekday")]
    Weekday,
    #[display("workingday")]
    WorkingDay,
    #[display("weathersit")]
    Weather,
}

/// Raw columns that carry a measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MeasuredColumn {
    #[display("temp")]
    Temperature,
    #[display("atemp")]
    FeelingTemperature,
    #[display("hum")]
    Humidity,
    #[display("windspeed")]
    Windspeed,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum NormalizeError {
    #[display("unmapped code {code} in column '{column}' at row {row}")]
    UnmappedCode {
        column: CodedColumn,
        code: u8,
        row: usize,
    },
    #[display("non-finite value in column '{column}' at row {row}")]
    NonFinite { column: MeasuredColumn, row: usize },
    #[display("registered + casual != total at rows {rows:?}")]
    Consistency { rows: Vec<usize> },
}

/// Normalizes raw rows into a new table. The input is left untouched.
///
/// Row numbers in errors are zero-based positions in `raw`.
pub fn normalize(raw: &[RawRecord]) -> Result<ObservationTable, NormalizeError> {
    let table = raw
        .iter()
        .enumerate()
        .map(|(row, record)| normalize_record(row, record))
        .collect::<Result<ObservationTable, _>>()?;
    table.check_consistency()?;
    log::debug!("normalized {} rows", table.len());
    Ok(table)
}

/// Maps normalized rows back to raw codes and fractional units.
#[must_use]
pub fn denormalize(table: &ObservationTable) -> Vec<RawRecord> {
    table
        .iter()
        .map(|obs| RawRecord {
            instant: obs.instant,
            date: obs.date,
            season: obs.season.code(),
            year: obs.year.code(),
            month: obs.month,
            hour: obs.hour,
            holiday: u8::from(obs.holiday),
            weekday: obs.weekday.code(),
            working_day: u8::from(obs.working_day),
            weather: obs.weather.code(),
            temp: obs.temperature,
            atemp: obs.feeling_temperature,
            hum: obs.humidity / HUMIDITY_SCALE,
            windspeed: obs.windspeed / WINDSPEED_SCALE,
            casual: obs.casual,
            registered: obs.registered,
            total: obs.total,
        })
        .collect()
}

impl ObservationTable {
    /// Checks `registered + casual == total` on every row.
    ///
    /// # Errors
    ///
    /// [`NormalizeError::Consistency`] listing every offending row index.
    pub fn check_consistency(&self) -> Result<(), NormalizeError> {
        let rows = self
            .iter()
            .enumerate()
            .filter(|(_, obs)| {
                u64::from(obs.registered) + u64::from(obs.casual) != u64::from(obs.total)
            })
            .map(|(row, _)| row)
            .collect::<Vec<_>>();
        if rows.is_empty() {
            Ok(())
        } else {
            Err(NormalizeError::Consistency { rows })
        }
    }
}

fn normalize_record(row: usize, record: &RawRecord) -> Result<Observation, NormalizeError> {
    if let Some(hour) = record.hour.filter(|hour| *hour > 23) {
        return Err(NormalizeError::UnmappedCode {
            column: CodedColumn::Hour,
            code: hour,
            row,
        });
    }
    if !(1..=12).contains(&record.month) {
        return Err(NormalizeError::UnmappedCode {
            column: CodedColumn::Month,
            code: record.month,
            row,
        });
    }
    let measurements = [
        (MeasuredColumn::Temperature, record.temp),
        (MeasuredColumn::FeelingTemperature, record.atemp),
        (MeasuredColumn::Humidity, record.hum),
        (MeasuredColumn::Windspeed, record.windspeed),
    ];
    if let Some(&(column, _)) = measurements.iter().find(|(_, value)| !value.is_finite()) {
        return Err(NormalizeError::NonFinite { column, row });
    }

    Ok(Observation {
        instant: record.instant,
        date: record.date,
        hour: record.hour,
        season: decode(CodedColumn::Season, record.season, row)?,
        year: decode(CodedColumn::Year, record.year, row)?,
        month: record.month,
        holiday: flag(CodedColumn::Holiday, record.holiday, row)?,
        weekday: decode(CodedColumn::Weekday, record.weekday, row)?,
        working_day: flag(CodedColumn::WorkingDay, record.working_day, row)?,
        weather: decode(CodedColumn::Weather, record.weather, row)?,
        temperature: record.temp,
        feeling_temperature: record.atemp,
        humidity: record.hum * HUMIDITY_SCALE,
        windspeed: record.windspeed * WINDSPEED_SCALE,
        registered: record.registered,
        casual: record.casual,
        total: record.total,
    })
}

fn decode<T>(column: CodedColumn, code: u8, row: usize) -> Result<T, NormalizeError>
where
    T: CodedCategory,
{
    T::from_code(code).ok_or(NormalizeError::UnmappedCode { column, code, row })
}

fn flag(column: CodedColumn, code: u8, row: usize) -> Result<bool, NormalizeError> {
    match code {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(NormalizeError::UnmappedCode { column, code, row }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::{Season, WeatherSituation, Weekday, Year};

    fn raw_record(row: u32) -> RawRecord {
        RawRecord {
            instant: row + 1,
            date: "2011-01-01".parse().unwrap(),
            season: 1,
            year: 0,
            month: 1,
            hour: Some(u8::try_from(row % 24).unwrap()),
            holiday: 0,
            weekday: 6,
            working_day: 0,
            weather: 1,
            temp: 0.24,
            atemp: 0.2879,
            hum: 0.81,
            windspeed: 0.0896,
            casual: 3,
            registered: 13,
            total: 16,
        }
    }

    #[test]
    fn test_normalize_maps_codes_and_units() {
        let mut raw = raw_record(0);
        raw.weather = 3;
        raw.year = 1;
        let table = normalize(&[raw]).unwrap();
        let obs = &table.observations[0];
        assert_eq!(obs.season, Season::Winter);
        assert_eq!(obs.year, Year(2012));
        assert_eq!(obs.weekday, Weekday::Saturday);
        assert_eq!(obs.weather, WeatherSituation::LightRainSnow);
        assert!(!obs.working_day);
        assert!((obs.humidity - 81.0).abs() < 1e-9);
        assert!((obs.windspeed - 0.0896 * 67.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_does_not_touch_input() {
        let raw = vec![raw_record(0), raw_record(1)];
        let before = raw.clone();
        normalize(&raw).unwrap();
        assert_eq!(raw, before);
    }

    #[test]
    fn test_unmapped_codes() {
        let cases: [(fn(&mut RawRecord), CodedColumn, u8); 7] = [
            (|r| r.season = 5, CodedColumn::Season, 5),
            (|r| r.year = 2, CodedColumn::Year, 2),
            (|r| r.weekday = 7, CodedColumn::Weekday, 7),
            (|r| r.weather = 0, CodedColumn::Weather, 0),
            (|r| r.hour = Some(24), CodedColumn::Hour, 24),
            (|r| r.month = 13, CodedColumn::Month, 13),
            (|r| r.holiday = 2, CodedColumn::Holiday, 2),
        ];
        for (corrupt, column, code) in cases {
            let mut bad = raw_record(1);
            corrupt(&mut bad);
            let err = normalize(&[raw_record(0), bad]).unwrap_err();
            assert_eq!(
                err,
                NormalizeError::UnmappedCode {
                    column,
                    code,
                    row: 1
                }
            );
        }
    }

    #[test]
    fn test_non_finite_measurements_are_rejected() {
        let cases: [(fn(&mut RawRecord), MeasuredColumn); 4] = [
            (|r| r.temp = f64::INFINITY, MeasuredColumn::Temperature),
            (|r| r.atemp = f64::NEG_INFINITY, MeasuredColumn::FeelingTemperature),
            (|r| r.hum = f64::NAN, MeasuredColumn::Humidity),
            (|r| r.windspeed = f64::NAN, MeasuredColumn::Windspeed),
        ];
        for (corrupt, column) in cases {
            let mut bad = raw_record(2);
            corrupt(&mut bad);
            let err = normalize(&[raw_record(0), raw_record(1), bad]).unwrap_err();
            assert_eq!(err, NormalizeError::NonFinite { column, row: 2 });
        }
    }

    #[test]
    fn test_nan_humidity_from_csv_is_rejected() {
        let data = "\
instant,dteday,season,yr,mnth,hr,holiday,weekday,workingday,weathersit,temp,atemp,hum,windspeed,casual,registered,cnt
1,2011-01-01,1,0,1,0,0,6,0,1,0.24,0.2879,NaN,0,3,13,16
";
        let raw = csv::Reader::from_reader(data.as_bytes())
            .deserialize::<RawRecord>()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        let err = normalize(&raw).unwrap_err();
        assert_eq!(
            err.to_string(),
            "non-finite value in column 'hum' at row 0"
        );
    }

    #[test]
    fn test_consistency_lists_every_offending_row() {
        let mut raw = (0..5).map(raw_record).collect::<Vec<_>>();
        raw[1].total = 17;
        raw[4].casual = 0;
        let err = normalize(&raw).unwrap_err();
        assert_eq!(err, NormalizeError::Consistency { rows: vec![1, 4] });
        assert_eq!(
            err.to_string(),
            "registered + casual != total at rows [1, 4]"
        );
    }

    #[test]
    fn test_round_trip_reproduces_codes() {
        let raw = (0..7u8)
            .map(|i| {
                let mut record = raw_record(u32::from(i));
                record.weekday = i;
                record.season = i % 4 + 1;
                record.weather = i % 4 + 1;
                record.year = i % 2;
                record.holiday = i % 2;
                record.working_day = 1 - i % 2;
                record.month = i + 1;
                record
            })
            .collect::<Vec<_>>();
        let restored = denormalize(&normalize(&raw).unwrap());
        assert_eq!(restored.len(), raw.len());
        for (original, restored) in raw.iter().zip(&restored) {
            assert_eq!(restored.season, original.season);
            assert_eq!(restored.year, original.year);
            assert_eq!(restored.weekday, original.weekday);
            assert_eq!(restored.weather, original.weather);
            assert_eq!(restored.holiday, original.holiday);
            assert_eq!(restored.working_day, original.working_day);
            assert_eq!(restored.month, original.month);
            assert_eq!(restored.hour, original.hour);
            assert!((restored.hum - original.hum).abs() < 1e-12);
            assert!((restored.windspeed - original.windspeed).abs() < 1e-12);
        }
    }
}
