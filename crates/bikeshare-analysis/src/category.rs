//! Categorical columns of the dataset and their integer codes
//!
//! The raw dataset stores every categorical field as a small integer. Each
//! category type here owns its fixed code table through [`CodedCategory`],
//! so decoding and encoding are two directions of the same mapping.
//!
//! | column       | codes                                                   |
//! |--------------|---------------------------------------------------------|
//! | `season`     | 1 winter, 2 spring, 3 summer, 4 fall                    |
//! | `yr`         | 0 → 2011, 1 → 2012                                      |
//! | `weekday`    | 0 Sunday, 1 Monday, …, 6 Saturday                       |
//! | `weathersit` | 1 clear, 2 cloudy, 3 light rain/snow, 4 heavy rain/snow |

use serde::{Deserialize, Serialize};

/// A categorical value with a fixed integer code.
pub trait CodedCategory: Copy + Sized + 'static {
    /// Every value, in reporting order.
    const ALL: &'static [Self];

    /// Integer code used by the raw dataset.
    fn code(self) -> u8;

    /// Decodes `code`, or `None` if it is outside the mapping.
    #[must_use]
    fn from_code(code: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|value| value.code() == code)
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    #[display("winter")]
    Winter,
    #[display("spring")]
    Spring,
    #[display("summer")]
    Summer,
    #[display("fall")]
    Fall,
}

impl CodedCategory for Season {
    const ALL: &'static [Self] = &[Self::Winter, Self::Spring, Self::Summer, Self::Fall];

    fn code(self) -> u8 {
        match self {
            Self::Winter => 1,
            Self::Spring => 2,
            Self::Summer => 3,
            Self::Fall => 4,
        }
    }
}

/// Day of the week.
///
/// Declared (and therefore ordered) Monday first, the order used by every
/// report; the dataset codes start at Sunday.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    #[must_use]
    pub fn is_weekend(self) -> bool {
        matches!(self, Self::Saturday | Self::Sunday)
    }
}

impl CodedCategory for Weekday {
    const ALL: &'static [Self] = &[
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    fn code(self) -> u8 {
        match self {
            Self::Sunday => 0,
            Self::Monday => 1,
            Self::Tuesday => 2,
            Self::Wednesday => 3,
            Self::Thursday => 4,
            Self::Friday => 5,
            Self::Saturday => 6,
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum WeatherSituation {
    #[display("clear")]
    Clear,
    #[display("cloudy")]
    Cloudy,
    #[display("light_rain_snow")]
    LightRainSnow,
    #[display("heavy_rain_snow")]
    HeavyRainSnow,
}

impl CodedCategory for WeatherSituation {
    const ALL: &'static [Self] = &[
        Self::Clear,
        Self::Cloudy,
        Self::LightRainSnow,
        Self::HeavyRainSnow,
    ];

    fn code(self) -> u8 {
        match self {
            Self::Clear => 1,
            Self::Cloudy => 2,
            Self::LightRainSnow => 3,
            Self::HeavyRainSnow => 4,
        }
    }
}

/// Calendar year, coded as an offset from 2011.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct Year(pub u16);

impl CodedCategory for Year {
    const ALL: &'static [Self] = &[Self(2011), Self(2012)];

    fn code(self) -> u8 {
        u8::try_from(self.0.saturating_sub(2011)).unwrap_or(u8::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_round_trip<T>()
    where
        T: CodedCategory + PartialEq + std::fmt::Debug,
    {
        for &value in T::ALL {
            assert_eq!(T::from_code(value.code()), Some(value));
        }
    }

    #[test]
    fn test_codes_round_trip() {
        assert_round_trip::<Season>();
        assert_round_trip::<Weekday>();
        assert_round_trip::<WeatherSituation>();
        assert_round_trip::<Year>();
    }

    #[test]
    fn test_known_codes() {
        assert_eq!(Season::from_code(1), Some(Season::Winter));
        assert_eq!(Season::from_code(4), Some(Season::Fall));
        assert_eq!(Year::from_code(0), Some(Year(2011)));
        assert_eq!(Year::from_code(1), Some(Year(2012)));
        assert_eq!(Weekday::from_code(0), Some(Weekday::Sunday));
        assert_eq!(Weekday::from_code(6), Some(Weekday::Saturday));
        assert_eq!(
            WeatherSituation::from_code(3),
            Some(WeatherSituation::LightRainSnow)
        );
    }

    #[test]
    fn test_unmapped_codes() {
        assert_eq!(Season::from_code(0), None);
        assert_eq!(Season::from_code(5), None);
        assert_eq!(Year::from_code(2), None);
        assert_eq!(Weekday::from_code(7), None);
        assert_eq!(WeatherSituation::from_code(0), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Season::Summer.to_string(), "summer");
        assert_eq!(Weekday::Wednesday.to_string(), "Wednesday");
        assert_eq!(WeatherSituation::HeavyRainSnow.to_string(), "heavy_rain_snow");
        assert_eq!(Year(2012).to_string(), "2012");
    }

    #[test]
    fn test_weekday_order_and_weekend() {
        assert!(Weekday::Monday < Weekday::Sunday);
        let weekend = Weekday::ALL
            .iter()
            .filter(|day| day.is_weekend())
            .collect::<Vec<_>>();
        assert_eq!(weekend, [&Weekday::Saturday, &Weekday::Sunday]);
    }
}
