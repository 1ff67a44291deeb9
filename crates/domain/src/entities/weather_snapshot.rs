//! Weather snapshot entity
//!
//! The payload of one completed lookup, as reported by the provider.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::{Humidity, TimezoneOffset};

/// Categorical weather type reported by the provider
///
/// Only the categories the widget styles explicitly get their own variant;
/// anything else (Drizzle, Thunderstorm, Smoke, ...) is kept verbatim in
/// `Other` so it can still be displayed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Condition {
    Clear,
    Clouds,
    Rain,
    Snow,
    Haze,
    Mist,
    Other(String),
}

impl Condition {
    /// Parse the provider's category name (`weather[].main`)
    #[must_use]
    pub fn from_main(main: &str) -> Self {
        match main {
            "Clear" => Self::Clear,
            "Clouds" => Self::Clouds,
            "Rain" => Self::Rain,
            "Snow" => Self::Snow,
            "Haze" => Self::Haze,
            "Mist" => Self::Mist,
            other => Self::Other(other.to_string()),
        }
    }

    /// The category name as the provider spells it
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Clear => "Clear",
            Self::Clouds => "Clouds",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Haze => "Haze",
            Self::Mist => "Mist",
            Self::Other(name) => name,
        }
    }

    #[must_use]
    pub const fn is_recognized(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for Condition {
    fn from(value: String) -> Self {
        Self::from_main(&value)
    }
}

impl From<Condition> for String {
    fn from(condition: Condition) -> Self {
        condition.label().to_string()
    }
}

/// Current weather for one resolved location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// City name as resolved by the provider
    pub city_name: String,
    /// Main condition, from the first entry of the provider's list
    pub condition: Condition,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Relative humidity
    pub humidity: Humidity,
    /// Wind speed as reported by the provider
    pub wind_speed: f64,
    /// Location's offset from UTC
    pub timezone_offset: TimezoneOffset,
}

impl WeatherSnapshot {
    /// Temperature rounded down to a whole degree
    ///
    /// ```
    /// use domain::{Condition, Humidity, TimezoneOffset, WeatherSnapshot};
    ///
    /// let snapshot = WeatherSnapshot {
    ///     city_name: "Oslo".to_string(),
    ///     condition: Condition::Snow,
    ///     temperature: -0.5,
    ///     humidity: Humidity::clamped(80),
    ///     wind_speed: 1.0,
    ///     timezone_offset: TimezoneOffset::from_seconds(3600),
    /// };
    /// assert_eq!(snapshot.floored_temperature(), -1);
    /// ```
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn floored_temperature(&self) -> i64 {
        self.temperature.floor() as i64
    }
}
