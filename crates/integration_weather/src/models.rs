//! Weather data models
//!
//! Raw response types for the OpenWeatherMap `/weather` endpoint and the
//! flattened conditions the client hands out.

use serde::{Deserialize, Serialize};

/// Current conditions for one city, flattened from the raw response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// City name as resolved by the provider
    pub city_name: String,
    /// Category of the first reported condition (`Clear`, `Clouds`, ...)
    pub condition: String,
    /// Temperature in the requested unit system
    pub temperature: f64,
    /// Relative humidity percentage
    pub humidity: u8,
    /// Wind speed in the requested unit system
    pub wind_speed: f64,
    /// Shift in seconds from UTC
    pub timezone_offset: i32,
}

/// Value of the `cod` field
///
/// The provider sends a number on success (`200`) and a string on failure
/// (`"404"`), so both shapes are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseCode {
    Number(u16),
    Text(String),
}

impl ResponseCode {
    /// Whether the code means the lookup succeeded
    #[must_use]
    pub fn is_ok(&self) -> bool {
        match self {
            Self::Number(code) => *code == 200,
            Self::Text(code) => code.trim() == "200",
        }
    }
}

impl std::fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(code) => write!(f, "{code}"),
            Self::Text(code) => f.write_str(code),
        }
    }
}

/// Raw API response
///
/// Everything except `cod` is optional because error bodies carry only
/// `cod` and `message`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub cod: Option<ResponseCode>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub weather: Vec<ConditionEntry>,
    #[serde(default)]
    pub main: Option<MainBlock>,
    #[serde(default)]
    pub wind: Option<WindBlock>,
    #[serde(default)]
    pub timezone: Option<i32>,
}

impl ApiResponse {
    /// Whether the body reports a successful lookup
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.cod.as_ref().is_some_and(ResponseCode::is_ok)
    }
}

/// One entry of the `weather` list
#[derive(Debug, Clone, Deserialize)]
pub struct ConditionEntry {
    pub main: String,
}

/// The `main` block
#[derive(Debug, Clone, Deserialize)]
pub struct MainBlock {
    pub temp: f64,
    pub humidity: u8,
}

/// The `wind` block
#[derive(Debug, Clone, Deserialize)]
pub struct WindBlock {
    pub speed: f64,
}
