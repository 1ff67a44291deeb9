//! OpenWeatherMap client
//!
//! HTTP client for the OpenWeatherMap current weather endpoint.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::models::{ApiResponse, CurrentConditions};

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Connection to the weather service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the weather service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response from weather service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// API key missing or rejected
    #[error("Unauthorized: the API key is missing or invalid")]
    Unauthorized,

    /// The provider could not resolve the location
    #[error("Location not found: {0}")]
    LocationNotFound(String),

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Weather service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// API base URL (default: <https://api.openweathermap.org/data/2.5>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Unit system passed to the provider (default: metric)
    #[serde(default = "default_units")]
    pub units: String,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_units() -> String {
    "metric".to_string()
}

const fn default_timeout() -> u64 {
    10
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            units: default_units(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Weather client trait for fetching weather data
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Get current conditions for a city
    async fn current_by_city(&self, city: &str) -> Result<CurrentConditions, WeatherError>;
}

/// OpenWeatherMap HTTP client implementation
pub struct OpenWeatherMapClient {
    client: Client,
    config: WeatherConfig,
    api_key: SecretString,
}

impl std::fmt::Debug for OpenWeatherMapClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapClient")
            .field("config", &self.config)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl OpenWeatherMapClient {
    /// Create a new client with the given configuration and API key
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: WeatherConfig, api_key: SecretString) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// URL of the current weather endpoint
    fn weather_url(&self) -> String {
        format!("{}/weather", self.config.base_url.trim_end_matches('/'))
    }

    /// Classify a transport-level failure
    fn map_send_error(err: &reqwest::Error) -> WeatherError {
        if err.is_connect() {
            WeatherError::ConnectionFailed(err.to_string())
        } else if err.is_timeout() {
            WeatherError::RequestFailed(format!("timed out: {err}"))
        } else {
            WeatherError::RequestFailed(err.to_string())
        }
    }

    /// Turn a response body into conditions, or the reason it can't be.
    ///
    /// Any JSON body whose `cod` is not 200 means the location was not
    /// found, whatever the HTTP status. The status only classifies bodies
    /// that are not JSON at all.
    fn parse_body(
        status: StatusCode,
        body: &str,
        city: &str,
    ) -> Result<CurrentConditions, WeatherError> {
        let response: ApiResponse = match serde_json::from_str(body) {
            Ok(response) => response,
            Err(e) => {
                return Err(Self::status_error(status, city)
                    .unwrap_or_else(|| WeatherError::ParseError(e.to_string())));
            },
        };

        if !response.is_ok() {
            let reason = response.message.unwrap_or_else(|| city.to_string());
            match Self::status_error(status, city) {
                Some(WeatherError::LocationNotFound(_)) | None => {
                    debug!(%status, reason = %reason, "Provider rejected the location");
                },
                Some(underlying) => {
                    warn!(
                        %status,
                        error = %underlying,
                        reason = %reason,
                        "Provider error reported as location not found"
                    );
                },
            }
            return Err(WeatherError::LocationNotFound(reason));
        }

        Self::into_conditions(response, city)
    }

    /// Error implied by the HTTP status alone
    fn status_error(status: StatusCode, city: &str) -> Option<WeatherError> {
        match status {
            StatusCode::UNAUTHORIZED => Some(WeatherError::Unauthorized),
            StatusCode::TOO_MANY_REQUESTS => Some(WeatherError::RateLimitExceeded),
            StatusCode::NOT_FOUND => Some(WeatherError::LocationNotFound(city.to_string())),
            s if s.is_server_error() => Some(WeatherError::ServiceUnavailable(format!("HTTP {s}"))),
            _ => None,
        }
    }

    /// Flatten a successful response
    fn into_conditions(
        response: ApiResponse,
        city: &str,
    ) -> Result<CurrentConditions, WeatherError> {
        let main = response
            .main
            .ok_or_else(|| WeatherError::ParseError("No main block in response".to_string()))?;
        let wind = response
            .wind
            .ok_or_else(|| WeatherError::ParseError("No wind block in response".to_string()))?;

        let condition = response
            .weather
            .into_iter()
            .next()
            .map_or_else(|| "Unknown".to_string(), |entry| entry.main);

        Ok(CurrentConditions {
            city_name: response.name.unwrap_or_else(|| city.to_string()),
            condition,
            temperature: main.temp,
            humidity: main.humidity,
            wind_speed: wind.speed,
            timezone_offset: response.timezone.unwrap_or_default(),
        })
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherMapClient {
    #[instrument(skip(self))]
    async fn current_by_city(&self, city: &str) -> Result<CurrentConditions, WeatherError> {
        let url = self.weather_url();
        debug!(url = %url, units = %self.config.units, "Fetching current weather");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", city),
                ("units", self.config.units.as_str()),
                ("appid", self.api_key.expose_secret()),
            ])
            .send()
            .await
            .map_err(|e| Self::map_send_error(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| WeatherError::RequestFailed(e.to_string()))?;

        let result = Self::parse_body(status, &body, city);
        if let Ok(conditions) = &result {
            debug!(
                city = %conditions.city_name,
                condition = %conditions.condition,
                "Retrieved current weather"
            );
        }
        result
    }
}
