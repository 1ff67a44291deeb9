//! Weather adapter - Implements WeatherPort using integration_weather

use application::error::ApplicationError;
use application::ports::WeatherPort;
use async_trait::async_trait;
use domain::{CityName, Condition, Humidity, TimezoneOffset, WeatherSnapshot};
use integration_weather::{
    CurrentConditions, OpenWeatherMapClient, WeatherClient, WeatherConfig, WeatherError,
};
use secrecy::SecretString;
use tracing::{debug, instrument, warn};

/// Adapter for the OpenWeatherMap current weather API
pub struct WeatherAdapter {
    client: OpenWeatherMapClient,
}

impl std::fmt::Debug for WeatherAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherAdapter")
            .field("client", &self.client)
            .finish()
    }
}

impl WeatherAdapter {
    /// Create an adapter with the given client configuration and API key
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(config: WeatherConfig, api_key: SecretString) -> Result<Self, ApplicationError> {
        let client = OpenWeatherMapClient::new(config, api_key)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self { client })
    }

    /// Map integration weather error to application error
    fn map_error(err: WeatherError) -> ApplicationError {
        match err {
            WeatherError::LocationNotFound(reason) => ApplicationError::LocationNotFound(reason),
            WeatherError::ConnectionFailed(e)
            | WeatherError::RequestFailed(e)
            | WeatherError::ServiceUnavailable(e) => ApplicationError::ExternalService(e),
            WeatherError::ParseError(e) => ApplicationError::Internal(e),
            WeatherError::Unauthorized => {
                ApplicationError::NotAuthorized("weather API key missing or invalid".into())
            },
            WeatherError::RateLimitExceeded => ApplicationError::RateLimited,
        }
    }

    /// Convert provider conditions into a domain snapshot
    fn map_conditions(conditions: CurrentConditions) -> WeatherSnapshot {
        let humidity = Humidity::new(conditions.humidity).unwrap_or_else(|e| {
            warn!(error = %e, "Humidity out of range, clamping");
            Humidity::clamped(conditions.humidity)
        });

        let condition = Condition::from_main(&conditions.condition);
        if !condition.is_recognized() {
            debug!(condition = %condition, "No icon for condition");
        }

        WeatherSnapshot {
            condition,
            city_name: conditions.city_name,
            temperature: conditions.temperature,
            humidity,
            wind_speed: conditions.wind_speed,
            timezone_offset: TimezoneOffset::from_seconds(conditions.timezone_offset),
        }
    }
}

#[async_trait]
impl WeatherPort for WeatherAdapter {
    #[instrument(skip(self), fields(city = %city))]
    async fn fetch_weather(&self, city: &CityName) -> Result<WeatherSnapshot, ApplicationError> {
        let result = self
            .client
            .current_by_city(city.as_str())
            .await
            .map_err(Self::map_error);

        match &result {
            Ok(conditions) => {
                debug!(
                    temperature = conditions.temperature,
                    condition = %conditions.condition,
                    "Retrieved current weather"
                );
            },
            Err(e) => {
                debug!(error = %e, "Failed to get current weather");
            },
        }

        result.map(Self::map_conditions)
    }
}
