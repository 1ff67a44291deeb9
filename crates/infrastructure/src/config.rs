//! Application configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! TOML file, then `WEATHER_WIDGET_*` environment variables using `__` as
//! the nesting separator (`WEATHER_WIDGET_WEATHER__API_KEY`).

use std::fmt;
use std::path::Path;

use domain::{CityName, DomainError, OffsetPrecision, ThemeMode};
use integration_weather::WeatherConfig;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Prefix of environment variables read into the configuration
pub const ENV_PREFIX: &str = "WEATHER_WIDGET";

/// File looked up in the working directory when no path is given
const DEFAULT_CONFIG_FILE: &str = "config";

const DEFAULT_CITY: &str = "Bengaluru";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Weather provider configuration
    #[serde(default)]
    pub weather: WeatherAppConfig,

    /// Widget behaviour
    #[serde(default)]
    pub widget: WidgetConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Weather provider section
#[derive(Clone, Serialize, Deserialize)]
pub struct WeatherAppConfig {
    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Provider API key (sensitive, never serialized)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Unit system passed to the provider
    #[serde(default = "default_units")]
    pub units: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    WeatherConfig::default().base_url
}

fn default_units() -> String {
    WeatherConfig::default().units
}

fn default_timeout() -> u64 {
    WeatherConfig::default().timeout_secs
}

impl Default for WeatherAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            units: default_units(),
            timeout_secs: default_timeout(),
        }
    }
}

impl fmt::Debug for WeatherAppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherAppConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("units", &self.units)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl WeatherAppConfig {
    /// HTTP client settings for this section
    #[must_use]
    pub fn client_config(&self) -> WeatherConfig {
        WeatherConfig {
            base_url: self.base_url.clone(),
            units: self.units.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

/// Widget section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// City loaded on start
    #[serde(default = "default_city")]
    pub default_city: String,

    /// Start in dark mode
    #[serde(default)]
    pub dark_mode: bool,

    /// Render the clock at the exact offset instead of whole hours
    #[serde(default)]
    pub exact_offsets: bool,
}

fn default_city() -> String {
    DEFAULT_CITY.to_string()
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            default_city: default_city(),
            dark_mode: false,
            exact_offsets: false,
        }
    }
}

impl WidgetConfig {
    /// The configured default city, validated
    pub fn city(&self) -> Result<CityName, DomainError> {
        CityName::new(&self.default_city)
    }

    #[must_use]
    pub const fn theme(&self) -> ThemeMode {
        ThemeMode::from_dark(self.dark_mode)
    }

    #[must_use]
    pub const fn offset_precision(&self) -> OffsetPrecision {
        OffsetPrecision::from_exact(self.exact_offsets)
    }
}

/// Log line format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Logging section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

impl AppConfig {
    /// Load configuration from defaults, a file and the environment.
    ///
    /// With `path` the file must exist; without it `config.toml` in the
    /// working directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::load_with_env(path, None)
    }

    /// Like [`AppConfig::load`], reading variables from `env` instead of the
    /// process environment when given
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let builder = config::Config::builder()
            .set_default("widget.default_city", DEFAULT_CITY)?
            .add_source(file)
            // e.g. WEATHER_WIDGET_WIDGET__DARK_MODE=true
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            );

        builder.build()?.try_deserialize()
    }
}
