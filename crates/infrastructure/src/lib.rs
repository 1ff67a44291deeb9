//! Infrastructure layer - Adapters for external systems
//!
//! Implements the application's weather port on top of the OpenWeatherMap
//! client, loads layered configuration and sets up logging.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, LogFormat, LoggingConfig, WeatherAppConfig, WidgetConfig};
pub use telemetry::{TelemetryError, filter_for_verbosity, init_tracing};
