//! Domain entities

mod weather_snapshot;

pub use weather_snapshot::{Condition, WeatherSnapshot};
