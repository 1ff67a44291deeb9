//! Ports - Interfaces to external systems

mod weather_port;

#[cfg(test)]
pub use weather_port::MockWeatherPort;
pub use weather_port::WeatherPort;
