//! Weather service port
//!
//! The Fetcher seam: looks up current weather for a city.

use async_trait::async_trait;
use domain::{CityName, WeatherSnapshot};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for weather lookups
///
/// Implementations report a location the provider cannot resolve as
/// `ApplicationError::LocationNotFound`; every other error is treated as
/// transient by the widget.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherPort: Send + Sync {
    /// Get current weather for a city
    async fn fetch_weather(&self, city: &CityName) -> Result<WeatherSnapshot, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn WeatherPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn WeatherPort>();
    }
}
