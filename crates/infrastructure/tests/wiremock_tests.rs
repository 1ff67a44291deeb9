//! Integration tests for the infrastructure crate
//!
//! Drives the weather adapter, and the widget service on top of it, against
//! a mock OpenWeatherMap server.

use std::sync::Arc;

use application::{
    ApplicationError, Submission, ViewBody, ViewContent, WeatherIcon, WeatherPort, WidgetService,
};
use chrono::{TimeZone, Utc};
use domain::{CityName, Condition, OffsetPrecision};
use infrastructure::{WeatherAdapter, WeatherAppConfig};
use secrecy::SecretString;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn bengaluru_body() -> serde_json::Value {
    serde_json::json!({
        "cod": 200,
        "name": "Bengaluru",
        "weather": [{"main": "Clouds"}],
        "main": {"temp": 26.4, "humidity": 70},
        "wind": {"speed": 3.1},
        "timezone": 19800
    })
}

fn adapter_for(server: &MockServer) -> WeatherAdapter {
    let section = WeatherAppConfig {
        base_url: server.uri(),
        timeout_secs: 5,
        ..WeatherAppConfig::default()
    };
    WeatherAdapter::new(
        section.client_config(),
        SecretString::from("test-key".to_string()),
    )
    .unwrap()
}

fn city(name: &str) -> CityName {
    CityName::new(name).unwrap()
}

// ============================================================================
// Adapter
// ============================================================================

mod adapter_tests {
    use super::*;

    #[tokio::test]
    async fn fetch_maps_into_snapshot() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", "Bengaluru"))
            .respond_with(ResponseTemplate::new(200).set_body_json(bengaluru_body()))
            .expect(1)
            .mount(&server)
            .await;

        let snapshot = adapter_for(&server)
            .fetch_weather(&city("Bengaluru"))
            .await
            .unwrap();

        assert_eq!(snapshot.city_name, "Bengaluru");
        assert_eq!(snapshot.condition, Condition::Clouds);
        assert_eq!(snapshot.humidity.value(), 70);
        assert_eq!(snapshot.timezone_offset.seconds(), 19800);
    }

    #[tokio::test]
    async fn not_found_body_maps_to_location_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({"cod": "404", "message": "city not found"})),
            )
            .mount(&server)
            .await;

        let result = adapter_for(&server).fetch_weather(&city("Atlantis")).await;
        assert!(matches!(result, Err(ApplicationError::LocationNotFound(_))));
    }

    #[tokio::test]
    async fn unauthorized_maps_to_not_authorized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let result = adapter_for(&server).fetch_weather(&city("Paris")).await;
        assert!(matches!(result, Err(ApplicationError::NotAuthorized(_))));
    }

    #[tokio::test]
    async fn server_error_is_retryable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let err = adapter_for(&server)
            .fetch_weather(&city("Paris"))
            .await
            .unwrap_err();
        assert!(err.is_retryable());
    }
}

// ============================================================================
// Widget service end to end
// ============================================================================

mod widget_tests {
    use super::*;

    fn widget(server: &MockServer) -> WidgetService {
        WidgetService::new(Arc::new(adapter_for(server)), city("Bengaluru"))
    }

    #[tokio::test]
    async fn mount_renders_bengaluru_panel() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(bengaluru_body()))
            .mount(&server)
            .await;

        let widget = widget(&server);
        assert_eq!(widget.mount().await, Submission::Applied { token: 1 });

        let now = Utc.with_ymd_and_hms(2024, 1, 15, 3, 30, 0).unwrap();
        let view = widget.view(now);
        assert_eq!(view.title, "Bengaluru");
        assert_eq!(view.clock.time, "08:30");
        assert_eq!(view.gradient.from, "#57d6d4");
        match view.body {
            ViewBody::Weather(panel) => {
                assert_eq!(panel.icon, Some(WeatherIcon::Cloudy));
                assert_eq!(panel.temperature, "26°");
                assert_eq!(panel.humidity, "70%");
                assert_eq!(panel.wind, "3.1 km/hr");
            },
            other => panic!("expected weather panel, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_city_shows_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({"cod": "404", "message": "city not found"})),
            )
            .mount(&server)
            .await;

        let widget = widget(&server).with_offset_precision(OffsetPrecision::Exact);
        widget.set_query("Atlantis");
        widget.submit().await;

        let state = widget.state();
        assert!(!state.search.is_loading);
        assert_eq!(state.search.query_text, "Atlantis");
        assert_eq!(
            widget.view(Utc::now()).body,
            ViewBody::NotFound {
                message: "Location Not Found.."
            }
        );
    }

    #[tokio::test]
    async fn provider_error_code_shows_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({"cod": 401, "message": "Invalid API key."})),
            )
            .mount(&server)
            .await;

        let widget = widget(&server);
        widget.set_query("Paris");
        widget.submit().await;

        assert_eq!(widget.state().content, ViewContent::NotFound);
        assert!(!widget.state().search.is_loading);
    }

    #[tokio::test]
    async fn rate_limit_shows_retry_hint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let widget = widget(&server);
        widget.set_query("Paris");
        widget.submit().await;

        assert!(matches!(
            widget.view(Utc::now()).body,
            ViewBody::Failed { ref reason, retryable: true } if reason == "Rate limit exceeded"
        ));
    }
}
