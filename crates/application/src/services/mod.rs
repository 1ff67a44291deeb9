//! Application services - Use case implementations

pub mod presenter;
mod widget_service;

pub use presenter::{
    ClockFace, Gradient, Palette, ViewBody, WeatherIcon, WeatherPanel, WidgetView,
};
pub use widget_service::{
    FetchOutcome, SearchState, Submission, ViewContent, WidgetService, WidgetState,
};
