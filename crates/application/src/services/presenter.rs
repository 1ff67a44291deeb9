//! Presenter
//!
//! Pure derivation of everything the widget displays from its state, the
//! current instant and the offset precision. Nothing here mutates state or
//! performs I/O, so the same state always renders the same way.

use chrono::{DateTime, FixedOffset, Utc};
use domain::{Condition, OffsetPrecision, ThemeMode, TimezoneOffset, WeatherSnapshot};
use tracing::{debug, warn};

use super::widget_service::{ViewContent, WidgetState};

/// Placeholder shown in the empty search field
pub const PLACEHOLDER: &str = "Enter Location";

/// Message shown when the provider cannot resolve a location
pub const NOT_FOUND_MESSAGE: &str = "Location Not Found..";

const LOADING_TEXT: &str = "Loading...";

/// Condition icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherIcon {
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
}

impl WeatherIcon {
    /// Terminal glyph
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Sunny => "☀",
            Self::Cloudy => "☁",
            Self::Rainy => "☂",
            Self::Snowy => "❄",
        }
    }
}

/// Two-stop background gradient
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gradient {
    pub from: &'static str,
    pub to: &'static str,
}

impl Gradient {
    const fn new(from: &'static str, to: &'static str) -> Self {
        Self { from, to }
    }
}

/// Text colours for a theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub text: &'static str,
    pub muted: &'static str,
}

/// Local date and time at the displayed location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockFace {
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:mm`
    pub time: String,
    /// Offset the clock was rendered at, e.g. `UTC+05:00`
    pub zone: String,
}

/// Display strings for one snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherPanel {
    pub icon: Option<WeatherIcon>,
    pub condition: String,
    pub temperature: String,
    pub humidity: String,
    pub wind: String,
}

/// Main body of the widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewBody {
    /// Nothing has loaded yet
    Empty,
    Loading { text: &'static str },
    NotFound { message: &'static str },
    /// The lookup failed; `retryable` says whether offering a retry makes sense
    Failed { reason: String, retryable: bool },
    Weather(WeatherPanel),
}

/// Everything needed to draw the widget once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetView {
    /// City of the displayed snapshot, empty when there is none
    pub title: String,
    pub theme: ThemeMode,
    pub toggle_glyph: &'static str,
    pub gradient: Gradient,
    pub palette: Palette,
    pub placeholder: &'static str,
    pub query_text: String,
    pub clock: ClockFace,
    pub body: ViewBody,
}

/// Icon for a condition; unrecognized conditions have none
#[must_use]
pub const fn icon_for(condition: &Condition) -> Option<WeatherIcon> {
    match condition {
        Condition::Clear => Some(WeatherIcon::Sunny),
        Condition::Clouds | Condition::Haze | Condition::Mist => Some(WeatherIcon::Cloudy),
        Condition::Rain => Some(WeatherIcon::Rainy),
        Condition::Snow => Some(WeatherIcon::Snowy),
        Condition::Other(_) => None,
    }
}

/// Background gradient for a condition in the given theme.
///
/// No data and unrecognized conditions share the clear-sky gradient.
#[must_use]
pub const fn gradient_for(condition: Option<&Condition>, theme: ThemeMode) -> Gradient {
    match (condition, theme) {
        (Some(Condition::Clouds | Condition::Haze | Condition::Mist), ThemeMode::Light) => {
            Gradient::new("#57d6d4", "#71eeec")
        },
        (Some(Condition::Rain), ThemeMode::Light) => Gradient::new("#5bc8fb", "#80eaff"),
        (Some(Condition::Snow), ThemeMode::Light) => Gradient::new("#aff2ff", "#ffffff"),
        (_, ThemeMode::Light) => Gradient::new("#f3b07c", "#fcd283"),
        (
            Some(Condition::Clouds | Condition::Haze | Condition::Mist | Condition::Rain),
            ThemeMode::Dark,
        ) => Gradient::new("#2d3748", "#4a5568"),
        (Some(Condition::Snow), ThemeMode::Dark) => Gradient::new("#4a5568", "#718096"),
        (_, ThemeMode::Dark) => Gradient::new("#1a202c", "#2d3748"),
    }
}

#[must_use]
pub const fn palette_for(theme: ThemeMode) -> Palette {
    match theme {
        ThemeMode::Light => Palette {
            text: "#000000",
            muted: "#4b5563",
        },
        ThemeMode::Dark => Palette {
            text: "#ffffff",
            muted: "#d4d4d8",
        },
    }
}

/// Glyph of the theme toggle: a sun offers light mode, a moon offers dark
#[must_use]
pub const fn toggle_glyph(theme: ThemeMode) -> &'static str {
    match theme {
        ThemeMode::Dark => "☀",
        ThemeMode::Light => "☾",
    }
}

/// Wall-clock date and time at `offset`.
///
/// Offsets that cannot be represented at the requested precision fall back
/// to UTC.
pub fn clock_face(
    offset: TimezoneOffset,
    now: DateTime<Utc>,
    precision: OffsetPrecision,
) -> ClockFace {
    if precision == OffsetPrecision::WholeHours && offset.has_fractional_hours() {
        debug!(offset = %offset, "Dropping fractional hours from offset");
    }
    let local = offset.local_time(now, precision).unwrap_or_else(|| {
        warn!(
            offset = offset.seconds(),
            zone = %offset.zone_identifier(),
            "Timezone offset not representable, falling back to UTC"
        );
        now.fixed_offset()
    });
    format_clock(local)
}

fn format_clock(local: DateTime<FixedOffset>) -> ClockFace {
    ClockFace {
        date: local.format("%Y-%m-%d").to_string(),
        time: local.format("%H:%M").to_string(),
        zone: TimezoneOffset::from_seconds(local.offset().local_minus_utc()).to_string(),
    }
}

/// Temperature floored to whole degrees, e.g. `26°`
#[must_use]
pub fn format_temperature(snapshot: &WeatherSnapshot) -> String {
    format!("{}°", snapshot.floored_temperature())
}

#[must_use]
pub fn format_humidity(snapshot: &WeatherSnapshot) -> String {
    snapshot.humidity.to_string()
}

#[must_use]
pub fn format_wind(snapshot: &WeatherSnapshot) -> String {
    format!("{} km/hr", snapshot.wind_speed)
}

fn panel(snapshot: &WeatherSnapshot) -> WeatherPanel {
    WeatherPanel {
        icon: icon_for(&snapshot.condition),
        condition: snapshot.condition.label().to_string(),
        temperature: format_temperature(snapshot),
        humidity: format_humidity(snapshot),
        wind: format_wind(snapshot),
    }
}

/// Derive the full view from widget state
pub fn present(state: &WidgetState, now: DateTime<Utc>, precision: OffsetPrecision) -> WidgetView {
    let snapshot = state.content.snapshot();
    let offset = snapshot.map_or(TimezoneOffset::UTC, |s| s.timezone_offset);

    let body = if state.search.is_loading {
        ViewBody::Loading { text: LOADING_TEXT }
    } else {
        match &state.content {
            ViewContent::Empty => ViewBody::Empty,
            ViewContent::Displaying(snapshot) => ViewBody::Weather(panel(snapshot)),
            ViewContent::NotFound => ViewBody::NotFound {
                message: NOT_FOUND_MESSAGE,
            },
            ViewContent::Failed { reason, retryable } => ViewBody::Failed {
                reason: reason.clone(),
                retryable: *retryable,
            },
        }
    };

    WidgetView {
        title: snapshot.map(|s| s.city_name.clone()).unwrap_or_default(),
        theme: state.theme,
        toggle_glyph: toggle_glyph(state.theme),
        gradient: gradient_for(snapshot.map(|s| &s.condition), state.theme),
        palette: palette_for(state.theme),
        placeholder: PLACEHOLDER,
        query_text: state.search.query_text.clone(),
        clock: clock_face(offset, now, precision),
        body,
    }
}
