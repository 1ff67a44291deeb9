//! Widget service
//!
//! Owns the widget's state store and implements the input handling around
//! it: editing the search text, submitting a search, retrying a failed one
//! and toggling the theme.
//!
//! Every search is stamped with a request token taken from a monotonically
//! increasing counter. When a response arrives it is applied only if its
//! token is still the latest one issued; responses to superseded searches
//! are dropped, so the visible state always reflects the most recent
//! submission regardless of the order in which responses arrive.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use domain::{CityName, OffsetPrecision, ThemeMode, WeatherSnapshot};
use parking_lot::RwLock;
use tracing::{debug, info, instrument, warn};

use super::presenter::{self, WidgetView};
use crate::error::ApplicationError;
use crate::ports::WeatherPort;

/// Result of one weather lookup, as the widget sees it
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The provider resolved the location
    Success(WeatherSnapshot),
    /// The provider could not resolve the location
    NotFound,
    /// Transport, parse, credential or rate-limit failure
    TransientError {
        reason: String,
        /// Whether the same lookup may succeed if issued again
        retryable: bool,
    },
}

impl From<Result<WeatherSnapshot, ApplicationError>> for FetchOutcome {
    fn from(result: Result<WeatherSnapshot, ApplicationError>) -> Self {
        match result {
            Ok(snapshot) => Self::Success(snapshot),
            Err(ApplicationError::LocationNotFound(_)) => Self::NotFound,
            Err(e) => Self::TransientError {
                retryable: e.is_retryable(),
                reason: e.to_string(),
            },
        }
    }
}

/// What the panel body currently holds
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ViewContent {
    /// Nothing has completed yet
    #[default]
    Empty,
    /// Weather for the last successful lookup
    Displaying(WeatherSnapshot),
    /// The last lookup named an unknown location
    NotFound,
    /// The last lookup failed
    Failed { reason: String, retryable: bool },
}

impl ViewContent {
    #[must_use]
    pub const fn snapshot(&self) -> Option<&WeatherSnapshot> {
        match self {
            Self::Displaying(snapshot) => Some(snapshot),
            _ => None,
        }
    }
}

/// Search field state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    /// Text currently in the search field
    pub query_text: String,
    /// Whether a lookup is in flight
    pub is_loading: bool,
}

/// A lookup that has been issued
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct IssuedRequest {
    city: CityName,
    token: u64,
    /// Submitted from the search field rather than on mount
    from_input: bool,
}

/// Everything the widget renders from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetState {
    pub content: ViewContent,
    pub search: SearchState,
    pub theme: ThemeMode,
    pub(crate) last_request: Option<IssuedRequest>,
    pub(crate) latest_token: u64,
}

/// How a submission ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Nothing to search for; state untouched
    Ignored,
    /// The response was written into the state store
    Applied { token: u64 },
    /// A newer search was issued before this one finished
    Superseded { token: u64 },
}

/// State store and input handler for the weather widget
pub struct WidgetService {
    weather: Arc<dyn WeatherPort>,
    default_city: CityName,
    precision: OffsetPrecision,
    state: RwLock<WidgetState>,
}

impl std::fmt::Debug for WidgetService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetService")
            .field("default_city", &self.default_city)
            .field("precision", &self.precision)
            .field("state", &*self.state.read())
            .finish_non_exhaustive()
    }
}

impl WidgetService {
    /// Create a widget that loads `default_city` on mount
    pub fn new(weather: Arc<dyn WeatherPort>, default_city: CityName) -> Self {
        Self {
            weather,
            default_city,
            precision: OffsetPrecision::default(),
            state: RwLock::new(WidgetState::default()),
        }
    }

    /// Start in the given theme
    #[must_use]
    pub fn with_theme(self, theme: ThemeMode) -> Self {
        self.state.write().theme = theme;
        self
    }

    /// Choose how timezone offsets are applied to the clock
    #[must_use]
    pub const fn with_offset_precision(mut self, precision: OffsetPrecision) -> Self {
        self.precision = precision;
        self
    }

    #[must_use]
    pub const fn default_city(&self) -> &CityName {
        &self.default_city
    }

    /// A copy of the current state
    pub fn state(&self) -> WidgetState {
        self.state.read().clone()
    }

    /// Derive the view for the current state at instant `now`
    pub fn view(&self, now: DateTime<Utc>) -> WidgetView {
        presenter::present(&self.state.read(), now, self.precision)
    }

    /// Replace the search field text
    pub fn set_query(&self, text: impl Into<String>) {
        self.state.write().search.query_text = text.into();
    }

    /// Empty the search field
    pub fn clear_query(&self) {
        self.state.write().search.query_text.clear();
    }

    /// Flip between light and dark, returning the new theme
    pub fn toggle_theme(&self) -> ThemeMode {
        let mut state = self.state.write();
        state.theme = state.theme.toggled();
        debug!(theme = %state.theme, "Toggled theme");
        state.theme
    }

    /// Load the default city
    #[instrument(skip(self), fields(city = %self.default_city))]
    pub async fn mount(&self) -> Submission {
        self.run(self.default_city.clone(), false).await
    }

    /// Search for the text in the search field.
    ///
    /// Empty or whitespace-only text is ignored without touching state.
    #[instrument(skip(self))]
    pub async fn submit(&self) -> Submission {
        let query = self.state.read().search.query_text.clone();
        match CityName::new(&query) {
            Ok(city) => self.run(city, true).await,
            Err(_) => {
                debug!("Ignoring empty search");
                Submission::Ignored
            },
        }
    }

    /// Re-issue the last lookup if it failed with a retryable error
    #[instrument(skip(self))]
    pub async fn retry(&self) -> Submission {
        let pending = {
            let state = self.state.read();
            match (&state.content, &state.last_request) {
                (ViewContent::Failed { retryable: true, .. }, Some(request)) => {
                    Some((request.city.clone(), request.from_input))
                },
                _ => None,
            }
        };

        match pending {
            Some((city, from_input)) => self.run(city, from_input).await,
            None => {
                debug!("Nothing to retry");
                Submission::Ignored
            },
        }
    }

    /// Issue a lookup and apply its outcome if it is still the latest
    async fn run(&self, city: CityName, from_input: bool) -> Submission {
        let token = self.issue(&city, from_input);
        debug!(token, city = %city, "Issued weather lookup");

        let outcome = FetchOutcome::from(self.weather.fetch_weather(&city).await);
        self.apply(token, outcome)
    }

    fn issue(&self, city: &CityName, from_input: bool) -> u64 {
        let mut state = self.state.write();
        state.latest_token += 1;
        let token = state.latest_token;
        state.search.is_loading = true;
        state.last_request = Some(IssuedRequest {
            city: city.clone(),
            token,
            from_input,
        });
        token
    }

    fn apply(&self, token: u64, outcome: FetchOutcome) -> Submission {
        let mut state = self.state.write();
        if token != state.latest_token {
            debug!(
                token,
                latest = state.latest_token,
                "Discarding response to superseded lookup"
            );
            return Submission::Superseded { token };
        }

        state.search.is_loading = false;
        let from_input = state
            .last_request
            .as_ref()
            .is_some_and(|request| request.from_input);

        match outcome {
            FetchOutcome::Success(snapshot) => {
                info!(city = %snapshot.city_name, condition = %snapshot.condition, "Weather updated");
                state.content = ViewContent::Displaying(snapshot);
                if from_input {
                    state.search.query_text.clear();
                }
            },
            FetchOutcome::NotFound => {
                info!("Location not found");
                state.content = ViewContent::NotFound;
            },
            FetchOutcome::TransientError { reason, retryable } => {
                warn!(reason = %reason, retryable, "Weather lookup failed");
                state.content = ViewContent::Failed { reason, retryable };
            },
        }

        Submission::Applied { token }
    }
}
