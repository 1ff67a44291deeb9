//! City name value object
//!
//! A location query as typed by the user. Construction trims surrounding
//! whitespace and rejects queries that are empty afterwards, so holding a
//! `CityName` means a lookup is worth issuing.
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::CityName;
//!
//! let city = CityName::new("  Bengaluru ").expect("non-empty city");
//! assert_eq!(city.as_str(), "Bengaluru");
//!
//! assert!(CityName::new("   ").is_err());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// A trimmed, non-empty city name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CityName(String);

impl CityName {
    /// Create a city name from raw user input
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyCityName` if the input is empty or
    /// whitespace-only.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, DomainError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyCityName);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the city name as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CityName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for CityName {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CityName> for String {
    fn from(city: CityName) -> Self {
        city.0
    }
}

impl AsRef<str> for CityName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
