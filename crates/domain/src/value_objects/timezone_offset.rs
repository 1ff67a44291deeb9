//! Timezone offset value object
//!
//! The provider reports a location's UTC offset in seconds. The widget shows
//! the *current* wall-clock time at that location, so the offset has to be
//! turned into a zone. By default only whole hours are honoured: the offset
//! is truncated toward zero and mapped onto an `Etc/GMT±N` zone, which means
//! UTC+5:30 is shown as UTC+5. `OffsetPrecision::Exact` keeps the minutes.

use chrono::{DateTime, FixedOffset, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;

const SECONDS_PER_HOUR: i32 = 3600;

/// How precisely an offset is applied when computing local time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffsetPrecision {
    /// Truncate to whole hours and resolve through the `Etc/GMT` zones
    #[default]
    WholeHours,
    /// Apply the offset to the second
    Exact,
}

impl OffsetPrecision {
    #[must_use]
    pub const fn from_exact(exact: bool) -> Self {
        if exact { Self::Exact } else { Self::WholeHours }
    }
}

/// Offset from UTC in seconds, east positive
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimezoneOffset(i32);

impl TimezoneOffset {
    pub const UTC: Self = Self(0);

    #[must_use]
    pub const fn from_seconds(seconds: i32) -> Self {
        Self(seconds)
    }

    #[must_use]
    pub const fn seconds(self) -> i32 {
        self.0
    }

    /// Offset in whole hours, truncated toward zero
    #[must_use]
    pub const fn whole_hours(self) -> i32 {
        self.0 / SECONDS_PER_HOUR
    }

    /// Whether truncating to whole hours loses information
    #[must_use]
    pub const fn has_fractional_hours(self) -> bool {
        self.0 % SECONDS_PER_HOUR != 0
    }

    /// The `Etc/GMT` zone identifier for the whole-hour offset.
    ///
    /// POSIX-style `Etc` zones invert the sign: UTC+5 is `Etc/GMT-5`.
    ///
    /// ```
    /// use domain::value_objects::TimezoneOffset;
    ///
    /// assert_eq!(TimezoneOffset::from_seconds(19800).zone_identifier(), "Etc/GMT-5");
    /// assert_eq!(TimezoneOffset::from_seconds(-18000).zone_identifier(), "Etc/GMT+5");
    /// assert_eq!(TimezoneOffset::UTC.zone_identifier(), "Etc/GMT");
    /// ```
    #[must_use]
    pub fn zone_identifier(self) -> String {
        match self.whole_hours() {
            0 => "Etc/GMT".to_string(),
            hours if hours > 0 => format!("Etc/GMT-{hours}"),
            hours => format!("Etc/GMT+{}", -hours),
        }
    }

    /// Resolve the whole-hour zone in the tz database.
    ///
    /// Returns `None` for offsets no `Etc/GMT` zone covers (beyond -12/+14).
    #[must_use]
    pub fn whole_hour_zone(self) -> Option<Tz> {
        self.zone_identifier().parse::<Tz>().ok()
    }

    /// Convert an instant to wall-clock time at this offset.
    ///
    /// Returns `None` when the offset cannot be represented at the requested
    /// precision.
    #[must_use]
    pub fn local_time(
        self,
        now: DateTime<Utc>,
        precision: OffsetPrecision,
    ) -> Option<DateTime<FixedOffset>> {
        match precision {
            OffsetPrecision::WholeHours => self
                .whole_hour_zone()
                .map(|zone| now.with_timezone(&zone).fixed_offset()),
            OffsetPrecision::Exact => {
                FixedOffset::east_opt(self.0).map(|offset| now.with_timezone(&offset))
            },
        }
    }
}

impl fmt::Display for TimezoneOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { '-' } else { '+' };
        let abs = self.0.unsigned_abs();
        write!(f, "UTC{sign}{:02}:{:02}", abs / 3600, (abs % 3600) / 60)
    }
}
