//! Value Objects - Immutable, identity-less domain primitives

mod city_name;
mod humidity;
mod theme_mode;
mod timezone_offset;

pub use city_name::CityName;
pub use humidity::{Humidity, InvalidHumidity};
pub use theme_mode::ThemeMode;
pub use timezone_offset::{OffsetPrecision, TimezoneOffset};
