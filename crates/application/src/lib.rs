//! Application layer - Use cases and orchestration
//!
//! Holds the widget's state store and input handling, the presenter that
//! derives display values from it, and the port through which weather is
//! fetched.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
