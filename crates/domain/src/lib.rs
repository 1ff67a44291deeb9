//! Domain layer for the weather widget
//!
//! Contains the weather snapshot entity, the value objects it is built from,
//! and domain errors. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
