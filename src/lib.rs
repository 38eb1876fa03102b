//! Course catalog library for the course planner CLI
//!
//! Holds the course model, the interchangeable storage backends, the
//! CSV loader, configuration, and the logging macros.

pub mod core;
pub mod logger;

pub use self::core::*;
