//! Core module for catalog data, storage backends, and configuration

pub mod config;
pub mod loader;
pub mod models;
pub mod store;

/// Returns the current version of the course planner crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
