//! CLI command handlers for the course planner.
//!
//! This module provides handlers for various CLI subcommands.
//! Each command is implemented in its own submodule.

pub mod advise;
pub mod config;
