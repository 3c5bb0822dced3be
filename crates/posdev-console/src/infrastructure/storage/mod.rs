//! Storage infrastructure: console settings persistence.
//!
//! The `settings` sub-module reads and writes the TOML settings file from the
//! platform-appropriate directory and supplies defaults on first run.

pub mod settings;
