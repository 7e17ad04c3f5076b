//! Configuration module
//!
//! Settings for display and behavior, persisted as TOML in the user's
//! config directory.

pub mod config;

pub use config::Config;
