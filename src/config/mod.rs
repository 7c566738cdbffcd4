//! Configuration module for grafana-sync
//!
//! Provides CLI argument parsing and validated runtime settings.

mod settings;

pub use settings::*;
