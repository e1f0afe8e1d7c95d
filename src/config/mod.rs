//! Configuration management
//!
//! Environment-driven settings for the explorer.

pub mod settings;

pub use settings::{Config, GLOBAL_CONFIG};
