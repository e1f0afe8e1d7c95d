//! Command-line interface
//!
//! Command definitions for the explorer binary.

pub mod commands;

pub use commands::{Command, Opt};
