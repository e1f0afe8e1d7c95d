//! Utility functions and helpers
//!
//! Hex parsing/generation and the formatting helpers shared by the
//! synthesizer, the RPC client, and the presentation layer.

pub mod format;
pub mod hex;

pub use format::{current_timestamp, format_native, format_time_ago};
pub use hex::{parse_hex_u128, parse_hex_u64, random_hex};
