//! In-memory storage
//!
//! The rolling block window that backs searches and the scrolling display.

pub mod ledger;

pub use ledger::{Ledger, DEFAULT_RETENTION};
