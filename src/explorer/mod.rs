//! Top-level controller
//!
//! The explorer state container and the owned block streams it manages.

pub mod controller;
pub mod stream;

pub use controller::{AddressSummary, Explorer, Mode, NotificationSink};
pub use stream::{BlockStream, StreamKind};
