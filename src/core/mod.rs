//! Core explorer functionality
//!
//! This module contains the domain types and the pure engines: blocks and
//! transactions, query classification, demo data synthesis, and the
//! score/badge state machine.

pub mod block;
pub mod entity;
pub mod score;
pub mod synthesizer;

pub use block::{
    BadgeCategory, Block, ConfirmationStatus, Transaction, TxStatus, CONFIRMED_DEPTH,
};
pub use entity::{Entity, QueryKind};
pub use score::{
    BadgeOutcome, ClickOutcome, Notification, NotificationKind, ScoreBoard, BASE_CLICK_POINTS,
};
pub use synthesizer::{synthesize, synthesize_transaction, synthesize_with_category};
