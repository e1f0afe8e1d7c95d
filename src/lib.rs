//! # Explorer Lite - A Toy Block Explorer
//!
//! A terminal block explorer that streams blocks (synthetic by default, real
//! ones over JSON-RPC when a node is configured) and gamifies clicking them
//! for points and badges.
//!
//! ## What's Here
//! - **Query Classifier**: turns free text into block/transaction/address
//!   references using fixed lexical grammars
//! - **Demo Synthesizer**: pseudo-random blocks with badge categories, the
//!   always-succeeds fallback behind every search
//! - **Live Chain Reader**: blocking JSON-RPC client mapping node responses
//!   into the same entity shapes
//! - **Block Ledger**: bounded rolling window with confirmation-depth
//!   recomputation
//! - **Score/Badge Engine**: idempotent per-block scoring and per-category
//!   badge awards
//!
//! ## How the Code Is Organized
//! - `core/`: domain types, classifier, synthesizer, score engine
//! - `storage/`: the in-memory block ledger
//! - `rpc/`: the live chain reader
//! - `explorer/`: the top-level controller and its owned block streams
//! - `wallet/`: the wallet provider capability interface
//! - `config/`: environment-driven settings
//! - `cli/`: command definitions for the binary
//! - `utils/`: hex and formatting helpers
//!
//! ## Key Design Decisions
//! - Searches never dead-end: ledger first, then the node, then synthesis
//! - One active block stream at a time, stopped before being replaced
//! - All state lives in one `Explorer` container, built once at startup
//! - RPC failures degrade to cached or synthesized data, never a hard stop

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod explorer;
pub mod rpc;
pub mod storage;
pub mod utils;
pub mod wallet;

// Re-export commonly used types for convenience
pub use cli::{Command, Opt};
pub use config::{Config, GLOBAL_CONFIG};
pub use core::{
    BadgeCategory, Block, ClickOutcome, ConfirmationStatus, Entity, Notification,
    NotificationKind, QueryKind, ScoreBoard, Transaction, TxStatus,
};
pub use error::{ExplorerError, Result};
pub use explorer::{AddressSummary, BlockStream, Explorer, Mode, NotificationSink};
pub use rpc::RpcClient;
pub use storage::{Ledger, DEFAULT_RETENTION};
pub use wallet::{DemoProvider, ProviderRegistry, WalletKind, WalletProvider, WalletSession};
