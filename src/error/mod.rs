//! Error handling for the explorer
//!
//! This module provides the error types shared by every explorer operation.

use std::fmt;

/// Result type alias for explorer operations
pub type Result<T> = std::result::Result<T, ExplorerError>;

/// Error types for explorer operations
#[derive(Debug, Clone)]
pub enum ExplorerError {
    /// JSON-RPC protocol errors (error envelope or malformed response)
    Rpc(String),
    /// HTTP transport errors talking to a chain node
    Http(String),
    /// Numeric or hex parsing errors
    Parse(String),
    /// Invalid user query
    Query(String),
    /// Configuration errors
    Config(String),
    /// Wallet provider errors
    Wallet(String),
    /// File I/O errors
    Io(String),
}

impl fmt::Display for ExplorerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExplorerError::Rpc(msg) => write!(f, "RPC error: {msg}"),
            ExplorerError::Http(msg) => write!(f, "HTTP error: {msg}"),
            ExplorerError::Parse(msg) => write!(f, "Parse error: {msg}"),
            ExplorerError::Query(msg) => write!(f, "Invalid query: {msg}"),
            ExplorerError::Config(msg) => write!(f, "Configuration error: {msg}"),
            ExplorerError::Wallet(msg) => write!(f, "Wallet error: {msg}"),
            ExplorerError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for ExplorerError {}

impl From<std::io::Error> for ExplorerError {
    fn from(err: std::io::Error) -> Self {
        ExplorerError::Io(err.to_string())
    }
}

impl From<reqwest::Error> for ExplorerError {
    fn from(err: reqwest::Error) -> Self {
        ExplorerError::Http(err.to_string())
    }
}

impl From<serde_json::Error> for ExplorerError {
    fn from(err: serde_json::Error) -> Self {
        ExplorerError::Rpc(format!("malformed response: {err}"))
    }
}

impl From<std::num::ParseIntError> for ExplorerError {
    fn from(err: std::num::ParseIntError) -> Self {
        ExplorerError::Parse(err.to_string())
    }
}
