//! Live chain reader
//!
//! JSON-RPC access to a real chain node, mapped into the same entity shapes
//! the synthesizer produces.

pub mod client;

pub use client::RpcClient;
