//! Wallet provider abstraction
//!
//! The explorer never implements a wallet; it talks to injected providers
//! through a small capability interface.

pub mod provider;

pub use provider::{
    AccountChangedHandler, ChainKind, DemoProvider, ProviderRegistry, WalletKind, WalletProvider,
    WalletSession,
};
