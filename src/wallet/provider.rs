use crate::error::{ExplorerError, Result};
use crate::utils::random_hex;
use rand::RngCore;
use std::fmt;
use std::str::FromStr;

/// Chain family a wallet speaks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainKind {
    Evm,
    Solana,
}

impl fmt::Display for ChainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainKind::Evm => write!(f, "evm"),
            ChainKind::Solana => write!(f, "solana"),
        }
    }
}

/// The wallet variants the explorer knows how to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WalletKind {
    MetaMask,
    Coinbase,
    Phantom,
    Backpack,
}

impl WalletKind {
    pub fn chain(&self) -> ChainKind {
        match self {
            WalletKind::MetaMask | WalletKind::Coinbase => ChainKind::Evm,
            WalletKind::Phantom | WalletKind::Backpack => ChainKind::Solana,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WalletKind::MetaMask => "MetaMask",
            WalletKind::Coinbase => "Coinbase Wallet",
            WalletKind::Phantom => "Phantom",
            WalletKind::Backpack => "Backpack",
        }
    }
}

impl fmt::Display for WalletKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalletKind::MetaMask => write!(f, "metamask"),
            WalletKind::Coinbase => write!(f, "coinbase"),
            WalletKind::Phantom => write!(f, "phantom"),
            WalletKind::Backpack => write!(f, "backpack"),
        }
    }
}

impl FromStr for WalletKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "metamask" => Ok(WalletKind::MetaMask),
            "coinbase" => Ok(WalletKind::Coinbase),
            "phantom" => Ok(WalletKind::Phantom),
            "backpack" => Ok(WalletKind::Backpack),
            _ => Err(format!(
                "Unknown wallet: {s}. Valid options: metamask, coinbase, phantom, backpack"
            )),
        }
    }
}

/// Outcome of a successful connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletSession {
    pub address: String,
    pub kind: WalletKind,
    pub chain: ChainKind,
}

/// Callback invoked with the new address, or None on disconnect.
pub type AccountChangedHandler = Box<dyn FnMut(Option<String>) + Send>;

/// Capability interface over an injected wallet object.
pub trait WalletProvider: Send {
    fn kind(&self) -> WalletKind;

    /// Request a session. A user rejection surfaces as a wallet error with a
    /// descriptive message; it never touches ledger or score state.
    fn connect(&mut self) -> Result<WalletSession>;

    fn on_account_changed(&mut self, handler: AccountChangedHandler);
}

/// The set of providers found in the environment.
///
/// Detection is an explicit capability probe over whatever was injected,
/// replacing duck-typed presence checks on ambient globals.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: Vec<Box<dyn WalletProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> ProviderRegistry {
        ProviderRegistry::default()
    }

    pub fn register(&mut self, provider: Box<dyn WalletProvider>) {
        self.providers.push(provider);
    }

    /// The wallets available to connect to.
    pub fn detect(&self) -> Vec<WalletKind> {
        self.providers.iter().map(|p| p.kind()).collect()
    }

    pub fn connect(&mut self, kind: WalletKind) -> Result<WalletSession> {
        match self.providers.iter_mut().find(|p| p.kind() == kind) {
            Some(provider) => provider.connect(),
            None => Err(ExplorerError::Wallet(format!(
                "{} not installed",
                kind.label()
            ))),
        }
    }

    /// Connect without naming a wallet: works only when exactly one provider
    /// is available, otherwise the caller must pick.
    pub fn connect_any(&mut self) -> Result<WalletSession> {
        let available = self.detect();
        match available.as_slice() {
            [] => Err(ExplorerError::Wallet(
                "No wallet providers detected. Install MetaMask, Phantom, Backpack, or Coinbase Wallet.".to_string(),
            )),
            [only] => self.connect(*only),
            many => {
                let names: Vec<&str> = many.iter().map(|k| k.label()).collect();
                Err(ExplorerError::Wallet(format!(
                    "Multiple wallets available ({}), pick one",
                    names.join(", ")
                )))
            }
        }
    }
}

/// In-process provider used by the CLI demo and tests. Hands out a fresh
/// chain-appropriate address and can be told to behave like a user who
/// rejects the connection prompt.
pub struct DemoProvider {
    kind: WalletKind,
    address: String,
    reject: bool,
    handler: Option<AccountChangedHandler>,
}

impl DemoProvider {
    pub fn new(kind: WalletKind) -> DemoProvider {
        let address = match kind.chain() {
            ChainKind::Evm => random_hex(20),
            ChainKind::Solana => {
                let mut key = [0u8; 32];
                rand::thread_rng().fill_bytes(&mut key);
                bs58::encode(key).into_string()
            }
        };
        DemoProvider {
            kind,
            address,
            reject: false,
            handler: None,
        }
    }

    /// Make the next connect behave like a rejected prompt.
    pub fn rejecting(mut self) -> DemoProvider {
        self.reject = true;
        self
    }

    /// Drive the account-changed callback, as a browser provider would on a
    /// wallet-side account switch.
    pub fn simulate_account_change(&mut self, address: Option<String>) {
        if let Some(new) = &address {
            self.address = new.clone();
        }
        if let Some(handler) = &mut self.handler {
            handler(address);
        }
    }
}

impl WalletProvider for DemoProvider {
    fn kind(&self) -> WalletKind {
        self.kind
    }

    fn connect(&mut self) -> Result<WalletSession> {
        if self.reject {
            return Err(ExplorerError::Wallet(format!(
                "{} connection request rejected by user",
                self.kind.label()
            )));
        }
        Ok(WalletSession {
            address: self.address.clone(),
            kind: self.kind,
            chain: self.kind.chain(),
        })
    }

    fn on_account_changed(&mut self, handler: AccountChangedHandler) {
        self.handler = Some(handler);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_detect_lists_registered_providers() {
        let mut registry = ProviderRegistry::new();
        registry.register(Box::new(DemoProvider::new(WalletKind::MetaMask)));
        registry.register(Box::new(DemoProvider::new(WalletKind::Phantom)));
        assert_eq!(
            registry.detect(),
            vec![WalletKind::MetaMask, WalletKind::Phantom]
        );
    }

    #[test]
    fn test_connect_returns_chain_appropriate_address() {
        let mut registry = ProviderRegistry::new();
        registry.register(Box::new(DemoProvider::new(WalletKind::MetaMask)));
        registry.register(Box::new(DemoProvider::new(WalletKind::Backpack)));

        let evm = registry.connect(WalletKind::MetaMask).unwrap();
        assert_eq!(evm.chain, ChainKind::Evm);
        assert!(evm.address.starts_with("0x"));
        assert_eq!(evm.address.len(), 42);

        let sol = registry.connect(WalletKind::Backpack).unwrap();
        assert_eq!(sol.chain, ChainKind::Solana);
        assert!(!sol.address.starts_with("0x"));
    }

    #[test]
    fn test_missing_provider_is_an_error() {
        let mut registry = ProviderRegistry::new();
        let err = registry.connect(WalletKind::Phantom).unwrap_err();
        assert!(err.to_string().contains("not installed"));
    }

    #[test]
    fn test_user_rejection_is_an_error() {
        let mut registry = ProviderRegistry::new();
        registry.register(Box::new(DemoProvider::new(WalletKind::MetaMask).rejecting()));
        let err = registry.connect(WalletKind::MetaMask).unwrap_err();
        assert!(err.to_string().contains("rejected"));
    }

    #[test]
    fn test_connect_any_needs_exactly_one() {
        let mut registry = ProviderRegistry::new();
        assert!(registry.connect_any().is_err());

        registry.register(Box::new(DemoProvider::new(WalletKind::Phantom)));
        assert_eq!(registry.connect_any().unwrap().kind, WalletKind::Phantom);

        registry.register(Box::new(DemoProvider::new(WalletKind::MetaMask)));
        let err = registry.connect_any().unwrap_err();
        assert!(err.to_string().contains("pick one"));
    }

    #[test]
    fn test_account_changed_callback_fires() {
        let (tx, rx) = mpsc::channel();
        let mut provider = DemoProvider::new(WalletKind::Phantom);
        provider.on_account_changed(Box::new(move |address| {
            tx.send(address).unwrap();
        }));

        provider.simulate_account_change(Some("newkey".to_string()));
        assert_eq!(rx.recv().unwrap(), Some("newkey".to_string()));

        provider.simulate_account_change(None);
        assert_eq!(rx.recv().unwrap(), None);
    }

    #[test]
    fn test_wallet_kind_parsing() {
        assert_eq!("metamask".parse::<WalletKind>(), Ok(WalletKind::MetaMask));
        assert_eq!("PHANTOM".parse::<WalletKind>(), Ok(WalletKind::Phantom));
        assert!("ledger".parse::<WalletKind>().is_err());
    }
}
