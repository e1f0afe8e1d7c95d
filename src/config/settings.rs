use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::env;
use std::sync::RwLock;
use std::time::Duration;

pub static GLOBAL_CONFIG: Lazy<Config> = Lazy::new(Config::new);

const RPC_URL_KEY: &str = "RPC_URL";
const RETENTION_KEY: &str = "BLOCK_RETENTION";
const DEMO_INTERVAL_KEY: &str = "DEMO_INTERVAL_SECS";
const POLL_INTERVAL_KEY: &str = "POLL_INTERVAL_SECS";
const RPC_TIMEOUT_KEY: &str = "RPC_TIMEOUT_SECS";

const DEFAULT_RETENTION: usize = 30;
/// Demo mode produces a block every 5 seconds.
const DEFAULT_DEMO_INTERVAL_SECS: u64 = 5;
/// Live mode polls the node every 2 seconds.
const DEFAULT_POLL_INTERVAL_SECS: u64 = 2;
const DEFAULT_RPC_TIMEOUT_SECS: u64 = 10;

pub struct Config {
    inner: RwLock<HashMap<String, String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Config {
        let mut map = HashMap::new();
        for key in [
            RPC_URL_KEY,
            RETENTION_KEY,
            DEMO_INTERVAL_KEY,
            POLL_INTERVAL_KEY,
            RPC_TIMEOUT_KEY,
        ] {
            if let Ok(value) = env::var(key) {
                map.insert(String::from(key), value);
            }
        }

        Config {
            inner: RwLock::new(map),
        }
    }

    pub fn get_rpc_url(&self) -> Option<String> {
        let inner = self
            .inner
            .read()
            .expect("Failed to acquire read lock on config - this should never happen");
        inner.get(RPC_URL_KEY).cloned()
    }

    pub fn set_rpc_url(&self, url: String) {
        let mut inner = self
            .inner
            .write()
            .expect("Failed to acquire write lock on config - this should never happen");
        inner.insert(String::from(RPC_URL_KEY), url);
    }

    pub fn get_retention(&self) -> usize {
        self.numeric(RETENTION_KEY, DEFAULT_RETENTION as u64).max(1) as usize
    }

    pub fn get_demo_interval(&self) -> Duration {
        Duration::from_secs(self.numeric(DEMO_INTERVAL_KEY, DEFAULT_DEMO_INTERVAL_SECS))
    }

    pub fn get_poll_interval(&self) -> Duration {
        Duration::from_secs(self.numeric(POLL_INTERVAL_KEY, DEFAULT_POLL_INTERVAL_SECS))
    }

    pub fn get_rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.numeric(RPC_TIMEOUT_KEY, DEFAULT_RPC_TIMEOUT_SECS))
    }

    fn numeric(&self, key: &str, default: u64) -> u64 {
        let inner = self
            .inner
            .read()
            .expect("Failed to acquire read lock on config - this should never happen");
        match inner.get(key) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn!("Ignoring non-numeric {key}={raw}, using {default}");
                default
            }),
            None => default,
        }
    }
}
