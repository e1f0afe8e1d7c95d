use crate::core::{Block, Transaction};
use std::sync::RwLock;

/// How many blocks the ledger retains; older blocks are evicted on insert.
pub const DEFAULT_RETENTION: usize = 30;

/// Maximum transactions returned for an address scan.
const ADDRESS_SCAN_LIMIT: usize = 10;

#[derive(Debug, Default)]
struct LedgerInner {
    /// Newest-first
    blocks: Vec<Block>,
    latest_number: u64,
}

/// Rolling window of the most recent blocks.
///
/// Blocks are owned exclusively by the ledger; lookups hand out clones.
/// Confirmations are recomputed for every retained block whenever the latest
/// known number changes.
pub struct Ledger {
    inner: RwLock<LedgerInner>,
    retention: usize,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    pub fn new() -> Ledger {
        Ledger::with_retention(DEFAULT_RETENTION)
    }

    pub fn with_retention(retention: usize) -> Ledger {
        Ledger {
            inner: RwLock::new(LedgerInner::default()),
            retention: retention.max(1),
        }
    }

    /// Prepend a block, bump the latest known number, recompute confirmation
    /// depths, and evict anything beyond the retention window. Block numbers
    /// are unique within the window; re-inserting a number replaces the old
    /// entry.
    pub fn insert(&self, block: Block) {
        match self.inner.write() {
            Ok(mut inner) => {
                inner.latest_number = inner.latest_number.max(block.get_number());
                inner.blocks.retain(|b| b.get_number() != block.get_number());
                inner.blocks.insert(0, block);
                let latest = inner.latest_number;
                for b in inner.blocks.iter_mut() {
                    // A block numbered above latest must not underflow
                    b.set_confirmations(latest.saturating_sub(b.get_number()));
                }
                inner.blocks.truncate(self.retention);
            }
            Err(_) => {
                log::error!("Failed to acquire write lock on ledger");
            }
        }
    }

    pub fn latest_number(&self) -> u64 {
        match self.inner.read() {
            Ok(inner) => inner.latest_number,
            Err(_) => {
                log::error!("Failed to acquire read lock on ledger");
                0
            }
        }
    }

    pub fn lookup_by_number(&self, number: u64) -> Option<Block> {
        match self.inner.read() {
            Ok(inner) => inner
                .blocks
                .iter()
                .find(|b| b.get_number() == number)
                .cloned(),
            Err(_) => {
                log::error!("Failed to acquire read lock on ledger");
                None
            }
        }
    }

    pub fn lookup_by_hash(&self, hash: &str) -> Option<Block> {
        match self.inner.read() {
            Ok(inner) => inner
                .blocks
                .iter()
                .find(|b| b.get_hash().eq_ignore_ascii_case(hash))
                .cloned(),
            Err(_) => {
                log::error!("Failed to acquire read lock on ledger");
                None
            }
        }
    }

    /// Scan the retained window for a transaction by hash.
    pub fn lookup_transaction(&self, hash: &str) -> Option<Transaction> {
        match self.inner.read() {
            Ok(inner) => inner.blocks.iter().find_map(|b| {
                b.get_transactions()
                    .iter()
                    .find(|tx| tx.get_hash().eq_ignore_ascii_case(hash))
                    .cloned()
                    .map(|tx| tx.with_block_number(Some(b.get_number())))
            }),
            Err(_) => {
                log::error!("Failed to acquire read lock on ledger");
                None
            }
        }
    }

    /// Transactions involving an address (as sender or recipient), capped.
    pub fn transactions_for(&self, address: &str) -> Vec<Transaction> {
        match self.inner.read() {
            Ok(inner) => inner
                .blocks
                .iter()
                .flat_map(|b| {
                    b.get_transactions()
                        .iter()
                        .filter(|tx| tx.involves_address(address))
                        .cloned()
                        .map(|tx| tx.with_block_number(Some(b.get_number())))
                })
                .take(ADDRESS_SCAN_LIMIT)
                .collect(),
            Err(_) => {
                log::error!("Failed to acquire read lock on ledger");
                Vec::new()
            }
        }
    }

    /// Snapshot of the retained window, newest first.
    pub fn blocks(&self) -> Vec<Block> {
        match self.inner.read() {
            Ok(inner) => inner.blocks.clone(),
            Err(_) => {
                log::error!("Failed to acquire read lock on ledger");
                Vec::new()
            }
        }
    }

    pub fn len(&self) -> usize {
        match self.inner.read() {
            Ok(inner) => inner.blocks.len(),
            Err(_) => {
                log::error!("Failed to acquire read lock on ledger");
                0
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        match self.inner.write() {
            Ok(mut inner) => {
                inner.blocks.clear();
                inner.latest_number = 0;
            }
            Err(_) => {
                log::error!("Failed to acquire write lock on ledger");
            }
        }
    }
}
