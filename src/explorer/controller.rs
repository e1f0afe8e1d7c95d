use crate::config::GLOBAL_CONFIG;
use crate::core::{
    synthesize, synthesize_transaction, Block, ClickOutcome, Entity, Notification, QueryKind,
    ScoreBoard, Transaction,
};
use crate::error::Result;
use crate::explorer::stream::BlockStream;
use crate::rpc::RpcClient;
use crate::storage::Ledger;
use log::warn;
use rand::Rng;
use std::sync::Arc;

/// Blocks seeded (demo) or backfilled (live) when a stream starts.
const SEED_BLOCK_COUNT: u64 = 8;

/// Where engine events go. The presentation layer is an external
/// collaborator; the CLI plugs in a terminal sink.
pub trait NotificationSink {
    fn notify(&mut self, notification: &Notification);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Demo,
    Live,
}

/// Render-time enrichment for an address entity.
#[derive(Debug, Clone)]
pub struct AddressSummary {
    pub address: String,
    /// Only available in live mode
    pub balance: Option<String>,
    pub transactions: Vec<Transaction>,
}

/// Top-level state container for the explorer.
///
/// Owns the ledger, the score state, the optional RPC client, and the single
/// active block stream. Everything the reference demo kept in module-level
/// globals lives here, constructed once and torn down by `shutdown`.
pub struct Explorer {
    ledger: Arc<Ledger>,
    scoreboard: ScoreBoard,
    client: Option<Arc<RpcClient>>,
    stream: Option<BlockStream>,
    mode: Mode,
}

impl Default for Explorer {
    fn default() -> Self {
        Self::new()
    }
}

impl Explorer {
    pub fn new() -> Explorer {
        Explorer {
            ledger: Arc::new(Ledger::with_retention(GLOBAL_CONFIG.get_retention())),
            scoreboard: ScoreBoard::new(),
            client: None,
            stream: None,
            mode: Mode::Demo,
        }
    }

    pub fn get_mode(&self) -> Mode {
        self.mode
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn scoreboard(&self) -> &ScoreBoard {
        &self.scoreboard
    }

    /// Switch to demo mode: reseed the window and start the block producer.
    /// Any previously active stream is stopped first.
    pub fn start_demo(&mut self) {
        self.stop_stream();
        self.client = None;
        self.mode = Mode::Demo;
        self.ledger.clear();

        let latest = 1000 + rand::thread_rng().gen_range(0..5000);
        for i in (0..SEED_BLOCK_COUNT).rev() {
            self.ledger.insert(synthesize(latest - i));
        }
        self.stream = Some(BlockStream::spawn_demo(
            self.ledger.clone(),
            GLOBAL_CONFIG.get_demo_interval(),
        ));
    }

    /// Switch to live mode against a JSON-RPC endpoint. The endpoint is
    /// probed before the current stream is torn down, so a bad URL leaves
    /// the explorer in its previous mode.
    pub fn start_live(&mut self, url: &str) -> Result<()> {
        let (client, latest) = RpcClient::connect(url)?;
        let client = Arc::new(client);

        self.stop_stream();
        self.mode = Mode::Live;
        self.ledger.clear();

        // Backfill oldest-first so confirmation depths line up. On a chain
        // shorter than the window this fetches only the blocks that exist,
        // never the same number twice.
        let oldest = latest.saturating_sub(SEED_BLOCK_COUNT - 1);
        for number in oldest..=latest {
            match client.fetch_block_by_number(number) {
                Ok(Some(block)) => self.ledger.insert(block),
                Ok(None) => {}
                Err(e) => warn!("Skipping block {number} during backfill: {e}"),
            }
        }

        self.stream = Some(BlockStream::spawn_live(
            self.ledger.clone(),
            client.clone(),
            GLOBAL_CONFIG.get_poll_interval(),
        ));
        self.client = Some(client);
        Ok(())
    }

    pub fn has_active_stream(&self) -> bool {
        self.stream.is_some()
    }

    fn stop_stream(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
        }
    }

    /// Stop the active stream and drop the RPC client. Score and badge state
    /// survive until the process exits.
    pub fn shutdown(&mut self) {
        self.stop_stream();
        self.client = None;
    }

    /// Classify and resolve a query. Block and transaction references always
    /// resolve (ledger, then live reader, then synthesizer); only queries
    /// that fail the grammar come back `Unknown`.
    pub fn search(&self, query: &str) -> Entity {
        match QueryKind::classify(query) {
            QueryKind::Empty => Entity::Unknown(String::new()),
            QueryKind::Unknown(q) => Entity::Unknown(q),
            QueryKind::Block(number) => Entity::Block(self.resolve_block(number)),
            QueryKind::TxHash(hash) => Entity::Transaction(self.resolve_transaction(&hash)),
            QueryKind::Address(address) => Entity::Address(address),
        }
    }

    fn resolve_block(&self, number: u64) -> Block {
        if let Some(block) = self.ledger.lookup_by_number(number) {
            return block;
        }
        if let Some(client) = &self.client {
            match client.fetch_block_by_number(number) {
                Ok(Some(block)) => return block,
                Ok(None) => {}
                Err(e) => warn!("Falling back to synthesized block {number}: {e}"),
            }
        }
        synthesize(number)
    }

    fn resolve_transaction(&self, hash: &str) -> Transaction {
        if let Some(tx) = self.ledger.lookup_transaction(hash) {
            return tx;
        }
        if let Some(client) = &self.client {
            match client.fetch_transaction(hash) {
                Ok(Some(tx)) => return tx,
                Ok(None) => {}
                Err(e) => warn!("Falling back to synthesized transaction {hash}: {e}"),
            }
        }
        synthesize_transaction(hash)
    }

    /// Handle a user click on a block: score award (once per block number)
    /// plus the independent badge evaluation. Both emit through the sink.
    pub fn click_block(&mut self, number: u64, sink: &mut dyn NotificationSink) -> ClickOutcome {
        let block = self.resolve_block(number);
        let (outcome, notification) = self.scoreboard.click(&block);
        sink.notify(&notification);

        if let Some((_, badge_notification)) = self.scoreboard.award_badge(&block) {
            sink.notify(&badge_notification);
        }
        outcome
    }

    /// Balance and recent transactions for an address entity. Balance needs
    /// live mode; a fetch failure degrades to "unavailable" rather than
    /// surfacing an error.
    pub fn address_summary(&self, address: &str) -> AddressSummary {
        let balance = self.client.as_ref().and_then(|client| {
            match client.fetch_balance(address) {
                Ok(balance) => Some(balance),
                Err(e) => {
                    warn!("Failed to fetch balance for {address}: {e}");
                    None
                }
            }
        });

        AddressSummary {
            address: address.to_string(),
            balance,
            transactions: self.ledger.transactions_for(address),
        }
    }
}

impl Drop for Explorer {
    fn drop(&mut self) {
        self.shutdown();
    }
}
