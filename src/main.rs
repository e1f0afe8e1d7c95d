// Entry point for the explorer CLI: thin presentation over the library.
use clap::Parser;
use explorer_lite::utils::{current_timestamp, format_time_ago};
use explorer_lite::{
    AddressSummary, Block, Command, DemoProvider, Entity, Explorer, Mode, Notification,
    NotificationKind, NotificationSink, Opt, ProviderRegistry, RpcClient, Transaction,
    WalletKind, GLOBAL_CONFIG,
};
use log::{error, info, warn, LevelFilter};
use std::process;
use std::thread;
use std::time::Duration;

fn main() {
    env_logger::builder().filter_level(LevelFilter::Info).init();

    let opt = Opt::parse();

    if let Err(e) = run_command(opt.command) {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn run_command(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Watch { rpc, ticks } => {
            let mut explorer = Explorer::new();
            start_streaming(&mut explorer, rpc);

            let interval = refresh_interval(explorer.get_mode());
            let mut tick = 0u64;
            loop {
                render_rail(&explorer);
                tick += 1;
                if let Some(limit) = ticks {
                    if tick >= limit {
                        break;
                    }
                }
                thread::sleep(interval);
            }
            explorer.shutdown();
        }
        Command::Search { query, rpc } => {
            if query.trim().is_empty() {
                println!("Enter a block number, transaction hash, or address to search.");
                return Ok(());
            }
            let mut explorer = Explorer::new();
            if let Some(url) = rpc.or_else(|| GLOBAL_CONFIG.get_rpc_url()) {
                if let Err(e) = explorer.start_live(&url) {
                    warn!("Could not reach {url} ({e}), answering from demo data");
                }
            }
            let entity = explorer.search(&query);
            render_entity(&explorer, &entity);
            explorer.shutdown();
        }
        Command::Click { number } => {
            let mut explorer = Explorer::new();
            let mut sink = TerminalSink;
            explorer.click_block(number, &mut sink);

            let board = explorer.scoreboard();
            println!("Score: {}", board.get_score());
            for badge in board.get_badges() {
                println!("Badge: {} - {}", badge.label(), badge.description());
            }
        }
        Command::Balance { address, rpc } => {
            let (client, latest) = RpcClient::connect(&rpc)?;
            info!("Latest block: {latest}");
            let balance = client.fetch_balance(&address)?;
            println!("{address}: {balance} MON");
        }
        Command::ConnectWallet { wallet } => {
            // The demo registry stands in for browser-injected providers
            let mut registry = ProviderRegistry::new();
            for kind in [
                WalletKind::MetaMask,
                WalletKind::Coinbase,
                WalletKind::Phantom,
                WalletKind::Backpack,
            ] {
                registry.register(Box::new(DemoProvider::new(kind)));
            }

            let detected = registry.detect();
            println!(
                "Detected wallets: {}",
                detected
                    .iter()
                    .map(|k| k.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            );

            let result = match wallet {
                Some(kind) => registry.connect(kind),
                None => registry.connect_any(),
            };
            match result {
                Ok(session) => println!(
                    "Connected to {} ({}): {}",
                    session.kind.label(),
                    session.chain,
                    session.address
                ),
                Err(e) => {
                    let n = Notification::error(format!("Failed to connect wallet: {e}"));
                    TerminalSink.notify(&n);
                }
            }
        }
    }
    Ok(())
}

/// The watch loop redraws at the cadence blocks actually arrive: the demo
/// producer interval, or the live poll interval.
fn refresh_interval(mode: Mode) -> Duration {
    match mode {
        Mode::Demo => GLOBAL_CONFIG.get_demo_interval(),
        Mode::Live => GLOBAL_CONFIG.get_poll_interval(),
    }
}

/// Live mode when an endpoint is configured, demo mode otherwise. A dead
/// endpoint degrades to demo data instead of aborting.
fn start_streaming(explorer: &mut Explorer, rpc: Option<String>) {
    match rpc.or_else(|| GLOBAL_CONFIG.get_rpc_url()) {
        Some(url) => {
            if let Err(e) = explorer.start_live(&url) {
                warn!("Could not reach {url} ({e}), falling back to demo mode");
                explorer.start_demo();
            }
        }
        None => explorer.start_demo(),
    }
}

struct TerminalSink;

impl NotificationSink for TerminalSink {
    fn notify(&mut self, notification: &Notification) {
        let tag = match notification.kind {
            NotificationKind::Success => "success",
            NotificationKind::Info => "info",
            NotificationKind::Error => "error",
        };
        println!("[{tag}] {}", notification.message);
    }
}

fn render_rail(explorer: &Explorer) {
    let now = current_timestamp().unwrap_or(0);
    println!("--- latest blocks ---");
    for block in explorer.ledger().blocks() {
        let badge = match block.get_badge_category() {
            Some(category) => format!(" [{category}]"),
            None => String::new(),
        };
        println!(
            "#{:<8} {:9} {:2} txs  {}  {}{}",
            block.get_number(),
            block.confirmation_status().to_string(),
            block.tx_count(),
            short_hex(block.get_hash()),
            format_time_ago(block.get_time(), now),
            badge
        );
    }
}

fn render_entity(explorer: &Explorer, entity: &Entity) {
    match entity {
        Entity::Block(block) => render_block(block),
        Entity::Transaction(tx) => render_transaction(tx),
        Entity::Address(address) => render_address(&explorer.address_summary(address)),
        Entity::Unknown(_) => {
            println!(
                "Invalid search. Enter a block number, transaction hash (0x...), or address (0x...)."
            );
        }
    }
}

fn render_block(block: &Block) {
    let now = current_timestamp().unwrap_or(0);
    println!("Block #{}", block.get_number());
    println!("  hash:          {}", block.get_hash());
    println!("  status:        {}", block.confirmation_status());
    println!("  confirmations: {}", block.get_confirmations());
    println!("  time:          {}", format_time_ago(block.get_time(), now));
    println!("  miner:         {}", block.get_miner().unwrap_or("Unknown"));
    println!("  gas used:      {}", block.total_gas_used());
    println!("  transactions:  {}", block.tx_count());
    for tx in block.get_transactions() {
        let to = tx.get_to().unwrap_or("(contract creation)");
        println!(
            "    {} {} -> {} {} MON [{}]",
            short_hex(tx.get_hash()),
            short_hex(tx.get_from()),
            short_hex(to),
            tx.get_value(),
            tx.get_status()
        );
    }
}

fn render_transaction(tx: &Transaction) {
    println!("Transaction {}", tx.get_hash());
    println!("  from:   {}", tx.get_from());
    println!("  to:     {}", tx.get_to().unwrap_or("(contract creation)"));
    println!("  value:  {} MON", tx.get_value());
    println!("  status: {}", tx.get_status());
    if let Some(gas_used) = tx.get_gas_used() {
        println!("  gas used: {gas_used}");
    }
    if let Some(gas_price) = tx.get_gas_price() {
        println!("  gas price: {:.2} Gwei", gas_price as f64 / 1e9);
    }
    if let Some(number) = tx.get_block_number() {
        println!("  block: #{number}");
    }
}

fn render_address(summary: &AddressSummary) {
    println!("Address {}", summary.address);
    match &summary.balance {
        Some(balance) => println!("  balance: {balance} MON"),
        None => println!("  balance: unavailable (demo mode)"),
    }
    println!("  transactions found: {}", summary.transactions.len());
    for tx in &summary.transactions {
        let to = tx.get_to().unwrap_or("(contract creation)");
        println!(
            "    {} {} -> {} {} MON",
            short_hex(tx.get_hash()),
            short_hex(tx.get_from()),
            short_hex(to),
            tx.get_value()
        );
    }
}

/// Shorten a hex string for list display ("0x12345678...abcd"). Strings from
/// an untrusted node may hold multi-byte characters, so only slice on char
/// boundaries.
fn short_hex(value: &str) -> String {
    if value.len() <= 14
        || !value.is_char_boundary(10)
        || !value.is_char_boundary(value.len() - 4)
    {
        return value.to_string();
    }
    format!("{}...{}", &value[..10], &value[value.len() - 4..])
}
