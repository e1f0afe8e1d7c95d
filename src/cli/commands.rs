use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "explorer-lite")]
pub struct Opt {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(
        name = "watch",
        about = "Stream blocks to the terminal (demo data unless --rpc is given)"
    )]
    Watch {
        #[arg(long, help = "JSON-RPC endpoint of a chain node")]
        rpc: Option<String>,
        #[arg(long, help = "Stop after this many refreshes (default: run until interrupted)")]
        ticks: Option<u64>,
    },
    #[command(
        name = "search",
        about = "Look up a block number, transaction hash, or address"
    )]
    Search {
        #[arg(help = "Block number, 0x-prefixed transaction hash, or address")]
        query: String,
        #[arg(long, help = "JSON-RPC endpoint to resolve against")]
        rpc: Option<String>,
    },
    #[command(name = "click", about = "Click a block and collect points/badges")]
    Click {
        #[arg(help = "Block number to click")]
        number: u64,
    },
    #[command(name = "balance", about = "Fetch an address balance from a chain node")]
    Balance {
        #[arg(help = "The address to query")]
        address: String,
        #[arg(long, help = "JSON-RPC endpoint of a chain node")]
        rpc: String,
    },
    #[command(
        name = "connectwallet",
        about = "Probe for wallet providers and connect"
    )]
    ConnectWallet {
        #[arg(help = "Wallet to connect (metamask, coinbase, phantom, backpack)")]
        wallet: Option<crate::wallet::WalletKind>,
    },
}
