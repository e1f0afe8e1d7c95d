//! Demo data synthesis
//!
//! Generates pseudo-random blocks for demo mode and as the always-succeeds
//! fallback behind every query, so a search never comes back empty-handed.

use crate::core::{BadgeCategory, Block, Transaction, TxStatus};
use crate::utils::{current_timestamp, random_hex};
use rand::Rng;

/// Chance that a generated block carries a badge category.
const SPECIAL_BLOCK_PROBABILITY: f64 = 0.15;
/// Chance that an ordinary transaction is a contract creation.
const CONTRACT_CREATION_BASE_RATE: f64 = 0.02;
/// Whale transactions draw from [2.1, 4.1), always above the 2.0 threshold.
const WHALE_VALUE_MIN: f64 = 2.1;
const WHALE_VALUE_MAX: f64 = 4.1;
/// Ordinary transactions draw from [0, 1.2).
const ORDINARY_VALUE_MAX: f64 = 1.2;

/// Generate a pseudo-random block for the given number.
///
/// The badge category is drawn once and used for both the transaction shape
/// and the stored tag, so a tagged block always looks like its tag.
pub fn synthesize(number: u64) -> Block {
    let mut rng = rand::thread_rng();
    let category = if rng.gen_bool(SPECIAL_BLOCK_PROBABILITY) {
        Some(BadgeCategory::ALL[rng.gen_range(0..BadgeCategory::ALL.len())])
    } else {
        None
    };
    synthesize_with_category(number, category)
}

/// Generate a block with a forced badge category (or none).
pub fn synthesize_with_category(number: u64, category: Option<BadgeCategory>) -> Block {
    let mut rng = rand::thread_rng();

    let transactions = match category {
        Some(BadgeCategory::ContractCreator) => {
            let count = rng.gen_range(2..=3);
            (0..count)
                .map(|_| {
                    let to = if rng.gen_bool(0.5) {
                        None
                    } else {
                        Some(random_hex(20))
                    };
                    demo_transaction(&mut rng, to, 0.0, ORDINARY_VALUE_MAX)
                })
                .collect()
        }
        Some(BadgeCategory::Whale) => {
            let count = rng.gen_range(1..=2);
            (0..count)
                .map(|_| {
                    demo_transaction(&mut rng, Some(random_hex(20)), WHALE_VALUE_MIN, WHALE_VALUE_MAX)
                })
                .collect()
        }
        Some(BadgeCategory::RapidFire) => {
            let count = rng.gen_range(4..=6);
            (0..count)
                .map(|_| {
                    demo_transaction(&mut rng, Some(random_hex(20)), 0.0, ORDINARY_VALUE_MAX)
                })
                .collect()
        }
        None => {
            let count = rng.gen_range(1..=3);
            (0..count)
                .map(|_| {
                    let to = if rng.gen_bool(CONTRACT_CREATION_BASE_RATE) {
                        None
                    } else {
                        Some(random_hex(20))
                    };
                    demo_transaction(&mut rng, to, 0.0, ORDINARY_VALUE_MAX)
                })
                .collect()
        }
    };

    let time = current_timestamp().unwrap_or(0);
    let block = Block::new(number, random_hex(32), time, transactions);
    match category {
        Some(c) => block.with_badge(c),
        None => block,
    }
}

/// Fallback transaction for an unresolved hash query: the hash is preserved,
/// everything else is synthetic.
pub fn synthesize_transaction(hash: &str) -> Transaction {
    let mut rng = rand::thread_rng();
    let value = rng.gen_range(0.0..2.0);
    Transaction::new(
        hash.to_string(),
        random_hex(20),
        Some(random_hex(20)),
        format!("{value:.3}"),
        TxStatus::Success,
    )
}

fn demo_transaction<R: Rng>(rng: &mut R, to: Option<String>, min: f64, max: f64) -> Transaction {
    let value = rng.gen_range(min..max);
    Transaction::new(
        random_hex(32),
        random_hex(20),
        to,
        format!("{value:.3}"),
        TxStatus::Success,
    )
}
