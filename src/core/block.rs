use serde::{Deserialize, Serialize};
use std::fmt;

/// Confirmation depth at which a block is presented as final.
pub const CONFIRMED_DEPTH: u64 = 6;

/// Category tag attached to specially-generated blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BadgeCategory {
    ContractCreator,
    Whale,
    RapidFire,
}

impl BadgeCategory {
    pub const ALL: [BadgeCategory; 3] = [
        BadgeCategory::ContractCreator,
        BadgeCategory::Whale,
        BadgeCategory::RapidFire,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BadgeCategory::ContractCreator => "Contract Creator",
            BadgeCategory::Whale => "Whale Watcher",
            BadgeCategory::RapidFire => "Rapid Fire",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            BadgeCategory::ContractCreator => "Witnessed contract deployment",
            BadgeCategory::Whale => "Spotted large transaction (>2.0 MON)",
            BadgeCategory::RapidFire => "Found busy block (4+ transactions)",
        }
    }
}

impl fmt::Display for BadgeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BadgeCategory::ContractCreator => write!(f, "contract-creator"),
            BadgeCategory::Whale => write!(f, "whale"),
            BadgeCategory::RapidFire => write!(f, "rapid-fire"),
        }
    }
}

/// Execution status of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    Success,
    Failed,
    Pending,
}

impl fmt::Display for TxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxStatus::Success => write!(f, "success"),
            TxStatus::Failed => write!(f, "failed"),
            TxStatus::Pending => write!(f, "pending"),
        }
    }
}

/// Presentation band derived from confirmation depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationStatus {
    Confirmed,
    Pending,
    New,
}

impl ConfirmationStatus {
    pub fn from_depth(confirmations: u64) -> ConfirmationStatus {
        if confirmations >= CONFIRMED_DEPTH {
            ConfirmationStatus::Confirmed
        } else if confirmations >= 1 {
            ConfirmationStatus::Pending
        } else {
            ConfirmationStatus::New
        }
    }
}

impl fmt::Display for ConfirmationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfirmationStatus::Confirmed => write!(f, "Confirmed"),
            ConfirmationStatus::Pending => write!(f, "Pending"),
            ConfirmationStatus::New => write!(f, "New"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    hash: String,
    from: String,
    /// None means contract creation
    to: Option<String>,
    /// Decimal string in native units
    value: String,
    status: TxStatus,
    gas_used: Option<u64>,
    gas_price: Option<u64>,
    block_number: Option<u64>,
}

impl Transaction {
    pub fn new(
        hash: String,
        from: String,
        to: Option<String>,
        value: String,
        status: TxStatus,
    ) -> Transaction {
        Transaction {
            hash,
            from,
            to,
            value,
            status,
            gas_used: None,
            gas_price: None,
            block_number: None,
        }
    }

    pub fn with_gas(mut self, gas_used: Option<u64>, gas_price: Option<u64>) -> Transaction {
        self.gas_used = gas_used;
        self.gas_price = gas_price;
        self
    }

    pub fn with_block_number(mut self, block_number: Option<u64>) -> Transaction {
        self.block_number = block_number;
        self
    }

    pub fn get_hash(&self) -> &str {
        self.hash.as_str()
    }

    pub fn get_from(&self) -> &str {
        self.from.as_str()
    }

    pub fn get_to(&self) -> Option<&str> {
        self.to.as_deref()
    }

    pub fn get_value(&self) -> &str {
        self.value.as_str()
    }

    pub fn get_status(&self) -> TxStatus {
        self.status
    }

    pub fn get_gas_used(&self) -> Option<u64> {
        self.gas_used
    }

    pub fn get_gas_price(&self) -> Option<u64> {
        self.gas_price
    }

    pub fn get_block_number(&self) -> Option<u64> {
        self.block_number
    }

    pub fn is_contract_creation(&self) -> bool {
        self.to.is_none()
    }

    /// Value as a float for threshold checks; malformed values count as zero.
    pub fn value_as_f64(&self) -> f64 {
        self.value.parse().unwrap_or(0.0)
    }

    /// Case-insensitive match against the from or to address.
    pub fn involves_address(&self, address: &str) -> bool {
        self.from.eq_ignore_ascii_case(address)
            || self
                .to
                .as_deref()
                .is_some_and(|to| to.eq_ignore_ascii_case(address))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    number: u64,
    hash: String,
    /// Epoch millis
    time: i64,
    transactions: Vec<Transaction>,
    confirmations: u64,
    badge_category: Option<BadgeCategory>,
    miner: Option<String>,
}

impl Block {
    pub fn new(number: u64, hash: String, time: i64, transactions: Vec<Transaction>) -> Block {
        Block {
            number,
            hash,
            time,
            transactions,
            confirmations: 0,
            badge_category: None,
            miner: None,
        }
    }

    pub fn with_badge(mut self, category: BadgeCategory) -> Block {
        self.badge_category = Some(category);
        self
    }

    pub fn with_miner(mut self, miner: Option<String>) -> Block {
        self.miner = miner;
        self
    }

    pub fn get_number(&self) -> u64 {
        self.number
    }

    pub fn get_hash(&self) -> &str {
        self.hash.as_str()
    }

    pub fn get_time(&self) -> i64 {
        self.time
    }

    pub fn get_transactions(&self) -> &[Transaction] {
        self.transactions.as_slice()
    }

    pub fn get_confirmations(&self) -> u64 {
        self.confirmations
    }

    pub(crate) fn set_confirmations(&mut self, confirmations: u64) {
        self.confirmations = confirmations;
    }

    pub fn get_badge_category(&self) -> Option<BadgeCategory> {
        self.badge_category
    }

    pub fn get_miner(&self) -> Option<&str> {
        self.miner.as_deref()
    }

    pub fn tx_count(&self) -> usize {
        self.transactions.len()
    }

    /// Largest transaction value in the block, zero when empty.
    pub fn max_transaction_value(&self) -> f64 {
        self.transactions
            .iter()
            .map(|tx| tx.value_as_f64())
            .fold(0.0, f64::max)
    }

    pub fn total_gas_used(&self) -> u64 {
        self.transactions
            .iter()
            .filter_map(|tx| tx.get_gas_used())
            .sum()
    }

    pub fn confirmation_status(&self) -> ConfirmationStatus {
        ConfirmationStatus::from_depth(self.confirmations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(value: &str) -> Transaction {
        Transaction::new(
            "0xaa".to_string(),
            "0xfrom".to_string(),
            Some("0xto".to_string()),
            value.to_string(),
            TxStatus::Success,
        )
    }

    #[test]
    fn test_confirmation_bands() {
        assert_eq!(ConfirmationStatus::from_depth(0), ConfirmationStatus::New);
        assert_eq!(
            ConfirmationStatus::from_depth(1),
            ConfirmationStatus::Pending
        );
        assert_eq!(
            ConfirmationStatus::from_depth(5),
            ConfirmationStatus::Pending
        );
        assert_eq!(
            ConfirmationStatus::from_depth(6),
            ConfirmationStatus::Confirmed
        );
        assert_eq!(
            ConfirmationStatus::from_depth(100),
            ConfirmationStatus::Confirmed
        );
    }

    #[test]
    fn test_max_transaction_value() {
        let block = Block::new(
            1,
            "0xabc".to_string(),
            0,
            vec![tx("0.250"), tx("2.100"), tx("1.999")],
        );
        assert!((block.max_transaction_value() - 2.1).abs() < f64::EPSILON);

        let empty = Block::new(2, "0xdef".to_string(), 0, vec![]);
        assert_eq!(empty.max_transaction_value(), 0.0);
    }

    #[test]
    fn test_involves_address_is_case_insensitive() {
        let tx = Transaction::new(
            "0xaa".to_string(),
            "0xAbCd".to_string(),
            Some("0x1234".to_string()),
            "1.000".to_string(),
            TxStatus::Success,
        );
        assert!(tx.involves_address("0xabcd"));
        assert!(tx.involves_address("0x1234"));
        assert!(!tx.involves_address("0xffff"));
    }

    #[test]
    fn test_contract_creation_has_no_recipient() {
        let tx = Transaction::new(
            "0xaa".to_string(),
            "0xfrom".to_string(),
            None,
            "0.100".to_string(),
            TxStatus::Success,
        );
        assert!(tx.is_contract_creation());
    }

    #[test]
    fn test_badge_category_wire_names() {
        assert_eq!(BadgeCategory::ContractCreator.to_string(), "contract-creator");
        assert_eq!(BadgeCategory::Whale.to_string(), "whale");
        assert_eq!(BadgeCategory::RapidFire.to_string(), "rapid-fire");
        let json = serde_json::to_string(&BadgeCategory::RapidFire).unwrap();
        assert_eq!(json, "\"rapid-fire\"");
    }
}
