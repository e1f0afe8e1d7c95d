use crate::core::{Block, Transaction};

/// Lexical classification of a raw search query.
///
/// Classification never resolves anything: a `Block`/`TxHash` result is a
/// reference that the controller turns into a full [`Entity`] via the ledger,
/// the live reader, or the synthesizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryKind {
    /// Blank input, treated by callers as "no query"
    Empty,
    /// All-decimal digits, parsed base 10
    Block(u64),
    /// Exactly `0x` + 64 hex characters, any letter case
    TxHash(String),
    /// Exactly `0x` + 40 hex characters
    Address(String),
    /// Everything else, carrying the offending input
    Unknown(String),
}

impl QueryKind {
    /// Classify a free-text query, trying the grammars in priority order.
    pub fn classify(query: &str) -> QueryKind {
        let q = query.trim();
        if q.is_empty() {
            return QueryKind::Empty;
        }

        if q.bytes().all(|b| b.is_ascii_digit()) {
            // Digit strings too large for u64 are not usable block numbers
            return match q.parse::<u64>() {
                Ok(number) => QueryKind::Block(number),
                Err(_) => QueryKind::Unknown(q.to_string()),
            };
        }

        if is_hex_of_len(q, 64) {
            return QueryKind::TxHash(q.to_string());
        }

        if is_hex_of_len(q, 40) {
            return QueryKind::Address(q.to_string());
        }

        QueryKind::Unknown(q.to_string())
    }
}

fn is_hex_of_len(q: &str, digits: usize) -> bool {
    match q.strip_prefix("0x") {
        Some(rest) => rest.len() == digits && rest.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}

/// Resolved result of a user query.
#[derive(Debug, Clone)]
pub enum Entity {
    Block(Block),
    Transaction(Transaction),
    /// Address entities carry only the address; balance and transaction
    /// enrichment happens at render time
    Address(String),
    Unknown(String),
}

impl Entity {
    pub fn is_unknown(&self) -> bool {
        matches!(self, Entity::Unknown(_))
    }
}
