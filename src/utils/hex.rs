use crate::error::{ExplorerError, Result};
use rand::RngCore;

/// Generate a `0x`-prefixed lowercase hex string of `bytes` random bytes.
///
/// Used for demo block hashes (32 bytes) and addresses (20 bytes).
pub fn random_hex(bytes: usize) -> String {
    let mut buf = vec![0u8; bytes];
    rand::thread_rng().fill_bytes(&mut buf);
    format!("0x{}", hex::encode(buf))
}

/// Parse a big-endian hex quantity as delivered by JSON-RPC (`0x1b4`).
///
/// The `0x` prefix is optional; the empty quantity is rejected.
pub fn parse_hex_u64(value: &str) -> Result<u64> {
    let digits = strip_prefix(value)?;
    u64::from_str_radix(digits, 16)
        .map_err(|e| ExplorerError::Parse(format!("invalid hex quantity {value:?}: {e}")))
}

/// Parse a big-endian hex quantity that may exceed 64 bits (wei values).
pub fn parse_hex_u128(value: &str) -> Result<u128> {
    let digits = strip_prefix(value)?;
    u128::from_str_radix(digits, 16)
        .map_err(|e| ExplorerError::Parse(format!("invalid hex quantity {value:?}: {e}")))
}

fn strip_prefix(value: &str) -> Result<&str> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    if digits.is_empty() {
        return Err(ExplorerError::Parse(format!(
            "empty hex quantity {value:?}"
        )));
    }
    Ok(digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_hex_shape() {
        let hash = random_hex(32);
        assert_eq!(hash.len(), 2 + 64);
        assert!(hash.starts_with("0x"));
        assert!(hash[2..].chars().all(|c| c.is_ascii_hexdigit()));

        let addr = random_hex(20);
        assert_eq!(addr.len(), 2 + 40);
    }

    #[test]
    fn test_parse_hex_with_and_without_prefix() {
        assert_eq!(parse_hex_u64("0x1b4").unwrap(), 436);
        assert_eq!(parse_hex_u64("1b4").unwrap(), 436);
        assert_eq!(parse_hex_u64("0x0").unwrap(), 0);
        // Odd digit counts are valid quantities
        assert_eq!(parse_hex_u64("0xf").unwrap(), 15);
    }

    #[test]
    fn test_parse_hex_rejects_garbage() {
        assert!(parse_hex_u64("0x").is_err());
        assert!(parse_hex_u64("").is_err());
        assert!(parse_hex_u64("0xzz").is_err());
        // 17 hex digits overflow u64
        assert!(parse_hex_u64("0x10000000000000000").is_err());
    }

    #[test]
    fn test_parse_hex_u128_handles_wei() {
        // 1.5 native units in wei
        assert_eq!(
            parse_hex_u128("0x14d1120d7b160000").unwrap(),
            1_500_000_000_000_000_000
        );
    }
}
