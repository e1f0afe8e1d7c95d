use crate::config::GLOBAL_CONFIG;
use crate::core::{Block, Transaction, TxStatus};
use crate::error::{ExplorerError, Result};
use crate::utils::{format_native, parse_hex_u128, parse_hex_u64};
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};

/// Standard JSON-RPC request envelope.
#[derive(Debug, Serialize)]
pub struct RpcRequest {
    jsonrpc: &'static str,
    method: String,
    params: Value,
    id: u64,
}

/// JSON-RPC response envelope; a populated `error` field means failure.
#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    result: Value,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
pub struct RpcErrorObject {
    code: i64,
    message: String,
}

/// Block as delivered by `eth_getBlockByNumber` with full transactions.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBlock {
    number: String,
    hash: String,
    timestamp: String,
    miner: Option<String>,
    #[serde(default)]
    transactions: Vec<RawTransaction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTransaction {
    hash: String,
    from: String,
    to: Option<String>,
    value: String,
    gas: Option<String>,
    gas_price: Option<String>,
    block_number: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReceipt {
    status: Option<String>,
    gas_used: Option<String>,
}

/// Blocking JSON-RPC client for a chain node.
pub struct RpcClient {
    endpoint: String,
    http: reqwest::blocking::Client,
    next_id: AtomicU64,
}

impl RpcClient {
    pub fn new(endpoint: &str) -> Result<RpcClient> {
        let http = reqwest::blocking::Client::builder()
            .timeout(GLOBAL_CONFIG.get_rpc_timeout())
            .build()?;
        Ok(RpcClient {
            endpoint: endpoint.to_string(),
            http,
            next_id: AtomicU64::new(1),
        })
    }

    /// Construct a client and validate the endpoint by fetching the latest
    /// block number.
    pub fn connect(endpoint: &str) -> Result<(RpcClient, u64)> {
        let client = RpcClient::new(endpoint)?;
        let latest = client.fetch_latest_number()?;
        info!("Connected to {endpoint}, latest block {latest}");
        Ok((client, latest))
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    fn call(&self, method: &str, params: Value) -> Result<Value> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            method: method.to_string(),
            params,
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
        };

        let response = self.http.post(&self.endpoint).json(&request).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ExplorerError::Http(format!(
                "HTTP {status} from {}",
                self.endpoint
            )));
        }

        let body: RpcResponse = serde_json::from_str(&response.text()?)?;
        if let Some(err) = body.error {
            return Err(ExplorerError::Rpc(format!(
                "{} (code {})",
                err.message, err.code
            )));
        }
        Ok(body.result)
    }

    /// `eth_blockNumber`
    pub fn fetch_latest_number(&self) -> Result<u64> {
        let result = self.call("eth_blockNumber", json!([]))?;
        let quantity = result
            .as_str()
            .ok_or_else(|| ExplorerError::Rpc("eth_blockNumber returned non-string".to_string()))?;
        parse_hex_u64(quantity)
    }

    /// `eth_getBlockByNumber` with full transaction objects.
    pub fn fetch_block_by_number(&self, number: u64) -> Result<Option<Block>> {
        let hex = format!("0x{number:x}");
        let result = self.call("eth_getBlockByNumber", json!([hex, true]))?;
        if result.is_null() {
            return Ok(None);
        }
        let raw: RawBlock = serde_json::from_value(result)?;
        Ok(Some(map_block(raw)?))
    }

    /// `eth_getTransactionByHash` merged with its receipt for status and gas.
    pub fn fetch_transaction(&self, hash: &str) -> Result<Option<Transaction>> {
        let result = self.call("eth_getTransactionByHash", json!([hash]))?;
        if result.is_null() {
            return Ok(None);
        }
        let raw: RawTransaction = serde_json::from_value(result)?;

        let receipt = self.call("eth_getTransactionReceipt", json!([hash]))?;
        let receipt: Option<RawReceipt> = if receipt.is_null() {
            None
        } else {
            Some(serde_json::from_value(receipt)?)
        };

        let status = match &receipt {
            Some(r) => match r.status.as_deref() {
                Some(s) if parse_hex_u64(s)? == 1 => TxStatus::Success,
                Some(_) => TxStatus::Failed,
                None => TxStatus::Pending,
            },
            None => TxStatus::Pending,
        };
        let gas_used = match &receipt {
            Some(r) => opt_hex_u64(r.gas_used.as_deref())?,
            None => None,
        };

        let block_number = opt_hex_u64(raw.block_number.as_deref())?;
        let tx = Transaction::new(
            raw.hash,
            raw.from,
            raw.to,
            format_native(parse_hex_u128(&raw.value)?),
            status,
        )
        .with_gas(gas_used, opt_hex_u64(raw.gas_price.as_deref())?)
        .with_block_number(block_number);
        Ok(Some(tx))
    }

    /// `eth_getBalance` at the latest block, in native units.
    pub fn fetch_balance(&self, address: &str) -> Result<String> {
        let result = self.call("eth_getBalance", json!([address, "latest"]))?;
        let quantity = result
            .as_str()
            .ok_or_else(|| ExplorerError::Rpc("eth_getBalance returned non-string".to_string()))?;
        Ok(format_native(parse_hex_u128(quantity)?))
    }
}

fn map_block(raw: RawBlock) -> Result<Block> {
    let number = parse_hex_u64(&raw.number)?;
    let time = parse_hex_u64(&raw.timestamp)? as i64 * 1000;

    let mut transactions = Vec::with_capacity(raw.transactions.len());
    for tx in raw.transactions {
        // Block-level transaction objects carry no receipt, so execution
        // status is unknown here
        let mapped = Transaction::new(
            tx.hash,
            tx.from,
            tx.to,
            format_native(parse_hex_u128(&tx.value)?),
            TxStatus::Pending,
        )
        .with_gas(
            opt_hex_u64(tx.gas.as_deref())?,
            opt_hex_u64(tx.gas_price.as_deref())?,
        )
        .with_block_number(Some(number));
        transactions.push(mapped);
    }

    Ok(Block::new(number, raw.hash, time, transactions).with_miner(raw.miner))
}

fn opt_hex_u64(value: Option<&str>) -> Result<Option<u64>> {
    match value {
        Some(v) => Ok(Some(parse_hex_u64(v)?)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn rpc_result(result: &str) -> String {
        format!(r#"{{"jsonrpc":"2.0","id":1,"result":{result}}}"#)
    }

    #[test]
    fn test_fetch_latest_number() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("POST", "/")
            .match_body(Matcher::PartialJsonString(
                r#"{"method":"eth_blockNumber"}"#.to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(rpc_result(r#""0x41a""#))
            .create();

        let client = RpcClient::new(&server.url()).unwrap();
        assert_eq!(client.fetch_latest_number().unwrap(), 0x41a);
    }

    #[test]
    fn test_connect_probe_round_trip() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("POST", "/")
            .with_status(200)
            .with_body(rpc_result(r#""0x10""#))
            .create();

        let (_, latest) = RpcClient::connect(&server.url()).unwrap();
        assert_eq!(latest, 16);
    }

    #[test]
    fn test_error_envelope_is_a_failure() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("POST", "/")
            .with_status(200)
            .with_body(r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32601,"message":"method not found"}}"#)
            .create();

        let client = RpcClient::new(&server.url()).unwrap();
        let err = client.fetch_latest_number().unwrap_err();
        assert!(matches!(err, ExplorerError::Rpc(_)), "{err:?}");
        assert!(err.to_string().contains("method not found"));
    }

    #[test]
    fn test_http_failure_is_a_failure() {
        let mut server = mockito::Server::new();
        let _m = server.mock("POST", "/").with_status(500).create();

        let client = RpcClient::new(&server.url()).unwrap();
        let err = client.fetch_latest_number().unwrap_err();
        assert!(matches!(err, ExplorerError::Http(_)), "{err:?}");
    }

    #[test]
    fn test_fetch_block_maps_hex_fields() {
        let block_json = r#"{
            "number": "0x41a",
            "hash": "0xfeed",
            "timestamp": "0x64",
            "miner": "0xbeef",
            "transactions": [{
                "hash": "0xabc1",
                "from": "0xaaa",
                "to": "0xbbb",
                "value": "0x14d1120d7b160000",
                "gas": "0x5208",
                "gasPrice": "0x3b9aca00"
            }]
        }"#;
        let mut server = mockito::Server::new();
        let _m = server
            .mock("POST", "/")
            .match_body(Matcher::PartialJsonString(
                r#"{"method":"eth_getBlockByNumber","params":["0x41a",true]}"#.to_string(),
            ))
            .with_status(200)
            .with_body(rpc_result(block_json))
            .create();

        let client = RpcClient::new(&server.url()).unwrap();
        let block = client.fetch_block_by_number(0x41a).unwrap().unwrap();
        assert_eq!(block.get_number(), 0x41a);
        assert_eq!(block.get_time(), 100_000);
        assert_eq!(block.get_miner(), Some("0xbeef"));
        assert_eq!(block.tx_count(), 1);

        let tx = &block.get_transactions()[0];
        assert_eq!(tx.get_value(), "1.500000");
        assert_eq!(tx.get_gas_used(), Some(21000));
        assert_eq!(tx.get_status(), TxStatus::Pending);
        assert_eq!(tx.get_block_number(), Some(0x41a));
    }

    #[test]
    fn test_fetch_missing_block_is_none() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("POST", "/")
            .with_status(200)
            .with_body(rpc_result("null"))
            .create();

        let client = RpcClient::new(&server.url()).unwrap();
        assert!(client.fetch_block_by_number(999).unwrap().is_none());
    }

    #[test]
    fn test_fetch_transaction_merges_receipt() {
        let tx_json = r#"{
            "hash": "0xabc1",
            "from": "0xaaa",
            "to": "0xbbb",
            "value": "0x0",
            "gasPrice": "0x3b9aca00",
            "blockNumber": "0x41a"
        }"#;
        let receipt_json = r#"{"status": "0x1", "gasUsed": "0x5208"}"#;

        let mut server = mockito::Server::new();
        let _tx = server
            .mock("POST", "/")
            .match_body(Matcher::PartialJsonString(
                r#"{"method":"eth_getTransactionByHash"}"#.to_string(),
            ))
            .with_status(200)
            .with_body(rpc_result(tx_json))
            .create();
        let _receipt = server
            .mock("POST", "/")
            .match_body(Matcher::PartialJsonString(
                r#"{"method":"eth_getTransactionReceipt"}"#.to_string(),
            ))
            .with_status(200)
            .with_body(rpc_result(receipt_json))
            .create();

        let client = RpcClient::new(&server.url()).unwrap();
        let tx = client.fetch_transaction("0xabc1").unwrap().unwrap();
        assert_eq!(tx.get_status(), TxStatus::Success);
        assert_eq!(tx.get_gas_used(), Some(21000));
        assert_eq!(tx.get_block_number(), Some(0x41a));
    }

    #[test]
    fn test_missing_receipt_means_pending() {
        let tx_json = r#"{
            "hash": "0xabc1",
            "from": "0xaaa",
            "to": null,
            "value": "0x0"
        }"#;

        let mut server = mockito::Server::new();
        let _tx = server
            .mock("POST", "/")
            .match_body(Matcher::PartialJsonString(
                r#"{"method":"eth_getTransactionByHash"}"#.to_string(),
            ))
            .with_status(200)
            .with_body(rpc_result(tx_json))
            .create();
        let _receipt = server
            .mock("POST", "/")
            .match_body(Matcher::PartialJsonString(
                r#"{"method":"eth_getTransactionReceipt"}"#.to_string(),
            ))
            .with_status(200)
            .with_body(rpc_result("null"))
            .create();

        let client = RpcClient::new(&server.url()).unwrap();
        let tx = client.fetch_transaction("0xabc1").unwrap().unwrap();
        assert_eq!(tx.get_status(), TxStatus::Pending);
        assert!(tx.is_contract_creation());
    }

    #[test]
    fn test_fetch_balance_formats_six_digits() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("POST", "/")
            .match_body(Matcher::PartialJsonString(
                r#"{"method":"eth_getBalance"}"#.to_string(),
            ))
            .with_status(200)
            .with_body(rpc_result(r#""0x14d1120d7b160000""#))
            .create();

        let client = RpcClient::new(&server.url()).unwrap();
        assert_eq!(client.fetch_balance("0xaaa").unwrap(), "1.500000");
    }
}
