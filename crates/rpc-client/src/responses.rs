use crate::error::RpcError;
use crate::quantity::parse_hex_quantity;
use core_types::{ConfirmationReceipt, TxHash};
use serde::Deserialize;

// Using `#[serde(rename_all = "camelCase")]` to automatically map from the
// JSON-RPC camelCase fields to Rust snake_case.

/// The JSON-RPC 2.0 response envelope.
///
/// `result` stays an untyped value here: `eth_getTransactionReceipt` answers
/// with a literal `null` while the transaction is pending, and that null must
/// reach the caller's `Option` instead of being mistaken for a missing field.
#[derive(Debug, Deserialize)]
pub struct RpcEnvelope {
    #[serde(default)]
    pub result: serde_json::Value,
    pub error: Option<RpcErrorObject>,
}

/// The error object an RPC node returns in place of a result.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

/// A transaction receipt as the node encodes it: every quantity is a
/// 0x-prefixed hex string.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReceipt {
    pub transaction_hash: String,
    pub block_number: String,
    /// "0x1" for success, "0x0" for a revert.
    pub status: Option<String>,
    pub gas_used: Option<String>,
    // The node returns more fields, but these are the ones we consume.
}

impl RawReceipt {
    /// Converts the wire encoding into the core receipt type.
    pub fn into_receipt(self) -> Result<ConfirmationReceipt, RpcError> {
        let status = match self.status.as_deref() {
            Some(s) => parse_hex_quantity(s)? == 1,
            // Pre-Byzantium receipts omit the field; treat as success.
            None => true,
        };
        Ok(ConfirmationReceipt {
            transaction_hash: TxHash(self.transaction_hash),
            block_number: parse_hex_quantity(&self.block_number)?,
            status,
            gas_used: self.gas_used.as_deref().map(parse_hex_quantity).transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_receipt_converts_hex_fields() {
        let raw = RawReceipt {
            transaction_hash: "0xabc".to_string(),
            block_number: "0x10".to_string(),
            status: Some("0x1".to_string()),
            gas_used: Some("0x5208".to_string()),
        };

        let receipt = raw.into_receipt().unwrap();
        assert_eq!(receipt.transaction_hash, TxHash::from("0xabc"));
        assert_eq!(receipt.block_number, 16);
        assert!(receipt.status);
        assert_eq!(receipt.gas_used, Some(21_000));
    }

    #[test]
    fn a_null_result_is_a_pending_receipt_not_an_error() {
        let envelope: RpcEnvelope =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":1,"result":null}"#).unwrap();
        assert!(envelope.error.is_none());

        let receipt: Option<RawReceipt> = serde_json::from_value(envelope.result).unwrap();
        assert!(receipt.is_none());
    }

    #[test]
    fn an_error_object_is_surfaced() {
        let envelope: RpcEnvelope = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000,"message":"insufficient funds"}}"#,
        )
        .unwrap();
        let error = envelope.error.unwrap();
        assert_eq!(error.code, -32000);
        assert_eq!(error.message, "insufficient funds");
    }

    #[test]
    fn reverted_status_maps_to_false() {
        let raw = RawReceipt {
            transaction_hash: "0xabc".to_string(),
            block_number: "0x10".to_string(),
            status: Some("0x0".to_string()),
            gas_used: None,
        };
        assert!(!raw.into_receipt().unwrap().status);
    }
}
