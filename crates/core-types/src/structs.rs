use crate::error::CoreError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque transaction identifier returned by the broadcaster.
///
/// The executor never inspects the contents; it only hands the hash back to
/// the confirmation watcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash(pub String);

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TxHash {
    fn from(value: &str) -> Self {
        TxHash(value.to_string())
    }
}

/// The full description of one blockchain transaction as built by the
/// upstream quote step.
///
/// `value` is carried as an integer amount in the asset's smallest unit.
/// `chain_id` and `gas` describe the transaction but are *not* forwarded to
/// the broadcaster; the connected wallet determines them at signing time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDescriptor {
    /// Destination contract or account address.
    pub to: String,
    /// Native-asset amount in the smallest unit (wei).
    pub value: u128,
    /// 0x-prefixed call data.
    pub data: String,
    /// The chain this transaction was built for.
    pub chain_id: u64,
    /// Gas limit estimated by the build step.
    pub gas: u64,
}

impl TransactionDescriptor {
    /// Checks that the address and call data fields are well-formed before the
    /// descriptor is handed to a broadcaster. A malformed descriptor is a
    /// build-step bug; catching it here keeps it from reaching the wallet.
    pub fn validate(&self, field: &str) -> Result<(), CoreError> {
        if !is_hex_prefixed(&self.to) {
            return Err(CoreError::InvalidInput(
                format!("{field}.to"),
                format!("expected a 0x-prefixed address, got {:?}", self.to),
            ));
        }
        if !is_hex_prefixed(&self.data) {
            return Err(CoreError::InvalidInput(
                format!("{field}.data"),
                format!("expected 0x-prefixed call data, got {:?}", self.data),
            ));
        }
        Ok(())
    }
}

fn is_hex_prefixed(value: &str) -> bool {
    value
        .strip_prefix("0x")
        .is_some_and(|rest| rest.chars().all(|c| c.is_ascii_hexdigit()))
}

/// The immutable input to one execution run, produced by the upstream
/// quote/build step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapBundle {
    /// The swap transaction. Always present.
    pub swap_transaction: TransactionDescriptor,
    /// The allowance-granting transaction. Present only when the source asset
    /// is an ERC-20 style token that requires a prior approval; absent for
    /// native-asset swaps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approve_transaction: Option<TransactionDescriptor>,
    /// Descriptive quote metadata. Not consumed by the executor itself.
    pub quote: Quote,
    /// Descriptive fee metadata. Not consumed by the executor itself.
    pub fee: Fee,
}

/// Identity of one token involved in the swap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub address: String,
    pub chain_id: u64,
    pub decimals: u8,
    pub name: String,
    pub symbol: String,
}

/// The quote the bundle was built from. Pass-through display data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub from: TokenInfo,
    pub to: TokenInfo,
    /// Input amount in the source token's smallest unit, string-encoded.
    pub from_amount: String,
    /// Output amount in the destination token's smallest unit, string-encoded.
    pub to_amount: String,
    pub price_impact: Decimal,
    pub slippage: Decimal,
}

/// The fee taken on the swap. Pass-through display data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fee {
    pub base_asset: TokenInfo,
    pub percentage: Decimal,
    /// Fee amount in the base asset's smallest unit, string-encoded.
    pub amount: String,
}

/// The normalized input the broadcaster accepts.
///
/// The broadcaster's interface is defined over string-encoded base-10 amounts
/// rather than raw integers, so no precision is lost across the boundary.
/// Chain and gas fields are deliberately absent: the connected wallet
/// determines them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitRequest {
    pub to: String,
    /// Base-10 string form of the descriptor's integer value.
    pub value: String,
    pub data: String,
}

impl SwapBundle {
    /// Validates every descriptor the bundle carries.
    pub fn validate(&self) -> Result<(), CoreError> {
        self.swap_transaction.validate("swap_transaction")?;
        if let Some(approve) = &self.approve_transaction {
            approve.validate("approve_transaction")?;
        }
        Ok(())
    }
}

impl From<&TransactionDescriptor> for SubmitRequest {
    fn from(descriptor: &TransactionDescriptor) -> Self {
        SubmitRequest {
            to: descriptor.to.clone(),
            value: descriptor.value.to_string(),
            data: descriptor.data.clone(),
        }
    }
}

/// A request to the confirmation watcher: block until `hash` has reached
/// `confirmations` blocks of depth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchRequest {
    pub hash: TxHash,
    pub confirmations: u64,
}

/// The result of a confirmed transaction, as reported by the watcher.
///
/// The executor passes this through verbatim; only the terminal success event
/// and the caller interpret it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationReceipt {
    pub transaction_hash: TxHash,
    pub block_number: u64,
    /// Whether the transaction executed successfully on-chain.
    pub status: bool,
    pub gas_used: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_request_normalizes_value_to_decimal_string() {
        let descriptor = TransactionDescriptor {
            to: "0x456".to_string(),
            value: 0,
            data: "0x123".to_string(),
            chain_id: 8453,
            gas: 21_000,
        };

        let request = SubmitRequest::from(&descriptor);
        assert_eq!(request.to, "0x456");
        assert_eq!(request.value, "0");
        assert_eq!(request.data, "0x123");
    }

    #[test]
    fn submit_request_preserves_large_values_exactly() {
        let descriptor = TransactionDescriptor {
            to: "0x123".to_string(),
            // Larger than u64::MAX, representable in wei.
            value: 100_000_000_000_000_000_000_000,
            data: "0x".to_string(),
            chain_id: 8453,
            gas: 21_000,
        };

        let request = SubmitRequest::from(&descriptor);
        assert_eq!(request.value, "100000000000000000000000");
    }

    #[test]
    fn validate_rejects_non_hex_call_data() {
        let descriptor = TransactionDescriptor {
            to: "0x123".to_string(),
            value: 0,
            data: "not-hex".to_string(),
            chain_id: 8453,
            gas: 21_000,
        };

        let err = descriptor.validate("swap_transaction").unwrap_err();
        assert!(err.to_string().contains("swap_transaction.data"));

        // Empty call data is spelled "0x" and is valid.
        let empty = TransactionDescriptor {
            data: "0x".to_string(),
            ..descriptor
        };
        assert!(empty.validate("swap_transaction").is_ok());
    }

    #[test]
    fn bundle_round_trips_without_approve_transaction() {
        let json = r#"{
            "swapTransaction": {
                "to": "0x123",
                "value": 100000000000000,
                "data": "0x",
                "chainId": 8453,
                "gas": 210000
            },
            "quote": {
                "from": {"address": "", "chainId": 8453, "decimals": 18, "name": "ETH", "symbol": "ETH"},
                "to": {"address": "0x4ed4e862860bed51a9570b96d89af5e1b0efefed", "chainId": 8453, "decimals": 18, "name": "DEGEN", "symbol": "DEGEN"},
                "fromAmount": "100000000000000",
                "toAmount": "19395353519910973703",
                "priceImpact": "0.94",
                "slippage": "3"
            },
            "fee": {
                "baseAsset": {"address": "0x4ed4e862860bed51a9570b96d89af5e1b0efefed", "chainId": 8453, "decimals": 18, "name": "DEGEN", "symbol": "DEGEN"},
                "percentage": "1",
                "amount": "195912661817282562"
            }
        }"#;

        let bundle: SwapBundle = serde_json::from_str(json).expect("bundle should deserialize");
        assert!(bundle.approve_transaction.is_none());
        assert_eq!(bundle.swap_transaction.value, 100_000_000_000_000);

        let encoded = serde_json::to_string(&bundle).expect("bundle should serialize");
        assert!(!encoded.contains("approveTransaction"));
    }
}
