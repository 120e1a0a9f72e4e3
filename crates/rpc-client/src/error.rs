use core_types::TxHash;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RpcError {
    #[error("Failed to reach the RPC endpoint: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("The RPC node returned an error ({code}): {message}")]
    Rpc { code: i64, message: String },

    #[error("Failed to deserialize the RPC response: {0}")]
    Deserialization(String),

    #[error("Invalid quantity encoding: {0}")]
    InvalidQuantity(String),

    #[error("Transaction {0} reverted on-chain")]
    Reverted(TxHash),

    #[error("Timed out after {waited_secs}s waiting for {hash} to confirm")]
    ConfirmationTimeout { hash: TxHash, waited_secs: u64 },
}
