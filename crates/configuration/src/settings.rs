use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub rpc: RpcConfig,
    pub chain: ChainConfig,
    pub watcher: WatcherConfig,
}

/// Connection parameters for the wallet-backed JSON-RPC endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcConfig {
    /// The HTTP endpoint of the node that signs and submits transactions.
    pub url: String,
    /// Per-request HTTP timeout.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

/// Identifies the chain every bundle in this run must have been built for.
#[derive(Debug, Clone, Deserialize)]
pub struct ChainConfig {
    /// EIP-155 chain id (e.g. 8453 for Base).
    pub chain_id: u64,
}

/// Parameters for the confirmation watcher's polling loop.
#[derive(Debug, Clone, Deserialize)]
pub struct WatcherConfig {
    /// How often to poll for the receipt and the head block number.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// How long to wait for a confirmation before giving up. The transaction
    /// may still land on-chain after this fires.
    #[serde(default = "default_confirmation_timeout_secs")]
    pub confirmation_timeout_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_poll_interval_ms() -> u64 {
    2_000
}

fn default_confirmation_timeout_secs() -> u64 {
    180
}

impl Config {
    /// Checks the loaded settings before any transaction work begins.
    pub fn validate(&self) -> Result<(), crate::error::ConfigError> {
        if self.rpc.url.is_empty() {
            return Err(crate::error::ConfigError::ValidationError(
                "rpc.url must not be empty".to_string(),
            ));
        }
        if !self.rpc.url.starts_with("http://") && !self.rpc.url.starts_with("https://") {
            return Err(crate::error::ConfigError::ValidationError(format!(
                "rpc.url must be an http(s) endpoint, got {:?}",
                self.rpc.url
            )));
        }
        if self.chain.chain_id == 0 {
            return Err(crate::error::ConfigError::ValidationError(
                "chain.chain_id must be non-zero".to_string(),
            ));
        }
        if self.watcher.poll_interval_ms == 0 {
            return Err(crate::error::ConfigError::ValidationError(
                "watcher.poll_interval_ms must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            rpc: RpcConfig {
                url: "https://mainnet.base.org".to_string(),
                request_timeout_secs: 30,
            },
            chain: ChainConfig { chain_id: 8453 },
            watcher: WatcherConfig {
                poll_interval_ms: 2_000,
                confirmation_timeout_secs: 180,
            },
        }
    }

    #[test]
    fn validate_accepts_a_complete_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_a_zero_chain_id() {
        let mut config = valid_config();
        config.chain.chain_id = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("chain_id"));
    }

    #[test]
    fn validate_rejects_a_non_http_rpc_url() {
        let mut config = valid_config();
        config.rpc.url = "ws://mainnet.base.org".to_string();
        assert!(config.validate().is_err());
    }
}
