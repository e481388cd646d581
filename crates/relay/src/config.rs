//! Service configuration.
//!
//! Read once from the environment at startup and injected into the
//! pipeline; nothing re-reads the environment after that.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use url::Url;

pub const DEFAULT_RPC_TIMEOUT_SECS: u64 = 5;

/// Public Arbitrum One endpoints used when `RPC_ENDPOINTS` is unset.
pub const DEFAULT_RPC_ENDPOINTS: [&str; 3] = [
    "https://arb1.arbitrum.io/rpc",
    "https://arbitrum-one.publicnode.com",
    "https://endpoints.omniatech.io/v1/arbitrum/one/public",
];

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub telegram_bot_token: String,
    pub telegram_chat_id: String,
    /// Ordered list tried front to back on every metadata lookup.
    pub rpc_endpoints: Vec<String>,
    pub rpc_timeout: Duration,
}

impl RelayConfig {
    /// Builds the configuration from environment variables and validates
    /// it, so a misconfigured service fails at startup rather than on the
    /// first webhook.
    ///
    /// Variables: `TELEGRAM_BOT_TOKEN`, `TELEGRAM_CHAT_ID` (both required),
    /// `RPC_ENDPOINTS` (comma separated), `RPC_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        let rpc_endpoints = match env::var("RPC_ENDPOINTS") {
            Ok(raw) => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            Err(_) => DEFAULT_RPC_ENDPOINTS.iter().map(|s| s.to_string()).collect(),
        };

        let rpc_timeout_secs: u64 = env::var("RPC_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_RPC_TIMEOUT_SECS.to_string())
            .parse()
            .context("RPC_TIMEOUT_SECS must be a number of seconds")?;

        let config = Self {
            telegram_bot_token: env::var("TELEGRAM_BOT_TOKEN").unwrap_or_default(),
            telegram_chat_id: env::var("TELEGRAM_CHAT_ID").unwrap_or_default(),
            rpc_endpoints,
            rpc_timeout: Duration::from_secs(rpc_timeout_secs),
        };
        config
            .validate()
            .map_err(|e| anyhow!("invalid configuration: {e}"))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.telegram_bot_token.is_empty() {
            return Err("TELEGRAM_BOT_TOKEN must be set".to_string());
        }
        if self.telegram_chat_id.is_empty() {
            return Err("TELEGRAM_CHAT_ID must be set".to_string());
        }
        if self.rpc_endpoints.is_empty() {
            return Err("RPC_ENDPOINTS must list at least one endpoint".to_string());
        }
        for endpoint in &self.rpc_endpoints {
            let url = Url::parse(endpoint)
                .map_err(|e| format!("invalid RPC endpoint '{endpoint}': {e}"))?;
            if url.scheme() != "http" && url.scheme() != "https" {
                return Err(format!("RPC endpoint '{endpoint}' must use http or https"));
            }
        }
        let secs = self.rpc_timeout.as_secs();
        if secs == 0 || secs > 60 {
            return Err(format!(
                "RPC timeout must be between 1 and 60 seconds, got {secs}"
            ));
        }
        Ok(())
    }
}
