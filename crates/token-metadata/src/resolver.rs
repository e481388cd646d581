//! ERC-20 metadata resolution with endpoint fallback.

use std::time::Duration;

use alloy::primitives::Address;
use alloy::providers::ProviderBuilder;
use anyhow::Result;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::TokenMetadata;
use crate::erc20::IERC20;
use crate::known::known_token;

pub struct TokenResolver {
    endpoints: Vec<String>,
    call_timeout: Duration,
}

impl TokenResolver {
    pub fn new(endpoints: Vec<String>, call_timeout: Duration) -> Self {
        Self {
            endpoints,
            call_timeout,
        }
    }

    /// Resolves display metadata for a token. Never fails: unknown tokens
    /// that no endpoint can describe fall back to a truncated address with
    /// 18 decimals.
    pub async fn resolve(&self, token: Address) -> TokenMetadata {
        if let Some(metadata) = known_token(&token) {
            return metadata.clone();
        }

        match self.fetch_symbol(token).await {
            Some(symbol) => {
                let decimals = self.fetch_decimals(token).await.unwrap_or(18);
                TokenMetadata { symbol, decimals }
            }
            None => {
                warn!("No endpoint returned a symbol for {token}, using address fallback");
                TokenMetadata {
                    symbol: short_address(&token),
                    decimals: 18,
                }
            }
        }
    }

    /// First non-empty `symbol()` result across the endpoint list.
    async fn fetch_symbol(&self, token: Address) -> Option<String> {
        for endpoint in &self.endpoints {
            match self.symbol_at(endpoint, token).await {
                Ok(symbol) if !symbol.is_empty() => {
                    debug!("Resolved symbol {symbol} for {token} via {endpoint}");
                    return Some(symbol);
                }
                Ok(_) => warn!("Endpoint {endpoint} returned an empty symbol for {token}"),
                Err(e) => warn!("symbol() for {token} via {endpoint} failed: {e:#}"),
            }
        }
        None
    }

    async fn fetch_decimals(&self, token: Address) -> Option<u8> {
        for endpoint in &self.endpoints {
            match self.decimals_at(endpoint, token).await {
                Ok(decimals) => {
                    debug!("Resolved {decimals} decimals for {token} via {endpoint}");
                    return Some(decimals);
                }
                Err(e) => warn!("decimals() for {token} via {endpoint} failed: {e:#}"),
            }
        }
        None
    }

    async fn symbol_at(&self, endpoint: &str, token: Address) -> Result<String> {
        let provider = ProviderBuilder::new().connect_http(endpoint.parse()?);
        let contract = IERC20::new(token, provider);
        let symbol = timeout(self.call_timeout, contract.symbol().call()).await??;
        Ok(symbol)
    }

    async fn decimals_at(&self, endpoint: &str, token: Address) -> Result<u8> {
        let provider = ProviderBuilder::new().connect_http(endpoint.parse()?);
        let contract = IERC20::new(token, provider);
        let decimals = timeout(self.call_timeout, contract.decimals().call()).await??;
        Ok(decimals)
    }
}

/// `0xAbCd...1234` rendering of an address: checksummed, first six and last
/// four characters.
pub fn short_address(address: &Address) -> String {
    let full = address.to_checksum(None);
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
}
