//! Reward token metadata resolution.
//!
//! Resolution order:
//!
//! 1. Static table of well-known tokens (no network)
//! 2. ERC-20 `symbol()` / `decimals()` via `eth_call` against an ordered
//!    list of RPC endpoints, trying the next endpoint on every failure
//! 3. Truncated-address fallback with 18 decimals
//!
//! `resolve` never fails; it degrades through the steps above.

pub mod erc20;
pub mod known;
pub mod resolver;

pub use known::known_token;
pub use resolver::{TokenResolver, short_address};

/// Display metadata for a reward token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMetadata {
    pub symbol: String,
    pub decimals: u8,
}

impl TokenMetadata {
    pub fn new(symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            symbol: symbol.into(),
            decimals,
        }
    }
}
