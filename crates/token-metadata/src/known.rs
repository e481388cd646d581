//! Static table of well-known reward tokens.

use std::collections::HashMap;

use alloy::primitives::{Address, address};
use once_cell::sync::Lazy;

use crate::TokenMetadata;

/// Tokens the marketplace commonly pays in (Arbitrum One addresses).
/// Keyed by `Address`, so lookups are case-insensitive by construction.
static KNOWN_TOKENS: Lazy<HashMap<Address, TokenMetadata>> = Lazy::new(|| {
    HashMap::from([
        (
            address!("0000000000000000000000000000000000000000"),
            TokenMetadata::new("ETH", 18),
        ),
        (
            address!("82af49447d8a07e3bd95bd0d56f35241523fbab1"),
            TokenMetadata::new("WETH", 18),
        ),
        (
            address!("af88d065e77c8cc2239327c5edb3a432268e5831"),
            TokenMetadata::new("USDC", 6),
        ),
        (
            address!("fd086bc7cd5c481dcc9c85ebe478a1c0b69fcbb9"),
            TokenMetadata::new("USDT", 6),
        ),
        (
            address!("ff970a61a04b1ca14834a43f5de4533ebddb5cc8"),
            TokenMetadata::new("USDC.e", 6),
        ),
        (
            address!("2f2a2543b76a4166549f7aab2e75bef0aefc5b0f"),
            TokenMetadata::new("WBTC", 8),
        ),
    ])
});

pub fn known_token(token: &Address) -> Option<&'static TokenMetadata> {
    KNOWN_TOKENS.get(token)
}
