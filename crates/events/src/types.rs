//! Decoded event types.

use alloy::primitives::{Address, B256, Bytes, U256};

use crate::kinds::JobEventKind;

/// Which decoder produced an envelope.
///
/// `Raw` marks a degraded decode: the schema decoder failed and the manual
/// structural decoder succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodePath {
    Schema,
    Raw,
}

/// Decoded `JobEvent` envelope without its log context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobEnvelope {
    /// Indexed job id from `topics[1]`.
    pub job_id: U256,
    pub kind: JobEventKind,
    /// Raw `address_` field. The contract declares it `bytes`; when an
    /// account is present it occupies the trailing 20 bytes.
    pub actor: Bytes,
    /// Event-type-specific binary payload (`data_`).
    pub payload: Bytes,
    /// Contract-side event time (`timestamp_`), seconds since the epoch.
    pub timestamp: u32,
    pub decoded_via: DecodePath,
}

impl JobEnvelope {
    /// Account in the actor field: the trailing 20 bytes, when present.
    pub fn actor_address(&self) -> Option<Address> {
        (self.actor.len() >= 20)
            .then(|| Address::from_slice(&self.actor[self.actor.len() - 20..]))
    }
}

/// An envelope together with the chain context of the log that carried it.
#[derive(Debug, Clone)]
pub struct JobEvent {
    pub envelope: JobEnvelope,
    /// Transaction hash as reported by the webhook, or `"unknown"`.
    pub tx_hash: String,
    pub block_number: u64,
}

/// Job details carried in the payload of a `Created` event.
///
/// See [`crate::payload`] for the wire encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedJobDetails {
    pub title: String,
    pub content_hash: B256,
    pub multiple_applicants: bool,
    pub tags: Vec<String>,
    /// Reward token contract.
    pub token: Address,
    /// Reward amount in base units of the token.
    pub amount: U256,
    /// Maximum completion time in seconds.
    pub max_time: u32,
    pub delivery_method: String,
    pub arbitrator: Address,
    pub whitelist_workers: bool,
}
