//! Contract ABI bindings for the marketplace `JobEvent` log.

use alloy::primitives::{B256, b256};
use alloy::sol;

/// Signature topic of `JobEvent(uint256,(uint8,bytes,bytes,uint32))`.
///
/// Only logs whose `topics[0]` equals this value are processed.
pub const JOB_EVENT_TOPIC: B256 =
    b256!("2c03c6df0d03954344db45c40d4facdfa60aaf0e03186fc750db6b83c6bbd1bb");

sol! {
    /// Envelope tuple carried in the data section of every `JobEvent` log.
    ///
    /// `address_` is declared `bytes` by the contract, not `address`; display
    /// code takes the trailing 20 bytes when an account is needed.
    #[derive(Debug, PartialEq, Eq)]
    struct JobEventData {
        uint8 type_;
        bytes address_;
        bytes data_;
        uint32 timestamp_;
    }

    #[derive(Debug, PartialEq, Eq)]
    event JobEvent(uint256 indexed jobId, JobEventData eventData);
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::sol_types::SolEvent;

    #[test]
    fn test_signature_topic_matches_binding() {
        assert_eq!(JobEvent::SIGNATURE_HASH, JOB_EVENT_TOPIC);
    }

    #[test]
    fn test_signature_string() {
        assert_eq!(
            JobEvent::SIGNATURE,
            "JobEvent(uint256,(uint8,bytes,bytes,uint32))"
        );
    }
}
