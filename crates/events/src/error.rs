//! Error types for event and payload decoding.

use thiserror::Error;

/// Errors raised while decoding a `JobEvent` log or a `Created` payload.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("payload too short: {0} byte(s)")]
    PayloadTooShort(usize),

    #[error("unexpected end of payload at offset {offset}: need {needed} byte(s), {remaining} remaining")]
    UnexpectedEnd {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    #[error("malformed event envelope: {0}")]
    Envelope(String),

    #[error("ABI decode failed: {0}")]
    Abi(#[from] alloy::sol_types::Error),

    #[error("hex decoding error: {0}")]
    Hex(#[from] alloy::hex::FromHexError),
}

impl DecodeError {
    /// Pipeline stage the error belongs to, for log context.
    pub fn stage(&self) -> &'static str {
        match self {
            DecodeError::PayloadTooShort(_) | DecodeError::UnexpectedEnd { .. } => "payload",
            DecodeError::Envelope(_) | DecodeError::Abi(_) | DecodeError::Hex(_) => "envelope",
        }
    }
}

/// Errors raised while encoding a `Created` payload.
///
/// Every variable-length field carries a single-byte length prefix, so
/// strings above 255 bytes or characters outside the byte range cannot be
/// represented.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EncodeError {
    #[error("{0} exceeds the 255-byte length prefix")]
    FieldTooLong(&'static str),

    #[error("{0} contains characters outside the byte range")]
    NonByteChar(&'static str),

    #[error("too many tags: {0}")]
    TooManyTags(usize),
}

pub type Result<T, E = DecodeError> = std::result::Result<T, E>;
