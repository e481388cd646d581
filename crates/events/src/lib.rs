//! Job marketplace event decoding
//!
//! This crate turns raw `JobEvent` logs emitted by the marketplace contract
//! into typed values:
//!
//! - ABI bindings and the signature topic for the `JobEvent` log
//! - Envelope decoding with a schema-based decoder and a raw structural
//!   fallback behind one trait
//! - The variable-length binary codec for `Created` job payloads
//!
//! Decoding is fail closed: any out-of-bounds read or malformed length
//! prefix invalidates the whole decode instead of yielding partial data.

pub mod abi;
pub mod envelope;
pub mod error;
pub mod kinds;
pub mod payload;
pub mod types;

pub use envelope::{AbiEnvelopeDecoder, EnvelopeDecode, RawEnvelopeDecoder, decode_job_event};
pub use error::{DecodeError, EncodeError, Result};
pub use kinds::JobEventKind;
pub use payload::{decode_created_payload, encode_created_payload};
pub use types::{CreatedJobDetails, DecodePath, JobEnvelope, JobEvent};
