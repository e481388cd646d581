//! `JobEvent` envelope decoding.
//!
//! Two interchangeable decoders sit behind [`EnvelopeDecode`]:
//!
//! - [`AbiEnvelopeDecoder`] uses the generated ABI bindings and is the
//!   single source of truth for the event type.
//! - [`RawEnvelopeDecoder`] walks the ABI words by hand with strict bounds
//!   and range checks. It exists as a backstop for logs the schema decoder
//!   rejects and for cross-checking the bindings in tests.
//!
//! [`decode_job_event`] tries the schema decoder first and only falls back
//! to the raw decoder after logging the schema failure; the resulting
//! envelope is tagged with its [`DecodePath`] so degraded decodes stay
//! visible downstream.

use alloy::primitives::{B256, Bytes, U256};
use alloy::sol_types::SolEvent;
use tracing::warn;

use crate::abi::{JOB_EVENT_TOPIC, JobEvent as JobEventAbi};
use crate::error::{DecodeError, Result};
use crate::kinds::JobEventKind;
use crate::types::{DecodePath, JobEnvelope};

pub trait EnvelopeDecode {
    fn decode_envelope(&self, topics: &[B256], data: &[u8]) -> Result<JobEnvelope>;
}

/// Schema-based decoder over the `sol!` bindings.
pub struct AbiEnvelopeDecoder;

impl EnvelopeDecode for AbiEnvelopeDecoder {
    fn decode_envelope(&self, topics: &[B256], data: &[u8]) -> Result<JobEnvelope> {
        let decoded = JobEventAbi::decode_raw_log(topics.iter().copied(), data)?;
        Ok(JobEnvelope {
            job_id: decoded.jobId,
            kind: JobEventKind::from(decoded.eventData.type_),
            actor: decoded.eventData.address_,
            payload: decoded.eventData.data_,
            timestamp: decoded.eventData.timestamp_,
            decoded_via: DecodePath::Schema,
        })
    }
}

/// Manual decoder over the raw ABI words.
///
/// Offsets are derived from the encoded tuple head, never guessed. Every
/// word read is bounds checked and integer words are range checked, so a
/// malformed log fails the decode instead of producing garbage.
pub struct RawEnvelopeDecoder;

impl EnvelopeDecode for RawEnvelopeDecoder {
    fn decode_envelope(&self, topics: &[B256], data: &[u8]) -> Result<JobEnvelope> {
        if topics.len() != 2 {
            return Err(DecodeError::Envelope(format!(
                "expected 2 topics, got {}",
                topics.len()
            )));
        }
        if topics[0] != JOB_EVENT_TOPIC {
            return Err(DecodeError::Envelope(
                "signature topic mismatch".to_string(),
            ));
        }
        let job_id = U256::from_be_bytes(topics[1].0);

        // data = offset word, then the tuple: type_ word, two tail offsets,
        // timestamp_ word, then the bytes tails.
        let tuple_base = read_offset_word(data, 0)?;
        let kind = JobEventKind::from(read_u8_word(data, tuple_base)?);
        let actor = read_bytes_tail(data, tuple_base, 32)?;
        let payload = read_bytes_tail(data, tuple_base, 64)?;
        let timestamp_slot = tuple_base.checked_add(96).ok_or_else(offset_overflow)?;
        let timestamp = read_u32_word(data, timestamp_slot)?;

        Ok(JobEnvelope {
            job_id,
            kind,
            actor: Bytes::copy_from_slice(actor),
            payload: Bytes::copy_from_slice(payload),
            timestamp,
            decoded_via: DecodePath::Raw,
        })
    }
}

/// Decodes a log with the schema decoder, falling back to the raw decoder
/// when the schema decode fails. The fallback envelope keeps
/// `DecodePath::Raw` so callers can flag the degraded path.
pub fn decode_job_event(topics: &[B256], data: &[u8]) -> Result<JobEnvelope> {
    match AbiEnvelopeDecoder.decode_envelope(topics, data) {
        Ok(envelope) => Ok(envelope),
        Err(schema_err) => {
            warn!("Schema envelope decode failed ({schema_err}), retrying with raw decoder");
            RawEnvelopeDecoder.decode_envelope(topics, data)
        }
    }
}

fn offset_overflow() -> DecodeError {
    DecodeError::Envelope("offset arithmetic overflow".to_string())
}

fn read_word(data: &[u8], offset: usize) -> Result<&[u8]> {
    let end = offset.checked_add(32).ok_or_else(offset_overflow)?;
    data.get(offset..end).ok_or_else(|| {
        DecodeError::Envelope(format!(
            "word read past end of data at offset {offset} (data is {} bytes)",
            data.len()
        ))
    })
}

/// Word whose value must fit in the platform word size: offsets and lengths.
fn read_offset_word(data: &[u8], offset: usize) -> Result<usize> {
    let word = read_word(data, offset)?;
    if word[..24].iter().any(|&b| b != 0) {
        return Err(DecodeError::Envelope(format!(
            "oversized offset word at {offset}"
        )));
    }
    let value = word[24..].iter().fold(0u64, |v, &b| (v << 8) | u64::from(b));
    usize::try_from(value).map_err(|_| offset_overflow())
}

fn read_u8_word(data: &[u8], offset: usize) -> Result<u8> {
    let word = read_word(data, offset)?;
    if word[..31].iter().any(|&b| b != 0) {
        return Err(DecodeError::Envelope(format!(
            "uint8 word out of range at {offset}"
        )));
    }
    Ok(word[31])
}

fn read_u32_word(data: &[u8], offset: usize) -> Result<u32> {
    let word = read_word(data, offset)?;
    if word[..28].iter().any(|&b| b != 0) {
        return Err(DecodeError::Envelope(format!(
            "uint32 word out of range at {offset}"
        )));
    }
    Ok(word[28..].iter().fold(0u32, |v, &b| (v << 8) | u32::from(b)))
}

/// Dynamic `bytes` field: head slot holds an offset relative to the tuple
/// start, the tail holds a length word followed by the content.
fn read_bytes_tail<'a>(data: &'a [u8], tuple_base: usize, head_slot: usize) -> Result<&'a [u8]> {
    let head = tuple_base.checked_add(head_slot).ok_or_else(offset_overflow)?;
    let relative = read_offset_word(data, head)?;
    let tail = tuple_base.checked_add(relative).ok_or_else(offset_overflow)?;
    let len = read_offset_word(data, tail)?;
    let start = tail.checked_add(32).ok_or_else(offset_overflow)?;
    let end = start.checked_add(len).ok_or_else(offset_overflow)?;
    data.get(start..end).ok_or_else(|| {
        DecodeError::Envelope(format!(
            "bytes field of {len} byte(s) at offset {start} overruns data ({} bytes)",
            data.len()
        ))
    })
}
