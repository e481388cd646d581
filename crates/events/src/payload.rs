//! Binary codec for `Created` job payloads.
//!
//! The contract packs job details into a compact byte stream: fixed-width
//! fields are written raw, variable-length fields carry a single-byte length
//! prefix. Field order:
//!
//! 1. title (u8 length + bytes)
//! 2. content hash (32 bytes)
//! 3. multiple-applicants flag (u8)
//! 4. tag count (u8), then per tag u8 length + bytes
//! 5. token address (20 bytes)
//! 6. amount (32 bytes, big endian)
//! 7. max time (4 bytes, big endian)
//! 8. delivery method (u8 length + bytes)
//! 9. arbitrator address (20 bytes)
//! 10. whitelist-workers flag (u8)
//!
//! Strings are byte strings: one character per byte. Trailing bytes after
//! the last field are ignored.

use alloy::primitives::{Address, B256, U256};

use crate::error::{DecodeError, EncodeError, Result};
use crate::types::CreatedJobDetails;

/// Anything shorter cannot hold even the leading length prefixes and is
/// rejected before field decoding starts.
const MIN_PAYLOAD_LEN: usize = 5;

struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn take(&mut self, needed: usize) -> Result<&'a [u8]> {
        let remaining = self.buf.len() - self.pos;
        if needed > remaining {
            return Err(DecodeError::UnexpectedEnd {
                offset: self.pos,
                needed,
                remaining,
            });
        }
        let slice = &self.buf[self.pos..self.pos + needed];
        self.pos += needed;
        Ok(slice)
    }

    fn take_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn take_bool(&mut self) -> Result<bool> {
        Ok(self.take_u8()? != 0)
    }

    fn take_u32_be(&mut self) -> Result<u32> {
        let bytes = self.take(4)?;
        Ok(bytes.iter().fold(0u32, |v, &b| (v << 8) | u32::from(b)))
    }

    /// Length-prefixed byte string, one character per byte.
    fn take_short_string(&mut self) -> Result<String> {
        let len = self.take_u8()? as usize;
        let bytes = self.take(len)?;
        Ok(bytes.iter().map(|&b| char::from(b)).collect())
    }
}

/// Decodes the payload of a `Created` event.
///
/// Fails closed: a length prefix that points past the end of the payload
/// invalidates the whole decode.
pub fn decode_created_payload(payload: &[u8]) -> Result<CreatedJobDetails> {
    if payload.len() < MIN_PAYLOAD_LEN {
        return Err(DecodeError::PayloadTooShort(payload.len()));
    }

    let mut cursor = Cursor::new(payload);
    let title = cursor.take_short_string()?;
    let content_hash = B256::from_slice(cursor.take(32)?);
    let multiple_applicants = cursor.take_bool()?;

    let tag_count = cursor.take_u8()? as usize;
    let mut tags = Vec::with_capacity(tag_count);
    for _ in 0..tag_count {
        tags.push(cursor.take_short_string()?);
    }

    let token = Address::from_slice(cursor.take(20)?);
    let amount = U256::from_be_slice(cursor.take(32)?);
    let max_time = cursor.take_u32_be()?;
    let delivery_method = cursor.take_short_string()?;
    let arbitrator = Address::from_slice(cursor.take(20)?);
    let whitelist_workers = cursor.take_bool()?;

    Ok(CreatedJobDetails {
        title,
        content_hash,
        multiple_applicants,
        tags,
        token,
        amount,
        max_time,
        delivery_method,
        arbitrator,
        whitelist_workers,
    })
}

/// Encodes job details into the wire format decoded by
/// [`decode_created_payload`].
pub fn encode_created_payload(details: &CreatedJobDetails) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::new();
    push_short_string(&mut out, "title", &details.title)?;
    out.extend_from_slice(details.content_hash.as_slice());
    out.push(details.multiple_applicants as u8);

    let tag_count = u8::try_from(details.tags.len())
        .map_err(|_| EncodeError::TooManyTags(details.tags.len()))?;
    out.push(tag_count);
    for tag in &details.tags {
        push_short_string(&mut out, "tag", tag)?;
    }

    out.extend_from_slice(details.token.as_slice());
    out.extend_from_slice(&details.amount.to_be_bytes::<32>());
    out.extend_from_slice(&details.max_time.to_be_bytes());
    push_short_string(&mut out, "delivery method", &details.delivery_method)?;
    out.extend_from_slice(details.arbitrator.as_slice());
    out.push(details.whitelist_workers as u8);
    Ok(out)
}

fn push_short_string(
    out: &mut Vec<u8>,
    field: &'static str,
    value: &str,
) -> Result<(), EncodeError> {
    let mut bytes = Vec::with_capacity(value.len());
    for c in value.chars() {
        let code = u32::from(c);
        if code > 0xff {
            return Err(EncodeError::NonByteChar(field));
        }
        bytes.push(code as u8);
    }
    let len = u8::try_from(bytes.len()).map_err(|_| EncodeError::FieldTooLong(field))?;
    out.push(len);
    out.extend_from_slice(&bytes);
    Ok(())
}
