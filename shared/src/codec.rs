//! Fixed-size codec for the connectionless beacon link
//!
//! Payloads carry no length prefix or version tag; the size is implicit
//! from the schema's struct layout:
//! ```text
//! [ 4 bytes: source id (i32, little-endian) ]
//! [ 4 bytes: temperature (f32, little-endian) ]
//! [ 4 bytes: humidity (f32, little-endian) ]
//! [ 20 bytes: NUL-padded timestamp ]          (Timestamped schema only)
//! ```
//!
//! Field order and widths must match exactly on both ends of the link.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use thiserror::Error;

use crate::{PayloadSchema, Reading, TIMESTAMP_MAX_CHARS, TIMESTAMP_WIRE_LEN};

/// Errors that can occur while decoding a received payload
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Payload size mismatch: got {got} bytes, schema expects {expected}")]
    SizeMismatch { got: usize, expected: usize },

    #[error("Source id {0} out of range")]
    InvalidSourceId(i32),

    #[error("Timestamp field is not NUL-terminated")]
    UnterminatedTimestamp,

    #[error("Timestamp field is not valid UTF-8")]
    InvalidTimestamp,
}

/// Encode a reading into a freshly allocated payload
pub fn encode(reading: &Reading, schema: PayloadSchema) -> Bytes {
    let mut buf = BytesMut::with_capacity(schema.wire_size());
    encode_into(reading, schema, &mut buf);
    buf.freeze()
}

/// Encode a reading into a provided buffer
///
/// Appends exactly `schema.wire_size()` bytes. Timestamps longer than the
/// fixed field are truncated to [`TIMESTAMP_MAX_CHARS`] bytes.
pub fn encode_into(reading: &Reading, schema: PayloadSchema, buf: &mut BytesMut) {
    buf.reserve(schema.wire_size());

    buf.put_i32_le(reading.source_id as i32);
    buf.put_f32_le(reading.temperature);
    buf.put_f32_le(reading.humidity);

    if schema == PayloadSchema::Timestamped {
        let raw = reading.captured_at.as_bytes();
        let visible = raw.len().min(TIMESTAMP_MAX_CHARS);
        buf.put_slice(&raw[..visible]);
        // Pad to the fixed field width; at least one NUL terminator
        buf.put_bytes(0, TIMESTAMP_WIRE_LEN - visible);
    }
}

/// Decode one received payload
///
/// The payload must be exactly `schema.wire_size()` bytes; datagrams are
/// never fragmented or coalesced on this link, so a size mismatch means the
/// sender used a different schema.
pub fn decode(payload: &[u8], schema: PayloadSchema) -> Result<Reading, CodecError> {
    let expected = schema.wire_size();
    if payload.len() != expected {
        return Err(CodecError::SizeMismatch {
            got: payload.len(),
            expected,
        });
    }

    let mut buf = payload;

    let raw_id = buf.get_i32_le();
    if !(1..=i32::from(u8::MAX)).contains(&raw_id) {
        return Err(CodecError::InvalidSourceId(raw_id));
    }

    let temperature = buf.get_f32_le();
    let humidity = buf.get_f32_le();

    let captured_at = match schema {
        PayloadSchema::Compact => String::new(),
        PayloadSchema::Timestamped => {
            let field = &buf[..TIMESTAMP_WIRE_LEN];
            let visible = field
                .iter()
                .position(|&b| b == 0)
                .ok_or(CodecError::UnterminatedTimestamp)?;
            std::str::from_utf8(&field[..visible])
                .map_err(|_| CodecError::InvalidTimestamp)?
                .to_string()
        }
    };

    Ok(Reading {
        source_id: raw_id as u8,
        temperature,
        humidity,
        captured_at,
    })
}
