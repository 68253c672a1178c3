//! Helpers for decoding LEB128-encoded integers.
//!
//! Every byte carries 7 payload bits, least significant group first; the high bit is
//! set on every byte except the last. Encodings are capped at the number of bytes the
//! target width needs (`ceil(width / 7)`), so hostile input cannot grow the shift
//! without bound.
//!
//! <https://en.wikipedia.org/wiki/LEB128>
use crate::decode::ByteCursor;
use crate::error::{DecodeError, ErrorKind, VarintFault};
use std::io::Read;

fn malformed(width: u32, fault: VarintFault, offset: u64) -> DecodeError {
    DecodeError::new(ErrorKind::MalformedVarint { width, fault }, offset)
}

// Running out of input in the middle of an integer is a malformed integer, not a
// plain end of input.
fn next_byte<R: Read>(
    cursor: &mut ByteCursor<R>,
    width: u32,
    start: u64,
) -> Result<u8, DecodeError> {
    cursor.read_byte().map_err(|e| match e.kind {
        ErrorKind::UnexpectedEof { .. } => malformed(width, VarintFault::Truncated, start),
        _ => e,
    })
}

fn decode_unsigned<R: Read>(cursor: &mut ByteCursor<R>, width: u32) -> Result<u64, DecodeError> {
    let start = cursor.position();
    let max_bytes = width.div_ceil(7);

    let mut result: u64 = 0;
    let mut shift: u32 = 0;

    for i in 1..=max_bytes {
        let byte = next_byte(cursor, width, start)?;
        let payload = u64::from(byte & 0b0111_1111 /* 0x7F */);

        if i == max_bytes && payload >> (width - shift) != 0 {
            // on the last permitted byte, only width - shift payload bits are left for
            // the value; anything above them does not fit
            return Err(malformed(width, VarintFault::TooLarge, start));
        }

        result |= payload << shift;

        let continuation_bit = byte & 0b1000_0000 /* 0x80 */;
        if continuation_bit == 0 {
            return Ok(result);
        }

        // payload is encoded in groups of 7 bits. We parsed a chunk, so move to
        // the next one
        shift += 7;
    }

    Err(malformed(width, VarintFault::TooLong, start))
}

fn decode_signed<R: Read>(cursor: &mut ByteCursor<R>, width: u32) -> Result<i64, DecodeError> {
    let start = cursor.position();
    let first = next_byte(cursor, width, start)?;
    decode_signed_from(cursor, width, start, first)
}

// Decodes a signed integer whose first byte, read at `start`, has already been
// consumed.
fn decode_signed_from<R: Read>(
    cursor: &mut ByteCursor<R>,
    width: u32,
    start: u64,
    first: u8,
) -> Result<i64, DecodeError> {
    let max_bytes = width.div_ceil(7);

    let mut result: i64 = 0;
    let mut shift: u32 = 0;
    let mut byte = first;

    for i in 1..=max_bytes {
        if i > 1 {
            byte = next_byte(cursor, width, start)?;
        }
        let payload = i64::from(byte & 0b0111_1111 /* 0x7F */);
        let continuation_bit = byte & 0b1000_0000 /* 0x80 */;

        if i == max_bytes {
            if continuation_bit != 0 {
                return Err(malformed(width, VarintFault::TooLong, start));
            }

            // the sign bit and every unused bit above it must all be equal
            let used = width - shift;
            let extension = payload >> (used - 1);
            let all_ones = (1 << (8 - used)) - 1;
            if extension != 0 && extension != all_ones {
                return Err(malformed(width, VarintFault::TooLarge, start));
            }
        }

        result |= payload << shift;
        shift += 7;

        if continuation_bit == 0 {
            if shift < 64 && (byte & 0b0100_0000/* 0x40 */) != 0 {
                // fill remaining high bits with ones, to sign-extend the value
                result |= !0 << shift;
            }
            return Ok(result);
        }
    }

    Err(malformed(width, VarintFault::TooLong, start))
}

/// Decodes an unsigned 32-bit integer, in at most 5 bytes.
pub fn decode_u32<R: Read>(cursor: &mut ByteCursor<R>) -> Result<u32, DecodeError> {
    // 32 bits cannot produce a wider value
    Ok(decode_unsigned(cursor, 32)? as u32)
}

/// Decodes an unsigned 64-bit integer, in at most 10 bytes.
pub fn decode_u64<R: Read>(cursor: &mut ByteCursor<R>) -> Result<u64, DecodeError> {
    decode_unsigned(cursor, 64)
}

/// Decodes a signed 32-bit integer, in at most 5 bytes.
pub fn decode_i32<R: Read>(cursor: &mut ByteCursor<R>) -> Result<i32, DecodeError> {
    Ok(decode_signed(cursor, 32)? as i32)
}

/// Decodes a signed 33-bit integer, as used by block types.
pub fn decode_s33<R: Read>(cursor: &mut ByteCursor<R>) -> Result<i64, DecodeError> {
    decode_signed(cursor, 33)
}

/// Finishes decoding a signed 33-bit integer whose first byte, found at `start`, was
/// already read by the caller.
pub(crate) fn decode_s33_from<R: Read>(
    cursor: &mut ByteCursor<R>,
    start: u64,
    first: u8,
) -> Result<i64, DecodeError> {
    decode_signed_from(cursor, 33, start, first)
}

/// Decodes a signed 64-bit integer, in at most 10 bytes.
pub fn decode_i64<R: Read>(cursor: &mut ByteCursor<R>) -> Result<i64, DecodeError> {
    decode_signed(cursor, 64)
}
