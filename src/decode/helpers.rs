use crate::decode::{ByteCursor, decode_u32};
use crate::error::{DecodeError, ErrorKind};
use std::io::Read;

/// Decodes a count-prefixed list: a u32 item count, followed by exactly that many
/// items, each decoded with `decode_item`.
///
/// This is the shape of every section payload and of most vectors inside them.
pub fn decode_list<R, F, T>(
    cursor: &mut ByteCursor<R>,
    mut decode_item: F,
) -> Result<Vec<T>, DecodeError>
where
    R: Read,
    F: FnMut(&mut ByteCursor<R>) -> Result<T, DecodeError>,
{
    let len = decode_u32(cursor)?;

    // every item takes at least one byte, so a count larger than what is left
    // will fail anyway; don't reserve memory for it
    let capacity = u64::from(len).min(cursor.remaining());
    let mut items = Vec::with_capacity(capacity as usize);
    for _ in 0..len {
        items.push(decode_item(cursor)?);
    }

    Ok(items)
}

pub(crate) fn decode_byte_vector<R: Read>(
    cursor: &mut ByteCursor<R>,
) -> Result<Vec<u8>, DecodeError> {
    let len = decode_u32(cursor)?;
    cursor.read(len as usize)
}

/// Decodes a name: a byte vector holding UTF-8 text.
///
/// <https://www.w3.org/TR/wasm-core-2/#binary-name>
pub fn decode_name<R: Read>(cursor: &mut ByteCursor<R>) -> Result<String, DecodeError> {
    let offset = cursor.position();
    let bytes = decode_byte_vector(cursor)?;
    String::from_utf8(bytes).map_err(|e| DecodeError::new(ErrorKind::InvalidName(e), offset))
}
