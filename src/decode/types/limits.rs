use crate::core::types::MemoryLimits;
use crate::decode::{ByteCursor, decode_u32};
use crate::error::{DecodeError, ErrorKind};
use std::io::Read;

impl MemoryLimits {
    pub(crate) fn decode<R: Read>(cursor: &mut ByteCursor<R>) -> Result<Self, DecodeError> {
        let offset = cursor.position();
        let has_max = match cursor.read_byte()? {
            0x00 => false,
            0x01 => true,
            n => return Err(DecodeError::new(ErrorKind::InvalidLimitKind(n), offset)),
        };

        let min = decode_u32(cursor)?;
        let max = if has_max {
            Some(decode_u32(cursor)?)
        } else {
            None
        };

        Ok(MemoryLimits { min, max })
    }
}
