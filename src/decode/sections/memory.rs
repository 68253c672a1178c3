use crate::core::types::MemoryLimits;
use crate::decode::{ByteCursor, decode_list};
use crate::error::DecodeError;
use std::io::Read;

pub fn decode_memory_section<R: Read>(
    cursor: &mut ByteCursor<R>,
) -> Result<Vec<MemoryLimits>, DecodeError> {
    decode_list(cursor, MemoryLimits::decode)
}
