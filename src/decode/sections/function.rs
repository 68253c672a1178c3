use crate::core::indices::TypeIdx;
use crate::decode::{ByteCursor, decode_list, decode_u32};
use crate::error::DecodeError;
use std::io::Read;

/// Decodes the type index of every function. The indices are not checked against the
/// Type section.
pub fn decode_function_section<R: Read>(
    cursor: &mut ByteCursor<R>,
) -> Result<Vec<TypeIdx>, DecodeError> {
    decode_list(cursor, |c| decode_u32(c).map(TypeIdx))
}
