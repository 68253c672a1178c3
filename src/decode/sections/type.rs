use crate::core::types::FunctionType;
use crate::decode::{ByteCursor, decode_list};
use crate::error::DecodeError;
use std::io::Read;

pub fn decode_type_section<R: Read>(
    cursor: &mut ByteCursor<R>,
) -> Result<Vec<FunctionType>, DecodeError> {
    decode_list(cursor, FunctionType::decode)
}
