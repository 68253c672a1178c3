use crate::core::CodeBody;
use crate::decode::{ByteCursor, decode_code_body, decode_list, decode_u32};
use crate::error::DecodeError;
use log::trace;
use std::io::Read;

pub fn decode_code_section<R: Read>(
    cursor: &mut ByteCursor<R>,
) -> Result<Vec<CodeBody>, DecodeError> {
    let mut index = 0u32;
    decode_list(cursor, |c| {
        let size = decode_u32(c)?;
        let offset = c.position();
        let code = decode_code_body(c, size)?;

        trace!(
            "code body {index}: {size} bytes at {offset:#x}, {} local slots, {} instructions",
            code.local_count(),
            code.body.len()
        );
        index += 1;
        Ok(code)
    })
}
