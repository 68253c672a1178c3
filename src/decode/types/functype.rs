use crate::core::types::{FunctionType, ValType};
use crate::decode::ByteCursor;
use crate::decode::helpers::decode_list;
use crate::error::{DecodeError, ErrorKind};
use std::io::Read;

impl FunctionType {
    pub(crate) const MARKER_BYTE: u8 = 0x60;

    pub(crate) fn decode<R: Read>(cursor: &mut ByteCursor<R>) -> Result<Self, DecodeError> {
        let offset = cursor.position();
        let b = cursor.read_byte()?;
        if b != Self::MARKER_BYTE {
            return Err(DecodeError::new(ErrorKind::InvalidTypeMarker(b), offset));
        }

        let params = decode_list(cursor, ValType::decode)?;
        let results = decode_list(cursor, ValType::decode)?;

        Ok(FunctionType { params, results })
    }
}
