use crate::core::types::ValType;
use crate::decode::{ByteCursor, FromMarkerByte};
use crate::error::{DecodeError, ErrorKind};
use phf::phf_ordered_map;
use std::io::Read;

// Valid marker bytes for [ValType].
#[expect(non_upper_case_globals)]
static ValType_MARKERS: phf::OrderedMap<u8, ValType> = phf_ordered_map! {
    0x7Fu8 => ValType::I32,
    0x7Eu8 => ValType::I64,
    0x7Du8 => ValType::F32,
    0x7Cu8 => ValType::F64,
};

impl FromMarkerByte for ValType {
    fn markers() -> &'static phf::OrderedMap<u8, Self> {
        &ValType_MARKERS
    }

    fn unknown_marker(b: u8) -> ErrorKind {
        ErrorKind::InvalidValType(b)
    }
}

impl ValType {
    pub(crate) fn decode<R: Read>(cursor: &mut ByteCursor<R>) -> Result<Self, DecodeError> {
        cursor.read_marker()
    }
}
