use crate::core::types::RefType;
use crate::decode::{ByteCursor, FromMarkerByte};
use crate::error::{DecodeError, ErrorKind};
use phf::phf_ordered_map;
use std::io::Read;

// Valid marker bytes for [RefType].
#[expect(non_upper_case_globals)]
static RefType_MARKERS: phf::OrderedMap<u8, RefType> = phf_ordered_map! {
    0x70u8 => RefType::Func,
    0x6Fu8 => RefType::Extern,
};

impl FromMarkerByte for RefType {
    fn markers() -> &'static phf::OrderedMap<u8, Self> {
        &RefType_MARKERS
    }

    // reference types are value types in the binary format, so an unknown one is
    // reported the same way
    fn unknown_marker(b: u8) -> ErrorKind {
        ErrorKind::InvalidValType(b)
    }
}

impl RefType {
    pub(crate) fn decode<R: Read>(cursor: &mut ByteCursor<R>) -> Result<Self, DecodeError> {
        cursor.read_marker()
    }
}
