use crate::core::{Section, SectionId};
use crate::decode::ByteCursor;
use crate::error::{DecodeError, ErrorKind};
use std::io::Read;

/// Rejects the Import section.
///
/// Imports shift every function and memory index space, so decoding the rest of a
/// module that has them would yield misleading indices. The section is recognized
/// so that it fails loudly instead of being misread.
pub fn decode_import_section<R: Read>(cursor: &mut ByteCursor<R>) -> Result<Section, DecodeError> {
    Err(cursor.error(ErrorKind::UnsupportedSection(SectionId::Import)))
}
