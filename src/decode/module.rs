use crate::core::{Module, Section, SectionHeader, SectionId};
use crate::decode::sections::*;
use crate::decode::{ByteCursor, FromMarkerByte, decode_u32};
use crate::error::{DecodeError, ErrorKind};
use log::debug;
use phf::phf_ordered_map;
use std::io::{self, Read, Seek};

pub(crate) const MAGIC_NUMBER: [u8; 4] = [0x00, 0x61, 0x73, 0x6D];
pub(crate) const VERSION: [u8; 4] = [0x01, 0x00, 0x00, 0x00];

// Valid marker bytes for [SectionId].
#[expect(non_upper_case_globals)]
static SectionId_MARKERS: phf::OrderedMap<u8, SectionId> = phf_ordered_map! {
    0u8 => SectionId::Custom,
    1u8 => SectionId::Type,
    2u8 => SectionId::Import,
    3u8 => SectionId::Function,
    4u8 => SectionId::Table,
    5u8 => SectionId::Memory,
    6u8 => SectionId::Global,
    7u8 => SectionId::Export,
    8u8 => SectionId::Start,
    9u8 => SectionId::Element,
    10u8 => SectionId::Code,
    11u8 => SectionId::Data,
    12u8 => SectionId::DataCount,
};

impl FromMarkerByte for SectionId {
    fn markers() -> &'static phf::OrderedMap<u8, Self> {
        &SectionId_MARKERS
    }

    fn unknown_marker(b: u8) -> ErrorKind {
        ErrorKind::UnknownSectionId(b)
    }
}

/// Decodes a WebAssembly module from `source`.
///
/// The source must be seekable so that its length can be measured up front; sections
/// are then read until that length is reached. The first failure aborts decoding.
pub fn decode_module<R: Read + Seek>(source: R) -> Result<Module, DecodeError> {
    let mut cursor = ByteCursor::new(source)?;

    let magic = cursor.read_array::<4>()?;
    if magic != MAGIC_NUMBER {
        return Err(DecodeError::new(ErrorKind::MalformedHeader(magic), 0));
    }

    let version = cursor.read_array::<4>()?;
    if version != VERSION {
        return Err(DecodeError::new(
            ErrorKind::UnsupportedVersion(u32::from_le_bytes(version)),
            4,
        ));
    }

    let mut module = Module {
        version: u32::from_le_bytes(version),
        ..Default::default()
    };

    while !cursor.is_at_end() {
        let (header, section) = decode_section(&mut cursor)?;
        module.section_headers.push(header);
        module.sections.push(section);
    }

    debug!(
        "decoded module: version {}, {} sections, {} bytes",
        module.version,
        module.sections.len(),
        cursor.position()
    );
    Ok(module)
}

/// Decodes a module held in memory.
pub fn decode_bytes(bytes: &[u8]) -> Result<Module, DecodeError> {
    decode_module(io::Cursor::new(bytes))
}

/// Decodes one section: its id, its declared size, and its payload.
///
/// The payload must consume exactly the declared number of bytes. Any failure raised
/// while decoding the payload is attributed to the section.
pub fn decode_section<R: Read>(
    cursor: &mut ByteCursor<R>,
) -> Result<(SectionHeader, Section), DecodeError> {
    let id: SectionId = cursor.read_marker()?;
    if !id.is_decodable() {
        return Err(cursor
            .error(ErrorKind::UnsupportedSection(id))
            .in_section(id));
    }

    let size = decode_u32(cursor).map_err(|e| e.in_section(id))?;
    let mark = cursor.mark();
    let header = SectionHeader {
        id,
        size,
        offset: mark.offset(),
    };
    debug!("{id} section: {size} bytes at {:#x}", header.offset);

    let outer_bound = cursor.set_bound(mark.offset() + u64::from(size));
    let decoded = decode_payload(cursor, id, size);
    cursor.set_bound(outer_bound);
    let section = decoded.map_err(|e| e.in_section(id))?;

    let consumed = cursor.consumed_since(mark);
    if consumed != u64::from(size) {
        return Err(DecodeError::new(
            ErrorKind::SectionSizeMismatch {
                id,
                declared: size,
                consumed,
            },
            mark.offset(),
        )
        .in_section(id));
    }

    Ok((header, section))
}

fn decode_payload<R: Read>(
    cursor: &mut ByteCursor<R>,
    id: SectionId,
    size: u32,
) -> Result<Section, DecodeError> {
    // Import is rejected whatever its size
    if id == SectionId::Import {
        return decode_import_section(cursor);
    }

    if size == 0
        && let Some(empty) = Section::empty(id)
    {
        return Ok(empty);
    }

    Ok(match id {
        SectionId::Type => Section::Type(decode_type_section(cursor)?),
        SectionId::Function => Section::Function(decode_function_section(cursor)?),
        SectionId::Memory => Section::Memory(decode_memory_section(cursor)?),
        SectionId::Export => Section::Export(decode_export_section(cursor)?),
        SectionId::Code => Section::Code(decode_code_section(cursor)?),
        SectionId::Data => Section::Data(decode_data_section(cursor)?),
        _ => return Err(cursor.error(ErrorKind::UnsupportedSection(id))),
    })
}
