//! The error returned when decoding fails.
use crate::core::SectionId;
use crate::core::types::ValType;
use crate::decode::FromMarkerByte;
use crate::decode::module::{MAGIC_NUMBER, VERSION};
use std::{fmt, io};
use thiserror::Error;

/// A failure to decode a module, along with where it happened.
///
/// Decoding stops at the first failure; no partially decoded module is ever returned.
#[derive(Debug)]
pub struct DecodeError {
    pub kind: ErrorKind,

    /// Byte offset, from the start of the module, of the read that failed.
    pub offset: u64,

    /// The section being decoded when the failure happened, if any.
    pub section: Option<SectionId>,
}

impl DecodeError {
    pub(crate) fn new(kind: ErrorKind, offset: u64) -> Self {
        DecodeError {
            kind,
            offset,
            section: None,
        }
    }

    /// Attributes the error to `id`, unless a section was already recorded.
    pub(crate) fn in_section(mut self, id: SectionId) -> Self {
        self.section.get_or_insert(id);
        self
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at offset {:#x}", self.kind, self.offset)?;
        if let Some(id) = self.section {
            write!(f, " in {id} section")?;
        }
        f.write_str(")")
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.kind)
    }
}

/// Why a LEB128 integer was rejected.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum VarintFault {
    /// The input ended before a byte without the continuation bit.
    Truncated,

    /// More bytes than the integer width allows.
    TooLong,

    /// The final byte carries bits beyond the integer width.
    TooLarge,
}

impl fmt::Display for VarintFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VarintFault::Truncated => "input ended inside the encoding",
            VarintFault::TooLong => "representation too long",
            VarintFault::TooLarge => "value out of range",
        })
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("malformed header: expected magic {magic:#04X?}; got {0:#04X?}", magic = MAGIC_NUMBER)]
    MalformedHeader([u8; 4]),

    #[error("unsupported version: expected {expected}; got {0}", expected = u32::from_le_bytes(VERSION))]
    UnsupportedVersion(u32),

    #[error("malformed {width}-bit LEB128 integer: {fault}")]
    MalformedVarint { width: u32, fault: VarintFault },

    #[error("unexpected end of input: could not read {wanted} byte(s)")]
    UnexpectedEof { wanted: usize },

    #[error("unknown section ID: expected one of {markers}; got {0:#04X}", markers = SectionId::markers_formatted())]
    UnknownSectionId(u8),

    #[error("{0} section is not supported")]
    UnsupportedSection(SectionId),

    #[error("{id} section size mismatch: declared {declared} bytes; consumed {consumed}")]
    SectionSizeMismatch {
        id: SectionId,
        declared: u32,
        consumed: u64,
    },

    #[error("code body size mismatch: declared {declared} bytes; consumed {consumed}")]
    BodySizeMismatch { declared: u32, consumed: u64 },

    #[error("invalid type marker: expected 0x60 (function type); got {0:#04X}")]
    InvalidTypeMarker(u8),

    #[error("invalid value type: expected one of {markers}; got {0:#04X}", markers = ValType::markers_formatted())]
    InvalidValType(u8),

    #[error("invalid memory limit kind: expected 0x00 (min) or 0x01 (min and max); got {0:#04X}")]
    InvalidLimitKind(u8),

    #[error("unsupported export kind: expected 0x00 (func) or 0x02 (mem); got {0:#04X}")]
    UnsupportedExportKind(u8),

    #[error("unknown opcode: {0:#04X}")]
    UnknownOpcode(u8),

    #[error("invalid name: not valid UTF-8")]
    InvalidName(#[source] std::string::FromUtf8Error),

    #[error("failed reading input")]
    Io(#[source] io::Error),
}
