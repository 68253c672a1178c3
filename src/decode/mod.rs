//! Decoding of the binary format: a counting cursor, LEB128 integers, names,
//! instructions, and one decoder per supported section.
pub mod cursor;
pub(crate) mod helpers;
pub mod instructions;
pub mod integer;
pub(crate) mod module;
pub mod sections;
pub(crate) mod types;

pub use cursor::{ByteCursor, Mark};
pub use helpers::{decode_list, decode_name};
pub use instructions::{decode_code_body, decode_expr, decode_instruction};
pub use integer::decode_u32;
pub use module::{decode_bytes, decode_module, decode_section};

use crate::error::ErrorKind;

/// Closed sets of values that are each identified by a single marker byte.
pub(crate) trait FromMarkerByte
where
    Self: Sized + Copy + std::fmt::Debug + 'static,
{
    // defines the mapping between expected bytes and the corresponding value
    fn markers() -> &'static phf::OrderedMap<u8, Self>;

    /// The error reported for a byte missing from [`Self::markers`].
    fn unknown_marker(b: u8) -> ErrorKind;

    fn markers_formatted() -> String {
        Self::markers()
            .entries()
            .map(|(marker, variant)| format!("{marker:#04X} ({variant:?})"))
            .collect::<Vec<String>>()
            .join(", ")
    }

    fn from_marker(b: u8) -> Result<Self, ErrorKind> {
        match Self::markers().get(&b) {
            Some(n) => Ok(*n),
            None => Err(Self::unknown_marker(b)),
        }
    }
}
