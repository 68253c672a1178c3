//! The in-memory representation of a decoded module.
pub mod indices;
pub mod instruction;
pub mod types;

mod module;
pub use module::{
    CodeBody, DataSegment, Export, ExportTarget, Local, Module, Section, SectionHeader, SectionId,
};

use crate::core::instruction::Instruction;

/// A sequence of instructions. Sequences produced by the decoder always end
/// with the `end` instruction that terminated them.
pub type Expr = Vec<Instruction>;
