use crate::core::Expr;
use crate::core::indices::{FuncIdx, MemIdx, TypeIdx};
use crate::core::types::{FunctionType, MemoryLimits, ValType};
use std::fmt;

/// A decoded WebAssembly module: its version and every section it contains, in file
/// order.
///
/// A `Module` is built once by [`decode_module`](crate::decode_module) and is not
/// modified afterwards.
///
/// <https://www.w3.org/TR/wasm-core-2/#binary-module>
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Module {
    pub version: u32,

    pub sections: Vec<Section>,

    /// The header of each entry in [`Self::sections`], at the same position.
    pub section_headers: Vec<SectionHeader>,
}

impl Default for Module {
    fn default() -> Self {
        Module {
            version: 1,
            sections: vec![],
            section_headers: vec![],
        }
    }
}

macro_rules! section_accessor {
    ($(#[$doc:meta])* $fn:ident, $variant:ident, $item:ty) => {
        $(#[$doc])*
        pub fn $fn(&self) -> Option<&[$item]> {
            self.sections.iter().find_map(|s| match s {
                Section::$variant(items) => Some(items.as_slice()),
                _ => None,
            })
        }
    };
}

impl Module {
    section_accessor!(
        /// The function types of the first Type section, if any.
        types, Type, FunctionType
    );
    section_accessor!(
        /// The type indices of the first Function section, if any.
        functions, Function, TypeIdx
    );
    section_accessor!(memories, Memory, MemoryLimits);
    section_accessor!(exports, Export, Export);
    section_accessor!(code, Code, CodeBody);
    section_accessor!(data, Data, DataSegment);

    /// Iterates sections together with their headers.
    pub fn sections_with_headers(&self) -> impl Iterator<Item = (&SectionHeader, &Section)> {
        self.section_headers.iter().zip(self.sections.iter())
    }
}

/// The id byte that introduces every section.
///
/// Ids 0 through 12 have been assigned by the binary format; any other byte is rejected.
/// Only some of the assigned ids are decoded, see [`SectionId::is_decodable`].
///
/// <https://www.w3.org/TR/wasm-core-2/#sections>
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub enum SectionId {
    Custom,
    Type,
    Import,
    Function,
    Table,
    Memory,
    Global,
    Export,
    Start,
    Element,
    Code,
    Data,
    DataCount,
}

impl SectionId {
    /// Whether the payload of this section is decoded. Import is recognized here so that
    /// its decoder can reject it after the size has been read.
    pub const fn is_decodable(self) -> bool {
        matches!(
            self,
            SectionId::Type
                | SectionId::Import
                | SectionId::Function
                | SectionId::Memory
                | SectionId::Export
                | SectionId::Code
                | SectionId::Data
        )
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// The framing of a section as it appears in the binary.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct SectionHeader {
    pub id: SectionId,

    /// Declared payload size in bytes.
    pub size: u32,

    /// Offset of the first payload byte from the start of the module.
    pub offset: u64,
}

/// A decoded section.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Section {
    /// <https://www.w3.org/TR/wasm-core-2/#type-section>
    Type(Vec<FunctionType>),

    /// The type index of every function defined by the module.
    ///
    /// <https://www.w3.org/TR/wasm-core-2/#function-section>
    Function(Vec<TypeIdx>),

    /// <https://www.w3.org/TR/wasm-core-2/#memory-section>
    Memory(Vec<MemoryLimits>),

    /// <https://www.w3.org/TR/wasm-core-2/#export-section>
    Export(Vec<Export>),

    /// <https://www.w3.org/TR/wasm-core-2/#code-section>
    Code(Vec<CodeBody>),

    /// <https://www.w3.org/TR/wasm-core-2/#data-section>
    Data(Vec<DataSegment>),
}

impl Section {
    pub fn id(&self) -> SectionId {
        match self {
            Section::Type(_) => SectionId::Type,
            Section::Function(_) => SectionId::Function,
            Section::Memory(_) => SectionId::Memory,
            Section::Export(_) => SectionId::Export,
            Section::Code(_) => SectionId::Code,
            Section::Data(_) => SectionId::Data,
        }
    }

    /// The number of items the section holds.
    pub fn len(&self) -> usize {
        match self {
            Section::Type(items) => items.len(),
            Section::Function(items) => items.len(),
            Section::Memory(items) => items.len(),
            Section::Export(items) => items.len(),
            Section::Code(items) => items.len(),
            Section::Data(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The result of a section whose declared size is zero.
    pub(crate) fn empty(id: SectionId) -> Option<Self> {
        Some(match id {
            SectionId::Type => Section::Type(vec![]),
            SectionId::Function => Section::Function(vec![]),
            SectionId::Memory => Section::Memory(vec![]),
            SectionId::Export => Section::Export(vec![]),
            SectionId::Code => Section::Code(vec![]),
            SectionId::Data => Section::Data(vec![]),
            _ => return None,
        })
    }
}

/// An export makes a function or memory of the module available to the host under a
/// name.
///
/// <https://www.w3.org/TR/wasm-core-2/#exports>
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Export {
    pub name: String,
    pub target: ExportTarget,
}

/// What an [`Export`] refers to. Table and global exports are not supported.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ExportTarget {
    Function(FuncIdx),
    Memory(MemIdx),
}

/// A run of `count` locals of the same type, as declared in a code body.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Local {
    pub count: u32,
    pub t: ValType,
}

/// The body of a function, from the Code section.
///
/// <https://www.w3.org/TR/wasm-core-2/#binary-code>
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct CodeBody {
    /// The declared byte size of the locals and instructions.
    pub size: u32,

    pub locals: Vec<Local>,

    /// The instructions of the body, in order. For a well-formed body the last one is
    /// `end`.
    pub body: Expr,
}

impl CodeBody {
    /// Iterates the type of every local slot, one per unit of each run's count.
    pub fn locals_expanded(&self) -> impl Iterator<Item = ValType> + '_ {
        self.locals
            .iter()
            .flat_map(|local| std::iter::repeat_n(local.t, local.count as usize))
    }

    /// The number of local slots declared by the body.
    pub fn local_count(&self) -> u64 {
        self.locals.iter().map(|l| u64::from(l.count)).sum()
    }
}

/// A data segment initializing a range of a memory.
///
/// <https://www.w3.org/TR/wasm-core-2/#data-segments>
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct DataSegment {
    pub memory: MemIdx,

    /// The constant expression computing the start offset, including its `end`.
    pub offset: Expr,

    pub init: Vec<u8>,
}
