//! WebAssembly instructions, in their flat binary form.
//!
//! Structured control instructions are not nested: `block`, `loop` and `if` carry only
//! their block type, and the matching `else`/`end` markers appear as instructions of
//! their own, in file order.
//!
//! Defined in <https://www.w3.org/TR/wasm-core-2/#instructions>
use crate::core::indices::*;
use crate::core::types::{RefType, ValType};
use std::fmt;

/// The operand shape that follows an opcode in the binary format.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ImmediateShape {
    None,
    BlockType,
    LabelIdx,
    BrTable,
    FuncIdx,
    CallIndirect,
    SelectTypes,
    LocalIdx,
    GlobalIdx,
    TableIdx,
    Memarg,
    MemIdx,
    I32,
    I64,
    F32,
    F64,
    RefType,
}

macro_rules! define_opcodes {
    ($($byte:literal => $name:ident, $mnemonic:literal, $shape:ident;)*) => {
        /// Every single-byte opcode the decoder understands.
        #[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
        #[repr(u8)]
        pub enum Opcode {
            $($name = $byte,)*
        }

        impl Opcode {
            /// Looks up the opcode encoded by `b`. Returns `None` for unassigned or
            /// unsupported bytes, including the 0xFC and 0xFD prefixes.
            pub const fn from_byte(b: u8) -> Option<Self> {
                match b {
                    $($byte => Some(Opcode::$name),)*
                    _ => None,
                }
            }

            pub const fn mnemonic(self) -> &'static str {
                match self {
                    $(Opcode::$name => $mnemonic,)*
                }
            }

            /// The immediates that follow this opcode.
            pub const fn immediate(self) -> ImmediateShape {
                match self {
                    $(Opcode::$name => ImmediateShape::$shape,)*
                }
            }
        }

        #[cfg(test)]
        pub(crate) const ALL_OPCODES: &[Opcode] = &[$(Opcode::$name,)*];
    };
}

define_opcodes! {
    // --- Control instructions ---
    0x00 => Unreachable, "unreachable", None;
    0x01 => Nop, "nop", None;
    0x02 => Block, "block", BlockType;
    0x03 => Loop, "loop", BlockType;
    0x04 => If, "if", BlockType;
    0x05 => Else, "else", None;
    0x0B => End, "end", None;
    0x0C => Br, "br", LabelIdx;
    0x0D => BrIf, "br_if", LabelIdx;
    0x0E => BrTable, "br_table", BrTable;
    0x0F => Return, "return", None;
    0x10 => Call, "call", FuncIdx;
    0x11 => CallIndirect, "call_indirect", CallIndirect;

    // --- Parametric instructions ---
    0x1A => Drop, "drop", None;
    0x1B => Select, "select", None;
    0x1C => SelectT, "select", SelectTypes;

    // --- Variable instructions ---
    0x20 => LocalGet, "local.get", LocalIdx;
    0x21 => LocalSet, "local.set", LocalIdx;
    0x22 => LocalTee, "local.tee", LocalIdx;
    0x23 => GlobalGet, "global.get", GlobalIdx;
    0x24 => GlobalSet, "global.set", GlobalIdx;

    // --- Table instructions ---
    0x25 => TableGet, "table.get", TableIdx;
    0x26 => TableSet, "table.set", TableIdx;

    // --- Memory instructions ---
    0x28 => I32Load, "i32.load", Memarg;
    0x29 => I64Load, "i64.load", Memarg;
    0x2A => F32Load, "f32.load", Memarg;
    0x2B => F64Load, "f64.load", Memarg;
    0x2C => I32Load8S, "i32.load8_s", Memarg;
    0x2D => I32Load8U, "i32.load8_u", Memarg;
    0x2E => I32Load16S, "i32.load16_s", Memarg;
    0x2F => I32Load16U, "i32.load16_u", Memarg;
    0x30 => I64Load8S, "i64.load8_s", Memarg;
    0x31 => I64Load8U, "i64.load8_u", Memarg;
    0x32 => I64Load16S, "i64.load16_s", Memarg;
    0x33 => I64Load16U, "i64.load16_u", Memarg;
    0x34 => I64Load32S, "i64.load32_s", Memarg;
    0x35 => I64Load32U, "i64.load32_u", Memarg;
    0x36 => I32Store, "i32.store", Memarg;
    0x37 => I64Store, "i64.store", Memarg;
    0x38 => F32Store, "f32.store", Memarg;
    0x39 => F64Store, "f64.store", Memarg;
    0x3A => I32Store8, "i32.store8", Memarg;
    0x3B => I32Store16, "i32.store16", Memarg;
    0x3C => I64Store8, "i64.store8", Memarg;
    0x3D => I64Store16, "i64.store16", Memarg;
    0x3E => I64Store32, "i64.store32", Memarg;
    0x3F => MemorySize, "memory.size", MemIdx;
    0x40 => MemoryGrow, "memory.grow", MemIdx;

    // --- Numeric instructions ---
    0x41 => I32Const, "i32.const", I32;
    0x42 => I64Const, "i64.const", I64;
    0x43 => F32Const, "f32.const", F32;
    0x44 => F64Const, "f64.const", F64;

    0x45 => I32Eqz, "i32.eqz", None;
    0x46 => I32Eq, "i32.eq", None;
    0x47 => I32Ne, "i32.ne", None;
    0x48 => I32LtS, "i32.lt_s", None;
    0x49 => I32LtU, "i32.lt_u", None;
    0x4A => I32GtS, "i32.gt_s", None;
    0x4B => I32GtU, "i32.gt_u", None;
    0x4C => I32LeS, "i32.le_s", None;
    0x4D => I32LeU, "i32.le_u", None;
    0x4E => I32GeS, "i32.ge_s", None;
    0x4F => I32GeU, "i32.ge_u", None;

    0x50 => I64Eqz, "i64.eqz", None;
    0x51 => I64Eq, "i64.eq", None;
    0x52 => I64Ne, "i64.ne", None;
    0x53 => I64LtS, "i64.lt_s", None;
    0x54 => I64LtU, "i64.lt_u", None;
    0x55 => I64GtS, "i64.gt_s", None;
    0x56 => I64GtU, "i64.gt_u", None;
    0x57 => I64LeS, "i64.le_s", None;
    0x58 => I64LeU, "i64.le_u", None;
    0x59 => I64GeS, "i64.ge_s", None;
    0x5A => I64GeU, "i64.ge_u", None;

    0x5B => F32Eq, "f32.eq", None;
    0x5C => F32Ne, "f32.ne", None;
    0x5D => F32Lt, "f32.lt", None;
    0x5E => F32Gt, "f32.gt", None;
    0x5F => F32Le, "f32.le", None;
    0x60 => F32Ge, "f32.ge", None;

    0x61 => F64Eq, "f64.eq", None;
    0x62 => F64Ne, "f64.ne", None;
    0x63 => F64Lt, "f64.lt", None;
    0x64 => F64Gt, "f64.gt", None;
    0x65 => F64Le, "f64.le", None;
    0x66 => F64Ge, "f64.ge", None;

    0x67 => I32Clz, "i32.clz", None;
    0x68 => I32Ctz, "i32.ctz", None;
    0x69 => I32Popcnt, "i32.popcnt", None;
    0x6A => I32Add, "i32.add", None;
    0x6B => I32Sub, "i32.sub", None;
    0x6C => I32Mul, "i32.mul", None;
    0x6D => I32DivS, "i32.div_s", None;
    0x6E => I32DivU, "i32.div_u", None;
    0x6F => I32RemS, "i32.rem_s", None;
    0x70 => I32RemU, "i32.rem_u", None;
    0x71 => I32And, "i32.and", None;
    0x72 => I32Or, "i32.or", None;
    0x73 => I32Xor, "i32.xor", None;
    0x74 => I32Shl, "i32.shl", None;
    0x75 => I32ShrS, "i32.shr_s", None;
    0x76 => I32ShrU, "i32.shr_u", None;
    0x77 => I32Rotl, "i32.rotl", None;
    0x78 => I32Rotr, "i32.rotr", None;

    0x79 => I64Clz, "i64.clz", None;
    0x7A => I64Ctz, "i64.ctz", None;
    0x7B => I64Popcnt, "i64.popcnt", None;
    0x7C => I64Add, "i64.add", None;
    0x7D => I64Sub, "i64.sub", None;
    0x7E => I64Mul, "i64.mul", None;
    0x7F => I64DivS, "i64.div_s", None;
    0x80 => I64DivU, "i64.div_u", None;
    0x81 => I64RemS, "i64.rem_s", None;
    0x82 => I64RemU, "i64.rem_u", None;
    0x83 => I64And, "i64.and", None;
    0x84 => I64Or, "i64.or", None;
    0x85 => I64Xor, "i64.xor", None;
    0x86 => I64Shl, "i64.shl", None;
    0x87 => I64ShrS, "i64.shr_s", None;
    0x88 => I64ShrU, "i64.shr_u", None;
    0x89 => I64Rotl, "i64.rotl", None;
    0x8A => I64Rotr, "i64.rotr", None;

    0x8B => F32Abs, "f32.abs", None;
    0x8C => F32Neg, "f32.neg", None;
    0x8D => F32Ceil, "f32.ceil", None;
    0x8E => F32Floor, "f32.floor", None;
    0x8F => F32Trunc, "f32.trunc", None;
    0x90 => F32Nearest, "f32.nearest", None;
    0x91 => F32Sqrt, "f32.sqrt", None;
    0x92 => F32Add, "f32.add", None;
    0x93 => F32Sub, "f32.sub", None;
    0x94 => F32Mul, "f32.mul", None;
    0x95 => F32Div, "f32.div", None;
    0x96 => F32Min, "f32.min", None;
    0x97 => F32Max, "f32.max", None;
    0x98 => F32Copysign, "f32.copysign", None;

    0x99 => F64Abs, "f64.abs", None;
    0x9A => F64Neg, "f64.neg", None;
    0x9B => F64Ceil, "f64.ceil", None;
    0x9C => F64Floor, "f64.floor", None;
    0x9D => F64Trunc, "f64.trunc", None;
    0x9E => F64Nearest, "f64.nearest", None;
    0x9F => F64Sqrt, "f64.sqrt", None;
    0xA0 => F64Add, "f64.add", None;
    0xA1 => F64Sub, "f64.sub", None;
    0xA2 => F64Mul, "f64.mul", None;
    0xA3 => F64Div, "f64.div", None;
    0xA4 => F64Min, "f64.min", None;
    0xA5 => F64Max, "f64.max", None;
    0xA6 => F64Copysign, "f64.copysign", None;

    0xA7 => I32WrapI64, "i32.wrap_i64", None;
    0xA8 => I32TruncF32S, "i32.trunc_f32_s", None;
    0xA9 => I32TruncF32U, "i32.trunc_f32_u", None;
    0xAA => I32TruncF64S, "i32.trunc_f64_s", None;
    0xAB => I32TruncF64U, "i32.trunc_f64_u", None;
    0xAC => I64ExtendI32S, "i64.extend_i32_s", None;
    0xAD => I64ExtendI32U, "i64.extend_i32_u", None;
    0xAE => I64TruncF32S, "i64.trunc_f32_s", None;
    0xAF => I64TruncF32U, "i64.trunc_f32_u", None;
    0xB0 => I64TruncF64S, "i64.trunc_f64_s", None;
    0xB1 => I64TruncF64U, "i64.trunc_f64_u", None;
    0xB2 => F32ConvertI32S, "f32.convert_i32_s", None;
    0xB3 => F32ConvertI32U, "f32.convert_i32_u", None;
    0xB4 => F32ConvertI64S, "f32.convert_i64_s", None;
    0xB5 => F32ConvertI64U, "f32.convert_i64_u", None;
    0xB6 => F32DemoteF64, "f32.demote_f64", None;
    0xB7 => F64ConvertI32S, "f64.convert_i32_s", None;
    0xB8 => F64ConvertI32U, "f64.convert_i32_u", None;
    0xB9 => F64ConvertI64S, "f64.convert_i64_s", None;
    0xBA => F64ConvertI64U, "f64.convert_i64_u", None;
    0xBB => F64PromoteF32, "f64.promote_f32", None;
    0xBC => I32ReinterpretF32, "i32.reinterpret_f32", None;
    0xBD => I64ReinterpretF64, "i64.reinterpret_f64", None;
    0xBE => F32ReinterpretI32, "f32.reinterpret_i32", None;
    0xBF => F64ReinterpretI64, "f64.reinterpret_i64", None;

    0xC0 => I32Extend8S, "i32.extend8_s", None;
    0xC1 => I32Extend16S, "i32.extend16_s", None;
    0xC2 => I64Extend8S, "i64.extend8_s", None;
    0xC3 => I64Extend16S, "i64.extend16_s", None;
    0xC4 => I64Extend32S, "i64.extend32_s", None;

    // --- Reference instructions ---
    0xD0 => RefNull, "ref.null", RefType;
    0xD1 => RefIsNull, "ref.is_null", None;
    0xD2 => RefFunc, "ref.func", FuncIdx;
}

impl Opcode {
    pub const fn byte(self) -> u8 {
        self as u8
    }

    /// Whether this opcode opens a structured block that a later `end` closes.
    pub const fn opens_block(self) -> bool {
        matches!(self, Opcode::Block | Opcode::Loop | Opcode::If)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// The type of a structured control instruction's block.
///
/// <https://www.w3.org/TR/wasm-core-2/#binary-blocktype>
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BlockType {
    Empty,
    Value(ValType),
    Type(TypeIdx),
}

/// The immediate of memory access instructions.
///
/// <https://www.w3.org/TR/wasm-core-2/#binary-memarg>
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Memarg {
    pub align: u32,
    pub offset: u32,
}

/// The raw bits of an `f32.const` literal. Kept as bits so that NaN payloads survive and
/// decoded modules compare equal to themselves.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Ieee32(pub u32);

impl Ieee32 {
    pub fn value(self) -> f32 {
        f32::from_bits(self.0)
    }
}

/// The raw bits of an `f64.const` literal.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Ieee64(pub u64);

impl Ieee64 {
    pub fn value(self) -> f64 {
        f64::from_bits(self.0)
    }
}

/// The decoded operands of an instruction. Which variant appears is fully determined by
/// [`Opcode::immediate`].
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Immediate {
    None,
    BlockType(BlockType),
    Label(LabelIdx),
    BrTable {
        targets: Vec<LabelIdx>,
        default: LabelIdx,
    },
    Func(FuncIdx),
    CallIndirect {
        type_idx: TypeIdx,
        table: TableIdx,
    },
    SelectTypes(Vec<ValType>),
    Local(LocalIdx),
    Global(GlobalIdx),
    Table(TableIdx),
    Memarg(Memarg),
    Memory(MemIdx),
    I32(i32),
    I64(i64),
    F32(Ieee32),
    F64(Ieee64),
    RefType(RefType),
}

/// A single decoded instruction: an opcode and its immediates.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Instruction {
    pub opcode: Opcode,
    pub immediate: Immediate,
}

impl Instruction {
    pub fn new(opcode: Opcode, immediate: Immediate) -> Self {
        Instruction { opcode, immediate }
    }

    /// An instruction without immediates.
    pub fn bare(opcode: Opcode) -> Self {
        Instruction::new(opcode, Immediate::None)
    }

    pub fn is_end(&self) -> bool {
        self.opcode == Opcode::End
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.opcode)?;
        match &self.immediate {
            Immediate::None => Ok(()),
            Immediate::BlockType(BlockType::Empty) => Ok(()),
            Immediate::BlockType(BlockType::Value(t)) => write!(f, " (result {t})"),
            Immediate::BlockType(BlockType::Type(idx)) => write!(f, " (type {idx})"),
            Immediate::Label(idx) => write!(f, " {idx}"),
            Immediate::BrTable { targets, default } => {
                for target in targets {
                    write!(f, " {target}")?;
                }
                write!(f, " {default}")
            }
            Immediate::Func(idx) => write!(f, " {idx}"),
            Immediate::CallIndirect { type_idx, table } => {
                write!(f, " {table} (type {type_idx})")
            }
            Immediate::SelectTypes(types) => {
                f.write_str(" (result")?;
                for t in types {
                    write!(f, " {t}")?;
                }
                f.write_str(")")
            }
            Immediate::Local(idx) => write!(f, " {idx}"),
            Immediate::Global(idx) => write!(f, " {idx}"),
            Immediate::Table(idx) => write!(f, " {idx}"),
            Immediate::Memarg(Memarg { align, offset }) => {
                write!(f, " offset={offset} align={}", 1u64 << (*align).min(63))
            }
            Immediate::Memory(idx) => write!(f, " {idx}"),
            Immediate::I32(n) => write!(f, " {n}"),
            Immediate::I64(n) => write!(f, " {n}"),
            Immediate::F32(n) => write!(f, " {}", n.value()),
            Immediate::F64(n) => write!(f, " {}", n.value()),
            Immediate::RefType(RefType::Func) => f.write_str(" func"),
            Immediate::RefType(RefType::Extern) => f.write_str(" extern"),
        }
    }
}
