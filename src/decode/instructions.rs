//! WebAssembly instruction decoding.
//!
//! The operands read after each opcode are chosen by [`Opcode::immediate`], so adding
//! an instruction means adding a row to the opcode table rather than a branch here.
//!
//! Defined in <https://www.w3.org/TR/wasm-core-2/#binary-instr>
use crate::core::indices::*;
use crate::core::instruction::{
    BlockType, Ieee32, Ieee64, Immediate, ImmediateShape, Instruction, Memarg, Opcode,
};
use crate::core::types::{RefType, ValType};
use crate::core::{CodeBody, Expr, Local};
use crate::decode::integer::{decode_i32, decode_i64, decode_s33_from};
use crate::decode::{ByteCursor, FromMarkerByte, decode_list, decode_u32};
use crate::error::{DecodeError, ErrorKind};
use std::io::Read;

/// Decodes a single instruction: its opcode and the immediates the opcode calls for.
pub fn decode_instruction<R: Read>(
    cursor: &mut ByteCursor<R>,
) -> Result<Instruction, DecodeError> {
    let offset = cursor.position();
    let b = cursor.read_byte()?;
    let opcode =
        Opcode::from_byte(b).ok_or_else(|| DecodeError::new(ErrorKind::UnknownOpcode(b), offset))?;

    let immediate = match opcode.immediate() {
        ImmediateShape::None => Immediate::None,
        ImmediateShape::BlockType => Immediate::BlockType(decode_block_type(cursor)?),
        ImmediateShape::LabelIdx => Immediate::Label(LabelIdx(decode_u32(cursor)?)),
        ImmediateShape::BrTable => {
            let targets = decode_list(cursor, |c| decode_u32(c).map(LabelIdx))?;
            let default = LabelIdx(decode_u32(cursor)?);
            Immediate::BrTable { targets, default }
        }
        ImmediateShape::FuncIdx => Immediate::Func(FuncIdx(decode_u32(cursor)?)),
        ImmediateShape::CallIndirect => {
            let type_idx = TypeIdx(decode_u32(cursor)?);
            let table = TableIdx(decode_u32(cursor)?);
            Immediate::CallIndirect { type_idx, table }
        }
        ImmediateShape::SelectTypes => Immediate::SelectTypes(decode_list(cursor, ValType::decode)?),
        ImmediateShape::LocalIdx => Immediate::Local(LocalIdx(decode_u32(cursor)?)),
        ImmediateShape::GlobalIdx => Immediate::Global(GlobalIdx(decode_u32(cursor)?)),
        ImmediateShape::TableIdx => Immediate::Table(TableIdx(decode_u32(cursor)?)),
        ImmediateShape::Memarg => {
            let align = decode_u32(cursor)?;
            let offset = decode_u32(cursor)?;
            Immediate::Memarg(Memarg { align, offset })
        }
        ImmediateShape::MemIdx => Immediate::Memory(MemIdx(decode_u32(cursor)?)),
        ImmediateShape::I32 => Immediate::I32(decode_i32(cursor)?),
        ImmediateShape::I64 => Immediate::I64(decode_i64(cursor)?),
        ImmediateShape::F32 => Immediate::F32(Ieee32(u32::from_le_bytes(cursor.read_array()?))),
        ImmediateShape::F64 => Immediate::F64(Ieee64(u64::from_le_bytes(cursor.read_array()?))),
        ImmediateShape::RefType => Immediate::RefType(RefType::decode(cursor)?),
    };

    Ok(Instruction { opcode, immediate })
}

// blocktype ::= 0x40 | valtype | s33 (non-negative type index)
//
// All three forms are told apart by the first byte: value types are single byte
// encodings of negative numbers, as is 0x40.
fn decode_block_type<R: Read>(cursor: &mut ByteCursor<R>) -> Result<BlockType, DecodeError> {
    const EMPTY: u8 = 0x40;

    let offset = cursor.position();
    let b = cursor.read_byte()?;
    if b == EMPTY {
        return Ok(BlockType::Empty);
    }
    if b & 0b1100_0000 == 0b0100_0000 {
        return ValType::from_marker(b)
            .map(BlockType::Value)
            .map_err(|kind| DecodeError::new(kind, offset));
    }

    let idx = decode_s33_from(cursor, offset, b)?;
    u32::try_from(idx)
        .map(|idx| BlockType::Type(TypeIdx(idx)))
        .map_err(|_| DecodeError::new(ErrorKind::InvalidValType(b), offset))
}

/// Decodes instructions up to and including the `end` that closes the expression.
///
/// `block`, `loop` and `if` open nested levels whose own `end`s are kept as ordinary
/// instructions; only the `end` at the outermost level terminates the expression.
/// Constant expressions, such as a data segment's offset, are decoded with this.
pub fn decode_expr<R: Read>(cursor: &mut ByteCursor<R>) -> Result<Expr, DecodeError> {
    let mut expr = Vec::new();
    let mut depth: u32 = 0;

    loop {
        let ins = decode_instruction(cursor)?;
        let opcode = ins.opcode;
        expr.push(ins);

        if opcode.opens_block() {
            depth += 1;
        } else if opcode == Opcode::End {
            match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return Ok(expr),
            }
        }
    }
}

/// Decodes a function body whose size, `declared_size`, has already been read.
///
/// The body is bounded by its size rather than by its final `end`: instructions are
/// decoded until exactly `declared_size` bytes (locals included) have been consumed.
/// Decoding also stops at the end of the enclosing section, so a size that is too
/// large never pulls in bytes that belong to something else.
pub fn decode_code_body<R: Read>(
    cursor: &mut ByteCursor<R>,
    declared_size: u32,
) -> Result<CodeBody, DecodeError> {
    let mark = cursor.mark();
    let declared = u64::from(declared_size);

    let locals = decode_list(cursor, |c| {
        let count = decode_u32(c)?;
        let t = ValType::decode(c)?;
        Ok(Local { count, t })
    })?;

    let mut body = Vec::new();
    while cursor.consumed_since(mark) < declared && cursor.position() < cursor.bound() {
        body.push(decode_instruction(cursor)?);
    }

    let consumed = cursor.consumed_since(mark);
    if consumed != declared {
        return Err(DecodeError::new(
            ErrorKind::BodySizeMismatch {
                declared: declared_size,
                consumed,
            },
            mark.offset(),
        ));
    }

    Ok(CodeBody {
        size: declared_size,
        locals,
        body,
    })
}
