use crate::core::DataSegment;
use crate::core::indices::MemIdx;
use crate::decode::helpers::decode_byte_vector;
use crate::decode::{ByteCursor, decode_expr, decode_list, decode_u32};
use crate::error::DecodeError;
use log::trace;
use std::io::Read;

pub fn decode_data_section<R: Read>(
    cursor: &mut ByteCursor<R>,
) -> Result<Vec<DataSegment>, DecodeError> {
    decode_list(cursor, decode_data_segment)
}

fn decode_data_segment<R: Read>(cursor: &mut ByteCursor<R>) -> Result<DataSegment, DecodeError> {
    let memory = MemIdx(decode_u32(cursor)?);
    let offset = decode_expr(cursor)?;
    let init = decode_byte_vector(cursor)?;

    trace!("data segment for memory {memory}: {} bytes", init.len());
    Ok(DataSegment {
        memory,
        offset,
        init,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::instruction::{Immediate, Instruction, Opcode};
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_memory_offset_and_payload() {
        let bytes = [
            0x01, // count
            0x00, // memory 0
            0x41, 0x10, 0x0B, // i32.const 16; end
            0x05, b'h', b'e', b'l', b'l', b'o',
        ];

        assert_eq!(
            decode_data_section(&mut ByteCursor::from_bytes(&bytes)).unwrap(),
            vec![DataSegment {
                memory: MemIdx(0),
                offset: vec![
                    Instruction::new(Opcode::I32Const, Immediate::I32(16)),
                    Instruction::bare(Opcode::End),
                ],
                init: b"hello".to_vec(),
            }]
        );
    }

    #[test]
    fn payload_longer_than_input_fails() {
        let bytes = [0x01, 0x00, 0x41, 0x00, 0x0B, 0x09, 0xAA];
        let err = decode_data_section(&mut ByteCursor::from_bytes(&bytes)).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::UnexpectedEof { wanted: 9 }));
        assert_eq!(err.offset, 6);
    }

    #[test]
    fn unknown_opcode_in_offset_fails() {
        let bytes = [0x01, 0x00, 0xFD, 0x0B, 0x00];
        let err = decode_data_section(&mut ByteCursor::from_bytes(&bytes)).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::UnknownOpcode(0xFD)));
    }
}
