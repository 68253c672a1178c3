use crate::core::indices::{FuncIdx, MemIdx};
use crate::core::{Export, ExportTarget};
use crate::decode::{ByteCursor, decode_list, decode_name, decode_u32};
use crate::error::{DecodeError, ErrorKind};
use std::io::Read;

pub fn decode_export_section<R: Read>(
    cursor: &mut ByteCursor<R>,
) -> Result<Vec<Export>, DecodeError> {
    decode_list(cursor, decode_export)
}

fn decode_export<R: Read>(cursor: &mut ByteCursor<R>) -> Result<Export, DecodeError> {
    let name = decode_name(cursor)?;

    let offset = cursor.position();
    let target = match cursor.read_byte()? {
        0x00 => ExportTarget::Function(FuncIdx(decode_u32(cursor)?)),
        0x02 => ExportTarget::Memory(MemIdx(decode_u32(cursor)?)),
        // 0x01 (table), 0x03 (global) and anything else
        b => return Err(DecodeError::new(ErrorKind::UnsupportedExportKind(b), offset)),
    };

    Ok(Export { name, target })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_function_and_memory_exports() {
        let bytes = [
            0x02, // count
            0x03, b'a', b'd', b'd', 0x00, 0x00, // "add" -> func 0
            0x03, b'm', b'e', b'm', 0x02, 0x00, // "mem" -> memory 0
        ];

        assert_eq!(
            decode_export_section(&mut ByteCursor::from_bytes(&bytes)).unwrap(),
            vec![
                Export {
                    name: "add".to_owned(),
                    target: ExportTarget::Function(FuncIdx(0)),
                },
                Export {
                    name: "mem".to_owned(),
                    target: ExportTarget::Memory(MemIdx(0)),
                },
            ]
        );
    }

    #[test]
    fn table_and_global_exports_are_unsupported() {
        for kind in [0x01, 0x03, 0x04] {
            let bytes = [0x01, 0x01, b't', kind, 0x00];
            let err = decode_export_section(&mut ByteCursor::from_bytes(&bytes)).unwrap_err();
            assert!(matches!(err.kind, ErrorKind::UnsupportedExportKind(k) if k == kind));
            assert_eq!(err.offset, 3);
        }
    }
}
