use std::fs::File;
use wasmdbg::core::SectionId;
use wasmdbg::{DecodeError, ErrorKind, VarintFault, decode_bytes, decode_module};

fn decode_fixture(name: &str) -> DecodeError {
    let f = File::open(format!("tests/fixtures/malformed/{name}.wasm")).unwrap();
    decode_module(f).expect_err("fixture should fail to decode")
}

#[test]
fn malformed_header_for_wrong_magic() {
    let err = decode_bytes(&[0xD3, 0xAD, 0xBE, 0xEF, 0x01, 0x00, 0x00, 0x00]).unwrap_err();
    match err.kind {
        ErrorKind::MalformedHeader(magic) => assert_eq!(magic, [0xD3, 0xAD, 0xBE, 0xEF]),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.offset, 0);
    assert_eq!(err.section, None);
}

#[test]
fn unsupported_version() {
    let err = decode_bytes(&[0x00, 0x61, 0x73, 0x6D, 0x0D, 0x00, 0x00, 0x00]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnsupportedVersion(13)));
    assert_eq!(err.to_string(), "unsupported version: expected 1; got 13 (at offset 0x4)");
}

#[test]
fn unexpected_eof_for_empty_input() {
    let err = decode_bytes(&[]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnexpectedEof { wanted: 4 }));
}

#[test]
fn unsupported_export_kind_for_table_export() {
    // Sections: Export.
    // Fixture: a single export with kind byte 0x01 (table).
    let err = decode_fixture("export_table_kind");
    assert!(matches!(err.kind, ErrorKind::UnsupportedExportKind(0x01)));
    assert_eq!(err.section, Some(SectionId::Export));
    assert_eq!(err.offset, 13);
}

#[test]
fn unsupported_section_for_import() {
    // Sections: Type, Import.
    // Fixture: imports function "f" from module "env".
    let err = decode_fixture("import_section");
    assert!(matches!(
        err.kind,
        ErrorKind::UnsupportedSection(SectionId::Import)
    ));
    assert_eq!(err.section, Some(SectionId::Import));
    assert_eq!(err.offset, 19);
}

#[test]
fn unsupported_section_for_empty_import() {
    // Sections: Import (declared size 0).
    let err = decode_fixture("import_section_empty");
    assert!(matches!(
        err.kind,
        ErrorKind::UnsupportedSection(SectionId::Import)
    ));
    assert_eq!(err.offset, 10);
}

#[test]
fn unsupported_section_for_custom() {
    // Sections: Custom ("foo", no payload).
    let err = decode_fixture("custom_section");
    assert!(matches!(
        err.kind,
        ErrorKind::UnsupportedSection(SectionId::Custom)
    ));
    assert_eq!(err.section, Some(SectionId::Custom));
    assert_eq!(err.offset, 9);
    assert_eq!(
        err.to_string(),
        "Custom section is not supported (at offset 0x9 in Custom section)"
    );
}

#[test]
fn unsupported_section_for_each_recognized_id() {
    for (id, expected) in [
        (4u8, SectionId::Table),
        (6, SectionId::Global),
        (8, SectionId::Start),
        (9, SectionId::Element),
        (12, SectionId::DataCount),
    ] {
        let bytes = [0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00, id, 0x01, 0x00];
        let err = decode_bytes(&bytes).unwrap_err();
        match err.kind {
            ErrorKind::UnsupportedSection(got) => assert_eq!(got, expected),
            other => panic!("unexpected error for id {id}: {other:?}"),
        }
    }
}

#[test]
fn unknown_section_id() {
    // Sections: Type, then a section with id 13.
    let err = decode_fixture("unknown_section_id");
    assert!(matches!(err.kind, ErrorKind::UnknownSectionId(0x0D)));
    assert_eq!(err.section, None);
    assert_eq!(err.offset, 17);
}

#[test]
fn body_size_mismatch_for_overreported_code_entry() {
    // Sections: Type, Function, Export, Code.
    // Fixture: the add sample, with its only code body declaring one byte more than it
    // holds. The Code section size itself is correct.
    let err = decode_fixture("code_entry_size_overreported");
    match err.kind {
        ErrorKind::BodySizeMismatch { declared, consumed } => {
            assert_eq!(declared, 8);
            assert_eq!(consumed, 7);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.section, Some(SectionId::Code));
    assert_eq!(err.offset, 34);
}

#[test]
fn invalid_val_type_in_params() {
    // Sections: Type.
    // Fixture: a function type with param 0x7B (v128).
    let err = decode_fixture("type_section_invalid_valtype_marker");
    assert!(matches!(err.kind, ErrorKind::InvalidValType(0x7B)));
    assert_eq!(err.section, Some(SectionId::Type));
    assert_eq!(err.offset, 13);
}

#[test]
fn invalid_limit_kind() {
    // Sections: Memory.
    // Fixture: limits with kind byte 0x02.
    let err = decode_fixture("memory_invalid_limit_kind");
    assert!(matches!(err.kind, ErrorKind::InvalidLimitKind(0x02)));
    assert_eq!(err.section, Some(SectionId::Memory));
    assert_eq!(err.offset, 11);
}

#[test]
fn malformed_varint_for_overlong_type_index() {
    // Sections: Function.
    // Fixture: a type index encoded in 6 bytes; a u32 takes at most 5.
    let err = decode_fixture("function_section_typeidx_overlong");
    match err.kind {
        ErrorKind::MalformedVarint { width, fault } => {
            assert_eq!(width, 32);
            assert_eq!(fault, VarintFault::TooLong);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.section, Some(SectionId::Function));
    assert_eq!(err.offset, 11);
}

#[test]
fn invalid_name_for_bad_utf8() {
    // Sections: Export.
    // Fixture: export name bytes C3 28.
    let err = decode_fixture("export_name_invalid_utf8");
    assert!(matches!(err.kind, ErrorKind::InvalidName(_)));
    assert_eq!(err.offset, 11);
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn unknown_opcode_in_code_body() {
    // Sections: Code.
    // Fixture: a body holding the 0xFC prefix byte.
    let err = decode_fixture("unknown_opcode");
    assert!(matches!(err.kind, ErrorKind::UnknownOpcode(0xFC)));
    assert_eq!(err.section, Some(SectionId::Code));
    assert_eq!(err.offset, 13);
}

#[test]
fn truncated_code_section() {
    // Sections: Type, Function, Export, Code.
    // Fixture: the add sample with its last 3 bytes cut off.
    let err = decode_fixture("truncated_code_section");
    assert_eq!(err.section, Some(SectionId::Code));
}

#[test]
fn section_size_past_end_of_input() {
    // Sections: Type, declaring 100 bytes but holding 5.
    let bytes = [
        0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00, 0x01, 0x64, 0x01, 0x60, 0x00, 0x01, 0x7F,
    ];
    let err = decode_bytes(&bytes).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::SectionSizeMismatch {
            id: SectionId::Type,
            declared: 100,
            consumed: 5
        }
    ));
}
