use pretty_assertions::assert_eq;
use std::fs::{self, File};
use wasmdbg::core::indices::*;
use wasmdbg::core::instruction::{BlockType, Immediate, Instruction, Memarg, Opcode};
use wasmdbg::core::types::{FunctionType, MemoryLimits, ValType};
use wasmdbg::core::*;
use wasmdbg::{ErrorKind, decode_bytes, decode_module};

fn bare(opcode: Opcode) -> Instruction {
    Instruction::bare(opcode)
}

fn local_get(idx: u32) -> Instruction {
    Instruction::new(Opcode::LocalGet, Immediate::Local(LocalIdx(idx)))
}

fn i32_const(value: i32) -> Instruction {
    Instruction::new(Opcode::I32Const, Immediate::I32(value))
}

#[test]
fn it_accepts_preamble_only() {
    // Scenario: magic and version, no sections
    let module = decode_bytes(&[0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00]).unwrap();
    assert_eq!(module.version, 1);
    assert_eq!(module.sections, vec![]);
}

#[test]
fn it_accepts_empty_module() {
    // (module)
    let f = File::open("./tests/fixtures/empty.wasm").unwrap();
    assert_eq!(decode_module(f).unwrap(), Module::default());
}

#[test]
fn it_accepts_single_function_type() {
    // (module (type (func (result i32))))
    let bytes = [
        0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00, // preamble
        0x01, 0x05, 0x01, 0x60, 0x00, 0x01, 0x7F, // type section
    ];
    let module = decode_bytes(&bytes).unwrap();

    assert_eq!(
        module.sections,
        vec![Section::Type(vec![FunctionType {
            params: vec![],
            results: vec![ValType::I32],
        }])]
    );
    assert_eq!(
        module.section_headers,
        vec![SectionHeader {
            id: SectionId::Type,
            size: 5,
            offset: 10,
        }]
    );
}

#[test]
fn it_accepts_add_sample() {
    // (module
    //   (func (export "add") (param i32 i32) (result i32)
    //     local.get 0
    //     local.get 1
    //     i32.add))
    let f = File::open("./tests/fixtures/add.wasm").unwrap();

    let expected = Module {
        version: 1,
        sections: vec![
            Section::Type(vec![FunctionType {
                params: vec![ValType::I32, ValType::I32],
                results: vec![ValType::I32],
            }]),
            Section::Function(vec![TypeIdx(0)]),
            Section::Export(vec![Export {
                name: "add".to_owned(),
                target: ExportTarget::Function(FuncIdx(0)),
            }]),
            Section::Code(vec![CodeBody {
                size: 7,
                locals: vec![],
                body: vec![
                    local_get(0),
                    local_get(1),
                    bare(Opcode::I32Add),
                    bare(Opcode::End),
                ],
            }]),
        ],
        section_headers: vec![
            SectionHeader {
                id: SectionId::Type,
                size: 7,
                offset: 10,
            },
            SectionHeader {
                id: SectionId::Function,
                size: 2,
                offset: 19,
            },
            SectionHeader {
                id: SectionId::Export,
                size: 7,
                offset: 23,
            },
            SectionHeader {
                id: SectionId::Code,
                size: 9,
                offset: 32,
            },
        ],
    };

    assert_eq!(decode_module(f).unwrap(), expected);
}

#[test]
fn it_accepts_locals_memory_and_data() {
    // (module
    //   (memory (export "memory") 1 2)
    //   (func (export "run") (param i32) (result i32) (local i32 i32) (local i64)
    //     (block (result i32)
    //       local.get 0
    //       i32.const -1
    //       i32.add
    //       local.tee 1
    //       local.get 1
    //       br_if 0
    //       drop
    //       i32.const 42)
    //     i32.load offset=16)
    //   (data (i32.const 16) "hello"))
    let f = File::open("tests/fixtures/with_locals_exported.wasm").unwrap();
    let module = decode_module(f).unwrap();

    assert_eq!(
        module.types(),
        Some(
            &[FunctionType {
                params: vec![ValType::I32],
                results: vec![ValType::I32],
            }][..]
        )
    );
    assert_eq!(module.functions(), Some(&[TypeIdx(0)][..]));
    assert_eq!(
        module.memories(),
        Some(
            &[MemoryLimits {
                min: 1,
                max: Some(2)
            }][..]
        )
    );
    assert_eq!(
        module.exports().unwrap(),
        &[
            Export {
                name: "memory".to_owned(),
                target: ExportTarget::Memory(MemIdx(0)),
            },
            Export {
                name: "run".to_owned(),
                target: ExportTarget::Function(FuncIdx(0)),
            },
        ]
    );

    let code = &module.code().unwrap()[0];
    assert_eq!(code.size, 26);
    assert_eq!(
        code.locals,
        vec![
            Local {
                count: 2,
                t: ValType::I32
            },
            Local {
                count: 1,
                t: ValType::I64
            },
        ]
    );
    assert_eq!(
        code.locals_expanded().collect::<Vec<_>>(),
        vec![ValType::I32, ValType::I32, ValType::I64]
    );
    assert_eq!(
        code.body,
        vec![
            Instruction::new(
                Opcode::Block,
                Immediate::BlockType(BlockType::Value(ValType::I32))
            ),
            local_get(0),
            i32_const(-1),
            bare(Opcode::I32Add),
            Instruction::new(Opcode::LocalTee, Immediate::Local(LocalIdx(1))),
            local_get(1),
            Instruction::new(Opcode::BrIf, Immediate::Label(LabelIdx(0))),
            bare(Opcode::Drop),
            i32_const(42),
            bare(Opcode::End),
            Instruction::new(
                Opcode::I32Load,
                Immediate::Memarg(Memarg {
                    align: 2,
                    offset: 16
                })
            ),
            bare(Opcode::End),
        ]
    );

    assert_eq!(
        module.data().unwrap(),
        &[DataSegment {
            memory: MemIdx(0),
            offset: vec![i32_const(16), bare(Opcode::End)],
            init: b"hello".to_vec(),
        }]
    );

    let ids: Vec<_> = module.section_headers.iter().map(|h| h.id).collect();
    assert_eq!(
        ids,
        vec![
            SectionId::Type,
            SectionId::Function,
            SectionId::Memory,
            SectionId::Export,
            SectionId::Code,
            SectionId::Data,
        ]
    );
    assert_eq!(module.section_headers[5].offset, 76);
}

#[test]
fn it_accepts_zero_size_sections() {
    let f = File::open("tests/fixtures/zero_size_sections.wasm").unwrap();
    let module = decode_module(f).unwrap();

    assert_eq!(module.sections[0], Section::Type(vec![]));
    assert_eq!(module.sections[1], Section::Data(vec![]));
    assert_eq!(module.section_headers[0].size, 0);

    let code = module.code().unwrap();
    assert_eq!(code.len(), 2);
    assert_eq!(code[1].body, vec![i32_const(7), bare(Opcode::End)]);
}

#[test]
fn decoding_is_idempotent() {
    for path in [
        "tests/fixtures/add.wasm",
        "tests/fixtures/with_locals_exported.wasm",
        "tests/fixtures/zero_size_sections.wasm",
    ] {
        let bytes = fs::read(path).unwrap();
        let first = decode_bytes(&bytes).unwrap();
        let second = decode_bytes(&bytes).unwrap();
        assert_eq!(first, second, "{path}");
        assert_eq!(first, decode_module(File::open(path).unwrap()).unwrap());
    }
}

#[test]
fn mutated_section_sizes_are_rejected() {
    for path in [
        "tests/fixtures/add.wasm",
        "tests/fixtures/with_locals_exported.wasm",
    ] {
        let bytes = fs::read(path).unwrap();
        let module = decode_bytes(&bytes).unwrap();

        for header in &module.section_headers {
            // every size in these fixtures fits in a single LEB128 byte
            let size_at = header.offset as usize - 1;
            for delta in [1i8, -1] {
                let mut mutated = bytes.clone();
                mutated[size_at] = mutated[size_at].wrapping_add_signed(delta);

                let err = decode_bytes(&mutated).unwrap_err();
                assert!(
                    matches!(
                        err.kind,
                        ErrorKind::SectionSizeMismatch { .. } | ErrorKind::BodySizeMismatch { .. }
                    ),
                    "{path}: {} section size {delta:+}: {err}",
                    header.id
                );
                assert_eq!(err.section, Some(header.id));
            }
        }
    }
}

#[test]
fn it_reads_from_current_position_of_source() {
    let mut bytes = b"junk".to_vec();
    bytes.extend(fs::read("tests/fixtures/add.wasm").unwrap());

    let mut source = std::io::Cursor::new(bytes);
    source.set_position(4);

    let module = decode_module(source).unwrap();
    assert_eq!(module.section_headers[0].offset, 10);
    assert_eq!(module.sections.len(), 4);
}
