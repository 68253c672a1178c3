use std::fmt;

/// Value types classify the individual values that WebAssembly code can compute with and
/// the values that a variable accepts.
///
/// Only the four number types are recognized; vector and reference value types are
/// rejected when decoding.
///
/// <https://www.w3.org/TR/wasm-core-2/#value-types>
/// <https://www.w3.org/TR/wasm-core-2/#binary-valtype>
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum ValType {
    I32,
    I64,
    F32,
    F64,
}

impl fmt::Display for ValType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValType::I32 => "i32",
            ValType::I64 => "i64",
            ValType::F32 => "f32",
            ValType::F64 => "f64",
        })
    }
}
