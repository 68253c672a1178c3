/// Limits classify the size range of a linear memory, in units of page size. If no maximum
/// is given, the memory can grow to any size.
///
/// <https://www.w3.org/TR/wasm-core-2/#limits>
/// <https://www.w3.org/TR/wasm-core-2/#binary-limits>
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct MemoryLimits {
    pub min: u32,
    pub max: Option<u32>,
}
