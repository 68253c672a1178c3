/// Reference types classify first-class references to objects in the runtime store.
/// They only appear as the immediate of `ref.null`.
///
/// <https://www.w3.org/TR/wasm-core-2/#reference-types>
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum RefType {
    Func,
    Extern,
}
