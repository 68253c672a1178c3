pub mod functype;
pub mod limits;
pub mod reftype;
pub mod valtype;

pub use functype::FunctionType;
pub use limits::MemoryLimits;
pub use reftype::RefType;
pub use valtype::ValType;
