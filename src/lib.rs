//! A decoder for WebAssembly modules in the binary format, for inspecting and
//! debugging compiled modules.
//!
//! The Type, Function, Memory, Export, Code and Data sections are decoded into a
//! [`Module`](crate::core::Module). Import sections are recognized and rejected;
//! other sections are not supported. Decoded code is neither validated nor executed.
//!
//! The main entry points are [`decode_module()`] and [`decode_bytes()`].
//!
//! ```
//! let bytes = b"\0asm\x01\0\0\0";
//! let module = wasmdbg::decode_bytes(bytes).unwrap();
//! assert_eq!(module.version, 1);
//! assert!(module.sections.is_empty());
//! ```
//!
//! <https://www.w3.org/TR/wasm-core-2/#binary-format>
#![forbid(unsafe_code)]

pub mod core;
pub mod decode;
mod error;

pub use crate::decode::{decode_bytes, decode_module};
pub use crate::error::{DecodeError, ErrorKind, VarintFault};
