//! One decoder per supported section. Each payload is a count-prefixed list of
//! items, decoded with [`decode_list`](crate::decode::decode_list).
pub mod code;
pub mod data;
pub mod export;
pub mod function;
pub mod import;
pub mod memory;
pub mod r#type;

pub use code::decode_code_section;
pub use data::decode_data_section;
pub use export::decode_export_section;
pub use function::decode_function_section;
pub use import::decode_import_section;
pub use memory::decode_memory_section;
pub use r#type::decode_type_section;
