//! Decoders for the types that appear in section payloads.
pub(crate) mod functype;
pub(crate) mod limits;
pub(crate) mod reftype;
pub(crate) mod valtype;
