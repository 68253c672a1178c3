use super::valtype::ValType;
use std::fmt;

/// Function types classify the signature of functions, mapping a vector of parameters to a
/// vector of results.
///
/// <https://www.w3.org/TR/wasm-core-2/#function-types>
/// <https://www.w3.org/TR/wasm-core-2/#binary-functype>
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct FunctionType {
    pub params: Vec<ValType>,
    pub results: Vec<ValType>,
}

impl fmt::Display for FunctionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn list(f: &mut fmt::Formatter<'_>, types: &[ValType]) -> fmt::Result {
            f.write_str("(")?;
            for (i, t) in types.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{t}")?;
            }
            f.write_str(")")
        }

        list(f, &self.params)?;
        f.write_str(" -> ")?;
        list(f, &self.results)
    }
}
