//! Canonical signature text for parsed types
//!
//! Output is always fully qualified: integer widths are written out, so
//! `uint` parses to `UInt(256)` and comes back as `uint256`.

use std::fmt::{self, Write};

use super::selector::FunctionSelector;
use super::types::Type;

/// Renders types and selectors in canonical form
pub struct SignatureEncoder;

impl SignatureEncoder {
    /// Canonical text of a single type
    pub fn encode_type(ty: &Type) -> String {
        ty.to_string()
    }

    /// Canonical `name(type,...)` text of a selector
    pub fn encode_selector(selector: &FunctionSelector) -> String {
        selector.to_string()
    }

    pub fn write_type<W: Write>(out: &mut W, ty: &Type) -> fmt::Result {
        match ty {
            Type::UInt(bits) => write!(out, "uint{}", bits),
            Type::Int(bits) => write!(out, "int{}", bits),
            Type::Bool => out.write_str("bool"),
            Type::Address => out.write_str("address"),
            Type::String => out.write_str("string"),
            Type::Bytes(None) => out.write_str("bytes"),
            Type::Bytes(Some(len)) => write!(out, "bytes{}", len),
            Type::Array(inner) => {
                Self::write_type(out, inner)?;
                out.write_str("[]")
            }
            Type::FixedArray(inner, len) => {
                Self::write_type(out, inner)?;
                write!(out, "[{}]", len)
            }
            Type::Tuple(components) => {
                out.write_char('(')?;
                Self::write_type_list(out, components)?;
                out.write_char(')')
            }
        }
    }

    /// Comma-separated types without surrounding parentheses
    pub fn write_type_list<W: Write>(out: &mut W, types: &[Type]) -> fmt::Result {
        for (i, ty) in types.iter().enumerate() {
            if i > 0 {
                out.write_char(',')?;
            }
            Self::write_type(out, ty)?;
        }
        Ok(())
    }

    pub fn write_selector<W: Write>(out: &mut W, selector: &FunctionSelector) -> fmt::Result {
        out.write_str(&selector.function)?;
        out.write_char('(')?;
        Self::write_type_list(out, &selector.types)?;
        out.write_char(')')
    }
}

/// Canonical text of a single type
pub fn encode_type(ty: &Type) -> String {
    SignatureEncoder::encode_type(ty)
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        SignatureEncoder::write_type(f, self)
    }
}

impl fmt::Display for FunctionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        SignatureEncoder::write_selector(f, self)
    }
}
