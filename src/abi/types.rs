//! Type definitions for contract call signatures

use serde::{Deserialize, Serialize};

/// Default width of `uint`/`int` written without digits
pub const DEFAULT_INT_BITS: usize = 256;

/// Largest integer width the grammar accepts
pub const MAX_INT_BITS: usize = 256;

/// All parameter types a signature can name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Type {
    /// Unsigned integer of the given bit width
    #[serde(rename = "uint")]
    UInt(usize),

    /// Signed integer of the given bit width
    Int(usize),

    Bool,

    /// Account/contract identifier (20 bytes)
    Address,

    /// Dynamic UTF-8 string
    String,

    /// Dynamic `bytes` (None) or fixed `bytesN` (Some(N))
    Bytes(Option<usize>),

    /// Dynamic array T[]
    Array(Box<Type>),

    /// Fixed-size array T[N]
    FixedArray(Box<Type>, usize),

    /// Tuple (struct)
    Tuple(Vec<Type>),
}

impl Type {
    pub fn uint(bits: usize) -> Self {
        Type::UInt(bits)
    }

    pub fn int(bits: usize) -> Self {
        Type::Int(bits)
    }

    pub fn fixed_bytes(len: usize) -> Self {
        Type::Bytes(Some(len))
    }

    pub fn array(inner: Type) -> Self {
        Type::Array(Box::new(inner))
    }

    pub fn fixed_array(inner: Type, len: usize) -> Self {
        Type::FixedArray(Box::new(inner), len)
    }

    pub fn tuple(components: Vec<Type>) -> Self {
        Type::Tuple(components)
    }

    /// Check if the type is dynamic (requires offset encoding)
    ///
    /// Arrays and tuples count as dynamic whatever their contents, including
    /// fixed-length arrays of static elements. Encoders consuming these trees
    /// rely on that layout, so this is not a recursive size check.
    pub fn is_dynamic(&self) -> bool {
        match self {
            Type::String
            | Type::Bytes(None)
            | Type::Array(_)
            | Type::FixedArray(_, _)
            | Type::Tuple(_) => true,
            Type::UInt(_) | Type::Int(_) | Type::Bool | Type::Address | Type::Bytes(Some(_)) => {
                false
            }
        }
    }
}

/// Whether `ty` has a variable-length encoding
pub fn is_dynamic(ty: &Type) -> bool {
    ty.is_dynamic()
}

/// Whether `bits` is a legal `uint`/`int` width
pub fn is_valid_int_width(bits: usize) -> bool {
    bits > 0 && bits <= MAX_INT_BITS && bits % 8 == 0
}
