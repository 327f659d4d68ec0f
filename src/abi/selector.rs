//! Function selectors and the top-level decode/encode entry points

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::encoder::SignatureEncoder;
use super::parser::SignatureParser;
use super::types::Type;
use crate::error::{ParseError, ParseResult};

/// Parsed `name(type,...)` signature
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionSelector {
    /// Function name
    pub function: String,
    /// Parameter types, in encoding order
    pub types: Vec<Type>,
    /// Return type. The one-line signature form has no syntax for it,
    /// so parsing always leaves this empty.
    #[serde(default)]
    pub returns: Option<Type>,
}

impl FunctionSelector {
    pub fn new(function: impl Into<String>, types: Vec<Type>) -> Self {
        Self {
            function: function.into(),
            types,
            returns: None,
        }
    }

    pub fn with_returns(mut self, returns: Type) -> Self {
        self.returns = Some(returns);
        self
    }

    /// Canonical signature text
    pub fn signature(&self) -> String {
        SignatureEncoder::encode_selector(self)
    }
}

impl FromStr for FunctionSelector {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}

impl FromStr for Type {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_type(s)
    }
}

/// Parse a full signature such as `bark(uint256,bool)`
pub fn decode(signature: &str) -> ParseResult<FunctionSelector> {
    SignatureParser::default().parse_selector(signature)
}

/// Parse a bare comma-separated type list such as `uint256,bool`.
/// An empty string gives an empty list.
pub fn decode_raw(types: &str) -> ParseResult<Vec<Type>> {
    SignatureParser::default().parse_type_list(types)
}

/// Parse exactly one type such as `address[][3]`
pub fn decode_type(ty: &str) -> ParseResult<Type> {
    SignatureParser::default().parse_type(ty)
}

/// Canonical signature text of `selector`
pub fn encode(selector: &FunctionSelector) -> String {
    selector.signature()
}
