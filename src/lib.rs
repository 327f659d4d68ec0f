//! Callsig Core Library
//!
//! Parser and serializer for contract call signatures.
//!
//! # Architecture
//!
//! This crate provides:
//! - **abi**: Type model, tokenizer, parser, canonical encoder and classifier
//! - **error**: The `ParseError` raised for malformed input
//! - **utils**: Parser configuration and structured logging
//!
//! Binary encoding of call data and signature hashing live elsewhere; they
//! consume the [`Type`] trees produced here.
//!
//! # Example
//!
//! ```rust
//! use callsig::{decode, encode, Type};
//!
//! let selector = decode("growl(uint,address,string[])").unwrap();
//! assert_eq!(selector.types[0], Type::UInt(256));
//! assert_eq!(encode(&selector), "growl(uint256,address,string[])");
//! ```

pub mod abi;
pub mod error;
pub mod utils;

pub use abi::{
    decode, decode_raw, decode_type, encode, encode_type, is_dynamic, FunctionSelector,
    SignatureEncoder, SignatureParser, Type,
};
pub use error::{ParseError, ParseResult};
pub use utils::parser_config::{ConfigError, ParserConfig};
