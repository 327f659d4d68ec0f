//! Contract call signatures
//!
//! This module parses and renders signatures of the form `name(type,...)`:
//! - All parameter types (uint, int, address, bool, bytes, string, arrays, tuples)
//! - Selector, bare type-list and single-type entry points
//! - Canonical text output
//! - Dynamic/static classification for encoders

pub mod types;
pub mod lexer;
pub mod parser;
pub mod encoder;
pub mod selector;


pub use types::*;
pub use parser::*;
pub use encoder::*;
pub use selector::*;
