//! Utilities Module
//!
//! Configuration and logging shared by the library and the CLI.

pub mod logging;
pub mod parser_config;

pub use parser_config::*;
