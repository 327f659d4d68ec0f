//! Recursive-descent parser for call signatures
//!
//! Grammar:
//!
//! ```text
//! selector     := identifier "(" type_list ")"
//! type_list    := [] | type ("," type)*
//! type         := base array_suffix*
//! base         := "uint" digits? | "int" digits? | "bool" | "address"
//!               | "string" | "bytes" digits? | "(" type_list ")"
//! array_suffix := "[" digits? "]"
//! ```
//!
//! One token of lookahead is enough for every decision; nothing backtracks.

use std::iter::Peekable;

use super::lexer::{Lexer, Token, TokenKind};
use super::selector::FunctionSelector;
use super::types::{is_valid_int_width, Type, DEFAULT_INT_BITS};
use crate::error::{ParseError, ParseResult};
use crate::log_debug;
use crate::utils::logging::{self, LogEntry, LogLevel};
use crate::utils::parser_config::ParserConfig;

const MODULE: &str = "abi::parser";

/// Parser for signatures, type lists and single types
#[derive(Debug, Clone, Default)]
pub struct SignatureParser {
    config: ParserConfig,
}

impl SignatureParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse `name(type,...)`
    pub fn parse_selector(&self, input: &str) -> ParseResult<FunctionSelector> {
        self.run(input, "decode", |p| p.selector())
    }

    /// Parse `type,type,...` as the members of an implicit tuple.
    /// Empty input is the zero-member tuple.
    pub fn parse_type_list(&self, input: &str) -> ParseResult<Vec<Type>> {
        self.run(input, "decode_raw", |p| p.raw_type_list())
    }

    /// Parse exactly one type
    pub fn parse_type(&self, input: &str) -> ParseResult<Type> {
        self.run(input, "decode_type", |p| p.ty())
    }

    fn run<T>(
        &self,
        input: &str,
        mode: &'static str,
        production: impl FnOnce(&mut Parser<'_>) -> ParseResult<T>,
    ) -> ParseResult<T> {
        let result = self.check_length(input).and_then(|_| {
            let mut parser = Parser::new(input, self.config.max_depth);
            let value = production(&mut parser)?;
            parser.finish()?;
            Ok(value)
        });

        if let Err(ref err) = result {
            if logging::is_debug_enabled() {
                failure_entry(mode, input, err).log();
            }
        }
        result
    }

    fn check_length(&self, input: &str) -> ParseResult<()> {
        if input.len() > self.config.max_input_len {
            return Err(ParseError::InputTooLong {
                length: input.len(),
                limit: self.config.max_input_len,
            });
        }
        Ok(())
    }
}

struct Parser<'a> {
    input: &'a str,
    tokens: Peekable<Lexer<'a>>,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, max_depth: usize) -> Self {
        Self {
            input,
            tokens: Lexer::new(input).peekable(),
            depth: 0,
            max_depth,
        }
    }

    fn selector(&mut self) -> ParseResult<FunctionSelector> {
        let name = match self.tokens.next() {
            Some(t) if t.kind == TokenKind::Word => t.text,
            Some(t) => {
                return Err(ParseError::InvalidIdentifier {
                    found: t.text.to_string(),
                    position: t.position,
                })
            }
            None => {
                return Err(ParseError::InvalidIdentifier {
                    found: String::new(),
                    position: 0,
                })
            }
        };

        let open = self.expect(TokenKind::LeftParen, "'('")?;
        let types = self.tuple_body(open.position)?;
        Ok(FunctionSelector::new(name, types))
    }

    fn raw_type_list(&mut self) -> ParseResult<Vec<Type>> {
        if self.tokens.peek().is_none() {
            return Ok(Vec::new());
        }

        self.enter(0)?;
        let mut types = vec![self.ty()?];
        while self.peek_kind() == Some(TokenKind::Comma) {
            self.tokens.next();
            types.push(self.ty()?);
        }
        self.depth -= 1;
        Ok(types)
    }

    /// Members of a parenthesised list; the `(` at `open` is already consumed
    fn tuple_body(&mut self, open: usize) -> ParseResult<Vec<Type>> {
        self.enter(open)?;

        let mut types = Vec::new();
        if self.peek_kind() == Some(TokenKind::RightParen) {
            self.tokens.next();
        } else {
            loop {
                types.push(self.ty()?);
                match self.tokens.next() {
                    Some(t) if t.kind == TokenKind::Comma => continue,
                    Some(t) if t.kind == TokenKind::RightParen => break,
                    Some(t) => return Err(unexpected(&t, "',' or ')'")),
                    None => return Err(ParseError::UnexpectedEnd { expected: "',' or ')'" }),
                }
            }
        }

        self.depth -= 1;
        Ok(types)
    }

    fn ty(&mut self) -> ParseResult<Type> {
        let base = self.base()?;

        // Each suffix wraps the tree one level deeper
        let mut suffixes = Vec::new();
        while let Some(open) = self.tokens.next_if(|t| t.kind == TokenKind::LeftBracket) {
            self.enter(open.position)?;
            suffixes.push(self.array_suffix()?);
        }
        self.depth -= suffixes.len();

        // The suffix written nearest the base binds tightest
        Ok(suffixes.into_iter().fold(base, |inner, suffix| match suffix {
            None => Type::array(inner),
            Some(len) => Type::fixed_array(inner, len),
        }))
    }

    fn base(&mut self) -> ParseResult<Type> {
        let token = self
            .tokens
            .next()
            .ok_or(ParseError::UnexpectedEnd { expected: "type" })?;

        match token.kind {
            TokenKind::LeftParen => Ok(Type::Tuple(self.tuple_body(token.position)?)),
            TokenKind::Word => elementary(&token),
            _ => Err(unexpected(&token, "type")),
        }
    }

    /// Length of one `[...]` suffix; the `[` is already consumed
    fn array_suffix(&mut self) -> ParseResult<Option<usize>> {
        match self.tokens.next() {
            Some(t) if t.kind == TokenKind::RightBracket => Ok(None),
            Some(t) if t.kind == TokenKind::Number => {
                let len = parse_number(t.text, t.position)?;
                self.expect(TokenKind::RightBracket, "']'")?;
                Ok(Some(len))
            }
            Some(t) => Err(unexpected(&t, "array length or ']'")),
            None => Err(ParseError::UnexpectedEnd {
                expected: "array length or ']'",
            }),
        }
    }

    fn enter(&mut self, position: usize) -> ParseResult<()> {
        if self.depth >= self.max_depth {
            log_debug!(MODULE, "depth limit hit", limit = self.max_depth, position = position);
            return Err(ParseError::DepthLimitExceeded {
                limit: self.max_depth,
                position,
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn peek_kind(&mut self) -> Option<TokenKind> {
        self.tokens.peek().map(|t| t.kind)
    }

    fn expect(&mut self, kind: TokenKind, expected: &'static str) -> ParseResult<Token<'a>> {
        match self.tokens.next() {
            Some(t) if t.kind == kind => Ok(t),
            Some(t) => Err(unexpected(&t, expected)),
            None => Err(ParseError::UnexpectedEnd { expected }),
        }
    }

    fn finish(&mut self) -> ParseResult<()> {
        match self.tokens.peek() {
            None => Ok(()),
            Some(t) => Err(ParseError::TrailingInput {
                remainder: self.input[t.position..].to_string(),
                position: t.position,
            }),
        }
    }
}

/// Debug entry describing a failed parse
fn failure_entry(mode: &'static str, input: &str, err: &ParseError) -> LogEntry {
    let position = err
        .position()
        .map_or_else(|| "end".to_string(), |p| p.to_string());

    LogEntry::new(LogLevel::Debug, MODULE, "parse failed")
        .field("mode", mode)
        .field("position", position)
        .field("input", input)
        .field("error", err)
}

/// Resolve a keyword such as `uint`, `bytes32` or `address`
fn elementary(token: &Token<'_>) -> ParseResult<Type> {
    let name = token.text.trim_end_matches(|c: char| c.is_ascii_digit());
    let digits = &token.text[name.len()..];
    let digits_at = token.position + name.len();

    match (name, digits.is_empty()) {
        ("uint", _) => Ok(Type::UInt(int_width(digits, digits_at)?)),
        ("int", _) => Ok(Type::Int(int_width(digits, digits_at)?)),
        ("bytes", true) => Ok(Type::Bytes(None)),
        ("bytes", false) => Ok(Type::Bytes(Some(parse_number(digits, digits_at)?))),
        ("bool", true) => Ok(Type::Bool),
        ("address", true) => Ok(Type::Address),
        ("string", true) => Ok(Type::String),
        _ => Err(ParseError::UnknownType {
            name: token.text.to_string(),
            position: token.position,
        }),
    }
}

fn int_width(digits: &str, position: usize) -> ParseResult<usize> {
    if digits.is_empty() {
        return Ok(DEFAULT_INT_BITS);
    }

    let bits = parse_number(digits, position)?;
    if !is_valid_int_width(bits) {
        return Err(ParseError::InvalidWidth { bits, position });
    }
    Ok(bits)
}

fn parse_number(digits: &str, position: usize) -> ParseResult<usize> {
    digits.parse().map_err(|_| ParseError::InvalidNumber {
        digits: digits.to_string(),
        position,
    })
}

fn unexpected(token: &Token<'_>, expected: &'static str) -> ParseError {
    ParseError::UnexpectedToken {
        found: token.text.to_string(),
        position: token.position,
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_type(s: &str) -> ParseResult<Type> {
        SignatureParser::default().parse_type(s)
    }

    #[test]
    fn test_elementary_types() {
        assert_eq!(parse_type("uint256").unwrap(), Type::UInt(256));
        assert_eq!(parse_type("uint8").unwrap(), Type::UInt(8));
        assert_eq!(parse_type("uint").unwrap(), Type::UInt(256));
        assert_eq!(parse_type("int").unwrap(), Type::Int(256));
        assert_eq!(parse_type("int64").unwrap(), Type::Int(64));
        assert_eq!(parse_type("bool").unwrap(), Type::Bool);
        assert_eq!(parse_type("address").unwrap(), Type::Address);
        assert_eq!(parse_type("string").unwrap(), Type::String);
        assert_eq!(parse_type("bytes").unwrap(), Type::Bytes(None));
        assert_eq!(parse_type("bytes32").unwrap(), Type::Bytes(Some(32)));
    }

    #[test]
    fn test_unknown_types() {
        for input in ["foo", "bool8", "address20", "uint2x", "Uint256", "strings"] {
            assert!(
                matches!(parse_type(input), Err(ParseError::UnknownType { .. })),
                "{} should be unknown",
                input
            );
        }
    }

    #[test]
    fn test_invalid_widths() {
        assert_eq!(
            parse_type("uint7"),
            Err(ParseError::InvalidWidth { bits: 7, position: 4 })
        );
        assert!(matches!(
            parse_type("int264"),
            Err(ParseError::InvalidWidth { bits: 264, .. })
        ));
        assert!(matches!(
            parse_type("uint0"),
            Err(ParseError::InvalidWidth { bits: 0, .. })
        ));
    }

    #[test]
    fn test_number_overflow() {
        let huge = "99999999999999999999999999999";
        assert!(matches!(
            parse_type(&format!("bool[{}]", huge)),
            Err(ParseError::InvalidNumber { position: 5, .. })
        ));
        assert!(matches!(
            parse_type(&format!("bytes{}", huge)),
            Err(ParseError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_suffix_order() {
        assert_eq!(
            parse_type("address[][3]").unwrap(),
            Type::fixed_array(Type::array(Type::Address), 3)
        );
        assert_eq!(
            parse_type("bool[2][]").unwrap(),
            Type::array(Type::fixed_array(Type::Bool, 2))
        );
        assert_eq!(
            parse_type("uint8[0]").unwrap(),
            Type::fixed_array(Type::UInt(8), 0)
        );
    }

    #[test]
    fn test_tuples() {
        assert_eq!(parse_type("()").unwrap(), Type::Tuple(vec![]));
        assert_eq!(
            parse_type("(bool)").unwrap(),
            Type::Tuple(vec![Type::Bool])
        );
        assert_eq!(
            parse_type("(uint,(string[],bytes4))[]").unwrap(),
            Type::array(Type::Tuple(vec![
                Type::UInt(256),
                Type::Tuple(vec![Type::array(Type::String), Type::Bytes(Some(4))]),
            ]))
        );
    }

    #[test]
    fn test_malformed_brackets() {
        assert!(matches!(
            parse_type("bool["),
            Err(ParseError::UnexpectedEnd { .. })
        ));
        assert!(matches!(
            parse_type("bool[2"),
            Err(ParseError::UnexpectedEnd { expected: "']'" })
        ));
        assert!(matches!(
            parse_type("bool[x]"),
            Err(ParseError::UnexpectedToken { .. })
        ));
        assert!(matches!(
            parse_type("bool]"),
            Err(ParseError::TrailingInput { position: 4, .. })
        ));
    }

    #[test]
    fn test_single_type_rejects_lists() {
        assert_eq!(
            parse_type("bool,address"),
            Err(ParseError::TrailingInput {
                remainder: ",address".to_string(),
                position: 4,
            })
        );
        assert!(matches!(
            parse_type(""),
            Err(ParseError::UnexpectedEnd { expected: "type" })
        ));
    }

    #[test]
    fn test_whitespace_rejected() {
        assert!(parse_type(" bool").is_err());
        assert!(parse_type("(bool, address)").is_err());
        assert!(SignatureParser::default()
            .parse_selector("bark (bool)")
            .is_err());
    }

    #[test]
    fn test_selector_identifiers() {
        let parser = SignatureParser::default();
        let sel = parser.parse_selector("set_owner2(address)").unwrap();
        assert_eq!(sel.function, "set_owner2");

        assert!(matches!(
            parser.parse_selector("(bool)"),
            Err(ParseError::InvalidIdentifier { position: 0, .. })
        ));
        assert!(matches!(
            parser.parse_selector("2fast()"),
            Err(ParseError::InvalidIdentifier { .. })
        ));
        assert!(matches!(
            parser.parse_selector(""),
            Err(ParseError::InvalidIdentifier { .. })
        ));
        assert!(matches!(
            parser.parse_selector("bark"),
            Err(ParseError::UnexpectedEnd { expected: "'('" })
        ));
    }

    #[test]
    fn test_selector_trailing_comma() {
        let parser = SignatureParser::default();
        assert!(matches!(
            parser.parse_selector("bark(bool,)"),
            Err(ParseError::UnexpectedToken { position: 10, .. })
        ));
    }

    #[test]
    fn test_type_list() {
        let parser = SignatureParser::default();
        assert_eq!(parser.parse_type_list("").unwrap(), Vec::<Type>::new());
        assert_eq!(
            parser.parse_type_list("uint,bool[]").unwrap(),
            vec![Type::UInt(256), Type::array(Type::Bool)]
        );
        assert!(parser.parse_type_list(",").is_err());
        assert!(parser.parse_type_list("bool,").is_err());
        assert!(matches!(
            parser.parse_type_list("bool)"),
            Err(ParseError::TrailingInput { .. })
        ));
    }

    #[test]
    fn test_depth_limit() {
        let parser = SignatureParser::new(ParserConfig::default().with_max_depth(3));
        assert!(parser.parse_type("((()))").is_ok());
        assert_eq!(
            parser.parse_type("(((())))"),
            Err(ParseError::DepthLimitExceeded { limit: 3, position: 3 })
        );

        // The parameter list itself counts as one level
        assert!(parser.parse_selector("f((()))").is_ok());
        assert!(matches!(
            parser.parse_selector("f(((())))"),
            Err(ParseError::DepthLimitExceeded { position: 4, .. })
        ));
    }

    #[test]
    fn test_deep_nesting_fails_cleanly() {
        let deep = format!("{}{}", "(".repeat(100_000), ")".repeat(100_000));
        let parser = SignatureParser::new(ParserConfig::default().with_max_input_len(usize::MAX));
        assert!(matches!(
            parser.parse_type(&deep),
            Err(ParseError::DepthLimitExceeded { .. })
        ));
    }

    #[test]
    fn test_array_suffixes_count_as_depth() {
        let parser = SignatureParser::new(ParserConfig::default().with_max_depth(3));
        assert!(parser.parse_type("bool[][2][]").is_ok());
        assert_eq!(
            parser.parse_type("bool[][][][]"),
            Err(ParseError::DepthLimitExceeded { limit: 3, position: 10 })
        );
        assert!(parser.parse_type("(bool[])[]").is_ok());
        assert!(parser.parse_type("((bool[]))").is_ok());
        assert!(parser.parse_type("(((bool[])))").is_err());

        assert!(parser.parse_selector("f(bool[][],uint8[4][])").is_ok());
        assert!(matches!(
            parser.parse_selector("f(bool[][][])"),
            Err(ParseError::DepthLimitExceeded { .. })
        ));
    }

    #[test]
    fn test_long_suffix_chains_fail_cleanly() {
        let parser = SignatureParser::default();

        let chain = format!("bool{}", "[]".repeat(32_000));
        assert!(matches!(
            parser.parse_type(&chain),
            Err(ParseError::DepthLimitExceeded { limit: 128, .. })
        ));
        assert!(matches!(
            parser.parse_selector(&format!("f({})", chain)),
            Err(ParseError::DepthLimitExceeded { .. })
        ));

        let mixed = format!("{}bool{}", "(".repeat(10_000), "[])".repeat(10_000));
        assert!(matches!(
            parser.parse_type(&mixed),
            Err(ParseError::DepthLimitExceeded { .. })
        ));
    }

    #[test]
    fn test_failure_entry_fields() {
        let err = SignatureParser::default()
            .parse_selector("bark(uint7)")
            .unwrap_err();
        let rendered = failure_entry("decode", "bark(uint7)", &err).render();
        assert!(rendered.starts_with("DEBUG [abi::parser] parse failed | mode=decode position=9 input=bark(uint7) error="));

        let err = ParseError::UnexpectedEnd { expected: "type" };
        let rendered = failure_entry("decode_type", "", &err).render();
        assert!(rendered.contains("position=end"));
    }

    #[test]
    fn test_input_length_limit() {
        let parser = SignatureParser::new(ParserConfig::default().with_max_input_len(8));
        assert!(parser.parse_type("uint256").is_ok());
        assert_eq!(
            parser.parse_selector("bark(uint256)"),
            Err(ParseError::InputTooLong { length: 13, limit: 8 })
        );
    }
}
