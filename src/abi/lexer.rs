//! Tokenizer for signature text

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Letter followed by letters, digits or `_`
    Word,
    /// Run of decimal digits
    Number,
    Comma,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    /// Any character outside the grammar
    Unknown,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Word => "word",
            TokenKind::Number => "number",
            TokenKind::Comma => "','",
            TokenKind::LeftParen => "'('",
            TokenKind::RightParen => "')'",
            TokenKind::LeftBracket => "'['",
            TokenKind::RightBracket => "']'",
            TokenKind::Unknown => "unknown character",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// Byte offset of the first character
    pub position: usize,
}

/// Splits signature text into tokens. Whitespace is not part of the
/// grammar and comes out as `Unknown`.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    source: &'a str,
    current: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, current: 0 }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> usize {
        let start = self.current;
        let len = self.source[start..]
            .char_indices()
            .find(|&(_, c)| !pred(c))
            .map(|(i, _)| i)
            .unwrap_or(self.source.len() - start);
        self.current = start + len;
        self.current
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.current;
        let c = self.source[start..].chars().next()?;

        let kind = match c {
            ',' => TokenKind::Comma,
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            c if c.is_ascii_alphabetic() => {
                let end = self.take_while(|c| c.is_ascii_alphanumeric() || c == '_');
                return Some(Token {
                    kind: TokenKind::Word,
                    text: &self.source[start..end],
                    position: start,
                });
            }
            c if c.is_ascii_digit() => {
                let end = self.take_while(|c| c.is_ascii_digit());
                return Some(Token {
                    kind: TokenKind::Number,
                    text: &self.source[start..end],
                    position: start,
                });
            }
            _ => TokenKind::Unknown,
        };

        self.current = start + c.len_utf8();
        Some(Token {
            kind,
            text: &self.source[start..self.current],
            position: start,
        })
    }
}
