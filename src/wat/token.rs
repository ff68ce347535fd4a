//! Token types for the WAT lexer.
//!
//! Tokens are zero-copy: they carry a kind and a byte span into the source
//! buffer, never the text itself. Consumers slice the source when they need
//! the value.

use super::cursor::Position;
use serde::Serialize;
use std::fmt;

/// A location in source text.
///
/// Spans track both byte offsets (for slicing) and the line/column of the
/// first character (for errors). Columns count Unicode characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    /// Byte offset where this span starts.
    pub start: usize,
    /// Byte offset just past the end of this span.
    pub end: usize,
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (1-indexed, counting characters not bytes).
    pub column: u32,
}

impl Span {
    /// Create a new span.
    pub fn new(start: usize, end: usize, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    /// The position of the first byte in this span.
    #[must_use]
    pub fn begin(&self) -> Position {
        Position {
            offset: self.start,
            line: self.line,
            column: self.column,
        }
    }

    /// The length of this span in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether this span is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A lexical token with its location in source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// Where in the source this token appears.
    pub span: Span,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Get the original source bytes for this token.
    ///
    /// # Example
    ///
    /// ```
    /// use watlex::wat::Lexer;
    ///
    /// let source = b"(module)";
    /// let tokens = Lexer::tokenise(source).unwrap();
    /// assert_eq!(tokens[1].text(source), b"module");
    /// ```
    #[must_use]
    pub fn text<'a>(&self, source: &'a [u8]) -> &'a [u8] {
        &source[self.span.start..self.span.end]
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.span)
    }
}

/// The kind of token.
///
/// See: <https://webassembly.github.io/spec/core/text/lexical.html#tokens>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /// Opening parenthesis `(`.
    LeftParen,

    /// Closing parenthesis `)`.
    RightParen,

    /// A lowercase-letter-led atom like `module`, `i32.add` or `offset=4`.
    Keyword,

    /// An integer without a sign, in decimal or hex, optionally separated by
    /// underscores: `10`, `1_0`, `0x0a`, `0x0_A`.
    UnsignedNumber,

    /// An integer with an explicit sign: `+10`, `-0x0_A`.
    SignedNumber,

    /// A decimal or hex float, or one of the special forms `inf`, `nan` and
    /// `nan:0x...`, with an optional sign: `1.e10`, `-0x1.fp+1_023`, `+nan`.
    FloatNumber,

    /// A `"`-delimited byte string, including the quotes.
    String,

    /// A `$`-prefixed identifier like `$main`. The span includes the `$`.
    Id,

    /// A run of identifier characters that is none of the above, like `0$y`.
    ///
    /// Kept rather than rejected so the parser can report it with context.
    Reserved,

    /// End of input. Only produced by [`Lexer::next_token`](super::Lexer::next_token).
    EndOfInput,

    /// A character that cannot start any token. Only produced by
    /// [`Lexer::next_token`](super::Lexer::next_token); the span covers the
    /// offending character.
    Illegal,
}

impl TokenKind {
    /// The short name of this kind, as used in diagnostics.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::LeftParen => "(",
            TokenKind::RightParen => ")",
            TokenKind::Keyword => "keyword",
            TokenKind::UnsignedNumber => "uN",
            TokenKind::SignedNumber => "sN",
            TokenKind::FloatNumber => "fN",
            TokenKind::String => "string",
            TokenKind::Id => "id",
            TokenKind::Reserved => "reserved",
            TokenKind::EndOfInput => "EOF",
            TokenKind::Illegal => "<illegal>",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
