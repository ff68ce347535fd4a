//! Error types for WAT lexing.

use super::cursor::Position;
use super::token::{Span, Token};
use thiserror::Error;

/// What went wrong during lexical analysis.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    /// A byte that cannot begin a UTF-8 sequence, or a sequence cut short by
    /// end of input.
    #[error("unexpected character {0:#04x}")]
    InvalidLeadByte(u8),

    /// A multi-byte character outside a comment or string.
    #[error("expected an ASCII character, not {0}")]
    DisallowedNonAscii(char),

    #[error("expected block comment end ';)'")]
    UnterminatedBlockComment,

    #[error("expected string end '\"'")]
    UnterminatedString,

    /// A byte that does not begin any token, or a control character in a string.
    #[error("unexpected character {}", .0.escape_debug())]
    UnexpectedCharacter(char),

    #[error("invalid escape {}", .0.escape_debug())]
    InvalidEscape(char),

    /// A `\u{...}` escape whose value is not a Unicode scalar value.
    #[error("invalid unicode escape U+{0:X}")]
    InvalidUnicodeEscape(u32),
}

/// An error encountered during lexical analysis.
///
/// Displays as `<line>:<column> <reason>`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{}:{} {kind}", .position.line, .position.column)]
#[must_use]
pub struct LexError {
    /// What went wrong.
    pub kind: LexErrorKind,
    /// Where in the source it went wrong.
    pub position: Position,
}

impl LexError {
    /// Create a new lexer error.
    pub fn new(kind: LexErrorKind, position: Position) -> Self {
        Self { kind, position }
    }

    /// A zero-length span at the error position.
    #[must_use]
    pub fn span(&self) -> Span {
        self.position.span_here()
    }

    /// The error describing an [`Illegal`](super::TokenKind::Illegal) token.
    pub(crate) fn illegal(source: &[u8], token: &Token) -> Self {
        let bytes = token.text(source);
        let kind = match bytes {
            [b] if b.is_ascii() => LexErrorKind::UnexpectedCharacter(*b as char),
            _ => match std::str::from_utf8(bytes).ok().and_then(|s| s.chars().next()) {
                Some(c) => LexErrorKind::DisallowedNonAscii(c),
                None => LexErrorKind::InvalidLeadByte(bytes.first().copied().unwrap_or_default()),
            },
        };
        Self::new(kind, token.span.begin())
    }
}
