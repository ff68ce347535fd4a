//! Lexer for WebAssembly Text Format.
//!
//! A single forward pass over a byte buffer. Comments nest by counting, never
//! by recursion, so the stack depth does not depend on the input.
//!
//! Two entry points share the same state machine:
//!
//! - [`scan`] pushes every token to a visitor and stops at the first error.
//! - [`Lexer`] pulls one token at a time, for consumers that need lookahead.
//!
//! # Example
//!
//! ```
//! use watlex::wat::{scan, LexError, TokenKind};
//!
//! let source = b"(module (func $add (param i32 i32) (result i32)))";
//! let mut keywords = Vec::new();
//! scan(source, |_, kind, _line, _column, start, end| {
//!     if kind == TokenKind::Keyword {
//!         keywords.push(&source[start..end]);
//!     }
//!     Ok::<_, LexError>(())
//! })
//! .unwrap();
//! assert_eq!(keywords.len(), 7);
//! assert_eq!(keywords[0], b"module");
//! ```

use super::classify::{is_idchar, is_whitespace};
use super::cursor::{Cursor, Position};
use super::error::{LexError, LexErrorKind};
use super::number::number_kind;
use super::token::{Span, Token, TokenKind};
use std::iter::FusedIterator;

// ============================================================================
// Push-style scanning
// ============================================================================

/// Scan `source`, calling `visit` once per token in source order.
///
/// The visitor receives the source, the token kind, the line and column of the
/// token's first character, and its half-open byte range. If the visitor
/// returns an error the scan stops immediately and returns that error as is.
/// Lexical errors are converted into `E`.
pub fn scan<E, F>(source: &[u8], mut visit: F) -> Result<(), E>
where
    F: FnMut(&[u8], TokenKind, u32, u32, usize, usize) -> Result<(), E>,
    E: From<LexError>,
{
    log::debug!("scanning {} bytes", source.len());

    let mut lexer = Lexer::new(source);
    let mut count = 0usize;
    loop {
        let token = lexer.next_token().map_err(|e| {
            log::debug!("scan failed: {}", e);
            e
        })?;
        let span = token.span;
        match token.kind {
            TokenKind::EndOfInput => break,
            TokenKind::Illegal => {
                let e = LexError::illegal(source, &token);
                log::debug!("scan failed: {}", e);
                return Err(e.into());
            }
            kind => {
                log::trace!("{} {} [{}, {})", kind, span, span.start, span.end);
                visit(source, kind, span.line, span.column, span.start, span.end)?;
                count += 1;
            }
        }
    }

    log::debug!("scanned {} tokens", count);
    Ok(())
}

// ============================================================================
// Lexer
// ============================================================================

/// Pull-style lexer for WebAssembly Text Format.
///
/// [`next_token`](Lexer::next_token) returns tokens one at a time, ending with
/// [`TokenKind::EndOfInput`]. The `Iterator` implementation instead yields
/// only real tokens and stops after the first error.
pub struct Lexer<'a> {
    source: &'a [u8],
    cursor: Cursor<'a>,
    /// The error that stopped lexing, returned again on every later call.
    error: Option<LexError>,
    failed: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source buffer.
    pub fn new(source: &'a [u8]) -> Self {
        Self {
            source,
            cursor: Cursor::new(source),
            error: None,
            failed: false,
        }
    }

    /// Tokenise the entire source, returning all tokens or the first error.
    pub fn tokenise(source: &[u8]) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        scan(source, |_, kind, line, column, start, end| {
            tokens.push(Token::new(kind, Span::new(start, end, line, column)));
            Ok::<_, LexError>(())
        })?;
        Ok(tokens)
    }

    /// The position of the next unconsumed character.
    pub fn position(&self) -> Position {
        self.cursor.position()
    }

    /// Produce the next token.
    ///
    /// At end of input this returns an empty [`TokenKind::EndOfInput`] token,
    /// and keeps doing so on later calls. A character that cannot start a
    /// token comes back as a [`TokenKind::Illegal`] token covering it, and
    /// lexing may continue after it. Unterminated comments and strings and
    /// malformed escapes are errors, and once one is returned every later
    /// call returns it again.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        if let Some(e) = self.error {
            return Err(e);
        }
        let result = self.lex_next();
        if let Err(e) = result {
            self.error = Some(e);
        }
        result
    }

    fn lex_next(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace_and_comments()?;

        let start = self.cursor.position();
        let kind = match self.cursor.peek() {
            None => TokenKind::EndOfInput,
            Some(b) => self.lex_token(b)?,
        };

        Ok(Token::new(kind, start.span_to(&self.cursor.position())))
    }

    /// Create an error at the current position.
    fn error(&self, kind: LexErrorKind) -> LexError {
        LexError::new(kind, self.cursor.position())
    }

    /// Create an error at the last character before end of input.
    fn end_of_input(&self, kind: LexErrorKind) -> LexError {
        LexError::new(kind, self.cursor.last_consumed())
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let result = self.next_token().and_then(|token| match token.kind {
            TokenKind::Illegal => Err(LexError::illegal(self.source, &token)),
            _ => Ok(token),
        });
        match result {
            Ok(token) if token.kind == TokenKind::EndOfInput => None,
            Ok(token) => Some(Ok(token)),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

impl FusedIterator for Lexer<'_> {}

// ============================================================================
// Top-level token dispatch
// ============================================================================

impl Lexer<'_> {
    /// Lex a single token starting with `first` (after whitespace/comments
    /// have been skipped).
    fn lex_token(&mut self, first: u8) -> Result<TokenKind, LexError> {
        match first {
            b'(' => {
                self.cursor.bump();
                Ok(TokenKind::LeftParen)
            }
            b')' => {
                self.cursor.bump();
                Ok(TokenKind::RightParen)
            }
            b'"' => {
                self.lex_string()?;
                Ok(TokenKind::String)
            }
            b if is_idchar(b) => {
                let start = self.cursor.position();
                self.cursor.eat_while(is_idchar);
                Ok(atom_kind(self.cursor.slice_from(&start)))
            }
            _ => {
                self.cursor.skip_char();
                Ok(TokenKind::Illegal)
            }
        }
    }
}

/// The largest Unicode code point.
const MAX_CODE_POINT: u32 = 0x10_ffff;

/// Classify a maximal run of identifier characters.
///
/// Numbers are checked before keywords since `inf` and `nan` start with a
/// lowercase letter.
fn atom_kind(text: &[u8]) -> TokenKind {
    if let [b'$', _, ..] = text {
        return TokenKind::Id;
    }
    if let Some(kind) = number_kind(text) {
        return kind;
    }
    match text.first() {
        Some(b) if b.is_ascii_lowercase() => TokenKind::Keyword,
        _ => TokenKind::Reserved,
    }
}

// ============================================================================
// Whitespace and comments
// ============================================================================

impl Lexer<'_> {
    /// Skip whitespace and comments up to the start of the next token or end
    /// of input. Fails if a block comment is still open at end of input.
    ///
    /// Non-ASCII characters are only consumed here while inside a comment.
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        let mut depth = 0usize;
        let mut line_comment = false;

        loop {
            // A line comment ends at a line terminator; block comments don't
            if self.cursor.eat_newline() {
                line_comment = false;
                continue;
            }
            let Some(b) = self.cursor.peek() else {
                break;
            };
            let second = self.cursor.peek_second();

            if line_comment {
                self.cursor.advance()?;
            } else if depth > 0 {
                match (b, second) {
                    (b'(', Some(b';')) => {
                        self.cursor.bump();
                        self.cursor.bump();
                        depth += 1;
                    }
                    (b';', Some(b')')) => {
                        self.cursor.bump();
                        self.cursor.bump();
                        depth -= 1;
                    }
                    _ => self.cursor.advance()?,
                }
            } else {
                match (b, second) {
                    (b';', Some(b';')) => {
                        self.cursor.bump();
                        self.cursor.bump();
                        line_comment = true;
                    }
                    (b'(', Some(b';')) => {
                        self.cursor.bump();
                        self.cursor.bump();
                        depth = 1;
                    }
                    // Line terminators were handled above, so this is space,
                    // tab or a lone carriage return
                    _ if is_whitespace(b) => self.cursor.bump(),
                    _ => return Ok(()),
                }
            }
        }

        if depth > 0 {
            return Err(self.end_of_input(LexErrorKind::UnterminatedBlockComment));
        }
        Ok(())
    }
}

// ============================================================================
// String literals
// ============================================================================

impl Lexer<'_> {
    /// Lex a string literal, leaving the cursor after the closing quote.
    ///
    /// Escapes are validated but not decoded.
    fn lex_string(&mut self) -> Result<(), LexError> {
        // Consume opening quote
        self.cursor.bump();

        loop {
            let Some(b) = self.cursor.peek() else {
                return Err(self.end_of_input(LexErrorKind::UnterminatedString));
            };
            match b {
                b'"' => {
                    self.cursor.bump();
                    return Ok(());
                }
                b'\\' => {
                    self.cursor.bump();
                    self.lex_escape()?;
                }
                0x00..=0x1f | 0x7f => {
                    return Err(self.error(LexErrorKind::UnexpectedCharacter(b as char)));
                }
                _ => self.cursor.advance()?,
            }
        }
    }

    /// Lex an escape sequence (after the backslash).
    fn lex_escape(&mut self) -> Result<(), LexError> {
        match self.cursor.peek() {
            Some(b't' | b'n' | b'r' | b'"' | b'\'' | b'\\') => {
                self.cursor.bump();
                Ok(())
            }
            Some(b'u') => {
                self.cursor.bump();
                self.lex_unicode_escape()
            }
            Some(b) if b.is_ascii_hexdigit() => {
                self.cursor.bump();
                self.expect_escape_byte(|b| b.is_ascii_hexdigit())
            }
            _ => Err(self.invalid_escape()),
        }
    }

    /// Lex a Unicode escape `\u{hexnum}` (after the `u`).
    fn lex_unicode_escape(&mut self) -> Result<(), LexError> {
        self.expect_escape_byte(|b| b == b'{')?;

        let digits_start = self.cursor.position();
        let mut code_point = 0u32;
        let mut first = true;
        loop {
            match (self.cursor.peek(), self.cursor.peek_second()) {
                (Some(b), _) if b.is_ascii_hexdigit() => {
                    // Past U+10FFFF the value is already invalid; keep the
                    // digits seen so far for the error.
                    if code_point <= MAX_CODE_POINT {
                        let digit = (b as char).to_digit(16).unwrap_or_default();
                        code_point = code_point * 16 + digit;
                    }
                    self.cursor.bump();
                }
                (Some(b'_'), Some(next)) if !first && next.is_ascii_hexdigit() => self.cursor.bump(),
                _ if first => return Err(self.invalid_escape()),
                _ => break,
            }
            first = false;
        }

        self.expect_escape_byte(|b| b == b'}')?;

        if char::from_u32(code_point).is_none() {
            return Err(LexError::new(
                LexErrorKind::InvalidUnicodeEscape(code_point),
                digits_start,
            ));
        }
        Ok(())
    }

    /// Consume one ASCII byte of an escape sequence matching `predicate`.
    fn expect_escape_byte(&mut self, predicate: impl Fn(u8) -> bool) -> Result<(), LexError> {
        match self.cursor.peek() {
            Some(b) if predicate(b) => {
                self.cursor.bump();
                Ok(())
            }
            _ => Err(self.invalid_escape()),
        }
    }

    /// The error for an escape sequence that cannot continue with the next
    /// character.
    fn invalid_escape(&self) -> LexError {
        match (self.cursor.peek(), self.cursor.peek_char()) {
            (None, _) => self.end_of_input(LexErrorKind::UnterminatedString),
            (_, Some(c)) => self.error(LexErrorKind::InvalidEscape(c)),
            (Some(b), None) => self.error(LexErrorKind::InvalidLeadByte(b)),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================


// ============================================================================
// Property-based tests
// ============================================================================
