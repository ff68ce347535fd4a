//! Byte-level cursor for navigating WAT source buffers.
//!
//! The cursor walks the buffer forward only, tracking byte offset, line and
//! column for accurate error reporting. Line terminators are `\n` and the
//! `\r\n` pair; a lone `\r` is ordinary whitespace.

use super::error::{LexError, LexErrorKind};
use super::token::Span;
use serde::Serialize;

/// A saved position in source text.
///
/// Used to mark a position before consuming a token, allowing spans to be
/// created that cover the consumed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    /// Byte offset from start of source.
    pub offset: usize,
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (1-indexed, counts characters).
    pub column: u32,
}

impl Position {
    /// Create a span from this position to another position.
    #[must_use]
    pub fn span_to(self, end: &Position) -> Span {
        Span::new(self.offset, end.offset, self.line, self.column)
    }

    /// Create a zero-length span at this position.
    #[must_use]
    pub fn span_here(self) -> Span {
        Span::new(self.offset, self.offset, self.line, self.column)
    }
}

/// Byte length of the UTF-8 sequence introduced by `lead`, or `None` if
/// `lead` cannot begin a sequence.
pub(crate) fn utf8_len(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7f => Some(1),
        0xc2..=0xdf => Some(2),
        0xe0..=0xef => Some(3),
        0xf0..=0xf4 => Some(4),
        _ => None,
    }
}

/// A cursor for navigating a byte buffer character by character.
///
/// Columns count characters (a multi-byte UTF-8 sequence is one step).
pub struct Cursor<'a> {
    /// The complete source buffer.
    source: &'a [u8],
    /// Current byte offset from start of source.
    offset: usize,
    /// Current line number (1-indexed).
    line: u32,
    /// Column of the next character (1-indexed).
    column: u32,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at the start of the source buffer.
    pub fn new(source: &'a [u8]) -> Self {
        Self {
            source,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Get the current position.
    pub fn position(&self) -> Position {
        Position {
            offset: self.offset,
            line: self.line,
            column: self.column,
        }
    }

    /// The position of the last consumed character.
    ///
    /// Used for errors detected at end of input. Directly after a line
    /// terminator this reports column 0.
    pub fn last_consumed(&self) -> Position {
        Position {
            offset: self.offset,
            line: self.line,
            column: self.column - 1,
        }
    }

    /// Whether we've reached the end of input.
    pub fn is_eof(&self) -> bool {
        self.offset >= self.source.len()
    }

    /// Peek at the next byte without consuming it.
    pub fn peek(&self) -> Option<u8> {
        self.source.get(self.offset).copied()
    }

    /// Peek at the byte after the next one.
    pub fn peek_second(&self) -> Option<u8> {
        self.source.get(self.offset + 1).copied()
    }

    /// Decode the next character, if it is well-formed UTF-8.
    pub fn peek_char(&self) -> Option<char> {
        let len = utf8_len(self.peek()?)?;
        let bytes = self.source.get(self.offset..self.offset + len)?;
        std::str::from_utf8(bytes).ok()?.chars().next()
    }

    /// Byte length of the next character.
    ///
    /// Fails with [`LexErrorKind::InvalidLeadByte`] when the next byte cannot
    /// begin a UTF-8 sequence or the sequence runs past the end of input.
    /// Continuation bytes are not checked.
    pub fn char_len(&self) -> Result<usize, LexError> {
        let Some(lead) = self.peek() else {
            return Ok(0);
        };
        match utf8_len(lead) {
            Some(len) if self.offset + len <= self.source.len() => Ok(len),
            _ => Err(LexError::new(LexErrorKind::InvalidLeadByte(lead), self.position())),
        }
    }

    /// Consume a line terminator if one is next.
    ///
    /// Returns whether a terminator was consumed.
    pub fn eat_newline(&mut self) -> bool {
        let len = match (self.peek(), self.peek_second()) {
            (Some(b'\n'), _) => 1,
            (Some(b'\r'), Some(b'\n')) => 2,
            _ => return false,
        };
        self.offset += len;
        self.line += 1;
        self.column = 1;
        true
    }

    /// Consume one single-byte character on the current line.
    pub fn bump(&mut self) {
        if !self.is_eof() {
            self.offset += 1;
            self.column += 1;
        }
    }

    /// Consume the next character, whatever its encoded length.
    ///
    /// Line terminators update the line count.
    pub fn advance(&mut self) -> Result<(), LexError> {
        if self.eat_newline() {
            return Ok(());
        }
        let len = self.char_len()?;
        if len > 0 {
            self.offset += len;
            self.column += 1;
        }
        Ok(())
    }

    /// Consume the next character as one column without validating it.
    ///
    /// Malformed UTF-8 is consumed one byte at a time.
    pub fn skip_char(&mut self) {
        if self.is_eof() {
            return;
        }
        self.offset += self.peek_char().map_or(1, char::len_utf8);
        self.column += 1;
    }

    /// Consume ASCII bytes while the predicate returns true.
    ///
    /// The predicate must reject line feeds and non-ASCII bytes.
    pub fn eat_while(&mut self, predicate: impl Fn(u8) -> bool) {
        while let Some(b) = self.peek() {
            if !predicate(b) {
                break;
            }
            self.bump();
        }
    }

    /// Extract a slice from a position to the current position.
    pub fn slice_from(&self, start: &Position) -> &'a [u8] {
        &self.source[start.offset..self.offset]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cursor_starts_at_beginning() {
        let cursor = Cursor::new(b"hello");
        let pos = cursor.position();
        assert_eq!(pos.offset, 0);
        assert_eq!(pos.line, 1);
        assert_eq!(pos.column, 1);
        assert!(!cursor.is_eof());
    }

    #[test]
    fn empty_source() {
        let cursor = Cursor::new(b"");
        assert!(cursor.is_eof());
        assert_eq!(cursor.peek(), None);
        assert_eq!(cursor.char_len().unwrap(), 0);
    }

    #[test]
    fn peek_does_not_advance() {
        let cursor = Cursor::new(b"ab");
        assert_eq!(cursor.peek(), Some(b'a'));
        assert_eq!(cursor.peek(), Some(b'a'));
        assert_eq!(cursor.peek_second(), Some(b'b'));
        assert_eq!(cursor.position().offset, 0);
    }

    #[test]
    fn advance_moves_position() {
        let mut cursor = Cursor::new(b"abc");

        cursor.advance().unwrap();
        assert_eq!(cursor.position().offset, 1);
        assert_eq!(cursor.position().column, 2);

        cursor.advance().unwrap();
        cursor.advance().unwrap();
        assert_eq!(cursor.position().offset, 3);
        assert_eq!(cursor.position().column, 4);
        assert!(cursor.is_eof());

        cursor.advance().unwrap();
        assert_eq!(cursor.position().offset, 3);
    }

    #[test]
    fn newlines_update_line_and_column() {
        let mut cursor = Cursor::new(b"a\nb\r\nc");

        cursor.advance().unwrap(); // 'a'
        cursor.advance().unwrap(); // '\n'
        assert_eq!(cursor.position().line, 2);
        assert_eq!(cursor.position().column, 1);
        assert_eq!(cursor.last_consumed().column, 0);

        cursor.advance().unwrap(); // 'b'
        cursor.advance().unwrap(); // '\r\n'
        assert_eq!(cursor.position().line, 3);
        assert_eq!(cursor.position().column, 1);
        assert_eq!(cursor.position().offset, 5);
    }

    #[test]
    fn lone_carriage_return_is_not_a_newline() {
        let mut cursor = Cursor::new(b"\ra");
        assert!(!cursor.eat_newline());
        cursor.advance().unwrap();
        assert_eq!(cursor.position().line, 1);
        assert_eq!(cursor.position().column, 2);
    }

    #[test]
    fn unicode_characters() {
        let mut cursor = Cursor::new("a\u{1F600}b".as_bytes());

        cursor.advance().unwrap();
        assert_eq!(cursor.peek_char(), Some('\u{1F600}'));
        cursor.advance().unwrap();
        assert_eq!(cursor.position().offset, 5); // emoji is 4 bytes
        assert_eq!(cursor.position().column, 3); // but 1 character

        cursor.advance().unwrap();
        assert_eq!(cursor.position().offset, 6);
        assert_eq!(cursor.position().column, 4);
    }

    #[test]
    fn invalid_lead_byte() {
        let mut cursor = Cursor::new(b"a\xffb");
        cursor.advance().unwrap();
        let err = cursor.advance().unwrap_err();
        assert_eq!(err.kind, LexErrorKind::InvalidLeadByte(0xff));
        assert_eq!(err.position.column, 2);
        assert_eq!(cursor.position().offset, 1);
    }

    #[test]
    fn truncated_sequence() {
        let cursor = Cursor::new(&[0xe3, 0x81]);
        assert_eq!(
            cursor.char_len().unwrap_err().kind,
            LexErrorKind::InvalidLeadByte(0xe3)
        );
        assert_eq!(cursor.peek_char(), None);
    }

    #[test]
    fn skip_char_tolerates_malformed_input() {
        let mut cursor = Cursor::new("é\u{ff}".as_bytes());
        cursor.skip_char();
        assert_eq!(cursor.position().offset, 2);

        let mut cursor = Cursor::new(&[0xc3, b'(']);
        cursor.skip_char();
        assert_eq!(cursor.position().offset, 1);
        assert_eq!(cursor.peek(), Some(b'('));
        assert_eq!(cursor.position().column, 2);
    }

    #[test]
    fn utf8_lengths() {
        assert_eq!(utf8_len(b'a'), Some(1));
        assert_eq!(utf8_len(0xc2), Some(2));
        assert_eq!(utf8_len(0xe3), Some(3));
        assert_eq!(utf8_len(0xf0), Some(4));
        assert_eq!(utf8_len(0x80), None);
        assert_eq!(utf8_len(0xc0), None);
        assert_eq!(utf8_len(0xc1), None);
        assert_eq!(utf8_len(0xf5), None);
    }

    #[test]
    fn eat_while() {
        let mut cursor = Cursor::new(b"aaabbc");
        let start = cursor.position();

        cursor.eat_while(|b| b == b'a');
        assert_eq!(cursor.slice_from(&start), b"aaa");
        assert_eq!(cursor.peek(), Some(b'b'));
        assert_eq!(cursor.position().column, 4);

        cursor.eat_while(|b| b == b'b');
        assert_eq!(cursor.slice_from(&start), b"aaabb");
        assert_eq!(cursor.peek(), Some(b'c'));
    }

    #[test]
    fn position_span_to() {
        let mut cursor = Cursor::new(b"hello");
        let start = cursor.position();

        cursor.bump(); // h
        cursor.bump(); // e
        cursor.bump(); // l

        let span = start.span_to(&cursor.position());
        assert_eq!(span.start, 0);
        assert_eq!(span.end, 3);
        assert_eq!(span.line, 1);
        assert_eq!(span.column, 1);
        assert_eq!(cursor.slice_from(&start), b"hel");
    }

    #[test]
    fn span_here_is_empty() {
        let cursor = Cursor::new(b"x");
        assert!(cursor.position().span_here().is_empty());
    }
}
