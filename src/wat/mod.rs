//! WebAssembly Text Format (WAT) lexical analysis.
//!
//! This module turns a WAT source buffer into positioned tokens. Tokens are
//! spans into the buffer; nothing is copied.
//!
//! # Example
//!
//! ```
//! use watlex::wat::{Lexer, TokenKind};
//!
//! let source = b"(module (func $main (result i32) (i32.const 42)))";
//! let tokens = Lexer::tokenise(source).unwrap();
//!
//! assert_eq!(tokens[0].kind, TokenKind::LeftParen);
//! assert_eq!(tokens[1].kind, TokenKind::Keyword);
//! assert_eq!(tokens[1].text(source), b"module");
//! assert_eq!(tokens[4].kind, TokenKind::Id);
//! ```
//!
//! # Error Handling
//!
//! Any lexical error stops the scan. Errors display as `<line>:<column> <reason>`:
//!
//! ```
//! use watlex::wat::Lexer;
//!
//! let err = Lexer::tokenise(b"(; unterminated").unwrap_err();
//! assert_eq!(err.to_string(), "1:15 expected block comment end ';)'");
//! ```

mod classify;
mod cursor;
mod error;
mod lexer;
mod number;
mod token;

pub use classify::{classify, is_idchar, is_whitespace, CharClass};
pub use cursor::Position;
pub use error::{LexError, LexErrorKind};
pub use lexer::{scan, Lexer};
pub use token::{Span, Token, TokenKind};
