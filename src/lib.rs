//! A lexical scanner for the WebAssembly Text Format.
//!
//! `watlex` turns a `.wat` source buffer into the token stream defined by the
//! text format's lexical grammar, with line, column and byte offset for every
//! token and every error. It is the first stage of a text-to-binary pipeline;
//! parsing the tokens and converting numeric literals to values is left to the
//! consumer.
//!
//! # Modules
//!
//! - [`wat`] -- The scanner, token types, byte classification and errors.
//!
//! # Example
//!
//! Count the tokens of a module without copying any text:
//!
//! ```
//! use watlex::wat::{scan, LexError};
//!
//! let source = br#"
//!     (module
//!         (func (export "add") (param i32 i32) (result i32)
//!             local.get 0
//!             local.get 1
//!             i32.add))
//! "#;
//!
//! let mut count = 0;
//! scan(source, |_, _, _, _, _, _| {
//!     count += 1;
//!     Ok::<_, LexError>(())
//! })
//! .unwrap();
//! assert_eq!(count, 24);
//! ```
//!
//! # Conformance
//!
//! Targets the lexical format of the
//! [WebAssembly text format](https://webassembly.github.io/spec/core/text/lexical.html).

pub mod wat;
