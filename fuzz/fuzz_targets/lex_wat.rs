#![no_main]

use libfuzzer_sys::fuzz_target;

use watlex::wat::{scan, LexError, Lexer, TokenKind};

fuzz_target!(|data: &[u8]| {
    // The lexer takes raw bytes, so arbitrary input is fed straight in
    let mut pushed = Vec::new();
    let scanned = scan(data, |_, kind, line, column, start, end| {
        assert!(start < end && end <= data.len());
        pushed.push((kind, line, column, start, end));
        Ok::<_, LexError>(())
    });

    // The iterator must agree with the visitor, token for token
    let mut pulled = Vec::new();
    for result in Lexer::new(data) {
        match result {
            Ok(t) => pulled.push((t.kind, t.span.line, t.span.column, t.span.start, t.span.end)),
            Err(e) => {
                assert_eq!(Err(e), scanned);
                break;
            }
        }
    }
    assert_eq!(pushed, pulled);
    assert!(pushed.iter().all(|(kind, ..)| *kind != TokenKind::Illegal));
});
