//! Shape recognition for numeric literal tokens.
//!
//! Only decides whether an atom *looks* like an integer or float. Converting
//! the text to a value is left to the parser.
//!
//! See: <https://webassembly.github.io/spec/core/text/values.html#integers>
//! and <https://webassembly.github.io/spec/core/text/values.html#floating-point>

use super::token::TokenKind;

/// Classify an atom as one of the numeric token kinds, if it is one.
pub fn number_kind(text: &[u8]) -> Option<TokenKind> {
    let (signed, unsigned) = match text {
        [b'+' | b'-', rest @ ..] => (true, rest),
        _ => (false, text),
    };

    if is_integer(unsigned) {
        return Some(if signed {
            TokenKind::SignedNumber
        } else {
            TokenKind::UnsignedNumber
        });
    }
    if is_float(unsigned) {
        return Some(TokenKind::FloatNumber);
    }
    None
}

/// Length of the leading `num` (or `hexnum`) in `s`, or `None` if `s` does
/// not start with a digit.
///
/// Underscores may only separate two digits. The match stops before an
/// underscore that isn't followed by a digit, so `1__2` matches only `1`.
fn digits(s: &[u8], hex: bool) -> Option<usize> {
    let is_digit = |b: u8| if hex { b.is_ascii_hexdigit() } else { b.is_ascii_digit() };

    if !s.first().is_some_and(|&b| is_digit(b)) {
        return None;
    }
    let mut i = 1;
    loop {
        match s.get(i) {
            Some(&b) if is_digit(b) => i += 1,
            Some(b'_') if s.get(i + 1).is_some_and(|&b| is_digit(b)) => i += 2,
            _ => return Some(i),
        }
    }
}

/// Whether all of `s` is a `num` (or `hexnum`).
fn all_digits(s: &[u8], hex: bool) -> bool {
    digits(s, hex) == Some(s.len())
}

/// `num | 0x hexnum`
fn is_integer(s: &[u8]) -> bool {
    match s.strip_prefix(b"0x") {
        Some(hexnum) => all_digits(hexnum, true),
        None => all_digits(s, false),
    }
}

/// `float | hexfloat | inf | nan | nan:0x hexnum`, without the sign.
///
/// A float needs a `.` or an exponent; otherwise it is an integer.
fn is_float(s: &[u8]) -> bool {
    if s == b"inf" || s == b"nan" {
        return true;
    }
    if let Some(payload) = s.strip_prefix(b"nan:0x") {
        return all_digits(payload, true);
    }

    let (hex, body) = match s.strip_prefix(b"0x") {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let Some(mut i) = digits(body, hex) else {
        return false;
    };

    let mut fractional = false;
    if body.get(i) == Some(&b'.') {
        fractional = true;
        i += 1;
        i += digits(&body[i..], hex).unwrap_or(0);
    }

    let exponent = match body.get(i) {
        Some(b'p' | b'P') => hex,
        Some(b'e' | b'E') => !hex,
        _ => false,
    };
    if exponent {
        i += 1;
        if matches!(body.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        // Exponents are always decimal, even in hex floats
        match digits(&body[i..], false) {
            Some(n) => i += n,
            None => return false,
        }
    }

    (fractional || exponent) && i == body.len()
}
