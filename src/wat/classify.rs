//! Byte classification for the WAT character grammar.
//!
//! Every byte maps to one of three classes. The table is built on first use
//! and is read-only afterwards, so concurrent lexers share it freely.
//!
//! See: <https://webassembly.github.io/spec/core/text/lexical.html#characters>

use once_cell::sync::Lazy;

/// The lexical class of a single byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// Anything else: control characters, `"`, `,`, `;`, brackets, non-ASCII bytes.
    Unclassified,
    /// A character allowed inside keywords, identifiers and reserved atoms.
    IdChar,
    /// Space, tab, carriage return or line feed.
    Whitespace,
}

static CHAR_CLASSES: Lazy<[CharClass; 256]> = Lazy::new(build_table);

fn build_table() -> [CharClass; 256] {
    let mut table = [CharClass::Unclassified; 256];
    for (b, class) in table.iter_mut().enumerate().take(128) {
        *class = class_of(b as u8);
    }
    table
}

fn class_of(b: u8) -> CharClass {
    match b {
        b' ' | b'\t' | b'\r' | b'\n' => CharClass::Whitespace,
        b'0'..=b'9'
        | b'a'..=b'z'
        | b'A'..=b'Z'
        | b'!'
        | b'#'
        | b'$'
        | b'%'
        | b'&'
        | b'\''
        | b'*'
        | b'+'
        | b'-'
        | b'.'
        | b'/'
        | b':'
        | b'<'
        | b'='
        | b'>'
        | b'?'
        | b'@'
        | b'\\'
        | b'^'
        | b'_'
        | b'`'
        | b'|'
        | b'~' => CharClass::IdChar,
        _ => CharClass::Unclassified,
    }
}

/// Look up the class of a byte.
#[inline]
pub fn classify(b: u8) -> CharClass {
    CHAR_CLASSES[b as usize]
}

/// Whether `b` may appear in a keyword, identifier or reserved atom.
#[inline]
pub fn is_idchar(b: u8) -> bool {
    classify(b) == CharClass::IdChar
}

/// Whether `b` is WAT whitespace. Line feeds are also line terminators.
#[inline]
pub fn is_whitespace(b: u8) -> bool {
    classify(b) == CharClass::Whitespace
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(b' ')]
    #[case(b'\t')]
    #[case(b'\r')]
    #[case(b'\n')]
    fn whitespace(#[case] b: u8) {
        assert_eq!(classify(b), CharClass::Whitespace);
    }

    #[test]
    fn idchars() {
        for b in b"!#$%&'*+-./:<=>?@\\^_`|~0123456789abcxyzABCXYZ" {
            assert_eq!(classify(*b), CharClass::IdChar, "byte {:?}", *b as char);
        }
    }

    #[rstest]
    #[case(b'"')]
    #[case(b',')]
    #[case(b';')]
    #[case(b'(')]
    #[case(b')')]
    #[case(b'[')]
    #[case(b']')]
    #[case(b'{')]
    #[case(b'}')]
    #[case(0x00)]
    #[case(0x0c)]
    #[case(0x7f)]
    fn unclassified_ascii(#[case] b: u8) {
        assert_eq!(classify(b), CharClass::Unclassified);
    }

    #[test]
    fn high_bytes_are_unclassified() {
        assert!((0x80..=0xffu8).all(|b| classify(b) == CharClass::Unclassified));
    }

    #[test]
    fn table_agrees_with_predicates() {
        for b in 0..=255u8 {
            assert_eq!(is_idchar(b), classify(b) == CharClass::IdChar);
            assert_eq!(is_whitespace(b), classify(b) == CharClass::Whitespace);
        }
    }

    #[test]
    fn idchar_count() {
        // 10 digits, 52 letters, 23 punctuation characters
        assert_eq!((0..=255u8).filter(|&b| is_idchar(b)).count(), 85);
    }
}
