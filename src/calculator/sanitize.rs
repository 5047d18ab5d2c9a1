//! Character-level filtering of calculator input.
//!
//! Maps the keypad's typographic operator glyphs onto ASCII and drops every
//! character that cannot appear in a plain arithmetic expression. This is a
//! filter, not a validator: the result may still be malformed.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Everything outside digits, the four operators, `%`, `.`, parentheses
    /// and the ASCII space.
    static ref DISALLOWED_CHARS: Regex = Regex::new(r"[^0-9+\-*/%.() ]").unwrap();
}

/// Glyph replacements applied before filtering.
const GLYPHS: &[(char, char)] = &[('÷', '/'), ('×', '*'), ('−', '-'), (',', '.')];

/// Normalize `input` to the restricted arithmetic character set.
///
/// Never fails; input with nothing usable yields an empty string.
pub fn sanitize(input: &str) -> String {
    let mapped: String = input
        .chars()
        .map(|c| {
            GLYPHS
                .iter()
                .find(|(glyph, _)| *glyph == c)
                .map_or(c, |(_, ascii)| *ascii)
        })
        .collect();

    DISALLOWED_CHARS.replace_all(&mapped, "").into_owned()
}

/// True when nothing but whitespace survives sanitization.
pub fn is_blank(input: &str) -> bool {
    sanitize(input).trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyphs_mapped_to_ascii() {
        assert_eq!(sanitize("7÷2×3−1,5"), "7/2*3-1.5");
    }

    #[test]
    fn test_letters_stripped() {
        assert_eq!(sanitize("2+abc3"), "2+3");
        assert_eq!(sanitize("alert(1)"), "(1)");
        assert_eq!(sanitize("7÷2×x3−1,5"), "7/2*3-1.5");
    }

    #[test]
    fn test_whitelist_preserved() {
        let input = "(12 + 3.5) * 4 / 2 - 1 % 3";
        assert_eq!(sanitize(input), input);
    }

    #[test]
    fn test_other_whitespace_and_symbols_stripped() {
        assert_eq!(sanitize("1\t+\n2"), "1+2");
        assert_eq!(sanitize("2^8"), "28");
        assert_eq!(sanitize("1_000"), "1000");
    }

    #[test]
    fn test_nothing_usable_is_empty() {
        assert_eq!(sanitize("hello"), "");
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(is_blank("abc"));
        assert!(!is_blank("0"));
        assert!(!is_blank(" + "));
    }
}
