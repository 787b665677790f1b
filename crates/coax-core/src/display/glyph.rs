//! Character to display glyph translation.
//!
//! Coax terminals do not display ASCII.  Each byte written to the display
//! buffer selects a glyph from the terminal's own character generator, where
//! for example `'a'` is `0x80` and `'0'` is `0x20`.
//!
//! # How this table works
//!
//! `CHAR_TO_GLYPH_TABLE` is a compile-time constant array of 256 glyph bytes,
//! indexed by Latin-1 code point.  Position `0x61` holds `0x80` because the
//! glyph for `'a'` is `0x80`.  Any code point without a glyph stores
//! [`NO_GLYPH`], which the terminal shows as a blank.
//!
//! The reverse table is derived from the forward one at compile time, so the
//! two can never disagree.  Every glyph is assigned to at most one character,
//! which makes [`decode_glyph`] an exact inverse for mapped characters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Glyph byte written for characters the terminal cannot display.
pub const NO_GLYPH: u8 = 0x00;

/// Character substituted for non-ASCII input under [`ErrorPolicy::Replace`].
pub const REPLACEMENT_CHARACTER: char = '?';

/// How [`encode_string`] treats characters outside ASCII.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Fail the whole string on the first non-ASCII character.
    Strict,
    /// Substitute [`REPLACEMENT_CHARACTER`] for each non-ASCII character.
    #[default]
    Replace,
    /// Drop non-ASCII characters.
    Ignore,
}

impl ErrorPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorPolicy::Strict => "strict",
            ErrorPolicy::Replace => "replace",
            ErrorPolicy::Ignore => "ignore",
        }
    }
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an [`ErrorPolicy`] from an unknown name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown error policy {0:?}: expected strict, replace or ignore")]
pub struct ParseErrorPolicyError(pub String);

impl FromStr for ErrorPolicy {
    type Err = ParseErrorPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(ErrorPolicy::Strict),
            "replace" => Ok(ErrorPolicy::Replace),
            "ignore" => Ok(ErrorPolicy::Ignore),
            other => Err(ParseErrorPolicyError(other.to_string())),
        }
    }
}

/// Errors from [`encode_string`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// A non-ASCII character was found under [`ErrorPolicy::Strict`].
    #[error("cannot encode {character:?} at position {position}: not an ASCII character")]
    NonAscii { character: char, position: usize },
}

/// Translates a code point to its glyph byte.
///
/// Returns [`NO_GLYPH`] for code points above `0xFF` and for code points with
/// no glyph.  The display must always receive some byte, so this never fails.
pub fn encode_character(code_point: u32) -> u8 {
    if code_point > 0xFF {
        return NO_GLYPH;
    }
    CHAR_TO_GLYPH_TABLE[code_point as usize]
}

/// Translates a string to glyph bytes, normalizing it to ASCII under `policy`.
///
/// The output has one byte per character that survives normalization.
///
/// # Errors
///
/// Returns [`EncodeError::NonAscii`] only under [`ErrorPolicy::Strict`].
pub fn encode_string(text: &str, policy: ErrorPolicy) -> Result<Vec<u8>, EncodeError> {
    let mut glyphs = Vec::with_capacity(text.len());

    for (position, character) in text.chars().enumerate() {
        let character = if character.is_ascii() {
            character
        } else {
            match policy {
                ErrorPolicy::Strict => {
                    return Err(EncodeError::NonAscii {
                        character,
                        position,
                    })
                }
                ErrorPolicy::Replace => REPLACEMENT_CHARACTER,
                ErrorPolicy::Ignore => continue,
            }
        };
        glyphs.push(encode_character(u32::from(character)));
    }

    Ok(glyphs)
}

/// Translates a glyph byte back to the character it displays.
///
/// Returns `None` for [`NO_GLYPH`] and for glyphs no character maps to.
pub fn decode_glyph(glyph: u8) -> Option<char> {
    GLYPH_TO_CHAR_TABLE[glyph as usize]
}

/// Complete code point → glyph table indexed by Latin-1 code point (0x00–0xFF).
const CHAR_TO_GLYPH_TABLE: [u8; 256] = {
    let mut t = [NO_GLYPH; 256];

    // ── Brackets and comparison (glyphs 0x08–0x0F) ───────────────────────────
    t['>' as usize] = 0x08;
    t['<' as usize] = 0x09;
    t['[' as usize] = 0x0A;
    t[']' as usize] = 0x0B;
    t[')' as usize] = 0x0C;
    t['(' as usize] = 0x0D;
    t['}' as usize] = 0x0E;
    t['{' as usize] = 0x0F;

    // ── Punctuation and currency (glyphs 0x11–0x1D) ──────────────────────────
    // 0x10 is a second blank; space itself stays unmapped.
    t['=' as usize] = 0x11;
    t['\'' as usize] = 0x12;
    t['"' as usize] = 0x13;
    t['/' as usize] = 0x14;
    t['\\' as usize] = 0x15;
    t['|' as usize] = 0x16;
    t['¦' as usize] = 0x17;
    t['?' as usize] = 0x18;
    t['!' as usize] = 0x19;
    t['$' as usize] = 0x1A;
    t['¢' as usize] = 0x1B;
    t['£' as usize] = 0x1C;
    t['¥' as usize] = 0x1D;

    // ── Digits and symbols (glyphs 0x20–0x3C) ────────────────────────────────
    t['0' as usize] = 0x20;
    t['1' as usize] = 0x21;
    t['2' as usize] = 0x22;
    t['3' as usize] = 0x23;
    t['4' as usize] = 0x24;
    t['5' as usize] = 0x25;
    t['6' as usize] = 0x26;
    t['7' as usize] = 0x27;
    t['8' as usize] = 0x28;
    t['9' as usize] = 0x29;
    t['ß' as usize] = 0x2A;
    t['§' as usize] = 0x2B;
    t['#' as usize] = 0x2C;
    t['@' as usize] = 0x2D;
    t['%' as usize] = 0x2E;
    t['_' as usize] = 0x2F;
    t['&' as usize] = 0x30;
    t['-' as usize] = 0x31;
    t['.' as usize] = 0x32;
    t[',' as usize] = 0x33;
    t[':' as usize] = 0x34;
    t['+' as usize] = 0x35;
    t['¬' as usize] = 0x36;
    t['¯' as usize] = 0x37;
    t['°' as usize] = 0x38;
    t['¨' as usize] = 0x3C;

    // ── Lower-case letters (glyphs 0x80–0x9D) ────────────────────────────────
    t['a' as usize] = 0x80;
    t['b' as usize] = 0x81;
    t['c' as usize] = 0x82;
    t['d' as usize] = 0x83;
    t['e' as usize] = 0x84;
    t['f' as usize] = 0x85;
    t['g' as usize] = 0x86;
    t['h' as usize] = 0x87;
    t['i' as usize] = 0x88;
    t['j' as usize] = 0x89;
    t['k' as usize] = 0x8A;
    t['l' as usize] = 0x8B;
    t['m' as usize] = 0x8C;
    t['n' as usize] = 0x8D;
    t['o' as usize] = 0x8E;
    t['p' as usize] = 0x8F;
    t['q' as usize] = 0x90;
    t['r' as usize] = 0x91;
    t['s' as usize] = 0x92;
    t['t' as usize] = 0x93;
    t['u' as usize] = 0x94;
    t['v' as usize] = 0x95;
    t['w' as usize] = 0x96;
    t['x' as usize] = 0x97;
    t['y' as usize] = 0x98;
    t['z' as usize] = 0x99;
    t['æ' as usize] = 0x9A;
    t['ø' as usize] = 0x9B;
    t['å' as usize] = 0x9C;
    t['ç' as usize] = 0x9D;

    // ── Upper-case letters (glyphs 0xA0–0xBF) ────────────────────────────────
    t['A' as usize] = 0xA0;
    t['B' as usize] = 0xA1;
    t['C' as usize] = 0xA2;
    t['D' as usize] = 0xA3;
    t['E' as usize] = 0xA4;
    t['F' as usize] = 0xA5;
    t['G' as usize] = 0xA6;
    t['H' as usize] = 0xA7;
    t['I' as usize] = 0xA8;
    t['J' as usize] = 0xA9;
    t['K' as usize] = 0xAA;
    t['L' as usize] = 0xAB;
    t['M' as usize] = 0xAC;
    t['N' as usize] = 0xAD;
    t['O' as usize] = 0xAE;
    t['P' as usize] = 0xAF;
    t['Q' as usize] = 0xB0;
    t['R' as usize] = 0xB1;
    t['S' as usize] = 0xB2;
    t['T' as usize] = 0xB3;
    t['U' as usize] = 0xB4;
    t['V' as usize] = 0xB5;
    t['W' as usize] = 0xB6;
    t['X' as usize] = 0xB7;
    t['Y' as usize] = 0xB8;
    t['Z' as usize] = 0xB9;
    t['Æ' as usize] = 0xBA;
    t['Ø' as usize] = 0xBB;
    t['Å' as usize] = 0xBC;
    t['Ç' as usize] = 0xBD;
    t[';' as usize] = 0xBE;
    t['*' as usize] = 0xBF;

    t
};

/// Glyph → character table, the inverse of `CHAR_TO_GLYPH_TABLE`.
const GLYPH_TO_CHAR_TABLE: [Option<char>; 256] = {
    let mut t = [None; 256];
    let mut code_point = 0;
    while code_point < 256 {
        let glyph = CHAR_TO_GLYPH_TABLE[code_point];
        if glyph != NO_GLYPH {
            t[glyph as usize] = Some(code_point as u8 as char);
        }
        code_point += 1;
    }
    t
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// Representative characters and the glyph the terminal shows them with.
    const KNOWN_GLYPHS: &[(char, u8)] = &[
        ('>', 0x08),
        ('{', 0x0F),
        ('=', 0x11),
        ('?', 0x18),
        ('0', 0x20),
        ('9', 0x29),
        ('_', 0x2F),
        ('&', 0x30),
        ('a', 0x80),
        ('z', 0x99),
        ('A', 0xA0),
        ('Z', 0xB9),
        (';', 0xBE),
        ('*', 0xBF),
        ('ß', 0x2A),
        ('¬', 0x36),
        ('Ç', 0xBD),
    ];

    #[test]
    fn test_encode_character_for_known_glyphs() {
        for &(character, glyph) in KNOWN_GLYPHS {
            assert_eq!(
                encode_character(character as u32),
                glyph,
                "{character:?} should encode to 0x{glyph:02X}"
            );
        }
    }

    #[test]
    fn test_encode_character_unmapped_returns_no_glyph() {
        for code_point in [0x00u32, b' ' as u32, b'^' as u32, b'`' as u32, b'~' as u32, 0x7F] {
            assert_eq!(encode_character(code_point), NO_GLYPH, "code point 0x{code_point:02X}");
        }
    }

    #[test]
    fn test_encode_character_out_of_range_returns_no_glyph() {
        for code_point in [0x100u32, 0x20AC, u32::MAX] {
            assert_eq!(encode_character(code_point), NO_GLYPH);
        }
    }

    #[test]
    fn test_table_is_injective() {
        // Arrange
        let mapped: Vec<u8> = (0u32..=0xFF)
            .map(encode_character)
            .filter(|&glyph| glyph != NO_GLYPH)
            .collect();

        // Act
        let distinct: HashSet<u8> = mapped.iter().copied().collect();

        // Assert
        assert_eq!(distinct.len(), mapped.len(), "two characters share a glyph");
    }

    #[test]
    fn test_decode_glyph_inverts_encode_for_every_mapped_character() {
        for code_point in 0u32..=0xFF {
            let glyph = encode_character(code_point);
            if glyph == NO_GLYPH {
                continue;
            }
            assert_eq!(decode_glyph(glyph), char::from_u32(code_point));
        }
    }

    #[test]
    fn test_decode_glyph_unassigned_returns_none() {
        for glyph in [NO_GLYPH, 0x10, 0x1E, 0x3F, 0x9E, 0xC0, 0xFF] {
            assert_eq!(decode_glyph(glyph), None, "glyph 0x{glyph:02X}");
        }
    }

    #[test]
    fn test_encode_string_ascii() {
        let glyphs = encode_string("Hello, 42!", ErrorPolicy::Strict).unwrap();
        assert_eq!(
            glyphs,
            vec![0xA7, 0x84, 0x8B, 0x8B, 0x8E, 0x33, NO_GLYPH, 0x24, 0x22, 0x19]
        );
    }

    #[test]
    fn test_encode_string_replace_substitutes_question_mark() {
        // Arrange: both characters are outside ASCII even though they have glyphs
        let text = "ß§";

        // Act
        let glyphs = encode_string(text, ErrorPolicy::Replace).unwrap();

        // Assert
        let replacement = encode_character(REPLACEMENT_CHARACTER as u32);
        assert_eq!(glyphs, vec![replacement; 2]);
        assert_eq!(glyphs, vec![0x18, 0x18]);
    }

    #[test]
    fn test_encode_string_ignore_drops_non_ascii() {
        let glyphs = encode_string("añb€", ErrorPolicy::Ignore).unwrap();
        assert_eq!(glyphs, vec![0x80, 0x81]);
    }

    #[test]
    fn test_encode_string_strict_reports_first_offender() {
        let err = encode_string("ab€cé", ErrorPolicy::Strict).unwrap_err();
        assert_eq!(
            err,
            EncodeError::NonAscii {
                character: '€',
                position: 2
            }
        );
    }

    #[test]
    fn test_encode_string_empty() {
        for policy in [ErrorPolicy::Strict, ErrorPolicy::Replace, ErrorPolicy::Ignore] {
            assert!(encode_string("", policy).unwrap().is_empty());
        }
    }

    #[test]
    fn test_default_policy_is_replace() {
        assert_eq!(ErrorPolicy::default(), ErrorPolicy::Replace);
    }

    #[test]
    fn test_error_policy_parses_from_its_name() {
        for policy in [ErrorPolicy::Strict, ErrorPolicy::Replace, ErrorPolicy::Ignore] {
            assert_eq!(policy.as_str().parse::<ErrorPolicy>(), Ok(policy));
        }
        assert!("lenient".parse::<ErrorPolicy>().is_err());
    }
}
