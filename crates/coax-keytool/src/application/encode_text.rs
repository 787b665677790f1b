//! Encodes text to glyph bytes and prints them as hex.

use std::io::Write;

use coax_core::{encode_string, ErrorPolicy};

use super::ToolError;

/// Encodes `text` under `policy` and writes the glyphs as space-separated
/// lower-case hex on one line.
///
/// # Errors
///
/// Returns [`ToolError::Encode`] if `policy` is strict and `text` is not
/// ASCII, or [`ToolError::Io`] if writing fails.
pub fn encode_text<W: Write>(
    text: &str,
    policy: ErrorPolicy,
    mut output: W,
) -> Result<Vec<u8>, ToolError> {
    let glyphs = encode_string(text, policy)?;
    writeln!(output, "{}", format_hex(&glyphs))?;
    output.flush()?;
    Ok(glyphs)
}

/// Formats bytes as `0a 1b 2c`.
pub fn format_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use coax_core::EncodeError;

    #[test]
    fn test_encode_text_prints_hex_line() {
        // Arrange
        let mut output = Vec::new();

        // Act
        let glyphs = encode_text("Hi!", ErrorPolicy::Replace, &mut output).expect("encode");

        // Assert
        assert_eq!(glyphs, vec![0xA7, 0x88, 0x19]);
        assert_eq!(String::from_utf8(output).unwrap(), "a7 88 19\n");
    }

    #[test]
    fn test_encode_text_ignore_policy_drops_non_ascii() {
        let mut output = Vec::new();

        encode_text("né", ErrorPolicy::Ignore, &mut output).expect("encode");

        assert_eq!(String::from_utf8(output).unwrap(), "8d\n");
    }

    #[test]
    fn test_encode_text_strict_policy_writes_nothing_on_failure() {
        let mut output = Vec::new();

        let err = encode_text("né", ErrorPolicy::Strict, &mut output).unwrap_err();

        assert!(matches!(
            err,
            ToolError::Encode(EncodeError::NonAscii {
                character: 'é',
                position: 1
            })
        ));
        assert!(output.is_empty());
    }

    #[test]
    fn test_empty_text_prints_empty_line() {
        let mut output = Vec::new();

        encode_text("", ErrorPolicy::Strict, &mut output).expect("encode");

        assert_eq!(output, b"\n");
    }
}
