//! Decodes a stream of scan codes, one per line, into readable events.
//!
//! Input lines hold a decimal or `0x` hexadecimal scan code.  Blank lines and
//! lines starting with `#` are skipped, and anything after a `#` on a line is
//! ignored.  Each scan code produces one tab-separated output line:
//!
//! ```text
//! 0x0070  LeftShift  modifier  LEFT_SHIFT
//! 0x0045  UpperH     'H'       LEFT_SHIFT
//! 0x00f0  -          modifier  -
//! 0x0999  -          -         -
//! ```
//!
//! Columns are the scan code, the resolved key, the character it produces
//! (or `modifier` for a modifier event) and the modifier state afterwards.

use std::io::{BufRead, Write};

use coax_core::{
    decode_key_to_character, parse_scan_code, DecodedKey, KeyboardDecoder, ModifierFlags,
    ScanCode,
};
use tracing::debug;

use super::ToolError;

/// Counters reported once the input is exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeSummary {
    /// Scan codes decoded.
    pub scan_codes: usize,
    /// Scan codes that changed (or re-released) a modifier.
    pub modifier_events: usize,
    /// Non-modifier scan codes that resolved to no key.
    pub unmapped: usize,
}

/// Decodes every scan code in `input` and writes one line per event.
///
/// # Errors
///
/// Returns [`ToolError::InvalidScanCode`] with the 1-based line number for a
/// line that is not a scan code, or [`ToolError::Io`] if reading or writing
/// fails.
pub fn decode_stream<R: BufRead, W: Write>(
    decoder: &mut KeyboardDecoder<'_>,
    input: R,
    mut output: W,
) -> Result<DecodeSummary, ToolError> {
    let mut summary = DecodeSummary::default();

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let content = line.split('#').next().unwrap_or_default().trim();
        if content.is_empty() {
            continue;
        }

        let scan_code = parse_scan_code(content).ok_or_else(|| ToolError::InvalidScanCode {
            line: index + 1,
            raw: content.to_string(),
        })?;

        let decoded = decoder.decode(scan_code);
        summary.scan_codes += 1;
        if decoded.is_modifier {
            summary.modifier_events += 1;
        } else if decoded.key.is_none() {
            summary.unmapped += 1;
        }

        writeln!(output, "{}", format_event(scan_code, &decoded))?;
    }

    output.flush()?;
    debug!("decoded {} scan codes", summary.scan_codes);
    Ok(summary)
}

/// Renders one decoded scan code as a tab-separated line.
pub fn format_event(scan_code: ScanCode, decoded: &DecodedKey) -> String {
    let key = decoded
        .key
        .map_or_else(|| "-".to_string(), |key| format!("{key:?}"));
    let produced = if decoded.is_modifier {
        "modifier".to_string()
    } else {
        decode_key_to_character(decoded.key).map_or_else(|| "-".to_string(), |c| format!("{c:?}"))
    };
    format!(
        "{scan_code:#06x}\t{key}\t{produced}\t{}",
        format_modifiers(decoded.modifiers)
    )
}

/// Renders a modifier set as `NAME+NAME`, or `-` when empty.
pub fn format_modifiers(modifiers: ModifierFlags) -> String {
    if modifiers.is_empty() {
        return "-".to_string();
    }
    modifiers
        .iter_names()
        .map(|(name, _)| name)
        .collect::<Vec<_>>()
        .join("+")
}
