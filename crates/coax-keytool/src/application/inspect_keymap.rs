//! Summarizes a keymap and flags entries the decoder will never act on.
//!
//! A keymap that parses can still be wrong.  The checks here catch the
//! mistakes that are silent at decode time:
//!
//! - a `modifier_release` entry naming an ordinary key (the release decodes
//!   as a plain scan code instead of releasing anything);
//! - a momentary modifier with no release code (it can never be let go);
//! - a modifier release code that also appears in `default` (the release
//!   wins, so the default entry is unreachable).  Release codes naming an
//!   ordinary key fall through to the tables, so their default entry stays
//!   reachable.

use std::collections::BTreeSet;
use std::io::Write;

use coax_core::{Key, Keymap, KeymapTable, Modifier, ScanCode};

use super::ToolError;

/// A problem found in an otherwise valid keymap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeymapWarning {
    /// A release code maps to a key that is not a modifier.
    ReleaseOfOrdinaryKey { scan_code: ScanCode, key: Key },
    /// A momentary modifier is pressable but has no release code.
    ModifierWithoutRelease { key: Key },
    /// A modifier release code shadows an entry in the default table.
    ShadowedDefault { scan_code: ScanCode, key: Key },
}

impl std::fmt::Display for KeymapWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeymapWarning::ReleaseOfOrdinaryKey { scan_code, key } => write!(
                f,
                "release code {scan_code:#06x} names {key:?}, which is not a modifier"
            ),
            KeymapWarning::ModifierWithoutRelease { key } => {
                write!(f, "{key:?} can be pressed but has no release code")
            }
            KeymapWarning::ShadowedDefault { scan_code, key } => write!(
                f,
                "default entry {scan_code:#06x} = {key:?} is shadowed by a release code"
            ),
        }
    }
}

/// What `coax-keytool keymap` reports about a keymap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeymapReport {
    pub name: String,
    /// Entry count per table, in file order.
    pub entries: Vec<(KeymapTable, usize)>,
    /// Modifier keys reachable from the default table.
    pub modifiers: Vec<Key>,
    pub warnings: Vec<KeymapWarning>,
}

impl KeymapReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Builds the report for `keymap`.
pub fn inspect_keymap(keymap: &Keymap) -> KeymapReport {
    let entries = KeymapTable::ALL
        .iter()
        .map(|&table| (table, keymap.table(table).len()))
        .collect();

    let modifiers: BTreeSet<Key> = keymap
        .table(KeymapTable::Default)
        .values()
        .copied()
        .filter(|&key| Modifier::from_key(key).is_some())
        .collect();

    let released: BTreeSet<Key> = keymap
        .table(KeymapTable::ModifierRelease)
        .values()
        .copied()
        .collect();

    let mut warnings = Vec::new();

    let mut releases: Vec<(ScanCode, Key)> = keymap
        .table(KeymapTable::ModifierRelease)
        .iter()
        .map(|(&scan_code, &key)| (scan_code, key))
        .collect();
    releases.sort_unstable();

    for (scan_code, key) in releases {
        if Modifier::from_key(key).is_none() {
            warnings.push(KeymapWarning::ReleaseOfOrdinaryKey { scan_code, key });
            continue;
        }
        if let Some(shadowed) = keymap.default_key(scan_code) {
            warnings.push(KeymapWarning::ShadowedDefault {
                scan_code,
                key: shadowed,
            });
        }
    }

    for &key in &modifiers {
        let latched = Modifier::from_key(key).is_some_and(Modifier::is_latched);
        if !latched && !released.contains(&key) {
            warnings.push(KeymapWarning::ModifierWithoutRelease { key });
        }
    }

    KeymapReport {
        name: keymap.name().to_string(),
        entries,
        modifiers: modifiers.into_iter().collect(),
        warnings,
    }
}

/// Writes `report` in a human-readable form.
///
/// # Errors
///
/// Returns [`ToolError::Io`] if writing fails.
pub fn write_report<W: Write>(report: &KeymapReport, mut output: W) -> Result<(), ToolError> {
    writeln!(output, "keymap: {}", report.name)?;
    for (table, count) in &report.entries {
        writeln!(output, "  [{table}] {count} entries")?;
    }
    let modifiers = report
        .modifiers
        .iter()
        .map(|key| format!("{key:?}"))
        .collect::<Vec<_>>();
    writeln!(
        output,
        "  modifiers: {}",
        if modifiers.is_empty() {
            "none".to_string()
        } else {
            modifiers.join(", ")
        }
    )?;
    for warning in &report.warnings {
        writeln!(output, "warning: {warning}")?;
    }
    output.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn consistent_keymap() -> Keymap {
        Keymap::builder("consistent")
            .default_key(0x40, Key::LowerA)
            .shift_key(0x40, Key::UpperA)
            .default_key(0x70, Key::LeftShift)
            .default_key(0x74, Key::CapsLock)
            .modifier_release(0xf0, Key::LeftShift)
            .build()
    }

    #[test]
    fn test_consistent_keymap_has_no_warnings() {
        // Arrange
        let keymap = consistent_keymap();

        // Act
        let report = inspect_keymap(&keymap);

        // Assert
        assert!(report.is_clean(), "unexpected warnings: {:?}", report.warnings);
        assert_eq!(report.name, "consistent");
        assert_eq!(
            report.entries,
            vec![
                (KeymapTable::Default, 3),
                (KeymapTable::Shift, 1),
                (KeymapTable::Alt, 0),
                (KeymapTable::ModifierRelease, 1),
            ]
        );
        assert_eq!(report.modifiers, vec![Key::LeftShift, Key::CapsLock]);
    }

    #[test]
    fn test_caps_lock_needs_no_release_code() {
        let keymap = Keymap::builder("caps").default_key(0x74, Key::CapsLock).build();

        assert!(inspect_keymap(&keymap).is_clean());
    }

    #[test]
    fn test_momentary_modifier_without_release_is_flagged() {
        let keymap = Keymap::builder("stuck").default_key(0x72, Key::LeftAlt).build();

        let report = inspect_keymap(&keymap);

        assert_eq!(
            report.warnings,
            vec![KeymapWarning::ModifierWithoutRelease { key: Key::LeftAlt }]
        );
    }

    #[test]
    fn test_release_of_ordinary_key_is_flagged() {
        let keymap = Keymap::builder("odd")
            .modifier_release(0xc0, Key::LowerA)
            .build();

        let report = inspect_keymap(&keymap);

        assert_eq!(
            report.warnings,
            vec![KeymapWarning::ReleaseOfOrdinaryKey {
                scan_code: 0xc0,
                key: Key::LowerA
            }]
        );
    }

    #[test]
    fn test_ordinary_release_code_does_not_shadow_default() {
        // Arrange: 0xc0 decodes to Enter because LowerA is not a modifier
        let keymap = Keymap::builder("overlap")
            .default_key(0xc0, Key::Enter)
            .modifier_release(0xc0, Key::LowerA)
            .build();

        // Act
        let report = inspect_keymap(&keymap);

        // Assert
        assert_eq!(
            report.warnings,
            vec![KeymapWarning::ReleaseOfOrdinaryKey {
                scan_code: 0xc0,
                key: Key::LowerA
            }]
        );
        let decoded = coax_core::KeyboardDecoder::new(&keymap).decode(0xc0);
        assert_eq!(decoded.key, Some(Key::Enter));
    }

    #[test]
    fn test_release_code_shadowing_default_is_flagged() {
        let keymap = Keymap::builder("shadow")
            .default_key(0x70, Key::LeftShift)
            .default_key(0xf0, Key::Enter)
            .modifier_release(0xf0, Key::LeftShift)
            .build();

        let report = inspect_keymap(&keymap);

        assert_eq!(
            report.warnings,
            vec![KeymapWarning::ShadowedDefault {
                scan_code: 0xf0,
                key: Key::Enter
            }]
        );
    }

    #[test]
    fn test_write_report_lists_tables_and_warnings() {
        // Arrange
        let keymap = Keymap::builder("stuck").default_key(0x72, Key::LeftAlt).build();
        let report = inspect_keymap(&keymap);
        let mut output = Vec::new();

        // Act
        write_report(&report, &mut output).expect("write");

        // Assert
        let text = String::from_utf8(output).unwrap();
        assert_eq!(
            text,
            "keymap: stuck\n  [default] 1 entries\n  [shift] 0 entries\n  [alt] 0 entries\n  \
             [modifier_release] 0 entries\n  modifiers: LeftAlt\n\
             warning: LeftAlt can be pressed but has no release code\n"
        );
    }
}
