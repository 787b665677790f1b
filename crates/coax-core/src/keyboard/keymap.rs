//! Per-layout scan code tables.
//!
//! A [`Keymap`] tells the decoder which [`Key`] each scan code produces on one
//! particular physical keyboard model.  It is made of four tables:
//!
//! | Table              | Consulted when…                                         |
//! |--------------------|---------------------------------------------------------|
//! | `default`          | always, first; decides whether a scan code is a modifier |
//! | `shift`            | a Shift modifier is held                                |
//! | `alt`              | an Alt modifier is held (and no Shift)                  |
//! | `modifier_release` | the scan code announces that a key was released         |
//!
//! A scan code missing from a table simply means "no key under these
//! conditions"; it is not an error.
//!
//! # File format
//!
//! Keymaps are usually shipped as TOML.  Table keys are scan codes written in
//! decimal or `0x` hexadecimal; values are key names:
//!
//! ```toml
//! name = "demo"
//!
//! [default]
//! 0x4c = "LOWER_A"
//! 0x51 = "LEFT_SHIFT"
//! 0x54 = "CAPS_LOCK"
//!
//! [shift]
//! 0x4c = "UPPER_A"
//!
//! [modifier_release]
//! 0xd1 = "LEFT_SHIFT"
//! ```
//!
//! TOML only allows string keys, so scan codes are parsed from the key text
//! here rather than by serde.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::key::Key;

/// A transport-level number identifying a physical key transition.
pub type ScanCode = u16;

/// Errors that can occur while loading or saving a keymap.
#[derive(Debug, Error)]
pub enum KeymapError {
    /// The keymap file could not be read.
    #[error("I/O error reading keymap at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed (including unknown key names).
    #[error("failed to parse keymap TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The keymap could not be serialized to TOML.
    #[error("failed to serialize keymap: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A table key is not a decimal or `0x` hexadecimal scan code.
    #[error("invalid scan code {raw:?} in [{table}] table")]
    InvalidScanCode { table: KeymapTable, raw: String },

    /// The same scan code is written twice (e.g. as `76` and `0x4c`) in one table.
    #[error("scan code 0x{scan_code:02x} appears more than once in [{table}] table")]
    DuplicateScanCode { table: KeymapTable, scan_code: ScanCode },
}

/// Names one of the four tables of a [`Keymap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeymapTable {
    Default,
    Shift,
    Alt,
    ModifierRelease,
}

impl KeymapTable {
    /// All tables, in file order.
    pub const ALL: [KeymapTable; 4] = [
        KeymapTable::Default,
        KeymapTable::Shift,
        KeymapTable::Alt,
        KeymapTable::ModifierRelease,
    ];

    /// Returns the TOML table name.
    pub fn as_str(self) -> &'static str {
        match self {
            KeymapTable::Default => "default",
            KeymapTable::Shift => "shift",
            KeymapTable::Alt => "alt",
            KeymapTable::ModifierRelease => "modifier_release",
        }
    }
}

impl fmt::Display for KeymapTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable scan code tables for one keyboard layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
    name: String,
    default: HashMap<ScanCode, Key>,
    shift: HashMap<ScanCode, Key>,
    alt: HashMap<ScanCode, Key>,
    modifier_release: HashMap<ScanCode, Key>,
}

impl Keymap {
    /// Creates a keymap from its four tables.
    pub fn new(
        name: impl Into<String>,
        default: HashMap<ScanCode, Key>,
        shift: HashMap<ScanCode, Key>,
        alt: HashMap<ScanCode, Key>,
        modifier_release: HashMap<ScanCode, Key>,
    ) -> Self {
        Self {
            name: name.into(),
            default,
            shift,
            alt,
            modifier_release,
        }
    }

    /// Starts building a keymap entry by entry.
    pub fn builder(name: impl Into<String>) -> KeymapBuilder {
        KeymapBuilder {
            keymap: Keymap::new(
                name,
                HashMap::new(),
                HashMap::new(),
                HashMap::new(),
                HashMap::new(),
            ),
        }
    }

    /// Human-readable layout name (e.g. the keyboard model).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Looks up `scan_code` in one table.
    pub fn lookup(&self, table: KeymapTable, scan_code: ScanCode) -> Option<Key> {
        self.table(table).get(&scan_code).copied()
    }

    /// Key produced by `scan_code` with no modifier held.
    pub fn default_key(&self, scan_code: ScanCode) -> Option<Key> {
        self.lookup(KeymapTable::Default, scan_code)
    }

    /// Key produced by `scan_code` while Shift is held.
    pub fn shift_key(&self, scan_code: ScanCode) -> Option<Key> {
        self.lookup(KeymapTable::Shift, scan_code)
    }

    /// Key produced by `scan_code` while Alt is held.
    pub fn alt_key(&self, scan_code: ScanCode) -> Option<Key> {
        self.lookup(KeymapTable::Alt, scan_code)
    }

    /// The key whose release `scan_code` announces, if it is a release code.
    pub fn released_key(&self, scan_code: ScanCode) -> Option<Key> {
        self.lookup(KeymapTable::ModifierRelease, scan_code)
    }

    /// Returns one table as a map.
    pub fn table(&self, table: KeymapTable) -> &HashMap<ScanCode, Key> {
        match table {
            KeymapTable::Default => &self.default,
            KeymapTable::Shift => &self.shift,
            KeymapTable::Alt => &self.alt,
            KeymapTable::ModifierRelease => &self.modifier_release,
        }
    }

    /// Parses a keymap from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`KeymapError::Parse`] for malformed TOML or unknown key names,
    /// [`KeymapError::InvalidScanCode`] / [`KeymapError::DuplicateScanCode`]
    /// for bad table keys.
    pub fn from_toml_str(text: &str) -> Result<Self, KeymapError> {
        let document: KeymapDocument = toml::from_str(text)?;
        Keymap::try_from(document)
    }

    /// Reads and parses a keymap file.
    ///
    /// # Errors
    ///
    /// Returns [`KeymapError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`Keymap::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, KeymapError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| KeymapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let keymap = Keymap::from_toml_str(&text)?;

        debug!(
            "loaded keymap {:?} from {} ({} default entries)",
            keymap.name,
            path.display(),
            keymap.default.len()
        );
        Ok(keymap)
    }

    /// Renders the keymap as TOML, with scan codes in hexadecimal form.
    ///
    /// # Errors
    ///
    /// Returns [`KeymapError::Serialize`] if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, KeymapError> {
        let document = KeymapDocument::from(self);
        Ok(toml::to_string_pretty(&document)?)
    }
}

/// Incremental [`Keymap`] construction, mostly for tests and built-in layouts.
#[derive(Debug, Clone)]
pub struct KeymapBuilder {
    keymap: Keymap,
}

impl KeymapBuilder {
    /// Maps `scan_code` to `key` in the default table.
    pub fn default_key(mut self, scan_code: ScanCode, key: Key) -> Self {
        self.keymap.default.insert(scan_code, key);
        self
    }

    /// Maps `scan_code` to `key` in the shift table.
    pub fn shift_key(mut self, scan_code: ScanCode, key: Key) -> Self {
        self.keymap.shift.insert(scan_code, key);
        self
    }

    /// Maps `scan_code` to `key` in the alt table.
    pub fn alt_key(mut self, scan_code: ScanCode, key: Key) -> Self {
        self.keymap.alt.insert(scan_code, key);
        self
    }

    /// Declares `scan_code` as the release code of `key`.
    pub fn modifier_release(mut self, scan_code: ScanCode, key: Key) -> Self {
        self.keymap.modifier_release.insert(scan_code, key);
        self
    }

    pub fn build(self) -> Keymap {
        self.keymap
    }
}

// ── File representation ───────────────────────────────────────────────────────

/// On-disk shape of a keymap: string-keyed tables, every table optional.
#[derive(Debug, Serialize, Deserialize)]
struct KeymapDocument {
    name: String,
    #[serde(default)]
    default: BTreeMap<String, Key>,
    #[serde(default)]
    shift: BTreeMap<String, Key>,
    #[serde(default)]
    alt: BTreeMap<String, Key>,
    #[serde(default)]
    modifier_release: BTreeMap<String, Key>,
}

impl TryFrom<KeymapDocument> for Keymap {
    type Error = KeymapError;

    fn try_from(document: KeymapDocument) -> Result<Self, Self::Error> {
        Ok(Keymap::new(
            document.name,
            parse_table(KeymapTable::Default, document.default)?,
            parse_table(KeymapTable::Shift, document.shift)?,
            parse_table(KeymapTable::Alt, document.alt)?,
            parse_table(KeymapTable::ModifierRelease, document.modifier_release)?,
        ))
    }
}

impl From<&Keymap> for KeymapDocument {
    fn from(keymap: &Keymap) -> Self {
        let render = |table: KeymapTable| {
            keymap
                .table(table)
                .iter()
                .map(|(scan_code, key)| (format!("0x{scan_code:02x}"), *key))
                .collect()
        };

        Self {
            name: keymap.name.clone(),
            default: render(KeymapTable::Default),
            shift: render(KeymapTable::Shift),
            alt: render(KeymapTable::Alt),
            modifier_release: render(KeymapTable::ModifierRelease),
        }
    }
}

fn parse_table(
    table: KeymapTable,
    entries: BTreeMap<String, Key>,
) -> Result<HashMap<ScanCode, Key>, KeymapError> {
    let mut parsed = HashMap::with_capacity(entries.len());
    for (raw, key) in entries {
        let scan_code = parse_scan_code(&raw).ok_or_else(|| KeymapError::InvalidScanCode {
            table,
            raw: raw.clone(),
        })?;
        if parsed.insert(scan_code, key).is_some() {
            return Err(KeymapError::DuplicateScanCode { table, scan_code });
        }
    }
    Ok(parsed)
}

/// Parses `"76"` or `"0x4c"` into a scan code.
///
/// Only bare digits are accepted; signs and empty digit strings are not.
pub fn parse_scan_code(raw: &str) -> Option<ScanCode> {
    let raw = raw.trim();
    let (digits, radix) = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => (hex, 16),
        None => (raw, 10),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    ScanCode::from_str_radix(digits, radix).ok()
}
