//! KeyboardDecoder: turns a stream of scan codes into keys plus modifier state.
//!
//! The decoder owns exactly one piece of mutable state, the live
//! [`ModifierFlags`], and borrows a [`Keymap`] for its whole lifetime.
//!
//! # Decoding one scan code (for beginners)
//!
//! 1. Look the scan code up in the keymap's `default` table.
//! 2. **Modifiers first.**  If the scan code is a release code for a modifier,
//!    or its default key *is* a modifier, update the modifier state and stop.
//!    The caller gets a [`DecodedKey`] with `is_modifier == true`.
//! 3. Otherwise pick the layer: `shift` if Shift is held, else `alt` if Alt is
//!    held, else the default key from step 1.  A held layer is authoritative:
//!    a scan code missing from it decodes to no key at all.
//! 4. With Caps Lock on, letters are folded to upper case, or to lower case
//!    when Shift is also held.
//!
//! Decoding never fails.  An unknown scan code decodes to `key: None`.
//!
//! Calls must be serialized by the caller: one decoder per physical keyboard,
//! driven from a single event path.

use thiserror::Error;
use tracing::{debug, trace};

use super::key::Key;
use super::keymap::{Keymap, ScanCode};
use super::modifiers::{Modifier, ModifierFlags};

/// Error type for decoder construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyboardError {
    /// No keymap was supplied for the attached keyboard.
    #[error("keymap is required")]
    MissingKeymap,
}

/// Result of decoding a single scan code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedKey {
    /// The resolved key, or `None` if the scan code means nothing under the
    /// current modifiers.
    pub key: Option<Key>,
    /// Modifier state after this scan code was applied.
    pub modifiers: ModifierFlags,
    /// `true` if the scan code changed (or was a no-op release of) a modifier.
    pub is_modifier: bool,
}

/// Stateful scan code decoder for one attached keyboard.
#[derive(Debug, Clone)]
pub struct KeyboardDecoder<'a> {
    keymap: &'a Keymap,
    modifiers: ModifierFlags,
}

impl<'a> KeyboardDecoder<'a> {
    /// Creates a decoder with all modifiers released.
    pub fn new(keymap: &'a Keymap) -> Self {
        Self {
            keymap,
            modifiers: ModifierFlags::NONE,
        }
    }

    /// Creates a decoder from an optional keymap, as returned by a layout lookup.
    ///
    /// # Errors
    ///
    /// Returns [`KeyboardError::MissingKeymap`] immediately if `keymap` is
    /// `None`, rather than deferring the failure to the first decode.
    pub fn try_new(keymap: Option<&'a Keymap>) -> Result<Self, KeyboardError> {
        keymap.map(Self::new).ok_or(KeyboardError::MissingKeymap)
    }

    /// The keymap this decoder translates with.
    pub fn keymap(&self) -> &'a Keymap {
        self.keymap
    }

    /// Current modifier state.
    pub fn modifiers(&self) -> ModifierFlags {
        self.modifiers
    }

    /// Releases every modifier, including a latched Caps Lock.
    pub fn reset(&mut self) {
        self.modifiers = ModifierFlags::NONE;
    }

    /// Decodes one scan code, updating the modifier state.
    pub fn decode(&mut self, scan_code: ScanCode) -> DecodedKey {
        let candidate = self.keymap.default_key(scan_code);

        if self.apply_modifiers(scan_code, candidate) {
            return DecodedKey {
                key: candidate,
                modifiers: self.modifiers,
                is_modifier: true,
            };
        }

        // Shift wins over Alt when both are held.
        let key = if self.modifiers.is_shift() {
            self.keymap.shift_key(scan_code)
        } else if self.modifiers.is_alt() {
            self.keymap.alt_key(scan_code)
        } else {
            candidate
        };

        let key = match key {
            Some(key) => self.fold_case(key),
            None => {
                trace!(
                    "scan code 0x{scan_code:02x} has no key under modifiers {:?}",
                    self.modifiers
                );
                return DecodedKey {
                    key: None,
                    modifiers: self.modifiers,
                    is_modifier: false,
                };
            }
        };

        DecodedKey {
            key: Some(key),
            modifiers: self.modifiers,
            is_modifier: false,
        }
    }

    /// Updates the modifier state for `scan_code`.
    ///
    /// Returns `true` if the scan code was a modifier event, in which case no
    /// key resolution should follow.
    fn apply_modifiers(&mut self, scan_code: ScanCode, candidate: Option<Key>) -> bool {
        if let Some(released) = self.keymap.released_key(scan_code) {
            // Releases of ordinary keys carry no action and decode normally.
            if let Some(modifier) = Modifier::from_key(released) {
                self.modifiers.release(modifier);
                debug!(
                    "released {modifier:?} (scan code 0x{scan_code:02x}), modifiers now {:?}",
                    self.modifiers
                );
                return true;
            }
            return false;
        }

        match candidate.and_then(Modifier::from_key) {
            Some(modifier) => {
                self.modifiers.press(modifier);
                debug!(
                    "pressed {modifier:?} (scan code 0x{scan_code:02x}), modifiers now {:?}",
                    self.modifiers
                );
                true
            }
            None => false,
        }
    }

    /// Caps Lock alone upper-cases letters; Caps Lock with Shift lower-cases them.
    fn fold_case(&self, key: Key) -> Key {
        if !self.modifiers.is_caps_lock() || !key.is_alphabetic() {
            return key;
        }
        if self.modifiers.is_shift() {
            key.to_lowercase()
        } else {
            key.to_uppercase()
        }
    }
}
