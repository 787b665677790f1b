//! # coax-core
//!
//! Shared library for coax-attached terminals containing the keyboard scan
//! code decoder, the logical key set, and the display glyph codec.
//!
//! It has zero dependencies on OS APIs, serial adapters, or host sessions.
//!
//! # Architecture overview (for beginners)
//!
//! A coax terminal talks to its controller through two very different byte
//! streams.  Keystrokes arrive as raw **scan codes**: numbers that identify a
//! physical key transition and say nothing about what is printed on the key
//! cap.  Text going the other way must be sent as **glyph bytes**: positions in
//! the terminal's own character generator, which is not ASCII.
//!
//! This crate (`coax-core`) converts in both directions:
//!
//! - **`keyboard`** – Turns scan codes into logical [`Key`] values while
//!   tracking Shift, Alt and Caps Lock.  The layout-specific part (which scan
//!   code is which key) is data, supplied as a [`Keymap`].
//!
//! - **`display`** – Turns ASCII text into glyph bytes and hands them to the
//!   interface that owns the wire, for example to draw on the status line.

pub mod display;
pub mod keyboard;

// Re-export the most-used types at the crate root so callers can write
// `coax_core::KeyboardDecoder` instead of `coax_core::keyboard::decoder::KeyboardDecoder`.
pub use display::glyph::{
    decode_glyph, encode_character, encode_string, EncodeError, ErrorPolicy, ParseErrorPolicyError,
    NO_GLYPH,
};
pub use display::status_line::{DisplayInterface, InterfaceError, StatusLine, StatusLineError};
pub use keyboard::decoder::{DecodedKey, KeyboardDecoder, KeyboardError};
pub use keyboard::key::{decode_key_to_character, Key, KeyCategory};
pub use keyboard::keymap::{parse_scan_code, Keymap, KeymapBuilder, KeymapError, KeymapTable, ScanCode};
pub use keyboard::modifiers::{Modifier, ModifierFlags};
