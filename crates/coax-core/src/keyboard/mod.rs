//! Keyboard scan code decoding.
//!
//! The canonical representation is [`Key`]: a layout-independent identity for
//! every key a terminal keyboard can produce.  Scan codes are translated to
//! keys at the decoder boundary using a per-layout [`Keymap`].
//!
//! [`Key`]: key::Key
//! [`Keymap`]: keymap::Keymap

pub mod decoder;
pub mod key;
pub mod keymap;
pub mod modifiers;

pub use decoder::{DecodedKey, KeyboardDecoder};
pub use key::Key;
pub use keymap::Keymap;
pub use modifiers::{Modifier, ModifierFlags};
