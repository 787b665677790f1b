//! Display output: glyph encoding and the status line.

pub mod glyph;
pub mod status_line;

pub use glyph::{decode_glyph, encode_character, encode_string, ErrorPolicy};
pub use status_line::{DisplayInterface, StatusLine};
