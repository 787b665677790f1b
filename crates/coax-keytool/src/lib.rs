//! # coax-keytool
//!
//! Library half of the `coax-keytool` binary.  Everything the binary does is
//! implemented here against generic readers and writers so it can be tested
//! without a terminal.
//!
//! # Module layout
//!
//! ```text
//! application/       One use case per subcommand
//!   decode_stream    scan codes on stdin → decoded events on stdout
//!   encode_text      text → glyph bytes as hex
//!   inspect_keymap   keymap file → summary and consistency warnings
//! infrastructure/
//!   config           config.toml discovery and loading
//! ```

pub mod application;
pub mod infrastructure;
