//! Application layer: one use case per `coax-keytool` subcommand.

pub mod decode_stream;
pub mod encode_text;
pub mod inspect_keymap;

use thiserror::Error;

use coax_core::EncodeError;

/// Error type shared by the use cases.
#[derive(Debug, Error)]
pub enum ToolError {
    /// A non-blank input line is not a scan code.
    #[error("line {line}: {raw:?} is not a scan code")]
    InvalidScanCode { line: usize, raw: String },

    /// Text could not be encoded under the strict policy.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
