//! Status line writer.
//!
//! The status line is the bottom row of the terminal, outside the area a host
//! session draws into.  This module only composes *encode, then delegate*:
//! text is turned into glyph bytes and handed to a [`DisplayInterface`], which
//! owns addressing and the wire.  Laying out indicators on the line is left to
//! callers.

use thiserror::Error;

use super::glyph::{encode_string, EncodeError, ErrorPolicy};

/// Width of the status line on 80-column models.
pub const DEFAULT_COLUMNS: u16 = 80;

/// Error reported by a [`DisplayInterface`] implementation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("transport error: {0}")]
    Transport(String),
}

/// Error type for status line writes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatusLineError {
    /// The data would run past the end of the status line.
    #[error("write of {len} bytes at column {column} exceeds status line width {columns}")]
    OutOfBounds { column: u16, len: usize, columns: u16 },

    /// The text could not be normalized under the requested policy.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// The interface failed to transmit the data.
    #[error(transparent)]
    Interface(#[from] InterfaceError),
}

/// The controller interface that transmits display writes.
///
/// Implemented outside this crate by whatever drives the physical link.
#[cfg_attr(test, mockall::automock)]
pub trait DisplayInterface {
    /// Writes `data` starting at buffer `address`.
    ///
    /// When `restore_original_address` is set the interface puts the cursor
    /// address back where it was once the write completes.
    fn offload_write(
        &self,
        data: &[u8],
        address: u16,
        restore_original_address: bool,
    ) -> Result<(), InterfaceError>;
}

/// Writes glyphs to the status line through a borrowed interface.
pub struct StatusLine<'a, I: DisplayInterface + ?Sized> {
    interface: &'a I,
    columns: u16,
}

impl<'a, I: DisplayInterface + ?Sized> StatusLine<'a, I> {
    /// Creates a status line of [`DEFAULT_COLUMNS`] columns.
    pub fn new(interface: &'a I) -> Self {
        Self::with_columns(interface, DEFAULT_COLUMNS)
    }

    /// Creates a status line of `columns` columns (132 on wide models).
    pub fn with_columns(interface: &'a I, columns: u16) -> Self {
        Self { interface, columns }
    }

    pub fn columns(&self) -> u16 {
        self.columns
    }

    /// Writes raw glyph bytes at `column`, restoring the cursor address afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`StatusLineError::OutOfBounds`] without touching the interface
    /// if the data does not fit, or [`StatusLineError::Interface`] if the
    /// transmission fails.
    pub fn write(&self, column: u16, data: &[u8]) -> Result<(), StatusLineError> {
        if usize::from(column) + data.len() > usize::from(self.columns) {
            return Err(StatusLineError::OutOfBounds {
                column,
                len: data.len(),
                columns: self.columns,
            });
        }
        self.interface.offload_write(data, column, true)?;
        Ok(())
    }

    /// Encodes `text` with [`ErrorPolicy::Replace`] and writes it at `column`.
    ///
    /// # Errors
    ///
    /// Same as [`StatusLine::write`].
    pub fn write_string(&self, column: u16, text: &str) -> Result<(), StatusLineError> {
        self.write_string_with(column, text, ErrorPolicy::Replace)
    }

    /// Encodes `text` under `policy` and writes it at `column`.
    ///
    /// # Errors
    ///
    /// Returns [`StatusLineError::Encode`] if `policy` is strict and `text`
    /// is not ASCII, otherwise the same errors as [`StatusLine::write`].
    pub fn write_string_with(
        &self,
        column: u16,
        text: &str,
        policy: ErrorPolicy,
    ) -> Result<(), StatusLineError> {
        let data = encode_string(text, policy)?;
        self.write(column, &data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_delegates_with_restore_flag() {
        // Arrange
        let mut interface = MockDisplayInterface::new();
        interface
            .expect_offload_write()
            .withf(|data, address, restore| {
                data.to_vec() == vec![0x01, 0x02] && *address == 8 && *restore
            })
            .times(1)
            .returning(|_, _, _| Ok(()));
        let status_line = StatusLine::new(&interface);

        // Act / Assert
        status_line.write(8, &[0x01, 0x02]).unwrap();
    }

    #[test]
    fn test_write_string_encodes_before_delegating() {
        // Arrange: "VT100" → V T 1 0 0
        let mut interface = MockDisplayInterface::new();
        interface
            .expect_offload_write()
            .withf(|data, address, restore| {
                data.to_vec() == vec![0xB5, 0xB3, 0x21, 0x20, 0x20] && *address == 45 && *restore
            })
            .times(1)
            .returning(|_, _, _| Ok(()));
        let status_line = StatusLine::new(&interface);

        // Act / Assert
        status_line.write_string(45, "VT100").unwrap();
    }

    #[test]
    fn test_write_string_replaces_non_ascii_by_default() {
        let mut interface = MockDisplayInterface::new();
        interface
            .expect_offload_write()
            .withf(|data, address, _| data.to_vec() == vec![0x18] && *address == 0)
            .times(1)
            .returning(|_, _, _| Ok(()));
        let status_line = StatusLine::new(&interface);

        status_line.write_string(0, "é").unwrap();
    }

    #[test]
    fn test_write_string_with_strict_policy_fails_before_delegating() {
        let mut interface = MockDisplayInterface::new();
        interface.expect_offload_write().never();
        let status_line = StatusLine::new(&interface);

        let err = status_line
            .write_string_with(0, "né", ErrorPolicy::Strict)
            .unwrap_err();

        assert_eq!(
            err,
            StatusLineError::Encode(EncodeError::NonAscii {
                character: 'é',
                position: 1
            })
        );
    }

    #[test]
    fn test_write_past_end_of_line_is_rejected() {
        // Arrange
        let mut interface = MockDisplayInterface::new();
        interface.expect_offload_write().never();
        let status_line = StatusLine::new(&interface);

        // Act
        let err = status_line.write(78, &[0x80, 0x81, 0x82]).unwrap_err();

        // Assert
        assert_eq!(
            err,
            StatusLineError::OutOfBounds {
                column: 78,
                len: 3,
                columns: 80
            }
        );
    }

    #[test]
    fn test_write_ending_exactly_at_last_column_is_accepted() {
        let mut interface = MockDisplayInterface::new();
        interface
            .expect_offload_write()
            .times(1)
            .returning(|_, _, _| Ok(()));
        let status_line = StatusLine::with_columns(&interface, 132);

        status_line.write(130, &[0x80, 0x81]).unwrap();
        assert_eq!(status_line.columns(), 132);
    }

    #[test]
    fn test_interface_failure_is_propagated() {
        let mut interface = MockDisplayInterface::new();
        interface
            .expect_offload_write()
            .returning(|_, _, _| Err(InterfaceError::Transport("link down".into())));
        let status_line = StatusLine::new(&interface);

        let err = status_line.write_string(0, "S").unwrap_err();

        assert_eq!(
            err,
            StatusLineError::Interface(InterfaceError::Transport("link down".into()))
        );
    }
}
