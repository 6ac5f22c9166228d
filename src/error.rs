//! Error types for the driver
//!
//! Pixel transfers themselves never fail: the register peripheral is assumed
//! to work and the engine chunks every count itself. Errors only appear at the
//! edges of the crate.
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`Error`] - Runtime errors from the data/command line and command lists
//!
//! ## Example
//!
//! ```
//! use tft_burst::{BuilderError, BusWidth, Builder, DataLines};
//!
//! // Parallel bus without data lines
//! let result = Builder::new().bus_width(BusWidth::Parallel8).build();
//! assert!(matches!(result, Err(BuilderError::MissingDataLines)));
//!
//! // Line number outside the GPIO bank
//! let result = DataLines::new([0, 1, 2, 3, 4, 5, 6, 40]);
//! assert!(matches!(result, Err(BuilderError::InvalidDataLine { line: 40 })));
//! ```

/// Number of GPIO lines in the bank the parallel data lines live in
pub const GPIO_LINE_COUNT: u8 = 32;

/// Largest pad drive strength value
pub const MAX_DRIVE_STRENGTH: u8 = 3;

/// Largest pad function select value
pub const MAX_FUNCTION_SELECT: u8 = 7;

/// Errors that can occur while talking to the display
///
/// Generic over the data/command pin error type.
#[derive(Debug)]
pub enum Error<PinErr> {
    /// Data/command select pin error
    Pin(PinErr),
    /// Command list ended in the middle of a record
    ///
    /// `offset` is the index of the first missing byte.
    TruncatedCommandList {
        /// Byte offset where more data was expected
        offset: usize,
    },
}

impl<PinErr: core::fmt::Debug> core::fmt::Display for Error<PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
            Self::TruncatedCommandList { offset } => {
                write!(f, "Command list truncated at byte {offset}")
            }
        }
    }
}

impl<PinErr: core::fmt::Debug> core::error::Error for Error<PinErr> {}

/// Errors that can occur when building configuration
#[derive(Debug, PartialEq, Eq)]
pub enum BuilderError {
    /// Parallel bus selected but no data lines were given
    ///
    /// [`Builder::data_lines()`](crate::config::Builder::data_lines) must be
    /// called for [`BusWidth::Parallel8`](crate::interface::BusWidth::Parallel8).
    MissingDataLines,
    /// Data line number outside the GPIO bank
    InvalidDataLine {
        /// Offending line number
        line: u8,
    },
    /// Same GPIO line used for two data bits
    DuplicateDataLine {
        /// Line number used twice
        line: u8,
    },
    /// Pad drive strength out of range
    InvalidDriveStrength {
        /// Requested value
        value: u8,
    },
    /// Pad function select out of range
    InvalidFunctionSelect {
        /// Requested value
        value: u8,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingDataLines => write!(f, "Parallel bus requires data lines"),
            Self::InvalidDataLine { line } => write!(
                f,
                "Invalid data line {line} (must be below {GPIO_LINE_COUNT})"
            ),
            Self::DuplicateDataLine { line } => {
                write!(f, "Data line {line} assigned more than once")
            }
            Self::InvalidDriveStrength { value } => write!(
                f,
                "Invalid drive strength {value} (max {MAX_DRIVE_STRENGTH})"
            ),
            Self::InvalidFunctionSelect { value } => write!(
                f,
                "Invalid function select {value} (max {MAX_FUNCTION_SELECT})"
            ),
        }
    }
}

impl core::error::Error for BuilderError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_builder_error_messages() {
        assert_eq!(
            BuilderError::InvalidDataLine { line: 40 }.to_string(),
            "Invalid data line 40 (must be below 32)"
        );
        assert_eq!(
            BuilderError::DuplicateDataLine { line: 4 }.to_string(),
            "Data line 4 assigned more than once"
        );
    }

    #[test]
    fn test_error_messages() {
        let err: Error<()> = Error::TruncatedCommandList { offset: 7 };
        assert_eq!(err.to_string(), "Command list truncated at byte 7");
        let err: Error<&str> = Error::Pin("stuck");
        assert_eq!(err.to_string(), "Pin error: \"stuck\"");
    }
}
