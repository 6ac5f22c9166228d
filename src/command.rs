//! Display setup command lists
//!
//! Controller setup sequences are stored as compact byte tables and replayed
//! by [`Display::run_command_list`](crate::display::Display::run_command_list).
//! This module defines the table format, a parser for it, and the MIPI DCS
//! opcodes shared by most TFT controllers.
//!
//! ## Table Format
//!
//! ```text
//! count                      number of commands in the table
//! opcode, n, arg * (n & 0x7F) [, delay]   repeated `count` times
//! ```
//!
//! Bit 7 of `n` ([`DELAY_FLAG`]) means a delay byte follows the arguments.
//! The delay is in milliseconds, except that 255 means [`LONG_DELAY_MS`].
//!
//! ## Example
//!
//! ```
//! use tft_burst::command::{self, CommandList, DELAY_FLAG};
//!
//! let table = [
//!     2,
//!     command::SLEEP_OUT, DELAY_FLAG, 120,
//!     command::PIXEL_FORMAT, 1, 0x55,
//! ];
//!
//! let mut list = CommandList::new(&table);
//! let first = list.next().unwrap().unwrap();
//! assert_eq!(first.opcode, command::SLEEP_OUT);
//! assert_eq!(first.delay_ms, Some(120));
//!
//! let second = list.next().unwrap().unwrap();
//! assert_eq!(second.args, &[0x55]);
//! assert!(list.next().is_none());
//! ```

// MIPI DCS commands

/// No operation (0x00)
pub const NOP: u8 = 0x00;

/// Software reset (0x01)
///
/// Wait at least 5 ms before the next command.
pub const SOFT_RESET: u8 = 0x01;

/// Sleep out (0x11)
///
/// Wait 120 ms before the next command.
pub const SLEEP_OUT: u8 = 0x11;

/// Normal display mode on (0x13)
pub const NORMAL_MODE: u8 = 0x13;

/// Display inversion off (0x20)
pub const INVERSION_OFF: u8 = 0x20;

/// Display inversion on (0x21)
pub const INVERSION_ON: u8 = 0x21;

/// Display off (0x28)
pub const DISPLAY_OFF: u8 = 0x28;

/// Display on (0x29)
pub const DISPLAY_ON: u8 = 0x29;

/// Column address set (0x2A)
///
/// Requires 4 bytes: [start_MSB, start_LSB, end_MSB, end_LSB]
pub const COLUMN_ADDRESS: u8 = 0x2A;

/// Row (page) address set (0x2B)
///
/// Requires 4 bytes: [start_MSB, start_LSB, end_MSB, end_LSB]
pub const ROW_ADDRESS: u8 = 0x2B;

/// Memory write (0x2C)
///
/// Pixel data follows until the next command.
pub const MEMORY_WRITE: u8 = 0x2C;

/// Memory read (0x2E)
pub const MEMORY_READ: u8 = 0x2E;

/// Memory access control (0x36)
///
/// Requires 1 byte: scan direction and RGB/BGR order.
pub const MEMORY_ACCESS_CONTROL: u8 = 0x36;

/// Interface pixel format (0x3A)
///
/// Requires 1 byte: 0x55 selects 16-bit RGB565.
pub const PIXEL_FORMAT: u8 = 0x3A;

// Table format

/// Argument count flag: a delay byte follows the arguments
pub const DELAY_FLAG: u8 = 0x80;

/// Delay byte value that stands for [`LONG_DELAY_MS`]
pub const LONG_DELAY: u8 = 255;

/// Delay applied for a [`LONG_DELAY`] byte
pub const LONG_DELAY_MS: u16 = 500;

/// One command decoded from a table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommandRecord<'a> {
    /// Command opcode
    pub opcode: u8,
    /// Argument bytes sent as data after the opcode
    pub args: &'a [u8],
    /// Delay to wait after the arguments
    pub delay_ms: Option<u16>,
}

/// Command table ended in the middle of a record
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Truncated {
    /// Byte offset where more data was expected
    pub offset: usize,
}

impl<E> From<Truncated> for crate::error::Error<E> {
    fn from(truncated: Truncated) -> Self {
        Self::TruncatedCommandList {
            offset: truncated.offset,
        }
    }
}

/// Lazy parser over a command table
///
/// Yields at most as many records as the table's leading count. After a
/// [`Truncated`] error the iterator is exhausted.
#[derive(Clone, Debug)]
pub struct CommandList<'a> {
    table: &'a [u8],
    offset: usize,
    remaining: u8,
}

impl<'a> CommandList<'a> {
    /// Start parsing `table`
    ///
    /// An empty table holds no commands.
    pub fn new(table: &'a [u8]) -> Self {
        let remaining = table.first().copied().unwrap_or(0);
        Self {
            table,
            offset: 1,
            remaining,
        }
    }

    /// Number of commands not yet parsed
    pub fn remaining(&self) -> u8 {
        self.remaining
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], Truncated> {
        let end = self.offset + len;
        let bytes = self.table.get(self.offset..end).ok_or(Truncated {
            offset: self.table.len().max(self.offset),
        })?;
        self.offset = end;
        Ok(bytes)
    }

    fn parse(&mut self) -> Result<CommandRecord<'a>, Truncated> {
        let header = self.take(2)?;
        let (opcode, count) = (header[0], header[1]);
        let args = self.take(usize::from(count & !DELAY_FLAG))?;
        let delay_ms = if count & DELAY_FLAG != 0 {
            let delay = self.take(1)?[0];
            Some(if delay == LONG_DELAY {
                LONG_DELAY_MS
            } else {
                u16::from(delay)
            })
        } else {
            None
        };
        Ok(CommandRecord {
            opcode,
            args,
            delay_ms,
        })
    }
}

impl<'a> Iterator for CommandList<'a> {
    type Item = Result<CommandRecord<'a>, Truncated>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let record = self.parse();
        if record.is_err() {
            self.remaining = 0;
        }
        Some(record)
    }
}
