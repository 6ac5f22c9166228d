//! TFT Pixel Burst Engine
//!
//! The lowest layer of a TFT display driver: turns "fill N pixels with color
//! C" and "send this buffer of M pixels" into register bursts on a serial
//! peripheral, or into byte strobes on an 8-bit parallel bus.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - `embedded-graphics` color conversion (with `graphics` feature)
//! - 32 pixel burst batching with remainder handling
//! - Slot reuse across bursts for solid fills
//! - RGB565 byte-order correction
//! - Single-burst 16/32-bit writes and address window setup
//! - 8-bit parallel read-back and bus direction control
//! - Setup command table runner
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use tft_burst::registers::BurstRegisters;
//! use tft_burst::{Builder, Color, Display, SpiBus, command};
//!
//! # struct Regs;
//! # impl BurstRegisters for Regs {
//! #     fn set_length(&mut self, _field: u32) {}
//! #     fn write_slot(&mut self, _index: usize, _word: u32) {}
//! #     fn start(&mut self) {}
//! #     fn is_busy(&mut self) -> bool { false }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let mut delay = MockDelay;
//! # let setup_table: &[u8] = &[0];
//! let config = match Builder::new().swap_bytes(true).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//! let mut display = Display::new(SpiBus::new(Regs), MockPin, config);
//! let _ = display.run_command_list(setup_table, &mut delay);
//!
//! let _ = display.write_command(command::MEMORY_WRITE);
//! display.fill(Color::BLUE, 128 * 160);
//! ```

#![no_std]

#[cfg(test)]
extern crate alloc;

/// Burst window decomposition
pub mod burst;
/// 16-bit pixel color
pub mod color;
/// Setup command tables and DCS opcodes
pub mod command;
/// Bus configuration types and builder
pub mod config;
/// Display device context
pub mod display;
/// Error types for the driver
pub mod error;
/// Bus strategy abstraction
pub mod interface;
/// 8-bit parallel bus over GPIO
pub mod parallel;
/// Peripheral register abstraction
pub mod registers;
/// Serial bus burst engine
pub mod spi;
/// Byte-swap transforms
pub mod swap;

#[cfg(test)]
mod testing;

pub use color::Color;
pub use config::{Builder, Config, DataLines, PadConfig};
pub use display::{Display, TransferKind, TransferRequest};
pub use error::{BuilderError, Error};
pub use interface::{BusWidth, LineMode, PixelBus};
pub use parallel::{GpioPort, ParallelBus};
pub use registers::BurstRegisters;
pub use spi::SpiBus;
