//! Bus strategy abstraction
//!
//! This module provides the [`PixelBus`] trait, the seam between the
//! [`Display`](crate::display::Display) device context and the bus it drives.
//! A strategy is picked once, when the display is built:
//!
//! - [`SpiBus`](crate::spi::SpiBus): serial bus driven through the burst
//!   peripheral registers
//! - [`ParallelBus`](crate::parallel::ParallelBus): 8-bit parallel bus driven
//!   through GPIO
//!
//! Both expose the same capability set: solid fills, pixel sequences, single
//! bytes and 16/32-bit values, and (parallel only) byte read-back and direction switching.
//!
//! ## Example
//!
//! ```
//! use tft_burst::registers::BurstRegisters;
//! use tft_burst::{BusWidth, Color, PixelBus, SpiBus};
//!
//! # #[derive(Default)]
//! # struct Regs { starts: u32 }
//! # impl BurstRegisters for Regs {
//! #     fn set_length(&mut self, _field: u32) {}
//! #     fn write_slot(&mut self, _index: usize, _word: u32) {}
//! #     fn start(&mut self) { self.starts += 1; }
//! #     fn is_busy(&mut self) -> bool { false }
//! # }
//! let mut bus = SpiBus::new(Regs::default());
//! assert_eq!(SpiBus::<Regs>::BUS_WIDTH, BusWidth::Serial);
//!
//! bus.fill(Color::RED, 40);
//! assert_eq!(bus.read_byte(), None);
//! ```

use crate::color::Color;

/// Width of the display data bus
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BusWidth {
    /// Serial (SPI) bus driven through the burst peripheral
    #[default]
    Serial,
    /// 8-bit parallel bus driven through GPIO
    Parallel8,
}

/// Direction of the parallel data lines
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineMode {
    /// Lines are inputs (controller drives the bus, reads)
    Input,
    /// Lines are outputs (host drives the bus, writes)
    Output,
}

/// Pixel transfer strategy for one bus type
///
/// Transfers are synchronous and never fail. A call may return while its last
/// burst is still on the wire; every method that touches the bus waits for
/// the previous transfer to finish first, and callers that need to touch
/// shared lines (data/command select, chip select) call
/// [`wait_idle`](Self::wait_idle) first.
pub trait PixelBus {
    /// Bus width this strategy drives
    const BUS_WIDTH: BusWidth;

    /// Send `color` `count` times
    ///
    /// A count of zero does nothing.
    fn fill(&mut self, color: Color, count: u32);

    /// Send the first `count` pixels of `pixels` in order
    ///
    /// With `swap_bytes` set, each pixel's bytes are swapped on the way out.
    /// A count larger than the buffer is clamped to the buffer length.
    fn write_pixels(&mut self, pixels: &[u16], count: u32, swap_bytes: bool);

    /// Send one byte
    fn write_byte(&mut self, byte: u8);

    /// Send a 16-bit value, most significant byte first
    ///
    /// The default sends the two bytes one at a time.
    fn write_u16(&mut self, value: u16) {
        for byte in value.to_be_bytes() {
            self.write_byte(byte);
        }
    }

    /// Send a 32-bit value, most significant byte first
    ///
    /// The default sends the four bytes one at a time.
    fn write_u32(&mut self, value: u32) {
        for byte in value.to_be_bytes() {
            self.write_byte(byte);
        }
    }

    /// Send a start/end coordinate pair as one 32-bit value
    ///
    /// This is the argument layout of the column and row address commands:
    /// `start` then `end`, each most significant byte first.
    fn write_coordinates(&mut self, start: u16, end: u16) {
        self.write_u32(coordinate_pair(start, end));
    }

    /// Block until no transfer is in flight
    fn wait_idle(&mut self);

    /// Read one byte back from the controller
    ///
    /// Only a parallel bus can read; the default returns `None`.
    fn read_byte(&mut self) -> Option<u8> {
        None
    }

    /// Switch the direction of the data lines
    ///
    /// Only meaningful on a parallel bus; the default does nothing.
    fn set_line_mode(&mut self, _mode: LineMode) {}
}

/// Pack a coordinate pair so that `start` goes out first
pub const fn coordinate_pair(start: u16, end: u16) -> u32 {
    ((start as u32) << 16) | end as u32
}

/// Clamp a requested pixel count to what `pixels` holds
pub(crate) fn clamp_count(pixels: &[u16], count: u32) -> u32 {
    let available = u32::try_from(pixels.len()).unwrap_or(u32::MAX);
    if count > available {
        log::warn!(
            "pixel count {} exceeds buffer of {} pixels, clamping",
            count,
            available
        );
        available
    } else {
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_count() {
        let pixels = [0u16; 5];
        assert_eq!(clamp_count(&pixels, 3), 3);
        assert_eq!(clamp_count(&pixels, 5), 5);
        assert_eq!(clamp_count(&pixels, 6), 5);
        assert_eq!(clamp_count(&[], 10), 0);
    }

    #[test]
    fn test_coordinate_pair() {
        assert_eq!(coordinate_pair(0x0001, 0x007F), 0x0001_007F);
        assert_eq!(coordinate_pair(0x0102, 0x0304).to_be_bytes(), [1, 2, 3, 4]);
    }

    #[test]
    fn test_default_wide_writes_go_byte_by_byte() {
        #[derive(Default)]
        struct Bytes(alloc::vec::Vec<u8>);

        impl PixelBus for Bytes {
            const BUS_WIDTH: BusWidth = BusWidth::Parallel8;
            fn fill(&mut self, _color: Color, _count: u32) {}
            fn write_pixels(&mut self, _pixels: &[u16], _count: u32, _swap_bytes: bool) {}
            fn write_byte(&mut self, byte: u8) {
                self.0.push(byte);
            }
            fn wait_idle(&mut self) {}
        }

        let mut bus = Bytes::default();
        bus.write_u16(0xABCD);
        bus.write_u32(0x0102_0304);
        bus.write_coordinates(0x0010, 0x009F);
        assert_eq!(
            bus.0,
            [0xAB, 0xCD, 0x01, 0x02, 0x03, 0x04, 0x00, 0x10, 0x00, 0x9F]
        );
    }

    #[test]
    fn test_bus_width_default_is_serial() {
        assert_eq!(BusWidth::default(), BusWidth::Serial);
    }
}
