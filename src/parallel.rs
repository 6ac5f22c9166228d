//! 8-bit parallel bus over GPIO
//!
//! On a parallel bus the eight data lines are ordinary GPIO lines scattered
//! over one register bank. [`ParallelBus`] writes bytes by setting and
//! clearing those lines and strobing WR, reads bytes by strobing RD and
//! sampling the bank input register, and switches the lines between input and
//! output around reads.
//!
//! ## Hardware Requirements
//!
//! - A GPIO bank exposed through [`GpioPort`]
//! - 8 data lines in that bank, mapped by [`DataLines`]
//! - **WR**: write strobe (output, active low)
//! - **RD**: read strobe (output, active low)
//!
//! Strobe pins are expected to be plain push-pull GPIO that cannot fail. A
//! strobe error is logged with `log::warn!` and the transfer carries on.
//!
//! ## Reading
//!
//! The data lines must be inputs before a read:
//!
//! ```rust,no_run
//! # use core::convert::Infallible;
//! # use embedded_hal::digital::OutputPin;
//! # use tft_burst::{DataLines, LineMode, PadConfig, ParallelBus};
//! # use tft_burst::parallel::GpioPort;
//! # struct Bank;
//! # impl GpioPort for Bank {
//! #     fn read_input(&mut self) -> u32 { 0 }
//! #     fn set_high(&mut self, _mask: u32) {}
//! #     fn set_low(&mut self, _mask: u32) {}
//! #     fn enable_output(&mut self, _mask: u32) {}
//! #     fn disable_output(&mut self, _mask: u32) {}
//! #     fn configure_pad(&mut self, _line: u8, _pad: PadConfig) {}
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # let lines = match DataLines::new([12, 13, 26, 25, 17, 16, 27, 14]) {
//! #     Ok(lines) => lines,
//! #     Err(_) => return,
//! # };
//! let mut bus = ParallelBus::new(Bank, MockPin, MockPin, lines, PadConfig::default());
//!
//! bus.set_line_mode(LineMode::Input);
//! let _id = bus.read_byte();
//! bus.set_line_mode(LineMode::Output);
//! ```

use embedded_hal::digital::OutputPin;

use crate::color::Color;
use crate::config::{BuilderError, Config, DataLines, PadConfig};
use crate::interface::{BusWidth, LineMode, PixelBus, clamp_count};

/// Number of input register reads per byte; only the last one is used
const READ_SAMPLES: usize = 3;

/// Access to one GPIO register bank
///
/// Masks select lines by bit position. Implementations map these onto the
/// chip's write-1-to-set / write-1-to-clear registers and IO mux.
pub trait GpioPort {
    /// Read the input register of the whole bank
    fn read_input(&mut self) -> u32;

    /// Drive the lines in `mask` high
    fn set_high(&mut self, mask: u32);

    /// Drive the lines in `mask` low
    fn set_low(&mut self, mask: u32);

    /// Enable the output drivers of the lines in `mask`
    fn enable_output(&mut self, mask: u32);

    /// Disable the output drivers of the lines in `mask`
    fn disable_output(&mut self, mask: u32);

    /// Program the pad of `line`: function select, drive strength, input enable
    fn configure_pad(&mut self, line: u8, pad: PadConfig);
}

/// Pixel bus over eight GPIO data lines
pub struct ParallelBus<P, WR, RD> {
    /// GPIO bank holding the data lines
    port: P,
    /// Write strobe (active low)
    wr: WR,
    /// Read strobe (active low)
    rd: RD,
    /// Data line mapping
    lines: DataLines,
    /// Pad settings applied on every direction change
    pad: PadConfig,
}

impl<P, WR, RD> ParallelBus<P, WR, RD>
where
    P: GpioPort,
    WR: OutputPin,
    RD: OutputPin,
{
    /// Create a parallel bus
    ///
    /// Does not touch the hardware; call
    /// [`set_line_mode`](Self::set_line_mode) to put the lines in a known
    /// direction.
    pub fn new(port: P, wr: WR, rd: RD, lines: DataLines, pad: PadConfig) -> Self {
        Self {
            port,
            wr,
            rd,
            lines,
            pad,
        }
    }

    /// Create a parallel bus from the data lines and pad settings in `config`
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingDataLines` if `config` has no data lines.
    pub fn from_config(port: P, wr: WR, rd: RD, config: &Config) -> Result<Self, BuilderError> {
        let lines = config.data_lines.ok_or(BuilderError::MissingDataLines)?;
        Ok(Self::new(port, wr, rd, lines, config.pad))
    }

    /// Data line mapping
    pub fn data_lines(&self) -> &DataLines {
        &self.lines
    }

    /// Give back the GPIO bank and strobe pins
    pub fn release(self) -> (P, WR, RD) {
        (self.port, self.wr, self.rd)
    }

    /// Read one byte from the data lines
    ///
    /// The lines must already be inputs. The input register is sampled three
    /// times back to back while RD is low; the first two samples give the
    /// controller time to drive the bus and are discarded.
    pub fn read_byte(&mut self) -> u8 {
        strobe(&mut self.rd, "RD", false);
        let mut reg = 0;
        for _ in 0..READ_SAMPLES {
            reg = self.port.read_input();
        }
        strobe(&mut self.rd, "RD", true);
        self.lines.byte_from_register(reg)
    }

    /// Switch all eight data lines to `mode`
    ///
    /// Each line gets its pad reprogrammed. Lines switched to output are
    /// driven high before their driver is enabled, so the bus never glitches
    /// low on a read to write turnaround.
    pub fn set_line_mode(&mut self, mode: LineMode) {
        log::trace!("data lines {:#010x} -> {:?}", self.lines.mask(), mode);
        for line in self.lines.lines() {
            let mask = 1 << line;
            match mode {
                LineMode::Input => self.port.disable_output(mask),
                LineMode::Output => {
                    self.port.set_high(mask);
                    self.port.enable_output(mask);
                }
            }
            self.port.configure_pad(line, self.pad);
        }
    }

    /// Place one byte on the data lines and strobe WR
    pub fn write_byte(&mut self, byte: u8) {
        let (set, clear) = self.lines.masks_for_byte(byte);
        self.port.set_low(clear);
        self.port.set_high(set);
        strobe(&mut self.wr, "WR", false);
        strobe(&mut self.wr, "WR", true);
    }

    fn write_pixel(&mut self, [high, low]: [u8; 2]) {
        self.write_byte(high);
        self.write_byte(low);
    }

    /// Send `color` `count` times, most significant byte first
    pub fn fill(&mut self, color: Color, count: u32) {
        log::trace!("parallel fill {:#06x} x{}", color.raw(), count);
        let bytes = color.bus_bytes();
        for _ in 0..count {
            self.write_pixel(bytes);
        }
    }

    /// Send the first `count` pixels of `pixels`
    ///
    /// Without `swap_bytes` each pixel goes out in memory order (low byte
    /// first), matching the serial bus.
    pub fn write_pixels(&mut self, pixels: &[u16], count: u32, swap_bytes: bool) {
        let count = clamp_count(pixels, count);
        log::trace!("parallel write {} pixels", count);
        for &pixel in &pixels[..count as usize] {
            let bytes = if swap_bytes {
                pixel.to_be_bytes()
            } else {
                pixel.to_le_bytes()
            };
            self.write_pixel(bytes);
        }
    }
}

fn strobe<PIN: OutputPin>(pin: &mut PIN, name: &str, high: bool) {
    let result = if high { pin.set_high() } else { pin.set_low() };
    if let Err(err) = result {
        log::warn!("{} strobe failed (high={}): {:?}", name, high, err);
    }
}

impl<P, WR, RD> PixelBus for ParallelBus<P, WR, RD>
where
    P: GpioPort,
    WR: OutputPin,
    RD: OutputPin,
{
    const BUS_WIDTH: BusWidth = BusWidth::Parallel8;

    fn fill(&mut self, color: Color, count: u32) {
        ParallelBus::fill(self, color, count);
    }

    fn write_pixels(&mut self, pixels: &[u16], count: u32, swap_bytes: bool) {
        ParallelBus::write_pixels(self, pixels, count, swap_bytes);
    }

    fn write_byte(&mut self, byte: u8) {
        ParallelBus::write_byte(self, byte);
    }

    // WR strobes complete synchronously; nothing is ever in flight.
    fn wait_idle(&mut self) {}

    fn read_byte(&mut self) -> Option<u8> {
        Some(ParallelBus::read_byte(self))
    }

    fn set_line_mode(&mut self, mode: LineMode) {
        ParallelBus::set_line_mode(self, mode);
    }
}
