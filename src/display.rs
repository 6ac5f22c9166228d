//! Display device context
//!
//! [`Display`] ties a bus strategy to the data/command select line and the
//! bus configuration. It is the surface upstream drawing code talks to.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::color::Color;
use crate::command::{self, CommandList};
use crate::config::Config;
use crate::error::Error;
use crate::interface::{BusWidth, LineMode, PixelBus};

type DisplayResult<E> = core::result::Result<(), Error<E>>;

/// What a transfer sends
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransferKind<'a> {
    /// One color repeated
    SolidFill(Color),
    /// Distinct pixels from a buffer
    Sequence(&'a [u16]),
}

/// One pixel transfer, consumed by [`Display::submit`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransferRequest<'a> {
    /// Source of the pixels
    pub kind: TransferKind<'a>,
    /// Number of pixels to send
    pub pixel_count: u32,
    /// Swap each pixel's bytes (sequences only)
    pub swap_bytes: bool,
}

impl<'a> TransferRequest<'a> {
    /// Request `count` repetitions of `color`
    pub fn fill(color: Color, count: u32) -> Self {
        Self {
            kind: TransferKind::SolidFill(color),
            pixel_count: count,
            swap_bytes: false,
        }
    }

    /// Request the first `count` pixels of `pixels`
    pub fn pixels(pixels: &'a [u16], count: u32, swap_bytes: bool) -> Self {
        Self {
            kind: TransferKind::Sequence(pixels),
            pixel_count: count,
            swap_bytes,
        }
    }
}

/// Display driver over one pixel bus
///
/// ## Type Parameters
///
/// * `B` - Bus strategy implementing [`PixelBus`]
/// * `DC` - Data/command select pin implementing [`OutputPin`]
///   (low=command, high=data)
///
/// ## Example
///
/// ```rust
/// use core::convert::Infallible;
/// use embedded_hal::digital::OutputPin;
/// use tft_burst::registers::BurstRegisters;
/// use tft_burst::{Builder, Color, Display, SpiBus};
///
/// # struct Regs;
/// # impl BurstRegisters for Regs {
/// #     fn set_length(&mut self, _field: u32) {}
/// #     fn write_slot(&mut self, _index: usize, _word: u32) {}
/// #     fn start(&mut self) {}
/// #     fn is_busy(&mut self) -> bool { false }
/// # }
/// # struct MockPin;
/// # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
/// # impl OutputPin for MockPin {
/// #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
/// #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
/// # }
/// let config = match Builder::new().swap_bytes(true).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// let mut display = Display::new(SpiBus::new(Regs), MockPin, config);
///
/// let _ = display.write_command(0x2C);
/// display.fill(Color::RED, 320 * 240);
/// display.push_pixels(&[0xF800, 0x07E0, 0x001F], 3);
/// ```
pub struct Display<B, DC> {
    /// Bus strategy
    bus: B,
    /// Data/command select pin
    dc: DC,
    /// Bus configuration
    config: Config,
}

impl<B, DC> Display<B, DC>
where
    B: PixelBus,
    DC: OutputPin,
{
    /// Create a new Display instance
    pub fn new(bus: B, dc: DC, config: Config) -> Self {
        if config.bus_width != B::BUS_WIDTH {
            log::warn!(
                "config is for a {:?} bus, driving a {:?} bus",
                config.bus_width,
                B::BUS_WIDTH
            );
        }
        log::debug!(
            "display on {:?} bus, swap_bytes={}",
            B::BUS_WIDTH,
            config.swap_bytes
        );
        Self { bus, dc, config }
    }

    /// Send `color` `count` times
    ///
    /// May return while the last burst is still on the wire; the next bus
    /// access waits for it.
    pub fn fill(&mut self, color: impl Into<Color>, count: u32) {
        self.bus.fill(color.into(), count);
    }

    /// Send the first `count` pixels of `pixels`
    ///
    /// With `swap_bytes` set each pixel's bytes are swapped on the way out.
    pub fn write_pixels(&mut self, pixels: &[u16], count: u32, swap_bytes: bool) {
        self.bus.write_pixels(pixels, count, swap_bytes);
    }

    /// Send the first `count` pixels of `pixels` with the configured byte order
    pub fn push_pixels(&mut self, pixels: &[u16], count: u32) {
        self.bus.write_pixels(pixels, count, self.config.swap_bytes);
    }

    /// Run one transfer request
    pub fn submit(&mut self, request: TransferRequest<'_>) {
        match request.kind {
            TransferKind::SolidFill(color) => self.bus.fill(color, request.pixel_count),
            TransferKind::Sequence(pixels) => {
                self.bus
                    .write_pixels(pixels, request.pixel_count, request.swap_bytes);
            }
        }
    }

    /// Read one byte back from the controller
    ///
    /// Returns `None` on a serial bus. On a parallel bus the data lines must
    /// have been switched to input with [`set_line_mode`](Self::set_line_mode).
    pub fn read_byte(&mut self) -> Option<u8> {
        self.bus.read_byte()
    }

    /// Switch the direction of the parallel data lines
    ///
    /// Must be called before every direction change; no direction is tracked.
    pub fn set_line_mode(&mut self, mode: LineMode) {
        self.bus.set_line_mode(mode);
    }

    /// Send a command byte (DC low)
    pub fn write_command(&mut self, command: u8) -> DisplayResult<DC::Error> {
        self.bus.wait_idle();
        self.dc.set_low().map_err(Error::Pin)?;
        self.bus.write_byte(command);
        Ok(())
    }

    /// Send data bytes (DC high)
    ///
    /// Each byte is its own transfer.
    pub fn write_data(&mut self, data: &[u8]) -> DisplayResult<DC::Error> {
        self.data_mode()?;
        for &byte in data {
            self.bus.write_byte(byte);
        }
        Ok(())
    }

    /// Send a 16-bit data value (DC high), most significant byte first
    pub fn write_data_u16(&mut self, value: u16) -> DisplayResult<DC::Error> {
        self.data_mode()?;
        self.bus.write_u16(value);
        Ok(())
    }

    /// Send a 32-bit data value (DC high), most significant byte first
    pub fn write_data_u32(&mut self, value: u32) -> DisplayResult<DC::Error> {
        self.data_mode()?;
        self.bus.write_u32(value);
        Ok(())
    }

    /// Send `command` followed by a start/end coordinate pair
    ///
    /// The pair goes out as a single 32-bit transfer on a serial bus.
    pub fn write_coordinates(
        &mut self,
        command: u8,
        start: u16,
        end: u16,
    ) -> DisplayResult<DC::Error> {
        self.write_command(command)?;
        self.data_mode()?;
        self.bus.write_coordinates(start, end);
        Ok(())
    }

    /// Select the controller memory window `(x0, y0)..=(x1, y1)` and start a
    /// memory write
    ///
    /// Pixel data for the window can follow directly.
    pub fn set_address_window(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
    ) -> DisplayResult<DC::Error> {
        self.write_coordinates(command::COLUMN_ADDRESS, x0, x1)?;
        self.write_coordinates(command::ROW_ADDRESS, y0, y1)?;
        self.write_command(command::MEMORY_WRITE)?;
        self.data_mode()
    }

    fn data_mode(&mut self) -> DisplayResult<DC::Error> {
        self.bus.wait_idle();
        self.dc.set_high().map_err(Error::Pin)
    }

    /// Replay a setup command table
    ///
    /// Each command is sent with its arguments, then the record's delay is
    /// waited out. Leaves DC high so pixel data can follow.
    ///
    /// # Errors
    ///
    /// Returns `Error::TruncatedCommandList` if the table ends inside a
    /// record; commands before that point have already been sent.
    pub fn run_command_list<D: DelayNs>(
        &mut self,
        table: &[u8],
        delay: &mut D,
    ) -> DisplayResult<DC::Error> {
        let list = CommandList::new(table);
        log::debug!("running command list of {} commands", list.remaining());
        for record in list {
            let record = record?;
            self.write_command(record.opcode)?;
            self.write_data(record.args)?;
            if let Some(ms) = record.delay_ms {
                delay.delay_ms(u32::from(ms));
            }
        }
        Ok(())
    }

    /// Block until the bus has no transfer in flight
    pub fn wait_idle(&mut self) {
        self.bus.wait_idle();
    }

    /// Bus width of the strategy in use
    pub fn bus_width(&self) -> BusWidth {
        B::BUS_WIDTH
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Give back the bus and data/command pin
    ///
    /// Waits for any transfer still in flight first.
    pub fn release(mut self) -> (B, DC) {
        self.bus.wait_idle();
        (self.bus, self.dc)
    }
}
