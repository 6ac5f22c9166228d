//! Peripheral register abstraction
//!
//! This module provides the [`BurstRegisters`] trait, a typed view of the
//! handful of SPI peripheral registers the burst engine drives:
//!
//! - **busy**: set while a burst is shifting out
//! - **length**: number of bits in the next burst, minus one
//! - **slots**: [`SLOT_COUNT`] transmit words, shifted out lowest byte first
//! - **start**: command bit that launches a burst
//!
//! ## Register Sequence
//!
//! Every burst follows the same sequence:
//! 1. Wait until the peripheral is idle
//! 2. Write the length field
//! 3. Write the transmit slots
//! 4. Issue the start command
//!
//! Issuing start while busy is undefined at the hardware level. The engine
//! never does it; implementations do not need to guard against it.
//!
//! The crate does not ship a memory-mapped implementation. The bus setup
//! layer (usually built on a PAC) implements this trait for its peripheral.
//!
//! ## Example
//!
//! ```
//! use tft_burst::registers::{length_field, FULL_BURST_LENGTH};
//!
//! // A 32 pixel burst of RGB565 is 512 bits.
//! assert_eq!(length_field(32), FULL_BURST_LENGTH);
//! assert_eq!(length_field(1), 15);
//! ```

/// Number of 32-bit transmit slots in the peripheral buffer
pub const SLOT_COUNT: usize = 16;

/// Number of bits shifted out per pixel
pub const BITS_PER_PIXEL: u32 = 16;

/// Pixels carried by one full burst (two pixels per slot)
pub const PIXELS_PER_BURST: u32 = 32;

/// Pixels carried by one half burst
pub const PIXELS_PER_HALF_BURST: u32 = PIXELS_PER_BURST / 2;

/// Length field value for a full 32 pixel burst (512 bits)
pub const FULL_BURST_LENGTH: u32 = PIXELS_PER_BURST * BITS_PER_PIXEL - 1;

/// Length field value for a 16 pixel half burst (256 bits)
pub const HALF_BURST_LENGTH: u32 = PIXELS_PER_HALF_BURST * BITS_PER_PIXEL - 1;

/// Length field value for a single byte transfer
pub const BYTE_LENGTH: u32 = 8 - 1;

/// Length field value for a 16-bit transfer
pub const HALFWORD_LENGTH: u32 = 16 - 1;

/// Length field value for a 32-bit transfer
pub const WORD_LENGTH: u32 = 32 - 1;

/// Length field value for a burst of `pixels` pixels
///
/// Meaningful for 1 to [`PIXELS_PER_BURST`] pixels. Zero pixels saturates
/// to a field of 0.
///
/// ```
/// use tft_burst::registers::length_field;
///
/// assert_eq!(length_field(5), 79);
/// assert_eq!(length_field(0), 0);
/// ```
pub const fn length_field(pixels: u32) -> u32 {
    pixels.saturating_mul(BITS_PER_PIXEL).saturating_sub(1)
}

/// Number of slots needed to hold `pixels` pixels
pub const fn slots_for(pixels: u32) -> usize {
    pixels.div_ceil(2) as usize
}

/// Typed access to the burst peripheral registers
///
/// Register writes cannot fail on memory-mapped hardware, so the trait has no
/// error type.
///
/// ## Implementing
///
/// Implement the four register accessors. [`wait_idle`](Self::wait_idle) has
/// a default that polls [`is_busy`](Self::is_busy) without a timeout; test
/// doubles may override it to bound the poll count.
pub trait BurstRegisters {
    /// Write the transfer-length field (bit count minus one)
    fn set_length(&mut self, field: u32);

    /// Write one transmit slot
    ///
    /// `index` is below [`SLOT_COUNT`]. The low byte of `word` is shifted
    /// out first.
    fn write_slot(&mut self, index: usize, word: u32);

    /// Issue the start command for one burst
    fn start(&mut self);

    /// Read the busy flag
    fn is_busy(&mut self) -> bool;

    /// Block until the busy flag clears
    ///
    /// Polls forever if the flag never clears.
    fn wait_idle(&mut self) {
        while self.is_busy() {
            core::hint::spin_loop();
        }
    }
}

impl<T: BurstRegisters + ?Sized> BurstRegisters for &mut T {
    fn set_length(&mut self, field: u32) {
        (**self).set_length(field);
    }

    fn write_slot(&mut self, index: usize, word: u32) {
        (**self).write_slot(index, word);
    }

    fn start(&mut self) {
        (**self).start();
    }

    fn is_busy(&mut self) -> bool {
        (**self).is_busy()
    }

    fn wait_idle(&mut self) {
        (**self).wait_idle();
    }
}
