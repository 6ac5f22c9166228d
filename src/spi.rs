//! Serial bus burst engine
//!
//! [`SpiBus`] turns pixel transfers into bursts on the SPI peripheral's
//! transmit buffer. One burst carries up to 32 pixels in 16 slots; a transfer
//! is split into full 32 pixel windows plus one shorter remainder window.
//!
//! Three paths share the register sequence from [`crate::registers`]:
//!
//! - **Solid fill**: the slots hold the same word for every burst, so they
//!   are loaded once and each full burst only needs a start command.
//! - **Pixel sequence**: every window reloads the slots from the buffer.
//! - **Swapped sequence**: like the pixel sequence, but each pixel's bytes are
//!   swapped and windows are issued in 32, 16, then tail sized tiers.
//!
//! A fill returns as soon as its last burst is started. The sequence writers
//! wait for their last burst before returning.

use crate::burst::BurstPlan;
use crate::color::Color;
use crate::interface::{BusWidth, PixelBus, clamp_count};
use crate::registers::{
    BYTE_LENGTH, BurstRegisters, FULL_BURST_LENGTH, HALF_BURST_LENGTH, HALFWORD_LENGTH,
    PIXELS_PER_BURST, PIXELS_PER_HALF_BURST, SLOT_COUNT, WORD_LENGTH, slots_for,
};
use crate::swap::word_at;

/// Burst engine for a serial display bus
///
/// Owns the peripheral registers for its whole lifetime; use
/// [`release`](Self::release) to get them back.
#[derive(Debug)]
pub struct SpiBus<R> {
    regs: R,
}

impl<R> SpiBus<R>
where
    R: BurstRegisters,
{
    /// Create a burst engine over `regs`
    pub fn new(regs: R) -> Self {
        Self { regs }
    }

    /// Give back the peripheral registers
    ///
    /// Waits for any burst still in flight first.
    pub fn release(mut self) -> R {
        self.regs.wait_idle();
        self.regs
    }

    /// Borrow the peripheral registers
    pub fn registers(&self) -> &R {
        &self.regs
    }

    /// Send `color` `count` times
    ///
    /// The remainder burst goes out first, then the full bursts reuse the
    /// slots loaded for it. Returns with the last burst still in flight.
    pub fn fill(&mut self, color: Color, count: u32) {
        let plan = BurstPlan::new(count);
        if plan.is_empty() {
            return;
        }
        log::trace!(
            "fill {:#06x} x{} ({} full + {})",
            color.raw(),
            count,
            plan.full_windows,
            plan.remainder
        );

        let word = color.bus_word();
        let mut loaded = 0;

        if let Some(remainder_length) = plan.remainder_length() {
            loaded = slots_for(plan.remainder);
            self.regs.wait_idle();
            for slot in 0..loaded {
                self.regs.write_slot(slot, word);
            }
            self.regs.set_length(remainder_length);
            self.regs.start();
        }

        if plan.full_windows == 0 {
            return;
        }

        // Slots are not rewritten after this point.
        self.regs.wait_idle();
        for slot in loaded..SLOT_COUNT {
            self.regs.write_slot(slot, word);
        }

        for _ in 0..plan.full_windows {
            self.regs.wait_idle();
            self.regs.set_length(FULL_BURST_LENGTH);
            self.regs.start();
        }
    }

    /// Send the first `count` pixels of `pixels`
    ///
    /// With `swap_bytes` set the swapped path is used instead. Waits for the
    /// last burst before returning.
    pub fn write_pixels(&mut self, pixels: &[u16], count: u32, swap_bytes: bool) {
        let count = clamp_count(pixels, count);
        if swap_bytes {
            self.write_swapped(pixels, count);
            return;
        }

        let plan = BurstPlan::new(count);
        log::trace!(
            "write {} pixels ({} full + {})",
            count,
            plan.full_windows,
            plan.remainder
        );

        let mut word = 0;
        for _ in 0..plan.full_windows {
            self.regs.wait_idle();
            self.regs.set_length(FULL_BURST_LENGTH);
            for slot in 0..SLOT_COUNT {
                self.regs.write_slot(slot, word_at(pixels, word, false));
                word += 1;
            }
            self.regs.start();
        }

        if let Some(remainder_length) = plan.remainder_length() {
            self.regs.wait_idle();
            self.regs.set_length(remainder_length);
            for slot in 0..slots_for(plan.remainder) {
                self.regs.write_slot(slot, word_at(pixels, word + slot, false));
            }
            self.regs.start();
        }

        self.regs.wait_idle();
    }

    /// Send pixels with each pixel's bytes swapped
    ///
    /// Words are packed before waiting for the previous burst, so packing
    /// overlaps with the transfer on the wire.
    fn write_swapped(&mut self, pixels: &[u16], count: u32) {
        let mut remaining = count;
        let mut word = 0;
        let mut packed = [0u32; SLOT_COUNT];
        log::trace!("write {} pixels swapped", count);

        while remaining >= PIXELS_PER_BURST {
            pack_window(pixels, word, &mut packed);
            self.load_and_start(FULL_BURST_LENGTH, &packed);
            word += SLOT_COUNT;
            remaining -= PIXELS_PER_BURST;
        }

        if remaining >= PIXELS_PER_HALF_BURST {
            let half = SLOT_COUNT / 2;
            pack_window(pixels, word, &mut packed[..half]);
            self.load_and_start(HALF_BURST_LENGTH, &packed[..half]);
            word += half;
            remaining -= PIXELS_PER_HALF_BURST;
        }

        if let Some(tail_length) = BurstPlan::new(remaining).remainder_length() {
            self.regs.wait_idle();
            self.regs.set_length(tail_length);
            for slot in 0..slots_for(remaining) {
                self.regs.write_slot(slot, word_at(pixels, word + slot, true));
            }
            self.regs.start();
        }

        self.regs.wait_idle();
    }

    fn load_and_start(&mut self, length: u32, words: &[u32]) {
        self.regs.wait_idle();
        self.regs.set_length(length);
        for (slot, &word) in words.iter().enumerate() {
            self.regs.write_slot(slot, word);
        }
        self.regs.start();
    }

    /// Send a single byte and wait for it to leave
    pub fn write_byte(&mut self, byte: u8) {
        self.write_word(BYTE_LENGTH, u32::from(byte));
    }

    /// Send a 16-bit value in one burst, most significant byte first
    pub fn write_u16(&mut self, value: u16) {
        self.write_word(HALFWORD_LENGTH, u32::from(value.swap_bytes()));
    }

    /// Send a 32-bit value in one burst, most significant byte first
    ///
    /// ```
    /// # use tft_burst::registers::BurstRegisters;
    /// # use tft_burst::SpiBus;
    /// # #[derive(Default)]
    /// # struct Regs { slot: u32 }
    /// # impl BurstRegisters for Regs {
    /// #     fn set_length(&mut self, _field: u32) {}
    /// #     fn write_slot(&mut self, _index: usize, word: u32) { self.slot = word; }
    /// #     fn start(&mut self) {}
    /// #     fn is_busy(&mut self) -> bool { false }
    /// # }
    /// let mut bus = SpiBus::new(Regs::default());
    /// bus.write_u32(0x0102_0304);
    /// // The low byte of the slot is shifted out first.
    /// assert_eq!(bus.registers().slot.to_le_bytes(), [1, 2, 3, 4]);
    /// ```
    pub fn write_u32(&mut self, value: u32) {
        self.write_word(WORD_LENGTH, value.swap_bytes());
    }

    /// Send up to 32 bits from slot 0 and wait for them to leave
    fn write_word(&mut self, length: u32, word: u32) {
        self.regs.wait_idle();
        self.regs.set_length(length);
        self.regs.write_slot(0, word);
        self.regs.start();
        self.regs.wait_idle();
    }
}

/// Pack `out.len()` swapped words starting at word `first`
fn pack_window(pixels: &[u16], first: usize, out: &mut [u32]) {
    for (offset, slot) in out.iter_mut().enumerate() {
        *slot = word_at(pixels, first + offset, true);
    }
}

impl<R> PixelBus for SpiBus<R>
where
    R: BurstRegisters,
{
    const BUS_WIDTH: BusWidth = BusWidth::Serial;

    fn fill(&mut self, color: Color, count: u32) {
        SpiBus::fill(self, color, count);
    }

    fn write_pixels(&mut self, pixels: &[u16], count: u32, swap_bytes: bool) {
        SpiBus::write_pixels(self, pixels, count, swap_bytes);
    }

    fn write_byte(&mut self, byte: u8) {
        SpiBus::write_byte(self, byte);
    }

    fn write_u16(&mut self, value: u16) {
        SpiBus::write_u16(self, value);
    }

    fn write_u32(&mut self, value: u32) {
        SpiBus::write_u32(self, value);
    }

    fn wait_idle(&mut self) {
        self.regs.wait_idle();
    }
}
