//! Recording test doubles shared by the unit tests

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};

use crate::config::PadConfig;
use crate::parallel::GpioPort;
use crate::registers::{BurstRegisters, SLOT_COUNT};

/// Register access in the order it happened
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegisterOp {
    SetLength(u32),
    WriteSlot(usize, u32),
    Start,
}

/// One started burst: the length field and the slots it shifted out
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Burst {
    pub length: u32,
    pub words: Vec<u32>,
}

impl Burst {
    /// Bytes shifted out by the burst
    pub fn bytes(&self) -> Vec<u8> {
        let count = ((self.length + 1) / 8) as usize;
        self.words
            .iter()
            .flat_map(|word| word.to_le_bytes())
            .take(count)
            .collect()
    }

    pub fn pixels(&self) -> u32 {
        (self.length + 1) / 16
    }
}

/// Burst peripheral that records every access
///
/// The busy flag stays set for `busy_polls` polls after each start. Any
/// register mutation while busy panics.
#[derive(Debug)]
pub struct MockRegisters {
    pub ops: Vec<RegisterOp>,
    pub bursts: Vec<Burst>,
    pub polls: u32,
    length: u32,
    slots: [u32; SLOT_COUNT],
    busy_polls: u32,
    busy_left: u32,
}

impl MockRegisters {
    pub fn new() -> Self {
        Self::with_busy_polls(2)
    }

    pub fn with_busy_polls(busy_polls: u32) -> Self {
        Self {
            ops: Vec::new(),
            bursts: Vec::new(),
            polls: 0,
            length: 0,
            slots: [0; SLOT_COUNT],
            busy_polls,
            busy_left: 0,
        }
    }

    /// Whether the last burst is still in flight
    pub fn in_flight(&self) -> bool {
        self.busy_left > 0
    }

    /// Every byte shifted out, in wire order
    pub fn wire_bytes(&self) -> Vec<u8> {
        self.bursts.iter().flat_map(Burst::bytes).collect()
    }

    /// Wire bytes read back as pixels, most significant byte first
    pub fn wire_pixels(&self) -> Vec<u16> {
        self.wire_bytes()
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect()
    }

    /// Wire bytes read back as pixels in memory (little-endian) order
    pub fn wire_pixels_le(&self) -> Vec<u16> {
        self.wire_bytes()
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect()
    }

    pub fn lengths(&self) -> Vec<u32> {
        self.bursts.iter().map(|burst| burst.length).collect()
    }

    fn assert_idle(&self, what: &str) {
        assert!(self.busy_left == 0, "{what} while peripheral busy");
    }
}

impl BurstRegisters for MockRegisters {
    fn set_length(&mut self, field: u32) {
        self.assert_idle("set_length");
        self.length = field;
        self.ops.push(RegisterOp::SetLength(field));
    }

    fn write_slot(&mut self, index: usize, word: u32) {
        self.assert_idle("write_slot");
        self.slots[index] = word;
        self.ops.push(RegisterOp::WriteSlot(index, word));
    }

    fn start(&mut self) {
        self.assert_idle("start");
        let words = ((self.length + 1) as usize).div_ceil(32);
        self.bursts.push(Burst {
            length: self.length,
            words: self.slots[..words].to_vec(),
        });
        self.ops.push(RegisterOp::Start);
        self.busy_left = self.busy_polls;
    }

    fn is_busy(&mut self) -> bool {
        self.polls += 1;
        if self.busy_left > 0 {
            self.busy_left -= 1;
            true
        } else {
            false
        }
    }
}

/// Activity on the parallel bus, including the strobe pins
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PortOp {
    Read,
    SetHigh(u32),
    SetLow(u32),
    EnableOutput(u32),
    DisableOutput(u32),
    ConfigurePad(u8, PadConfig),
    Strobe(&'static str, bool),
}

#[derive(Debug, Default)]
pub struct PortState {
    pub ops: Vec<PortOp>,
    pub input: u32,
    pub output: u32,
    pub enabled: u32,
    /// Output register value latched at every WR falling edge
    pub latched: Vec<u32>,
}

pub type SharedPort = Rc<RefCell<PortState>>;

/// GPIO bank backed by shared state so strobe pins can see the data lines
#[derive(Debug, Clone)]
pub struct MockPort(pub SharedPort);

impl MockPort {
    pub fn new(input: u32) -> Self {
        Self(Rc::new(RefCell::new(PortState {
            input,
            ..PortState::default()
        })))
    }

    pub fn strobe(&self, name: &'static str) -> StrobePin {
        StrobePin {
            name,
            state: Rc::clone(&self.0),
        }
    }

    pub fn ops(&self) -> Vec<PortOp> {
        self.0.borrow().ops.clone()
    }
}

impl GpioPort for MockPort {
    fn read_input(&mut self) -> u32 {
        let mut state = self.0.borrow_mut();
        state.ops.push(PortOp::Read);
        state.input
    }

    fn set_high(&mut self, mask: u32) {
        let mut state = self.0.borrow_mut();
        state.output |= mask;
        state.ops.push(PortOp::SetHigh(mask));
    }

    fn set_low(&mut self, mask: u32) {
        let mut state = self.0.borrow_mut();
        state.output &= !mask;
        state.ops.push(PortOp::SetLow(mask));
    }

    fn enable_output(&mut self, mask: u32) {
        let mut state = self.0.borrow_mut();
        state.enabled |= mask;
        state.ops.push(PortOp::EnableOutput(mask));
    }

    fn disable_output(&mut self, mask: u32) {
        let mut state = self.0.borrow_mut();
        state.enabled &= !mask;
        state.ops.push(PortOp::DisableOutput(mask));
    }

    fn configure_pad(&mut self, line: u8, pad: PadConfig) {
        self.0.borrow_mut().ops.push(PortOp::ConfigurePad(line, pad));
    }
}

/// Strobe pin (WR, RD) that logs its edges into the port trace
#[derive(Debug)]
pub struct StrobePin {
    name: &'static str,
    state: SharedPort,
}

impl ErrorType for StrobePin {
    type Error = Infallible;
}

impl OutputPin for StrobePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        state.ops.push(PortOp::Strobe(self.name, false));
        if self.name == "wr" {
            let output = state.output;
            state.latched.push(output);
        }
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.state
            .borrow_mut()
            .ops
            .push(PortOp::Strobe(self.name, true));
        Ok(())
    }
}

/// Data/command pin recording every level it was driven to
#[derive(Debug, Default)]
pub struct MockPin {
    pub levels: Vec<bool>,
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.levels.push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.levels.push(true);
        Ok(())
    }
}

/// Delay that only adds up the requested time
#[derive(Debug, Default)]
pub struct MockDelay {
    pub total_ns: u64,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}

/// Output pin whose every access fails
#[derive(Debug)]
pub struct FailingPin;

impl ErrorType for FailingPin {
    type Error = ErrorKind;
}

impl OutputPin for FailingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }
}
