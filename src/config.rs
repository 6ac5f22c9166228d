//! Bus configuration types and builder

pub use crate::error::{
    BuilderError, GPIO_LINE_COUNT, MAX_DRIVE_STRENGTH, MAX_FUNCTION_SELECT,
};
pub use crate::interface::BusWidth;

/// GPIO line numbers of the eight parallel data bits
///
/// Index 0 is data bit D0, index 7 is D7.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DataLines {
    lines: [u8; 8],
}

impl DataLines {
    /// Create a data line mapping with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDataLine` if a line is not below
    /// [`GPIO_LINE_COUNT`], or `BuilderError::DuplicateDataLine` if a line
    /// appears twice.
    pub fn new(lines: [u8; 8]) -> Result<Self, BuilderError> {
        let mut seen = 0u32;
        for &line in &lines {
            if line >= GPIO_LINE_COUNT {
                return Err(BuilderError::InvalidDataLine { line });
            }
            let bit = 1u32 << line;
            if seen & bit != 0 {
                return Err(BuilderError::DuplicateDataLine { line });
            }
            seen |= bit;
        }
        Ok(Self { lines })
    }

    /// Line numbers in bit order
    pub fn lines(&self) -> [u8; 8] {
        self.lines
    }

    /// Register mask covering all eight data lines
    pub fn mask(&self) -> u32 {
        self.lines.iter().fold(0, |mask, &line| mask | (1 << line))
    }

    /// Rebuild a byte from a snapshot of the input register
    ///
    /// ```
    /// use tft_burst::DataLines;
    ///
    /// let lines = DataLines::new([4, 5, 18, 19, 23, 25, 26, 27]).unwrap();
    /// let reg = (1 << 4) | (1 << 27);
    /// assert_eq!(lines.byte_from_register(reg), 0b1000_0001);
    /// ```
    pub fn byte_from_register(&self, reg: u32) -> u8 {
        self.lines
            .iter()
            .enumerate()
            .fold(0u8, |byte, (bit, &line)| {
                byte | ((((reg >> line) & 1) as u8) << bit)
            })
    }

    /// Split a byte into (set, clear) masks for the output register
    pub fn masks_for_byte(&self, byte: u8) -> (u32, u32) {
        let mut set = 0;
        let mut clear = 0;
        for (bit, &line) in self.lines.iter().enumerate() {
            if byte & (1 << bit) != 0 {
                set |= 1 << line;
            } else {
                clear |= 1 << line;
            }
        }
        (set, clear)
    }
}

/// Pad settings programmed into every data line on a direction change
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PadConfig {
    /// IO mux function select (GPIO function)
    pub function_select: u8,
    /// Drive strength (0 weakest, 3 strongest)
    pub drive_strength: u8,
    /// Input buffer enable
    pub input_enable: bool,
}

impl Default for PadConfig {
    fn default() -> Self {
        Self {
            // GPIO matrix function on most pads
            function_select: 2,
            drive_strength: 2,
            // Kept on in both directions so the bus can be read back
            input_enable: true,
        }
    }
}

/// Bus configuration
///
/// Use `Builder` to create a Config.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Bus width the display is wired for
    pub bus_width: BusWidth,
    /// Default byte-swap setting for pixel sequences
    pub swap_bytes: bool,
    /// Parallel data line mapping (required for `BusWidth::Parallel8`)
    pub data_lines: Option<DataLines>,
    /// Pad settings for the parallel data lines
    pub pad: PadConfig,
}

/// Builder for constructing bus configuration
///
/// # Example
///
/// ```rust
/// use tft_burst::{Builder, BusWidth, DataLines};
///
/// let lines = match DataLines::new([12, 13, 26, 25, 17, 16, 27, 14]) {
///     Ok(lines) => lines,
///     Err(_) => return,
/// };
/// let config = match Builder::new()
///     .bus_width(BusWidth::Parallel8)
///     .data_lines(lines)
///     .swap_bytes(true)
///     .build()
/// {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert!(config.swap_bytes);
/// ```
#[must_use]
#[derive(Default)]
pub struct Builder {
    /// Bus width
    bus_width: BusWidth,
    /// Default byte-swap setting
    swap_bytes: bool,
    /// Parallel data line mapping
    data_lines: Option<DataLines>,
    /// Pad settings
    pad: PadConfig,
}

impl Builder {
    /// Create a new Builder with default values
    ///
    /// Defaults to a serial bus without byte swapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bus width
    pub fn bus_width(mut self, bus_width: BusWidth) -> Self {
        self.bus_width = bus_width;
        self
    }

    /// Set whether pixel sequences are byte-swapped by default
    pub fn swap_bytes(mut self, swap: bool) -> Self {
        self.swap_bytes = swap;
        self
    }

    /// Set the parallel data line mapping
    pub fn data_lines(mut self, lines: DataLines) -> Self {
        self.data_lines = Some(lines);
        self
    }

    /// Set the pad settings used on direction changes
    pub fn pad_config(mut self, pad: PadConfig) -> Self {
        self.pad = pad;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingDataLines` for a parallel bus without
    /// data lines, and `BuilderError::InvalidDriveStrength` or
    /// `BuilderError::InvalidFunctionSelect` for out-of-range pad settings.
    pub fn build(self) -> Result<Config, BuilderError> {
        if self.bus_width == BusWidth::Parallel8 && self.data_lines.is_none() {
            return Err(BuilderError::MissingDataLines);
        }
        if self.pad.drive_strength > MAX_DRIVE_STRENGTH {
            return Err(BuilderError::InvalidDriveStrength {
                value: self.pad.drive_strength,
            });
        }
        if self.pad.function_select > MAX_FUNCTION_SELECT {
            return Err(BuilderError::InvalidFunctionSelect {
                value: self.pad.function_select,
            });
        }
        Ok(Config {
            bus_width: self.bus_width,
            swap_bytes: self.swap_bytes,
            data_lines: self.data_lines,
            pad: self.pad,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINES: [u8; 8] = [4, 5, 18, 19, 23, 25, 26, 27];

    #[test]
    fn test_data_lines_rejects_out_of_range() {
        let result = DataLines::new([0, 1, 2, 3, 4, 5, 6, 32]);
        assert_eq!(result, Err(BuilderError::InvalidDataLine { line: 32 }));
    }

    #[test]
    fn test_data_lines_rejects_duplicates() {
        let result = DataLines::new([0, 1, 2, 3, 4, 5, 6, 3]);
        assert_eq!(result, Err(BuilderError::DuplicateDataLine { line: 3 }));
    }

    #[test]
    fn test_data_lines_mask() {
        let lines = DataLines::new(LINES).unwrap();
        assert_eq!(lines.mask(), 0x0E8C_0030);
        assert_eq!(lines.masks_for_byte(0x01).0, 1 << 4);
        assert_eq!(lines.masks_for_byte(0x80).0, 1 << 27);
    }

    #[test]
    fn test_byte_mapping_round_trip() {
        let lines = DataLines::new(LINES).unwrap();
        for byte in [0x00u8, 0xFF, 0xA5, 0x5A, 0x01, 0x80] {
            let (set, clear) = lines.masks_for_byte(byte);
            assert_eq!(set & clear, 0);
            assert_eq!(set | clear, lines.mask());
            assert_eq!(lines.byte_from_register(set), byte);
        }
    }

    #[test]
    fn test_byte_from_register_ignores_other_lines() {
        let lines = DataLines::new(LINES).unwrap();
        let noise = !lines.mask();
        assert_eq!(lines.byte_from_register(noise), 0);
    }

    #[test]
    fn test_builder_defaults() {
        let config = Builder::new().build().unwrap();
        assert_eq!(config.bus_width, BusWidth::Serial);
        assert!(!config.swap_bytes);
        assert_eq!(config.data_lines, None);
        assert_eq!(config.pad, PadConfig::default());
    }

    #[test]
    fn test_builder_parallel_requires_lines() {
        let result = Builder::new().bus_width(BusWidth::Parallel8).build();
        assert!(matches!(result, Err(BuilderError::MissingDataLines)));

        let lines = DataLines::new(LINES).unwrap();
        let config = Builder::new()
            .bus_width(BusWidth::Parallel8)
            .data_lines(lines)
            .build()
            .unwrap();
        assert_eq!(config.data_lines, Some(lines));
    }

    #[test]
    fn test_builder_rejects_pad_values() {
        let result = Builder::new()
            .pad_config(PadConfig {
                drive_strength: 4,
                ..PadConfig::default()
            })
            .build();
        assert!(matches!(
            result,
            Err(BuilderError::InvalidDriveStrength { value: 4 })
        ));

        let result = Builder::new()
            .pad_config(PadConfig {
                function_select: 9,
                ..PadConfig::default()
            })
            .build();
        assert!(matches!(
            result,
            Err(BuilderError::InvalidFunctionSelect { value: 9 })
        ));
    }
}
