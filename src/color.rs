//! 16-bit pixel color
//!
//! This module defines [`Color`], a raw RGB565 pixel value as upstream drawing
//! code produces it, and the conversions to the byte order the display bus
//! expects.
//!
//! ## Byte Order
//!
//! Display controllers take RGB565 most significant byte first. The transmit
//! slots shift out their lowest byte first, so a color is byte-swapped before
//! it is placed in a slot.
//!
//! | Value    | Bus order | Slot word (two pixels) |
//! |----------|-----------|------------------------|
//! | `0xF800` | `0x00F8`  | `0x00F8_00F8`          |
//! | `0x07E0` | `0xE007`  | `0xE007_E007`          |
//! | `0x001F` | `0x1F00`  | `0x1F00_1F00`          |
//!
//! ## Example
//!
//! ```
//! use tft_burst::Color;
//!
//! let red = Color::new(0xF800);
//! assert_eq!(red.bus_order(), 0x00F8);
//! assert_eq!(red.bus_word(), 0x00F8_00F8);
//! ```

/// RGB565 pixel value
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color(u16);

impl Color {
    /// Black (`0x0000`)
    pub const BLACK: Self = Self(0x0000);
    /// White (`0xFFFF`)
    pub const WHITE: Self = Self(0xFFFF);
    /// Red (`0xF800`)
    pub const RED: Self = Self(0xF800);
    /// Green (`0x07E0`)
    pub const GREEN: Self = Self(0x07E0);
    /// Blue (`0x001F`)
    pub const BLUE: Self = Self(0x001F);

    /// Wrap a raw RGB565 value
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Build a color from 5-bit red, 6-bit green and 5-bit blue channels
    ///
    /// Channel values are masked to their width.
    ///
    /// ```
    /// use tft_burst::Color;
    ///
    /// assert_eq!(Color::from_rgb(31, 0, 0), Color::RED);
    /// assert_eq!(Color::from_rgb(31, 63, 31), Color::WHITE);
    /// ```
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        let r = (r & 0x1F) as u16;
        let g = (g & 0x3F) as u16;
        let b = (b & 0x1F) as u16;
        Self((r << 11) | (g << 5) | b)
    }

    /// Raw RGB565 value
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Value with its bytes in bus transmission order
    pub const fn bus_order(self) -> u16 {
        self.0.swap_bytes()
    }

    /// Slot word carrying this color in both pixel lanes
    pub const fn bus_word(self) -> u32 {
        let lane = self.bus_order() as u32;
        (lane << 16) | lane
    }

    /// Bytes in the order they appear on the bus
    pub const fn bus_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }
}

impl From<u16> for Color {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}

impl From<Color> for u16 {
    fn from(color: Color) -> Self {
        color.0
    }
}

#[cfg(feature = "graphics")]
impl From<embedded_graphics_core::pixelcolor::Rgb565> for Color {
    fn from(color: embedded_graphics_core::pixelcolor::Rgb565) -> Self {
        use embedded_graphics_core::pixelcolor::IntoStorage;
        Self(color.into_storage())
    }
}
