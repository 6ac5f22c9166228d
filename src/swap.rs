//! Byte-swap transforms for pixel buffers
//!
//! Pixel buffers built by upstream code hold RGB565 values in native
//! (little-endian) memory order. A four byte group `b0 b1 b2 b3` is two
//! pixels, each with its bytes reversed relative to the bus. The transmit
//! word built from such a group shifts out `b1 b0 b3 b2`: every pixel has its
//! own byte pair swapped and the pixel pair keeps its order.

/// Pack two pixels into one transmit word without reordering bytes
///
/// The first pixel lands in the low lane and is shifted out first.
pub const fn pack_pair(first: u16, second: u16) -> u32 {
    (first as u32) | ((second as u32) << 16)
}

/// Pack two pixels into one transmit word, swapping each pixel's bytes
///
/// ```
/// use tft_burst::swap::pack_pair_swapped;
///
/// // b0 b1 b2 b3 in memory
/// let bytes = [0x00, 0xF8, 0xE0, 0x07];
/// let first = u16::from_le_bytes([bytes[0], bytes[1]]);
/// let second = u16::from_le_bytes([bytes[2], bytes[3]]);
///
/// // b1 b0 b3 b2 on the wire
/// let word = pack_pair_swapped(first, second);
/// assert_eq!(word.to_le_bytes(), [0xF8, 0x00, 0x07, 0xE0]);
/// ```
pub const fn pack_pair_swapped(first: u16, second: u16) -> u32 {
    pack_pair(first.swap_bytes(), second.swap_bytes())
}

/// Transmit word `index` of `pixels`
///
/// Word `index` covers pixels `2 * index` and `2 * index + 1`. A pixel past
/// the end of the buffer reads as zero.
pub(crate) fn word_at(pixels: &[u16], index: usize, swap: bool) -> u32 {
    let first = pixels.get(index * 2).copied().unwrap_or(0);
    let second = pixels.get(index * 2 + 1).copied().unwrap_or(0);
    if swap {
        pack_pair_swapped(first, second)
    } else {
        pack_pair(first, second)
    }
}
