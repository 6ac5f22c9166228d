//! Burst window decomposition
//!
//! Every transfer is split into zero or more full 32 pixel windows plus at
//! most one remainder window of 1 to 31 pixels.

use crate::registers::{PIXELS_PER_BURST, length_field};

/// Split of a pixel count into full windows and a remainder
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BurstPlan {
    /// Number of full 32 pixel windows
    pub full_windows: u32,
    /// Pixels left over after the full windows (0 to 31)
    pub remainder: u32,
}

impl BurstPlan {
    /// Plan the bursts for `count` pixels
    ///
    /// ```
    /// use tft_burst::burst::BurstPlan;
    ///
    /// let plan = BurstPlan::new(40);
    /// assert_eq!(plan.full_windows, 1);
    /// assert_eq!(plan.remainder, 8);
    /// ```
    pub const fn new(count: u32) -> Self {
        Self {
            full_windows: count / PIXELS_PER_BURST,
            remainder: count % PIXELS_PER_BURST,
        }
    }

    /// Whether the plan transfers nothing
    pub const fn is_empty(&self) -> bool {
        self.full_windows == 0 && self.remainder == 0
    }

    /// Length field for the remainder burst, if any
    ///
    /// ```
    /// use tft_burst::burst::BurstPlan;
    ///
    /// assert_eq!(BurstPlan::new(64).remainder_length(), None);
    /// assert_eq!(BurstPlan::new(37).remainder_length(), Some(79));
    /// ```
    pub const fn remainder_length(&self) -> Option<u32> {
        if self.remainder == 0 {
            None
        } else {
            Some(length_field(self.remainder))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_empty() {
        let plan = BurstPlan::new(0);
        assert!(plan.is_empty());
        assert_eq!(plan.remainder_length(), None);
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(
            BurstPlan::new(31),
            BurstPlan {
                full_windows: 0,
                remainder: 31
            }
        );
        assert_eq!(
            BurstPlan::new(32),
            BurstPlan {
                full_windows: 1,
                remainder: 0
            }
        );
        assert_eq!(
            BurstPlan::new(33),
            BurstPlan {
                full_windows: 1,
                remainder: 1
            }
        );
        assert_eq!(BurstPlan::new(33).remainder_length(), Some(15));
    }

    #[test]
    fn test_max_count() {
        let plan = BurstPlan::new(u32::MAX);
        assert_eq!(plan.full_windows, u32::MAX / 32);
        assert_eq!(plan.remainder, 31);
    }
}
