//! Morton (Z-order) bit interleaving over three axes.
//!
//! Bit `3i + a` of an interleaved value maps to bit `i` of axis `a`. Encoding
//! keeps one group past the mode's width, so a value just beyond the grid
//! lands outside it on axis 0 rather than back at the origin. Bits beyond that
//! are dropped, and decoding reads only the mode's width.

use crate::config::BitWidthConfig;

/// Groups processed when interleaving a full depth value.
const DEPTH_GROUPS: u32 = 6;

/// Which bit width an interleave operation works at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MortonMode {
    /// Distances along the Hilbert grid: `algo_bits` bits per axis.
    Hilbert,
    /// Depth values normalized to 16 bits: 6 bits per axis.
    Depth,
}

impl MortonMode {
    #[inline]
    fn groups(self, config: BitWidthConfig) -> u32 {
        match self {
            MortonMode::Hilbert => config.algo_bits(),
            MortonMode::Depth => DEPTH_GROUPS,
        }
    }
}

/// Spread the bits of `value` over three axes.
///
/// In [`MortonMode::Depth`] the value is first shifted left by
/// `16 - quantization` so that it is expressed in the 16-bit domain.
///
/// One group more than [`morton_decode`] reads is spread, so the distance
/// one past the end of the Hilbert curve maps to a point off the grid.
///
/// # Examples
///
/// ```
/// use depthcode_core::BitWidthConfig;
/// use depthcode_core::morton::{morton_encode, MortonMode};
///
/// let cfg = BitWidthConfig::new(16, 5).unwrap();
/// assert_eq!(morton_encode(0b111, MortonMode::Hilbert, cfg), [1, 1, 1]);
/// assert_eq!(morton_encode(0b100_001, MortonMode::Hilbert, cfg), [1, 0, 2]);
/// ```
#[inline]
pub fn morton_encode(value: u32, mode: MortonMode, config: BitWidthConfig) -> [u32; 3] {
    let value = match mode {
        MortonMode::Hilbert => value,
        MortonMode::Depth => value << config.depth_shift(),
    };

    let mut axes = [0u32; 3];
    for i in 0..=mode.groups(config) {
        for (axis, out) in (0u32..).zip(axes.iter_mut()) {
            let bit = 3 * i + axis;
            *out |= (value & (1 << bit)) >> (bit - i);
        }
    }
    axes
}

/// Interleave the low bits of three axes into one value.
///
/// This is the inverse of [`morton_encode`] for values inside the mode's bit
/// width. Axis bits above that width are ignored.
///
/// # Examples
///
/// ```
/// use depthcode_core::BitWidthConfig;
/// use depthcode_core::morton::{morton_decode, MortonMode};
///
/// let cfg = BitWidthConfig::new(16, 5).unwrap();
/// assert_eq!(morton_decode([1, 1, 1], MortonMode::Hilbert, cfg), 0b111);
/// assert_eq!(morton_decode([0, 0, 2], MortonMode::Hilbert, cfg), 0b100_000);
/// ```
#[inline]
pub fn morton_decode(coords: [u32; 3], mode: MortonMode, config: BitWidthConfig) -> u32 {
    let mut code = 0u32;
    for i in 0..mode.groups(config) {
        let mask = 1u32 << i;
        for (axis, &c) in (0u32..).zip(coords.iter()) {
            code |= (c & mask) << (2 * i + axis);
        }
    }
    code
}
