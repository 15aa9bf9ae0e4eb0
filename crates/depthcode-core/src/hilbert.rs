//! Hilbert curve transforms and the curve-walk depth decoder.
//!
//! Coordinates are converted to and from the "transposed" Hilbert form with
//! Skilling's exchange/invert method; the transposed triple is then read as a
//! Morton code to obtain the distance along the curve. Both transforms work on
//! `algo_bits` bits per axis and are exact inverses of each other over
//! `[0, 2^algo_bits)^3`.

use crate::color::ColorSample;
use crate::config::BitWidthConfig;
use crate::morton::{morton_decode, morton_encode, MortonMode};

// ---------------------------------------------------------------------------
// Coordinate transforms
// ---------------------------------------------------------------------------

/// Convert grid coordinates into transposed Hilbert form.
///
/// Masks run from `2^(algo_bits - 1)` down to 2, followed by a Gray-code pass
/// and a correction derived from the last axis.
pub fn to_hilbert_coords(coords: [u32; 3], config: BitWidthConfig) -> [u32; 3] {
    let mut x = coords;
    let m = 1u32 << (config.algo_bits() - 1);

    let mut q = m;
    while q > 1 {
        let p = q - 1;
        for i in 0..3 {
            if x[i] & q != 0 {
                x[0] ^= p;
            } else {
                let t = (x[0] ^ x[i]) & p;
                x[0] ^= t;
                x[i] ^= t;
            }
        }
        q >>= 1;
    }

    // Gray encode.
    for i in 1..3 {
        x[i] ^= x[i - 1];
    }
    let mut t = 0u32;
    let mut q = m;
    while q > 1 {
        if x[2] & q != 0 {
            t ^= q - 1;
        }
        q >>= 1;
    }
    for axis in &mut x {
        *axis ^= t;
    }

    x
}

/// Convert transposed Hilbert form back into grid coordinates.
///
/// Gray-decodes first, then undoes the exchange/invert pass with masks
/// running from 2 up to (but excluding) `2^algo_bits`.
pub fn from_hilbert_coords(coords: [u32; 3], config: BitWidthConfig) -> [u32; 3] {
    let mut x = coords;
    let n = 2u32 << (config.algo_bits() - 1);

    // Gray decode by H ^ (H / 2).
    let t = x[2] >> 1;
    for i in (1..3).rev() {
        x[i] ^= x[i - 1];
    }
    x[0] ^= t;

    let mut q = 2u32;
    while q != n {
        let p = q - 1;
        for i in (0..3).rev() {
            if x[i] & q != 0 {
                x[0] ^= p;
            } else {
                let t = (x[0] ^ x[i]) & p;
                x[0] ^= t;
                x[i] ^= t;
            }
        }
        q <<= 1;
    }

    x
}

/// Distance along the curve of a coarse grid point.
#[inline]
pub fn hilbert_distance(coarse: [u32; 3], config: BitWidthConfig) -> u32 {
    let mut curve = to_hilbert_coords(coarse, config);
    curve.swap(0, 2);
    morton_decode(curve, MortonMode::Hilbert, config)
}

/// Coarse grid point at a distance along the curve.
///
/// The distance one past the end of the curve maps to a point outside the
/// grid; larger distances wrap.
#[inline]
pub fn hilbert_point(distance: u32, config: BitWidthConfig) -> [u32; 3] {
    let mut curve = morton_encode(distance, MortonMode::Hilbert, config);
    curve.swap(0, 2);
    from_hilbert_coords(curve, config)
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// Decode a color sample encoded with the Hilbert scheme.
///
/// Each channel is split into a coarse grid index (top `algo_bits` bits) and
/// a signed offset inside the cell, rounding to the nearest cell. The coarse
/// point gives a distance `d` along the curve; the offsets are then added with
/// the sign of the curve's local direction, estimated from the points at
/// `d - 1` and `d + 1`.
///
/// The result is the low 16 bits of the scaled distance: curve distances that
/// exceed the 16-bit range wrap, exactly as they do in the packed table.
pub fn hilbert_decode(color: ColorSample, config: BitWidthConfig) -> u16 {
    let segment_bits = config.segment_bits();
    let side = 1i32 << segment_bits;

    let mut coarse = color.widened();
    let mut fract = [0i32; 3];
    for (c, f) in coarse.iter_mut().zip(fract.iter_mut()) {
        *f = *c & (side - 1);
        if *f >= side / 2 {
            *f -= side;
            // Round to the closest cell.
            *c += side / 2;
        }
        *c >>= segment_bits;
    }

    let distance = hilbert_distance(coarse.map(|c| c as u32), config) as i32;
    let last = (1i32 << config.quantization()) - 1;
    let next = hilbert_point((distance + 1).min(last) as u32, config);
    let prev = hilbert_point((distance - 1).max(0) as u32, config);

    let mut depth = distance << segment_bits;
    for i in 0..3 {
        depth += fract[i] * (next[i] as i32 - prev[i] as i32).signum();
    }
    (depth << config.depth_shift()) as u16
}
