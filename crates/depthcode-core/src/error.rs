//! Error types for depth decoding and table construction.

use thiserror::Error;

/// Errors that can occur while configuring a decoder or building a table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DepthcodeError {
    /// The bit-width configuration would produce an out-of-range shift.
    #[error("invalid bit-width configuration: quantization={quantization}, algo_bits={algo_bits} ({reason})")]
    InvalidConfiguration {
        /// The requested depth precision.
        quantization: u32,
        /// The requested per-axis algorithm bit width.
        algo_bits: u32,
        /// Why the combination was rejected.
        reason: &'static str,
    },

    /// The algorithm identifier is not one of the known schemes.
    #[error("unknown algorithm: {0:?} (expected one of hilbert, triangle, morton, packed, split, phase, hue)")]
    UnknownAlgorithm(String),

    /// A pixel buffer cannot be split into whole pixels.
    #[error("invalid pixel buffer of {len} bytes with {channels} channels ({reason})")]
    InvalidPixelBuffer {
        /// Buffer length in bytes.
        len: usize,
        /// Declared channels per pixel.
        channels: usize,
        /// Why the buffer was rejected.
        reason: &'static str,
    },

    /// A depth map does not match its declared dimensions.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// The width value.
        width: usize,
        /// The height value.
        height: usize,
        /// Why the dimensions are invalid.
        reason: &'static str,
    },

    /// A table build was cancelled between slabs.
    #[error("table build cancelled after {completed_slabs} of 255 slabs")]
    Cancelled {
        /// Number of R slabs finished before the cancel flag was observed.
        completed_slabs: usize,
    },
}
