//! Decoder dispatch: turn a color sample (or a whole pixel buffer) back into
//! depth with a chosen algorithm.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::algorithm::AlgorithmId;
use crate::color::ColorSample;
use crate::config::BitWidthConfig;
use crate::error::DepthcodeError;
use crate::hilbert::hilbert_decode;
use crate::morton::{morton_decode, MortonMode};
use crate::planar::{hue_decode, packed_decode, phase_decode, split_decode, triangle_decode};

/// Pixels per rayon work item in [`decode_pixels`].
#[cfg(feature = "parallel")]
const PIXEL_CHUNK: usize = 16_384;

/// An algorithm bound to a configuration that has been validated for it.
///
/// Construction is the only fallible step; [`Decoder::decode`] is total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Decoder {
    algorithm: AlgorithmId,
    config: BitWidthConfig,
}

impl Decoder {
    /// Bind `algorithm` to `config`.
    ///
    /// # Errors
    ///
    /// Returns [`DepthcodeError::InvalidConfiguration`] if the configuration
    /// cannot be used with this algorithm.
    ///
    /// # Examples
    ///
    /// ```
    /// use depthcode_core::{AlgorithmId, BitWidthConfig, ColorSample, Decoder};
    /// let decoder = Decoder::new(AlgorithmId::Packed, BitWidthConfig::default()).unwrap();
    /// assert_eq!(decoder.decode(ColorSample::new(255, 255, 0)), 65535);
    /// ```
    pub fn new(algorithm: AlgorithmId, config: BitWidthConfig) -> Result<Self, DepthcodeError> {
        let config = config.validate_for(algorithm)?;
        Ok(Self { algorithm, config })
    }

    /// Bind `algorithm` to its default configuration.
    pub fn with_default_config(algorithm: AlgorithmId) -> Self {
        Self {
            algorithm,
            config: BitWidthConfig::for_algorithm(algorithm),
        }
    }

    /// The algorithm this decoder runs.
    #[inline]
    pub fn algorithm(&self) -> AlgorithmId {
        self.algorithm
    }

    /// The configuration captured at construction.
    #[inline]
    pub fn config(&self) -> BitWidthConfig {
        self.config
    }

    /// Decode one sample.
    #[inline]
    pub fn decode(&self, color: ColorSample) -> u16 {
        let config = self.config;
        match self.algorithm {
            AlgorithmId::Hilbert => hilbert_decode(color, config),
            AlgorithmId::Triangle => triangle_decode(color),
            AlgorithmId::Morton => {
                let coords = color.channels().map(u32::from);
                morton_decode(coords, MortonMode::Depth, config) as u16
            }
            AlgorithmId::Packed => packed_decode(color, config),
            AlgorithmId::Split => split_decode(color, config),
            AlgorithmId::Phase => phase_decode(color),
            AlgorithmId::Hue => hue_decode(color, config),
        }
    }
}

/// Decode a single sample.
///
/// # Errors
///
/// Returns [`DepthcodeError::InvalidConfiguration`] if `config` cannot be used
/// with `algorithm`.
///
/// # Examples
///
/// ```
/// use depthcode_core::{decode, AlgorithmId, BitWidthConfig, ColorSample};
/// let cfg = BitWidthConfig::for_algorithm(AlgorithmId::Hue);
/// assert_eq!(decode(AlgorithmId::Hue, ColorSample::new(255, 0, 0), cfg).unwrap(), 0);
/// ```
pub fn decode(
    algorithm: AlgorithmId,
    color: ColorSample,
    config: BitWidthConfig,
) -> Result<u16, DepthcodeError> {
    Ok(Decoder::new(algorithm, config)?.decode(color))
}

/// Decode an interleaved pixel buffer into a depth map.
///
/// # Arguments
///
/// * `pixels` - Pixel data in row-major order, `channels` bytes per pixel.
/// * `channels` - 3 for RGB or 4 for RGBA; only the first three are read.
/// * `algorithm` - The scheme the image was encoded with.
/// * `config` - Bit widths the image was encoded with.
///
/// # Returns
///
/// One depth value per pixel, in the same order.
///
/// # Errors
///
/// Returns an error if `channels` is not 3 or 4, if the buffer length is not a
/// multiple of `channels`, or if the configuration is invalid for `algorithm`.
///
/// # Examples
///
/// ```
/// use depthcode_core::{decode_pixels, AlgorithmId, BitWidthConfig};
/// let rgba = [0, 0, 0, 255, 255, 255, 0, 255];
/// let depth = decode_pixels(&rgba, 4, AlgorithmId::Packed, BitWidthConfig::default()).unwrap();
/// assert_eq!(depth, vec![0, 65535]);
/// ```
pub fn decode_pixels(
    pixels: &[u8],
    channels: usize,
    algorithm: AlgorithmId,
    config: BitWidthConfig,
) -> Result<Vec<u16>, DepthcodeError> {
    if channels != 3 && channels != 4 {
        return Err(DepthcodeError::InvalidPixelBuffer {
            len: pixels.len(),
            channels,
            reason: "pixels must have 3 or 4 channels",
        });
    }
    if pixels.len() % channels != 0 {
        return Err(DepthcodeError::InvalidPixelBuffer {
            len: pixels.len(),
            channels,
            reason: "buffer length is not a multiple of the channel count",
        });
    }

    let decoder = Decoder::new(algorithm, config)?;
    let sample = |px: &[u8]| decoder.decode(ColorSample::new(px[0], px[1], px[2]));

    #[cfg(feature = "parallel")]
    let depth = pixels
        .par_chunks(PIXEL_CHUNK * channels)
        .flat_map_iter(|chunk| chunk.chunks_exact(channels).map(sample))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let depth = pixels.chunks_exact(channels).map(sample).collect();

    Ok(depth)
}
