//! Bit-width parameters shared by the decoders.
//!
//! A [`BitWidthConfig`] can only be obtained through a validating constructor
//! and has no setters, so a decoder or a table build that captured one by
//! value cannot observe a parameter change halfway through.

use crate::algorithm::AlgorithmId;
use crate::error::DepthcodeError;

/// Default depth precision in bits.
pub const DEFAULT_QUANTIZATION: u32 = 16;

/// Per-axis bit width of the Hilbert curve grid.
pub const HILBERT_ALGO_BITS: u32 = 5;

/// Algorithm bit width used by every scheme other than Hilbert.
pub const DEFAULT_ALGO_BITS: u32 = 8;

/// Precision of the decoded depth and the bit width used by the curve and
/// packing schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "BitWidthParams", into = "BitWidthParams")
)]
pub struct BitWidthConfig {
    quantization: u32,
    algo_bits: u32,
}

impl BitWidthConfig {
    /// Create a validated configuration.
    ///
    /// `quantization` must lie in `1..=16` and `algo_bits` in
    /// `1..=min(8, quantization)`.
    ///
    /// # Errors
    ///
    /// Returns [`DepthcodeError::InvalidConfiguration`] when either value is
    /// out of range.
    ///
    /// # Examples
    ///
    /// ```
    /// use depthcode_core::BitWidthConfig;
    /// let cfg = BitWidthConfig::new(16, 5).unwrap();
    /// assert_eq!(cfg.algo_bits(), 5);
    /// assert!(BitWidthConfig::new(17, 8).is_err());
    /// assert!(BitWidthConfig::new(16, 0).is_err());
    /// ```
    pub fn new(quantization: u32, algo_bits: u32) -> Result<Self, DepthcodeError> {
        let reject = |reason| DepthcodeError::InvalidConfiguration {
            quantization,
            algo_bits,
            reason,
        };
        if !(1..=16).contains(&quantization) {
            return Err(reject("quantization must be in 1..=16"));
        }
        if algo_bits == 0 {
            return Err(reject("algo_bits must be >= 1"));
        }
        if algo_bits > 8 {
            return Err(reject("algo_bits must be <= 8"));
        }
        if algo_bits > quantization {
            return Err(reject("algo_bits must be <= quantization"));
        }
        Ok(Self {
            quantization,
            algo_bits,
        })
    }

    /// The default configuration for an algorithm: 16-bit depth, 5 algorithm
    /// bits for Hilbert and 8 for everything else.
    pub const fn for_algorithm(algorithm: AlgorithmId) -> Self {
        let algo_bits = match algorithm {
            AlgorithmId::Hilbert => HILBERT_ALGO_BITS,
            _ => DEFAULT_ALGO_BITS,
        };
        Self {
            quantization: DEFAULT_QUANTIZATION,
            algo_bits,
        }
    }

    /// Check the constraints a specific algorithm adds on top of [`BitWidthConfig::new`].
    ///
    /// Packed and split read `quantization - algo_bits` low bits from a single
    /// 8-bit channel, so that difference may not exceed 8.
    ///
    /// # Errors
    ///
    /// Returns [`DepthcodeError::InvalidConfiguration`] if the algorithm
    /// cannot run with this configuration.
    pub fn validate_for(self, algorithm: AlgorithmId) -> Result<Self, DepthcodeError> {
        match algorithm {
            AlgorithmId::Packed | AlgorithmId::Split if self.low_bits() > 8 => {
                Err(DepthcodeError::InvalidConfiguration {
                    quantization: self.quantization,
                    algo_bits: self.algo_bits,
                    reason: "quantization - algo_bits must be <= 8 for packed and split",
                })
            }
            _ => Ok(self),
        }
    }

    /// Depth precision in bits.
    #[inline]
    pub const fn quantization(self) -> u32 {
        self.quantization
    }

    /// Per-axis bit width used by the curve and packing schemes.
    #[inline]
    pub const fn algo_bits(self) -> u32 {
        self.algo_bits
    }

    /// Channel bits below the coarse Hilbert grid index.
    #[inline]
    pub(crate) const fn segment_bits(self) -> u32 {
        8 - self.algo_bits
    }

    /// Bits carried by the low (green) part of the packed schemes.
    #[inline]
    pub(crate) const fn low_bits(self) -> u32 {
        self.quantization - self.algo_bits
    }

    /// Shift that lifts a `quantization`-bit value into the 16-bit range.
    #[inline]
    pub(crate) const fn depth_shift(self) -> u32 {
        16 - self.quantization
    }
}

impl Default for BitWidthConfig {
    fn default() -> Self {
        Self {
            quantization: DEFAULT_QUANTIZATION,
            algo_bits: DEFAULT_ALGO_BITS,
        }
    }
}

/// Unvalidated wire form; deserialization goes through [`BitWidthConfig::new`].
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct BitWidthParams {
    quantization: u32,
    algo_bits: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<BitWidthParams> for BitWidthConfig {
    type Error = DepthcodeError;

    fn try_from(params: BitWidthParams) -> Result<Self, Self::Error> {
        BitWidthConfig::new(params.quantization, params.algo_bits)
    }
}

#[cfg(feature = "serde")]
impl From<BitWidthConfig> for BitWidthParams {
    fn from(config: BitWidthConfig) -> Self {
        Self {
            quantization: config.quantization,
            algo_bits: config.algo_bits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_sixteen_eight() {
        let cfg = BitWidthConfig::default();
        assert_eq!(cfg.quantization(), 16);
        assert_eq!(cfg.algo_bits(), 8);
    }

    #[test]
    fn test_for_algorithm() {
        assert_eq!(BitWidthConfig::for_algorithm(AlgorithmId::Hilbert).algo_bits(), 5);
        for algo in AlgorithmId::ALL {
            let cfg = BitWidthConfig::for_algorithm(algo);
            assert_eq!(cfg.quantization(), 16);
            assert_eq!(BitWidthConfig::new(cfg.quantization(), cfg.algo_bits()), Ok(cfg));
            if algo != AlgorithmId::Hilbert {
                assert_eq!(cfg.algo_bits(), 8);
            }
        }
    }

    #[test]
    fn test_quantization_range() {
        assert!(BitWidthConfig::new(0, 1).is_err());
        assert!(BitWidthConfig::new(1, 1).is_ok());
        assert!(BitWidthConfig::new(16, 8).is_ok());
        assert!(BitWidthConfig::new(17, 8).is_err());
    }

    #[test]
    fn test_algo_bits_range() {
        assert!(BitWidthConfig::new(16, 0).is_err());
        assert!(BitWidthConfig::new(16, 9).is_err());
        assert!(BitWidthConfig::new(4, 5).is_err());
        assert!(BitWidthConfig::new(5, 5).is_ok());
    }

    #[test]
    fn test_error_carries_values() {
        match BitWidthConfig::new(20, 3) {
            Err(DepthcodeError::InvalidConfiguration {
                quantization,
                algo_bits,
                ..
            }) => {
                assert_eq!(quantization, 20);
                assert_eq!(algo_bits, 3);
            }
            other => panic!("expected InvalidConfiguration, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_for_packed_low_bits() {
        let hilbert = BitWidthConfig::for_algorithm(AlgorithmId::Hilbert);
        assert!(hilbert.validate_for(AlgorithmId::Hilbert).is_ok());
        assert!(hilbert.validate_for(AlgorithmId::Packed).is_err());
        assert!(hilbert.validate_for(AlgorithmId::Split).is_err());
        assert!(hilbert.validate_for(AlgorithmId::Hue).is_ok());

        let cfg = BitWidthConfig::new(12, 4).unwrap();
        assert!(cfg.validate_for(AlgorithmId::Packed).is_ok());
    }

    #[test]
    fn test_derived_shifts() {
        let cfg = BitWidthConfig::new(12, 5).unwrap();
        assert_eq!(cfg.segment_bits(), 3);
        assert_eq!(cfg.low_bits(), 7);
        assert_eq!(cfg.depth_shift(), 4);
    }
}
