//! Identifiers for the seven color encoding schemes.

use std::fmt;
use std::str::FromStr;

use crate::error::DepthcodeError;

/// The scheme used to pack a depth value into three color channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AlgorithmId {
    /// Hilbert space-filling curve with in-cell gradient interpolation.
    Hilbert,
    /// Base level plus two triangle-wave correction channels.
    Triangle,
    /// Morton (Z-order) bit interleaving.
    Morton,
    /// High bits in red, low bits in green.
    Packed,
    /// Packed with the low part reflected on odd high parts.
    Split,
    /// Phase-shift cosine plus a coarse wrap counter.
    Phase,
    /// Hue angle around the RGB color wheel.
    Hue,
}

impl AlgorithmId {
    /// Every algorithm, in the order the renderer's selection surface lists them.
    pub const ALL: [AlgorithmId; 7] = [
        AlgorithmId::Hilbert,
        AlgorithmId::Triangle,
        AlgorithmId::Morton,
        AlgorithmId::Packed,
        AlgorithmId::Split,
        AlgorithmId::Phase,
        AlgorithmId::Hue,
    ];

    /// The lowercase identifier used by the selection surface.
    pub const fn as_str(self) -> &'static str {
        match self {
            AlgorithmId::Hilbert => "hilbert",
            AlgorithmId::Triangle => "triangle",
            AlgorithmId::Morton => "morton",
            AlgorithmId::Packed => "packed",
            AlgorithmId::Split => "split",
            AlgorithmId::Phase => "phase",
            AlgorithmId::Hue => "hue",
        }
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlgorithmId {
    type Err = DepthcodeError;

    /// Parse an identifier, ignoring ASCII case.
    ///
    /// # Examples
    ///
    /// ```
    /// use depthcode_core::AlgorithmId;
    /// assert_eq!("hilbert".parse::<AlgorithmId>().unwrap(), AlgorithmId::Hilbert);
    /// assert_eq!("PACKED".parse::<AlgorithmId>().unwrap(), AlgorithmId::Packed);
    /// assert!("gray".parse::<AlgorithmId>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AlgorithmId::ALL
            .into_iter()
            .find(|algo| algo.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DepthcodeError::UnknownAlgorithm(s.to_owned()))
    }
}
