//! The RGB sample type consumed by every decoder.

/// Three 8-bit channel values read from one pixel of an encoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColorSample {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl ColorSample {
    /// Create a sample from its three channels.
    ///
    /// # Examples
    ///
    /// ```
    /// use depthcode_core::ColorSample;
    /// let c = ColorSample::new(1, 2, 3);
    /// assert_eq!(c.channels(), [1, 2, 3]);
    /// ```
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// The channels as an `[r, g, b]` array.
    #[inline]
    pub const fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// The channels widened to `i32`, the working type of the integer decoders.
    #[inline]
    pub(crate) fn widened(self) -> [i32; 3] {
        [self.r as i32, self.g as i32, self.b as i32]
    }

    /// The channels normalized to `[0.0, 1.0]`.
    #[inline]
    pub(crate) fn normalized(self) -> [f64; 3] {
        [
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
        ]
    }
}

impl From<[u8; 3]> for ColorSample {
    #[inline]
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<(u8, u8, u8)> for ColorSample {
    #[inline]
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}

impl From<ColorSample> for [u8; 3] {
    #[inline]
    fn from(color: ColorSample) -> Self {
        color.channels()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_array_and_back() {
        let c = ColorSample::from([10, 20, 30]);
        assert_eq!(c, ColorSample::new(10, 20, 30));
        let arr: [u8; 3] = c.into();
        assert_eq!(arr, [10, 20, 30]);
    }

    #[test]
    fn test_from_tuple() {
        assert_eq!(ColorSample::from((1, 2, 3)), ColorSample::new(1, 2, 3));
    }

    #[test]
    fn test_normalized_bounds() {
        let n = ColorSample::new(0, 255, 51).normalized();
        assert_eq!(n[0], 0.0);
        assert_eq!(n[1], 1.0);
        assert!((n[2] - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_widened() {
        assert_eq!(ColorSample::new(255, 0, 7).widened(), [255, 0, 7]);
    }
}
