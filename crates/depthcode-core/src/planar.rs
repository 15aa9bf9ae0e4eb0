//! Stateless decoders that read depth directly from channel values.
//!
//! | Scheme   | Channels used | Notes |
//! |----------|---------------|-------|
//! | triangle | R, G, B       | base level plus triangle-wave correction |
//! | phase    | R, G          | phase cosine plus wrap counter |
//! | hue      | R, G, B       | hue angle over six sextants |
//! | packed   | R, G          | high bits in R, low bits in G |
//! | split    | R, G          | packed, low part reflected on odd high parts |
//!
//! Every decoder is total over `[0, 255]^3`. Integer results are the low 16
//! bits of the scaled value; floating-point results are truncated towards zero
//! and saturate at the ends of the `u16` range.

use std::f64::consts::PI;

use crate::color::ColorSample;
use crate::config::BitWidthConfig;

/// Width of the depth domain used by the floating-point schemes.
const DEPTH_RANGE: f64 = 65536.0;

/// Triangle-wave period, in normalized depth units.
const TRIANGLE_PERIOD: f64 = 512.0 / DEPTH_RANGE;

/// Phase-shift period in depth units.
const PHASE_PERIOD: f64 = 16384.0;

/// Largest raw hue metric.
const HUE_RANGE: f64 = 1529.0;

/// Decode the triangle-wave scheme.
///
/// R holds the depth at coarse precision (`Ld`); G and B are two triangle
/// waves a quarter period apart (`Ha`, `Hb`). The quarter period `m` selects
/// which wave, or its complement, refines the base level.
///
/// The base level is evaluated literally as
/// `Ld - (Ld - ((p / 8) mod p)) + (p / 4) * m - p / 8`.
pub fn triangle_decode(color: ColorSample) -> u16 {
    let p = TRIANGLE_PERIOD;
    let [ld, ha, hb] = color.normalized();

    let bias = if ld > 0.0 { 0.5 } else { 0.0 };
    let m = ((4.0 * (ld / p) - bias).floor() as i64).rem_euclid(4);
    let l0 = ld - (ld - ((p / 8.0) % p)) + (p / 4.0) * m as f64 - p / 8.0;

    let half = p / 2.0;
    let delta = match m {
        0 => half * ha,
        1 => half * hb,
        2 => half * (1.0 - ha),
        _ => half * (1.0 - hb),
    };

    ((l0 + delta) * DEPTH_RANGE) as u16
}

/// Decode the phase-shift scheme.
///
/// R is `0.5 + 0.5 cos(2 pi z / P)` and G is the depth at coarse precision,
/// used to unwrap the phase. The result is clamped to `[0, 65535]`.
pub fn phase_decode(color: ColorSample) -> u16 {
    let w = DEPTH_RANGE - 1.0;
    let beta = PHASE_PERIOD / 2.0;
    let [i1, i2, _] = color.normalized();

    let mut phi = (2.0 * i1 - 1.0).acos().abs();
    let gamma = ((i2 * w) / beta).floor() as i64;
    if gamma % 2 != 0 {
        phi = -phi;
    }

    let k = ((i2 * w) / PHASE_PERIOD).round();
    let unwrapped = phi + 2.0 * PI * k;
    let z = unwrapped * (PHASE_PERIOD / (2.0 * PI));
    z.clamp(0.0, w) as u16
}

/// Decode the hue-angle scheme.
///
/// The hue wheel is walked red -> yellow -> green -> cyan -> blue -> magenta,
/// giving a raw metric in `[0, 1529)`, which is quantized to `quantization`
/// bits and lifted back to 16 bits. Samples whose channel sum is below 255
/// are too dark to carry a hue and decode to 0.
pub fn hue_decode(color: ColorSample, config: BitWidthConfig) -> u16 {
    let [r, g, b] = color.widened();

    let raw = if r + g + b < 255 {
        0
    } else if r >= g && r >= b {
        if g >= b {
            g - b
        } else {
            (g - b) + 1529
        }
    } else if g >= b {
        b - r + 510
    } else {
        r - g + 1020
    };

    let levels = (1u32 << config.quantization()) as f64;
    let q = ((raw as f64 / HUE_RANGE) * levels).round() as u32;
    (q << config.depth_shift()) as u16
}

/// Split R and G into the high and low parts shared by packed and split.
#[inline]
fn packed_parts(color: ColorSample, config: BitWidthConfig) -> (u32, u32) {
    let high = (color.r as u32) >> (8 - config.algo_bits());
    let low = (color.g as u32) >> (8 - config.low_bits());
    (high, low)
}

/// Decode the packed scheme: `algo_bits` high bits from R, the remaining
/// `quantization - algo_bits` bits from G.
///
/// The configuration must satisfy `quantization - algo_bits <= 8`, which
/// [`BitWidthConfig::validate_for`] checks.
pub fn packed_decode(color: ColorSample, config: BitWidthConfig) -> u16 {
    let (high, low) = packed_parts(color, config);
    (((high << config.low_bits()) + low) << config.depth_shift()) as u16
}

/// Decode the split (serpentine) scheme.
///
/// Same layout as [`packed_decode`], but the low part runs backwards when the
/// high part is odd, so neighbouring depths stay neighbouring in G across a
/// change of the high part.
pub fn split_decode(color: ColorSample, config: BitWidthConfig) -> u16 {
    let (high, mut low) = packed_parts(color, config);
    if high & 1 == 1 {
        low = (1 << config.low_bits()) - low - 1;
    }
    (((high << config.low_bits()) + low) << config.depth_shift()) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(quantization: u32, algo_bits: u32) -> BitWidthConfig {
        BitWidthConfig::new(quantization, algo_bits).unwrap()
    }

    fn c(r: u8, g: u8, b: u8) -> ColorSample {
        ColorSample::new(r, g, b)
    }

    // -- packed -------------------------------------------------------------

    #[test]
    fn test_packed_extremes() {
        let cfg = cfg(16, 8);
        assert_eq!(packed_decode(c(0, 0, 0), cfg), 0);
        assert_eq!(packed_decode(c(255, 255, 0), cfg), 65535);
        assert_eq!(packed_decode(c(1, 0, 0), cfg), 256);
        assert_eq!(packed_decode(c(0, 1, 0), cfg), 1);
    }

    #[test]
    fn test_packed_ignores_blue() {
        let cfg = cfg(16, 8);
        assert_eq!(packed_decode(c(12, 34, 0), cfg), packed_decode(c(12, 34, 255), cfg));
    }

    #[test]
    fn test_packed_reduced_precision() {
        // 6 high bits from R, 6 low bits from G, lifted by 4.
        let cfg = cfg(12, 6);
        assert_eq!(packed_decode(c(0b1111_1100, 0b1111_1100, 0), cfg), 0xFFF0);
        assert_eq!(packed_decode(c(0b0000_0100, 0, 0), cfg), 1 << 10);
        assert_eq!(packed_decode(c(0, 0b0000_0100, 0), cfg), 1 << 4);
    }

    // -- split --------------------------------------------------------------

    #[test]
    fn test_split_origin() {
        assert_eq!(split_decode(c(0, 0, 0), cfg(16, 8)), 0);
    }

    #[test]
    fn test_split_reflects_on_odd_high() {
        let cfg = cfg(16, 8);
        assert_eq!(split_decode(c(0, 10, 0), cfg), 10);
        assert_eq!(split_decode(c(1, 0, 0), cfg), 256 + 255);
        assert_eq!(split_decode(c(1, 255, 0), cfg), 256);
        assert_eq!(split_decode(c(2, 0, 0), cfg), 512);
    }

    #[test]
    fn test_split_continuous_across_high_boundaries() {
        let cfg = cfg(16, 8);
        for high in 0..255u8 {
            // The G value at which this high part ends and the next one starts.
            let edge = if high % 2 == 0 { 255 } else { 0 };
            let here = split_decode(c(high, edge, 0), cfg) as i32;
            let there = split_decode(c(high + 1, edge, 0), cfg) as i32;
            assert_eq!(there - here, 1, "discontinuity between high {high} and {}", high + 1);
        }
    }

    #[test]
    fn test_split_covers_range_once() {
        let cfg = cfg(16, 8);
        let mut seen = vec![false; 65536];
        for r in 0..=255u8 {
            for g in 0..=255u8 {
                let v = split_decode(c(r, g, 0), cfg) as usize;
                assert!(!seen[v]);
                seen[v] = true;
            }
        }
    }

    // -- hue ----------------------------------------------------------------

    #[test]
    fn test_hue_dark_is_zero() {
        let cfg = cfg(16, 8);
        assert_eq!(hue_decode(c(0, 0, 0), cfg), 0);
        assert_eq!(hue_decode(c(100, 100, 54), cfg), 0);
    }

    #[test]
    fn test_hue_primaries() {
        let cfg = cfg(16, 8);
        assert_eq!(hue_decode(c(255, 0, 0), cfg), 0);
        // Pure green sits at 510, pure blue at 1020.
        let expect = |raw: f64| ((raw / 1529.0) * 65536.0).round() as u16;
        assert_eq!(hue_decode(c(0, 255, 0), cfg), expect(510.0));
        assert_eq!(hue_decode(c(0, 0, 255), cfg), expect(1020.0));
        assert_eq!(hue_decode(c(255, 255, 0), cfg), expect(255.0));
    }

    #[test]
    fn test_hue_magenta_wraps_towards_top() {
        let cfg = cfg(16, 8);
        let magenta = hue_decode(c(255, 0, 254), cfg);
        let expect = ((1275.0 / 1529.0) * 65536.0_f64).round() as u16;
        assert_eq!(magenta, expect);
        assert!(hue_decode(c(255, 0, 1), cfg) > magenta);
    }

    #[test]
    fn test_hue_quantization_steps() {
        let cfg = cfg(8, 8);
        for (r, g, b) in [(255, 40, 0), (10, 255, 70), (0, 30, 255)] {
            assert_eq!(hue_decode(c(r, g, b), cfg) % 256, 0);
        }
    }

    // -- phase --------------------------------------------------------------

    #[test]
    fn test_phase_origin() {
        // cos = 1 at zero phase: R = 255, no wraps.
        assert_eq!(phase_decode(c(255, 0, 0)), 0);
    }

    #[test]
    fn test_phase_half_period() {
        // cos = -1 with no wraps is half a period in.
        let z = phase_decode(c(0, 0, 0));
        assert!((8191..=8192).contains(&z), "got {z}");
    }

    #[test]
    fn test_phase_clamps_high() {
        // Four wraps at zero phase lands exactly on 65536.
        assert_eq!(phase_decode(c(255, 255, 0)), 65535);
        for r in 0..=255u8 {
            for g in 0..=255u8 {
                let _ = phase_decode(c(r, g, 0));
            }
        }
    }

    #[test]
    fn test_phase_odd_gamma_negates_phase() {
        // G = 40: gamma 1, one wrap; the phase is subtracted from the wrap.
        assert_eq!(phase_decode(c(100, 40, 0)), 11721);
        // G = 64: gamma 2, one wrap; added.
        assert_eq!(phase_decode(c(100, 64, 0)), 21046);
        assert_eq!(phase_decode(c(128, 128, 0)), 36853);
        assert_eq!(phase_decode(c(30, 200, 0)), 55518);
    }

    #[test]
    fn test_phase_ignores_blue() {
        assert_eq!(phase_decode(c(90, 77, 0)), phase_decode(c(90, 77, 200)));
    }

    // -- triangle -----------------------------------------------------------

    #[test]
    fn test_triangle_origin() {
        assert_eq!(triangle_decode(c(0, 0, 0)), 0);
    }

    #[test]
    fn test_triangle_quarter_selects_wave() {
        // With R fixed, G moves the result in quarter 0 and B does not.
        let r = 0;
        assert!(triangle_decode(c(r, 255, 0)) > triangle_decode(c(r, 0, 0)));
        assert_eq!(triangle_decode(c(r, 0, 255)), triangle_decode(c(r, 0, 0)));
    }

    #[test]
    fn test_triangle_quarter_zero_follows_first_wave() {
        assert_eq!(triangle_decode(c(0, 255, 0)), 256);
        assert_eq!(triangle_decode(c(0, 100, 200)), 100);
        assert_eq!(triangle_decode(c(66, 100, 200)), 100);
    }

    #[test]
    fn test_triangle_quarter_one_follows_second_wave() {
        assert_eq!(triangle_decode(c(1, 0, 0)), 128);
        assert_eq!(triangle_decode(c(1, 255, 0)), 128);
        assert_eq!(triangle_decode(c(1, 0, 255)), 384);
        assert_eq!(triangle_decode(c(1, 100, 200)), 328);
    }

    #[test]
    fn test_triangle_quarter_two_complements_first_wave() {
        assert_eq!(triangle_decode(c(65, 0, 0)), 512);
        assert_eq!(triangle_decode(c(65, 255, 0)), 256);
        assert_eq!(triangle_decode(c(65, 0, 255)), 512);
        assert_eq!(triangle_decode(c(65, 100, 200)), 411);
    }

    #[test]
    fn test_triangle_quarter_three_complements_second_wave() {
        assert_eq!(triangle_decode(c(2, 0, 0)), 640);
        assert_eq!(triangle_decode(c(2, 255, 0)), 640);
        assert_eq!(triangle_decode(c(2, 0, 255)), 384);
        assert_eq!(triangle_decode(c(2, 100, 200)), 439);
    }

    #[test]
    fn test_triangle_is_total() {
        for r in 0..=255u8 {
            for g in (0..=255u8).step_by(15) {
                for b in (0..=255u8).step_by(15) {
                    let _ = triangle_decode(c(r, g, b));
                }
            }
        }
    }
}
