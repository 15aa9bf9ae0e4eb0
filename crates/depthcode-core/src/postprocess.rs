//! Clean-up passes over decoded depth maps.

use crate::error::DepthcodeError;

/// Replace outliers in a depth map with the median of their neighbourhood.
///
/// Every sample is compared against the median of the in-bounds
/// `(2 * half_window + 1)^2` window centred on it. Samples that differ from
/// that median by more than `threshold` are replaced by it. Medians are always
/// taken from the input, so the result does not depend on visiting order.
///
/// Even-sized windows at the borders use the upper median.
///
/// # Errors
///
/// Returns [`DepthcodeError::InvalidDimensions`] if `depth.len()` is not
/// `width * height`.
///
/// # Examples
///
/// ```
/// use depthcode_core::denoise_median;
/// let depth = [10, 10, 10, 10, 900, 10, 10, 10, 10];
/// let clean = denoise_median(&depth, 3, 3, 50, 1).unwrap();
/// assert_eq!(clean[4], 10);
/// ```
pub fn denoise_median(
    depth: &[u16],
    width: usize,
    height: usize,
    threshold: u16,
    half_window: usize,
) -> Result<Vec<u16>, DepthcodeError> {
    if width.checked_mul(height) != Some(depth.len()) {
        return Err(DepthcodeError::InvalidDimensions {
            width,
            height,
            reason: "depth map length does not match width * height",
        });
    }

    let mut out = depth.to_vec();
    if half_window == 0 {
        return Ok(out);
    }

    // The window never holds more than the image does.
    let side = half_window.saturating_mul(2).saturating_add(1);
    let mut window = Vec::with_capacity(side.min(height) * side.min(width));
    let reach = half_window.saturating_add(1);

    for y in 0..height {
        let rows = y.saturating_sub(half_window)..y.saturating_add(reach).min(height);
        for x in 0..width {
            let cols = x.saturating_sub(half_window)..x.saturating_add(reach).min(width);

            window.clear();
            for row in rows.clone() {
                window.extend_from_slice(&depth[row * width + cols.start..row * width + cols.end]);
            }
            let mid = window.len() / 2;
            let median = *window.select_nth_unstable(mid).1;

            let sample = depth[y * width + x];
            if sample.abs_diff(median) > threshold {
                out[y * width + x] = median;
            }
        }
    }

    Ok(out)
}
