//! Window-averaging filters: blur, enhance (unsharp mask) and pixelate.
//!
//! # Window
//!
//! [`blur`] and [`enhance`] look at a square window centred on each
//! destination pixel, spanning `size / 2` pixels on every side (so an even
//! `size` gives the same window as `size + 1`). Each channel, alpha
//! included, is averaged independently with floor division.
//!
//! Near the edges the window runs off the grid. [`Boundary`] decides what
//! happens there:
//!
//! - [`Boundary::Clip`] (default) drops the missing samples and averages only
//!   what is inside, so corner pixels average fewer samples.
//! - [`Boundary::Replicate`] repeats the nearest edge pixel for every missing
//!   sample, so every window has `(2 * (size / 2) + 1)^2` samples.
//!
//! Sums are computed separably (a horizontal pass then a vertical pass) in
//! 64-bit integers, which gives exactly the same floored mean as summing the
//! window directly.
//!
//! [`pixelate`] instead tiles the grid into non-overlapping blocks.
//!
//! # Example
//!
//! ```rust
//! use picfx_core::{PixelBuffer, Rgba};
//! use picfx_ops::neighborhood::blur;
//!
//! let buf = PixelBuffer::from_rows(vec![vec![
//!     Rgba::opaque(0, 0, 0),
//!     Rgba::opaque(90, 0, 0),
//!     Rgba::opaque(180, 0, 0),
//! ]])
//! .unwrap();
//! let out = blur(&buf, 3).unwrap();
//! assert_eq!(out.get(0, 0).unwrap().r, 45);
//! assert_eq!(out.get(0, 1).unwrap().r, 90);
//! ```

#[allow(unused_imports)]
use tracing::{debug, trace};

use picfx_core::{Error, PixelBuffer, Rgba};

use crate::rows::{for_each_band, for_each_row};
use crate::{OpsError, OpsResult};

/// How a window treats samples that fall outside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Boundary {
    /// Average only the in-grid part of the window.
    #[default]
    Clip,
    /// Pin out-of-grid indices to the nearest edge and count them.
    Replicate,
}

impl std::str::FromStr for Boundary {
    type Err = OpsError;

    fn from_str(s: &str) -> OpsResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "clip" => Ok(Boundary::Clip),
            "replicate" | "clamp" => Ok(Boundary::Replicate),
            other => Err(OpsError::invalid(format!("unknown boundary '{other}'"))),
        }
    }
}

/// Output of [`enhance_unclamped`]: signed channels that may fall outside
/// `[0, 255]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharpenedBuffer {
    height: u32,
    width: u32,
    data: Vec<[i32; 4]>,
}

impl SharpenedBuffer {
    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Raw `[r, g, b, a]` values, row-major.
    pub fn channels(&self) -> &[[i32; 4]] {
        &self.data
    }

    /// Raw `[r, g, b, a]` at `(row, col)`.
    pub fn get(&self, row: u32, col: u32) -> OpsResult<[i32; 4]> {
        if row >= self.height || col >= self.width {
            return Err(Error::out_of_bounds(row, col, self.height, self.width).into());
        }
        Ok(self.data[row as usize * self.width as usize + col as usize])
    }

    /// Number of channel values outside `[0, 255]`.
    pub fn out_of_range_count(&self) -> usize {
        self.data
            .iter()
            .flatten()
            .filter(|&&v| !(0..=255).contains(&v))
            .count()
    }

    /// Clamps every channel into `[0, 255]`.
    pub fn to_clamped(&self) -> OpsResult<PixelBuffer> {
        let pixels = self
            .data
            .iter()
            .map(|c| Rgba::from_array(c.map(|v| v.clamp(0, 255) as u8)))
            .collect();
        Ok(PixelBuffer::from_pixels(self.height, self.width, pixels)?)
    }
}

/// In-grid span of a 1-D window plus the samples that fell off each end.
#[derive(Debug, Clone, Copy)]
struct Span {
    lo: usize,
    hi: usize,
    before: usize,
    after: usize,
}

impl Span {
    fn new(center: usize, half: usize, len: usize) -> Self {
        let last = len - 1;
        Self {
            lo: center.saturating_sub(half),
            hi: (center + half).min(last),
            before: half.saturating_sub(center),
            after: (center + half).saturating_sub(last),
        }
    }

    /// Sum of `sample(i)` over the window and the number of samples taken.
    fn sum<S>(&self, boundary: Boundary, sample: S) -> ([u64; 4], u64)
    where
        S: Fn(usize) -> [u64; 4],
    {
        let mut acc = [0u64; 4];
        for i in self.lo..=self.hi {
            add(&mut acc, sample(i), 1);
        }
        let mut count = (self.hi - self.lo + 1) as u64;
        if boundary == Boundary::Replicate {
            add(&mut acc, sample(self.lo), self.before as u64);
            add(&mut acc, sample(self.hi), self.after as u64);
            count += (self.before + self.after) as u64;
        }
        (acc, count)
    }
}

#[inline]
fn add(acc: &mut [u64; 4], v: [u64; 4], times: u64) {
    for (a, x) in acc.iter_mut().zip(v) {
        *a += x * times;
    }
}

#[inline]
fn widen(px: Rgba) -> [u64; 4] {
    px.to_array().map(u64::from)
}

fn check_size(size: u32, filter: &str) -> OpsResult<()> {
    if size == 0 {
        return Err(OpsError::invalid(format!("{filter} size must be > 0")));
    }
    Ok(())
}

/// Floored per-channel window mean of every pixel.
fn window_means(src: &PixelBuffer, size: u32, boundary: Boundary) -> Vec<[u8; 4]> {
    let (h, w) = (src.height() as usize, src.width() as usize);
    let half = (size / 2) as usize;
    debug!(half, ?boundary, "window half-width");

    // Horizontal pass: per-pixel row sums and their sample counts.
    let mut row_sums = vec![([0u64; 4], 0u64); h * w];
    for_each_row(&mut row_sums, w, |row, out| {
        let px = src.row(row as u32);
        for (col, slot) in out.iter_mut().enumerate() {
            *slot = Span::new(col, half, w).sum(boundary, |c| widen(px[c]));
        }
    });

    // Vertical pass over the row sums.
    let mut means = vec![[0u8; 4]; h * w];
    for_each_row(&mut means, w, |row, out| {
        let span = Span::new(row, half, h);
        for (col, slot) in out.iter_mut().enumerate() {
            let (sum, rows) = span.sum(boundary, |r| row_sums[r * w + col].0);
            let count = rows * row_sums[row * w + col].1;
            *slot = sum.map(|s| (s / count) as u8);
        }
    });
    means
}

/// Box blur with [`Boundary::Clip`]. Returns a new buffer.
///
/// # Errors
///
/// Returns [`OpsError::InvalidParameter`] if `size` is 0.
pub fn blur(src: &PixelBuffer, size: u32) -> OpsResult<PixelBuffer> {
    blur_with(src, size, Boundary::Clip)
}

/// Box blur with an explicit boundary policy. Returns a new buffer.
pub fn blur_with(src: &PixelBuffer, size: u32, boundary: Boundary) -> OpsResult<PixelBuffer> {
    trace!(size, ?boundary, "blur");
    check_size(size, "blur")?;
    let pixels = window_means(src, size, boundary)
        .into_iter()
        .map(Rgba::from_array)
        .collect();
    Ok(PixelBuffer::from_pixels(src.height(), src.width(), pixels)?)
}

/// Unsharp mask without clamping: every channel becomes
/// `2 * original - window_mean`, which can leave `[0, 255]`.
pub fn enhance_unclamped_with(
    src: &PixelBuffer,
    size: u32,
    boundary: Boundary,
) -> OpsResult<SharpenedBuffer> {
    trace!(size, ?boundary, "enhance");
    check_size(size, "enhance")?;
    let data = window_means(src, size, boundary)
        .into_iter()
        .zip(src.pixels())
        .map(|(mean, px)| {
            let orig = px.to_array();
            std::array::from_fn(|i| 2 * i32::from(orig[i]) - i32::from(mean[i]))
        })
        .collect();
    Ok(SharpenedBuffer {
        height: src.height(),
        width: src.width(),
        data,
    })
}

/// [`enhance_unclamped_with`] using [`Boundary::Clip`].
pub fn enhance_unclamped(src: &PixelBuffer, size: u32) -> OpsResult<SharpenedBuffer> {
    enhance_unclamped_with(src, size, Boundary::Clip)
}

/// Unsharp mask clamped into `[0, 255]`. Returns a new buffer.
///
/// Clamping departs from the raw `2 * original - window_mean`, which can
/// leave the channel range; call [`enhance_unclamped`] to get those exact
/// values instead.
///
/// ```rust
/// use picfx_core::{PixelBuffer, Rgba};
/// use picfx_ops::neighborhood::enhance;
///
/// let buf = PixelBuffer::from_rows(vec![vec![Rgba::opaque(0, 0, 0), Rgba::opaque(200, 0, 0)]])
///     .unwrap();
/// let out = enhance(&buf, 3).unwrap();
/// // 2 * 200 - 100 = 300, clamped
/// assert_eq!(out.get(0, 1).unwrap().r, 255);
/// // 2 * 0 - 100 = -100, clamped
/// assert_eq!(out.get(0, 0).unwrap().r, 0);
/// ```
pub fn enhance(src: &PixelBuffer, size: u32) -> OpsResult<PixelBuffer> {
    let sharpened = enhance_unclamped(src, size)?;
    let clipped = sharpened.out_of_range_count();
    if clipped > 0 {
        debug!(clipped, "enhance clamped channel values");
    }
    sharpened.to_clamped()
}

/// Replaces each `size x size` block with its per-channel floored mean, in
/// place. Blocks start at row and column 0; the last block on each axis may
/// be smaller.
///
/// # Errors
///
/// Returns [`OpsError::InvalidParameter`] if `size` is 0.
pub fn pixelate(buf: &mut PixelBuffer, size: u32) -> OpsResult<()> {
    trace!(size, "pixelate");
    check_size(size, "pixelate")?;
    let w = buf.width() as usize;
    let size = size as usize;

    for_each_band(buf.pixels_mut(), w, size, |_, band| {
        let rows = band.len() / w;
        for c0 in (0..w).step_by(size) {
            let c1 = (c0 + size).min(w);
            let mut acc = [0u64; 4];
            for r in 0..rows {
                for px in &band[r * w + c0..r * w + c1] {
                    add(&mut acc, widen(*px), 1);
                }
            }
            let count = (rows * (c1 - c0)) as u64;
            let mean = Rgba::from_array(acc.map(|s| (s / count) as u8));
            for r in 0..rows {
                band[r * w + c0..r * w + c1].fill(mean);
            }
        }
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reds(buf: &PixelBuffer, row: u32) -> Vec<u8> {
        buf.row(row).iter().map(|px| px.r).collect()
    }

    fn row_of(values: &[u8]) -> PixelBuffer {
        let px = values.iter().map(|&v| Rgba::opaque(v, 0, 0)).collect();
        PixelBuffer::from_pixels(1, values.len() as u32, px).unwrap()
    }

    #[test]
    fn test_blur_size_one_is_identity() {
        let buf = row_of(&[3, 50, 7, 255]);
        assert_eq!(blur(&buf, 1).unwrap(), buf);
    }

    #[test]
    fn test_blur_clip_averages_in_grid_samples() {
        let buf = row_of(&[0, 30, 60, 90]);
        let out = blur(&buf, 3).unwrap();
        // edges: (0+30)/2, (60+90)/2
        assert_eq!(reds(&out, 0), vec![15, 30, 60, 75]);
    }

    #[test]
    fn test_blur_replicate_repeats_edges() {
        let buf = row_of(&[0, 30, 60, 90]);
        let out = blur_with(&buf, 3, Boundary::Replicate).unwrap();
        // 2D window of 3x3 on a single row repeats that row
        // left edge: (0+0+30)/3 = 10, right edge: (60+90+90)/3 = 80
        assert_eq!(reds(&out, 0), vec![10, 30, 60, 80]);
    }

    #[test]
    fn test_blur_2d_corner() {
        let buf = PixelBuffer::from_rows(vec![
            vec![Rgba::opaque(10, 0, 0), Rgba::opaque(20, 0, 0)],
            vec![Rgba::opaque(30, 0, 0), Rgba::opaque(41, 0, 0)],
        ])
        .unwrap();
        let out = blur(&buf, 3).unwrap();
        // every window covers all four: 101 / 4 = 25
        assert!(out.pixels().iter().all(|px| px.r == 25));
    }

    #[test]
    fn test_even_size_matches_next_odd() {
        let buf = row_of(&[9, 200, 14, 77, 3]);
        assert_eq!(blur(&buf, 4).unwrap(), blur(&buf, 5).unwrap());
    }

    #[test]
    fn test_blur_averages_alpha() {
        let buf = PixelBuffer::from_rows(vec![vec![Rgba::new(0, 0, 0, 0), Rgba::new(0, 0, 0, 255)]])
            .unwrap();
        let out = blur(&buf, 3).unwrap();
        assert_eq!(out.get(0, 0).unwrap().a, 127);
    }

    #[test]
    fn test_zero_size_rejected() {
        let mut buf = row_of(&[1, 2]);
        assert!(matches!(blur(&buf, 0), Err(OpsError::InvalidParameter(_))));
        assert!(matches!(enhance(&buf, 0), Err(OpsError::InvalidParameter(_))));
        assert!(matches!(pixelate(&mut buf, 0), Err(OpsError::InvalidParameter(_))));
    }

    #[test]
    fn test_enhance_unclamped_exposes_overflow() {
        let buf = row_of(&[0, 200]);
        let raw = enhance_unclamped(&buf, 3).unwrap();
        assert_eq!(raw.get(0, 0).unwrap()[0], -100);
        assert_eq!(raw.get(0, 1).unwrap()[0], 300);
        // alpha: 2 * 255 - 255
        assert_eq!(raw.get(0, 1).unwrap()[3], 255);
        assert_eq!(raw.out_of_range_count(), 2);
        assert!(raw.get(1, 0).is_err());
    }

    #[test]
    fn test_enhance_is_unclamped_then_clamped() {
        let buf = row_of(&[0, 200, 40]);
        let raw = enhance_unclamped(&buf, 3).unwrap();
        let out = enhance(&buf, 3).unwrap();
        assert_eq!(out, raw.to_clamped().unwrap());
        assert_eq!(reds(&out, 0), vec![0, 255, 0]);
    }

    #[test]
    fn test_enhance_flat_is_identity() {
        let buf = PixelBuffer::filled(3, 3, Rgba::new(10, 20, 30, 40)).unwrap();
        assert_eq!(enhance(&buf, 3).unwrap(), buf);
    }

    #[test]
    fn test_pixelate_blocks() {
        let mut buf = row_of(&[0, 10, 20, 30, 40]);
        pixelate(&mut buf, 2).unwrap();
        assert_eq!(reds(&buf, 0), vec![5, 5, 25, 25, 40]);
    }

    #[test]
    fn test_pixelate_2d_short_last_band() {
        let mut buf = PixelBuffer::from_rows(vec![
            vec![Rgba::opaque(0, 0, 0), Rgba::opaque(4, 0, 0)],
            vec![Rgba::opaque(8, 0, 0), Rgba::opaque(12, 0, 0)],
            vec![Rgba::opaque(100, 0, 0), Rgba::opaque(50, 0, 0)],
        ])
        .unwrap();
        pixelate(&mut buf, 2).unwrap();
        assert_eq!(reds(&buf, 0), vec![6, 6]);
        assert_eq!(reds(&buf, 1), vec![6, 6]);
        assert_eq!(reds(&buf, 2), vec![75, 75]);
    }

    #[test]
    fn test_boundary_from_str() {
        assert_eq!("clip".parse::<Boundary>().unwrap(), Boundary::Clip);
        assert_eq!("Replicate".parse::<Boundary>().unwrap(), Boundary::Replicate);
        assert!("wrap".parse::<Boundary>().is_err());
    }
}
