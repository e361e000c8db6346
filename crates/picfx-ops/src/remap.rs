//! Geometric column remaps.
//!
//! Every remap keeps the row of a pixel and moves it to a new column
//! within that row. Destination columns outside `[0, width)` wrap around:
//! a pixel pushed off the right edge reappears on the left and vice versa.
//! Nothing is interpolated; each source pixel lands on exactly one
//! destination pixel.
//!
//! # Filters
//!
//! | filter              | per-row shift                                   |
//! |---------------------|-------------------------------------------------|
//! | [`swap_left_right`] | `width / 2`                                     |
//! | [`stair_step`]      | grows by `shift_count` every `height / steps` rows |
//! | [`liquify`]         | Gaussian bell centred on the middle row         |
//! | [`wavy`]            | `amplitude * sin(2π row / 100)`                 |
//!
//! All of them go through [`remap_columns`], which returns a new buffer and
//! leaves the source untouched.
//!
//! [`mirror_region`] is the in-place exception: it reflects a rectangle of
//! columns about a vertical axis without wrapping.
//!
//! # Example
//!
//! ```rust
//! use picfx_core::{PixelBuffer, Rgba};
//! use picfx_ops::remap::swap_left_right;
//!
//! let row: Vec<Rgba> = (0..4).map(|i| Rgba::opaque(i, 0, 0)).collect();
//! let buf = PixelBuffer::from_rows(vec![row]).unwrap();
//! let swapped = swap_left_right(&buf);
//! let reds: Vec<u8> = swapped.row(0).iter().map(|px| px.r).collect();
//! assert_eq!(reds, vec![2, 3, 0, 1]);
//! ```

use std::f64::consts::PI;
use std::ops::Range;

#[allow(unused_imports)]
use tracing::{debug, trace};

use picfx_core::{Error, PixelBuffer};

use crate::rows::for_each_row;
use crate::{OpsError, OpsResult};

/// Standard deviation of the [`liquify`] bell, in rows.
pub const BELL_WIDTH: f64 = 50.0;

/// Period of the [`wavy`] sine, in rows.
pub const WAVE_PERIOD: f64 = 100.0;

/// Moves every source pixel to `(row, dest_col(row, col))`.
///
/// The output starts as a copy of `src`. Source pixels are visited in
/// row-major order and the computed column is wrapped into `[0, width)` with
/// Euclidean remainder, so negative columns count back from the right edge.
/// If two source pixels of a row map to the same column the later one wins;
/// any column no source pixel maps to keeps its original color.
///
/// ```rust
/// use picfx_core::{PixelBuffer, Rgba};
/// use picfx_ops::remap::remap_columns;
///
/// let row: Vec<Rgba> = (0..3).map(|i| Rgba::opaque(i, 0, 0)).collect();
/// let buf = PixelBuffer::from_rows(vec![row]).unwrap();
/// let shifted = remap_columns(&buf, |_, col| col as i64 - 1);
/// let reds: Vec<u8> = shifted.row(0).iter().map(|px| px.r).collect();
/// assert_eq!(reds, vec![1, 2, 0]);
/// ```
pub fn remap_columns<F>(src: &PixelBuffer, dest_col: F) -> PixelBuffer
where
    F: Fn(u32, u32) -> i64 + Sync + Send,
{
    let width = src.width() as usize;
    let w = i64::from(src.width());
    let mut out = src.clone();
    for_each_row(out.pixels_mut(), width, |row, dst| {
        let src_row = src.row(row as u32);
        for (col, &px) in src_row.iter().enumerate() {
            let c = dest_col(row as u32, col as u32).rem_euclid(w) as usize;
            dst[c] = px;
        }
    });
    out
}

/// Shifts each row right by `shifts[row]` columns with wraparound.
fn shift_rows(src: &PixelBuffer, shifts: &[i64]) -> PixelBuffer {
    remap_columns(src, |row, col| i64::from(col) + shifts[row as usize])
}

/// Trades the left and right halves of every row.
///
/// Column `col` moves to `(col + width / 2) mod width`. Applying this twice
/// restores the input when the width is even.
pub fn swap_left_right(src: &PixelBuffer) -> PixelBuffer {
    let half = i64::from(src.width() / 2);
    trace!(width = src.width(), half, "swap_left_right");
    remap_columns(src, |_, col| i64::from(col) + half)
}

/// Shifts rows right in stair-step increments.
///
/// With `step_size = height / steps`, row 0 is unshifted and the shift grows
/// by `shift_count` after every row `r` with `r % step_size == 0`. Row `r`
/// is therefore shifted by `shift_count * ceil(r / step_size)`.
///
/// # Errors
///
/// Returns [`OpsError::InvalidParameter`] if `steps` is 0 or greater than
/// the height (the step size would be 0).
pub fn stair_step(src: &PixelBuffer, shift_count: i32, steps: u32) -> OpsResult<PixelBuffer> {
    let height = src.height();
    trace!(shift_count, steps, height, "stair_step");
    if steps == 0 || steps > height {
        return Err(OpsError::invalid(format!(
            "steps must be in 1..={height}, got {steps}"
        )));
    }
    let step_size = height / steps;
    debug!(step_size, "stair_step step size");

    let w = i64::from(src.width());
    let mut shift = 0i64;
    let mut shifts = Vec::with_capacity(height as usize);
    for row in 0..height {
        shifts.push(shift);
        if row % step_size == 0 {
            shift = (shift + i64::from(shift_count)).rem_euclid(w);
        }
    }
    Ok(shift_rows(src, &shifts))
}

/// Shift applied to `row` by [`liquify`].
pub fn liquify_shift(row: u32, height: u32, max_height: i32) -> i64 {
    let d = f64::from(row) - f64::from(height) / 2.0;
    let exponent = d * d / (2.0 * BELL_WIDTH * BELL_WIDTH);
    (f64::from(max_height) * (-exponent).exp()).floor() as i64
}

/// Shifts rows right along a Gaussian bell peaking at the middle row.
///
/// Row `r` moves by `floor(max_height * e^(-(r - height/2)^2 / (2 * 50^2)))`
/// columns, with `height / 2` computed in floating point.
pub fn liquify(src: &PixelBuffer, max_height: i32) -> PixelBuffer {
    let height = src.height();
    trace!(max_height, height, "liquify");
    let shifts: Vec<i64> = (0..height)
        .map(|row| liquify_shift(row, height, max_height))
        .collect();
    shift_rows(src, &shifts)
}

/// Shift applied to `row` by [`wavy`].
pub fn wavy_shift(row: u32, amplitude: i32) -> i64 {
    let phase = 2.0 * PI * f64::from(row) / WAVE_PERIOD;
    (f64::from(amplitude) * phase.sin()).floor() as i64
}

/// Shifts rows along a sine wave with a period of 100 rows.
///
/// Negative shifts move pixels left and wrap onto the right edge.
pub fn wavy(src: &PixelBuffer, amplitude: i32) -> PixelBuffer {
    trace!(amplitude, "wavy");
    let shifts: Vec<i64> = (0..src.height()).map(|row| wavy_shift(row, amplitude)).collect();
    shift_rows(src, &shifts)
}

/// A band of rows whose columns are reflected about a vertical axis.
///
/// Source columns `cols` are copied to `axis2 - col`, where `axis2` is twice
/// the axis position. Keeping the doubled axis lets the axis fall between two
/// columns, which is what a full-width mirror of an even-width buffer needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorRegion {
    rows: Range<u32>,
    cols: Range<u32>,
    axis2: u32,
}

impl MirrorRegion {
    /// Reflects columns `[col_start, mirror_point)` of `rows` onto
    /// `(mirror_point, 2 * mirror_point - col_start]`. Column `mirror_point`
    /// itself is left alone.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::InvalidParameter`] if `col_start > mirror_point`
    /// or the row range is reversed.
    pub fn new(rows: Range<u32>, col_start: u32, mirror_point: u32) -> OpsResult<Self> {
        if col_start > mirror_point {
            return Err(OpsError::invalid(format!(
                "mirror start column {col_start} is past the mirror point {mirror_point}"
            )));
        }
        if rows.start > rows.end {
            return Err(OpsError::invalid(format!(
                "row range {}..{} is reversed",
                rows.start, rows.end
            )));
        }
        let axis2 = mirror_point
            .checked_mul(2)
            .ok_or_else(|| OpsError::invalid("mirror point too large"))?;
        Ok(Self {
            rows,
            cols: col_start..mirror_point,
            axis2,
        })
    }

    /// The whole-buffer mirror: left half of every row onto the right half.
    pub fn full_width(height: u32, width: u32) -> Self {
        Self {
            rows: 0..height,
            cols: 0..width / 2,
            axis2: width.saturating_sub(1),
        }
    }

    /// Rows affected.
    pub fn rows(&self) -> Range<u32> {
        self.rows.clone()
    }

    /// Source columns.
    pub fn source_cols(&self) -> Range<u32> {
        self.cols.clone()
    }

    /// Destination column of a source column.
    #[inline]
    pub fn reflect(&self, col: u32) -> u32 {
        self.axis2 - col
    }

    fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.cols.is_empty()
    }

    /// Checks every read and write lands inside a `height x width` grid.
    fn check(&self, height: u32, width: u32) -> Result<(), Error> {
        if self.is_empty() {
            return Ok(());
        }
        let last_row = self.rows.end - 1;
        if last_row >= height {
            return Err(Error::out_of_bounds(last_row, self.cols.start, height, width));
        }
        let far_col = self.reflect(self.cols.start);
        if far_col >= width {
            return Err(Error::out_of_bounds(self.rows.start, far_col, height, width));
        }
        Ok(())
    }
}

/// Reflects a region in place without bounds checks. Source and destination
/// columns lie on opposite sides of the axis, so no read sees a write.
pub(crate) fn reflect_columns(buf: &mut PixelBuffer, region: &MirrorRegion) {
    if region.is_empty() {
        return;
    }
    let width = buf.width() as usize;
    for_each_row(buf.pixels_mut(), width, |row, px| {
        if !region.rows.contains(&(row as u32)) {
            return;
        }
        for col in region.cols.clone() {
            px[region.reflect(col) as usize] = px[col as usize];
        }
    });
}

/// Reflects `region` in place.
///
/// The buffer is checked before anything is written, so an out-of-range
/// region leaves it unchanged.
///
/// # Errors
///
/// Returns [`OpsError::Core`] wrapping [`Error::OutOfBounds`] if the region
/// reads or writes outside the buffer.
///
/// ```rust
/// use picfx_core::{PixelBuffer, Rgba};
/// use picfx_ops::remap::{mirror_region, MirrorRegion};
///
/// let row: Vec<Rgba> = (0..6).map(|i| Rgba::opaque(i, 0, 0)).collect();
/// let mut buf = PixelBuffer::from_rows(vec![row]).unwrap();
/// mirror_region(&mut buf, &MirrorRegion::new(0..1, 1, 3).unwrap()).unwrap();
/// let reds: Vec<u8> = buf.row(0).iter().map(|px| px.r).collect();
/// assert_eq!(reds, vec![0, 1, 2, 3, 2, 1]);
/// ```
pub fn mirror_region(buf: &mut PixelBuffer, region: &MirrorRegion) -> OpsResult<()> {
    trace!(?region, "mirror_region");
    region.check(buf.height(), buf.width())?;
    reflect_columns(buf, region);
    Ok(())
}
