//! Copying one buffer into another at an offset.
//!
//! Both functions copy only the part of the source that overlaps the
//! destination and never resize or reject on size mismatch. They return the
//! destination rectangle actually written, or `None` if nothing overlapped.
//!
//! # Example
//!
//! ```rust
//! use picfx_core::{PixelBuffer, Rect, Rgba};
//! use picfx_ops::composite::copy_into;
//!
//! let mut canvas = PixelBuffer::new(4, 4).unwrap();
//! let stamp = PixelBuffer::filled(3, 3, Rgba::WHITE).unwrap();
//! let written = copy_into(&mut canvas, &stamp, 2, 2);
//! assert_eq!(written, Some(Rect::new(2, 2, 2, 2)));
//! assert_eq!(canvas.get(3, 3).unwrap(), Rgba::WHITE);
//! assert_eq!(canvas.get(1, 1).unwrap(), Rgba::BLACK);
//! ```

#[allow(unused_imports)]
use tracing::{debug, trace};

use picfx_core::{PixelBuffer, Rect};

/// Copies all of `src` into `dest` with its top-left at `(start_row, start_col)`.
pub fn copy_into(
    dest: &mut PixelBuffer,
    src: &PixelBuffer,
    start_row: u32,
    start_col: u32,
) -> Option<Rect> {
    copy_region_into(dest, src, src.bounds(), start_row, start_col)
}

/// Copies `src_region` of `src` into `dest` with its top-left at
/// `(start_row, start_col)`.
///
/// The region is first clipped to `src`, then to what fits in `dest`.
pub fn copy_region_into(
    dest: &mut PixelBuffer,
    src: &PixelBuffer,
    src_region: Rect,
    start_row: u32,
    start_col: u32,
) -> Option<Rect> {
    trace!(%src_region, start_row, start_col, "copy_region_into");
    let region = src_region.intersect(&src.bounds())?;

    // Where the clipped region would land, then clip that to the destination.
    let target = Rect::new(
        start_col.checked_add(region.x - src_region.x)?,
        start_row.checked_add(region.y - src_region.y)?,
        region.width,
        region.height,
    );
    let written = target.intersect(&dest.bounds())?;

    let (dx, dy) = (written.x - target.x, written.y - target.y);
    let cols = written.width as usize;
    for r in 0..written.height {
        let src_row = src.row(region.y + dy + r);
        let sx = (region.x + dx) as usize;
        let dst_row = dest.row_mut(written.y + r);
        let tx = written.x as usize;
        dst_row[tx..tx + cols].copy_from_slice(&src_row[sx..sx + cols]);
    }
    debug!(%written, "copied region");
    Some(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use picfx_core::Rgba;

    fn numbered(h: u32, w: u32) -> PixelBuffer {
        let px = (0..h * w).map(|i| Rgba::opaque(i as u8 + 1, 0, 0)).collect();
        PixelBuffer::from_pixels(h, w, px).unwrap()
    }

    #[test]
    fn test_copy_full_fit() {
        let mut dest = PixelBuffer::new(4, 5).unwrap();
        let src = numbered(2, 2);
        assert_eq!(copy_into(&mut dest, &src, 1, 2), Some(Rect::new(2, 1, 2, 2)));
        assert_eq!(dest.get(1, 2).unwrap().r, 1);
        assert_eq!(dest.get(2, 3).unwrap().r, 4);
        assert_eq!(dest.get(0, 0).unwrap(), Rgba::BLACK);
        assert_eq!(dest.dimensions(), (4, 5));
    }

    #[test]
    fn test_copy_larger_source_is_clipped() {
        let mut dest = PixelBuffer::new(2, 2).unwrap();
        let src = numbered(5, 5);
        assert_eq!(copy_into(&mut dest, &src, 0, 0), Some(Rect::new(0, 0, 2, 2)));
        assert_eq!(dest.get(1, 1).unwrap().r, 7);
    }

    #[test]
    fn test_copy_off_canvas_writes_nothing() {
        let mut dest = PixelBuffer::new(2, 2).unwrap();
        let before = dest.clone();
        assert_eq!(copy_into(&mut dest, &numbered(1, 1), 2, 0), None);
        assert_eq!(copy_into(&mut dest, &numbered(1, 1), u32::MAX, u32::MAX), None);
        assert_eq!(dest, before);
    }

    #[test]
    fn test_copy_region() {
        let mut dest = PixelBuffer::new(3, 3).unwrap();
        let src = numbered(3, 3);
        // bottom-right 2x2 of src: values 5 6 / 8 9
        let written = copy_region_into(&mut dest, &src, Rect::new(1, 1, 2, 2), 0, 0);
        assert_eq!(written, Some(Rect::new(0, 0, 2, 2)));
        assert_eq!(dest.get(0, 0).unwrap().r, 5);
        assert_eq!(dest.get(1, 1).unwrap().r, 9);
    }

    #[test]
    fn test_copy_region_clipped_to_source() {
        let mut dest = PixelBuffer::new(4, 4).unwrap();
        let src = numbered(2, 2);
        // region hangs off the source by one row and column
        let written = copy_region_into(&mut dest, &src, Rect::new(1, 1, 2, 2), 0, 0);
        assert_eq!(written, Some(Rect::new(0, 0, 1, 1)));
        assert_eq!(dest.get(0, 0).unwrap().r, 4);
    }

    #[test]
    fn test_copy_carries_source_alpha() {
        let mut dest = PixelBuffer::filled(2, 2, Rgba::new(9, 9, 9, 255)).unwrap();
        let src = PixelBuffer::filled(1, 1, Rgba::new(1, 2, 3, 7)).unwrap();
        copy_into(&mut dest, &src, 1, 1);
        assert_eq!(dest.get(1, 1).unwrap(), Rgba::new(1, 2, 3, 7));
        assert_eq!(dest.get(0, 0).unwrap().a, 255);
    }
}
