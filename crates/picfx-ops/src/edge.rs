//! Horizontal edge detection.

#[allow(unused_imports)]
use tracing::{debug, trace};

use picfx_core::{PixelBuffer, Rgba};

use crate::rows::for_each_row;

/// Binarizes the buffer by comparing each pixel with its right neighbour.
///
/// For every column but the last, if the red/green/blue distance to the
/// next pixel is strictly greater than `threshold` the pixel becomes black,
/// otherwise white. Alpha is kept. The last column of every row keeps its
/// original color.
///
/// Each comparison reads the original right neighbour, never a value written
/// earlier in the same pass.
///
/// ```rust
/// use picfx_core::{PixelBuffer, Rgba};
/// use picfx_ops::edge::edge_detection;
///
/// let row = vec![Rgba::BLACK, Rgba::BLACK, Rgba::WHITE];
/// let mut buf = PixelBuffer::from_rows(vec![row]).unwrap();
/// edge_detection(&mut buf, 10.0);
/// assert_eq!(buf.row(0), &[Rgba::WHITE, Rgba::BLACK, Rgba::WHITE]);
/// ```
pub fn edge_detection(buf: &mut PixelBuffer, threshold: f64) {
    trace!(threshold, "edge_detection");
    let width = buf.width() as usize;
    for_each_row(buf.pixels_mut(), width, |_, row| {
        for col in 0..width.saturating_sub(1) {
            let right = row[col + 1];
            let left = row[col];
            let ink = if left.distance(&right) > threshold {
                Rgba::BLACK
            } else {
                Rgba::WHITE
            };
            row[col] = left.with_rgb_of(ink);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_strict() {
        // distance exactly 5
        let row = vec![Rgba::opaque(3, 4, 0), Rgba::opaque(0, 0, 0)];
        let mut buf = PixelBuffer::from_rows(vec![row]).unwrap();
        edge_detection(&mut buf, 5.0);
        assert_eq!(buf.get(0, 0).unwrap(), Rgba::WHITE);

        let row = vec![Rgba::opaque(3, 4, 0), Rgba::opaque(0, 0, 0)];
        let mut buf = PixelBuffer::from_rows(vec![row]).unwrap();
        edge_detection(&mut buf, 4.9);
        assert_eq!(buf.get(0, 0).unwrap(), Rgba::BLACK);
    }

    #[test]
    fn test_keeps_alpha_and_last_column() {
        let last = Rgba::new(1, 2, 3, 4);
        let mut buf = PixelBuffer::from_rows(vec![
            vec![Rgba::new(0, 0, 0, 7), last],
            vec![Rgba::new(200, 0, 0, 9), last],
        ])
        .unwrap();
        edge_detection(&mut buf, 10.0);
        assert_eq!(buf.get(0, 0).unwrap(), Rgba::new(255, 255, 255, 7));
        assert_eq!(buf.get(1, 0).unwrap(), Rgba::new(0, 0, 0, 9));
        assert_eq!(buf.get(0, 1).unwrap(), last);
        assert_eq!(buf.get(1, 1).unwrap(), last);
    }

    #[test]
    fn test_single_column_untouched() {
        let mut buf = PixelBuffer::filled(3, 1, Rgba::opaque(5, 6, 7)).unwrap();
        let before = buf.clone();
        edge_detection(&mut buf, 0.0);
        assert_eq!(buf, before);
    }
}
