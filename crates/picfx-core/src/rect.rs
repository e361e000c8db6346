//! Rectangular regions of a pixel grid.
//!
//! `x` is the column and `y` the row, both counted from the top-left pixel,
//! matching the `(row, col)` addressing of [`crate::PixelBuffer`] with the
//! axes named the other way round. The compositor clips with [`Rect`] and
//! reports what it wrote as one.

use std::fmt;

/// Columns `x..x + width` of rows `y..y + height`.
///
/// ```rust
/// use picfx_core::Rect;
///
/// let stamp = Rect::new(3, 1, 4, 2);
/// let canvas = Rect::from_size(5, 5);
/// assert_eq!(stamp.intersect(&canvas), Some(Rect::new(3, 1, 2, 2)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// First column
    pub x: u32,
    /// First row
    pub y: u32,
    /// Column count
    pub width: u32,
    /// Row count
    pub height: u32,
}

impl Rect {
    /// Rectangle with its top-left at column `x`, row `y`.
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// `width x height` anchored at the origin.
    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Exclusive right edge, saturating at `u32::MAX`.
    #[inline]
    pub const fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge, saturating at `u32::MAX`.
    #[inline]
    pub const fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Pixel count.
    #[inline]
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// No rows or no columns.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Common part of two rectangles; `None` when they share no pixel.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let (x, y) = (self.x.max(other.x), self.y.max(other.y));
        let overlap = Rect::new(
            x,
            y,
            self.right().min(other.right()).saturating_sub(x),
            self.bottom().min(other.bottom()).saturating_sub(y),
        );
        (!overlap.is_empty()).then_some(overlap)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} at (row {}, col {})",
            self.width, self.height, self.y, self.x
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_saturate() {
        let r = Rect::new(u32::MAX - 1, 4, 8, 3);
        assert_eq!(r.right(), u32::MAX);
        assert_eq!(r.bottom(), 7);
        assert_eq!(r.area(), 24);
    }

    #[test]
    fn test_partial_overlap() {
        let canvas = Rect::from_size(6, 4);
        let stamp = Rect::new(4, 2, 5, 5);
        assert_eq!(stamp.intersect(&canvas), Some(Rect::new(4, 2, 2, 2)));
        assert_eq!(canvas.intersect(&stamp), stamp.intersect(&canvas));
    }

    #[test]
    fn test_disjoint_and_adjacent() {
        let left = Rect::from_size(3, 3);
        assert_eq!(left.intersect(&Rect::new(3, 0, 3, 3)), None);
        assert_eq!(left.intersect(&Rect::new(0, 9, 1, 1)), None);
        assert_eq!(left.intersect(&Rect::new(1, 1, 0, 5)), None);
    }

    #[test]
    fn test_empty_and_display() {
        assert!(Rect::new(2, 2, 4, 0).is_empty());
        assert!(!Rect::from_size(1, 1).is_empty());
        assert_eq!(Rect::new(5, 7, 3, 2).to_string(), "3x2 at (row 7, col 5)");
    }
}
