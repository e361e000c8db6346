//! The pixel grid every filter reads from and writes to.
//!
//! # Memory Layout
//!
//! Pixels are stored in **row-major** order, top-to-bottom, one [`Rgba`]
//! per entry:
//!
//! ```text
//! [px(0,0) px(0,1) ... px(0,W-1)]  ← Row 0
//! [px(1,0) px(1,1) ... px(1,W-1)]  ← Row 1
//! ...
//! ```
//!
//! Addressing is always `(row, col)`: row first, column second. A buffer is
//! never jagged and never empty; both are rejected at construction.
//!
//! # Ownership
//!
//! [`PixelBuffer`] owns its pixels outright. `clone()` is a deep copy, so a
//! filter that writes into a clone can never disturb its source.
//!
//! # Usage
//!
//! ```rust
//! use picfx_core::{PixelBuffer, Rgba};
//!
//! let mut buf = PixelBuffer::new(2, 3).unwrap();
//! assert_eq!(buf.get(1, 2).unwrap(), Rgba::DEFAULT);
//!
//! buf.set(1, 2, Rgba::WHITE).unwrap();
//! assert_eq!(buf.get(1, 2).unwrap(), Rgba::WHITE);
//!
//! // Out of range is an error, not a clamp.
//! assert!(buf.get(2, 0).is_err());
//! ```

use std::fmt;

use crate::{Error, Rect, Result, Rgba};

/// A dense `height x width` grid of [`Rgba`] pixels.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelBuffer {
    height: u32,
    width: u32,
    pixels: Vec<Rgba>,
}

impl PixelBuffer {
    /// Creates a buffer with every pixel set to [`Rgba::DEFAULT`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if either dimension is zero.
    pub fn new(height: u32, width: u32) -> Result<Self> {
        Self::filled(height, width, Rgba::DEFAULT)
    }

    /// Creates a buffer with every pixel set to `color`.
    pub fn filled(height: u32, width: u32, color: Rgba) -> Result<Self> {
        check_dimensions(height, width)?;
        Ok(Self {
            height,
            width,
            pixels: vec![color; height as usize * width as usize],
        })
    }

    /// Creates a buffer from row-major pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if a dimension is zero or
    /// `pixels.len() != height * width`.
    pub fn from_pixels(height: u32, width: u32, pixels: Vec<Rgba>) -> Result<Self> {
        check_dimensions(height, width)?;
        let expected = height as usize * width as usize;
        if pixels.len() != expected {
            return Err(Error::invalid_dimensions(
                height,
                width,
                format!("expected {} pixels, got {}", expected, pixels.len()),
            ));
        }
        Ok(Self {
            height,
            width,
            pixels,
        })
    }

    /// Creates a buffer from a list of rows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if there are no rows, the rows
    /// are empty, or any row differs in length from the first.
    ///
    /// ```rust
    /// use picfx_core::{PixelBuffer, Rgba};
    ///
    /// let jagged = vec![vec![Rgba::BLACK; 2], vec![Rgba::BLACK; 3]];
    /// assert!(PixelBuffer::from_rows(jagged).is_err());
    /// ```
    pub fn from_rows(rows: Vec<Vec<Rgba>>) -> Result<Self> {
        let height = to_dim(rows.len())?;
        let width = to_dim(rows.first().map_or(0, Vec::len))?;
        check_dimensions(height, width)?;

        let mut pixels = Vec::with_capacity(height as usize * width as usize);
        for (r, row) in rows.into_iter().enumerate() {
            if row.len() != width as usize {
                return Err(Error::invalid_dimensions(
                    height,
                    width,
                    format!("row {} has {} pixels", r, row.len()),
                ));
            }
            pixels.extend(row);
        }
        Ok(Self {
            height,
            width,
            pixels,
        })
    }

    /// Creates a buffer from interleaved RGBA8 bytes.
    pub fn from_rgba8(height: u32, width: u32, data: &[u8]) -> Result<Self> {
        check_dimensions(height, width)?;
        let expected = height as usize * width as usize * 4;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                height,
                width,
                format!("expected {} bytes, got {}", expected, data.len()),
            ));
        }
        let pixels = data
            .chunks_exact(4)
            .map(|c| Rgba::new(c[0], c[1], c[2], c[3]))
            .collect();
        Ok(Self {
            height,
            width,
            pixels,
        })
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// `(height, width)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.height, self.width)
    }

    /// The whole grid as a [`Rect`].
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// Returns `true` if `(row, col)` addresses a pixel.
    #[inline]
    pub fn in_bounds(&self, row: u32, col: u32) -> bool {
        row < self.height && col < self.width
    }

    /// Reads the pixel at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] outside the grid.
    #[inline]
    pub fn get(&self, row: u32, col: u32) -> Result<Rgba> {
        let idx = self.index(row, col)?;
        Ok(self.pixels[idx])
    }

    /// Writes the pixel at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] outside the grid.
    #[inline]
    pub fn set(&mut self, row: u32, col: u32, color: Rgba) -> Result<()> {
        let idx = self.index(row, col)?;
        self.pixels[idx] = color;
        Ok(())
    }

    /// All pixels, row-major.
    #[inline]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// All pixels, row-major, mutable.
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Rgba] {
        &mut self.pixels
    }

    /// One row of pixels.
    ///
    /// # Panics
    ///
    /// Panics if `row >= height`.
    #[inline]
    pub fn row(&self, row: u32) -> &[Rgba] {
        let w = self.width as usize;
        let start = row as usize * w;
        &self.pixels[start..start + w]
    }

    /// One row of pixels, mutable.
    ///
    /// # Panics
    ///
    /// Panics if `row >= height`.
    #[inline]
    pub fn row_mut(&mut self, row: u32) -> &mut [Rgba] {
        let w = self.width as usize;
        let start = row as usize * w;
        &mut self.pixels[start..start + w]
    }

    /// Interleaved RGBA8 bytes, row-major.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|px| px.to_array()).collect()
    }

    #[inline]
    fn index(&self, row: u32, col: u32) -> Result<usize> {
        if !self.in_bounds(row, col) {
            return Err(Error::out_of_bounds(row, col, self.height, self.width));
        }
        Ok(row as usize * self.width as usize + col as usize)
    }
}

fn check_dimensions(height: u32, width: u32) -> Result<()> {
    if height == 0 || width == 0 {
        return Err(Error::invalid_dimensions(
            height,
            width,
            "height and width must be > 0",
        ));
    }
    Ok(())
}

fn to_dim(n: usize) -> Result<u32> {
    u32::try_from(n)
        .map_err(|_| Error::invalid_dimensions(u32::MAX, u32::MAX, "dimension exceeds u32"))
}

impl fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("height", &self.height)
            .field("width", &self.width)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for PixelBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PixelBuffer {}x{}", self.height, self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(h: u32, w: u32) -> PixelBuffer {
        let pixels = (0..h * w).map(|i| Rgba::opaque(i as u8, 0, 0)).collect();
        PixelBuffer::from_pixels(h, w, pixels).unwrap()
    }

    #[test]
    fn test_new_default_color() {
        let buf = PixelBuffer::new(3, 4).unwrap();
        assert_eq!(buf.dimensions(), (3, 4));
        assert!(buf.pixels().iter().all(|&px| px == Rgba::new(0, 0, 0, 255)));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            PixelBuffer::new(0, 4),
            Err(Error::InvalidDimensions { .. })
        ));
        assert!(PixelBuffer::new(4, 0).is_err());
        assert!(PixelBuffer::from_rows(Vec::new()).is_err());
    }

    #[test]
    fn test_out_of_bounds_is_error() {
        let mut buf = PixelBuffer::new(2, 3).unwrap();
        assert!(buf.get(0, 3).unwrap_err().is_bounds_error());
        assert!(buf.set(2, 0, Rgba::WHITE).is_err());
        assert_eq!(buf.get(1, 2).unwrap(), Rgba::DEFAULT);
    }

    #[test]
    fn test_row_major_layout() {
        let buf = gradient(2, 3);
        assert_eq!(buf.get(1, 0).unwrap().r, 3);
        assert_eq!(buf.row(1)[2].r, 5);
    }

    #[test]
    fn test_clone_is_deep() {
        let a = gradient(2, 2);
        let mut b = a.clone();
        b.set(0, 0, Rgba::WHITE).unwrap();
        assert_ne!(a.get(0, 0).unwrap(), Rgba::WHITE);
    }

    #[test]
    fn test_from_rows_jagged() {
        let rows = vec![vec![Rgba::WHITE; 3], vec![Rgba::WHITE; 2]];
        let err = PixelBuffer::from_rows(rows).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn test_rgba8_roundtrip() {
        let buf = gradient(3, 2);
        let bytes = buf.to_rgba8();
        assert_eq!(bytes.len(), 24);
        assert_eq!(PixelBuffer::from_rgba8(3, 2, &bytes).unwrap(), buf);
        assert!(PixelBuffer::from_rgba8(3, 2, &bytes[1..]).is_err());
    }

    #[test]
    fn test_display_height_first() {
        let buf = PixelBuffer::new(480, 640).unwrap();
        assert_eq!(buf.to_string(), "PixelBuffer 480x640");
    }
}
