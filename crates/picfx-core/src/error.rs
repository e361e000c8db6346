//! Error types for picfx-core operations.
//!
//! [`Error`] covers the failure modes of the pixel grid itself: pixel access
//! outside the grid, construction with zero or inconsistent dimensions, and
//! unparseable channel names. Filter parameter validation lives one level up
//! in `picfx-ops`.
//!
//! ```rust
//! use picfx_core::{Error, Result};
//!
//! fn check(row: u32, col: u32, height: u32, width: u32) -> Result<()> {
//!     if row >= height || col >= width {
//!         return Err(Error::out_of_bounds(row, col, height, width));
//!     }
//!     Ok(())
//! }
//! assert!(check(3, 0, 2, 2).is_err());
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by [`crate::PixelBuffer`] and [`crate::Channel`] parsing.
#[derive(Debug, Error)]
pub enum Error {
    /// Pixel coordinates are outside the grid.
    ///
    /// The buffer never clamps; clamping or wrapping is decided by each
    /// filter at its own call site.
    #[error("pixel (row {row}, col {col}) out of bounds for {height}x{width} buffer")]
    OutOfBounds {
        /// Row that was accessed
        row: u32,
        /// Column that was accessed
        col: u32,
        /// Buffer height
        height: u32,
        /// Buffer width
        width: u32,
    },

    /// Zero height or width, pixel data that does not cover the grid
    /// exactly, or jagged rows.
    #[error("invalid dimensions: {height}x{width} ({reason})")]
    InvalidDimensions {
        /// Requested height
        height: u32,
        /// Requested width
        width: u32,
        /// Why the dimensions were rejected
        reason: String,
    },

    /// A channel name that is not one of red, green, blue or alpha.
    #[error("unknown channel: '{0}'")]
    UnknownChannel(String),
}

impl Error {
    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(row: u32, col: u32, height: u32, width: u32) -> Self {
        Self::OutOfBounds {
            row,
            col,
            height,
            width,
        }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(height: u32, width: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            height,
            width,
            reason: reason.into(),
        }
    }

    /// Returns `true` for [`Error::OutOfBounds`].
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }
}
