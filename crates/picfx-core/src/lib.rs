//! # picfx-core
//!
//! Core types for picfx raster filters.
//!
//! - [`Rgba`], [`Channel`] - 8-bit colors and the channels that make them up
//! - [`PixelBuffer`] - a dense row-major grid addressed by `(row, col)`
//! - [`Rect`] - rectangular regions of a grid
//! - [`Error`] - bounds and dimension failures
//!
//! ## Crate Structure
//!
//! ```text
//! picfx-core (this crate)
//!    ^
//!    |
//!    +-- picfx-ops (filters)
//!    +-- picfx-io (PNG/JPEG load and save)
//!    +-- picfx-cli (driver binary)
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` - Serialize/Deserialize for colors, channels, regions and buffers

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod color;
pub mod error;
pub mod rect;

pub use buffer::PixelBuffer;
pub use color::{Channel, Rgba};
pub use error::{Error, Result};
pub use rect::Rect;

/// Prelude module for convenient imports.
///
/// ```
/// use picfx_core::prelude::*;
///
/// let buf = PixelBuffer::filled(1, 1, Rgba::WHITE).unwrap();
/// assert_eq!(buf.bounds(), Rect::from_size(1, 1));
/// ```
pub mod prelude {
    pub use crate::buffer::PixelBuffer;
    pub use crate::color::{Channel, Rgba};
    pub use crate::error::{Error, Result};
    pub use crate::rect::Rect;
}
