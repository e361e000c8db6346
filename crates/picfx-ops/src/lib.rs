//! # picfx-ops
//!
//! Raster filters over [`picfx_core::PixelBuffer`].
//!
//! # Modules
//!
//! - [`color_ops`] - point-wise transforms (negate, grayscale, channel masks, mirror)
//! - [`remap`] - column remaps with wraparound (swap, stair-step, liquify, wavy, region mirror)
//! - [`neighborhood`] - window averages (blur, enhance, pixelate)
//! - [`edge`] - horizontal edge detection
//! - [`composite`] - copying one buffer into another
//! - [`catalog`] - every filter as a [`Filter`] value
//!
//! # Boundary policies
//!
//! Remaps **wrap**: a column pushed past an edge comes back on the other
//! side. Window filters **clip** (or replicate, on request): they never wrap.
//! The compositor copies only the overlap. Each policy belongs to its filter
//! and is not shared.
//!
//! # Example
//!
//! ```rust
//! use picfx_core::{PixelBuffer, Rgba};
//! use picfx_ops::{apply_all, Filter};
//!
//! let buf = PixelBuffer::filled(8, 8, Rgba::opaque(40, 80, 120)).unwrap();
//! let steps: Vec<Filter> = ["blur=3", "negate", "wavy=2"]
//!     .iter()
//!     .map(|s| s.parse().unwrap())
//!     .collect();
//! let out = apply_all(&buf, &steps).unwrap();
//! assert_eq!(out.get(4, 4).unwrap(), Rgba::opaque(215, 175, 135));
//! ```
//!
//! # Feature Flags
//!
//! - `parallel` (default) - process rows on the rayon thread pool
//! - `serde` - Serialize/Deserialize for [`Filter`] and [`neighborhood::Boundary`]

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod rows;

pub mod catalog;
pub mod color_ops;
pub mod composite;
pub mod edge;
pub mod neighborhood;
pub mod remap;

pub use catalog::{ApplyMode, CATALOG, Filter, FilterInfo, apply_all};
pub use error::{OpsError, OpsResult};
pub use neighborhood::{Boundary, SharpenedBuffer};
pub use remap::MirrorRegion;
