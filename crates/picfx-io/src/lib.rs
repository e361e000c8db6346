//! # picfx-io
//!
//! Loading and saving [`PixelBuffer`]s.
//!
//! | format | read | write | notes                          |
//! |--------|------|-------|--------------------------------|
//! | PNG    | yes  | yes   | always written as 8-bit RGBA   |
//! | JPEG   | yes  | yes   | alpha dropped, quality 90      |
//!
//! Reading sniffs magic bytes before trusting the extension; writing goes by
//! the extension alone.
//!
//! ```rust,ignore
//! use picfx_io::{load_buffer, save_buffer};
//!
//! let buf = load_buffer("beach.jpg")?;
//! save_buffer(&buf, "beach.png")?;
//! ```
//!
//! ## Feature Flags
//!
//! - `png` (default) - PNG via the `png` crate
//! - `jpeg` (default) - JPEG via `jpeg-decoder` and `jpeg-encoder`

#![warn(missing_docs)]

use std::path::Path;

#[allow(unused_imports)]
use tracing::{debug, trace};

use picfx_core::PixelBuffer;

mod detect;
mod error;

#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png")]
pub mod png;

pub use detect::Format;
pub use error::{IoError, IoResult};

/// Loads an image file into a buffer.
///
/// # Errors
///
/// [`IoError::UnsupportedFormat`] if the file is neither PNG nor JPEG (or the
/// matching feature is off), [`IoError::Io`] if it cannot be opened and
/// [`IoError::DecodeError`] if its contents are corrupt.
pub fn load_buffer<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    let path = path.as_ref();
    let format = Format::detect(path)?;
    trace!(path = %path.display(), %format, "load_buffer");
    let buf = match format {
        #[cfg(feature = "png")]
        Format::Png => png::read(path)?,
        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::read(path)?,
        other => return Err(unsupported(path, other)),
    };
    debug!(height = buf.height(), width = buf.width(), "loaded");
    Ok(buf)
}

/// Saves a buffer, choosing the format from the extension of `path`.
pub fn save_buffer<P: AsRef<Path>>(buf: &PixelBuffer, path: P) -> IoResult<()> {
    let path = path.as_ref();
    let format = Format::from_extension(path);
    trace!(path = %path.display(), %format, "save_buffer");
    match format {
        #[cfg(feature = "png")]
        Format::Png => png::write(path, buf),
        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::write(path, buf),
        other => Err(unsupported(path, other)),
    }
}

/// Saves a buffer as JPEG with an explicit quality (1-100), whatever the
/// extension.
#[cfg(feature = "jpeg")]
pub fn save_jpeg_with_quality<P: AsRef<Path>>(
    buf: &PixelBuffer,
    path: P,
    quality: u8,
) -> IoResult<()> {
    jpeg::write_with_quality(path, buf, quality)
}

fn unsupported(path: &Path, format: Format) -> IoError {
    IoError::UnsupportedFormat(format!("{} ({format})", path.display()))
}
