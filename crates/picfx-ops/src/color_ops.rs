//! Point-wise color transforms.
//!
//! Every function here mutates its buffer in place and visits each pixel
//! exactly once. No pixel depends on another, so the order of visits does
//! not matter and rows may be processed in parallel.
//!
//! [`mirror_vertical`] is the exception that reads other pixels: it copies
//! the left half over the right half, and the two halves never overlap.
//!
//! # Example
//!
//! ```rust
//! use picfx_core::{Channel, PixelBuffer, Rgba};
//! use picfx_ops::color_ops::{negate, zero_channel};
//!
//! let mut buf = PixelBuffer::filled(2, 2, Rgba::new(10, 20, 30, 40)).unwrap();
//! negate(&mut buf);
//! zero_channel(&mut buf, Channel::Blue);
//! assert_eq!(buf.get(0, 0).unwrap(), Rgba::new(245, 235, 0, 40));
//! ```

#[allow(unused_imports)]
use tracing::{debug, trace};

use picfx_core::{Channel, PixelBuffer, Rgba};

use crate::remap::{MirrorRegion, reflect_columns};
use crate::rows::map_each;

/// Sets `channel` to 0 in every pixel.
pub fn zero_channel(buf: &mut PixelBuffer, channel: Channel) {
    trace!(%channel, "zero_channel");
    map_each(buf.pixels_mut(), |px| px.with_channel(channel, 0));
}

/// Sets red, green and blue to 0 except for `channel`.
///
/// Alpha is never cleared, so the result stays visible. Keeping
/// [`Channel::Alpha`] clears all three color channels.
pub fn keep_only_channel(buf: &mut PixelBuffer, channel: Channel) {
    trace!(%channel, "keep_only_channel");
    map_each(buf.pixels_mut(), |px| {
        let mut out = Rgba::new(0, 0, 0, px.a);
        if channel != Channel::Alpha {
            out = out.with_channel(channel, px.channel(channel));
        }
        out
    });
}

/// Sets the blue channel to 0 in every pixel.
pub fn zero_blue(buf: &mut PixelBuffer) {
    zero_channel(buf, Channel::Blue);
}

/// Keeps only the blue channel, clearing red and green.
pub fn keep_only_blue(buf: &mut PixelBuffer) {
    keep_only_channel(buf, Channel::Blue);
}

/// Replaces red, green and blue with `255 - value`. Alpha is untouched.
pub fn negate(buf: &mut PixelBuffer) {
    trace!("negate");
    map_each(buf.pixels_mut(), |px| {
        Rgba::new(255 - px.r, 255 - px.g, 255 - px.b, px.a)
    });
}

/// Sets red, green and blue to their floored mean. Alpha is untouched.
pub fn gray_scale(buf: &mut PixelBuffer) {
    trace!("gray_scale");
    map_each(buf.pixels_mut(), |px| Rgba::gray(px.average_rgb(), px.a));
}

/// Copies the left half of every row onto the right half, mirrored.
///
/// For `col < width / 2`, the pixel at `(row, col)` is written to
/// `(row, width - 1 - col)`. The left half is never modified, so a second
/// call changes nothing. With an odd width the middle column is untouched.
pub fn mirror_vertical(buf: &mut PixelBuffer) {
    let (height, width) = buf.dimensions();
    trace!(height, width, "mirror_vertical");
    reflect_columns(buf, &MirrorRegion::full_width(height, width));
}
