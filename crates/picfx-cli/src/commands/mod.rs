//! CLI command implementations

pub mod apply;
pub mod info;
pub mod list;
pub mod paste;

use anyhow::{Context, Result};
use picfx_core::PixelBuffer;
use std::path::Path;

/// Load image from path
pub fn load_buffer(path: &Path) -> Result<PixelBuffer> {
    picfx_io::load_buffer(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save image to path, with an explicit JPEG quality if given
pub fn save_buffer(path: &Path, buf: &PixelBuffer, quality: Option<u8>) -> Result<()> {
    let res = match (quality, picfx_io::Format::from_extension(path)) {
        (Some(q), picfx_io::Format::Jpeg) => picfx_io::save_jpeg_with_quality(buf, path, q),
        _ => picfx_io::save_buffer(buf, path),
    };
    res.with_context(|| format!("Failed to save: {}", path.display()))
}
