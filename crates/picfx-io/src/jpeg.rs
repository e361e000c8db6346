//! JPEG support.
//!
//! JPEG has no alpha: decoded pixels are opaque and alpha is dropped on
//! write. Grayscale, 16-bit grayscale and CMYK sources are converted to RGB.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[allow(unused_imports)]
use tracing::{debug, trace, warn};

use picfx_core::{PixelBuffer, Rgba};

use crate::{IoError, IoResult};

/// Quality used by [`write`].
pub const DEFAULT_QUALITY: u8 = 90;

/// Reads a JPEG file.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    let file = File::open(path.as_ref())?;
    decode(BufReader::new(file))
}

/// Decodes a JPEG stream into an opaque buffer.
pub fn decode<R: Read>(reader: R) -> IoResult<PixelBuffer> {
    let mut decoder = jpeg_decoder::Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(e.to_string()))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("missing JPEG info".into()))?;
    debug!(width = info.width, height = info.height, format = ?info.pixel_format, "jpeg frame");

    let rgba: Vec<Rgba> = match info.pixel_format {
        jpeg_decoder::PixelFormat::RGB24 => pixels
            .chunks_exact(3)
            .map(|p| Rgba::opaque(p[0], p[1], p[2]))
            .collect(),
        jpeg_decoder::PixelFormat::L8 => pixels.iter().map(|&g| Rgba::gray(g, 255)).collect(),
        // Big-endian samples: keep the high byte.
        jpeg_decoder::PixelFormat::L16 => pixels
            .chunks_exact(2)
            .map(|p| Rgba::gray(p[0], 255))
            .collect(),
        jpeg_decoder::PixelFormat::CMYK32 => pixels.chunks_exact(4).map(cmyk_to_rgba).collect(),
    };
    Ok(PixelBuffer::from_pixels(
        u32::from(info.height),
        u32::from(info.width),
        rgba,
    )?)
}

/// Approximate CMYK to RGB.
fn cmyk_to_rgba(cmyk: &[u8]) -> Rgba {
    let k = 1.0 - f32::from(cmyk[3]) / 255.0;
    let ch = |v: u8| ((1.0 - f32::from(v) / 255.0) * k * 255.0) as u8;
    Rgba::opaque(ch(cmyk[0]), ch(cmyk[1]), ch(cmyk[2]))
}

/// Writes a buffer as a JPEG at [`DEFAULT_QUALITY`].
pub fn write<P: AsRef<Path>>(path: P, buf: &PixelBuffer) -> IoResult<()> {
    write_with_quality(path, buf, DEFAULT_QUALITY)
}

/// Writes a buffer as a JPEG at `quality` (1-100).
pub fn write_with_quality<P: AsRef<Path>>(path: P, buf: &PixelBuffer, quality: u8) -> IoResult<()> {
    let bytes = encode(buf, quality)?;
    std::fs::write(path.as_ref(), bytes)?;
    Ok(())
}

/// Encodes a buffer as JPEG bytes. Alpha is discarded.
pub fn encode(buf: &PixelBuffer, quality: u8) -> IoResult<Vec<u8>> {
    use jpeg_encoder::{ColorType, Encoder};

    let (width, height) = match (u16::try_from(buf.width()), u16::try_from(buf.height())) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(IoError::EncodeError(format!(
                "{}x{} exceeds the JPEG size limit of 65535",
                buf.height(),
                buf.width()
            )));
        }
    };
    if buf.pixels().iter().any(|px| px.a != 255) {
        warn!("JPEG has no alpha channel; transparency is dropped");
    }
    let rgb: Vec<u8> = buf.pixels().iter().flat_map(|px| [px.r, px.g, px.b]).collect();

    let mut out = Vec::new();
    let encoder = Encoder::new(&mut out, quality.clamp(1, 100));
    encoder
        .encode(&rgb, width, height, ColorType::Rgb)
        .map_err(|e: jpeg_encoder::EncodingError| IoError::EncodeError(e.to_string()))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient() -> PixelBuffer {
        let px = (0..16u32)
            .flat_map(|y| {
                (0..16u32).map(move |x| Rgba::opaque((x * 16) as u8, (y * 16) as u8, 128))
            })
            .collect();
        PixelBuffer::from_pixels(16, 16, px).unwrap()
    }

    #[test]
    fn test_memory_roundtrip_is_close() {
        let buf = gradient();
        let bytes = encode(&buf, 95).unwrap();
        let back = decode(bytes.as_slice()).unwrap();
        assert_eq!(back.dimensions(), (16, 16));
        for (a, b) in buf.pixels().iter().zip(back.pixels()) {
            assert!(a.distance(b) < 30.0, "{a} vs {b}");
            assert_eq!(b.a, 255);
        }
    }

    #[test]
    fn test_alpha_dropped() {
        let buf = PixelBuffer::filled(8, 8, Rgba::new(100, 100, 100, 0)).unwrap();
        let back = decode(encode(&buf, 90).unwrap().as_slice()).unwrap();
        assert!(back.pixels().iter().all(|px| px.a == 255));
    }

    #[test]
    fn test_cmyk() {
        assert_eq!(cmyk_to_rgba(&[0, 0, 0, 0]), Rgba::WHITE);
        assert_eq!(cmyk_to_rgba(&[0, 0, 0, 255]), Rgba::BLACK);
    }

    #[test]
    fn test_garbage_is_decode_error() {
        assert!(matches!(decode(&b"nope"[..]), Err(IoError::DecodeError(_))));
    }
}
