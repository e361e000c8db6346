//! PNG support.
//!
//! Every PNG flavour is read as 8-bit RGBA: palettes are expanded, 16-bit
//! samples are stripped to their high byte, grayscale is replicated into
//! red, green and blue, and a missing alpha channel becomes 255.
//! Buffers are always written as 8-bit RGBA, so PNG round trips are exact.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Seek, Write};
use std::path::Path;

#[allow(unused_imports)]
use tracing::{debug, trace};

use picfx_core::PixelBuffer;

use crate::{IoError, IoResult};

/// Reads a PNG file.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    let file = File::open(path.as_ref())?;
    decode(BufReader::new(file))
}

/// Decodes a PNG stream.
pub fn decode<R: BufRead + Seek>(reader: R) -> IoResult<PixelBuffer> {
    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;
    let data = &buf[..info.buffer_size()];
    debug!(width = info.width, height = info.height, color = ?info.color_type, "png frame");

    let rgba: Vec<u8> = match info.color_type {
        png::ColorType::Rgba => data.to_vec(),
        png::ColorType::Rgb => data.chunks_exact(3).flat_map(|p| [p[0], p[1], p[2], 255]).collect(),
        png::ColorType::Grayscale => data.iter().flat_map(|&g| [g, g, g, 255]).collect(),
        png::ColorType::GrayscaleAlpha => data
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        other => {
            return Err(IoError::DecodeError(format!(
                "unexpected color type after normalization: {other:?}"
            )));
        }
    };
    Ok(PixelBuffer::from_rgba8(info.height, info.width, &rgba)?)
}

/// Writes a buffer as an 8-bit RGBA PNG.
pub fn write<P: AsRef<Path>>(path: P, buf: &PixelBuffer) -> IoResult<()> {
    let file = File::create(path.as_ref())?;
    encode(BufWriter::new(file), buf)
}

/// Encodes a buffer as an 8-bit RGBA PNG stream.
pub fn encode<W: Write>(writer: W, buf: &PixelBuffer) -> IoResult<()> {
    let mut encoder = png::Encoder::new(writer, buf.width(), buf.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::default());
    encoder.set_source_srgb(png::SrgbRenderingIntent::Perceptual);

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .write_image_data(&buf.to_rgba8())
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .finish()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use picfx_core::Rgba;
    use std::io::Cursor;

    #[test]
    fn test_memory_roundtrip_keeps_alpha() {
        let px = (0..6u8).map(|i| Rgba::new(i * 40, 255 - i, i, i * 50)).collect();
        let buf = PixelBuffer::from_pixels(2, 3, px).unwrap();

        let mut bytes = Vec::new();
        encode(&mut bytes, &buf).unwrap();
        let back = decode(Cursor::new(bytes)).unwrap();
        assert_eq!(back, buf);
    }

    #[test]
    fn test_gray_is_expanded() {
        let mut bytes = Vec::new();
        {
            let mut enc = png::Encoder::new(&mut bytes, 2, 1);
            enc.set_color(png::ColorType::Grayscale);
            enc.set_depth(png::BitDepth::Eight);
            let mut w = enc.write_header().unwrap();
            w.write_image_data(&[7, 200]).unwrap();
        }
        let buf = decode(Cursor::new(bytes)).unwrap();
        assert_eq!(buf.get(0, 0).unwrap(), Rgba::new(7, 7, 7, 255));
        assert_eq!(buf.get(0, 1).unwrap(), Rgba::new(200, 200, 200, 255));
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let err = decode(Cursor::new(b"not a png".to_vec())).unwrap_err();
        assert!(matches!(err, IoError::DecodeError(_)));
    }
}
