//! Error types for I/O operations.

use std::io;
use thiserror::Error;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Neither the magic bytes nor the extension name a supported format,
    /// or support for it was compiled out.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The file could not be decoded.
    #[error("decode error: {0}")]
    DecodeError(String),

    /// The buffer could not be encoded.
    #[error("encode error: {0}")]
    EncodeError(String),

    /// The decoded pixels did not form a valid buffer.
    #[error(transparent)]
    Core(#[from] picfx_core::Error),
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;
