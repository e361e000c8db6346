//! Color values and channels.
//!
//! # Types
//!
//! - [`Rgba`] - one pixel: four independent 8-bit channels
//! - [`Channel`] - names one of those channels
//!
//! Channels are plain `u8`, so every stored value is already in `[0, 255]`.
//! Arithmetic that can leave that range (sharpening) is done in wider
//! integers by the caller and narrowed explicitly.
//!
//! ```
//! use picfx_core::{Channel, Rgba};
//!
//! let px = Rgba::new(200, 100, 50, 255);
//! assert_eq!(px.channel(Channel::Green), 100);
//! assert_eq!(px.with_channel(Channel::Blue, 0), Rgba::new(200, 100, 0, 255));
//! ```

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// An RGBA color with 8 bits per channel.
///
/// # Memory Layout
///
/// Uses `#[repr(C)]` for predictable layout: `[R, G, B, A]`, matching
/// interleaved RGBA8 byte buffers.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba {
    /// Red channel value.
    pub r: u8,
    /// Green channel value.
    pub g: u8,
    /// Blue channel value.
    pub b: u8,
    /// Alpha channel value.
    pub a: u8,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);
    /// Color of every pixel in a freshly allocated buffer.
    pub const DEFAULT: Rgba = Rgba::BLACK;

    /// Create a new RGBA color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color (alpha = 255).
    #[inline]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create a gray color with equal RGB values.
    #[inline]
    pub const fn gray(v: u8, a: u8) -> Self {
        Self::new(v, v, v, a)
    }

    /// Get RGBA values as an array ordered `[r, g, b, a]`.
    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Create from an array ordered `[r, g, b, a]`.
    #[inline]
    pub const fn from_array(arr: [u8; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }

    /// Read a single channel.
    #[inline]
    pub const fn channel(self, channel: Channel) -> u8 {
        match channel {
            Channel::Red => self.r,
            Channel::Green => self.g,
            Channel::Blue => self.b,
            Channel::Alpha => self.a,
        }
    }

    /// Return a copy with one channel replaced.
    #[inline]
    pub const fn with_channel(mut self, channel: Channel, value: u8) -> Self {
        match channel {
            Channel::Red => self.r = value,
            Channel::Green => self.g = value,
            Channel::Blue => self.b = value,
            Channel::Alpha => self.a = value,
        }
        self
    }

    /// Return a copy with red, green and blue taken from `other`, alpha kept.
    #[inline]
    pub const fn with_rgb_of(self, other: Rgba) -> Self {
        Self::new(other.r, other.g, other.b, self.a)
    }

    /// Integer mean of red, green and blue, rounded down.
    #[inline]
    pub const fn average_rgb(self) -> u8 {
        ((self.r as u16 + self.g as u16 + self.b as u16) / 3) as u8
    }

    /// Euclidean distance to `other` over red, green and blue.
    ///
    /// Alpha does not take part. Black to white is `255 * sqrt(3)`.
    ///
    /// ```
    /// use picfx_core::Rgba;
    ///
    /// assert_eq!(Rgba::BLACK.distance(&Rgba::BLACK), 0.0);
    /// assert!(Rgba::BLACK.distance(&Rgba::WHITE) > 441.0);
    /// ```
    #[inline]
    pub fn distance(&self, other: &Rgba) -> f64 {
        let dr = f64::from(self.r) - f64::from(other.r);
        let dg = f64::from(self.g) - f64::from(other.g);
        let db = f64::from(self.b) - f64::from(other.b);
        (dr * dr + dg * dg + db * db).sqrt()
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl From<[u8; 4]> for Rgba {
    fn from(arr: [u8; 4]) -> Self {
        Self::from_array(arr)
    }
}

impl From<Rgba> for [u8; 4] {
    fn from(px: Rgba) -> Self {
        px.to_array()
    }
}

/// One of the four color channels.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Channel {
    /// Red.
    Red,
    /// Green.
    Green,
    /// Blue.
    Blue,
    /// Alpha (opacity).
    Alpha,
}

impl Channel {
    /// Lowercase channel name.
    pub const fn name(self) -> &'static str {
        match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
            Channel::Alpha => "alpha",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Channel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "red" | "r" => Ok(Channel::Red),
            "green" | "g" => Ok(Channel::Green),
            "blue" | "b" => Ok(Channel::Blue),
            "alpha" | "a" => Ok(Channel::Alpha),
            other => Err(Error::UnknownChannel(other.to_string())),
        }
    }
}
