//! The filter catalog: every operation as a value.
//!
//! A [`Filter`] names one operation together with its parameters, so a
//! pipeline can be built from text (`"blur=5"`), from a YAML recipe (with the
//! `serde` feature), or in code, and then run in order with [`apply_all`].
//!
//! Each filter declares whether it naturally works in place or produces a new
//! buffer ([`Filter::mode`]). Callers still choose explicitly:
//! [`Filter::apply_in_place`] always mutates its argument and
//! [`Filter::apply_copy`] never does.
//!
//! # Spec syntax
//!
//! `name[=arg,arg,...]`, with `-` and `_` interchangeable in names:
//!
//! ```rust
//! use picfx_ops::Filter;
//!
//! let f: Filter = "stair-step=10,10".parse().unwrap();
//! assert_eq!(f, Filter::StairStep { shift_count: 10, steps: 10 });
//! assert_eq!(f.to_string(), "stair-step=10,10");
//! ```

use std::fmt;
use std::str::FromStr;

#[allow(unused_imports)]
use tracing::{debug, trace};

use picfx_core::{Channel, PixelBuffer};

use crate::neighborhood::Boundary;
use crate::{OpsError, OpsResult, color_ops, edge, neighborhood, remap};

/// Whether a filter naturally mutates its input or builds a new buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApplyMode {
    /// Rewrites the buffer it is given.
    InPlace,
    /// Reads the input and writes a fresh buffer.
    Copy,
}

/// One catalog operation with its parameters.
///
/// Serialized externally tagged. In YAML, read it through
/// `serde_yaml::with::singleton_map_recursive` to get the `- blur: { size: 5 }`
/// form instead of `!blur` tags.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Filter {
    /// [`color_ops::zero_channel`]
    ZeroChannel {
        /// Channel to clear.
        channel: Channel,
    },
    /// [`color_ops::keep_only_channel`]
    KeepOnlyChannel {
        /// Channel to keep.
        channel: Channel,
    },
    /// [`color_ops::negate`]
    Negate,
    /// [`color_ops::gray_scale`]
    GrayScale,
    /// [`color_ops::mirror_vertical`]
    MirrorVertical,
    /// [`remap::mirror_region`]
    MirrorRegion {
        /// First row of the band.
        row_start: u32,
        /// One past the last row of the band.
        row_end: u32,
        /// First source column.
        col_start: u32,
        /// Mirror axis column.
        mirror_point: u32,
    },
    /// [`remap::swap_left_right`]
    SwapLeftRight,
    /// [`remap::stair_step`]
    StairStep {
        /// Columns added to the shift at every step.
        shift_count: i32,
        /// Number of steps down the image.
        steps: u32,
    },
    /// [`remap::liquify`]
    Liquify {
        /// Peak shift at the middle row.
        max_height: i32,
    },
    /// [`remap::wavy`]
    Wavy {
        /// Peak shift of the sine.
        amplitude: i32,
    },
    /// [`neighborhood::blur_with`]
    Blur {
        /// Window side.
        size: u32,
        /// Edge policy.
        #[cfg_attr(feature = "serde", serde(default))]
        boundary: Boundary,
    },
    /// [`neighborhood::enhance`]
    Enhance {
        /// Window side.
        size: u32,
    },
    /// [`neighborhood::pixelate`]
    Pixelate {
        /// Block side.
        size: u32,
    },
    /// [`edge::edge_detection`]
    EdgeDetection {
        /// Distance above which a pixel is an edge.
        threshold: f64,
    },
}

/// Catalog entry shown by front ends.
#[derive(Debug, Clone, Copy)]
pub struct FilterInfo {
    /// Spec name.
    pub name: &'static str,
    /// Argument syntax, empty if none.
    pub args: &'static str,
    /// One-line description.
    pub summary: &'static str,
}

/// Every spec name [`Filter::from_str`] accepts.
pub const CATALOG: &[FilterInfo] = &[
    FilterInfo {
        name: "zero-channel",
        args: "CHANNEL",
        summary: "set one channel to 0",
    },
    FilterInfo {
        name: "keep-only-channel",
        args: "CHANNEL",
        summary: "clear every color channel but one",
    },
    FilterInfo {
        name: "zero-blue",
        args: "",
        summary: "set blue to 0",
    },
    FilterInfo {
        name: "keep-only-blue",
        args: "",
        summary: "clear red and green",
    },
    FilterInfo {
        name: "negate",
        args: "",
        summary: "invert red, green and blue",
    },
    FilterInfo {
        name: "gray-scale",
        args: "",
        summary: "replace color by the mean of red, green and blue",
    },
    FilterInfo {
        name: "mirror-vertical",
        args: "",
        summary: "copy the left half onto the right, mirrored",
    },
    FilterInfo {
        name: "mirror-region",
        args: "ROW_START,ROW_END,COL_START,MIRROR_POINT",
        summary: "mirror a band of columns about a vertical axis",
    },
    FilterInfo {
        name: "mirror-temple",
        args: "",
        summary: "mirror-region=27,97,13,276",
    },
    FilterInfo {
        name: "swap-left-right",
        args: "",
        summary: "trade the left and right halves",
    },
    FilterInfo {
        name: "stair-step",
        args: "SHIFT,STEPS",
        summary: "shift rows right in stair increments",
    },
    FilterInfo {
        name: "liquify",
        args: "MAX_HEIGHT",
        summary: "shift rows along a Gaussian bell",
    },
    FilterInfo {
        name: "wavy",
        args: "AMPLITUDE",
        summary: "shift rows along a sine wave",
    },
    FilterInfo {
        name: "blur",
        args: "SIZE[,clip|replicate]",
        summary: "box blur",
    },
    FilterInfo {
        name: "enhance",
        args: "SIZE",
        summary: "unsharp mask, clamped to 0..255",
    },
    FilterInfo {
        name: "pixelate",
        args: "SIZE",
        summary: "replace blocks by their mean",
    },
    FilterInfo {
        name: "edge-detection",
        args: "THRESHOLD",
        summary: "black where the color jumps, white elsewhere",
    },
];

impl Filter {
    /// The region [`Filter::MirrorRegion`] gets from `mirror-temple`.
    pub const TEMPLE: Filter = Filter::MirrorRegion {
        row_start: 27,
        row_end: 97,
        col_start: 13,
        mirror_point: 276,
    };

    /// Spec name of this filter.
    pub fn name(&self) -> &'static str {
        match self {
            Filter::ZeroChannel { .. } => "zero-channel",
            Filter::KeepOnlyChannel { .. } => "keep-only-channel",
            Filter::Negate => "negate",
            Filter::GrayScale => "gray-scale",
            Filter::MirrorVertical => "mirror-vertical",
            Filter::MirrorRegion { .. } => "mirror-region",
            Filter::SwapLeftRight => "swap-left-right",
            Filter::StairStep { .. } => "stair-step",
            Filter::Liquify { .. } => "liquify",
            Filter::Wavy { .. } => "wavy",
            Filter::Blur { .. } => "blur",
            Filter::Enhance { .. } => "enhance",
            Filter::Pixelate { .. } => "pixelate",
            Filter::EdgeDetection { .. } => "edge-detection",
        }
    }

    /// How the underlying operation works.
    pub fn mode(&self) -> ApplyMode {
        match self {
            Filter::ZeroChannel { .. }
            | Filter::KeepOnlyChannel { .. }
            | Filter::Negate
            | Filter::GrayScale
            | Filter::MirrorVertical
            | Filter::MirrorRegion { .. }
            | Filter::Pixelate { .. }
            | Filter::EdgeDetection { .. } => ApplyMode::InPlace,
            Filter::SwapLeftRight
            | Filter::StairStep { .. }
            | Filter::Liquify { .. }
            | Filter::Wavy { .. }
            | Filter::Blur { .. }
            | Filter::Enhance { .. } => ApplyMode::Copy,
        }
    }

    /// Runs the filter so that `buf` holds the result.
    ///
    /// On error `buf` is unchanged.
    pub fn apply_in_place(&self, buf: &mut PixelBuffer) -> OpsResult<()> {
        trace!(filter = %self, "apply_in_place");
        match self {
            Filter::ZeroChannel { channel } => color_ops::zero_channel(buf, *channel),
            Filter::KeepOnlyChannel { channel } => color_ops::keep_only_channel(buf, *channel),
            Filter::Negate => color_ops::negate(buf),
            Filter::GrayScale => color_ops::gray_scale(buf),
            Filter::MirrorVertical => color_ops::mirror_vertical(buf),
            Filter::MirrorRegion {
                row_start,
                row_end,
                col_start,
                mirror_point,
            } => {
                let region =
                    remap::MirrorRegion::new(*row_start..*row_end, *col_start, *mirror_point)?;
                remap::mirror_region(buf, &region)?;
            }
            Filter::Pixelate { size } => neighborhood::pixelate(buf, *size)?,
            Filter::EdgeDetection { threshold } => edge::edge_detection(buf, *threshold),
            _ => *buf = self.build(buf)?,
        }
        Ok(())
    }

    /// Runs the filter on a copy, leaving `src` untouched.
    pub fn apply_copy(&self, src: &PixelBuffer) -> OpsResult<PixelBuffer> {
        trace!(filter = %self, "apply_copy");
        match self.mode() {
            ApplyMode::Copy => self.build(src),
            ApplyMode::InPlace => {
                let mut out = src.clone();
                self.apply_in_place(&mut out)?;
                Ok(out)
            }
        }
    }

    /// The new-buffer filters.
    fn build(&self, src: &PixelBuffer) -> OpsResult<PixelBuffer> {
        match self {
            Filter::SwapLeftRight => Ok(remap::swap_left_right(src)),
            Filter::StairStep { shift_count, steps } => {
                remap::stair_step(src, *shift_count, *steps)
            }
            Filter::Liquify { max_height } => Ok(remap::liquify(src, *max_height)),
            Filter::Wavy { amplitude } => Ok(remap::wavy(src, *amplitude)),
            Filter::Blur { size, boundary } => neighborhood::blur_with(src, *size, *boundary),
            Filter::Enhance { size } => neighborhood::enhance(src, *size),
            in_place => {
                let mut out = src.clone();
                in_place.apply_in_place(&mut out)?;
                Ok(out)
            }
        }
    }
}

/// Runs `filters` in order on a copy of `src`.
///
/// ```rust
/// use picfx_core::{PixelBuffer, Rgba};
/// use picfx_ops::{apply_all, Filter};
///
/// let buf = PixelBuffer::filled(2, 2, Rgba::opaque(10, 20, 30)).unwrap();
/// let out = apply_all(&buf, &[Filter::Negate, Filter::Negate]).unwrap();
/// assert_eq!(out, buf);
/// ```
pub fn apply_all(src: &PixelBuffer, filters: &[Filter]) -> OpsResult<PixelBuffer> {
    let mut out = src.clone();
    for (i, filter) in filters.iter().enumerate() {
        debug!(step = i, filter = %filter, "applying");
        filter.apply_in_place(&mut out)?;
    }
    Ok(out)
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())?;
        match self {
            Filter::ZeroChannel { channel } | Filter::KeepOnlyChannel { channel } => {
                write!(f, "={channel}")
            }
            Filter::MirrorRegion {
                row_start,
                row_end,
                col_start,
                mirror_point,
            } => write!(f, "={row_start},{row_end},{col_start},{mirror_point}"),
            Filter::StairStep { shift_count, steps } => write!(f, "={shift_count},{steps}"),
            Filter::Liquify { max_height } => write!(f, "={max_height}"),
            Filter::Wavy { amplitude } => write!(f, "={amplitude}"),
            Filter::Blur { size, boundary } => match boundary {
                Boundary::Clip => write!(f, "={size}"),
                Boundary::Replicate => write!(f, "={size},replicate"),
            },
            Filter::Enhance { size } | Filter::Pixelate { size } => write!(f, "={size}"),
            Filter::EdgeDetection { threshold } => write!(f, "={threshold}"),
            Filter::Negate
            | Filter::GrayScale
            | Filter::MirrorVertical
            | Filter::SwapLeftRight => Ok(()),
        }
    }
}

/// Positional arguments of one spec.
struct Args<'a> {
    name: &'a str,
    items: Vec<&'a str>,
}

impl Args<'_> {
    fn arity(&self, n: usize) -> OpsResult<()> {
        if self.items.len() != n {
            return Err(OpsError::invalid(format!(
                "{} takes {} argument(s), got {}",
                self.name,
                n,
                self.items.len()
            )));
        }
        Ok(())
    }

    fn int(&self, i: usize) -> OpsResult<i64> {
        self.items[i].trim().parse::<i64>().map_err(|_| {
            OpsError::invalid(format!("{}: '{}' is not an integer", self.name, self.items[i]))
        })
    }

    fn signed(&self, i: usize) -> OpsResult<i32> {
        i32::try_from(self.int(i)?).map_err(|_| {
            OpsError::invalid(format!("{}: '{}' is out of range", self.name, self.items[i]))
        })
    }

    fn unsigned(&self, i: usize) -> OpsResult<u32> {
        let v = self.int(i)?;
        u32::try_from(v).map_err(|_| {
            OpsError::invalid(format!("{}: argument must be >= 0, got {}", self.name, v))
        })
    }

    fn float(&self, i: usize) -> OpsResult<f64> {
        self.items[i].trim().parse::<f64>().map_err(|_| {
            OpsError::invalid(format!("{}: '{}' is not a number", self.name, self.items[i]))
        })
    }

    fn channel(&self, i: usize) -> OpsResult<Channel> {
        Ok(self.items[i].parse::<Channel>()?)
    }
}

impl FromStr for Filter {
    type Err = OpsError;

    fn from_str(s: &str) -> OpsResult<Self> {
        let (raw_name, raw_args) = match s.split_once('=') {
            Some((n, a)) => (n, Some(a)),
            None => (s, None),
        };
        let key = raw_name.trim().to_lowercase().replace('_', "-");
        let args = Args {
            name: raw_name.trim(),
            items: raw_args.map(|a| a.split(',').collect()).unwrap_or_default(),
        };

        let filter = match key.as_str() {
            "zero-channel" => {
                args.arity(1)?;
                Filter::ZeroChannel { channel: args.channel(0)? }
            }
            "keep-only-channel" => {
                args.arity(1)?;
                Filter::KeepOnlyChannel { channel: args.channel(0)? }
            }
            "zero-blue" => {
                args.arity(0)?;
                Filter::ZeroChannel { channel: Channel::Blue }
            }
            "keep-only-blue" => {
                args.arity(0)?;
                Filter::KeepOnlyChannel { channel: Channel::Blue }
            }
            "negate" => {
                args.arity(0)?;
                Filter::Negate
            }
            "gray-scale" | "grayscale" => {
                args.arity(0)?;
                Filter::GrayScale
            }
            "mirror-vertical" => {
                args.arity(0)?;
                Filter::MirrorVertical
            }
            "mirror-region" => {
                args.arity(4)?;
                Filter::MirrorRegion {
                    row_start: args.unsigned(0)?,
                    row_end: args.unsigned(1)?,
                    col_start: args.unsigned(2)?,
                    mirror_point: args.unsigned(3)?,
                }
            }
            "mirror-temple" => {
                args.arity(0)?;
                Filter::TEMPLE
            }
            "swap-left-right" => {
                args.arity(0)?;
                Filter::SwapLeftRight
            }
            "stair-step" => {
                args.arity(2)?;
                Filter::StairStep {
                    shift_count: args.signed(0)?,
                    steps: args.unsigned(1)?,
                }
            }
            "liquify" => {
                args.arity(1)?;
                Filter::Liquify { max_height: args.signed(0)? }
            }
            "wavy" => {
                args.arity(1)?;
                Filter::Wavy { amplitude: args.signed(0)? }
            }
            "blur" => {
                if args.items.len() == 2 {
                    Filter::Blur {
                        size: args.unsigned(0)?,
                        boundary: args.items[1].parse()?,
                    }
                } else {
                    args.arity(1)?;
                    Filter::Blur {
                        size: args.unsigned(0)?,
                        boundary: Boundary::Clip,
                    }
                }
            }
            "enhance" => {
                args.arity(1)?;
                Filter::Enhance { size: args.unsigned(0)? }
            }
            "pixelate" => {
                args.arity(1)?;
                Filter::Pixelate { size: args.unsigned(0)? }
            }
            "edge-detection" | "edges" => {
                args.arity(1)?;
                Filter::EdgeDetection { threshold: args.float(0)? }
            }
            _ => return Err(OpsError::UnknownFilter(raw_name.trim().to_string())),
        };
        Ok(filter)
    }
}
