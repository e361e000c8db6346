//! Row-wise iteration over a row-major slice, parallel when the `parallel`
//! feature is enabled.
//!
//! Each closure gets exclusive access to its own row (or band of rows).
//! Anything else it reads must come from a separate source buffer.

use picfx_core::Rgba;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Calls `f(row_index, row)` for every `width`-long row of `pixels`.
#[cfg(feature = "parallel")]
pub(crate) fn for_each_row<T, F>(pixels: &mut [T], width: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    pixels
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(row, chunk)| f(row, chunk));
}

/// Calls `f(row_index, row)` for every `width`-long row of `pixels`.
#[cfg(not(feature = "parallel"))]
pub(crate) fn for_each_row<T, F>(pixels: &mut [T], width: usize, f: F)
where
    F: Fn(usize, &mut [T]),
{
    pixels
        .chunks_mut(width)
        .enumerate()
        .for_each(|(row, chunk)| f(row, chunk));
}

/// Calls `f(band_index, band)` for every band of `band_rows` rows. The last
/// band may be shorter.
#[cfg(feature = "parallel")]
pub(crate) fn for_each_band<F>(pixels: &mut [Rgba], width: usize, band_rows: usize, f: F)
where
    F: Fn(usize, &mut [Rgba]) + Sync + Send,
{
    pixels
        .par_chunks_mut(width * band_rows)
        .enumerate()
        .for_each(|(band, chunk)| f(band, chunk));
}

/// Calls `f(band_index, band)` for every band of `band_rows` rows. The last
/// band may be shorter.
#[cfg(not(feature = "parallel"))]
pub(crate) fn for_each_band<F>(pixels: &mut [Rgba], width: usize, band_rows: usize, f: F)
where
    F: Fn(usize, &mut [Rgba]),
{
    pixels
        .chunks_mut(width * band_rows)
        .enumerate()
        .for_each(|(band, chunk)| f(band, chunk));
}

/// Applies `f` to every pixel independently.
#[cfg(feature = "parallel")]
pub(crate) fn map_each<F>(pixels: &mut [Rgba], f: F)
where
    F: Fn(Rgba) -> Rgba + Sync + Send,
{
    pixels.par_iter_mut().for_each(|px| *px = f(*px));
}

/// Applies `f` to every pixel independently.
#[cfg(not(feature = "parallel"))]
pub(crate) fn map_each<F>(pixels: &mut [Rgba], f: F)
where
    F: Fn(Rgba) -> Rgba,
{
    pixels.iter_mut().for_each(|px| *px = f(*px));
}
