//! Scattered-sample resampling onto a regular grid.
//!
//! The pipeline buckets samples into destination-aligned bins, synthesizes a
//! placeholder for every empty bin, then convolves with the Lanczos kernel
//! using each sample's actual position.

mod bins;
mod convolve;
mod holes;

pub use bins::{BinGrid, BinLayout, SampleRef};
pub use convolve::convolve;
pub use holes::{FilledBins, HoleSet, fill_holes};

use super::error::{BufferRole, ResampleError, try_zeroed};
use super::options::ResampleOptions;
use super::regular::check_len;

/// Parameters for a one-dimensional irregular resample.
///
/// `src` holds `count` records of `(position, value₁..value_channels)`.
/// Positions may be unordered and may lie outside `[x0, x1]`; records that
/// fall beyond the kernel margin are ignored.
#[derive(Debug)]
pub struct Irregular1d<'a> {
    pub options: ResampleOptions,
    pub a: u32,
    pub channels: usize,
    pub count: usize,
    pub x0: f32,
    pub x1: f32,
    pub dst_w: usize,
    pub src: &'a [f32],
    pub dst: &'a mut [f32],
}

/// Parameters for a two-dimensional irregular resample.
#[derive(Debug)]
pub struct Irregular2d<'a> {
    pub options: ResampleOptions,
    pub a: u32,
    pub channels: usize,
    pub count: usize,
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
    pub dst_w: usize,
    pub dst_h: usize,
    pub src: &'a [f32],
    pub dst: &'a mut [f32],
}

/// Resample scattered samples onto `dst_w` evenly spaced destination samples
/// covering `[x0, x1]`.
pub fn resample_irregular_1d(request: Irregular1d<'_>) -> Result<(), ResampleError> {
    let Irregular1d {
        options,
        a,
        channels,
        count,
        x0,
        x1,
        dst_w,
        src,
        dst,
    } = request;
    validate(a, channels, dst_w, &[(x0, x1)])?;
    check_len(
        BufferRole::Source,
        count.saturating_mul(1 + channels),
        src.len(),
    )?;
    check_len(BufferRole::Destination, dst_w.saturating_mul(channels), dst.len())?;

    let layout = BinLayout {
        x0,
        x1,
        dst_w,
        a: a as usize,
    };
    let grid = BinGrid::build(layout, channels, count, src)?;
    tracing::debug!(
        binned = grid.binned(),
        discarded = grid.discarded(),
        bins = grid.bin_count(),
        "Irregular samples binned"
    );

    let holes = fill_holes(&grid, options.nodata)?;
    tracing::debug!(holes = holes.len(), policy = ?options.nodata, "Empty bins filled");

    let filled = FilledBins {
        grid: &grid,
        holes,
    };
    convolve(&filled, dst)
}

/// Two-dimensional irregular resampling. Validates the request, then reports
/// [`ResampleError::Unsupported`].
pub fn resample_irregular_2d(request: Irregular2d<'_>) -> Result<(), ResampleError> {
    validate(
        request.a,
        request.channels,
        request.dst_w.min(request.dst_h),
        &[(request.x0, request.x1), (request.y0, request.y1)],
    )?;
    check_len(
        BufferRole::Source,
        request.count.saturating_mul(2 + request.channels),
        request.src.len(),
    )?;
    let dst_len = request
        .dst_w
        .saturating_mul(request.dst_h)
        .saturating_mul(request.channels);
    check_len(BufferRole::Destination, dst_len, request.dst.len())?;
    Err(ResampleError::Unsupported("Irregular 2D"))
}

/// Resample interleaved `(position, values..)` records, returning a new
/// `dst_w * channels` buffer.
pub fn resample_irregular(
    samples: &[f32],
    channels: usize,
    x0: f32,
    x1: f32,
    dst_w: usize,
    a: u32,
    options: ResampleOptions,
) -> Result<Vec<f32>, ResampleError> {
    let mut dst = try_zeroed(dst_w.saturating_mul(channels), "destination buffer")?;
    resample_irregular_1d(Irregular1d {
        options,
        a,
        channels,
        count: samples.len() / (1 + channels),
        x0,
        x1,
        dst_w,
        src: samples,
        dst: &mut dst,
    })?;
    Ok(dst)
}

fn validate(
    a: u32,
    channels: usize,
    dst_w: usize,
    domains: &[(f32, f32)],
) -> Result<(), ResampleError> {
    if a == 0 {
        return Err(ResampleError::InvalidKernel);
    }
    if channels == 0 {
        return Err(ResampleError::NoChannels);
    }
    if dst_w == 0 {
        return Err(ResampleError::EmptyDestination);
    }
    for &(lo, hi) in domains {
        if !(lo.is_finite() && hi.is_finite() && lo < hi) {
            return Err(ResampleError::InvalidDomain { x0: lo, x1: hi });
        }
    }
    Ok(())
}
