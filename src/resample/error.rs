use std::collections::TryReserveError;
use std::fmt;

use thiserror::Error;

/// Which caller buffer a length check refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferRole {
    Source,
    Destination,
}

impl fmt::Display for BufferRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Destination => f.write_str("destination"),
        }
    }
}

/// Errors returned by the resampling operations.
///
/// Every error is terminal for the call that produced it; destination
/// contents are unspecified afterwards.
#[derive(Debug, Error)]
pub enum ResampleError {
    /// Kernel half-width was zero.
    #[error("Kernel half-width must be at least 1")]
    InvalidKernel,
    /// Channel count was zero.
    #[error("Channel count must be at least 1")]
    NoChannels,
    /// Source or destination grid has no samples.
    #[error("Grid lengths must be at least 1 (src {src_w}, dst {dst_w})")]
    EmptyGrid { src_w: usize, dst_w: usize },
    /// An irregular request asked for no destination samples.
    #[error("Destination grid must hold at least one sample")]
    EmptyDestination,
    /// Irregular domain bounds are not finite or not increasing.
    #[error("Invalid sample domain [{x0}, {x1}]")]
    InvalidDomain { x0: f32, x1: f32 },
    /// A caller buffer is shorter than its declared layout.
    #[error("{role} buffer holds {actual} values, expected at least {expected}")]
    BufferLength {
        role: BufferRole,
        expected: usize,
        actual: usize,
    },
    /// Scratch storage could not be reserved.
    #[error("Failed to allocate {what}: {source}")]
    Allocation {
        what: &'static str,
        source: TryReserveError,
    },
    /// The size of a scratch buffer does not fit in `usize`.
    #[error("Size of {what} overflows usize")]
    SizeOverflow { what: &'static str },
    /// Coefficient table construction did not fill its precomputed size
    /// exactly.
    #[error("Coefficient table filled {filled} of {len} entries")]
    CoefficientTable { filled: usize, len: usize },
    /// The kernel weights applied to a destination sample did not sum to a
    /// positive value.
    #[error("Kernel weight at destination index {index} is not positive")]
    DegenerateWeight { index: usize },
    /// The requested resampling variant has no implementation.
    #[error("{0} resampling is not implemented")]
    Unsupported(&'static str),
}

/// Reserve a zero-filled scratch buffer, reporting reservation failure
/// instead of aborting.
pub(crate) fn try_zeroed(len: usize, what: &'static str) -> Result<Vec<f32>, ResampleError> {
    let mut buf = try_with_capacity(len, what)?;
    buf.resize(len, 0.0);
    Ok(buf)
}

pub(crate) fn try_with_capacity<T>(
    len: usize,
    what: &'static str,
) -> Result<Vec<T>, ResampleError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|source| ResampleError::Allocation { what, source })?;
    Ok(buf)
}
