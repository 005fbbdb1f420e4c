//! Resampling options and their legacy bitmask encoding.
//!
//! Callers that speak the packed flag word can convert with
//! [`ResampleOptions::from_flags`]; everything inside the engine works on the
//! typed options.

use serde::{Deserialize, Serialize};

/// Drop out-of-range taps from both the sum and the normalization weight.
pub const EDGE_ZERO_PADDING: u32 = 0x0001;
/// Clamp out-of-range taps to the nearest valid source index (default).
pub const EDGE_CLAMPING: u32 = 0x0002;
/// Reserved for 2D separable resampling (default).
pub const MULTIDIM_2D_SEPARABLE: u32 = 0x0010;
/// Reserved for 2D isotropic resampling.
pub const MULTIDIM_2D_ISOTROPIC: u32 = 0x0020;
/// Empty irregular bins synthesize zero-valued samples.
pub const NODATA_ZERO: u32 = 0x0100;
/// Empty irregular bins copy the nearest neighbor found.
pub const NODATA_NEAREST: u32 = 0x0200;
/// Empty irregular bins interpolate between their nearest neighbors (default).
pub const NODATA_WEIGHTED: u32 = 0x0400;

/// How taps that fall outside the source grid are treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeMode {
    /// Repeat the first/last source sample.
    #[default]
    Clamping,
    /// Skip the tap entirely.
    ZeroPadding,
}

/// How empty irregular bins are populated before convolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodataPolicy {
    /// Synthesize a zero-valued sample.
    Zero,
    /// Copy the closer of the left/right neighbors.
    Nearest,
    /// Linearly interpolate between left and right neighbors, falling back to
    /// the nearest one when only one side is found.
    #[default]
    Weighted,
}

/// Reserved 2D interpolation mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultidimMode {
    #[default]
    Separable,
    Isotropic,
}

/// Typed view of the resampling flag word.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ResampleOptions {
    pub edge: EdgeMode,
    pub nodata: NodataPolicy,
    pub multidim: MultidimMode,
}

impl ResampleOptions {
    /// Decode a flag word.
    ///
    /// Conflicting bits resolve in a fixed order: zero padding beats
    /// clamping, `NODATA_ZERO` beats `NODATA_WEIGHTED` which beats
    /// `NODATA_NEAREST`, and separable beats isotropic.
    pub fn from_flags(flags: u32) -> Self {
        let edge = if flags & EDGE_ZERO_PADDING != 0 {
            EdgeMode::ZeroPadding
        } else {
            EdgeMode::Clamping
        };
        let nodata = if flags & NODATA_ZERO != 0 {
            NodataPolicy::Zero
        } else if flags & NODATA_WEIGHTED != 0 || flags & NODATA_NEAREST == 0 {
            NodataPolicy::Weighted
        } else {
            NodataPolicy::Nearest
        };
        let multidim =
            if flags & MULTIDIM_2D_ISOTROPIC != 0 && flags & MULTIDIM_2D_SEPARABLE == 0 {
                MultidimMode::Isotropic
            } else {
                MultidimMode::Separable
            };
        Self {
            edge,
            nodata,
            multidim,
        }
    }

    /// Encode back into a flag word with exactly one bit per option group.
    pub fn flags(&self) -> u32 {
        let edge = match self.edge {
            EdgeMode::Clamping => EDGE_CLAMPING,
            EdgeMode::ZeroPadding => EDGE_ZERO_PADDING,
        };
        let nodata = match self.nodata {
            NodataPolicy::Zero => NODATA_ZERO,
            NodataPolicy::Nearest => NODATA_NEAREST,
            NodataPolicy::Weighted => NODATA_WEIGHTED,
        };
        let multidim = match self.multidim {
            MultidimMode::Separable => MULTIDIM_2D_SEPARABLE,
            MultidimMode::Isotropic => MULTIDIM_2D_ISOTROPIC,
        };
        edge | nodata | multidim
    }

    pub fn with_edge(mut self, edge: EdgeMode) -> Self {
        self.edge = edge;
        self
    }

    pub fn with_nodata(mut self, nodata: NodataPolicy) -> Self {
        self.nodata = nodata;
        self
    }
}
