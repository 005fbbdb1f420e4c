//! Lanczos resampling for regular and scattered one-dimensional signals.
//!
//! | Entry point | Source grid | Status |
//! |---|---|---|
//! | [`resample_regular_1d`] | evenly spaced | fast path for integer ratios, slow path otherwise |
//! | [`resample_irregular_1d`] | arbitrary positions | bin, fill holes, convolve |
//! | [`resample_regular_2d`] / [`resample_irregular_2d`] | 2D | validated, then unsupported |

mod error;
pub mod irregular;
pub mod kernel;
pub mod options;
mod regular;

pub use error::{BufferRole, ResampleError};
pub use irregular::{
    Irregular1d, Irregular2d, resample_irregular, resample_irregular_1d, resample_irregular_2d,
};
pub use options::{EdgeMode, MultidimMode, NodataPolicy, ResampleOptions};
pub use regular::{
    FastPlan, PhaseTable, Regular1d, Regular2d, RegularPlan, destination_center, resample_regular,
    resample_regular_1d, resample_regular_2d,
};
