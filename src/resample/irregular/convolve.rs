//! Windowed-sinc convolution over filled bins.

use crate::resample::error::{ResampleError, try_zeroed};
use crate::resample::kernel::lanczos;
use crate::resample::regular::normalize;

use super::holes::FilledBins;

/// Write `dst_w * channels` interleaved values into `dst`.
///
/// Destination sample `j` sits at grid coordinate `j + 0.5`. Every sample in
/// bins `j..=j + 2a` is weighted by the kernel at its actual offset from that
/// center and the sum is divided by the total weight applied.
pub fn convolve(bins: &FilledBins<'_, '_>, dst: &mut [f32]) -> Result<(), ResampleError> {
    let layout = bins.grid.layout();
    let channels = bins.grid.channels();
    let a = layout.a as f32;
    let mut sums = try_zeroed(channels, "channel sums")?;

    for j in 0..layout.dst_w {
        let center = j as f64 + 0.5;
        sums.fill(0.0);
        let mut weight = 0.0;
        for bin in j..=j + 2 * layout.a {
            for sample in bins.samples(bin) {
                let x = (layout.grid_coordinate(sample.position) - center) as f32;
                let coef = lanczos(x, a);
                if coef == 0.0 {
                    continue;
                }
                weight += coef;
                for (sum, &value) in sums.iter_mut().zip(sample.values) {
                    *sum += value * coef;
                }
            }
        }
        for (ch, &sum) in sums.iter().enumerate() {
            dst[channels * j + ch] = normalize(sum, weight, j)?;
        }
    }
    Ok(())
}
