//! Regular-grid Lanczos resampling.
//!
//! Integer up/downsampling ratios take the fast path, which evaluates the
//! kernel once per phase and reuses the table for every destination sample in
//! that phase. Any other ratio falls back to evaluating the kernel per
//! destination sample.

use super::error::{BufferRole, ResampleError, try_with_capacity, try_zeroed};
use super::kernel::lanczos;
use super::options::{EdgeMode, ResampleOptions};

/// Parameters for a one-dimensional regular resample.
///
/// `src` holds `src_w * channels` interleaved values and `dst` receives
/// `dst_w * channels` interleaved values.
#[derive(Debug)]
pub struct Regular1d<'a> {
    pub options: ResampleOptions,
    /// Kernel half-width.
    pub a: u32,
    pub channels: usize,
    pub src_w: usize,
    pub dst_w: usize,
    pub src: &'a [f32],
    pub dst: &'a mut [f32],
}

/// Parameters for a two-dimensional regular resample.
#[derive(Debug)]
pub struct Regular2d<'a> {
    pub options: ResampleOptions,
    pub a: u32,
    pub channels: usize,
    pub src_w: usize,
    pub src_h: usize,
    pub dst_w: usize,
    pub dst_h: usize,
    pub src: &'a [f32],
    pub dst: &'a mut [f32],
}

/// Fast-path parameters for an integer resampling ratio.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FastPlan {
    /// Number of distinct coefficient tables.
    pub phases: usize,
    /// Kernel stretch in source samples; the downsampling factor, else 1.
    pub filter_scale: usize,
}

impl FastPlan {
    /// Taps evaluated per destination sample, `2 * filter_scale * a`.
    pub fn taps(&self, a: u32) -> Result<usize, ResampleError> {
        (a as usize)
            .checked_mul(self.filter_scale)
            .and_then(|n| n.checked_mul(2))
            .ok_or(ResampleError::SizeOverflow {
                what: "kernel taps",
            })
    }

    /// Total coefficients across all phases.
    pub fn coefficient_count(&self, a: u32) -> Result<usize, ResampleError> {
        self.taps(a)?
            .checked_mul(self.phases)
            .ok_or(ResampleError::SizeOverflow {
                what: "coefficient table",
            })
    }

    /// Evaluate the kernel for every phase of resampling `src_w` onto `dst_w`.
    pub fn build_table(
        &self,
        a: u32,
        src_w: usize,
        dst_w: usize,
    ) -> Result<PhaseTable, ResampleError> {
        let len = self.coefficient_count(a)?;
        let taps = self.taps(a)?;
        let mut coefs = try_zeroed(len, "coefficient table")?;
        let mut weights = try_zeroed(self.phases, "phase weights")?;

        // `taps` fits in usize, so `fs * a` fits in i64.
        let fs = self.filter_scale as i64;
        let reach = fs * a as i64;
        let first_tap = 1 - reach;

        let mut idx = 0;
        for (phase, weight) in weights.iter_mut().enumerate() {
            let (_, frac) = destination_center(phase, src_w, dst_w);
            for i in first_tap..=reach {
                let Some(slot) = coefs.get_mut(idx) else {
                    tracing::error!(index = idx, len, "Coefficient table overrun");
                    return Err(ResampleError::CoefficientTable { filled: idx, len });
                };
                let x = ((i as f64 - frac) / fs as f64) as f32;
                *slot = lanczos(x, a as f32);
                *weight += *slot;
                idx += 1;
            }
        }
        if idx != len {
            tracing::error!(filled = idx, len, "Coefficient table underfilled");
            return Err(ResampleError::CoefficientTable { filled: idx, len });
        }
        Ok(PhaseTable {
            taps,
            first_tap,
            coefs,
            weights,
        })
    }
}

/// Kernel coefficients for each phase of a [`FastPlan`], with the sum of each
/// phase's coefficients.
#[derive(Debug)]
pub struct PhaseTable {
    taps: usize,
    /// Source offset of the first coefficient relative to the destination
    /// center's floor.
    first_tap: i64,
    coefs: Vec<f32>,
    weights: Vec<f32>,
}

impl PhaseTable {
    pub fn phases(&self) -> usize {
        self.weights.len()
    }

    pub fn first_tap(&self) -> i64 {
        self.first_tap
    }

    pub fn coefficients(&self, phase: usize) -> &[f32] {
        &self.coefs[phase * self.taps..(phase + 1) * self.taps]
    }

    /// Sum of every coefficient in `phase`.
    pub fn weight(&self, phase: usize) -> f32 {
        self.weights[phase]
    }
}

/// Which convolution path a grid pair resamples through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegularPlan {
    Fast(FastPlan),
    Slow,
}

impl RegularPlan {
    /// Pick the path for resampling `src_w` samples onto `dst_w` samples.
    pub fn select(src_w: usize, dst_w: usize) -> Self {
        if src_w == 0 || dst_w == 0 {
            return Self::Slow;
        }
        if dst_w >= src_w {
            if dst_w % src_w == 0 {
                return Self::Fast(FastPlan {
                    phases: dst_w / src_w,
                    filter_scale: 1,
                });
            }
        } else if src_w % dst_w == 0 {
            return Self::Fast(FastPlan {
                phases: 1,
                filter_scale: src_w / dst_w,
            });
        }
        Self::Slow
    }
}

/// Resample a regular grid onto another regular grid.
///
/// Every destination value is written on success.
pub fn resample_regular_1d(request: Regular1d<'_>) -> Result<(), ResampleError> {
    let Regular1d {
        options,
        a,
        channels,
        src_w,
        dst_w,
        src,
        dst,
    } = request;
    validate(a, channels, src_w, dst_w)?;
    check_len(BufferRole::Source, src_w.saturating_mul(channels), src.len())?;
    check_len(BufferRole::Destination, dst_w.saturating_mul(channels), dst.len())?;

    let grid = Grid {
        src,
        channels,
        src_w,
        dst_w,
        a,
        edge: options.edge,
    };
    let plan = RegularPlan::select(src_w, dst_w);
    tracing::debug!(src_w, dst_w, a, channels, ?plan, "Regular resample");
    match plan {
        RegularPlan::Fast(fast) => resample_fast(&grid, fast, dst),
        RegularPlan::Slow => resample_slow(&grid, dst),
    }
}

/// Two-dimensional regular resampling. Validates the request, then reports
/// [`ResampleError::Unsupported`].
pub fn resample_regular_2d(request: Regular2d<'_>) -> Result<(), ResampleError> {
    validate(request.a, request.channels, request.src_w, request.dst_w)?;
    validate(request.a, request.channels, request.src_h, request.dst_h)?;
    let src_len = request
        .src_w
        .saturating_mul(request.src_h)
        .saturating_mul(request.channels);
    let dst_len = request
        .dst_w
        .saturating_mul(request.dst_h)
        .saturating_mul(request.channels);
    check_len(BufferRole::Source, src_len, request.src.len())?;
    check_len(BufferRole::Destination, dst_len, request.dst.len())?;
    Err(ResampleError::Unsupported("Regular 2D"))
}

/// Resample interleaved `src` to `dst_w` frames, returning a new buffer.
pub fn resample_regular(
    src: &[f32],
    channels: usize,
    dst_w: usize,
    a: u32,
    options: ResampleOptions,
) -> Result<Vec<f32>, ResampleError> {
    if channels == 0 {
        return Err(ResampleError::NoChannels);
    }
    let mut dst = try_zeroed(dst_w.saturating_mul(channels), "destination buffer")?;
    resample_regular_1d(Regular1d {
        options,
        a,
        channels,
        src_w: src.len() / channels,
        dst_w,
        src,
        dst: &mut dst,
    })?;
    Ok(dst)
}

/// Source-space position of destination sample `j`, `(j + 0.5) * step - 0.5`.
///
/// Returned as floor and fractional part computed from integers so that every
/// destination sample sharing a phase sees the same fraction.
pub fn destination_center(j: usize, src_w: usize, dst_w: usize) -> (i64, f64) {
    let num = (2 * j as i64 + 1) * src_w as i64 - dst_w as i64;
    let den = 2 * dst_w as i64;
    (num.div_euclid(den), num.rem_euclid(den) as f64 / den as f64)
}

pub(super) fn validate(
    a: u32,
    channels: usize,
    src_w: usize,
    dst_w: usize,
) -> Result<(), ResampleError> {
    if a == 0 {
        return Err(ResampleError::InvalidKernel);
    }
    if channels == 0 {
        return Err(ResampleError::NoChannels);
    }
    if src_w == 0 || dst_w == 0 {
        return Err(ResampleError::EmptyGrid { src_w, dst_w });
    }
    Ok(())
}

pub(super) fn check_len(
    role: BufferRole,
    expected: usize,
    actual: usize,
) -> Result<(), ResampleError> {
    if actual < expected {
        return Err(ResampleError::BufferLength {
            role,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Divide by the applied kernel weight, refusing non-positive weights.
pub(super) fn normalize(sum: f32, weight: f32, index: usize) -> Result<f32, ResampleError> {
    if weight > 0.0 {
        Ok(sum / weight)
    } else {
        tracing::warn!(index, weight, "Degenerate kernel weight");
        Err(ResampleError::DegenerateWeight { index })
    }
}

struct Grid<'s> {
    src: &'s [f32],
    channels: usize,
    src_w: usize,
    dst_w: usize,
    a: u32,
    edge: EdgeMode,
}

impl Grid<'_> {
    /// Map a tap to a source index, or `None` when zero padding drops it.
    #[inline]
    fn tap(&self, index: i64) -> Option<usize> {
        let last = self.src_w as i64 - 1;
        match self.edge {
            EdgeMode::Clamping => Some(index.clamp(0, last) as usize),
            EdgeMode::ZeroPadding => (0..=last).contains(&index).then_some(index as usize),
        }
    }

    #[inline]
    fn sample(&self, frame: usize, ch: usize) -> f32 {
        self.src[self.channels * frame + ch]
    }
}

fn resample_fast(grid: &Grid<'_>, plan: FastPlan, dst: &mut [f32]) -> Result<(), ResampleError> {
    let table = plan.build_table(grid.a, grid.src_w, grid.dst_w)?;
    let first = table.first_tap();
    let nch = grid.channels;
    for j in 0..grid.dst_w {
        let phase = j % table.phases();
        let coefs = table.coefficients(phase);
        let (base, _) = destination_center(j, grid.src_w, grid.dst_w);
        for ch in 0..nch {
            let mut sum = 0.0;
            let mut used = 0.0;
            for (offset, &coef) in coefs.iter().enumerate() {
                let Some(frame) = grid.tap(base + first + offset as i64) else {
                    continue;
                };
                sum += grid.sample(frame, ch) * coef;
                used += coef;
            }
            let weight = match grid.edge {
                EdgeMode::Clamping => table.weight(phase),
                EdgeMode::ZeroPadding => used,
            };
            dst[nch * j + ch] = normalize(sum, weight, j)?;
        }
    }
    Ok(())
}

fn resample_slow(grid: &Grid<'_>, dst: &mut [f32]) -> Result<(), ResampleError> {
    let fs = if grid.src_w > grid.dst_w {
        grid.src_w as f64 / grid.dst_w as f64
    } else {
        1.0
    };
    let reach = fs * grid.a as f64;
    // Float-to-int casts saturate, so an absurd reach fails the reservation.
    let mut applied: Vec<(usize, f32)> =
        try_with_capacity((2.0 * reach.ceil() + 2.0) as usize, "tap scratch")?;

    let nch = grid.channels;
    for j in 0..grid.dst_w {
        let (base, frac) = destination_center(j, grid.src_w, grid.dst_w);
        let i0 = (frac - reach).floor() as i64 + 1;
        let i1 = (frac + reach).ceil() as i64 - 1;

        applied.clear();
        let mut weight = 0.0;
        for i in i0..=i1 {
            let Some(frame) = grid.tap(base + i) else {
                continue;
            };
            let coef = lanczos(((i as f64 - frac) / fs) as f32, grid.a as f32);
            applied.push((frame, coef));
            weight += coef;
        }

        for ch in 0..nch {
            let sum: f32 = applied
                .iter()
                .map(|&(frame, coef)| grid.sample(frame, ch) * coef)
                .sum();
            dst[nch * j + ch] = normalize(sum, weight, j)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAIR_SOURCE: [f32; 10] = [0.1, 0.3, 0.4, 0.3, 0.2, 0.4, 0.6, 0.8, 0.9, 0.7];

    fn run(src: &[f32], dst_w: usize, a: u32, edge: EdgeMode) -> Vec<f32> {
        let options = ResampleOptions::default().with_edge(edge);
        resample_regular(src, 1, dst_w, a, options).unwrap()
    }

    #[test]
    fn plan_detects_integer_upsampling() {
        let plan = RegularPlan::select(10, 20);
        let RegularPlan::Fast(fast) = plan else {
            panic!("expected fast path, got {plan:?}");
        };
        assert_eq!(fast.phases, 2);
        assert_eq!(fast.filter_scale, 1);
        assert_eq!(fast.coefficient_count(3).unwrap(), 12);
    }

    #[test]
    fn plan_detects_integer_downsampling() {
        let plan = RegularPlan::select(10, 5);
        let RegularPlan::Fast(fast) = plan else {
            panic!("expected fast path, got {plan:?}");
        };
        assert_eq!(fast.phases, 1);
        assert_eq!(fast.filter_scale, 2);
        assert_eq!(fast.coefficient_count(3).unwrap(), 12);
    }

    #[test]
    fn plan_falls_back_for_fractional_ratios() {
        assert_eq!(RegularPlan::select(10, 15), RegularPlan::Slow);
        assert_eq!(RegularPlan::select(15, 10), RegularPlan::Slow);
        assert_eq!(RegularPlan::select(7, 3), RegularPlan::Slow);
    }

    #[test]
    fn destination_center_matches_step_formula() {
        for (src_w, dst_w) in [(10, 20), (10, 5), (3, 9), (7, 10)] {
            let step = src_w as f64 / dst_w as f64;
            for j in 0..dst_w {
                let (base, frac) = destination_center(j, src_w, dst_w);
                let expected = (j as f64 + 0.5) * step - 0.5;
                assert!((base as f64 + frac - expected).abs() < 1e-12);
                assert!((0.0..1.0).contains(&frac));
            }
        }
    }

    #[test]
    fn destination_center_is_exact_on_integer_positions() {
        // (4 + 0.5) / 3 - 0.5 lands exactly on source index 1.
        assert_eq!(destination_center(4, 1, 3), (1, 0.0));
    }

    #[test]
    fn built_phase_tables_have_positive_weights() {
        for (src_w, dst_w, a) in [(10, 20, 1), (10, 40, 3), (10, 5, 2), (12, 3, 4)] {
            let RegularPlan::Fast(plan) = RegularPlan::select(src_w, dst_w) else {
                panic!("expected fast path");
            };
            let table = plan.build_table(a, src_w, dst_w).unwrap();
            assert_eq!(table.phases(), plan.phases);
            assert_eq!(table.first_tap(), 1 - (plan.filter_scale * a as usize) as i64);
            for phase in 0..table.phases() {
                let coefs = table.coefficients(phase);
                assert_eq!(coefs.len(), plan.taps(a).unwrap());
                let sum: f32 = coefs.iter().sum();
                let weight = table.weight(phase);
                assert!(weight > 0.0, "{src_w}->{dst_w} phase {phase} weight {weight}");
                assert!((weight - sum).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn phase_table_centers_the_kernel_on_each_phase() {
        // 10 -> 20: phase 0 sits at fraction 0.75 and phase 1 at 0.25, so
        // their tables mirror each other.
        let plan = FastPlan {
            phases: 2,
            filter_scale: 1,
        };
        let table = plan.build_table(2, 10, 20).unwrap();
        let (lo, hi) = (table.coefficients(0), table.coefficients(1));
        for (a, b) in lo.iter().zip(hi.iter().rev()) {
            assert!((a - b).abs() < 1e-6, "{lo:?} vs {hi:?}");
        }
        assert!((table.weight(0) - table.weight(1)).abs() < 1e-6);
    }

    #[test]
    fn oversized_plans_report_overflow() {
        let wide = FastPlan {
            phases: 1,
            filter_scale: usize::MAX,
        };
        assert!(matches!(
            wide.taps(2),
            Err(ResampleError::SizeOverflow { what: "kernel taps" })
        ));
        let many = FastPlan {
            phases: usize::MAX / 2,
            filter_scale: 1,
        };
        assert!(matches!(
            many.coefficient_count(u32::MAX),
            Err(ResampleError::SizeOverflow {
                what: "coefficient table"
            })
        ));
        assert!(matches!(
            many.build_table(u32::MAX, 1, usize::MAX / 2),
            Err(ResampleError::SizeOverflow { .. })
        ));
    }

    #[test]
    fn normalize_rejects_zero_and_negative_weight() {
        assert_eq!(normalize(1.5, 0.5, 0).unwrap(), 3.0);
        assert!(matches!(
            normalize(1.0, 0.0, 3),
            Err(ResampleError::DegenerateWeight { index: 3 })
        ));
        assert!(matches!(
            normalize(-0.2, -0.2, 7),
            Err(ResampleError::DegenerateWeight { index: 7 })
        ));
    }

    #[test]
    fn same_length_is_identity() {
        let out = run(&PAIR_SOURCE, 10, 3, EdgeMode::Clamping);
        for (got, exp) in out.iter().zip(PAIR_SOURCE) {
            assert!((got - exp).abs() < 1e-6, "got {got} expected {exp}");
        }
    }

    #[test]
    fn upsample_passes_near_source_values() {
        let out = run(&PAIR_SOURCE, 20, 3, EdgeMode::Clamping);
        assert_eq!(out.len(), 20);
        // Destination 1 sits at source position 0.25, between 0.1 and 0.3.
        assert!(out[1] > 0.1 && out[1] < 0.3, "got {}", out[1]);
        // Destination 16 sits at 7.75, between 0.8 and 0.9.
        assert!(out[16] > 0.8 && out[16] < 0.95, "got {}", out[16]);
    }

    #[test]
    fn downsample_smooths_source() {
        let out = run(&PAIR_SOURCE, 5, 3, EdgeMode::Clamping);
        assert_eq!(out.len(), 5);
        let expected = [0.2196, 0.3403, 0.2840, 0.7274, 0.8107];
        for (got, exp) in out.iter().zip(expected) {
            assert!((got - exp).abs() < 1e-3, "got {got} expected {exp}");
        }
    }

    #[test]
    fn flat_signal_stays_flat_on_every_path() {
        let cases = [(10, 20, 1), (10, 20, 3), (10, 5, 3), (10, 7, 2), (7, 10, 3), (3, 17, 1)];
        for edge in [EdgeMode::Clamping, EdgeMode::ZeroPadding] {
            for (src_w, dst_w, a) in cases {
                let out = run(&vec![1.0; src_w], dst_w, a, edge);
                for (j, v) in out.iter().enumerate() {
                    assert!(
                        (v - 1.0).abs() < 1e-5,
                        "{edge:?} {src_w}->{dst_w} a={a} j={j} got {v}"
                    );
                }
            }
        }
    }

    #[test]
    fn channels_are_resampled_independently() {
        let stereo: Vec<f32> = PAIR_SOURCE.iter().flat_map(|&v| [v, -v]).collect();
        let options = ResampleOptions::default();
        let out = resample_regular(&stereo, 2, 15, 2, options).unwrap();
        let mono = resample_regular(&PAIR_SOURCE, 1, 15, 2, options).unwrap();
        for (j, &m) in mono.iter().enumerate() {
            assert!((out[2 * j] - m).abs() < 1e-6);
            assert!((out[2 * j + 1] + m).abs() < 1e-6);
        }
    }

    #[test]
    fn zero_padding_differs_from_clamping_at_edges() {
        let src = [1.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        let clamped = run(&src, 12, 3, EdgeMode::Clamping);
        let padded = run(&src, 12, 3, EdgeMode::ZeroPadding);
        assert!((clamped[0] - padded[0]).abs() > 1e-3);
    }

    #[test]
    fn rejects_invalid_requests() {
        let options = ResampleOptions::default();
        assert!(matches!(
            resample_regular(&PAIR_SOURCE, 1, 5, 0, options),
            Err(ResampleError::InvalidKernel)
        ));
        assert!(matches!(
            resample_regular(&PAIR_SOURCE, 1, 0, 3, options),
            Err(ResampleError::EmptyGrid { .. })
        ));
        assert!(matches!(
            resample_regular(&[], 1, 4, 3, options),
            Err(ResampleError::EmptyGrid { .. })
        ));
    }

    #[test]
    fn rejects_short_destination() {
        let mut dst = [0.0; 3];
        let err = resample_regular_1d(Regular1d {
            options: ResampleOptions::default(),
            a: 2,
            channels: 1,
            src_w: 10,
            dst_w: 5,
            src: &PAIR_SOURCE,
            dst: &mut dst,
        })
        .unwrap_err();
        assert!(matches!(
            err,
            ResampleError::BufferLength {
                role: BufferRole::Destination,
                expected: 5,
                actual: 3,
            }
        ));
    }

    #[test]
    fn regular_2d_is_unsupported() {
        let src = [0.0; 16];
        let mut dst = [0.0; 64];
        let err = resample_regular_2d(Regular2d {
            options: ResampleOptions::default(),
            a: 2,
            channels: 1,
            src_w: 4,
            src_h: 4,
            dst_w: 8,
            dst_h: 8,
            src: &src,
            dst: &mut dst,
        })
        .unwrap_err();
        assert!(matches!(err, ResampleError::Unsupported(_)));
    }
}
